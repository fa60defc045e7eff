use crate::domain::{format_lakhs, MarketSummary};
use crate::scraper::{PageOutcome, ScrapeReport, ScrapeStatus};
use crate::templates::components::{card, listing_table, metric, price_by_year_chart};
use crate::templates::desktop_layout;
use crate::templates::pages::home::model_picker;
use maud::{html, Markup};

pub struct AnalysisVm<'a> {
    pub query: &'a str,
    pub models: &'a [String],
    pub report: &'a ScrapeReport,
    pub summary: Option<MarketSummary>,
    pub cached: bool,
}

pub fn analysis_page(vm: &AnalysisVm<'_>) -> Markup {
    let status = vm.report.status();

    desktop_layout(
        &format!("{} prices", vm.query),
        html! {
            main class="container" {
                h1 { "Vehicle Price Analytics" }
                (model_picker(vm.models, Some(vm.query)))

                @match &vm.summary {
                    Some(summary) => (results(vm, summary, status)),
                    None => (no_data(status)),
                }

                (page_log(vm.report, vm.cached))
            }
        },
    )
}

fn results(vm: &AnalysisVm<'_>, summary: &MarketSummary, status: ScrapeStatus) -> Markup {
    html! {
        div class="alert alert-success" {
            "Found " (summary.listings) " listings."
        }
        @if status == ScrapeStatus::Partial {
            div class="alert alert-info" {
                "Some result pages could not be loaded; figures cover the pages that were."
            }
        }

        div class="metrics" {
            (metric("Average Price", &format_lakhs(summary.mean_price)))
            (metric("Min Price", &format_lakhs(summary.min_price as f64)))
            (metric("Max Price", &format_lakhs(summary.max_price as f64)))
        }

        (card("Price vs Year", price_by_year_chart(&summary.by_year)))

        section class="card" {
            details {
                summary { "Show Data" }
                (listing_table(&vm.report.records))
            }
            p {
                a href=(format!("/export?model={}", encode(vm.query))) { "Download as Excel" }
                " · "
                a href=(format!("/api/listings?model={}", encode(vm.query))) { "JSON" }
            }
        }
    }
}

fn no_data(status: ScrapeStatus) -> Markup {
    html! {
        div class="alert alert-error" {
            "No data found."
            @if status == ScrapeStatus::Blocked {
                " The site answered 'Access Forbidden' for every page."
            }
        }
        @match status {
            ScrapeStatus::Blocked => div class="alert alert-info" {
                "The site blocks requests from cloud servers. Run the dashboard from your own machine or another unblocked network and try again."
            },
            ScrapeStatus::Failed => div class="alert alert-info" {
                "None of the result pages could be loaded. Check the network connection and try again."
            },
            _ => div class="alert alert-info" {
                "The search worked but no listing had a firm price above the configured thresholds."
            },
        }
    }
}

fn page_log(report: &ScrapeReport, cached: bool) -> Markup {
    html! {
        section class="card" {
            details {
                summary {
                    "Fetch details: " (report.status().label())
                    @if cached { " (cached)" }
                }
                p { "Fetched at " (report.fetched_at.format("%Y-%m-%d %H:%M:%S UTC").to_string()) }
                ul {
                    @for page in &report.pages {
                        li {
                            "Page " (page.page) ": "
                            @match &page.outcome {
                                PageOutcome::Parsed { listings, kept, filtered, rejected } => {
                                    (listings) " listings, " (kept) " kept, "
                                    (filtered) " below thresholds, " (rejected) " unreadable"
                                }
                                PageOutcome::Skipped(reason) => { "skipped (" (reason.to_string()) ")" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn encode(query: &str) -> String {
    url::form_urlencoded::byte_serialize(query.as_bytes()).collect()
}
