use crate::app::App;
use crate::domain::{summarize, MarketSummary};
use crate::errors::ServerError;
use crate::responses::{html_response, json_response, ResultResp};
use crate::scraper::{ListingRecord, PageOutcome, ScrapeReport, ScrapeStatus};
use crate::spreadsheets::export_listings_xlsx;
use crate::templates;
use crate::templates::pages::AnalysisVm;
use astra::Request;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

const MAX_QUERY_LEN: usize = 64;

pub fn handle(req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str();
    let path = req.uri().path();

    match (method, path) {
        ("GET", "/") => html_response(templates::pages::home_page(&app.config.models, None)),
        ("GET", "/analyze") => analyze(&req, app),
        ("GET", "/api/listings") => api_listings(&req, app),
        ("GET", "/export") => export(&req, app),
        _ => Err(ServerError::NotFound),
    }
}

fn analyze(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = model_param(&params)?;
    let analysis = app.market.analyze(&query, flag(&params, "refresh"));

    let vm = AnalysisVm {
        query: &query,
        models: &app.config.models,
        report: &analysis.report,
        summary: summarize(&analysis.report.records),
        cached: analysis.cached,
    };
    html_response(templates::pages::analysis_page(&vm))
}

#[derive(Serialize)]
struct ListingsJson<'a> {
    query: &'a str,
    status: ScrapeStatus,
    cached: bool,
    fetched_at: DateTime<Utc>,
    records: &'a [ListingRecord],
    pages: Vec<PageJson<'a>>,
    summary: Option<MarketSummary>,
}

#[derive(Serialize)]
struct PageJson<'a> {
    page: u32,
    url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    listings: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kept: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skipped: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn page_json(report: &ScrapeReport) -> Vec<PageJson<'_>> {
    report
        .pages
        .iter()
        .map(|p| match &p.outcome {
            PageOutcome::Parsed { listings, kept, .. } => PageJson {
                page: p.page,
                url: &p.url,
                listings: Some(*listings),
                kept: Some(*kept),
                skipped: None,
                error: None,
            },
            PageOutcome::Skipped(reason) => PageJson {
                page: p.page,
                url: &p.url,
                listings: None,
                kept: None,
                skipped: Some(reason.kind()),
                error: Some(reason.to_string()),
            },
        })
        .collect()
}

fn api_listings(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = model_param(&params)?;
    let analysis = app.market.analyze(&query, flag(&params, "refresh"));
    let report = &analysis.report;

    json_response(&ListingsJson {
        query: &report.query,
        status: report.status(),
        cached: analysis.cached,
        fetched_at: report.fetched_at,
        records: &report.records,
        pages: page_json(report),
        summary: summarize(&report.records),
    })
}

fn export(req: &Request, app: &App) -> ResultResp {
    let params = parse_query(req);
    let query = model_param(&params)?;
    let analysis = app.market.analyze(&query, false);
    export_listings_xlsx(&analysis.report.records, &query)
}

/// The search term, trimmed. Must be short enough to sit in a URL path.
fn model_param(params: &HashMap<String, String>) -> Result<String, ServerError> {
    let raw = params
        .get("model")
        .map(|m| m.trim())
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ServerError::BadRequest("missing 'model' parameter".into()))?;

    if raw.chars().count() > MAX_QUERY_LEN {
        return Err(ServerError::BadRequest(format!(
            "'model' must be at most {MAX_QUERY_LEN} characters"
        )));
    }
    Ok(raw.to_string())
}

fn flag(params: &HashMap<String, String>, name: &str) -> bool {
    matches!(params.get(name).map(String::as_str), Some("1" | "true" | "yes"))
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| url::form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
