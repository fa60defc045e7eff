use crate::domain::format_rupees;
use crate::scraper::ListingRecord;
use maud::{html, Markup};

pub fn listing_table(listings: &[ListingRecord]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th scope="col" { "Model" }
                    th scope="col" { "Year" }
                    th scope="col" { "Price" }
                }
            }
            tbody {
                @for listing in listings {
                    tr {
                        td { (listing.title) }
                        td {
                            @if listing.year > 0 { (listing.year) } @else { "–" }
                        }
                        td class="num" { (format_rupees(listing.price)) }
                    }
                }
            }
        }
    }
}
