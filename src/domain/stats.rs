// src/domain/stats.rs

use crate::scraper::ListingRecord;
use serde::Serialize;
use std::collections::BTreeMap;

pub const RUPEES_PER_LAKH: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearAverage {
    pub year: u32,
    pub mean_price: f64,
    pub listings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketSummary {
    pub listings: usize,
    pub mean_price: f64,
    pub min_price: u64,
    pub max_price: u64,
    /// Ascending by year.
    pub by_year: Vec<YearAverage>,
}

/// Price statistics over a result set. `None` when there is nothing to summarise.
pub fn summarize(records: &[ListingRecord]) -> Option<MarketSummary> {
    let min_price = records.iter().map(|r| r.price).min()?;
    let max_price = records.iter().map(|r| r.price).max()?;
    let total: f64 = records.iter().map(|r| r.price as f64).sum();

    let mut years: BTreeMap<u32, (f64, usize)> = BTreeMap::new();
    for r in records {
        let slot = years.entry(r.year).or_insert((0.0, 0));
        slot.0 += r.price as f64;
        slot.1 += 1;
    }

    let by_year = years
        .into_iter()
        .map(|(year, (sum, n))| YearAverage {
            year,
            mean_price: sum / n as f64,
            listings: n,
        })
        .collect();

    Some(MarketSummary {
        listings: records.len(),
        mean_price: total / records.len() as f64,
        min_price,
        max_price,
        by_year,
    })
}

/// "Rs. 24.50 Lakhs"
pub fn format_lakhs(rupees: f64) -> String {
    let lakhs = rupees / RUPEES_PER_LAKH;
    let fixed = format!("{lakhs:.2}");
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("Rs. {}.{} Lakhs", group_thousands(whole), frac)
}

/// "Rs. 2,450,000"
pub fn format_rupees(rupees: u64) -> String {
    format!("Rs. {}", group_thousands(&rupees.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("{sign}{out}")
}
