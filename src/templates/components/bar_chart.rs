use crate::domain::stats::RUPEES_PER_LAKH;
use crate::domain::{format_lakhs, YearAverage};
use maud::{html, Markup};

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_TOP: f64 = 28.0;
const MARGIN_BOTTOM: f64 = 36.0;
const MARGIN_X: f64 = 16.0;

/// Mean price per year as an inline SVG bar chart.
pub fn price_by_year_chart(series: &[YearAverage]) -> Markup {
    let max = series
        .iter()
        .map(|y| y.mean_price)
        .fold(0.0_f64, f64::max);
    let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let slot = (WIDTH - 2.0 * MARGIN_X) / series.len().max(1) as f64;
    let bar_width = slot * 0.7;

    html! {
        svg
            xmlns="http://www.w3.org/2000/svg"
            class="chart"
            role="img"
            aria-label="Average price by year"
            viewBox=(format!("0 0 {WIDTH} {HEIGHT}"))
            width="100%"
        {
            line x1=(MARGIN_X) y1=(HEIGHT - MARGIN_BOTTOM) x2=(WIDTH - MARGIN_X) y2=(HEIGHT - MARGIN_BOTTOM) stroke="#9ca3af" {}
            @for (i, point) in series.iter().enumerate() {
                @let h = if max > 0.0 { point.mean_price / max * plot_height } else { 0.0 };
                @let x = MARGIN_X + i as f64 * slot + (slot - bar_width) / 2.0;
                @let y = HEIGHT - MARGIN_BOTTOM - h;
                g {
                    title { (point.year) ": " (format_lakhs(point.mean_price)) " (" (point.listings) " listings)" }
                    rect x=(fmt(x)) y=(fmt(y)) width=(fmt(bar_width)) height=(fmt(h)) fill="#524ed2" rx="2" {}
                    text x=(fmt(x + bar_width / 2.0)) y=(fmt(y - 6.0)) text-anchor="middle" font-size="11" fill="#374151" {
                        (format!("{:.1}", point.mean_price / RUPEES_PER_LAKH))
                    }
                    text x=(fmt(x + bar_width / 2.0)) y=(fmt(HEIGHT - MARGIN_BOTTOM + 16.0)) text-anchor="middle" font-size="12" fill="#374151" {
                        (point.year)
                    }
                }
            }
        }
    }
}

fn fmt(v: f64) -> String {
    format!("{v:.1}")
}
