use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use crate::scraper::TracingObserver;
use astra::Server;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod cache;
mod config;
mod domain;
mod errors;
mod responses;
mod router;
mod scraper;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vehicle_prices=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true),
        )
        .init();

    // 1️⃣ Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e:#}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        base_url = %config.scrape.base_url,
        pages = ?config.scrape.pages,
        min_year = config.scrape.filter.min_year,
        min_price = config.scrape.filter.min_price,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        "Scraper configured"
    );

    // 2️⃣ Build shared state
    let addr = config.bind_addr;
    let workers = config.workers;
    let app = match App::new(config, Arc::new(TracingObserver)) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup failed: {e:#}");
            std::process::exit(1);
        }
    };

    // 3️⃣ Start the server
    tracing::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(workers);

    // 4️⃣ Serve requests, passing app state into closure
    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => templates::html_error_response(err),
    });

    if let Err(e) = result {
        tracing::error!("Server ended with error: {e}");
    }

    tracing::info!("Server shut down cleanly.");
}
