use crate::app::App;
use crate::config::Config;
use crate::router::handle;
use crate::scraper::{PageFetcher, ScrapeEvent, ScrapeObserver, ScraperError};
use astra::{Body, Request};
use http::Method;
use std::collections::HashMap;
use std::io::Read;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://cars.example";

/// Serves canned pages by URL; anything unknown is a transport failure.
#[derive(Clone, Default)]
pub struct StubFetcher {
    pages: Arc<Mutex<HashMap<String, Result<String, ScraperError>>>>,
    calls: Arc<AtomicUsize>,
}

impl StubFetcher {
    pub fn new(pages: Vec<(String, Result<String, ScraperError>)>) -> Self {
        Self {
            pages: Arc::new(Mutex::new(pages.into_iter().collect())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Same response for every page of `query`.
    pub fn uniform(query: &str, response: Result<String, ScraperError>) -> Self {
        Self::new(
            (1..=3)
                .map(|p| (page_url(query, p), response.clone()))
                .collect(),
        )
    }

    /// Swaps the response for every page of `query`; clones see the change.
    pub fn respond_all(&self, query: &str, response: Result<String, ScraperError>) {
        let mut pages = self.pages.lock().unwrap();
        for p in 1..=3 {
            pages.insert(page_url(query, p), response.clone());
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PageFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(ScraperError::Transport(format!("no stub for {url}"))))
    }
}

#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<ScrapeEvent>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<ScrapeEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ScrapeObserver for RecordingObserver {
    fn on_event(&self, event: &ScrapeEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}

pub fn page_url(query: &str, page: u32) -> String {
    format!("{BASE_URL}/search/{query}?page={page}")
}

pub fn blocked(query: &str, page: u32) -> Result<String, ScraperError> {
    Err(ScraperError::Blocked {
        url: page_url(query, page),
    })
}

/// One `li.item` the way the site renders it.
pub fn listing(title: &str, price: &str, href: &str) -> String {
    format!(
        r#"<li class="item round">
             <a href="{href}"><img src="/thumb.jpg"></a>
             <h2 class="more"><a href="{href}">{title}</a></h2>
             <div class="boxtext">
               <div class="boxintxt"><b>{price}</b></div>
               <div class="boxintxt">Colombo</div>
             </div>
           </li>"#
    )
}

pub fn results_page(items: &[String]) -> String {
    format!(
        "<!DOCTYPE html><html><head><title>Search</title></head><body>\
         <div id=\"content\"><ul>{}</ul></div></body></html>",
        items.concat()
    )
}

pub fn test_config() -> Config {
    let mut config = Config::from_lookup(|_| None).unwrap();
    config.scrape.base_url = BASE_URL.to_string();
    config
}

pub fn make_app(fetcher: StubFetcher) -> App {
    App::with_fetcher(
        test_config(),
        Box::new(fetcher),
        Arc::new(RecordingObserver::default()),
    )
    .unwrap()
}

/// GET `uri` through the router, returning status, content type and body.
pub fn get(app: &App, uri: &str) -> (u16, String, Vec<u8>) {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = uri.parse().unwrap();

    let mut resp = match handle(req, app) {
        Ok(resp) => resp,
        Err(err) => crate::templates::html_error_response(err),
    };

    let content_type = resp
        .headers()
        .get("Content-Type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    let mut body = Vec::new();
    resp.body_mut().reader().read_to_end(&mut body).unwrap();

    (resp.status().as_u16(), content_type, body)
}

pub fn get_text(app: &App, uri: &str) -> (u16, String) {
    let (status, _, body) = get(app, uri);
    (status, String::from_utf8(body).unwrap())
}
