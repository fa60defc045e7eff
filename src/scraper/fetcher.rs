// fetcher.rs
use crate::scraper::ScraperError;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER};
use reqwest::StatusCode;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0 Safari/537.36";

/// Fetches one results page and returns its HTML.
///
/// Anything other than a 200 with a readable body is an error, classified so
/// the caller can tell a block from a plain failure.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ScraperError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));

        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ScraperError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| ScraperError::Transport(e.to_string()))?;

        match resp.status() {
            StatusCode::OK => resp
                .text()
                .map_err(|e| ScraperError::Transport(e.to_string())),
            StatusCode::FORBIDDEN => Err(ScraperError::Blocked {
                url: url.to_string(),
            }),
            status => Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Answers a single request on a loopback port with `status_line` and `body`.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        format!("http://{addr}/search/vitz?page=1")
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn ok_returns_body() {
        let url = serve_once("200 OK", "<ul><li class=\"item\"></li></ul>");
        assert_eq!(
            fetcher().fetch(&url),
            Ok("<ul><li class=\"item\"></li></ul>".to_string())
        );
    }

    #[test]
    fn forbidden_is_blocked() {
        let url = serve_once("403 Forbidden", "denied");
        assert_eq!(fetcher().fetch(&url), Err(ScraperError::Blocked { url }));
    }

    #[test]
    fn other_status_is_unexpected_and_body_is_ignored() {
        let url = serve_once("503 Service Unavailable", "try later");
        assert_eq!(
            fetcher().fetch(&url),
            Err(ScraperError::UnexpectedStatus { status: 503, url })
        );
    }

    #[test]
    fn refused_connection_is_transport() {
        assert!(matches!(
            fetcher().fetch("http://127.0.0.1:1/"),
            Err(ScraperError::Transport(_))
        ));
    }
}
