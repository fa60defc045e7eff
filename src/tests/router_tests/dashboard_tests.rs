// src/tests/router_tests/dashboard_tests.rs

use crate::tests::utils::{
    blocked, get_text, listing, make_app, page_url, results_page, StubFetcher,
};

#[test]
fn home_lists_configured_models() {
    let app = make_app(StubFetcher::default());

    let (status, body) = get_text(&app, "/");

    assert_eq!(status, 200);
    assert!(body.contains("Analyze Market"));
    for model in ["wagon-r", "vitz", "alto", "premio", "aqua"] {
        assert!(body.contains(&format!("value=\"{model}\"")), "missing {model}");
    }
}

#[test]
fn analyze_renders_metrics_chart_and_table() {
    let page = results_page(&[
        listing("Toyota Vitz 2015 Hybrid", "Rs. 2,450,000", "/ads/1"),
        listing("Toyota Vitz 2018 Safety", "Rs. 4,550,000", "/ads/2"),
    ]);
    let app = make_app(StubFetcher::uniform("vitz", Ok(page)));

    let (status, body) = get_text(&app, "/analyze?model=vitz");

    assert_eq!(status, 200);
    assert!(body.contains("Found 6 listings."));
    assert!(body.contains("Average Price"));
    assert!(body.contains("Rs. 35.00 Lakhs"));
    assert!(body.contains("Rs. 24.50 Lakhs"));
    assert!(body.contains("Rs. 45.50 Lakhs"));
    assert!(body.contains("<svg"));
    assert!(body.contains("Show Data"));
    assert!(body.contains("Toyota Vitz 2018 Safety"));
    assert!(body.contains("Rs. 4,550,000"));
    assert!(body.contains("/export?model=vitz"));
}

#[test]
fn analyze_explains_a_block() {
    let fetcher = StubFetcher::new((1..=3).map(|p| (page_url("aqua", p), blocked("aqua", p))).collect());
    let app = make_app(fetcher);

    let (status, body) = get_text(&app, "/analyze?model=aqua");

    assert_eq!(status, 200);
    assert!(body.contains("No data found."));
    assert!(body.contains("Access Forbidden"));
    assert!(body.contains("unblocked network"));
}

#[test]
fn analyze_with_no_matches_is_not_an_error() {
    let app = make_app(StubFetcher::uniform("vitz", Ok(results_page(&[]))));

    let (status, body) = get_text(&app, "/analyze?model=vitz");

    assert_eq!(status, 200);
    assert!(body.contains("No data found."));
    assert!(!body.contains("Access Forbidden"));
}

#[test]
fn analyze_uses_cache_on_second_request() {
    let fetcher = StubFetcher::uniform("vitz", Ok(results_page(&[])));
    let app = make_app(fetcher.clone());

    get_text(&app, "/analyze?model=vitz");
    let (_, body) = get_text(&app, "/analyze?model=vitz");
    assert_eq!(fetcher.calls(), 3);
    assert!(body.contains("(cached)"));

    get_text(&app, "/analyze?model=vitz&refresh=1");
    assert_eq!(fetcher.calls(), 6);
}

#[test]
fn analyze_requires_a_model() {
    let app = make_app(StubFetcher::default());

    let (status, _) = get_text(&app, "/analyze");
    assert_eq!(status, 400);

    let (status, _) = get_text(&app, "/analyze?model=%20%20");
    assert_eq!(status, 400);

    let long = "x".repeat(65);
    let (status, _) = get_text(&app, &format!("/analyze?model={long}"));
    assert_eq!(status, 400);
}

#[test]
fn unknown_route_is_404() {
    let app = make_app(StubFetcher::default());

    let (status, body) = get_text(&app, "/nope");

    assert_eq!(status, 404);
    assert!(body.contains("Not Found"));
}
