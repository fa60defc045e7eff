// src/tests/router_tests/api_tests.rs

use crate::tests::utils::{get, listing, make_app, page_url, results_page, StubFetcher};

#[test]
fn api_returns_records_and_page_outcomes() {
    let fetcher = StubFetcher::new(vec![
        (
            page_url("vitz", 1),
            Ok(results_page(&[listing(
                "Toyota Vitz 2015 Hybrid",
                "Rs. 2,450,000",
                "/ads/1",
            )])),
        ),
        (page_url("vitz", 2), crate::tests::utils::blocked("vitz", 2)),
        (page_url("vitz", 3), Ok(results_page(&[]))),
    ]);
    let app = make_app(fetcher);

    let (status, content_type, body) = get(&app, "/api/listings?model=vitz");

    assert_eq!(status, 200);
    assert!(content_type.starts_with("application/json"));

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["query"], "vitz");
    assert_eq!(json["status"], "partial");
    assert_eq!(json["cached"], false);
    assert_eq!(
        json["records"],
        serde_json::json!([{ "title": "Toyota Vitz 2015 Hybrid", "year": 2015, "price": 2450000 }])
    );
    assert_eq!(json["pages"][0]["kept"], 1);
    assert_eq!(json["pages"][1]["skipped"], "blocked");
    assert_eq!(json["pages"][2]["listings"], 0);
    assert_eq!(json["summary"]["min_price"], 2450000);
    assert_eq!(json["summary"]["by_year"][0]["year"], 2015);
}

#[test]
fn api_empty_result_has_null_summary() {
    let app = make_app(StubFetcher::uniform("alto", Ok(results_page(&[]))));

    let (status, _, body) = get(&app, "/api/listings?model=alto");

    assert_eq!(status, 200);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "no_matches");
    assert_eq!(json["records"], serde_json::json!([]));
    assert!(json["summary"].is_null());
}

#[test]
fn export_downloads_a_workbook() {
    let app = make_app(StubFetcher::uniform(
        "wagon-r",
        Ok(results_page(&[listing(
            "Suzuki Wagon R 2017",
            "Rs. 3,750,000",
            "/ads/7",
        )])),
    ));

    let (status, content_type, body) = get(&app, "/export?model=wagon-r");

    assert_eq!(status, 200);
    assert_eq!(
        content_type,
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    // XLSX files are zip archives.
    assert!(body.starts_with(b"PK"));
}
