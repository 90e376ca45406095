use serde_json::{json, Value};

use crate::helpers::{spawn_app, spawn_app_with_body_limit, Page};

const PATH: &str = "/api/analyze-resume";

#[tokio::test]
async fn analyze_resume_ranks_results_and_contains_failures() {
    let app = spawn_app(
        vec![
            ("https://a.com", Page::Html("Senior backend engineer, Go, Kubernetes")),
            ("https://b.com", Page::Down("timeout")),
        ],
        vec![(
            "Senior backend engineer",
            Some(r#"{"relevanceScore":80,"explanation":"Strong backend match."}"#),
        )],
        None,
    )
    .await;

    let response = app
        .post_json(PATH, &json!({ "urls": ["https://a.com", "https://b.com"] }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "results": [
                { "url": "https://a.com", "relevanceScore": 80, "explanation": "Strong backend match." },
                { "url": "https://b.com", "relevanceScore": 0, "explanation": "Error: timeout" }
            ]
        })
    );
    assert_eq!(app.model_calls(), 1);
}

#[tokio::test]
async fn analyze_resume_returns_400_when_urls_are_missing_or_not_an_array() {
    let app = spawn_app(vec![], vec![], None).await;
    let test_cases = vec![
        (json!({}), "missing urls"),
        (json!({ "urls": "https://a.com" }), "urls is a string"),
        (json!({ "urls": { "0": "https://a.com" } }), "urls is an object"),
        (json!({ "urls": null }), "urls is null"),
        (json!({ "urls": ["https://a.com", 7] }), "urls holds a number"),
    ];

    for (body, description) in test_cases {
        let response = app.post_json(PATH, &body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({ "error": "URLs array is required" }));
    }
    assert!(app.scraped_urls().is_empty());
}

#[tokio::test]
async fn analyze_resume_returns_500_for_unparseable_body() {
    let app = spawn_app(vec![], vec![], None).await;

    let response = app.post_raw(PATH, "{\"urls\": [").await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to analyze resume match" }));
}

#[tokio::test]
async fn analyze_resume_returns_500_for_null_body() {
    let app = spawn_app(vec![], vec![], None).await;

    let response = app.post_raw(PATH, "null").await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to analyze resume match" }));
    assert!(app.scraped_urls().is_empty());
}

#[tokio::test]
async fn analyze_resume_accepts_batches_larger_than_256_kib() {
    let app = spawn_app(vec![], vec![], None).await;
    let urls: Vec<String> = (0..12_000)
        .map(|i| format!("https://jobs.example.com/openings/{:05}", i))
        .collect();
    let body = json!({ "urls": urls }).to_string();
    assert!(body.len() > 256 * 1024);

    let response = app.post_raw(PATH, body).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["results"].as_array().unwrap().len(), urls.len());
    assert_eq!(app.scraped_urls().len(), urls.len());
}

#[tokio::test]
async fn analyze_resume_over_body_limit_returns_json_error() {
    let app = spawn_app_with_body_limit(vec![], vec![], None, 1024).await;
    let urls: Vec<String> = (0..100)
        .map(|i| format!("https://jobs.example.com/openings/{:05}", i))
        .collect();

    let response = app.post_json(PATH, &json!({ "urls": urls })).await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to analyze resume match" }));
    assert!(app.scraped_urls().is_empty());
}

#[tokio::test]
async fn analyze_resume_with_empty_list_returns_empty_results() {
    let app = spawn_app(vec![], vec![], None).await;

    let response = app.post_json(PATH, &json!({ "urls": [] })).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "results": [] }));
    assert!(app.scraped_urls().is_empty());
    assert_eq!(app.model_calls(), 0);
}

#[tokio::test]
async fn analyze_resume_keeps_one_result_per_url() {
    let app = spawn_app(
        vec![
            ("https://rust.dev/jobs", Page::Html("Rust platform role")),
            ("https://go.dev/jobs", Page::Html("Go services role")),
            ("https://odd.dev/jobs", Page::Html("Odd role")),
        ],
        vec![
            (
                "Rust platform role",
                Some(r#"{"relevanceScore":95,"explanation":"Rust heavy."}"#),
            ),
            (
                "Go services role",
                Some(r#"{"relevanceScore":70,"explanation":"Go heavy."}"#),
            ),
            ("Odd role", Some("I think this is a 60")),
        ],
        Some(2),
    )
    .await;
    let urls = json!([
        "https://go.dev/jobs",
        "https://odd.dev/jobs",
        "https://rust.dev/jobs",
        "https://go.dev/jobs",
        "https://unknown.dev"
    ]);

    let response = app.post_json(PATH, &json!({ "urls": urls })).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 5);

    let scores: Vec<u64> = results
        .iter()
        .map(|r| r["relevanceScore"].as_u64().unwrap())
        .collect();
    assert_eq!(scores, vec![95, 70, 70, 0, 0]);

    let odd = results
        .iter()
        .find(|r| r["url"] == "https://odd.dev/jobs")
        .unwrap();
    assert!(odd["explanation"]
        .as_str()
        .unwrap()
        .starts_with("Error analyzing URL: model answer is not valid JSON"));

    let unknown = results
        .iter()
        .find(|r| r["url"] == "https://unknown.dev")
        .unwrap();
    assert_eq!(unknown["explanation"], "Error: Request timed out");
}

#[tokio::test]
async fn analyze_resume_survives_model_outage_for_one_url() {
    let app = spawn_app(
        vec![
            ("https://stable.com", Page::Html("Stable team")),
            ("https://flaky.com", Page::Html("Flaky team")),
        ],
        vec![
            (
                "Stable team",
                Some(r#"{"relevanceScore":55,"explanation":"Partial overlap."}"#),
            ),
            ("Flaky team", None),
        ],
        None,
    )
    .await;

    let response = app
        .post_json(PATH, &json!({ "urls": ["https://flaky.com", "https://stable.com"] }))
        .await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["results"][0],
        json!({ "url": "https://stable.com", "relevanceScore": 55, "explanation": "Partial overlap." })
    );
    assert_eq!(body["results"][1]["url"], "https://flaky.com");
    assert_eq!(body["results"][1]["relevanceScore"], 0);
    assert!(body["results"][1]["explanation"]
        .as_str()
        .unwrap()
        .contains("upstream unavailable"));
}
