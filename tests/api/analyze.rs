use serde_json::{json, Value};

use crate::helpers::{spawn_app, Page};

const PATH: &str = "/api/analyze";

#[tokio::test]
async fn analyze_returns_analysis_and_metadata() {
    let app = spawn_app(
        vec![("https://acme.io", Page::Html("Acme builds developer tools"))],
        vec![(
            "Acme builds developer tools",
            Some(r#"{"summary":"Developer tools","links":["/careers"]}"#),
        )],
        None,
    )
    .await;

    let response = app.post_json(PATH, &json!({ "url": "https://acme.io" })).await;

    assert_eq!(200, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "analysis": { "summary": "Developer tools", "links": ["/careers"] },
            "metadata": {
                "title": "Title of https://acme.io",
                "description": "A test page",
                "headings": { "h1": "Welcome", "h2": null }
            }
        })
    );
}

#[tokio::test]
async fn analyze_returns_400_without_a_url() {
    let app = spawn_app(vec![], vec![], None).await;
    let test_cases = vec![
        (json!({}), "missing url"),
        (json!({ "url": "   " }), "blank url"),
        (json!({ "url": 42 }), "url is a number"),
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
        assert_eq!(body, json!({ "error": "URL is required" }));
    }
}

#[tokio::test]
async fn analyze_rejects_a_non_text_prompt_with_its_own_error() {
    let app = spawn_app(vec![("https://acme.io", Page::Html("Acme home"))], vec![], None).await;

    let response = app
        .post_json(PATH, &json!({ "url": "https://acme.io", "prompt": 5 }))
        .await;

    assert_eq!(400, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Prompt must be a string" }));
    assert!(app.scraped_urls().is_empty());
}

#[tokio::test]
async fn analyze_returns_502_when_site_is_unreachable() {
    let app = spawn_app(vec![("https://down.io", Page::Down("HTTP 503"))], vec![], None).await;

    let response = app.post_json(PATH, &json!({ "url": "https://down.io" })).await;

    assert_eq!(502, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to fetch website: HTTP 503" }));
    assert_eq!(app.model_calls(), 0);
}

#[tokio::test]
async fn analyze_hides_model_failures() {
    let app = spawn_app(
        vec![("https://acme.io", Page::Html("Acme home"))],
        vec![("Acme home", None)],
        None,
    )
    .await;

    let response = app.post_json(PATH, &json!({ "url": "https://acme.io" })).await;

    assert_eq!(500, response.status().as_u16());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Failed to analyze website" }));
}
