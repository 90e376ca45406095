use actix_web::{post, web, Error, HttpResponse};
use serde_json::Value;

use crate::services::{analyze_site, Analyzer, SiteAnalysisError};

use super::ErrorBody;

const URL_REQUIRED: &str = "URL is required";
const PROMPT_NOT_TEXT: &str = "Prompt must be a string";
const ANALYSIS_FAILED: &str = "Failed to analyze website";

fn required_url(body: &Value) -> Option<&str> {
    body.get("url")?
        .as_str()
        .map(str::trim)
        .filter(|url| !url.is_empty())
}

/// `Ok(None)` when no prompt was sent, `Err(())` when it is not text.
fn optional_prompt(body: &Value) -> Result<Option<&str>, ()> {
    match body.get("prompt") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(prompt)) => Ok(Some(prompt)),
        Some(_) => Err(()),
    }
}

#[post("/analyze")]
pub async fn analyze(
    body: Result<web::Bytes, Error>,
    analyzer: web::Data<Analyzer>,
) -> HttpResponse {
    let body: Value = match body
        .map_err(|e| e.to_string())
        .and_then(|body| serde_json::from_slice(&body).map_err(|e| e.to_string()))
    {
        Ok(body) => body,
        Err(e) => {
            log::error!("Error in analyze route: {}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::new(ANALYSIS_FAILED));
        }
    };

    let Some(url) = required_url(&body) else {
        return HttpResponse::BadRequest().json(ErrorBody::new(URL_REQUIRED));
    };
    let Ok(prompt) = optional_prompt(&body) else {
        return HttpResponse::BadRequest().json(ErrorBody::new(PROMPT_NOT_TEXT));
    };

    match analyze_site(analyzer.scraper(), analyzer.model(), url, prompt).await {
        Ok(site) => HttpResponse::Ok().json(site),
        Err(SiteAnalysisError::Unreachable(reason)) => {
            log::warn!("Could not fetch {}: {}", url, reason);
            HttpResponse::BadGateway().json(ErrorBody::new(format!(
                "Failed to fetch website: {}",
                reason
            )))
        }
        Err(e) => {
            log::error!("Error analyzing website {}: {:?}", url, e);
            HttpResponse::InternalServerError().json(ErrorBody::new(ANALYSIS_FAILED))
        }
    }
}
