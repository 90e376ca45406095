use actix_web::{post, web, Error, HttpResponse};
use serde_json::Value;

use crate::{
    configuration::AnalysisSettings,
    domain::BatchRequest,
    services::{analyze_batch, Analyzer},
};

use super::ErrorBody;

const URLS_REQUIRED: &str = "URLs array is required";
const ANALYSIS_FAILED: &str = "Failed to analyze resume match";

/// Scores every URL in the batch against the reference document.
///
/// Per-URL failures come back as zero-scored results inside a 200. Only a
/// bad request shape (400) or an unreadable body (500) fail the request.
#[post("/analyze-resume")]
pub async fn analyze_resume(
    body: Result<web::Bytes, Error>,
    analyzer: web::Data<Analyzer>,
    settings: web::Data<AnalysisSettings>,
) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::error!("Could not read analyze-resume body: {:?}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::new(ANALYSIS_FAILED));
        }
    };

    let body: Value = match serde_json::from_slice(&body) {
        Ok(Value::Null) => {
            log::error!("Error in analyze-resume route: body is null");
            return HttpResponse::InternalServerError().json(ErrorBody::new(ANALYSIS_FAILED));
        }
        Ok(body) => body,
        Err(e) => {
            log::error!("Error in analyze-resume route: {:?}", e);
            return HttpResponse::InternalServerError().json(ErrorBody::new(ANALYSIS_FAILED));
        }
    };

    let Some(request) = BatchRequest::from_json(&body) else {
        return HttpResponse::BadRequest().json(ErrorBody::new(URLS_REQUIRED));
    };

    let result = analyze_batch(&analyzer, request, settings.concurrency_limit()).await;

    HttpResponse::Ok().json(result)
}
