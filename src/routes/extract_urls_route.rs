use actix_web::{post, web, Error, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::extract_urls as extract_urls_from_analysis;

use super::ErrorBody;

const BASE_URL_REQUIRED: &str = "A valid baseUrl is required";
const INVALID_BODY: &str = "Invalid JSON body";

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtractUrlsRequest {
    #[serde(default)]
    analysis: Value,
    #[serde(default)]
    base_url: Option<Value>,
}

#[derive(Serialize)]
struct ExtractUrlsResponse {
    urls: Vec<String>,
}

fn valid_base_url(base_url: Option<&Value>) -> Option<&str> {
    let base_url = base_url?.as_str()?;
    match Url::parse(base_url) {
        Ok(parsed_url) => match parsed_url.scheme() {
            "http" | "https" => Some(base_url),
            _ => None,
        },
        Err(_) => None,
    }
}

#[post("/extract-urls")]
pub async fn extract_urls(body: Result<web::Bytes, Error>) -> HttpResponse {
    let body = match body {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Could not read extract-urls body: {:?}", e);
            return HttpResponse::BadRequest().json(ErrorBody::new(INVALID_BODY));
        }
    };

    let request: ExtractUrlsRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected extract-urls body: {:?}", e);
            return HttpResponse::BadRequest().json(ErrorBody::new(INVALID_BODY));
        }
    };

    let Some(base_url) = valid_base_url(request.base_url.as_ref()) else {
        return HttpResponse::BadRequest().json(ErrorBody::new(BASE_URL_REQUIRED));
    };

    let urls = extract_urls_from_analysis(&request.analysis, base_url);
    log::info!("Extracted {} urls relative to {}", urls.len(), base_url);

    HttpResponse::Ok().json(ExtractUrlsResponse { urls })
}
