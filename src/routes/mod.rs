pub mod analyze_resume_route;
pub mod analyze_route;
pub mod extract_urls_route;
pub mod health_check_route;

use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody {
            error: error.into(),
        }
    }
}
