use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const MAX_RELEVANCE_SCORE: u8 = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub urls: Vec<String>,
}

impl BatchRequest {
    /// Reads `urls` out of an already parsed request body.
    ///
    /// Returns `None` when `urls` is missing, is not an array, or holds
    /// anything other than strings. Duplicates are kept as given.
    pub fn from_json(body: &Value) -> Option<Self> {
        let urls = body
            .get("urls")?
            .as_array()?
            .iter()
            .map(|u| u.as_str().map(|s| s.to_string()))
            .collect::<Option<Vec<String>>>()?;

        Some(BatchRequest { urls })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn system(content: impl Into<String>) -> Self {
        PromptMessage {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        PromptMessage {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    pub url: String,
    pub relevance_score: u8,
    pub explanation: String,
}

impl AnalysisOutcome {
    pub fn scored(url: &str, relevance_score: u8, explanation: String) -> Self {
        AnalysisOutcome {
            url: url.to_string(),
            relevance_score: relevance_score.min(MAX_RELEVANCE_SCORE),
            explanation,
        }
    }

    /// Outcome for a URL whose analysis failed at some stage.
    pub fn degraded(url: &str, explanation: String) -> Self {
        AnalysisOutcome {
            url: url.to_string(),
            relevance_score: 0,
            explanation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<AnalysisOutcome>,
}
