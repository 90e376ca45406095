use std::sync::Arc;

use serde_json::Value;

use crate::domain::{AnalysisOutcome, PromptMessage, ReferenceDocument, MAX_RELEVANCE_SCORE};

use super::{ChatModel, ModelError, ScrapeError, Scraper};

const SYSTEM_PROMPT: &str = "You are a job matching assistant. Compare the webpage content with \
the candidate's resume and decide how well the candidate fits a job at this company. \
Respond with a JSON object containing a relevance score from 0 to 100 and an explanation. \
Focus on matching skills, experience and job requirements.";

#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    #[error("model answer is not valid JSON: {0}")]
    NotJson(#[source] serde_json::Error),
    #[error("model answer is not a JSON object")]
    NotAnObject,
    #[error("model answer is missing `{0}`")]
    MissingField(&'static str),
    #[error("model answer field `{field}` must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Answer(#[from] AnswerError),
}

/// The validated part of a model answer.
#[derive(Debug, PartialEq)]
pub struct ModelAnswer {
    pub relevance_score: u8,
    pub explanation: String,
}

/// Scores one page at a time against the reference document.
#[derive(Clone)]
pub struct Analyzer {
    scraper: Arc<dyn Scraper>,
    model: Arc<dyn ChatModel>,
    reference: ReferenceDocument,
}

impl Analyzer {
    pub fn new(
        scraper: Arc<dyn Scraper>,
        model: Arc<dyn ChatModel>,
        reference: ReferenceDocument,
    ) -> Self {
        Analyzer {
            scraper,
            model,
            reference,
        }
    }

    pub fn scraper(&self) -> &dyn Scraper {
        self.scraper.as_ref()
    }

    pub fn model(&self) -> &dyn ChatModel {
        self.model.as_ref()
    }

    /// Always resolves to an outcome for `url`. Any failure along the way
    /// becomes a zero score with the reason in `explanation`.
    pub async fn analyze_url(&self, url: &str) -> AnalysisOutcome {
        match self.try_analyze_url(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Error analyzing URL {}: {:?}", url, e);
                AnalysisOutcome::degraded(url, format!("Error analyzing URL: {}", e))
            }
        }
    }

    async fn try_analyze_url(&self, url: &str) -> Result<AnalysisOutcome, AnalysisError> {
        let scraped = self.scraper.fetch(url).await?;

        if let Some(error) = scraped.error {
            return Ok(AnalysisOutcome::degraded(url, format!("Error: {}", error)));
        }

        let messages = build_messages(&self.reference, &scraped.content);
        let raw_answer = self.model.complete(&messages).await?;
        let answer = parse_answer(&raw_answer)?;

        Ok(AnalysisOutcome::scored(
            url,
            answer.relevance_score,
            answer.explanation,
        ))
    }
}

pub fn build_messages(reference: &ReferenceDocument, page_content: &str) -> Vec<PromptMessage> {
    let user_prompt = format!(
        r#"Compare my resume with the information about this company and rate how relevant it is.
Decide how good of a fit I would be for a job at this company.

<Resume>
{}
</Resume>

<WebpageContent>
{}
</WebpageContent>

Return a JSON object with:
1. relevanceScore (0-100) - how good of a fit I would be for a job at this company
2. explanation (2-3 sentences) - why the score is what it is"#,
        reference.as_str(),
        page_content
    );

    vec![
        PromptMessage::system(SYSTEM_PROMPT),
        PromptMessage::user(user_prompt),
    ]
}

/// Validates the raw model output. `relevanceScore` may be any JSON number;
/// it is rounded and clamped into 0..=100.
pub fn parse_answer(raw: &str) -> Result<ModelAnswer, AnswerError> {
    let value: Value = serde_json::from_str(raw).map_err(AnswerError::NotJson)?;
    let object = value.as_object().ok_or(AnswerError::NotAnObject)?;

    let score = object
        .get("relevanceScore")
        .ok_or(AnswerError::MissingField("relevanceScore"))?
        .as_f64()
        .ok_or(AnswerError::WrongType {
            field: "relevanceScore",
            expected: "number",
        })?;

    let explanation = object
        .get("explanation")
        .ok_or(AnswerError::MissingField("explanation"))?
        .as_str()
        .ok_or(AnswerError::WrongType {
            field: "explanation",
            expected: "string",
        })?;

    Ok(ModelAnswer {
        relevance_score: score.round().clamp(0.0, MAX_RELEVANCE_SCORE as f64) as u8,
        explanation: explanation.to_string(),
    })
}
