use serde::Serialize;
use serde_json::Value;

use crate::domain::{PageMetadata, PromptMessage};

use super::{ChatModel, ModelError, ScrapeError, Scraper};

const SYSTEM_PROMPT: &str = "You are a website analyst. Read the webpage content and answer the \
user's question about the website. Always respond with a single JSON object. Include every \
relevant link you find as absolute or relative URLs.";

const DEFAULT_QUESTION: &str = "Summarize what this website is about, what the organisation \
offers, and list the most important pages (careers, about, products, contact) with their links.";

#[derive(Debug, thiserror::Error)]
pub enum SiteAnalysisError {
    #[error("{0}")]
    Unreachable(String),
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Serialize)]
pub struct SiteAnalysis {
    pub analysis: Value,
    pub metadata: PageMetadata,
}

/// Answers a free-form question about a single website.
///
/// This is the analysis that `extract_urls` later mines for links.
pub async fn analyze_site(
    scraper: &dyn Scraper,
    model: &dyn ChatModel,
    url: &str,
    question: Option<&str>,
) -> Result<SiteAnalysis, SiteAnalysisError> {
    let scraped = scraper.fetch(url).await?;
    if let Some(error) = scraped.error {
        return Err(SiteAnalysisError::Unreachable(error));
    }

    let question = question
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_QUESTION);
    let messages = vec![
        PromptMessage::system(SYSTEM_PROMPT),
        PromptMessage::user(format!(
            "Website: {}\n\nQuestion: {}\n\n<WebpageContent>\n{}\n</WebpageContent>",
            url, question, scraped.content
        )),
    ];

    let answer = model.complete(&messages).await?;

    // Not every model honours the JSON instruction
    let analysis = serde_json::from_str(&answer).unwrap_or(Value::String(answer));

    Ok(SiteAnalysis {
        analysis,
        metadata: scraped.metadata,
    })
}
