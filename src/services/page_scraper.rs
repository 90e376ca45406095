use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::{
    configuration::ScraperSettings,
    domain::{Headings, PageMetadata, ScrapedContent},
};

const HIDDEN_TAGS: [&str; 5] = ["script", "style", "noscript", "svg", "template"];

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("failed to read page body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("invalid selector `{selector}`: {reason}")]
    Selector {
        selector: &'static str,
        reason: String,
    },
}

/// Fetches a page and turns it into plain text.
///
/// Pages that cannot be reached are reported through
/// `ScrapedContent::error`; `Err` is kept for failures after the page
/// was already received.
#[async_trait]
pub trait Scraper: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ScrapedContent, ScrapeError>;
}

pub struct HttpScraper {
    client: Client,
    max_content_chars: usize,
}

impl HttpScraper {
    pub fn new(settings: &ScraperSettings) -> Result<Self, reqwest::Error> {
        let user_agent = match &settings.user_agent {
            Some(ua) => ua.clone(),
            None => fake_user_agent::get_rua().to_string(),
        };

        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(HttpScraper {
            client,
            max_content_chars: settings.max_content_chars,
        })
    }
}

#[async_trait]
impl Scraper for HttpScraper {
    async fn fetch(&self, url: &str) -> Result<ScrapedContent, ScrapeError> {
        let parsed_url = match Url::parse(url) {
            Ok(parsed_url) => match parsed_url.scheme() {
                "http" | "https" => parsed_url,
                scheme => {
                    return Ok(ScrapedContent::failed(format!(
                        "Unsupported URL scheme: {}",
                        scheme
                    )))
                }
            },
            Err(e) => return Ok(ScrapedContent::failed(format!("Invalid URL: {}", e))),
        };

        let response = match self.client.get(parsed_url).send().await {
            Ok(res) => res,
            Err(e) => {
                log::warn!("No response from {}, error: {:?}", url, e);
                let message = match e.is_timeout() {
                    true => "Request timed out".to_string(),
                    false => format!("Failed to fetch page: {}", e),
                };
                return Ok(ScrapedContent::failed(message));
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(ScrapedContent::failed(format!(
                "Failed to fetch page: HTTP {}",
                status.as_u16()
            )));
        }

        let html = response.text().await.map_err(ScrapeError::Body)?;
        let page = extract_page(&html, self.max_content_chars)?;

        log::info!("Scraped {} chars from {}", page.content.chars().count(), url);

        Ok(page)
    }
}

fn selector(css: &'static str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css,
        reason: e.to_string(),
    })
}

fn first_text(document: &Html, css: &'static str) -> Result<Option<String>, ScrapeError> {
    let text = document
        .select(&selector(css)?)
        .next()
        .map(|tag| tag.text().collect::<Vec<_>>().join(" "))
        .map(|t| t.split_whitespace().join(" "))
        .filter(|t| !t.is_empty());

    Ok(text)
}

fn visible_text(root: ElementRef) -> String {
    root.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|e| HIDDEN_TAGS.contains(&e.name()))
            });
            match hidden {
                true => None,
                false => Some(&**text),
            }
        })
        .flat_map(str::split_whitespace)
        .join(" ")
}

/// Pulls metadata and visible text out of an HTML document. Text is
/// whitespace-collapsed and cut to `max_chars` characters.
pub fn extract_page(html: &str, max_chars: usize) -> Result<ScrapedContent, ScrapeError> {
    let document = Html::parse_document(html);

    let description = document
        .select(&selector(r#"meta[name="description"]"#)?)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());

    let metadata = PageMetadata {
        title: first_text(&document, "title")?,
        description,
        headings: Headings {
            h1: first_text(&document, "h1")?,
            h2: first_text(&document, "h2")?,
        },
    };

    let body = document
        .select(&selector("body")?)
        .next()
        .unwrap_or_else(|| document.root_element());
    let content: String = visible_text(body).chars().take(max_chars).collect();

    if content.is_empty() {
        return Ok(ScrapedContent {
            metadata,
            ..ScrapedContent::failed("No readable content found")
        });
    }

    Ok(ScrapedContent::page(content, metadata))
}
