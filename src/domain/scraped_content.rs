use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Headings {
    pub h1: Option<String>,
    pub h2: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub headings: Headings,
}

/// What a scraper hands back for one URL. When `error` is set the page
/// could not be read and `content` must not be used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapedContent {
    pub content: String,
    pub error: Option<String>,
    pub metadata: PageMetadata,
}

impl ScrapedContent {
    pub fn page(content: impl Into<String>, metadata: PageMetadata) -> Self {
        ScrapedContent {
            content: content.into(),
            error: None,
            metadata,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        ScrapedContent {
            content: String::new(),
            error: Some(error.into()),
            metadata: PageMetadata::default(),
        }
    }
}
