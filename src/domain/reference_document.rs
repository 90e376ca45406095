use std::{fmt, path::Path, sync::Arc};

const BUNDLED_RESUME: &str = include_str!("../../reference/resume.txt");

/// The document every page is scored against. Read-only once loaded and
/// cheap to clone into each analysis.
#[derive(Clone, PartialEq)]
pub struct ReferenceDocument(Arc<str>);

impl ReferenceDocument {
    pub fn new(text: impl Into<String>) -> Self {
        ReferenceDocument(Arc::from(text.into()))
    }

    pub fn bundled() -> Self {
        Self::new(BUNDLED_RESUME)
    }

    pub fn from_file(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ReferenceDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ReferenceDocument({} chars)", self.0.chars().count())
    }
}
