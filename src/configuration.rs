use std::path::PathBuf;

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

use crate::domain::ReferenceDocument;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub model: ModelSettings,
    pub scraper: ScraperSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    /// Largest request body any route will read.
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_body_bytes: usize,
}

#[derive(Deserialize, Clone)]
pub struct ModelSettings {
    pub api_key: String,
    pub base_url: String,
    pub name: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_tokens: u32,
}

// Keeps the api key out of logs
impl std::fmt::Debug for ModelSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelSettings")
            .field("base_url", &self.base_url)
            .field("name", &self.name)
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct ScraperSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub max_content_chars: usize,
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AnalysisSettings {
    /// Upper bound on analyses in flight per batch. Unset (or 0) fans out
    /// one analysis per URL at once.
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub max_concurrency: Option<usize>,
    #[serde(default)]
    pub reference_document_path: Option<PathBuf>,
}

impl AnalysisSettings {
    pub fn concurrency_limit(&self) -> Option<usize> {
        self.max_concurrency.filter(|n| *n > 0)
    }

    pub fn reference_document(&self) -> std::io::Result<ReferenceDocument> {
        match &self.reference_document_path {
            Some(path) => ReferenceDocument::from_file(path),
            None => Ok(ReferenceDocument::bundled()),
        }
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other
            )),
        }
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path =
        std::env::current_dir().map_err(|e| config::ConfigError::Foreign(Box::new(e)))?;
    let configuration_directory = base_path.join("configuration");

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(config::File::from(
            configuration_directory.join(environment_filename),
        ))
        // E.g. `APP_MODEL__API_KEY=...` sets `Settings.model.api_key`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
