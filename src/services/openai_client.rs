use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;

use crate::{
    configuration::ModelSettings,
    domain::{PromptMessage, Role},
};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model request failed: {0}")]
    Api(#[from] OpenAIError),
    #[error("no choices in model response")]
    NoChoices,
    #[error("model response has no content")]
    EmptyContent,
}

/// A chat model that answers an ordered list of prompt messages with text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ModelError>;
}

/// Talks to any OpenAI-compatible chat completions endpoint (Gemini by
/// default, see `configuration/base.yaml`).
pub struct OpenaiClient {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenaiClient {
    pub fn new(settings: &ModelSettings) -> Self {
        let config = OpenAIConfig::new()
            .with_api_key(settings.api_key.clone())
            .with_api_base(settings.base_url.clone());

        OpenaiClient {
            client: Client::with_config(config),
            model: settings.name.clone(),
            max_tokens: settings.max_tokens,
        }
    }
}

fn to_request_message(message: &PromptMessage) -> Result<ChatCompletionRequestMessage, OpenAIError> {
    let request_message = match message.role {
        Role::System => ChatCompletionRequestSystemMessageArgs::default()
            .content(message.content.as_str())
            .build()?
            .into(),
        Role::User => ChatCompletionRequestUserMessageArgs::default()
            .content(message.content.as_str())
            .build()?
            .into(),
    };

    Ok(request_message)
}

#[async_trait]
impl ChatModel for OpenaiClient {
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, ModelError> {
        let messages = messages
            .iter()
            .map(to_request_message)
            .collect::<Result<Vec<_>, _>>()?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .messages(messages)
            .response_format(ResponseFormat::JsonObject)
            .max_tokens(self.max_tokens)
            .build()?;

        let response = self.client.chat().create(request).await?;
        log::debug!("Response: {:?}", response);

        let content = response
            .choices
            .first()
            .ok_or(ModelError::NoChoices)?
            .message
            .content
            .clone()
            .ok_or(ModelError::EmptyContent)?;

        Ok(content.trim().to_string())
    }
}
