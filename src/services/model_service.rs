use async_openai::{config::OpenAIConfig, Client};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::{config::Config, errors::GenerationError};

/// Single-prompt text completion. No retries, no streaming.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError>;
}

pub struct OpenAiModelGateway {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiModelGateway {
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(config.openai_api_key.expose_secret())
            .with_api_base(&config.openai_api_base);

        Self {
            client: Client::with_config(openai_config),
            model: config.openai_model.clone(),
        }
    }

    fn chat_request(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ]
        })
    }
}

#[async_trait]
impl ModelGateway for OpenAiModelGateway {
    async fn complete(&self, prompt: &str) -> Result<String, GenerationError> {
        let response: Value = self
            .client
            .chat()
            .create_byot(self.chat_request(prompt))
            .await
            .map_err(|e| GenerationError::ModelUnavailable(e.to_string()))?;

        completion_text(&response)
    }
}

fn completion_text(response: &Value) -> Result<String, GenerationError> {
    response
        .pointer("/choices/0/message/content")
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| {
            GenerationError::ModelUnavailable("completion contained no text content".to_string())
        })
}
