use crate::core::error::BankbotError;
use crate::providers::base_client::HttpClient;
use crate::providers::{ChatProvider, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
pub const DEFAULT_MODEL: &str = "mistral-large-latest";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionMessage<'a>>,
}

#[derive(Serialize)]
struct ChatCompletionMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Client for the Mistral chat-completions endpoint.
pub struct MistralProvider {
    client: HttpClient,
    model: String,
}

impl MistralProvider {
    pub fn new(api_key: String) -> Result<Self, BankbotError> {
        Self::with_endpoint(
            DEFAULT_BASE_URL.to_string(),
            api_key,
            DEFAULT_MODEL.to_string(),
        )
    }

    pub fn with_endpoint(
        base_url: String,
        api_key: String,
        model: String,
    ) -> Result<Self, BankbotError> {
        Ok(Self {
            client: HttpClient::new(base_url, api_key)?,
            model,
        })
    }
}

#[async_trait]
impl ChatProvider for MistralProvider {
    async fn complete(&self, messages: &[Message]) -> Result<String, BankbotError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ChatCompletionMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        log::debug!(
            "requesting completion from {} ({} messages)",
            self.model,
            messages.len()
        );

        let response = self.client.post_json("chat/completions", &payload).await?;

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            BankbotError::Serialization(format!("malformed completion response: {}", e))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| BankbotError::Api("no choices in completion response".to_string()))
    }

    fn model(&self) -> &str {
        &self.model
    }
}
