use std::sync::Mutex;

use crate::application::ports::{LlmClient, LlmClientError};

/// Scripted client: answers every call with the same reply and records prompts.
pub struct MockLlmClient {
    reply: Option<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl MockLlmClient {
    pub fn with_response(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `ApiRequestFailed`.
    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// `(system_prompt, user_prompt)` pairs in call order.
    pub fn recorded_prompts(&self) -> Vec<(String, String)> {
        self.prompts
            .lock()
            .map(|prompts| prompts.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push((system_prompt.to_string(), user_prompt.to_string()));
        }

        self.reply
            .clone()
            .ok_or_else(|| LlmClientError::ApiRequestFailed("scripted failure".to_string()))
    }
}
