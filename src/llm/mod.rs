//! Model access for the AI herbalist.
//!
//! The recommendation service only talks to [`LlmChat`]. [`LlmClient`] is
//! the production implementation, picking Anthropic or an OpenAI-compatible
//! endpoint from [`LlmConfig`].

pub mod anthropic;
pub mod config;
pub mod openai;
pub mod tools;
pub mod types;

use std::time::Duration;

use config::{LlmConfig, LlmProviderKind, LlmTimeouts};
pub use types::LlmChat;
use types::{ChatResponse, LlmError, Message, Tool};

/// Chat client for whichever provider the environment selects.
pub struct LlmClient {
    backend: Backend,
    model: String,
}

enum Backend {
    Anthropic(anthropic::AnthropicClient),
    OpenAi(openai::OpenAiClient),
}

impl LlmClient {
    /// # Errors
    ///
    /// Returns an error if the settings are incomplete or the HTTP client fails.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_config(LlmConfig::from_env()?)
    }

    /// # Errors
    ///
    /// Returns an error if the provider HTTP client fails to build.
    pub fn from_config(config: LlmConfig) -> Result<Self, LlmError> {
        let LlmConfig { provider, api_key, model, openai_base_url, timeouts } = config;
        let backend = match provider {
            LlmProviderKind::Anthropic => Backend::Anthropic(anthropic::AnthropicClient::new(api_key, timeouts)?),
            LlmProviderKind::OpenAi => {
                Backend::OpenAi(openai::OpenAiClient::new(api_key, openai_base_url, timeouts)?)
            }
        };
        Ok(Self { backend, model })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Short provider label for startup logs.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self.backend {
            Backend::Anthropic(_) => "anthropic",
            Backend::OpenAi(_) => "openai",
        }
    }
}

#[async_trait::async_trait]
impl LlmChat for LlmClient {
    async fn chat(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        let model = self.model.as_str();
        match &self.backend {
            Backend::Anthropic(c) => c.chat(model, max_tokens, system, messages, tools).await,
            Backend::OpenAi(c) => c.chat(model, max_tokens, system, messages, tools).await,
        }
    }
}

fn http_client(timeouts: LlmTimeouts) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LlmError::HttpClientBuild(e.to_string()))
}

/// Sends a provider request and returns the body of a 2xx reply.
async fn send_for_body(request: reqwest::RequestBuilder) -> Result<String, LlmError> {
    let response = request.send().await.map_err(|e| LlmError::ApiRequest(e.to_string()))?;
    let status = response.status();
    let body = response.text().await.map_err(|e| LlmError::ApiRequest(e.to_string()))?;
    if !status.is_success() {
        return Err(LlmError::ApiResponse { status: status.as_u16(), body });
    }
    Ok(body)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
