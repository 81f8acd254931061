//! Anthropic `/v1/messages` client.
//!
//! Request bodies borrow the caller's prompt. Replies are reduced to the
//! text and tool-use blocks the recommendation flow reads.

use super::config::LlmTimeouts;
use super::types::{ChatResponse, ContentBlock, LlmError, Message, Tool};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
}

impl AnthropicClient {
    pub fn new(api_key: String, timeouts: LlmTimeouts) -> Result<Self, LlmError> {
        Ok(Self { http: super::http_client(timeouts)?, api_key })
    }

    pub async fn chat(
        &self,
        model: &str,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
    ) -> Result<ChatResponse, LlmError> {
        let request = self
            .http
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&MessagesRequest { model, max_tokens, system, messages, tools });
        parse_response(&super::send_for_body(request).await?)
    }
}

#[derive(serde::Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [Tool]>,
}

#[derive(serde::Deserialize)]
struct MessagesReply {
    content: Vec<ContentBlock>,
    model: String,
    #[serde(default)]
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(serde::Deserialize)]
struct Usage {
    input_tokens: u64,
    output_tokens: u64,
}

impl From<MessagesReply> for ChatResponse {
    fn from(reply: MessagesReply) -> Self {
        let MessagesReply { content, model, stop_reason, usage } = reply;
        Self {
            content: content.into_iter().filter(|block| !matches!(block, ContentBlock::Unknown)).collect(),
            model,
            stop_reason: stop_reason.unwrap_or_else(|| "end_turn".into()),
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
        }
    }
}

fn parse_response(json: &str) -> Result<ChatResponse, LlmError> {
    serde_json::from_str::<MessagesReply>(json)
        .map(ChatResponse::from)
        .map_err(|e| LlmError::ApiParse(e.to_string()))
}

#[cfg(test)]
#[path = "anthropic_test.rs"]
mod tests;
