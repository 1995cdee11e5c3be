//! Groq chat-completions client.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ChatMessage, ChatResponse, LlmClient, LlmError, TokenUsage, ToolCall};

const GROQ_BASE_URL: &str = "https://api.groq.com";

/// Fixed sampling temperature for every completion.
const TEMPERATURE: f32 = 0.2;

/// Client for Groq's OpenAI-compatible chat-completions endpoint.
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    /// Create a client against the production Groq endpoint.
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_base_url(api_key, GROQ_BASE_URL.to_string())
    }

    /// Create a client against a custom host (used by tests).
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> Result<ChatResponse, LlmError> {
        let mut payload = json!({
            "model": model,
            "messages": messages,
            "temperature": TEMPERATURE,
        });

        if let Some(tools) = tools {
            if !tools.is_empty() {
                payload["tools"] = json!(tools);
            }
        }

        let url = format!("{}/openai/v1/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("{}: {}", status, body)));
        }

        let data: Value = response.json().await?;

        if let Some(error) = data.get("error") {
            return Err(LlmError::Api(error.to_string()));
        }

        let message = data
            .pointer("/choices/0/message")
            .ok_or_else(|| LlmError::Malformed("missing choices[0].message".to_string()))?;

        let content = message
            .get("content")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        let tool_calls = match message.get("tool_calls") {
            Some(v) if !v.is_null() => Some(
                serde_json::from_value::<Vec<ToolCall>>(v.clone())
                    .map_err(|e| LlmError::Malformed(format!("tool_calls: {}", e)))?,
            ),
            _ => None,
        };

        let usage = data
            .get("usage")
            .and_then(|u| serde_json::from_value::<TokenUsage>(u.clone()).ok());

        Ok(ChatResponse {
            content,
            tool_calls,
            usage,
        })
    }
}
