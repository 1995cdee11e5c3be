//! LLM client: conversation data model and the Groq implementation.
//!
//! The wire format is the OpenAI chat-completions dialect (messages with
//! roles, `tools` schemas on the request, `tool_calls` on the response),
//! which Groq serves unchanged.

mod groq;

pub use groq::GroqClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error calling LLM service: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error: {0}")]
    Api(String),

    #[error("Malformed LLM response: {0}")]
    Malformed(String),
}

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// A function invocation requested by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Registered tool name
    pub name: String,

    /// JSON-encoded arguments, exactly as sent on the wire
    pub arguments: String,
}

/// A single tool call attached to an assistant message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back on the result message
    pub id: String,

    #[serde(rename = "type", default = "function_call_type")]
    pub call_type: String,

    pub function: FunctionCall,
}

fn function_call_type() -> String {
    "function".to_string()
}

/// One message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

/// Token accounting reported by the provider.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// Decoded chat-completion response.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Text content, if the model produced any
    pub content: Option<String>,

    /// Tool calls requested by the model, if any
    pub tool_calls: Option<Vec<ToolCall>>,

    /// Usage accounting, if the provider reported it
    pub usage: Option<TokenUsage>,
}

/// Chat-completion service abstraction.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Run one completion over `messages`, optionally offering `tools`
    /// (OpenAI function-calling schemas) to the model.
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[serde_json::Value]>,
    ) -> Result<ChatResponse, LlmError>;
}
