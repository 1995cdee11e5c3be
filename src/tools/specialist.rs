//! Therapeutic response tool: forwards the user's query to the LLM.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::llm::{ChatMessage, LlmClient, Role};

use super::Tool;

/// System prompt selecting the specialist persona for the completion.
const SPECIALIST_PROMPT: &str = "You are a compassionate mental health specialist. \
Offer empathetic, evidence-based guidance in a warm, conversational tone. \
Keep replies clear and supportive; do not diagnose or prescribe.";

/// Generate a therapeutic response for a general user query.
pub struct AskSpecialist {
    llm: Arc<dyn LlmClient>,
    model: String,
}

impl AskSpecialist {
    pub fn new(llm: Arc<dyn LlmClient>, model: String) -> Self {
        Self { llm, model }
    }
}

#[async_trait]
impl Tool for AskSpecialist {
    fn name(&self) -> &str {
        "ask_mental_health_specialist"
    }

    fn description(&self) -> &str {
        "Generate a therapeutic response for the user's message. Use this for all general queries, mental health questions, and emotional concerns, to offer empathetic, evidence-based guidance in a conversational tone."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The user's message, passed through verbatim"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = args["query"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        let messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(SPECIALIST_PROMPT.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(query.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        // Upstream failures propagate; the turn fails rather than fabricating a reply.
        let response = self.llm.chat_completion(&self.model, &messages, None).await?;

        response
            .content
            .filter(|c| !c.is_empty())
            .ok_or_else(|| anyhow::anyhow!("Specialist model returned no content"))
    }
}
