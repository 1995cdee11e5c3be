//! Core agent turn implementation.

use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::llm::{ChatMessage, GroqClient, LlmClient, Role, ToolCall};
use crate::search::{DuckDuckGo, SearchProvider};
use crate::telephony::{TelephonyClient, TwilioCaller};
use crate::tools::{AskSpecialist, EmergencyCall, FindTherapists, ToolRegistry};

use super::prompt::build_system_prompt;
use super::trace::TurnStep;

/// Outcome of one agent turn: the finished conversation and its trace.
pub struct Turn {
    /// All messages of the turn, system prompt first
    pub messages: Vec<ChatMessage>,

    /// Ordered execution trace
    pub steps: Vec<TurnStep>,
}

/// The conversational agent.
pub struct Agent {
    config: Config,
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
}

impl Agent {
    /// Create an agent wired to the production providers.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let llm: Arc<dyn LlmClient> = Arc::new(GroqClient::new(config.groq_api_key.clone())?);
        let search: Arc<dyn SearchProvider> = Arc::new(DuckDuckGo::new());
        let telephony: Arc<dyn TelephonyClient> = Arc::new(TwilioCaller::new(config.twilio.clone()));

        Ok(Self::with_clients(config, llm, search, telephony))
    }

    /// Create an agent with injected providers (useful for testing).
    pub fn with_clients(
        config: Config,
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn SearchProvider>,
        telephony: Arc<dyn TelephonyClient>,
    ) -> Self {
        let tools = ToolRegistry::new(vec![
            Box::new(AskSpecialist::new(llm.clone(), config.model.clone())),
            Box::new(FindTherapists::new(search, config.search_max_results)),
            Box::new(EmergencyCall::new(telephony)),
        ]);

        Self { config, llm, tools }
    }

    /// Run one turn for a single user message and return the final
    /// conversation plus the execution trace.
    ///
    /// At most one tool fires per turn: once a tool result is in the
    /// conversation, later completions are requested without tool schemas,
    /// so the model can only produce the final text reply.
    pub async fn run_turn(&self, message: &str) -> anyhow::Result<Turn> {
        let system_prompt = build_system_prompt(&self.tools);
        let mut messages = vec![
            ChatMessage {
                role: Role::System,
                content: Some(system_prompt),
                tool_calls: None,
                tool_call_id: None,
            },
            ChatMessage {
                role: Role::User,
                content: Some(message.to_string()),
                tool_calls: None,
                tool_call_id: None,
            },
        ];

        let tool_schemas = self.tools.get_tool_schemas();
        let mut steps = Vec::new();
        let mut tool_fired = false;

        for iteration in 0..self.config.max_iterations {
            tracing::debug!("agent iteration {}", iteration + 1);

            let tools = if tool_fired {
                None
            } else {
                Some(tool_schemas.as_slice())
            };

            let response = self
                .llm
                .chat_completion(&self.config.model, &messages, tools)
                .await?;

            // Tool calls are only honored while schemas are on offer; once a
            // tool has fired, the turn can only end in text.
            if !tool_fired {
                if let Some(tool_calls) = &response.tool_calls {
                    if let Some(tool_call) = tool_calls.first() {
                        if tool_calls.len() > 1 {
                            tracing::warn!(
                                count = tool_calls.len(),
                                "model requested multiple tools; executing only the first"
                            );
                        }

                        messages.push(ChatMessage {
                            role: Role::Assistant,
                            content: response.content.clone(),
                            tool_calls: Some(vec![tool_call.clone()]),
                            tool_call_id: None,
                        });

                        let result = self.execute_tool_call(tool_call).await?;
                        steps.push(TurnStep::tool_result(&tool_call.function.name));

                        messages.push(ChatMessage {
                            role: Role::Tool,
                            content: Some(result),
                            tool_calls: None,
                            tool_call_id: Some(tool_call.id.clone()),
                        });

                        tool_fired = true;
                        continue;
                    }
                }
            }

            // No tool calls - this is the final response
            if let Some(content) = response.content {
                if !content.is_empty() {
                    steps.push(TurnStep::agent_message(&content));
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: Some(content),
                        tool_calls: None,
                        tool_call_id: None,
                    });
                    return Ok(Turn { messages, steps });
                }
            }

            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without a final reply",
            self.config.max_iterations
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: Value =
            serde_json::from_str(&tool_call.function.arguments).unwrap_or(Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}
