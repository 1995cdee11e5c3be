//! Execution trace of a single agent turn, and response extraction.

use serde::Serialize;

use crate::llm::ChatMessage;

/// Value reported for `tool_called` when no tool fired.
pub const NO_TOOL: &str = "None";

/// A single entry in the turn's execution trace.
#[derive(Debug, Clone, Serialize)]
pub struct TurnStep {
    /// Timestamp (ISO 8601)
    pub timestamp: String,

    #[serde(flatten)]
    pub kind: StepKind,
}

/// Kinds of trace entries.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepKind {
    /// A tool ran and produced a result
    ToolResult { name: String },

    /// The agent produced a message
    AgentMessage { content: String },
}

impl TurnStep {
    pub fn tool_result(name: &str) -> Self {
        Self {
            timestamp: now_string(),
            kind: StepKind::ToolResult {
                name: name.to_string(),
            },
        }
    }

    pub fn agent_message(content: &str) -> Self {
        Self {
            timestamp: now_string(),
            kind: StepKind::AgentMessage {
                content: content.to_string(),
            },
        }
    }
}

fn now_string() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Reduce a turn's trace to the tool that fired and the final reply.
///
/// Last-write-wins over the whole trace: a later tool result or non-empty
/// agent message overwrites an earlier recorded value of the same kind.
/// Returns the literal `"None"` when no tool fired, never an absent value.
pub fn extract_response(steps: &[TurnStep]) -> (String, Option<String>) {
    let mut tool_called = NO_TOOL.to_string();
    let mut final_reply = None;

    for step in steps {
        match &step.kind {
            StepKind::ToolResult { name } => tool_called = name.clone(),
            StepKind::AgentMessage { content } => {
                if !content.is_empty() {
                    final_reply = Some(content.clone());
                }
            }
        }
    }

    (tool_called, final_reply)
}

/// Name of the first tool call found in a finished conversation's messages.
///
/// Kept for comparison with [`extract_response`]: the two strategies disagree
/// when more than one tool fires in a run (first-match vs last-write-wins).
/// The HTTP handler uses the trace scan.
pub fn first_tool_call_in_messages(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .find_map(|m| {
            m.tool_calls
                .as_ref()
                .and_then(|calls| calls.first())
                .map(|c| c.function.name.clone())
        })
        .unwrap_or_else(|| NO_TOOL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{ChatMessage, FunctionCall, Role, ToolCall};

    fn tool_call_message(name: &str) -> ChatMessage {
        ChatMessage {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: format!("call_{}", name),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments: "{}".to_string(),
                },
            }]),
            tool_call_id: None,
        }
    }

    #[test]
    fn no_tool_steps_yield_none_literal() {
        let steps = vec![TurnStep::agent_message("hello")];
        let (tool, reply) = extract_response(&steps);
        assert_eq!(tool, "None");
        assert_eq!(reply.as_deref(), Some("hello"));
    }

    #[test]
    fn later_tool_overwrites_earlier() {
        let steps = vec![
            TurnStep::tool_result("ask_mental_health_specialist"),
            TurnStep::agent_message("first draft"),
            TurnStep::tool_result("find_nearby_therapists_by_location"),
            TurnStep::agent_message("final answer"),
        ];
        let (tool, reply) = extract_response(&steps);
        assert_eq!(tool, "find_nearby_therapists_by_location");
        assert_eq!(reply.as_deref(), Some("final answer"));
    }

    #[test]
    fn empty_messages_do_not_clear_reply() {
        let steps = vec![
            TurnStep::agent_message("kept"),
            TurnStep::agent_message(""),
        ];
        let (_, reply) = extract_response(&steps);
        assert_eq!(reply.as_deref(), Some("kept"));
    }

    #[test]
    fn message_scan_returns_first_match() {
        let messages = vec![
            tool_call_message("ask_mental_health_specialist"),
            tool_call_message("emergency_call_tool"),
        ];
        assert_eq!(
            first_tool_call_in_messages(&messages),
            "ask_mental_health_specialist"
        );
        assert_eq!(first_tool_call_in_messages(&[]), "None");
    }

    // The two extraction strategies are not equivalent: on a run where two
    // tools fired, the trace scan reports the last and the message scan the
    // first. Pinned here so the disagreement stays visible.
    #[test]
    fn extraction_policies_diverge_on_multi_tool_runs() {
        let steps = vec![
            TurnStep::tool_result("ask_mental_health_specialist"),
            TurnStep::tool_result("emergency_call_tool"),
            TurnStep::agent_message("stay with me"),
        ];
        let messages = vec![
            tool_call_message("ask_mental_health_specialist"),
            tool_call_message("emergency_call_tool"),
        ];

        let (from_trace, _) = extract_response(&steps);
        let from_messages = first_tool_call_in_messages(&messages);

        assert_eq!(from_trace, "emergency_call_tool");
        assert_eq!(from_messages, "ask_mental_health_specialist");
        assert_ne!(from_trace, from_messages);
    }
}
