//! Agent module - the core conversational agent logic.
//!
//! Each turn follows the same shape:
//! 1. Build context with system prompt and the user message
//! 2. Call LLM with the available tools
//! 3. If the model requests a tool call, execute it and feed the result back
//! 4. The model's text reply ends the turn; the trace records what happened

mod prompt;
mod trace;
mod turn;

pub use prompt::build_system_prompt;
pub use trace::{extract_response, first_tool_call_in_messages, StepKind, TurnStep, NO_TOOL};
pub use turn::{Agent, Turn};
