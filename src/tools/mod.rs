//! Tool implementations for the agent.
//!
//! Each tool is a named capability with a description guiding when the model
//! should pick it, a JSON schema for its arguments, and an async `execute`.
//! The registry renders OpenAI function-calling schemas and dispatches by name.

mod emergency;
mod specialist;
mod therapists;

pub use emergency::EmergencyCall;
pub use specialist::AskSpecialist;
pub use therapists::FindTherapists;

use async_trait::async_trait;
use serde_json::{json, Value};

/// A capability exposed to the agent.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the model uses to invoke the tool.
    fn name(&self) -> &str;

    /// Description guiding the model on when to use the tool.
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Registry of the tools available to the agent.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new(tools: Vec<Box<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// List registered tools (for prompt construction).
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Tool schemas in OpenAI function-calling format.
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "type": "function",
                    "function": {
                        "name": t.name(),
                        "description": t.description(),
                        "parameters": t.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tracing::debug!(tool = name, "executing tool");
        tool.execute(args).await
    }
}
