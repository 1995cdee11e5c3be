//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to ask the agent a question.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// The user's message
    pub message: String,
}

/// Response for one answered message.
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    /// Final natural-language reply
    pub response: String,

    /// Name of the tool that fired, or the literal "None"
    pub tool_called: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
