//! # SafeSpace
//!
//! A mental-health support agent behind a small HTTP API.
//!
//! This library provides:
//! - An HTTP endpoint that answers one user message per request
//! - An agent turn that lets the model invoke at most one capability
//!   (therapeutic reply, therapist search, or emergency call) before answering
//! - Clients for the Groq chat-completions API, DuckDuckGo search, and
//!   Twilio outbound calls
//!
//! ## Architecture
//!
//! Each request runs one agent turn:
//! 1. Build context with the system prompt and the user message
//! 2. Call the LLM with the three tool schemas
//! 3. Execute the requested tool (if any) and feed the result back
//! 4. Extract the final reply and the tool name from the turn's trace
//!
//! ## Example
//!
//! ```rust,ignore
//! use safespace::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::new(config)?;
//! let turn = agent.run_turn("I feel anxious about work").await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod search;
pub mod telephony;
pub mod tools;

pub use config::Config;
