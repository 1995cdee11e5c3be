//! Configuration management for SafeSpace.
//!
//! Configuration can be set via environment variables:
//! - `GROQ_API_KEY` - Required. API key for the Groq chat-completions endpoint.
//! - `GROQ_MODEL` - Optional. Model identifier. Defaults to `openai/gpt-oss-120b`.
//! - `TWILIO_ACCOUNT_SID` - Required. Twilio account SID for emergency calls.
//! - `TWILIO_AUTH_TOKEN` - Required. Twilio auth token.
//! - `TWILIO_FROM_NUMBER` - Required. Caller number in E.164 format.
//! - `EMERGENCY_CONTACT` - Required. Helpline number dialed by the emergency tool.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent turn iterations. Defaults to `6`.
//! - `SEARCH_MAX_RESULTS` - Optional. Therapist search result cap. Defaults to `5`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Telephony (Twilio) configuration for the emergency-call tool.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio account SID
    pub account_sid: String,

    /// Twilio auth token
    pub auth_token: String,

    /// Number the call originates from (E.164)
    pub from_number: String,

    /// Helpline number the emergency tool dials (E.164)
    pub emergency_contact: String,
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Groq API key
    pub groq_api_key: String,

    /// Model identifier used for both routing and specialist replies
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for a single agent turn
    pub max_iterations: usize,

    /// Result cap passed to the therapist search provider
    pub search_max_results: usize,

    /// Telephony configuration
    pub twilio: TwilioConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let groq_api_key = require_env("GROQ_API_KEY")?;

        let model = std::env::var("GROQ_MODEL")
            .unwrap_or_else(|_| "openai/gpt-oss-120b".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "6".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?;

        let search_max_results = std::env::var("SEARCH_MAX_RESULTS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("SEARCH_MAX_RESULTS".to_string(), format!("{}", e))
            })?;

        let twilio = TwilioConfig {
            account_sid: require_env("TWILIO_ACCOUNT_SID")?,
            auth_token: require_env("TWILIO_AUTH_TOKEN")?,
            from_number: require_env("TWILIO_FROM_NUMBER")?,
            emergency_contact: require_env("EMERGENCY_CONTACT")?,
        };

        Ok(Self {
            groq_api_key,
            model,
            host,
            port,
            max_iterations,
            search_max_results,
            twilio,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(groq_api_key: String, model: String, twilio: TwilioConfig) -> Self {
        Self {
            groq_api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_iterations: 6,
            search_max_results: 5,
            twilio,
        }
    }
}

impl TwilioConfig {
    /// Placeholder credentials for tests.
    pub fn for_tests() -> Self {
        Self {
            account_sid: "ACtest".to_string(),
            auth_token: "token".to_string(),
            from_number: "+15550000000".to_string(),
            emergency_contact: "+15551111111".to_string(),
        }
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}
