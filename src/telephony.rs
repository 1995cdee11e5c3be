//! Outbound telephony: client abstraction and the Twilio implementation.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::TwilioConfig;

#[derive(Debug, Error)]
pub enum TelephonyError {
    #[error("HTTP error calling telephony provider: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telephony provider rejected the call: {0}")]
    Rejected(String),
}

/// Outbound-call provider abstraction.
#[async_trait]
pub trait TelephonyClient: Send + Sync {
    /// Place the pre-configured emergency call. Returns no payload.
    async fn place_call(&self) -> Result<(), TelephonyError>;
}

const TWILIO_BASE_URL: &str = "https://api.twilio.com";

/// Message spoken when the call connects.
const CALL_TWIML: &str = "<Response><Say>This is an automated alert from the SafeSpace support line. A caller may need urgent help.</Say></Response>";

/// Twilio-backed voice caller. The destination and caller numbers are fixed
/// at construction from [`TwilioConfig`].
pub struct TwilioCaller {
    config: TwilioConfig,
    base_url: String,
}

impl TwilioCaller {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            config,
            base_url: TWILIO_BASE_URL.to_string(),
        }
    }

    /// Point the caller at a custom host (used by tests).
    pub fn with_base_url(config: TwilioConfig, base_url: String) -> Self {
        Self { config, base_url }
    }
}

#[async_trait]
impl TelephonyClient for TwilioCaller {
    async fn place_call(&self) -> Result<(), TelephonyError> {
        let url = format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.base_url, self.config.account_sid
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let response = client
            .post(&url)
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", self.config.emergency_contact.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Twiml", CALL_TWIML),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TelephonyError::Rejected(format!("{}: {}", status, body)));
        }

        tracing::info!(to = %self.config.emergency_contact, "emergency call placed");
        Ok(())
    }
}
