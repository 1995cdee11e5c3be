//! Emergency call tool: one-shot outbound call to the helpline.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::telephony::TelephonyClient;

use super::Tool;

/// Place an emergency call to the configured safety helpline.
pub struct EmergencyCall {
    telephony: Arc<dyn TelephonyClient>,
}

impl EmergencyCall {
    pub fn new(telephony: Arc<dyn TelephonyClient>) -> Self {
        Self { telephony }
    }
}

#[async_trait]
impl Tool for EmergencyCall {
    fn name(&self) -> &str {
        "emergency_call_tool"
    }

    fn description(&self) -> &str {
        "Place an emergency call to the safety helpline's phone number. Use this only if the user expresses suicidal ideation, intent to self-harm, or describes a mental health emergency requiring immediate help."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        // Telephony failures propagate; a failed call must not look like a placed one.
        self.telephony.place_call().await?;

        // The wire format requires a result message per call id; the model
        // folds this acknowledgement into its supportive reply.
        Ok("Emergency call placed to the safety helpline.".to_string())
    }
}
