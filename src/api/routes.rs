//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::agent::{extract_response, Agent};

use super::types::{AskRequest, AskResponse, HealthResponse};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<Agent>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `POST /ask` - run one agent turn for a single user message.
///
/// The reply and the tool name are both taken from the turn's trace
/// (last-write-wins scan). Agent failures surface as a bare 500; no
/// structured error reaches the client.
pub async fn ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, StatusCode> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "handling /ask");

    let turn = match state.agent.run_turn(&request.message).await {
        Ok(turn) => turn,
        Err(e) => {
            tracing::error!(%request_id, error = %e, "agent turn failed");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (tool_called, final_reply) = extract_response(&turn.steps);
    let Some(response) = final_reply else {
        tracing::error!(%request_id, "turn finished without a reply");
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    };

    tracing::info!(%request_id, tool = %tool_called, "turn complete");
    Ok(Json(AskResponse {
        response,
        tool_called,
    }))
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, TwilioConfig};
    use crate::llm::{ChatMessage, ChatResponse, FunctionCall, LlmClient, LlmError, Role, ToolCall};
    use crate::search::{SearchProvider, SearchResult};
    use crate::telephony::{TelephonyClient, TelephonyError};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;

    /// Emulates the routing contract the system prompt asks the real model
    /// to honor: crisis language triggers the emergency tool, therapist
    /// requests trigger the search tool, everything else goes to the
    /// specialist. After a tool result is in the conversation (or when no
    /// schemas are offered), it produces text.
    struct PolicyLlm;

    fn text(content: String) -> ChatResponse {
        ChatResponse {
            content: Some(content),
            tool_calls: None,
            usage: None,
        }
    }

    fn call(name: &str, arguments: String) -> ChatResponse {
        ChatResponse {
            content: None,
            tool_calls: Some(vec![ToolCall {
                id: "call_1".to_string(),
                call_type: "function".to_string(),
                function: FunctionCall {
                    name: name.to_string(),
                    arguments,
                },
            }]),
            usage: None,
        }
    }

    #[async_trait]
    impl LlmClient for PolicyLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            messages: &[ChatMessage],
            tools: Option<&[Value]>,
        ) -> Result<ChatResponse, LlmError> {
            // A tool already ran: fold its result into the final reply.
            if let Some(tool_msg) = messages.iter().rev().find(|m| m.role == Role::Tool) {
                let result = tool_msg.content.clone().unwrap_or_default();
                return Ok(text(format!("You're not alone. {}", result)));
            }

            // No schemas offered: this is the specialist passthrough call.
            if tools.is_none() {
                return Ok(text(
                    "That sounds heavy. Let's take it one step at a time.".to_string(),
                ));
            }

            let user = messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .and_then(|m| m.content.clone())
                .unwrap_or_default();
            let lower = user.to_lowercase();

            if lower.contains("kill myself") || lower.contains("suicide") {
                return Ok(call("emergency_call_tool", "{}".to_string()));
            }

            if lower.contains("therapist") {
                let location = user
                    .split_whitespace()
                    .last()
                    .unwrap_or_default()
                    .trim_matches(|c: char| !c.is_alphanumeric())
                    .to_string();
                return Ok(call(
                    "find_nearby_therapists_by_location",
                    format!("{{\"location\":\"{}\"}}", location),
                ));
            }

            let query = serde_json::to_string(&user).expect("encode query");
            Ok(call(
                "ask_mental_health_specialist",
                format!("{{\"query\":{}}}", query),
            ))
        }
    }

    struct StubSearch;

    #[async_trait]
    impl SearchProvider for StubSearch {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> anyhow::Result<Vec<SearchResult>> {
            Ok(vec![SearchResult {
                title: "Back Bay Counseling".to_string(),
                snippet: "Licensed therapists accepting new clients".to_string(),
                link: "https://backbay.example".to_string(),
            }])
        }
    }

    struct RecordingTelephony {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl TelephonyClient for RecordingTelephony {
        async fn place_call(&self) -> Result<(), TelephonyError> {
            *self.calls.lock().expect("lock") += 1;
            Ok(())
        }
    }

    fn test_state(telephony: Arc<RecordingTelephony>) -> AppState {
        let config = Config::new(
            "key".to_string(),
            "openai/gpt-oss-120b".to_string(),
            TwilioConfig::for_tests(),
        );
        let agent = Agent::with_clients(config, Arc::new(PolicyLlm), Arc::new(StubSearch), telephony);
        AppState {
            agent: Arc::new(agent),
        }
    }

    fn recording_telephony() -> Arc<RecordingTelephony> {
        Arc::new(RecordingTelephony {
            calls: Mutex::new(0),
        })
    }

    #[tokio::test]
    async fn plain_worry_routes_to_the_specialist() {
        let state = test_state(recording_telephony());
        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                message: "I feel anxious about work".to_string(),
            }),
        )
        .await
        .expect("200");

        assert_eq!(response.tool_called, "ask_mental_health_specialist");
        assert!(!response.response.is_empty());
    }

    #[tokio::test]
    async fn therapist_request_routes_to_search_and_names_the_city() {
        let state = test_state(recording_telephony());
        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                message: "I want to find a therapist in Boston".to_string(),
            }),
        )
        .await
        .expect("200");

        assert_eq!(response.tool_called, "find_nearby_therapists_by_location");
        assert!(response.response.contains("Boston"));
    }

    #[tokio::test]
    async fn crisis_message_places_the_call_and_still_replies() {
        let telephony = recording_telephony();
        let state = test_state(telephony.clone());
        let Json(response) = ask(
            State(state),
            Json(AskRequest {
                message: "I want to kill myself".to_string(),
            }),
        )
        .await
        .expect("200");

        assert_eq!(*telephony.calls.lock().expect("lock"), 1);
        assert_eq!(response.tool_called, "emergency_call_tool");
        assert!(!response.response.is_empty());
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmClient for FailingLlm {
        async fn chat_completion(
            &self,
            _model: &str,
            _messages: &[ChatMessage],
            _tools: Option<&[Value]>,
        ) -> Result<ChatResponse, LlmError> {
            Err(LlmError::Api("503: service unavailable".to_string()))
        }
    }

    #[tokio::test]
    async fn llm_outage_surfaces_as_a_bare_500() {
        let config = Config::new(
            "key".to_string(),
            "openai/gpt-oss-120b".to_string(),
            TwilioConfig::for_tests(),
        );
        let agent = Agent::with_clients(
            config,
            Arc::new(FailingLlm),
            Arc::new(StubSearch),
            recording_telephony(),
        );
        let state = AppState {
            agent: Arc::new(agent),
        };

        let status = ask(
            State(state),
            Json(AskRequest {
                message: "hello".to_string(),
            }),
        )
        .await
        .expect_err("should fail");

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
