//! Chat handlers.
//!
//! `POST /api/chat` validates `{ "message": string }`, decides the mood, and streams
//! `META:<decision>\n` followed by the generated reply as plain text.
//! `POST /api/v1/mood` returns the decision alone as JSON.

use crate::error::GatewayError;
use crate::AppState;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use futures_util::StreamExt;
use moodgate_core::{detect_mood, MoodDecision, StreamFramer};
use std::sync::Arc;

/// Pulls a string `message` out of a JSON body. Empty strings are accepted.
pub fn parse_message(body: &[u8]) -> Result<String, GatewayError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|_| GatewayError::InvalidMessage)?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .ok_or(GatewayError::InvalidMessage)
}

/// POST /api/chat – mood-routed streaming reply.
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Result<Response, GatewayError> {
    state.router.preflight()?;
    let message = parse_message(&body)?;

    let request_id = uuid::Uuid::new_v4();
    let decision = detect_mood(&message);
    tracing::info!(
        target: "moodgate::chat",
        %request_id,
        message_len = message.len(),
        mood = %decision.mood,
        mode = %decision.mode,
        confidence = decision.confidence,
        "Chat request routed"
    );

    let router = Arc::clone(&state.router);
    let routed = decision.clone();
    let start = async move { router.route(&message, &routed).await };

    let stream = StreamFramer::new(decision).frame(start);
    let body = Body::from_stream(stream.map(Ok::<_, std::convert::Infallible>));

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        body,
    )
        .into_response())
}

/// POST /api/v1/mood – decision only, no generation.
pub async fn mood(body: Bytes) -> Result<Json<MoodDecision>, GatewayError> {
    let message = parse_message(&body)?;
    Ok(Json(detect_mood(&message)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_string_messages_including_empty() {
        assert_eq!(parse_message(br#"{"message":"hi"}"#).unwrap(), "hi");
        assert_eq!(parse_message(br#"{"message":""}"#).unwrap(), "");
    }

    #[test]
    fn rejects_missing_or_non_string_message() {
        assert!(matches!(parse_message(br#"{}"#), Err(GatewayError::InvalidMessage)));
        assert!(matches!(parse_message(br#"{"message":42}"#), Err(GatewayError::InvalidMessage)));
        assert!(matches!(parse_message(br#"{"message":null}"#), Err(GatewayError::InvalidMessage)));
        assert!(matches!(parse_message(b"not json"), Err(GatewayError::InvalidMessage)));
    }
}
