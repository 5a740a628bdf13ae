//! Pre-stream failures. Once the body has started, failures are folded into the stream instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use moodgate_core::GenerationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Missing {0} environment variable.")]
    MissingApiKey(&'static str),

    #[error("Message is required.")]
    InvalidMessage,

    /// A generator's preflight refused the request for a reason other than a missing key.
    #[error("Generator unavailable: {0}")]
    Generator(GenerationError),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingApiKey(_) | GatewayError::Generator(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            GatewayError::InvalidMessage => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<GenerationError> for GatewayError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::MissingApiKey(var) => GatewayError::MissingApiKey(var),
            other => GatewayError::Generator(other),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        tracing::warn!(target: "moodgate::chat", status = %self.status(), "Request rejected: {}", self);
        (self.status(), self.to_string()).into_response()
    }
}
