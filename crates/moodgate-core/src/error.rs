//! Error types shared by the generation seam.

use thiserror::Error;

/// Failures of the external text generator, before or during streaming.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    #[error("Missing LLM API key (set {0})")]
    MissingApiKey(&'static str),

    #[error("LLM API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("LLM transport error: {0}")]
    Transport(String),

    #[error("LLM upstream error: {0}")]
    Upstream(String),

    #[error("LLM response decode error: {0}")]
    Decode(String),
}

pub type GenerationResult<T> = Result<T, GenerationError>;
