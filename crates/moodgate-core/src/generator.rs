//! The seam to the external text generator.
//!
//! A generator starts one streaming completion and hands back the receiving half of a
//! bounded channel. The producing task owns the upstream connection; it must stop as soon
//! as a send fails, which is how a dropped consumer propagates cancellation.

use crate::error::GenerationResult;
use tokio::sync::mpsc;

/// Ordered fragments of generated text; an `Err` item ends the stream with a failure.
pub type FragmentReceiver = mpsc::Receiver<GenerationResult<String>>;
pub type FragmentSender = mpsc::Sender<GenerationResult<String>>;

/// One generation call: a system prompt plus a single user content block.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system_prompt: String,
    pub user_prompt: String,
}

#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Short identifier used in logs (e.g. "mock", "live").
    fn name(&self) -> &str;

    /// Checks that a generation could start (e.g. credentials are present). Called before
    /// any response bytes are written, so failures here can still become a status code.
    fn preflight(&self) -> GenerationResult<()> {
        Ok(())
    }

    /// Starts a streaming generation. Errors returned here happened before any fragment.
    async fn stream(&self, request: GenerationRequest) -> GenerationResult<FragmentReceiver>;
}
