//! moodgate-skills: concrete text generators for the gateway.

mod model_router;
mod sse;

pub use model_router::{LiveSettings, ModelRouter};
pub use sse::{SseDecoder, SseEvent};
