//! moodgate-core: mood detection, mode routing and stream framing.
//!
//! A message is normalized, scored against two weighted cue tables, and turned into a
//! [`MoodDecision`]. The decision picks a system prompt, and the [`StreamFramer`] emits it as a
//! `META:` preamble before relaying the generator's fragments.

pub mod config;
pub mod context;
pub mod cues;
pub mod decision;
mod error;
pub mod framer;
mod generator;
pub mod normalize;
pub mod prompts;
mod router;
pub mod scorer;

pub use config::{api_key_from_env, GatewayConfig, LlmMode};
pub use cues::{Polarity, WeightedCue};
pub use decision::{detect_mood, CueMatches, Mode, Mood, MoodDecision};
pub use error::{GenerationError, GenerationResult};
pub use framer::{meta_frame, split_meta_frame, MetaSplit, StreamFramer, STREAM_ERROR_MARKER};
pub use generator::{FragmentReceiver, FragmentSender, GenerationRequest, TextGenerator};
pub use normalize::normalize;
pub use router::ResponseRouter;
pub use scorer::{score, ScoreResult};
