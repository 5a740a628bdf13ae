//! Stream framer: a one-line metadata preamble followed by the generator's raw text.
//!
//! Wire format:
//!
//! ```text
//! META:{"mood":"negative","mode":"Supportive",...}\n
//! <fragment><fragment>...[\n[stream error: unable to complete AI response]\n]
//! ```
//!
//! The framer moves through `Init -> MetaSent -> Streaming -> Closed`. The preamble is emitted
//! before generation is started, so a consumer sees the decision even when the generator
//! fails to start. Any failure after the preamble is folded into [`STREAM_ERROR_MARKER`].

use crate::decision::MoodDecision;
use crate::error::GenerationResult;
use crate::generator::FragmentReceiver;
use futures_util::Stream;
use std::future::Future;

pub const META_PREFIX: &str = "META:";

/// Appended once when generation fails after the preamble has gone out.
pub const STREAM_ERROR_MARKER: &str = "\n[stream error: unable to complete AI response]\n";

/// Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum FrameState {
    Init,
    MetaSent,
    Streaming,
    Closed,
}

/// Serializes a decision into the preamble line, newline included.
pub fn meta_frame(decision: &MoodDecision) -> String {
    let json = serde_json::to_string(decision).unwrap_or_else(|_| "{}".to_string());
    format!("{META_PREFIX}{json}\n")
}

pub struct StreamFramer {
    decision: MoodDecision,
    state: FrameState,
}

impl StreamFramer {
    pub fn new(decision: MoodDecision) -> Self {
        Self {
            decision,
            state: FrameState::Init,
        }
    }

    fn advance(&mut self, next: FrameState) {
        debug_assert!(next > self.state, "frame state moved from {:?} to {:?}", self.state, next);
        tracing::trace!(target: "moodgate::framer", from = ?self.state, to = ?next, "frame state");
        self.state = next;
    }

    /// Produces the framed body. `start` is awaited only after the preamble has been yielded.
    ///
    /// Dropping the returned stream drops the fragment receiver (or the pending `start`
    /// future), which stops the producer on its next send.
    pub fn frame<F>(mut self, start: F) -> impl Stream<Item = String> + Send + 'static
    where
        F: Future<Output = GenerationResult<FragmentReceiver>> + Send + 'static,
    {
        async_stream::stream! {
            yield meta_frame(&self.decision);
            self.advance(FrameState::MetaSent);

            let mut relayed = 0usize;
            let failure = match start.await {
                Ok(mut rx) => {
                    self.advance(FrameState::Streaming);
                    let mut failure = None;
                    while let Some(item) = rx.recv().await {
                        match item {
                            Ok(fragment) => {
                                relayed += fragment.len();
                                yield fragment;
                            }
                            Err(e) => {
                                failure = Some(e);
                                break;
                            }
                        }
                    }
                    failure
                }
                Err(e) => Some(e),
            };

            if let Some(e) = failure {
                tracing::error!(
                    target: "moodgate::framer",
                    relayed_bytes = relayed,
                    "Generation failed mid-response: {}",
                    e
                );
                yield STREAM_ERROR_MARKER.to_string();
            } else {
                tracing::info!(target: "moodgate::framer", relayed_bytes = relayed, "Stream complete");
            }
            self.advance(FrameState::Closed);
        }
    }
}

/// Result of looking for the preamble at the head of a consumer's buffer.
#[derive(Debug, PartialEq)]
pub enum MetaSplit<'a> {
    /// No newline yet; keep buffering.
    Incomplete,
    /// The first line was a preamble. `decision` is `None` when its JSON did not parse.
    Framed {
        decision: Option<MoodDecision>,
        rest: &'a str,
    },
    /// The first line was not a preamble; everything is content.
    Unframed(&'a str),
}

/// Consumer-side counterpart of [`meta_frame`].
pub fn split_meta_frame(buffer: &str) -> MetaSplit<'_> {
    let Some(newline) = buffer.find('\n') else {
        return MetaSplit::Incomplete;
    };
    let line = &buffer[..newline];
    match line.strip_prefix(META_PREFIX) {
        Some(json) => MetaSplit::Framed {
            decision: serde_json::from_str(json).ok(),
            rest: &buffer[newline + 1..],
        },
        None => MetaSplit::Unframed(buffer),
    }
}
