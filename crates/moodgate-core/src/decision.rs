//! Decision policy: turns the two polarity scores into a mood, a response mode and a rationale.
//!
//! The policy is a pure function of the input string. It terminates in one of four outcomes:
//! empty message, very short message without cues, or the general case (which yields
//! negative, positive or neutral).

use crate::cues::Polarity;
use crate::normalize::{normalize, token_count};
use crate::scorer::{score, ScoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Net score at or beyond which a message is considered polarized.
pub const MOOD_THRESHOLD: f64 = 0.5;

/// Messages with at most this many tokens and no cues take the short-message path.
pub const SHORT_MESSAGE_TOKENS: usize = 2;

pub const SHORT_MESSAGE_CONFIDENCE: f64 = 0.2;

pub const REASON_EMPTY: &str = "Empty message defaults to neutral exploratory mode.";
pub const REASON_SHORT: &str =
    "Very short message without sentiment cues stays neutral; explore gently.";
pub const REASON_MIXED: &str = "Mixed or weak signals; defaulting to exploratory.";
pub const REASON_SEPARATOR: &str = " | ";

/// Coarse emotional classification of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Negative,
    Neutral,
    Positive,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Negative => "negative",
            Mood::Neutral => "neutral",
            Mood::Positive => "positive",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response strategy picked from the mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Supportive,
    Exploratory,
}

impl Mode {
    /// `Supportive` for negative messages, `Exploratory` for everything else.
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::Negative => Mode::Supportive,
            Mood::Neutral | Mood::Positive => Mode::Exploratory,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Supportive => "Supportive",
            Mode::Exploratory => "Exploratory",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matched cue labels per polarity, in cue declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CueMatches {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

/// Complete output record for one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodDecision {
    pub mood: Mood,
    pub mode: Mode,
    /// Positive score minus negative score, unrounded.
    pub score: f64,
    /// In `[0, 1]`, rounded to two decimals.
    pub confidence: f64,
    pub reason: String,
    pub matches: CueMatches,
}

impl MoodDecision {
    fn neutral(confidence: f64, reason: &str) -> Self {
        Self {
            mood: Mood::Neutral,
            mode: Mode::Exploratory,
            score: 0.0,
            confidence,
            reason: reason.to_string(),
            matches: CueMatches::default(),
        }
    }
}

/// Classifies a raw message. Never fails.
pub fn detect_mood(message: &str) -> MoodDecision {
    let normalized = normalize(message);
    if normalized.is_empty() {
        tracing::debug!(target: "moodgate::decision", "empty message");
        return MoodDecision::neutral(0.0, REASON_EMPTY);
    }

    let lower = normalized.to_lowercase();
    let pos = score(&lower, Polarity::Positive);
    let neg = score(&lower, Polarity::Negative);

    if token_count(&normalized) <= SHORT_MESSAGE_TOKENS && pos.score == 0.0 && neg.score == 0.0 {
        tracing::debug!(target: "moodgate::decision", "short message without cues");
        return MoodDecision::neutral(SHORT_MESSAGE_CONFIDENCE, REASON_SHORT);
    }

    let decision = decide(pos, neg);
    tracing::debug!(
        target: "moodgate::decision",
        mood = %decision.mood,
        mode = %decision.mode,
        score = decision.score,
        confidence = decision.confidence,
        positive = ?decision.matches.positive,
        negative = ?decision.matches.negative,
        "mood decided"
    );
    decision
}

/// General case of the policy, given both polarity results.
pub fn decide(pos: ScoreResult, neg: ScoreResult) -> MoodDecision {
    let net = pos.score - neg.score;
    let total = match pos.score + neg.score {
        t if t == 0.0 => 1.0,
        t => t,
    };
    let confidence = round2((net.abs() / total).min(1.0));

    let mood = if net <= -MOOD_THRESHOLD {
        Mood::Negative
    } else if net >= MOOD_THRESHOLD {
        Mood::Positive
    } else {
        Mood::Neutral
    };

    let mut segments = Vec::new();
    if !pos.matches.is_empty() {
        segments.push(format!("Positive cues: {}", pos.matches.join(", ")));
    }
    if !neg.matches.is_empty() {
        segments.push(format!("Negative cues: {}", neg.matches.join(", ")));
    }
    if mood == Mood::Neutral {
        segments.push(REASON_MIXED.to_string());
    }

    MoodDecision {
        mood,
        mode: Mode::for_mood(mood),
        score: net,
        confidence,
        reason: segments.join(REASON_SEPARATOR),
        matches: CueMatches {
            positive: pos.matches,
            negative: neg.matches,
        },
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
