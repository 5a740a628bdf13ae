//! Scorer: runs one polarity's cue table against normalized lowercase text.

use crate::context::modifier_at;
use crate::cues::{cues, Polarity, WeightedCue};

/// Aggregated score and matched labels (in cue declaration order) for one polarity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub matches: Vec<String>,
}

/// Scores `text` against an explicit cue list. Only the first match of each cue counts.
pub fn score_cues(text: &str, cue_list: &[WeightedCue]) -> ScoreResult {
    let mut result = ScoreResult::default();
    for cue in cue_list {
        if let Some(found) = cue.pattern.find(text) {
            result.matches.push(cue.label.to_string());
            result.score += cue.weight * modifier_at(text, found.start(), found.len());
        }
    }
    result
}

/// Scores `text` against the built-in table for `polarity`.
pub fn score(text: &str, polarity: Polarity) -> ScoreResult {
    score_cues(text, cues(polarity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_cues_yields_zero() {
        let r = score("the weather is mild", Polarity::Positive);
        assert_eq!(r.score, 0.0);
        assert!(r.matches.is_empty());
    }

    #[test]
    fn labels_follow_declaration_order() {
        let r = score("i am curious and happy", Polarity::Positive);
        assert_eq!(r.matches, vec!["happy", "curious"]);
        assert!((r.score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn repeated_cue_counts_once() {
        let r = score("sad sad sad", Polarity::Negative);
        assert_eq!(r.matches, vec!["sad"]);
        assert!((r.score - 2.0).abs() < 1e-9);
    }

    #[test]
    fn intensifier_applies_to_contribution() {
        let r = score("i am very stressed about this", Polarity::Negative);
        assert_eq!(r.matches, vec!["stressed"]);
        assert!((r.score - 3.5).abs() < 1e-9);
    }

    #[test]
    fn negation_halves_contribution() {
        let r = score("i am not stressed", Polarity::Negative);
        assert!((r.score - 1.25).abs() < 1e-9);
    }
}
