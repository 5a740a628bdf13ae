//! Cue library: weighted lexical cues for the two polarities.
//!
//! Declaration order is significant. The scorer walks each table top to bottom and the
//! matched labels come out in the same order, regardless of where they occur in the text.

use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// One lexical signal of emotional polarity.
#[derive(Debug)]
pub struct WeightedCue {
    pub pattern: Regex,
    pub weight: f64,
    pub label: &'static str,
}

/// Polarity a cue table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

const POSITIVE_TABLE: &[(&str, f64, &str)] = &[
    (r"\bexcited\b", 2.0, "excited"),
    (r"\bhappy\b", 2.0, "happy"),
    (r"\bcurious\b", 1.5, "curious"),
    (r"\binterested\b", 1.5, "interested"),
    (r"\bgrateful\b", 2.0, "grateful"),
    (r"\bthank(s| you)\b", 1.5, "thankful"),
    (r"\bhopeful\b", 1.5, "hopeful"),
    (r"\bgreat\b", 1.2, "great"),
    (r"\bgood\b", 1.0, "good"),
    (r"\blove\b", 2.0, "love"),
    (r"\bwin|success|awesome\b", 1.5, "success"),
];

const NEGATIVE_TABLE: &[(&str, f64, &str)] = &[
    (r"\bstress(ed)?\b", 2.5, "stressed"),
    (r"\banxious|anxiety\b", 2.5, "anxious"),
    (r"\boverwhelmed\b", 2.5, "overwhelmed"),
    (r"\bworried|worry\b", 2.0, "worried"),
    (r"\bsad|upset|down\b", 2.0, "sad"),
    (r"\bfrustrated|frustrating\b", 2.0, "frustrated"),
    (r"\bconfused|lost\b", 1.5, "confused"),
    (r"\bangry|mad\b", 2.5, "angry"),
    (r"\bexhausted|tired\b", 1.5, "tired"),
    (r"\bhate|terrible|awful\b", 2.0, "harsh negative"),
];

/// Terms that halve a cue's weight when found near the match.
pub const NEGATIONS: &[&str] = &["not", "never", "hardly", "barely", "rarely"];

/// Terms that boost a cue's weight when found near the match (and no negation is present).
pub const INTENSIFIERS: &[&str] = &["very", "really", "so", "extremely", "super", "incredibly"];

/// Word boundary counting only `[A-Za-z0-9_]` as word characters, so an accented letter
/// next to a cue does not block the match.
const ASCII_BOUNDARY: &str = r"(?-u:\b)";

static POSITIVE_CUES: Lazy<Vec<WeightedCue>> = Lazy::new(|| compile(POSITIVE_TABLE));
static NEGATIVE_CUES: Lazy<Vec<WeightedCue>> = Lazy::new(|| compile(NEGATIVE_TABLE));

fn compile(table: &[(&str, f64, &'static str)]) -> Vec<WeightedCue> {
    table
        .iter()
        .map(|&(pattern, weight, label)| WeightedCue {
            // Table patterns are literals covered by `every_pattern_compiles`.
            pattern: RegexBuilder::new(&pattern.replace(r"\b", ASCII_BOUNDARY))
                .case_insensitive(true)
                .build()
                .unwrap_or_else(|e| panic!("invalid cue pattern {pattern:?}: {e}")),
            weight,
            label,
        })
        .collect()
}

/// Returns the cue table for a polarity, compiling it on first use.
pub fn cues(polarity: Polarity) -> &'static [WeightedCue] {
    match polarity {
        Polarity::Positive => POSITIVE_CUES.as_slice(),
        Polarity::Negative => NEGATIVE_CUES.as_slice(),
    }
}

/// Forces compilation of both tables. Called once at gateway start-up so the first
/// request does not pay for regex compilation.
pub fn warm_up() {
    Lazy::force(&POSITIVE_CUES);
    Lazy::force(&NEGATIVE_CUES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pattern_compiles() {
        assert_eq!(cues(Polarity::Positive).len(), POSITIVE_TABLE.len());
        assert_eq!(cues(Polarity::Negative).len(), NEGATIVE_TABLE.len());
    }

    #[test]
    fn weights_are_positive() {
        for cue in cues(Polarity::Positive).iter().chain(cues(Polarity::Negative)) {
            assert!(cue.weight > 0.0, "{} has non-positive weight", cue.label);
        }
    }

    #[test]
    fn patterns_are_case_insensitive() {
        let stressed = &cues(Polarity::Negative)[0];
        assert!(stressed.pattern.is_match("So STRESSED right now"));
    }

    #[test]
    fn alternation_keeps_outer_anchors_only() {
        let success = cues(Polarity::Positive)
            .iter()
            .find(|c| c.label == "success")
            .unwrap();
        assert!(success.pattern.is_match("a big win"));
        assert!(success.pattern.is_match("unsuccessful"));
        assert!(!success.pattern.is_match("twin peaks"));
    }

    #[test]
    fn accented_neighbour_does_not_block_a_boundary() {
        let sad = cues(Polarity::Negative)
            .iter()
            .find(|c| c.label == "sad")
            .unwrap();
        assert!(sad.pattern.is_match("i feel ésad today"));
        assert!(sad.pattern.is_match("tristesse: sadé"));
        assert!(!sad.pattern.is_match("i feel xsad today"));
    }
}
