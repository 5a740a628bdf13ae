//! Context modifier: looks around a cue match for negations and intensifiers.

use crate::cues::{INTENSIFIERS, NEGATIONS};

/// Characters inspected on each side of a match.
pub const WINDOW_CHARS: usize = 20;

pub const NEGATED: f64 = 0.5;
pub const INTENSIFIED: f64 = 1.4;
pub const NEUTRAL: f64 = 1.0;

/// Extracts up to [`WINDOW_CHARS`] characters before `start` and after `start + len`
/// (byte offsets into `text`), lowercased. Offsets must lie on char boundaries.
pub fn context_window(text: &str, start: usize, len: usize) -> String {
    let end = (start + len).min(text.len());
    let start = start.min(end);

    let window_start = text[..start]
        .char_indices()
        .rev()
        .nth(WINDOW_CHARS - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    let window_end = text[end..]
        .char_indices()
        .nth(WINDOW_CHARS)
        .map(|(i, _)| end + i)
        .unwrap_or(text.len());

    text[window_start..window_end].to_lowercase()
}

/// Multiplier for a window: negation wins over intensification.
pub fn modifier(window: &str) -> f64 {
    let window = window.to_lowercase();
    if NEGATIONS.iter().any(|term| window.contains(term)) {
        NEGATED
    } else if INTENSIFIERS.iter().any(|term| window.contains(term)) {
        INTENSIFIED
    } else {
        NEUTRAL
    }
}

/// Convenience: window extraction followed by classification.
pub fn modifier_at(text: &str, start: usize, len: usize) -> f64 {
    modifier(&context_window(text, start, len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_clamped_to_bounds() {
        assert_eq!(context_window("sad", 0, 3), "sad");
    }

    #[test]
    fn window_takes_twenty_chars_each_side() {
        let text = format!("{}MATCH{}", "a".repeat(30), "b".repeat(30));
        let window = context_window(&text, 30, 5);
        assert_eq!(window, format!("{}match{}", "a".repeat(20), "b".repeat(20)));
    }

    #[test]
    fn window_respects_multibyte_chars() {
        let text = "ééééé happy ééééé";
        let start = text.find("happy").unwrap();
        let window = context_window(text, start, 5);
        assert_eq!(window, text);
    }

    #[test]
    fn negation_beats_intensifier() {
        assert_eq!(modifier("i am not very happy"), NEGATED);
    }

    #[test]
    fn intensifier_boosts() {
        assert_eq!(modifier("i am really happy"), INTENSIFIED);
    }

    #[test]
    fn plain_window_is_neutral() {
        assert_eq!(modifier("i am happy"), NEUTRAL);
    }

    #[test]
    fn classification_lowercases_its_input() {
        assert_eq!(modifier("NEVER happy"), NEGATED);
    }

    #[test]
    fn terms_match_as_substrings() {
        // "nothing" contains "not"
        assert_eq!(modifier("nothing makes me happy"), NEGATED);
    }
}
