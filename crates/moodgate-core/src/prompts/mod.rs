//! System-prompt templates keyed by response mode.

pub mod exploratory;
pub mod supportive;

pub use exploratory::EXPLORATORY_SYSTEM;
pub use supportive::SUPPORTIVE_SYSTEM;

use crate::decision::{Mode, Mood};

/// System prompt for a response mode.
pub fn system_prompt(mode: Mode) -> &'static str {
    match mode {
        Mode::Supportive => SUPPORTIVE_SYSTEM,
        Mode::Exploratory => EXPLORATORY_SYSTEM,
    }
}

/// User prompt template; placeholders are replaced by [`user_prompt`].
pub const USER_TEMPLATE: &str = "User message: {message}\n\nDetected mood: {mood}\nSelected mode: {mode}\nUse the mode intent above while replying.";

/// Builds the user content block carrying the user message and the detected mood/mode.
pub fn user_prompt(message: &str, mood: Mood, mode: Mode) -> String {
    USER_TEMPLATE
        .replace("{mood}", mood.as_str())
        .replace("{mode}", mode.as_str())
        .replace("{message}", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_map_to_distinct_prompts() {
        assert_ne!(system_prompt(Mode::Supportive), system_prompt(Mode::Exploratory));
        assert!(system_prompt(Mode::Supportive).contains("actionable next step"));
        assert!(system_prompt(Mode::Exploratory).contains("follow-up"));
    }

    #[test]
    fn user_prompt_embeds_message_and_decision() {
        let p = user_prompt("I lost my keys", Mood::Negative, Mode::Supportive);
        assert_eq!(
            p,
            "User message: I lost my keys\n\nDetected mood: negative\nSelected mode: Supportive\nUse the mode intent above while replying."
        );
    }

    #[test]
    fn placeholders_in_message_are_left_alone() {
        let p = user_prompt("what does {mood} mean?", Mood::Neutral, Mode::Exploratory);
        assert!(p.starts_with("User message: what does {mood} mean?"));
    }
}
