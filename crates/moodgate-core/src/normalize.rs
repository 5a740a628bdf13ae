//! Message normalization.

/// Whitespace as browsers' regex `\s` sees it. Unlike `char::is_whitespace` this includes
/// U+FEFF and excludes U+0085.
pub fn is_message_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0B}'
            | '\u{0C}'
            | '\r'
            | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Collapses every run of whitespace into a single space and trims both ends.
pub fn normalize(message: &str) -> String {
    message
        .split(is_message_whitespace)
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Number of space-delimited tokens in an already normalized message.
pub fn token_count(normalized: &str) -> usize {
    normalized.split(' ').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_mixed_whitespace() {
        assert_eq!(normalize("  I am\t\tvery \n stressed  "), "I am very stressed");
    }

    #[test]
    fn empty_and_blank_normalize_to_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        assert_eq!(normalize("\u{FEFF}"), "");
        assert_eq!(normalize("\u{FEFF}so\u{3000}sad\u{A0}"), "so sad");
    }

    #[test]
    fn next_line_is_not_whitespace() {
        let normalized = normalize("ok\u{0085}fine\u{0085}go");
        assert_eq!(normalized, "ok\u{0085}fine\u{0085}go");
        assert_eq!(token_count(&normalized), 1);
    }

    #[test]
    fn counts_tokens() {
        assert_eq!(token_count("ok"), 1);
        assert_eq!(token_count("ok then"), 2);
        assert_eq!(token_count("I am fine"), 3);
    }
}
