// Output formatting — terminal display of records, guardrails, and replies.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters like emoji or accented letters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Collapse runs of whitespace (including the prompt's blank lines) to single spaces.
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("Crust was perfect", 50), "Crust was perfect");
    }

    #[test]
    fn truncate_respects_multibyte_chars() {
        assert_eq!(truncate_chars("🍕🍕🍕🍕", 2), "🍕🍕...");
    }

    #[test]
    fn single_line_collapses_prompt_framing() {
        assert_eq!(
            single_line("\n\nHuman: Analyze this.\n\nAssistant: Sure."),
            "Human: Analyze this. Assistant: Sure."
        );
    }
}
