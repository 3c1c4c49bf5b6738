//! Utility functions for text editing

/// Return `string` without its last space-delimited word.
///
/// The space before the removed word is kept. A string without any space
/// has no preceding word, so the result is empty.
pub fn remove_last_word(string: &str) -> String {
    match string.rfind(' ') {
        Some(idx) => format!("{} ", &string[..idx]),
        None => String::new(),
    }
}

/// Character offset where the word left of `cursor` begins.
///
/// Whitespace directly before the cursor is skipped first, then the word
/// itself. Words are whitespace-delimited.
pub fn word_start_before(text: &str, cursor: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = cursor.min(chars.len());

    while pos > 0 && chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    while pos > 0 && !chars[pos - 1].is_whitespace() {
        pos -= 1;
    }
    pos
}

/// Character offset where the word right of `cursor` ends, including any
/// whitespace that follows it.
pub fn word_end_after(text: &str, cursor: usize) -> usize {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = cursor.min(chars.len());

    while pos < chars.len() && !chars[pos].is_whitespace() {
        pos += 1;
    }
    while pos < chars.len() && chars[pos].is_whitespace() {
        pos += 1;
    }
    pos
}

/// Case-insensitive comparison used by the name registries
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Case-insensitive "starts with"
pub fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.to_lowercase().starts_with(&prefix.to_lowercase())
}
