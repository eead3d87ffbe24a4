//! Tokenizer and sentence splitter shared by all analyzers.

/// Split text into lowercase word tokens.
///
/// A token is a maximal run of ASCII letters and apostrophes. Digits and
/// punctuation act as separators and never appear inside tokens.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        if ch.is_ascii_alphabetic() || ch == '\'' {
            current.push(ch.to_ascii_lowercase());
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Split text into sentences on runs of `.`, `!`, `?`.
///
/// Results are trimmed; empty pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    text.split(|c| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
