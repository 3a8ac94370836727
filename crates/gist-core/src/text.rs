//! Word tokenization with byte offsets and the normalized keys used for matching.

use std::ops::Range;

/// A whitespace-delimited word and its byte range in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub range: Range<usize>,
}

impl Token<'_> {
    pub fn key(&self) -> String {
        normalize(self.text)
    }
}

/// Split text into whitespace-delimited words, keeping byte offsets.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                tokens.push(Token { text: &text[s..i], range: s..i });
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        tokens.push(Token { text: &text[s..], range: s..text.len() });
    }
    tokens
}

/// Comparison key for a word: lower-cased, surrounding punctuation removed.
/// Pure-punctuation words keep their punctuation so they still compare.
pub fn normalize(word: &str) -> String {
    let trimmed = word.trim_matches(|c: char| !c.is_alphanumeric());
    if trimmed.is_empty() {
        word.to_lowercase()
    } else {
        trimmed.to_lowercase()
    }
}

/// Normalized keys of every word in `text`.
pub fn keys(text: &str) -> Vec<String> {
    text.split_whitespace().map(normalize).collect()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Remove one pair of wrapping quotes (straight or curly) and surrounding whitespace.
pub fn strip_wrapping_quotes(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix(['"', '\u{201C}']).unwrap_or(s);
    let s = s.strip_suffix(['"', '\u{201D}']).unwrap_or(s);
    s.trim()
}

/// Convert a byte offset within `text` to a character offset.
pub fn char_offset(text: &str, byte: usize) -> usize {
    text[..byte.min(text.len())].chars().count()
}
