//! Rule-based sentence segmenter.

use crate::abbreviations::{ALWAYS_ABBREVIATIONS, AMBIGUOUS_ABBREVIATIONS};
use crate::traits::Segmenter;
use gist_core::{GistError, Result, Sentence};
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

/// Segmenter driven by terminal punctuation, abbreviation lists and casing.
pub struct RuleSegmenter {
    boundary_re: Regex,
    blank_line_re: Regex,
    abbreviations: HashSet<String>,
    ambiguous: HashSet<String>,
}

impl RuleSegmenter {
    pub fn new() -> Self {
        Self {
            boundary_re: Regex::new(r#"[.!?\u{2026}]+["'\u{201D}\u{2019})\]]*(\s+|$)"#).unwrap(),
            blank_line_re: Regex::new(r"\n[ \t\r]*\n\s*").unwrap(),
            abbreviations: ALWAYS_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            ambiguous: AMBIGUOUS_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add domain abbreviations that never end a sentence (case-insensitive,
    /// trailing period optional).
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbr in extra {
            let abbr = abbr.as_ref().trim_end_matches('.').to_lowercase();
            if !abbr.is_empty() {
                self.ambiguous.remove(&abbr);
                self.abbreviations.insert(abbr);
            }
        }
        self
    }

    /// Byte offsets where a new sentence starts (excluding 0).
    fn cut_points(&self, paragraph: &str) -> Vec<usize> {
        let mut cuts: Vec<usize> = Vec::new();

        for m in self.boundary_re.find_iter(paragraph) {
            let punct_end = m.as_str().trim_end().len() + m.start();
            if self.is_boundary(paragraph, m.start(), punct_end, m.end()) {
                cuts.push(m.end());
            }
        }
        for m in self.blank_line_re.find_iter(paragraph) {
            cuts.push(m.end());
        }

        cuts.retain(|&c| c > 0 && c < paragraph.len());
        cuts.sort_unstable();
        cuts.dedup();
        cuts
    }

    /// Decide whether the punctuation run at `start..punct_end` closes a sentence.
    fn is_boundary(&self, text: &str, start: usize, punct_end: usize, next: usize) -> bool {
        let punct = &text[start..punct_end];

        if let Some(c) = first_letter(&text[next..]) {
            if c.is_lowercase() {
                return false;
            }
        }

        let single_period = punct.starts_with('.') && !punct.starts_with("..");
        if !single_period {
            return true;
        }

        let word_start = text[..start]
            .rfind(char::is_whitespace)
            .map(|i| i + text[i..].chars().next().map_or(1, char::len_utf8))
            .unwrap_or(0);
        let word = text[word_start..start]
            .trim_start_matches(|c: char| !c.is_alphanumeric());
        if word.is_empty() {
            return true;
        }

        let lower = word.to_lowercase();
        if self.abbreviations.contains(&lower) {
            return false;
        }
        if self.ambiguous.contains(&lower) {
            return !self.continues_citation(&text[next..]);
        }
        // Dotted abbreviations such as "U.K" or "a.m".
        if word.contains('.') && word.chars().all(|c| c.is_alphabetic() || c == '.') {
            return false;
        }
        // Single-letter initials such as "J."
        let mut chars = word.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_uppercase() {
                return false;
            }
        }
        true
    }
}

impl RuleSegmenter {
    /// True when `rest` opens with a number, a roman numeral or an ambiguous
    /// abbreviation, as in "No. 12", "Pt. IV" or "Co. Ltd.".
    fn continues_citation(&self, rest: &str) -> bool {
        let token = rest
            .split_whitespace()
            .next()
            .unwrap_or("")
            .trim_start_matches(|c: char| matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}'));
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            return true;
        }
        let word = token.trim_end_matches(|c: char| matches!(c, ',' | ';' | ':' | ')'));
        if is_roman_numeral(word.trim_end_matches('.')) {
            return true;
        }
        match word.strip_suffix('.') {
            Some(abbr) => self.ambiguous.contains(&abbr.to_lowercase()),
            None => false,
        }
    }
}

/// Upper-case roman numerals of two or more letters; a lone "I" is a pronoun.
fn is_roman_numeral(word: &str) -> bool {
    word.len() >= 2 && word.chars().all(|c| matches!(c, 'I' | 'V' | 'X' | 'L' | 'C' | 'D' | 'M'))
}

fn first_letter(s: &str) -> Option<char> {
    s.chars()
        .find(|c| !c.is_whitespace() && !matches!(c, '"' | '\'' | '(' | '[' | '\u{201C}' | '\u{2018}'))
        .filter(|c| c.is_alphabetic())
}

impl Segmenter for RuleSegmenter {
    fn segment(&self, paragraph: &str) -> Result<Vec<Sentence>> {
        if paragraph.trim().is_empty() {
            return Err(GistError::EmptyInput);
        }
        if !paragraph.chars().any(char::is_alphanumeric) {
            return Err(GistError::Segmentation("paragraph contains no words".into()));
        }

        let mut bounds = vec![0];
        bounds.extend(self.cut_points(paragraph));
        bounds.push(paragraph.len());

        let mut sentences: Vec<Sentence> = Vec::new();
        let mut pending_start: Option<usize> = None;
        for w in bounds.windows(2) {
            let (start, end) = (pending_start.take().unwrap_or(w[0]), w[1]);
            let slice = &paragraph[start..end];
            let lead = slice.len() - slice.trim_start().len();
            let content = start + lead..start + slice.trim_end().len();

            let has_words = paragraph[content.clone()].chars().any(char::is_alphanumeric);
            if !has_words {
                // Whitespace or stray punctuation belongs to the previous sentence.
                match sentences.last_mut() {
                    Some(prev) => {
                        prev.range.end = end;
                        if !content.is_empty() {
                            prev.content.end = content.end;
                            prev.text = paragraph[prev.content.clone()].to_string();
                        }
                    }
                    None => pending_start = Some(start),
                }
                continue;
            }
            sentences.push(Sentence {
                index: sentences.len(),
                range: start..end,
                text: paragraph[content.clone()].to_string(),
                content,
            });
        }

        if sentences.is_empty() {
            return Err(GistError::Segmentation("no sentence boundaries could be established".into()));
        }
        debug!(sentences = sentences.len(), bytes = paragraph.len(), "segmented paragraph");
        Ok(sentences)
    }
}

impl Default for RuleSegmenter {
    fn default() -> Self {
        Self::new()
    }
}
