//! Serializable view of a paragraph's salience maps.

use gist_core::text::char_offset;
use gist_core::{SalienceMap, Scores, Termination};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphExport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub max_level: usize,
    pub entries: Vec<SentenceEntry>,
    /// The whole paragraph at each level, sentences joined by a space.
    pub combined_levels: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceEntry {
    pub id: usize,
    pub text: String,
    pub levels: Vec<String>,
    pub spans: Vec<SpanExport>,
    pub depth_reached: usize,
    pub termination: Termination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<Scores>>,
}

/// A span with byte and character offsets into the sentence text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanExport {
    pub start: usize,
    pub end: usize,
    pub char_start: usize,
    pub char_end: usize,
    pub text: String,
    pub level: usize,
}

impl ParagraphExport {
    /// Spans at or above `level`, in reading order.
    pub fn spans_at_least(&self, level: usize) -> impl Iterator<Item = (usize, &SpanExport)> + '_ {
        self.entries
            .iter()
            .flat_map(|e| e.spans.iter().map(move |s| (e.id, s)))
            .filter(move |(_, s)| s.level >= level)
    }
}

pub fn export(title: Option<String>, maps: &[SalienceMap], diagnostics: bool) -> ParagraphExport {
    let mut ordered: Vec<&SalienceMap> = maps.iter().collect();
    ordered.sort_by_key(|m| m.sentence.index);

    let max_level = ordered.iter().map(|m| m.max_level).max().unwrap_or(0);
    let combined_levels = (0..=max_level)
        .map(|l| {
            ordered
                .iter()
                .filter_map(|m| m.levels.get(l).or(m.levels.last()))
                .filter(|t| !t.is_empty())
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    let entries = ordered.iter().map(|m| entry(m, diagnostics)).collect();

    ParagraphExport { title, max_level, entries, combined_levels }
}

fn entry(map: &SalienceMap, diagnostics: bool) -> SentenceEntry {
    let text = &map.sentence.text;
    let spans = map
        .spans
        .iter()
        .map(|s| SpanExport {
            start: s.range.start,
            end: s.range.end,
            char_start: char_offset(text, s.range.start),
            char_end: char_offset(text, s.range.end),
            text: text[s.range.clone()].to_string(),
            level: s.level,
        })
        .collect();
    SentenceEntry {
        id: map.sentence.index,
        text: text.clone(),
        levels: map.levels.clone(),
        spans,
        depth_reached: map.depth_reached,
        termination: map.termination,
        scores: diagnostics.then(|| map.level_scores.clone()),
    }
}
