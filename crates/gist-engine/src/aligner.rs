//! Attribute each `T_0` token to the deepest level it survives into.

use gist_core::diff::align_with_reordering;
use gist_core::text::{keys, tokenize};
use gist_core::{SpanSalience, TokenLevel};
use std::collections::HashMap;

/// Levels for every word of `levels[0]`.
///
/// `levels` holds the distinct compressions `T_0 ..= T_depth_reached`. Each
/// `T_{d+1}` is aligned to `T_d`; a token's level is the last `d` its chain
/// reaches, and tokens surviving into the final level get `max_level`.
pub fn align(levels: &[String], max_level: usize) -> Vec<TokenLevel> {
    let Some(first) = levels.first() else {
        return Vec::new();
    };
    let tokens = tokenize(first);
    let mut position: Vec<Option<usize>> = (0..tokens.len()).map(Some).collect();
    let mut reached = vec![0usize; tokens.len()];

    for (d, pair) in levels.windows(2).enumerate() {
        let moves: HashMap<usize, usize> = align_with_reordering(&keys(&pair[0]), &keys(&pair[1])).into_iter().collect();
        for (t, pos) in position.iter_mut().enumerate() {
            *pos = pos.and_then(|i| moves.get(&i).copied());
            if pos.is_some() {
                reached[t] = d + 1;
            }
        }
    }

    tokens
        .into_iter()
        .zip(position.iter().zip(reached))
        .map(|(token, (pos, level))| TokenLevel {
            range: token.range,
            level: if pos.is_some() { max_level } else { level },
        })
        .collect()
}

/// Merge adjacent tokens of equal level into maximal spans.
pub fn spans(tokens: &[TokenLevel]) -> Vec<SpanSalience> {
    let mut out: Vec<SpanSalience> = Vec::new();
    for token in tokens {
        match out.last_mut() {
            Some(span) if span.level == token.level => span.range.end = token.range.end,
            _ => out.push(SpanSalience { range: token.range.clone(), level: token.level }),
        }
    }
    out
}
