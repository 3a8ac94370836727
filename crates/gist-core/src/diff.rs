//! Word-level alignment and diff opcodes.
//!
//! Alignment is a longest common subsequence over normalized word keys. Among
//! equally long subsequences the one with the most adjacent matched pairs wins,
//! so words are preferentially attributed to contiguous surviving phrases.

use std::ops::Range;

const NEG: i64 = i64::MIN / 4;

/// Diff operation kind between a parent (`a`) and a rewrite (`b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A diff opcode over word indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpKind,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

/// Monotone word alignment: ascending `(a_index, b_index)` pairs of equal keys.
pub fn align_words<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<(usize, usize)> {
    let (n, m) = (a.len(), b.len());
    if n == 0 || m == 0 {
        return Vec::new();
    }
    // One extra match always outweighs any amount of contiguity bonus.
    let unit = n.min(m) as i64 + 1;
    let w = m + 1;
    let mut best = vec![0i64; (n + 1) * w];
    let mut ending = vec![NEG; (n + 1) * w];

    for i in 1..=n {
        for j in 1..=m {
            let idx = i * w + j;
            if a[i - 1].as_ref() == b[j - 1].as_ref() {
                let diag = (i - 1) * w + (j - 1);
                let fresh = best[diag] + unit;
                let extend = if ending[diag] > NEG { ending[diag] + unit + 1 } else { NEG };
                ending[idx] = fresh.max(extend);
            }
            best[idx] = ending[idx].max(best[(i - 1) * w + j]).max(best[i * w + j - 1]);
        }
    }

    let mut pairs = Vec::new();
    let (mut i, mut j) = (n, m);
    let mut in_match = false;
    while i > 0 && j > 0 {
        let idx = i * w + j;
        if in_match {
            pairs.push((i - 1, j - 1));
            let diag = (i - 1) * w + (j - 1);
            in_match = ending[diag] > NEG && ending[idx] == ending[diag] + unit + 1;
            i -= 1;
            j -= 1;
        } else if ending[idx] > NEG && best[idx] == ending[idx] {
            in_match = true;
        } else if best[idx] == best[(i - 1) * w + j] {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    pairs.reverse();
    pairs
}

/// Alignment that also pairs equal words the rewrite moved.
///
/// After the monotone alignment, every unmatched word of `b` is paired with an
/// unmatched equal word of `a`, choosing the one closest in relative position
/// (lowest index on ties). The result is sorted by `a` index.
pub fn align_with_reordering<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<(usize, usize)> {
    let mut pairs = align_words(a, b);
    let (n, m) = (a.len(), b.len());
    let mut a_used = vec![false; n];
    let mut b_used = vec![false; m];
    for &(i, j) in &pairs {
        a_used[i] = true;
        b_used[j] = true;
    }

    for j in 0..m {
        if b_used[j] {
            continue;
        }
        let rel_b = j as f64 / m as f64;
        let mut chosen: Option<(usize, f64)> = None;
        for i in 0..n {
            if a_used[i] || a[i].as_ref() != b[j].as_ref() {
                continue;
            }
            let dist = (i as f64 / n as f64 - rel_b).abs();
            if chosen.map_or(true, |(_, d)| dist < d) {
                chosen = Some((i, dist));
            }
        }
        if let Some((i, _)) = chosen {
            a_used[i] = true;
            b_used[j] = true;
            pairs.push((i, j));
        }
    }
    pairs.sort_unstable();
    pairs
}

/// Diff opcodes turning `a` into `b`, derived from [`align_words`].
pub fn opcodes<S: AsRef<str>>(a: &[S], b: &[S]) -> Vec<Opcode> {
    let pairs = align_words(a, b);
    let mut ops = Vec::new();
    let (mut ai, mut bi) = (0usize, 0usize);
    let mut k = 0;

    while k < pairs.len() {
        let (i, j) = pairs[k];
        push_gap(&mut ops, ai..i, bi..j);
        let mut len = 1;
        while k + len < pairs.len() && pairs[k + len] == (i + len, j + len) {
            len += 1;
        }
        ops.push(Opcode { kind: OpKind::Equal, a: i..i + len, b: j..j + len });
        ai = i + len;
        bi = j + len;
        k += len;
    }
    push_gap(&mut ops, ai..a.len(), bi..b.len());
    ops
}

fn push_gap(ops: &mut Vec<Opcode>, a: Range<usize>, b: Range<usize>) {
    let kind = match (a.is_empty(), b.is_empty()) {
        (true, true) => return,
        (false, false) => OpKind::Replace,
        (false, true) => OpKind::Delete,
        (true, false) => OpKind::Insert,
    };
    ops.push(Opcode { kind, a, b });
}
