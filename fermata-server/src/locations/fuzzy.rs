//! Approximate string matching for typo-tolerant lookups.
//!
//! Similarity is the sequence-matcher ratio: the longest common block is
//! found, the same search recurses on the pieces either side of it, and the
//! score is `2·M / T` where `M` counts matched characters and `T` is the
//! combined length. Scores lie in [0, 1].
//!
//! Matching is O(n·m) per candidate. It is meant for small candidate sets
//! (the gazetteer, one page of stored locations), not for indexing large
//! datasets.

use std::collections::HashMap;

/// Minimum similarity a fuzzy candidate must reach.
pub const DEFAULT_CUTOFF: f64 = 0.6;

/// The winning candidate of [`best_match`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch<'a> {
    /// The matched candidate text.
    pub candidate: &'a str,
    /// Position of the candidate in the input sequence.
    pub index: usize,
    /// Similarity score in [0, 1].
    pub score: f64,
}

/// Sequence-matcher similarity between two strings, over characters.
///
/// # Examples
///
/// ```
/// use fermata_server::locations::similarity;
///
/// assert_eq!(similarity("bole", "bole"), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// assert!((similarity("ayertena", "ayertna") - 14.0 / 15.0).abs() < 1e-12);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

/// Pick the most similar candidate scoring at least `cutoff`.
///
/// Ties go to the first candidate in iteration order. An empty key never
/// matches.
pub fn best_match<'a, I>(key: &str, candidates: I, cutoff: f64) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    if key.is_empty() {
        return None;
    }

    let mut best: Option<FuzzyMatch<'a>> = None;
    for (index, candidate) in candidates.into_iter().enumerate() {
        // The query is the second sequence, as in the lookup tables' history.
        let score = similarity(candidate, key);
        if score < cutoff {
            continue;
        }
        if best.is_none_or(|b| score > b.score) {
            best = Some(FuzzyMatch {
                candidate,
                index,
                score,
            });
        }
    }
    best
}

/// Total size of all matching blocks between `a` and `b`.
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        positions.entry(*c).or_default().push(j);
    }

    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let block = longest_block(a, &positions, alo, ahi, blo, bhi);
        if block.size == 0 {
            continue;
        }
        matched += block.size;

        if alo < block.i && blo < block.j {
            pending.push((alo, block.i, blo, block.j));
        }
        if block.i + block.size < ahi && block.j + block.size < bhi {
            pending.push((block.i + block.size, ahi, block.j + block.size, bhi));
        }
    }

    matched
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    i: usize,
    j: usize,
    size: usize,
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`.
///
/// Among equally long blocks, the one starting earliest in `a` wins, then
/// the one starting earliest in `b`.
fn longest_block(
    a: &[char],
    b_positions: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> Block {
    let mut best = Block {
        i: alo,
        j: blo,
        size: 0,
    };

    // run_len[j] = length of the block ending at a[i - 1], b[j]
    let mut run_len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next_run_len = HashMap::new();
        if let Some(js) = b_positions.get(c) {
            for &j in js {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| run_len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_run_len.insert(j, k);
                if k > best.size {
                    best = Block {
                        i: i + 1 - k,
                        j: j + 1 - k,
                        size: k,
                    };
                }
            }
        }
        run_len = next_run_len;
    }

    best
}
