//! Sequence-ratio string similarity
//!
//! Ratcliff/Obershelp matching: find the longest common block, recurse on the
//! pieces to its left and right, and score `2·M / (|a| + |b|)` where `M` is the
//! total size of the matched blocks. Strings are compared by `char`.

use std::collections::HashMap;

/// Cheapest upper bound on [`sequence_ratio`], from lengths alone
pub fn real_quick_ratio(a: &str, b: &str) -> f64 {
    let la = a.chars().count();
    let lb = b.chars().count();
    ratio_of(la.min(lb), la + lb)
}

/// Upper bound on [`sequence_ratio`] from the shared character multiset
pub fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
    }

    let mut matches = 0;
    let mut la = 0;
    for c in a.chars() {
        la += 1;
        if let Some(count) = available.get_mut(&c) {
            if *count > 0 {
                *count -= 1;
                matches += 1;
            }
        }
    }
    let lb = b.chars().count();
    ratio_of(matches, la + lb)
}

/// Similarity of two strings in [0, 1]
///
/// Not symmetric in general: ties between equally long blocks are broken by
/// earliest position in `a`, then in `b`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_of(matching_characters(&a, &b), a.len() + b.len())
}

/// Best candidate for `word` scoring at least `cutoff`
///
/// Among equal scores the earliest candidate wins.
pub fn close_match<'a, S>(word: &str, candidates: &'a [S], cutoff: f64) -> Option<&'a str>
where
    S: AsRef<str>,
{
    let mut best: Option<(&str, f64)> = None;
    for candidate in candidates {
        let candidate = candidate.as_ref();
        if real_quick_ratio(candidate, word) < cutoff || quick_ratio(candidate, word) < cutoff {
            continue;
        }
        let score = sequence_ratio(candidate, word);
        if score < cutoff {
            continue;
        }
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(candidate, _)| candidate)
}

fn ratio_of(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

/// Total size of the matching blocks between `a` and `b`
fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }

    let mut total = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        total += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    total
}

/// Longest block `a[i..i+k] == b[j..j+k]` inside the given windows
///
/// Returns the block starting earliest in `a`, then earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);
    // j2len[j] = length of the match ending at a[i - 1], b[j]
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for (i, c) in a.iter().enumerate().take(ahi).skip(alo) {
        let mut next: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b2j.get(c) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j
                    .checked_sub(1)
                    .and_then(|prev| j2len.get(&prev))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next.insert(j, k);
                if k > best_k {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_k = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_k)
}
