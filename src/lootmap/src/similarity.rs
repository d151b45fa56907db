//! Sequence similarity for approximate icon name matching
//!
//! Implements the Ratcliff/Obershelp "gestalt" ratio: find the longest
//! common block, recurse on the pieces to its left and right, and score
//! `2 * matched / total_len`. Scores range from 0.0 (nothing in common) to
//! 1.0 (identical).

use std::collections::HashMap;

/// Index of every position of each char in `b`
fn index_chars(b: &[char]) -> HashMap<char, Vec<usize>> {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, c) in b.iter().enumerate() {
        b2j.entry(*c).or_default().push(j);
    }
    b2j
}

/// Longest common block of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns `(i, j, len)`. Of all maximal blocks, the one starting earliest
/// in `a` wins, then the one starting earliest in `b`.
fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    (alo, ahi): (usize, usize),
    (blo, bhi): (usize, usize),
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_len) = (alo, blo, 0);
    // Length of the match ending at a[i-1], b[j] keyed by j
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
                if k > best_len {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_len = k;
                }
            }
        }
        j2len = next;
    }

    (best_i, best_j, best_len)
}

/// Total number of chars in all matching blocks of `a` and `b`
fn matched_chars(a: &[char], b: &[char]) -> usize {
    matched_chars_indexed(a, b, &index_chars(b))
}

fn matched_chars_indexed(a: &[char], b: &[char], b2j: &HashMap<char, Vec<usize>>) -> usize {
    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, b2j, (alo, ahi), (blo, bhi));
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

fn score(matched: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matched as f64 / total as f64
    }
}

/// Similarity ratio of two strings in `[0.0, 1.0]`
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    score(matched_chars(&a, &b), a.len() + b.len())
}

/// Upper bound on [`ratio`] from lengths alone
fn length_bound(a: &[char], b: &[char]) -> f64 {
    score(a.len().min(b.len()), a.len() + b.len())
}

/// Upper bound on [`ratio`] from shared char counts, ignoring order
fn multiset_bound(a: &[char], b: &[char]) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b {
        *available.entry(*c).or_default() += 1;
    }
    let mut common = 0;
    for c in a {
        if let Some(n) = available.get_mut(c).filter(|n| **n > 0) {
            *n -= 1;
            common += 1;
        }
    }
    score(common, a.len() + b.len())
}

/// Closest candidate to `word` scoring at least `cutoff`
///
/// Candidates are compared in order; among equal top scores the first one
/// is kept. Returns `None` when nothing reaches the cutoff.
pub fn close_match<'a, I>(word: &str, candidates: I, cutoff: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let word: Vec<char> = word.chars().collect();
    let b2j = index_chars(&word);
    let mut best: Option<(f64, &'a str)> = None;

    for candidate in candidates {
        let chars: Vec<char> = candidate.chars().collect();
        if length_bound(&chars, &word) < cutoff || multiset_bound(&chars, &word) < cutoff {
            continue;
        }

        let matched = matched_chars_indexed(&chars, &word, &b2j);
        let s = score(matched, chars.len() + word.len());
        if s >= cutoff && best.map_or(true, |(top, _)| s > top) {
            best = Some((s, candidate));
        }
    }

    best.map(|(_, candidate)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_ratio_identical_and_disjoint() {
        assert!(approx(ratio("Weapon_Axe", "Weapon_Axe"), 1.0));
        assert!(approx(ratio("abc", "xyz"), 0.0));
        assert!(approx(ratio("", ""), 1.0));
        assert!(approx(ratio("abc", ""), 0.0));
    }

    #[test]
    fn test_ratio_known_values() {
        // abcd / bcde share "bcd": 2 * 3 / 8
        assert!(approx(ratio("abcd", "bcde"), 0.75));
        // "Wep" + "on_Axe" = 9 matched of 9 + 14 chars
        assert!(approx(ratio("Weapon_Axe.png", "Wepon_Axe"), 18.0 / 23.0));
    }

    #[test]
    fn test_longest_match_prefers_earliest() {
        let a: Vec<char> = "ab_ab".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        let b2j = index_chars(&b);
        assert_eq!(longest_match(&a, &b2j, (0, a.len()), (0, b.len())), (0, 0, 2));
    }

    #[test]
    fn test_matching_blocks_recurse_both_sides() {
        let a: Vec<char> = "xaybz".chars().collect();
        let b: Vec<char> = "ab".chars().collect();
        assert_eq!(matched_chars(&a, &b), 2);

        let a: Vec<char> = "Potion_Health_Small".chars().collect();
        let b: Vec<char> = "Potion_Health_Lesser".chars().collect();
        assert_eq!(matched_chars(&a, &b), 14);
    }

    #[test]
    fn test_bounds_never_undercut_ratio() {
        let pairs = [
            ("Weapon_Sword_Iron.png", "Weapon_Sword_Iron_Item"),
            ("Food_Skewer_Meat.png", "Food_Kebab_Meat"),
            ("Rubble_Charcoal_Small.png", "Ingredient_Charcoal"),
        ];
        for (a, b) in pairs {
            let ac: Vec<char> = a.chars().collect();
            let bc: Vec<char> = b.chars().collect();
            let r = ratio(a, b);
            assert!(length_bound(&ac, &bc) >= r);
            assert!(multiset_bound(&ac, &bc) >= r);
        }
    }

    #[test]
    fn test_close_match_picks_best_above_cutoff() {
        let candidates = ["Weapon_Sword.png", "Weapon_Axe.png", "Food_Bread.png"];
        assert_eq!(
            close_match("Wepon_Axe", candidates.iter().copied(), 0.6),
            Some("Weapon_Axe.png")
        );
        assert_eq!(close_match("Zzz", candidates.iter().copied(), 0.6), None);
    }

    #[test]
    fn test_close_match_tie_keeps_first() {
        let candidates = ["ab_x", "ab_y"];
        assert_eq!(close_match("ab_", candidates.iter().copied(), 0.5), Some("ab_x"));
    }

    #[test]
    fn test_close_match_cutoff_is_inclusive() {
        // ratio("abcd", "bcde") == 0.75 exactly
        assert_eq!(close_match("bcde", ["abcd"], 0.75), Some("abcd"));
        assert_eq!(close_match("bcde", ["abcd"], 0.76), None);
    }
}
