//! Raw ship token resolution.
//!
//! **Algorithm** (first step that matches wins):
//! 1. Exact, case-insensitive alias match
//! 2. Exact match after [`normalize_ship_name`]
//! 3. Coverage match of the normalized token against every normalized alias:
//!    the shorter of the two is aligned against a run of whole words of the
//!    longer one. Containment covers the whole shorter string; each edit
//!    (insert, delete, substitute, transpose) uncovers one character. The match
//!    must cover at least `min_coverage` of the shorter string.
//!
//! Edits are only allowed when the shorter string has at least
//! [`MIN_EDIT_LEN`] characters; shorter strings must be contained exactly.
//! A token shorter than a multi-word alias must cover the alias's last word, so
//! `LINCOLN` names `ABRAHAM LINCOLN` but `NEW` does not name `NEW YORK`.
//!
//! Ties on coverage go to the longest alias; a tie between ships on alias
//! length is [`Resolution::Ambiguous`] and left for manual review.

use std::cmp::Ordering;

use strsim::generic_damerau_levenshtein;

use super::{exact_key, normalize_ship_name, ShipIdentity, ShipReference, SHIP_PREFIXES};

/// Tokens shorter than this never take part in coverage matching.
const MIN_FUZZY_LEN: usize = 3;

/// Shortest string allowed to match with edits rather than exactly.
pub const MIN_EDIT_LEN: usize = 6;

/// Outcome of resolving a raw ship token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'r> {
    Resolved(&'r ShipIdentity),
    Unresolved,
    /// Several ships matched equally well.
    Ambiguous(Vec<&'r ShipIdentity>),
}

impl<'r> Resolution<'r> {
    pub fn ship(&self) -> Option<&'r ShipIdentity> {
        match self {
            Resolution::Resolved(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Resolution::Unresolved)
    }
}

/// Normalized text as characters, with the `[start, end)` offsets of its words.
#[derive(Debug, Clone)]
pub(super) struct Phrase {
    chars: Vec<char>,
    words: Vec<(usize, usize)>,
}

impl Phrase {
    pub(super) fn new(normalized: &str) -> Self {
        let chars: Vec<char> = normalized.chars().collect();
        let mut words = Vec::new();
        let mut start = None;
        for (i, c) in chars.iter().enumerate() {
            match (c.is_whitespace(), start) {
                (false, None) => start = Some(i),
                (true, Some(s)) => {
                    words.push((s, i));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            words.push((s, chars.len()));
        }
        Self { chars, words }
    }

    pub(super) fn len(&self) -> usize {
        self.chars.len()
    }

    pub(super) fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Smallest edit distance from `short` to a run of whole words, within `budget`.
    fn best_distance(&self, short: &[char], budget: usize, last_word_only: bool) -> Option<usize> {
        let n = short.len();
        let last = self.words.len().checked_sub(1)?;
        let mut best: Option<usize> = None;
        for (i, &(start, _)) in self.words.iter().enumerate() {
            for (j, &(_, end)) in self.words.iter().enumerate().skip(i) {
                let len = end - start;
                if len > n + budget {
                    break;
                }
                if len + budget < n || (last_word_only && j != last) {
                    continue;
                }
                let distance = generic_damerau_levenshtein(short, &self.chars[start..end]);
                if distance <= budget && best.map_or(true, |b| distance < b) {
                    if distance == 0 {
                        return Some(0);
                    }
                    best = Some(distance);
                }
            }
        }
        best
    }
}

/// Edits a string of `len` characters may carry and still reach `min_coverage`.
fn edit_budget(len: usize, min_coverage: f64) -> usize {
    if len < MIN_EDIT_LEN {
        0
    } else {
        (len as f64 * (1.0 - min_coverage) + 1e-9).floor() as usize
    }
}

/// Covered characters out of the shorter string's length.
///
/// Ordered by exact ratio, so equal coverages compare equal regardless of
/// floating point rounding.
#[derive(Debug, Clone, Copy)]
pub struct Coverage {
    pub matched: usize,
    pub len: usize,
}

impl Coverage {
    pub fn ratio(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.matched as f64 / self.len as f64
        }
    }

    /// Coverage of `token` against `alias`, both already normalized.
    ///
    /// Returns `None` when the coverage is below `min_coverage`.
    pub fn between(token: &str, alias: &str, min_coverage: f64) -> Option<Coverage> {
        Self::of(&Phrase::new(token), &Phrase::new(alias), min_coverage)
    }

    fn of(token: &Phrase, alias: &Phrase, min_coverage: f64) -> Option<Coverage> {
        if token.chars.is_empty() || alias.chars.is_empty() {
            return None;
        }
        let (short, long, last_word_only) = if token.len() <= alias.len() {
            (token, alias, alias.word_count() > 1)
        } else {
            (alias, token, false)
        };

        let n = short.len();
        let budget = edit_budget(n, min_coverage);
        long.best_distance(&short.chars, budget, last_word_only)
            .map(|distance| Coverage {
                matched: n - distance,
                len: n,
            })
    }
}

impl PartialEq for Coverage {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coverage {}

impl PartialOrd for Coverage {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coverage {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.matched * other.len).cmp(&(other.matched * self.len))
    }
}


impl ShipReference {
    /// Resolve a raw ship token to a canonical ship.
    pub fn resolve(&self, token: &str, min_coverage: f64) -> Resolution<'_> {
        if let Some(&idx) = self.exact.get(&exact_key(token)) {
            return Resolution::Resolved(&self.ships[idx]);
        }

        let normalized = normalize_ship_name(token);
        if normalized.is_empty() {
            return Resolution::Unresolved;
        }
        if let Some(&idx) = self.normalized.get(&normalized) {
            return Resolution::Resolved(&self.ships[idx]);
        }

        if !is_fuzzy_candidate(&normalized) {
            return Resolution::Unresolved;
        }
        let mut scored = Vec::new();
        self.score(&Phrase::new(&normalized), min_coverage, &mut scored);
        self.pick(&scored)
    }

    /// Coverage of every alias reaching `min_coverage`, as
    /// `(coverage, alias length, ship index)`.
    fn score(&self, token: &Phrase, min_coverage: f64, out: &mut Vec<(Coverage, usize, usize)>) {
        out.extend(self.keys.iter().filter_map(|(key, idx)| {
            Coverage::of(token, key, min_coverage).map(|coverage| (coverage, key.len(), *idx))
        }));
    }

    fn pick(&self, scored: &[(Coverage, usize, usize)]) -> Resolution<'_> {
        let Some(best) = scored.iter().map(|(c, _, _)| *c).max() else {
            return Resolution::Unresolved;
        };
        let longest = scored
            .iter()
            .filter(|(c, _, _)| *c == best)
            .map(|(_, len, _)| *len)
            .max()
            .unwrap_or(0);

        let mut winners: Vec<usize> = scored
            .iter()
            .filter(|(c, len, _)| *c == best && *len == longest)
            .map(|(_, _, idx)| *idx)
            .collect();
        winners.sort_unstable();
        winners.dedup();

        match winners.as_slice() {
            [idx] => Resolution::Resolved(&self.ships[*idx]),
            _ => Resolution::Ambiguous(winners.iter().map(|idx| &self.ships[*idx]).collect()),
        }
    }

    /// Resolve the ship named somewhere inside a longer piece of row text.
    ///
    /// Contiguous word windows are tried from widest to narrowest, left to
    /// right, and the first exact or normalized alias match wins. Failing that,
    /// coverage is scored over every window at once and ranked like a single
    /// token, so a short alias loosely covering the whole row never beats a
    /// window that names a ship outright.
    ///
    /// Windows are never wider than the widest alias plus one word, and windows
    /// too long to reach any alias are skipped, so the cost grows linearly with
    /// the length of the row.
    pub fn resolve_in_text(&self, text: &str, min_coverage: f64) -> Resolution<'_> {
        let words: Vec<&str> = text.split_whitespace().collect();
        let widest = words.len().min(self.max_words + 1);
        for size in (1..=widest).rev() {
            for window in words.windows(size) {
                let window = window.join(" ");
                if let Some(&idx) = self.exact.get(&exact_key(&window)) {
                    return Resolution::Resolved(&self.ships[idx]);
                }
                if let Some(&idx) = self.normalized.get(&normalize_ship_name(&window)) {
                    return Resolution::Resolved(&self.ships[idx]);
                }
            }
        }

        let row = normalize_ship_name(text);
        let row: Vec<&str> = row.split_whitespace().collect();
        let widest = row.len().min(self.max_words + 1);
        let longest = self.max_len + edit_budget(self.max_len, min_coverage);

        let mut scored = Vec::new();
        for size in 1..=widest {
            for window in row.windows(size) {
                let window = window.join(" ");
                let len = window.chars().count();
                if len > longest || !is_fuzzy_candidate(&window) {
                    continue;
                }
                self.score(&Phrase::new(&window), min_coverage, &mut scored);
            }
        }
        self.pick(&scored)
    }
}

/// Too short, or nothing but a type prefix.
fn is_fuzzy_candidate(normalized: &str) -> bool {
    normalized.chars().count() >= MIN_FUZZY_LEN && !SHIP_PREFIXES.contains(&normalized)
}
