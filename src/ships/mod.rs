//! Ship reference data and ship name canonicalization.
//!
//! A [`ShipReference`] is loaded once per run and never mutated. Every alias,
//! once normalized, belongs to exactly one ship; construction fails otherwise.
//!
//! # Module Structure
//!
//! - [`error`] - Reference loading errors
//! - [`load`] - TOML and plain-text reference file parsing
//! - [`resolve`] - Raw token to canonical ship resolution

mod error;
mod load;
mod resolve;

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub use error::ReferenceError;
pub use resolve::{Coverage, Resolution, MIN_EDIT_LEN};

use resolve::Phrase;

/// Parenthesized remarks such as hull numbers: `(CVN 72)`.
static PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("valid parenthesis regex"));

/// Type prefixes that are not part of a ship's name.
const SHIP_PREFIXES: &[&str] = &["USS", "USNS"];

/// A canonical ship name and the spellings that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipIdentity {
    pub name: String,
    #[serde(default)]
    pub aliases: BTreeSet<String>,
}

impl ShipIdentity {
    /// Create an identity. The canonical name is always one of its aliases.
    pub fn new<I, S>(name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into().trim().to_uppercase();
        let mut set: BTreeSet<String> = aliases
            .into_iter()
            .map(|a| a.into().trim().to_uppercase())
            .filter(|a| !a.is_empty())
            .collect();
        set.insert(name.clone());
        Self { name, aliases: set }
    }
}

/// Normalize a ship name or token for comparison.
///
/// Upper-cases, drops parenthesized remarks, apostrophes and periods, turns
/// other punctuation into spaces, strips a leading `USS`/`USNS` and collapses
/// whitespace: `"U.S.S. O'Kane (DDG 77)"` and `"OKANE"` normalize alike.
pub fn normalize_ship_name(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let without_parens = PARENS.replace_all(&upper, " ");
    let cleaned: String = without_parens
        .chars()
        .filter(|c| *c != '\'' && *c != '.')
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut words: Vec<&str> = cleaned.split_whitespace().collect();
    if words.len() > 1 && SHIP_PREFIXES.contains(&words[0]) {
        words.remove(0);
    }
    words.join(" ")
}

/// Exact-match key: upper case with collapsed whitespace.
fn exact_key(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}

/// Immutable, validated set of ship identities.
#[derive(Debug, Clone)]
pub struct ShipReference {
    ships: Vec<ShipIdentity>,
    exact: HashMap<String, usize>,
    normalized: HashMap<String, usize>,
    /// Normalized aliases in a stable order, for fuzzy scans.
    keys: Vec<(Phrase, usize)>,
    /// Most words in any alias, raw or normalized.
    max_words: usize,
    /// Most characters in any normalized alias.
    max_len: usize,
}

impl ShipReference {
    /// Build a reference set, rejecting aliases claimed by two ships.
    ///
    /// Disjointness is checked on normalized aliases, so `USS BOXER` on one ship
    /// and `BOXER` on another is also rejected.
    pub fn new(ships: Vec<ShipIdentity>) -> Result<Self, ReferenceError> {
        let mut exact = HashMap::new();
        let mut normalized: HashMap<String, usize> = HashMap::new();
        let mut keys = Vec::new();
        let mut max_words = 0;

        for (index, ship) in ships.iter().enumerate() {
            if normalize_ship_name(&ship.name).is_empty() {
                return Err(ReferenceError::EmptyName { index });
            }
            for alias in &ship.aliases {
                let key = normalize_ship_name(alias);
                if key.is_empty() {
                    continue;
                }
                match normalized.get(&key) {
                    Some(&owner) if owner != index => {
                        return Err(ReferenceError::AmbiguousAlias {
                            alias: alias.clone(),
                            first: ships[owner].name.clone(),
                            second: ship.name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        normalized.insert(key.clone(), index);
                        let phrase = Phrase::new(&key);
                        max_words = max_words.max(phrase.word_count());
                        keys.push((phrase, index));
                    }
                }
                let raw = exact_key(alias);
                max_words = max_words.max(raw.split(' ').count());
                exact.insert(raw, index);
            }
        }

        let max_len = keys.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
        Ok(Self {
            ships,
            exact,
            normalized,
            keys,
            max_words,
            max_len,
        })
    }

    /// Reference set built from canonical names only.
    pub fn from_names<I, S>(names: I) -> Result<Self, ReferenceError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            names
                .into_iter()
                .map(|n| ShipIdentity::new(n, Vec::<String>::new()))
                .collect(),
        )
    }

    pub fn ships(&self) -> &[ShipIdentity] {
        &self.ships
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Number of distinct normalized aliases.
    pub fn alias_count(&self) -> usize {
        self.keys.len()
    }
}
