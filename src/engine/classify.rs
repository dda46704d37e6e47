//! Event line classification.

use regex::Regex;

use super::config::{compile_pattern, ConfigError, EngineConfig};
use super::dates::DateMatcher;
use super::types::{LineClass, NormalizedLine};

/// Shortest word that can count as a ship-name fragment.
const MIN_FRAGMENT_LEN: usize = 3;

/// Decides whether a normalized line describes a service event.
///
/// **Rules** (first match wins):
/// 1. Empty line: noise
/// 2. Line matches a denylist pattern: noise
/// 3. Line has a date token and a word of at least three characters, outside
///    any date token, containing a letter: event candidate
/// 4. Anything else: noise
///
/// Rule 3 asks for a letter rather than just "not purely numeric", so hull
/// numbers and page counters alone never make a line an event.
#[derive(Debug, Clone)]
pub struct Classifier {
    denylist: Vec<Regex>,
    dates: DateMatcher,
}

impl Classifier {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let denylist = config
            .denylist
            .iter()
            .map(|pattern| compile_pattern("denylist", pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            denylist,
            dates: DateMatcher::new(&config.date_formats),
        })
    }

    pub fn classify(&self, line: &NormalizedLine) -> LineClass {
        self.classify_text(&line.text)
    }

    pub fn classify_text(&self, text: &str) -> LineClass {
        if text.trim().is_empty() {
            return LineClass::Noise;
        }
        if self.is_denied(text) {
            return LineClass::Noise;
        }

        let spans = self.dates.find(text);
        if spans.is_empty() {
            return LineClass::Noise;
        }

        let mut rest = String::with_capacity(text.len());
        let mut cursor = 0;
        for (range, _) in &spans {
            rest.push_str(&text[cursor..range.start]);
            rest.push(' ');
            cursor = range.end;
        }
        rest.push_str(&text[cursor..]);

        let has_fragment = rest.split_whitespace().any(|word| {
            word.chars().count() >= MIN_FRAGMENT_LEN && word.chars().any(char::is_alphabetic)
        });

        if has_fragment {
            LineClass::EventCandidate
        } else {
            LineClass::Noise
        }
    }

    /// Whether any denylist pattern matches.
    pub fn is_denied(&self, text: &str) -> bool {
        self.denylist.iter().any(|pattern| pattern.is_match(text))
    }
}
