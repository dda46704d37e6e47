//! Noise symbol stripping and transliteration transforms.
//!
//! Scanned forms pick up table rules, bullets and speckles that OCR reads as
//! `|`, `~`, `°` and friends. None of them carry meaning in an event row.

use std::collections::HashSet;

use deunicode::deunicode;

use super::Transform;
use crate::engine::types::NormalizedLine;

/// Removes configured noise symbols and replaces control characters with a space.
///
/// Symbols are deleted outright, so `12:|30` becomes `12:30` and is caught by
/// the timestamp transform that runs afterwards.
#[derive(Debug, Clone)]
pub struct StripNoiseSymbols {
    symbols: HashSet<char>,
}

impl StripNoiseSymbols {
    pub fn new(symbols: impl IntoIterator<Item = char>) -> Self {
        Self {
            symbols: symbols.into_iter().collect(),
        }
    }
}

impl Transform for StripNoiseSymbols {
    fn transform(&self, lines: &mut [NormalizedLine]) {
        for line in lines.iter_mut() {
            if !line
                .text
                .chars()
                .any(|c| c.is_control() || self.symbols.contains(&c))
            {
                continue;
            }
            line.text = line
                .text
                .chars()
                .filter(|c| !self.symbols.contains(c))
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect();
        }
    }
}

/// Transliterates non-ASCII text (ligatures, smart quotes, dashes) to ASCII.
pub struct Transliterate;

impl Transform for Transliterate {
    fn transform(&self, lines: &mut [NormalizedLine]) {
        for line in lines.iter_mut() {
            if !line.text.is_ascii() {
                line.text = deunicode(&line.text);
            }
        }
    }
}
