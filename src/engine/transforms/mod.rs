//! Line cleaning transforms.
//!
//! Each transform rewrites line text in place. The [`LineNormalizer`] runs them
//! in a fixed order, so that stripping one kind of noise can never expose
//! another kind that has already been handled.

mod symbols;
mod timestamps;
mod whitespace;

pub use symbols::{StripNoiseSymbols, Transliterate};
pub use timestamps::StripTimestamps;
pub use whitespace::NormalizeWhitespace;

use super::config::{compile_pattern, ConfigError, EngineConfig};
use super::types::{NormalizedLine, RawLine};

/// A single cleaning step over normalized lines.
pub trait Transform: Send + Sync {
    fn transform(&self, lines: &mut [NormalizedLine]);
}

/// Runs the configured transforms over raw lines.
///
/// Order: noise symbols, transliteration, noise symbols again (for any symbol
/// produced by transliteration), timestamps, whitespace.
pub struct LineNormalizer {
    transforms: Vec<Box<dyn Transform>>,
}

impl LineNormalizer {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        let timestamp = compile_pattern("timestamp", &config.timestamp_pattern)?;
        let symbols = StripNoiseSymbols::new(config.noise_symbols.chars());

        let mut transforms: Vec<Box<dyn Transform>> = vec![Box::new(symbols.clone())];
        if config.transliterate {
            transforms.push(Box::new(Transliterate));
            transforms.push(Box::new(symbols));
        }
        transforms.push(Box::new(StripTimestamps::new(timestamp)));
        transforms.push(Box::new(NormalizeWhitespace));

        Ok(Self { transforms })
    }

    /// Normalize every line. Never fails; lines may come out empty.
    pub fn normalize(&self, lines: &[RawLine]) -> Vec<NormalizedLine> {
        let mut normalized: Vec<NormalizedLine> = lines
            .iter()
            .map(|raw| NormalizedLine {
                at: raw.at,
                text: raw.text.clone(),
            })
            .collect();

        for transform in &self.transforms {
            transform.transform(&mut normalized);
        }
        normalized
    }

    /// Normalize a single piece of text.
    pub fn normalize_text(&self, text: &str) -> String {
        let raw = RawLine::new(1, 1, text);
        self.normalize(std::slice::from_ref(&raw))
            .pop()
            .map(|line| line.text)
            .unwrap_or_default()
    }
}
