//! Service record extraction engine.
//!
//! Turns OCR text of a sea duty certification sheet into validated
//! `(ship, start, end)` intervals per sailor, plus a diagnostics list for every
//! line or day that could not be used.
//!
//! # Pipeline
//!
//! 1. [`LineNormalizer`] strips timestamps, stray symbols and extra spacing
//! 2. [`Classifier`] separates event rows from administrative noise
//! 3. [`ShipReference::resolve_in_text`] maps ship tokens to canonical ships
//! 4. [`Extractor`] parses dates and expands ranges to single-day events
//! 5. [`group`] merges each ship's days into intervals
//! 6. [`aggregate`] partitions by sailor and groups each partition
//!
//! Every stage is a pure function of its input. An [`Engine`] is immutable once
//! built and can be shared across threads to process documents in parallel.
//!
//! # Module Structure
//!
//! - [`config`] - Engine configuration
//! - [`types`] - Data structures flowing through the pipeline
//! - [`transforms`] - Line cleaning transforms
//! - [`classify`] - Event line classification
//! - [`dates`] - Date token recognition and parsing
//! - [`sailor`] - Sailor name detection
//! - [`extract`] - Candidate building and event extraction
//! - [`group`] - Interval grouping
//! - [`aggregate`] - Per-sailor aggregation and the document scan

mod aggregate;
mod classify;
mod config;
mod dates;
mod extract;
mod group;
mod sailor;
mod transforms;
mod types;

use regex::Regex;

pub use aggregate::{aggregate, DocumentResult, SailorIntervals};
pub use classify::Classifier;
pub use config::{ConfigError, EngineConfig};
pub use dates::{DateFormat, DateMatcher};
pub use extract::{Extractor, ScanContext};
pub use group::group;
pub use sailor::{canonical_name, header_name, sailor_key};
pub use transforms::{LineNormalizer, Transform};
pub use types::{
    CandidateEvent, Diagnostic, DiagnosticReason, Event, Interval, LineClass, LineRef,
    NormalizedLine, RawLine,
};

use crate::ships::ShipReference;

/// A configured pipeline bound to one ship reference snapshot.
pub struct Engine {
    config: EngineConfig,
    normalizer: LineNormalizer,
    classifier: Classifier,
    extractor: Extractor,
    in_port: Vec<(String, Regex)>,
    reference: ShipReference,
}

impl Engine {
    /// Compile the configuration. Invalid patterns or values are reported
    /// here, before any document is read.
    pub fn new(config: EngineConfig, reference: ShipReference) -> Result<Self, ConfigError> {
        config.validate()?;

        let in_port = config
            .inport_labels
            .iter()
            .map(|label| {
                let words: Vec<String> = label.split_whitespace().map(regex::escape).collect();
                let pattern = format!(r"\b{}\b", words.join(r"\s+"));
                config::compile_pattern("inport_labels", &pattern)
                    .map(|regex| (label.to_uppercase(), regex))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            normalizer: LineNormalizer::new(&config)?,
            classifier: Classifier::new(&config)?,
            extractor: Extractor::new(&config),
            in_port,
            reference,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn reference(&self) -> &ShipReference {
        &self.reference
    }

    pub fn normalizer(&self) -> &LineNormalizer {
        &self.normalizer
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_configuration() {
        let config = EngineConfig {
            denylist: vec!["(".to_string()],
            ..EngineConfig::default()
        };
        let reference = ShipReference::from_names(["USS BOXER"]).unwrap();
        assert!(matches!(
            Engine::new(config, reference),
            Err(ConfigError::InvalidPattern { name: "denylist", .. })
        ));
    }

    fn label(engine: &Engine, text: &str) -> Option<String> {
        engine.in_port_label(&NormalizedLine {
            at: LineRef::new(1, 1),
            text: text.to_string(),
        })
    }

    #[test]
    fn in_port_labels_tolerate_spacing() {
        let reference = ShipReference::from_names(["USS BOXER"]).unwrap();
        let engine = Engine::new(EngineConfig::default(), reference).unwrap();
        assert_eq!(label(&engine, "astac   mite 01JAN24").as_deref(), Some("ASTAC MITE"));
        assert_eq!(label(&engine, "USS BOXER 01JAN24"), None);
    }

    #[test]
    fn sbtt_label_names_the_ship_on_the_row() {
        let reference = ShipReference::from_names(["USS BOXER", "USS CHOSIN"]).unwrap();
        let engine = Engine::new(EngineConfig::default(), reference).unwrap();
        assert_eq!(label(&engine, "USS CHOSIN SBTT 01JAN24").as_deref(), Some("CHOSIN SBTT"));
        assert_eq!(label(&engine, "SBTT 01JAN24").as_deref(), Some("SBTT"));
        assert_eq!(label(&engine, "ASW MITE USS BOXER 01JAN24").as_deref(), Some("ASW MITE"));
    }

    #[test]
    fn ship_scoped_labels_are_configurable() {
        let config = EngineConfig {
            inport_ship_labels: Vec::new(),
            ..EngineConfig::default()
        };
        let reference = ShipReference::from_names(["USS CHOSIN"]).unwrap();
        let engine = Engine::new(config, reference).unwrap();
        assert_eq!(label(&engine, "USS CHOSIN SBTT 01JAN24").as_deref(), Some("SBTT"));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<Engine>();
    }
}
