//! Sea duty service record extraction.
//!
//! Rebuilds per-sailor, per-ship service intervals from OCR'd sea pay
//! certification sheets. The [`engine`] module holds the extraction pipeline;
//! [`ships`] holds the ship reference data it resolves names against.
//!
//! ```
//! use seapay::{Engine, EngineConfig, RawLine, ScanContext, ShipReference};
//!
//! let reference = ShipReference::from_names(["USS ABRAHAM LINCOLN"]).unwrap();
//! let engine = Engine::new(EngineConfig::default(), reference).unwrap();
//! let lines = RawLine::from_lines(["NAME: DOE, JOHN", "USS LINCOLN 01JAN24-05JAN24"]);
//!
//! let result = engine.process(&lines, ScanContext::default());
//! assert_eq!(result.sailors["DOE, JOHN"][0].days(), 5);
//! ```

pub mod cli;
pub mod config;
pub mod document;
pub mod engine;
pub mod logging;
pub mod report;
pub mod ships;

pub use config::Config;
pub use document::Document;
pub use engine::{
    DocumentResult, Engine, EngineConfig, Event, Interval, RawLine, ScanContext,
};
pub use report::DocumentReport;
pub use ships::{ShipIdentity, ShipReference};
