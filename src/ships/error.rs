//! Ship reference errors.

use std::path::PathBuf;

/// Errors that can occur while loading ship reference data.
///
/// All of them abort a run before any line is processed: a reference set that
/// could attribute one alias to two ships would silently misattribute service.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Ship entry {index} has an empty name")]
    EmptyName { index: usize },

    #[error("Failed to read ship reference {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid ship reference {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
