//! Reference file parsing.
//!
//! Two layouts are accepted, chosen by file extension:
//!
//! ```toml
//! [[ship]]
//! name = "USS ABRAHAM LINCOLN"
//! aliases = ["CVN 72", "LINCOLN"]
//! ```
//!
//! or plain text, one ship per line with `|`-separated aliases:
//!
//! ```text
//! # comment
//! USS ABRAHAM LINCOLN | CVN 72 | LINCOLN
//! USS BOXER
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ReferenceError, ShipIdentity, ShipReference};

/// Ship list compiled into the binary, used when no reference file is given.
const BUILTIN: &str = include_str!("builtin.txt");

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    #[serde(rename = "ship", default)]
    ships: Vec<ShipIdentity>,
}

impl ShipReference {
    /// Load and validate a reference file.
    pub fn load(path: &Path) -> Result<Self, ReferenceError> {
        let content = fs::read_to_string(path).map_err(|source| ReferenceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let ships = if is_toml {
            parse_toml(&content, path)?
        } else {
            parse_text(&content)
        };
        tracing::debug!(path = %path.display(), ships = ships.len(), "Loaded ship reference");
        Self::new(ships)
    }

    /// The built-in ship list.
    pub fn builtin() -> Result<Self, ReferenceError> {
        Self::new(parse_text(BUILTIN))
    }
}

fn parse_toml(content: &str, path: &Path) -> Result<Vec<ShipIdentity>, ReferenceError> {
    let file: ReferenceFile = toml::from_str(content).map_err(|e| ReferenceError::Parse {
        path: path.to_path_buf(),
        message: e.message().to_string(),
    })?;
    // Re-run the constructor so the canonical name is always an alias.
    Ok(file
        .ships
        .into_iter()
        .map(|ship| ShipIdentity::new(ship.name, ship.aliases))
        .collect())
}

fn parse_text(content: &str) -> Vec<ShipIdentity> {
    content
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default().trim())
        .filter(|line| !line.is_empty())
        .map(|line| {
            let mut fields = line.split('|').map(str::trim);
            let name = fields.next().unwrap_or_default();
            ShipIdentity::new(name, fields)
        })
        .collect()
}
