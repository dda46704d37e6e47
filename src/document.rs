//! Extracted document text on disk.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

use crate::engine::RawLine;

/// Four-digit year embedded in a file name, e.g. `cert_2024_doe.txt`.
static FILE_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|[^0-9])(20\d{2})(?:[^0-9]|$)").expect("valid year regex"));

/// Text of one certification sheet, split into page/line references.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: String,
    pub lines: Vec<RawLine>,
    /// Year inferred from the file name, for dates written without one.
    pub year: Option<i32>,
}

impl Document {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        // OCR output is not always valid UTF-8.
        let text = String::from_utf8_lossy(&bytes);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_text(name, &text))
    }

    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        let source = source.into();
        Self {
            year: year_from_name(&source),
            lines: RawLine::from_document(text),
            source,
        }
    }
}

/// First standalone `20xx` group in a file name.
pub fn year_from_name(name: &str) -> Option<i32> {
    FILE_YEAR
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
