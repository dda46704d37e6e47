//! Configuration for the extraction engine.

use serde::{Deserialize, Serialize};

use super::dates::DateFormat;

/// Minimum allowed merge gap. A gap of one day means strictly contiguous.
const MIN_MERGE_GAP_DAYS: u32 = 1;

/// Errors raised while compiling an [`EngineConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {name} pattern '{pattern}': {source}")]
    InvalidPattern {
        name: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Minimum ship coverage must be within (0, 1], got {0}")]
    InvalidCoverage(f64),

    #[error("At least one date format must be configured")]
    NoDateFormats,
}

/// Configuration for the extraction engine.
///
/// All patterns are regular expressions matched case-insensitively against
/// normalized line text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Characters stripped from every line (control characters always are)
    pub noise_symbols: String,
    /// Transliterate non-ASCII OCR output (ligatures, smart quotes) to ASCII
    pub transliterate: bool,
    /// Clock times removed from every line
    pub timestamp_pattern: String,
    /// Lines matching any of these are administrative noise
    pub denylist: Vec<String>,
    /// In-port training labels, most specific first
    pub inport_labels: Vec<String>,
    /// In-port labels reported with the ship named on the row (`CHOSIN SBTT`)
    pub inport_ship_labels: Vec<String>,
    /// Drop ship events on days with in-port training
    pub suppress_inport_days: bool,
    /// Tags marking a mission row, preferred when a day has several ships
    pub mission_tags: Vec<String>,
    /// Keep only one ship per sailor and day
    pub resolve_same_day_conflicts: bool,
    /// Accepted date formats, tried in order
    pub date_formats: Vec<DateFormat>,
    /// Year for dates written without one (MM/DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_year: Option<i32>,
    /// Largest gap (days) between two dates still merged into one interval
    pub merge_gap_days: u32,
    /// Fraction of the shorter string a fuzzy ship match must cover
    pub min_ship_coverage: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            noise_symbols: "|~*#^_`{}[]<>\\©®°¦§¶•·«»¬".to_string(),
            transliterate: true,
            timestamp_pattern: r"\b(?:[01]?\d|2[0-3]):[0-5]\d(?::[0-5]\d)?(?:\s*[AP]\.?M\b\.?)?"
                .to_string(),
            denylist: vec![
                r"\bMITE\b".to_string(),
                r"\bSBTT\b".to_string(),
                r"^(?:DATE|DAY)\b.*\b(?:SHIP|PLATFORM|EVENT|UNIT)\b".to_string(),
                r"\bPAGE\s+\d+\s+OF\s+\d+\b".to_string(),
                r"\bSEA\s+(?:PAY|DUTY)\s+CERTIFICATION\b".to_string(),
                r"\bCERTIFYING\s+OFFICER\b".to_string(),
                r"\bSIGNATURE\b".to_string(),
                r"\bTOTAL\s+DAYS\b".to_string(),
            ],
            inport_labels: vec![
                "ASW MITE".to_string(),
                "ASTAC MITE".to_string(),
                "SBTT".to_string(),
                "MITE".to_string(),
            ],
            inport_ship_labels: vec!["SBTT".to_string()],
            suppress_inport_days: true,
            mission_tags: vec![
                "M1".to_string(),
                "M-1".to_string(),
                "M2".to_string(),
                "M-2".to_string(),
            ],
            resolve_same_day_conflicts: true,
            date_formats: vec![
                DateFormat::DayMonYear,
                DateFormat::DayMonYearLong,
                DateFormat::MonthDayYearLong,
                DateFormat::MonthDayYear,
                DateFormat::MonthDay,
            ],
            default_year: None,
            merge_gap_days: MIN_MERGE_GAP_DAYS,
            min_ship_coverage: 0.7,
        }
    }
}

impl EngineConfig {
    /// Effective merge gap, never below one day.
    pub fn merge_gap(&self) -> u32 {
        self.merge_gap_days.max(MIN_MERGE_GAP_DAYS)
    }

    /// Check values that cannot be expressed in the type system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_ship_coverage > 0.0 && self.min_ship_coverage <= 1.0) {
            return Err(ConfigError::InvalidCoverage(self.min_ship_coverage));
        }
        if self.date_formats.is_empty() {
            return Err(ConfigError::NoDateFormats);
        }
        Ok(())
    }
}

/// Compile a case-insensitive pattern, naming the config field on failure.
pub(crate) fn compile_pattern(name: &'static str, pattern: &str) -> Result<regex::Regex, ConfigError> {
    regex::RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| ConfigError::InvalidPattern {
            name,
            pattern: pattern.to_string(),
            source,
        })
}
