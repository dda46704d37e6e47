//! Date token recognition and parsing.
//!
//! Recognition (is this token shaped like a date?) and parsing (is it a real
//! calendar date?) are separate steps: a line with `32JAN24` is still an event
//! candidate, but extraction reports the token as unparseable instead of
//! silently dropping the line as noise.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Accepted date token layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateFormat {
    /// `01JAN24`
    #[serde(rename = "DDMMMYY")]
    DayMonYear,
    /// `01JAN2024`
    #[serde(rename = "DDMMMYYYY")]
    DayMonYearLong,
    /// `01/31/2024`
    #[serde(rename = "MM/DD/YYYY")]
    MonthDayYearLong,
    /// `01/31/24`
    #[serde(rename = "MM/DD/YY")]
    MonthDayYear,
    /// `01/31`, year taken from the document
    #[serde(rename = "MM/DD")]
    MonthDay,
}

impl DateFormat {
    /// Anchored pattern matching one whole token of this format.
    fn pattern(&self) -> &'static str {
        match self {
            Self::DayMonYear => r"^(\d{1,2})([A-Za-z]{3})(\d{2})$",
            Self::DayMonYearLong => r"^(\d{1,2})([A-Za-z]{3})(\d{4})$",
            Self::MonthDayYearLong => r"^(\d{1,2})/(\d{1,2})/(\d{4})$",
            Self::MonthDayYear => r"^(\d{1,2})/(\d{1,2})/(\d{2})$",
            Self::MonthDay => r"^(\d{1,2})/(\d{1,2})$",
        }
    }

    /// Unanchored shape used to find tokens inside a line.
    fn shape(&self) -> &'static str {
        match self {
            Self::DayMonYear => r"\d{1,2}[A-Za-z]{3}\d{2}",
            Self::DayMonYearLong => r"\d{1,2}[A-Za-z]{3}\d{4}",
            Self::MonthDayYearLong => r"\d{1,2}/\d{1,2}/\d{4}",
            Self::MonthDayYear => r"\d{1,2}/\d{1,2}/\d{2}",
            Self::MonthDay => r"\d{1,2}/\d{1,2}",
        }
    }

    /// Longer shapes first so `01/31/2024` is never found as `01/31`.
    fn specificity(&self) -> u8 {
        match self {
            Self::DayMonYearLong | Self::MonthDayYearLong => 0,
            Self::DayMonYear | Self::MonthDayYear => 1,
            Self::MonthDay => 2,
        }
    }

    fn build(&self, caps: &regex::Captures<'_>, default_year: Option<i32>) -> Option<NaiveDate> {
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        match self {
            Self::DayMonYear | Self::DayMonYearLong => {
                let day = num(1)?;
                let month = Month::from_str(caps.get(2)?.as_str()).ok()?;
                let year = expand_year(num(3)?);
                NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
            }
            Self::MonthDayYearLong | Self::MonthDayYear => {
                let year = expand_year(num(3)?);
                NaiveDate::from_ymd_opt(year, num(1)?, num(2)?)
            }
            Self::MonthDay => NaiveDate::from_ymd_opt(default_year?, num(1)?, num(2)?),
        }
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DayMonYear => "DDMMMYY",
            Self::DayMonYearLong => "DDMMMYYYY",
            Self::MonthDayYearLong => "MM/DD/YYYY",
            Self::MonthDayYear => "MM/DD/YY",
            Self::MonthDay => "MM/DD",
        };
        f.write_str(name)
    }
}

/// Two-digit years belong to this century.
fn expand_year(raw: u32) -> i32 {
    if raw < 100 {
        2000 + raw as i32
    } else {
        raw as i32
    }
}

/// Finds and parses date tokens for a configured list of formats.
#[derive(Debug, Clone)]
pub struct DateMatcher {
    finder: Regex,
    formats: Vec<(DateFormat, Regex)>,
}

impl DateMatcher {
    /// Build a matcher for the given formats (parse order is preserved).
    pub fn new(formats: &[DateFormat]) -> Self {
        let mut shapes: Vec<DateFormat> = formats.to_vec();
        shapes.sort_by_key(|f| f.specificity());
        shapes.dedup();

        let alternation = shapes
            .iter()
            .map(|f| format!(r"\b{}\b", f.shape()))
            .collect::<Vec<_>>()
            .join("|");
        // Shapes and patterns are fixed strings, so compilation cannot fail.
        let finder = Regex::new(&alternation).expect("date shapes are valid regex");
        let formats = formats
            .iter()
            .map(|f| (*f, Regex::new(f.pattern()).expect("date patterns are valid regex")))
            .collect();

        Self { finder, formats }
    }

    /// Date-shaped tokens in `text`, with their byte spans, in order.
    pub fn find<'t>(&self, text: &'t str) -> Vec<(std::ops::Range<usize>, &'t str)> {
        self.finder
            .find_iter(text)
            .map(|m| (m.range(), m.as_str()))
            .collect()
    }

    pub fn contains_date(&self, text: &str) -> bool {
        self.finder.is_match(text)
    }

    /// Parse a token with the first format that yields a valid calendar date.
    pub fn parse(&self, token: &str, default_year: Option<i32>) -> Option<NaiveDate> {
        self.formats.iter().find_map(|(format, pattern)| {
            pattern
                .captures(token)
                .and_then(|caps| format.build(&caps, default_year))
        })
    }
}

impl Default for DateMatcher {
    fn default() -> Self {
        Self::new(&crate::engine::EngineConfig::default().date_formats)
    }
}
