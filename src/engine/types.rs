//! Data structures flowing through the extraction pipeline.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

/// Position of a line in the source document (1-based page and line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LineRef {
    pub page: usize,
    pub line: usize,
}

impl LineRef {
    pub fn new(page: usize, line: usize) -> Self {
        Self { page, line }
    }
}

impl fmt::Display for LineRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}:l{}", self.page, self.line)
    }
}

/// One line of extracted document text, as produced by the OCR collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub at: LineRef,
    pub text: String,
}

impl RawLine {
    pub fn new(page: usize, line: usize, text: impl Into<String>) -> Self {
        Self {
            at: LineRef::new(page, line),
            text: text.into(),
        }
    }

    /// Split extracted document text into lines.
    ///
    /// Pages are separated by form feed (`\x0c`), the convention used by
    /// `pdftotext` and most OCR exporters. Line numbers restart on each page.
    pub fn from_document(text: &str) -> Vec<RawLine> {
        text.split('\x0c')
            .enumerate()
            .flat_map(|(page_idx, page)| {
                page.lines()
                    .enumerate()
                    .map(move |(line_idx, line)| RawLine::new(page_idx + 1, line_idx + 1, line))
            })
            .collect()
    }

    /// Build lines for a single-page document from a list of strings.
    pub fn from_lines<I, S>(lines: I) -> Vec<RawLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(idx, text)| RawLine::new(1, idx + 1, text))
            .collect()
    }
}

/// Line text with noise removed. May be empty; empty lines keep their slot so
/// that references stay aligned with the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedLine {
    pub at: LineRef,
    pub text: String,
}

impl NormalizedLine {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Classifier verdict for a normalized line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    EventCandidate,
    Noise,
}

/// An event-bearing line, split into its parts but not yet resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEvent {
    pub at: LineRef,
    /// Sailor named on the line itself; empty when the line relies on context.
    pub sailor: String,
    pub ship_token: String,
    /// One or two date tokens, in line order.
    pub date_tokens: Vec<String>,
    /// Line carries a mission tag (M1/M2), used to break same-day conflicts.
    pub mission: bool,
}

/// A single day of service aboard a canonical ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub sailor: String,
    pub ship: String,
    pub date: NaiveDate,
    pub at: LineRef,
    #[serde(skip)]
    pub mission: bool,
}

/// A contiguous (or near-contiguous) stretch of service aboard one ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub ship: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Interval {
    pub fn new(ship: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        debug_assert!(start <= end);
        Self {
            ship: ship.into(),
            start,
            end,
        }
    }

    /// Number of calendar days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Every calendar day in the interval.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Why a line (or one day of it) was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum DiagnosticReason {
    UnresolvedShip { token: String },
    /// Several ships matched equally well; needs manual review.
    AmbiguousShip { token: String, candidates: Vec<String> },
    UnparseableDate { token: String },
    InvalidRange { start: NaiveDate, end: NaiveDate },
    MissingSailor,
    /// Another ship was kept for the same sailor and day.
    DuplicateDate { ship: String, kept: String },
    /// The day is an in-port shore-side training day.
    SuppressedInPort { ship: String, label: String },
}

impl DiagnosticReason {
    /// Short, stable reason code for operator review.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnresolvedShip { .. } => "unresolved ship",
            Self::AmbiguousShip { .. } => "ambiguous ship",
            Self::UnparseableDate { .. } => "unparseable date",
            Self::InvalidRange { .. } => "invalid range",
            Self::MissingSailor => "missing sailor",
            Self::DuplicateDate { .. } => "duplicate date",
            Self::SuppressedInPort { .. } => "in-port training day",
        }
    }
}

impl fmt::Display for DiagnosticReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedShip { token } => write!(f, "{}: '{}'", self.code(), token),
            Self::AmbiguousShip { token, candidates } => {
                write!(f, "{}: '{}' ({})", self.code(), token, candidates.join(", "))
            }
            Self::UnparseableDate { token } => write!(f, "{}: '{}'", self.code(), token),
            Self::InvalidRange { start, end } => {
                write!(f, "{}: {} after {}", self.code(), start, end)
            }
            Self::MissingSailor => write!(f, "{}", self.code()),
            Self::DuplicateDate { ship, kept } => {
                write!(f, "{}: {} dropped, {} kept", self.code(), ship, kept)
            }
            Self::SuppressedInPort { ship, label } => {
                write!(f, "{}: {} suppressed by {}", self.code(), ship, label)
            }
        }
    }
}

/// A dropped or unresolved line, reported alongside the intervals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub at: LineRef,
    pub line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sailor: Option<String>,
    /// Set when the diagnostic concerns one day of a line rather than the whole line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub reason: DiagnosticReason,
}

impl Diagnostic {
    pub fn new(at: LineRef, line: impl Into<String>, reason: DiagnosticReason) -> Self {
        Self {
            at,
            line: line.into(),
            sailor: None,
            date: None,
            reason,
        }
    }

    pub fn with_sailor(mut self, sailor: Option<String>) -> Self {
        self.sailor = sailor;
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
