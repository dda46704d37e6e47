//! Service summaries built from extraction results.

use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Diagnostic, DocumentResult, Interval};

/// Date layout used in text reports.
const DATE_FORMAT: &str = "%m/%d/%Y";

/// One interval with its day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodSummary {
    pub ship: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: i64,
}

impl From<&Interval> for PeriodSummary {
    fn from(interval: &Interval) -> Self {
        Self {
            ship: interval.ship.clone(),
            start: interval.start,
            end: interval.end,
            days: interval.days(),
        }
    }
}

/// Everything known about one sailor's sea service in a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SailorSummary {
    pub sailor: String,
    pub periods: Vec<PeriodSummary>,
    pub total_days: i64,
    /// Earliest start and latest end over all periods.
    pub documented_period: (NaiveDate, NaiveDate),
}

impl SailorSummary {
    /// Summarize non-empty intervals; `None` when there are none.
    pub fn new(sailor: impl Into<String>, intervals: &[Interval]) -> Option<Self> {
        let start = intervals.iter().map(|i| i.start).min()?;
        let end = intervals.iter().map(|i| i.end).max()?;
        let periods: Vec<PeriodSummary> = intervals.iter().map(PeriodSummary::from).collect();
        Some(Self {
            sailor: sailor.into(),
            total_days: periods.iter().map(|p| p.days).sum(),
            periods,
            documented_period: (start, end),
        })
    }
}

/// Summary of one processed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub source: String,
    pub sailors: Vec<SailorSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    pub fn new(source: impl Into<String>, result: &DocumentResult) -> Self {
        Self {
            source: source.into(),
            sailors: result
                .sailors
                .iter()
                .filter_map(|(sailor, intervals)| SailorSummary::new(sailor.as_str(), intervals))
                .collect(),
            diagnostics: result.diagnostics.clone(),
        }
    }

    /// Plain text rendering for terminals and review sheets.
    pub fn render_text(&self) -> String {
        let mut out = format!("== {} ==\n", self.source);

        if self.sailors.is_empty() {
            out.push_str("No sea service found.\n");
        }
        for sailor in &self.sailors {
            let (start, end) = sailor.documented_period;
            out.push_str(&format!(
                "{}\n  Period: {} to {}\n",
                sailor.sailor,
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            ));
            for period in &sailor.periods {
                out.push_str(&format!(
                    "  {} | {} to {} | {}\n",
                    period.ship,
                    period.start.format(DATE_FORMAT),
                    period.end.format(DATE_FORMAT),
                    plural_days(period.days)
                ));
            }
            out.push_str(&format!("  Total: {}\n", plural_days(sailor.total_days)));
        }

        if !self.diagnostics.is_empty() {
            out.push_str("Dropped:\n");
            for diagnostic in &self.diagnostics {
                let on = diagnostic
                    .date
                    .map(|date| format!(" on {}", date.format(DATE_FORMAT)))
                    .unwrap_or_default();
                out.push_str(&format!(
                    "  {} {}{} | {}\n",
                    diagnostic.at, diagnostic.reason, on, diagnostic.line
                ));
            }
        }
        out
    }
}

fn plural_days(days: i64) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{} days", days)
    }
}
