//! Candidate building and event extraction.

use std::collections::HashSet;

use chrono::NaiveDate;

use super::config::EngineConfig;
use super::dates::DateMatcher;
use super::sailor::{sailor_key, split_inline_name};
use super::types::{CandidateEvent, DiagnosticReason, Event, NormalizedLine};
use crate::ships::{Resolution, ShipReference};

/// Words joining the two ends of a date range.
const CONNECTORS: &[&str] = &["TO", "THRU", "THROUGH", "FROM", "TIL", "UNTIL"];

/// State carried down the document while scanning lines.
///
/// `sailor` is the most recently seen sailor header (or the caller's starting
/// value); `year` fills in dates written without one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanContext {
    pub sailor: Option<String>,
    pub year: Option<i32>,
}

impl ScanContext {
    pub fn new(sailor: Option<&str>, year: Option<i32>) -> Self {
        Self {
            sailor: sailor.map(sailor_key),
            year,
        }
    }

    pub fn with_sailor(mut self, sailor: &str) -> Self {
        self.sailor = Some(sailor_key(sailor));
        self
    }
}

/// Turns candidate lines into single-day events.
#[derive(Debug, Clone)]
pub struct Extractor {
    dates: DateMatcher,
    mission_tags: HashSet<String>,
    default_year: Option<i32>,
    min_coverage: f64,
}

impl Extractor {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            dates: DateMatcher::new(&config.date_formats),
            mission_tags: config
                .mission_tags
                .iter()
                .map(|tag| tag.to_uppercase())
                .collect(),
            default_year: config.default_year,
            min_coverage: config.min_ship_coverage,
        }
    }

    /// Split an event-bearing line into sailor, ship token and date tokens.
    pub fn candidate(&self, line: &NormalizedLine) -> CandidateEvent {
        let (sailor, text) = match split_inline_name(&line.text) {
            Some((name, rest)) => (name, rest),
            None => (String::new(), line.text.as_str()),
        };

        let spans = self.dates.find(text);
        if spans.len() > 2 {
            tracing::debug!(at = %line.at, count = spans.len(), "Extra date tokens ignored");
        }
        let date_tokens: Vec<String> = spans
            .iter()
            .take(2)
            .map(|(_, token)| token.to_string())
            .collect();

        let mut rest = String::with_capacity(text.len());
        let mut cursor = 0;
        for (range, _) in &spans {
            rest.push_str(&text[cursor..range.start]);
            rest.push(' ');
            cursor = range.end;
        }
        rest.push_str(&text[cursor..]);

        let mut mission = false;
        let mut ship_words = Vec::new();
        for word in rest.split_whitespace() {
            let bare = word
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_uppercase();
            if bare.is_empty() || CONNECTORS.contains(&bare.as_str()) {
                continue;
            }
            if self.mission_tags.contains(&bare) {
                mission = true;
                continue;
            }
            ship_words.push(word);
        }

        CandidateEvent {
            at: line.at,
            sailor,
            ship_token: ship_words.join(" "),
            date_tokens,
            mission,
        }
    }

    /// Resolve a candidate into one event per day of service.
    ///
    /// Checks run in order: ship, dates, sailor. The first failure is returned
    /// as the reason the line was dropped.
    pub fn extract(
        &self,
        candidate: &CandidateEvent,
        reference: &ShipReference,
        ctx: &ScanContext,
    ) -> Result<Vec<Event>, DiagnosticReason> {
        let ship = match reference.resolve_in_text(&candidate.ship_token, self.min_coverage) {
            Resolution::Resolved(ship) => ship,
            Resolution::Unresolved => {
                return Err(DiagnosticReason::UnresolvedShip {
                    token: candidate.ship_token.clone(),
                })
            }
            Resolution::Ambiguous(ships) => {
                return Err(DiagnosticReason::AmbiguousShip {
                    token: candidate.ship_token.clone(),
                    candidates: ships.iter().map(|s| s.name.clone()).collect(),
                })
            }
        };

        let dates = self.parse_dates(&candidate.date_tokens, ctx.year)?;

        let sailor = if candidate.sailor.is_empty() {
            ctx.sailor
                .as_deref()
                .map(sailor_key)
                .ok_or(DiagnosticReason::MissingSailor)?
        } else {
            sailor_key(&candidate.sailor)
        };

        Ok(dates
            .into_iter()
            .map(|date| Event {
                sailor: sailor.clone(),
                ship: ship.name.clone(),
                date,
                at: candidate.at,
                mission: candidate.mission,
            })
            .collect())
    }

    /// Every day named by one or two date tokens.
    ///
    /// A reversed range is never swapped: which end is wrong cannot be told.
    pub fn parse_dates(
        &self,
        tokens: &[String],
        year: Option<i32>,
    ) -> Result<Vec<NaiveDate>, DiagnosticReason> {
        let year = year.or(self.default_year);
        let parsed = tokens
            .iter()
            .map(|token| {
                self.dates
                    .parse(token, year)
                    .ok_or_else(|| DiagnosticReason::UnparseableDate {
                        token: token.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        match parsed.as_slice() {
            [] => Err(DiagnosticReason::UnparseableDate {
                token: String::new(),
            }),
            [day] => Ok(vec![*day]),
            [start, end, ..] if start > end => Err(DiagnosticReason::InvalidRange {
                start: *start,
                end: *end,
            }),
            [start, end, ..] => Ok(start.iter_days().take_while(|d| d <= end).collect()),
        }
    }

    /// Dates on any line, for rows that are not events themselves.
    pub fn dates_in(&self, text: &str, year: Option<i32>) -> Vec<NaiveDate> {
        let tokens: Vec<String> = self
            .dates
            .find(text)
            .into_iter()
            .take(2)
            .map(|(_, token)| token.to_string())
            .collect();
        self.parse_dates(&tokens, year).unwrap_or_default()
    }
}
