//! Per-sailor aggregation and the document scan.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use super::extract::ScanContext;
use super::group::group;
use super::sailor::{header_name, sailor_key, split_inline_name};
use super::types::{
    Diagnostic, DiagnosticReason, Event, Interval, LineClass, LineRef, NormalizedLine, RawLine,
};
use super::Engine;
use crate::ships::normalize_ship_name;

/// Intervals keyed by canonical sailor name.
pub type SailorIntervals = BTreeMap<String, Vec<Interval>>;

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentResult {
    pub sailors: SailorIntervals,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentResult {
    /// Number of events dropped for any reason.
    pub fn dropped(&self) -> usize {
        self.diagnostics.len()
    }
}

/// Group events per sailor.
///
/// Sailors are keyed by their case and whitespace normalized name. A sailor
/// with no events is absent from the result, never present with an empty list.
pub fn aggregate(events: &[Event], merge_gap: u32) -> SailorIntervals {
    let mut by_sailor: BTreeMap<String, Vec<Event>> = BTreeMap::new();
    for event in events {
        by_sailor
            .entry(sailor_key(&event.sailor))
            .or_default()
            .push(event.clone());
    }

    by_sailor
        .into_iter()
        .map(|(sailor, events)| (sailor, group(&events, merge_gap)))
        .collect()
}

/// Shore-side training day recorded for a sailor.
#[derive(Debug, Clone)]
struct InPortDay {
    label: String,
    at: LineRef,
}

impl Engine {
    /// Run the full pipeline over one document.
    ///
    /// `ctx` is the starting state of the scan; a `NAME:` header line replaces
    /// its sailor for every following line. Never fails: every dropped line
    /// or day is reported in [`DocumentResult::diagnostics`].
    pub fn process(&self, lines: &[RawLine], ctx: ScanContext) -> DocumentResult {
        let normalized = self.normalizer.normalize(lines);
        let texts: HashMap<LineRef, &str> = normalized
            .iter()
            .map(|line| (line.at, line.text.as_str()))
            .collect();

        let mut ctx = ctx;
        let mut events = Vec::new();
        let mut diagnostics = Vec::new();
        let mut in_port: HashMap<(String, NaiveDate), InPortDay> = HashMap::new();

        for line in &normalized {
            if line.is_empty() {
                continue;
            }
            if let Some(name) = header_name(&line.text) {
                tracing::debug!(at = %line.at, sailor = %name, "Sailor header");
                ctx.sailor = Some(name);
                continue;
            }

            if let Some(label) = self.in_port_label(line) {
                let sailor = split_inline_name(&line.text)
                    .map(|(name, _)| name)
                    .or_else(|| ctx.sailor.as_deref().map(sailor_key));
                if let Some(sailor) = sailor {
                    for date in self.extractor.dates_in(&line.text, ctx.year) {
                        in_port.entry((sailor.clone(), date)).or_insert(InPortDay {
                            label: label.clone(),
                            at: line.at,
                        });
                    }
                }
            }

            if self.classifier.classify(line) == LineClass::Noise {
                tracing::trace!(at = %line.at, "Noise line");
                continue;
            }

            let candidate = self.extractor.candidate(line);
            match self.extractor.extract(&candidate, &self.reference, &ctx) {
                Ok(found) => events.extend(found),
                Err(reason) => {
                    if let DiagnosticReason::AmbiguousShip { token, candidates } = &reason {
                        tracing::warn!(
                            at = %line.at,
                            token = %token,
                            candidates = %candidates.join(", "),
                            "Ambiguous ship name"
                        );
                    } else {
                        tracing::debug!(at = %line.at, reason = %reason, "Line dropped");
                    }
                    let sailor = if candidate.sailor.is_empty() {
                        ctx.sailor.clone()
                    } else {
                        Some(candidate.sailor.clone())
                    };
                    diagnostics.push(
                        Diagnostic::new(line.at, line.text.clone(), reason).with_sailor(sailor),
                    );
                }
            }
        }

        if self.config.suppress_inport_days && !in_port.is_empty() {
            events.retain(|event| {
                let Some(day) = in_port.get(&(event.sailor.clone(), event.date)) else {
                    return true;
                };
                tracing::debug!(
                    at = %event.at,
                    training = %day.at,
                    date = %event.date,
                    "In-port training day"
                );
                diagnostics.push(
                    Diagnostic::new(
                        event.at,
                        texts.get(&event.at).copied().unwrap_or_default(),
                        DiagnosticReason::SuppressedInPort {
                            ship: event.ship.clone(),
                            label: day.label.clone(),
                        },
                    )
                    .with_sailor(Some(event.sailor.clone()))
                    .with_date(event.date),
                );
                false
            });
        }

        if self.config.resolve_same_day_conflicts {
            let dropped = resolve_same_day_conflicts(&mut events);
            diagnostics.extend(dropped.into_iter().map(|(event, kept)| {
                tracing::debug!(at = %event.at, date = %event.date, kept = %kept, "Duplicate date");
                Diagnostic::new(
                    event.at,
                    texts.get(&event.at).copied().unwrap_or_default(),
                    DiagnosticReason::DuplicateDate {
                        ship: event.ship.clone(),
                        kept,
                    },
                )
                .with_sailor(Some(event.sailor.clone()))
                .with_date(event.date)
            }));
        }

        diagnostics.sort_by_key(|d| d.at);
        let sailors = aggregate(&events, self.config.merge_gap());

        tracing::info!(
            lines = lines.len(),
            events = events.len(),
            sailors = sailors.len(),
            intervals = sailors.values().map(Vec::len).sum::<usize>(),
            dropped = diagnostics.len(),
            "Document processed"
        );

        DocumentResult {
            sailors,
            diagnostics,
        }
    }

    /// Most specific in-port training label on the line.
    ///
    /// Labels listed in `inport_ship_labels` are prefixed with the ship named
    /// on the row when it resolves: `USS CHOSIN SBTT 01JAN24` gives `CHOSIN SBTT`.
    pub(super) fn in_port_label(&self, line: &NormalizedLine) -> Option<String> {
        let label = self
            .in_port
            .iter()
            .find(|(_, pattern)| pattern.is_match(&line.text))
            .map(|(label, _)| label.as_str())?;

        let ship_scoped = self
            .config
            .inport_ship_labels
            .iter()
            .any(|scoped| scoped.eq_ignore_ascii_case(label));
        if !ship_scoped {
            return Some(label.to_string());
        }

        let candidate = self.extractor.candidate(line);
        let ship = self
            .reference
            .resolve_in_text(&candidate.ship_token, self.config.min_ship_coverage)
            .ship()
            .map(|ship| normalize_ship_name(&ship.name));
        Some(match ship {
            Some(ship) => format!("{} {}", ship, label),
            None => label.to_string(),
        })
    }
}

/// Keep one ship per sailor and day.
///
/// The first mission-tagged event wins, otherwise the first in document order.
/// Returns the dropped events with the ship that was kept instead.
fn resolve_same_day_conflicts(events: &mut Vec<Event>) -> Vec<(Event, String)> {
    let mut kept: HashMap<(String, NaiveDate), (String, bool)> = HashMap::new();
    for event in events.iter() {
        let entry = kept
            .entry((event.sailor.clone(), event.date))
            .or_insert_with(|| (event.ship.clone(), event.mission));
        if !entry.1 && event.mission {
            *entry = (event.ship.clone(), true);
        }
    }

    let mut dropped = Vec::new();
    events.retain(|event| {
        let key = (event.sailor.clone(), event.date);
        let ship = &kept[&key].0;
        if *ship == event.ship {
            true
        } else {
            dropped.push((event.clone(), ship.clone()));
            false
        }
    });
    dropped
}
