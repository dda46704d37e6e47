//! End-to-end tests of the extraction pipeline through the library API.

use chrono::NaiveDate;
use rayon::prelude::*;

use seapay::engine::{Classifier, DiagnosticReason, LineClass, LineRef};
use seapay::{Document, Engine, EngineConfig, Interval, RawLine, ScanContext, ShipReference};

use crate::helpers::load_fixture;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn builtin_engine() -> Engine {
    Engine::new(EngineConfig::default(), ShipReference::builtin().unwrap()).unwrap()
}

// ============================================================================
// Certification Sheet Fixture
// ============================================================================

fn process_sheet() -> seapay::DocumentResult {
    let doc = Document::from_text("cert_2024.txt", &load_fixture("cert_2024.txt"));
    builtin_engine().process(&doc.lines, ScanContext::new(None, doc.year))
}

#[test]
fn sheet_yields_intervals_for_the_header_sailor() {
    let result = process_sheet();

    assert_eq!(result.sailors.len(), 1);
    assert_eq!(
        result.sailors["DOE, JOHN A"],
        vec![
            Interval::new("USS ABRAHAM LINCOLN", date(2024, 1, 2), date(2024, 1, 6)),
            Interval::new("USS BOXER", date(2024, 1, 9), date(2024, 1, 9)),
            Interval::new("USS BOXER", date(2024, 1, 11), date(2024, 1, 11)),
        ]
    );
}

#[test]
fn sheet_reports_every_dropped_row_in_order() {
    let result = process_sheet();

    let dropped: Vec<(LineRef, &str)> = result
        .diagnostics
        .iter()
        .map(|d| (d.at, d.reason.code()))
        .collect();
    assert_eq!(
        dropped,
        vec![
            (LineRef::new(1, 6), "duplicate date"),
            (LineRef::new(1, 8), "in-port training day"),
            (LineRef::new(1, 9), "unresolved ship"),
            (LineRef::new(1, 10), "invalid range"),
        ]
    );
}

#[test]
fn sheet_diagnostics_carry_details() {
    let result = process_sheet();

    assert_eq!(
        result.diagnostics[0].reason,
        DiagnosticReason::DuplicateDate {
            ship: "USS ESSEX".into(),
            kept: "USS ABRAHAM LINCOLN".into(),
        }
    );
    assert_eq!(result.diagnostics[1].date, Some(date(2024, 1, 10)));
    assert_eq!(result.diagnostics[2].line, "USS ZEPHYRUS 01/15/2024");
    assert_eq!(result.diagnostics[3].sailor.as_deref(), Some("DOE, JOHN A"));
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn lincoln_rows_split_at_default_gap_and_merge_at_two_days() {
    let lines = RawLine::from_lines(["USS LINCOLN 01JAN24-05JAN24", "USS LINCOLN 07JAN24"]);
    let ctx = ScanContext::new(Some("DOE, JOHN"), None);

    let strict = builtin_engine().process(&lines, ctx.clone());
    assert_eq!(
        strict.sailors["DOE, JOHN"],
        vec![
            Interval::new("USS ABRAHAM LINCOLN", date(2024, 1, 1), date(2024, 1, 5)),
            Interval::new("USS ABRAHAM LINCOLN", date(2024, 1, 7), date(2024, 1, 7)),
        ]
    );

    let loose = Engine::new(
        EngineConfig {
            merge_gap_days: 2,
            ..EngineConfig::default()
        },
        ShipReference::builtin().unwrap(),
    )
    .unwrap()
    .process(&lines, ctx);
    assert_eq!(
        loose.sailors["DOE, JOHN"],
        vec![Interval::new(
            "USS ABRAHAM LINCOLN",
            date(2024, 1, 1),
            date(2024, 1, 7)
        )]
    );
}

#[test]
fn reversed_range_gives_no_events_and_one_diagnostic() {
    let lines = RawLine::from_lines(["USS LINCOLN 05JAN24-01JAN24"]);

    let result = builtin_engine().process(&lines, ScanContext::new(Some("DOE, JOHN"), None));

    assert!(result.sailors.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].reason.code(), "invalid range");
}

#[test]
fn misspelled_ship_resolves_and_unknown_ship_does_not() {
    let reference = ShipReference::builtin().unwrap();

    let resolved = reference.resolve("LINCLON", 0.7);
    assert_eq!(
        resolved.ship().map(|s| s.name.as_str()),
        Some("USS ABRAHAM LINCOLN")
    );
    assert!(reference.resolve("ZEPHYRUS", 0.7).is_unresolved());
}

#[test]
fn mite_rows_are_always_noise() {
    let classifier = Classifier::new(&EngineConfig::default()).unwrap();
    for text in ["MITE 01JAN24 USS BOXER", "ASTAC MITE 01/05/2024", "ASW MITE"] {
        assert_eq!(classifier.classify_text(text), LineClass::Noise, "{}", text);
    }
}

#[test]
fn no_lines_no_sailors() {
    let result = builtin_engine().process(&[], ScanContext::default());
    assert!(result.sailors.is_empty());
    assert!(result.diagnostics.is_empty());
}

// ============================================================================
// Parallel Documents
// ============================================================================

#[test]
fn documents_processed_in_parallel_match_sequential_results() {
    let engine = builtin_engine();
    let names = ["ADAMS", "BAKER", "CLARK", "DAVIS", "EVANS", "FORD", "GRANT", "HAYES"];
    let docs: Vec<Document> = names
        .iter()
        .enumerate()
        .map(|(i, last)| {
            Document::from_text(
                format!("sheet_{}.txt", i),
                &format!(
                    "NAME: {}, ALEX\nUSS BOXER 0{}JAN24-09JAN24\nUSS WASP 15JAN24\n",
                    last,
                    i + 1
                ),
            )
        })
        .collect();

    let sequential: Vec<_> = docs
        .iter()
        .map(|d| engine.process(&d.lines, ScanContext::default()))
        .collect();
    let parallel: Vec<_> = docs
        .par_iter()
        .map(|d| engine.process(&d.lines, ScanContext::default()))
        .collect();

    assert_eq!(parallel, sequential);
    assert_eq!(
        sequential[3].sailors["DAVIS, ALEX"][0],
        Interval::new("USS BOXER", date(2024, 1, 4), date(2024, 1, 9))
    );
}

// ============================================================================
// Shore-side Rows
// ============================================================================

#[test]
fn shore_side_rows_become_diagnostics_not_service() {
    let lines = RawLine::from_lines([
        "SHORE DUTY 01JAN24-03JAN24",
        "HOME 05JAN24",
        "BARRACKS 07JAN24",
    ]);

    let result = builtin_engine().process(&lines, ScanContext::new(Some("DOE, JOHN"), None));

    assert!(result.sailors.is_empty());
    let codes: Vec<&str> = result.diagnostics.iter().map(|d| d.reason.code()).collect();
    assert_eq!(codes, vec!["unresolved ship"; 3]);
}
