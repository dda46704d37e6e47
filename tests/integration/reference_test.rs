//! Ship reference loading through the public API.

use std::time::{Duration, Instant};

use seapay::ships::ReferenceError;
use seapay::ShipReference;

use crate::helpers::fixture;

#[test]
fn toml_and_text_layouts_load_the_same_fleet() {
    let from_toml = ShipReference::load(&fixture("ships.toml")).unwrap();
    let from_text = ShipReference::load(&fixture("ships.txt")).unwrap();

    let names = |r: &ShipReference| -> Vec<String> {
        r.ships().iter().map(|s| s.name.clone()).collect()
    };
    assert_eq!(names(&from_toml), names(&from_text));
    assert_eq!(names(&from_toml)[0], "USS ABRAHAM LINCOLN");
}

#[test]
fn aliases_from_file_resolve() {
    let reference = ShipReference::load(&fixture("ships.toml")).unwrap();

    for token in ["abe", "CVN-72", "uss abraham lincoln", "Lincoln"] {
        assert_eq!(
            reference.resolve(token, 0.7).ship().map(|s| s.name.as_str()),
            Some("USS ABRAHAM LINCOLN"),
            "{}",
            token
        );
    }
}

#[test]
fn conflicting_reference_refuses_to_load() {
    match ShipReference::load(&fixture("conflict.txt")) {
        Err(ReferenceError::AmbiguousAlias { first, second, .. }) => {
            assert_eq!(first, "USS JOHN S. MCCAIN");
            assert_eq!(second, "USS MCCAIN");
        }
        other => panic!("expected ambiguous alias error, got {:?}", other.map(|r| r.len())),
    }
}

#[test]
fn administrative_words_do_not_resolve() {
    let reference = ShipReference::builtin().unwrap();

    for word in ["SHORE", "HOME", "BASE", "BARRACKS", "LIBERTY"] {
        assert!(reference.resolve(word, 0.7).is_unresolved(), "{}", word);
        assert!(reference.resolve_in_text(word, 0.7).is_unresolved(), "{}", word);
    }
}

#[test]
fn long_remark_row_resolves_quickly() {
    let reference = ShipReference::builtin().unwrap();
    let words = [
        "PERSONNEL", "RECORD", "REVIEWED", "AND", "FORWARDED", "FOR", "ADMIN", "OFFICE",
        "PENDING", "FINAL",
    ];
    let row = words.repeat(3).join(" ");
    assert_eq!(row.split_whitespace().count(), 30);

    let started = Instant::now();
    let resolution = reference.resolve_in_text(&row, 0.7);

    assert!(resolution.is_unresolved());
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "took {:?}",
        started.elapsed()
    );
}
