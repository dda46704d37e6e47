//! Sailor name detection and canonicalization.
//!
//! Certification sheets name the sailor once in a header (`NAME: DOE JOHN A
//! SSN ...`) and then list event rows underneath. Some sheets repeat the name
//! at the start of each row (`DOE, JOHN USS BOXER 01JAN24`).

use std::sync::LazyLock;

use regex::Regex;

/// `NAME:` header, optionally prefixed with `MEMBER`.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:MEMBER\s+|SAILOR\s+)?NAME\s*:\s*(.+)$").expect("valid header regex")
});

/// Fields that commonly follow the name on the same header line.
static HEADER_STOP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:SSN|DOD|EDIPI|RATE|RANK|UIC|DEPT|DIV)\b|\d").expect("valid stop regex")
});

/// `LAST, FIRST [M]` at the start of an event row. Upper case only, to avoid
/// mistaking mixed-case remarks for a name.
static INLINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z][A-Z'\-]+),\s*([A-Z][A-Z'\-]+(?:\s+[A-Z]\.?)?)\s+(.+)$")
        .expect("valid inline name regex")
});

/// Canonical `LAST, FIRST [MIDDLE...]` form, upper case.
///
/// Without a comma the first word is taken as the last name, matching the
/// `NAME: LAST FIRST` layout of the header. Returns `None` unless both a last
/// and a first name are present.
pub fn canonical_name(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .to_uppercase()
        .chars()
        .map(|c| {
            if c.is_alphabetic() || c == ',' || c == '\'' || c == '-' {
                c
            } else {
                ' '
            }
        })
        .collect();

    let (last, rest) = match cleaned.split_once(',') {
        Some((last, rest)) => (last.trim().to_string(), rest.replace(',', " ")),
        None => {
            let mut words = cleaned.split_whitespace();
            let last = words.next()?.to_string();
            (last, words.collect::<Vec<_>>().join(" "))
        }
    };

    let last = last.split_whitespace().collect::<Vec<_>>().join(" ");
    let rest = rest.split_whitespace().collect::<Vec<_>>().join(" ");
    if last.is_empty() || rest.is_empty() {
        return None;
    }
    Some(format!("{}, {}", last, rest))
}

/// Partition key for a sailor name: canonical form when available, otherwise
/// the upper-cased, whitespace-collapsed text.
pub fn sailor_key(name: &str) -> String {
    canonical_name(name).unwrap_or_else(|| {
        name.split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase()
    })
}

/// Sailor named by a `NAME:` header line, if this is one.
pub fn header_name(line: &str) -> Option<String> {
    let caps = HEADER.captures(line)?;
    let tail = caps.get(1)?.as_str();
    let name = match HEADER_STOP.find(tail) {
        Some(stop) => &tail[..stop.start()],
        None => tail,
    };
    canonical_name(name)
}

/// Split a leading `LAST, FIRST` off an event row.
///
/// Returns the canonical name and the remainder of the line.
pub fn split_inline_name(line: &str) -> Option<(String, &str)> {
    let caps = INLINE.captures(line)?;
    let last = caps.get(1)?.as_str();
    if last == "USS" || last == "USNS" {
        return None;
    }
    let name = canonical_name(&format!("{}, {}", last, caps.get(2)?.as_str()))?;
    Some((name, caps.get(3)?.as_str()))
}
