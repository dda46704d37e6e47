//! Timestamp removal transform.
//!
//! Scanner and fax headers stamp clock times (`08:15`, `4:30:12 PM`) onto
//! every page. They look enough like numbers to confuse date parsing.

use regex::Regex;

use super::Transform;
use crate::engine::types::NormalizedLine;

/// Upper bound on removal passes for a single line.
const MAX_PASSES: usize = 8;

/// Removes every substring matching the timestamp pattern.
///
/// Removal repeats until the line stops changing, so a timestamp assembled from
/// the pieces around a removed one is removed as well.
#[derive(Debug, Clone)]
pub struct StripTimestamps {
    pattern: Regex,
}

impl StripTimestamps {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }
}

impl Transform for StripTimestamps {
    fn transform(&self, lines: &mut [NormalizedLine]) {
        for line in lines.iter_mut() {
            for _ in 0..MAX_PASSES {
                if !self.pattern.is_match(&line.text) {
                    break;
                }
                line.text = self.pattern.replace_all(&line.text, " ").into_owned();
            }
        }
    }
}
