//! Whitespace normalization transform.

use super::Transform;
use crate::engine::types::NormalizedLine;

/// Collapses runs of whitespace to a single space and trims both ends.
pub struct NormalizeWhitespace;

impl Transform for NormalizeWhitespace {
    fn transform(&self, lines: &mut [NormalizedLine]) {
        for line in lines.iter_mut() {
            let mut result = String::with_capacity(line.text.len());
            let mut prev_space = true;

            for c in line.text.chars() {
                if c.is_whitespace() {
                    if !prev_space {
                        result.push(' ');
                        prev_space = true;
                    }
                } else {
                    result.push(c);
                    prev_space = false;
                }
            }

            if result.ends_with(' ') {
                result.pop();
            }
            line.text = result;
        }
    }
}
