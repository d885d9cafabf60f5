//! Heading levels and renormalisation

use crate::constants as C;

/// Heading level of a line, 0 when the line is not a heading
///
/// Counts leading `#` up to the first space. Any other character after the
/// markers (`##abc`) means the line is not a heading.
pub fn heading_level(line: &str) -> usize {
    let mut level = 0;
    for c in line.chars() {
        match c {
            C::HEADING_CHAR => level += 1,
            ' ' => break,
            _ => return 0,
        }
    }
    level
}

/// Shift headings up so the shallowest one becomes level 1
///
/// Relative nesting is kept; non-heading lines are untouched.
pub fn normalize_heading_levels(lines: Vec<String>) -> Vec<String> {
    let min_level = lines
        .iter()
        .map(|line| heading_level(line))
        .filter(|&level| level > 0)
        .min();

    let shift = match min_level {
        Some(level) if level > 1 => level - 1,
        _ => return lines,
    };

    lines
        .into_iter()
        .map(|line| {
            if heading_level(&line) > 0 {
                line[shift..].to_string()
            } else {
                line
            }
        })
        .collect()
}
