//! Parsing `.pat` text back into hatch lines.
//!
//! Used for round-trip verification: comment and header lines are
//! stripped, each remaining line is parsed as the seven-field grammar,
//! and segments are reconstructed from angle, base point, and dash.

use hatcher::{HatchLine, Segment};

use crate::error::{PatError, Result};

/// Number of comma-separated fields in a data line.
const FIELD_COUNT: usize = 7;

/// Parse pattern text into hatch lines.
///
/// Blank lines and lines starting with `;` or `*` are skipped. A
/// malformed data line fails the whole call; lines parsed before it
/// are unaffected by the failure.
pub fn parse_pat(input: &str) -> Result<Vec<HatchLine>> {
    let mut lines = Vec::new();
    for (number, raw) in input.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('*') {
            continue;
        }
        lines.push(parse_data_line(trimmed, number + 1)?);
    }
    Ok(lines)
}

/// Parse pattern text and reconstruct the segments it encodes,
/// `p1 = p0 + dash·(cos θ, sin θ)`.
pub fn parse_segments(input: &str) -> Result<Vec<Segment>> {
    Ok(parse_pat(input)?.iter().map(HatchLine::segment).collect())
}

fn parse_data_line(line: &str, number: usize) -> Result<HatchLine> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(PatError::MalformedLine {
            line: number,
            reason: format!("expected {FIELD_COUNT} fields, found {}", fields.len()),
        });
    }
    let mut values = [0.0f64; FIELD_COUNT];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| PatError::MalformedLine {
            line: number,
            reason: format!("not a number: {field:?}"),
        })?;
    }
    let [angle, x, y, shift, offset, dash, space] = values;
    Ok(HatchLine {
        angle,
        x,
        y,
        shift,
        offset,
        dash,
        space,
    })
}
