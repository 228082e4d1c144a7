//! Pattern assembly into `.pat` text.

use hatcher::HatchLine;
use serde::{Deserialize, Serialize};

use crate::dialect::{PatDialect, PatKind, PatUnits};

/// Column legend emitted as a comment under the title.
const COLUMNS_COMMENT: &str = ";angle,x,y,shift,offset,dash,space";

/// A named, ordered hatch pattern ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HatchPattern {
    /// Pattern name; sanitized before use as an identifier.
    pub title: String,
    /// Human-readable description.
    pub description: String,
    /// Output header dialect.
    pub dialect: PatDialect,
    /// Units metadata (Revit header only).
    pub units: PatUnits,
    /// Pattern type metadata (Revit header only).
    pub kind: PatKind,
    /// Hatch lines in insertion order; output order is preserved.
    pub lines: Vec<HatchLine>,
}

impl Default for HatchPattern {
    fn default() -> Self {
        Self {
            title: "title".to_owned(),
            description: "description".to_owned(),
            dialect: PatDialect::default(),
            units: PatUnits::default(),
            kind: PatKind::default(),
            lines: Vec::new(),
        }
    }
}

impl HatchPattern {
    /// Create an empty pattern with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Title with every non-word character removed, as the consuming
    /// dialect's naming rules require.
    pub fn safe_title(&self) -> String {
        sanitize_title(&self.title)
    }

    /// Render the pattern to `.pat` text, trailing newline included.
    pub fn to_pat_string(&self) -> String {
        let title_line = format!("*{},{}", self.safe_title(), self.description);
        let mut out = Vec::new();
        match self.dialect {
            PatDialect::AutoCad => {
                out.push(title_line);
                out.push(COLUMNS_COMMENT.to_owned());
            }
            PatDialect::Revit => {
                out.push(format!(";%UNITS={}", self.units.code()));
                out.push(title_line);
                out.push(format!(";%TYPE={}", self.kind.code()));
                out.push(COLUMNS_COMMENT.to_owned());
            }
        }
        for line in &self.lines {
            out.push(format_line(line));
        }
        out.push(String::new());
        out.join("\n")
    }
}

/// Remove every run of non-word characters from a pattern title.
/// Idempotent: sanitizing a sanitized title is a no-op.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// One data line: seven comma-separated fields, the angle with six
/// fractional digits and everything else with eight. The asymmetry is
/// the format's convention and is reproduced exactly.
pub fn format_line(line: &HatchLine) -> String {
    format!(
        "{:.6},{:.8},{:.8},{:.8},{:.8},{:.8},{:.8}",
        line.angle, line.x, line.y, line.shift, line.offset, line.dash, line.space
    )
}
