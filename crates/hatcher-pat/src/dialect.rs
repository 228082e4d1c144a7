//! Pattern file dialects and header metadata.
//!
//! The per-line data grammar is identical across dialects; only the
//! header carries dialect-specific metadata.

use serde::{Deserialize, Serialize};

/// Header dialect of the emitted pattern file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatDialect {
    /// Single `*title,description` header line.
    #[default]
    AutoCad,
    /// Three-line header carrying units and type metadata.
    Revit,
}

/// Measurement units declared in the Revit header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatUnits {
    /// `;%UNITS=MM`
    #[default]
    Millimeters,
    /// `;%UNITS=INCH`
    Inches,
}

impl PatUnits {
    /// Header code for these units.
    pub fn code(&self) -> &'static str {
        match self {
            PatUnits::Millimeters => "MM",
            PatUnits::Inches => "INCH",
        }
    }
}

/// Pattern type declared in the Revit header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PatKind {
    /// Scales with the model.
    #[default]
    Model,
    /// Fixed size on the sheet.
    Drafting,
}

impl PatKind {
    /// Header code for this pattern type.
    pub fn code(&self) -> &'static str {
        match self {
            PatKind::Model => "MODEL",
            PatKind::Drafting => "DRAFTING",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_codes() {
        assert_eq!(PatUnits::Millimeters.code(), "MM");
        assert_eq!(PatUnits::Inches.code(), "INCH");
        assert_eq!(PatKind::Model.code(), "MODEL");
        assert_eq!(PatKind::Drafting.code(), "DRAFTING");
    }

    #[test]
    fn test_defaults() {
        assert_eq!(PatDialect::default(), PatDialect::AutoCad);
        assert_eq!(PatUnits::default(), PatUnits::Millimeters);
        assert_eq!(PatKind::default(), PatKind::Model);
    }
}
