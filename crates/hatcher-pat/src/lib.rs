#![warn(missing_docs)]

//! Hatch pattern file serialization and parsing.
//!
//! Renders assembled hatch lines to the line-oriented `.pat` grammar
//! (header lines starting with `;` or `*`, then one seven-field data
//! line per hatch line) and parses that grammar back for round-trip
//! verification. Two header dialects are supported; the data grammar
//! is identical between them.
//!
//! # Example
//!
//! ```ignore
//! use hatcher::{assemble, AssembleSettings, Segment, Tile};
//! use hatcher_pat::HatchPattern;
//!
//! let tile = Tile::new(1.0, 1.0)?;
//! let assembly = assemble(&segments, &tile, &AssembleSettings::default())?;
//! let pattern = HatchPattern {
//!     title: "stonework".into(),
//!     lines: assembly.lines,
//!     ..HatchPattern::default()
//! };
//! std::fs::write("stonework.pat", pattern.to_pat_string())?;
//! ```

pub mod dialect;
pub mod error;
pub mod parse;
pub mod pattern;

pub use dialect::{PatDialect, PatKind, PatUnits};
pub use error::{PatError, Result};
pub use parse::{parse_pat, parse_segments};
pub use pattern::{format_line, sanitize_title, HatchPattern};
