#![warn(missing_docs)]

//! Periodic hatch line synthesis.
//!
//! Given 2D line segments laid out inside a rectangular tile, this
//! crate computes the compact repeating description CAD hatch pattern
//! files expect: an angle, a base point, a translation, and a
//! dash/space pair whose tiling reproduces the segments exactly at
//! every tile boundary.
//!
//! The hard part is the translation: an arbitrary floating slope has
//! no finite repeat period, so the slope is first snapped to a nearby
//! rational and the closure translation found as the solution of an
//! integer linear equation over the tile lattice.
//!
//! # Example
//!
//! ```ignore
//! use hatcher::{assemble, AssembleSettings, Segment, Tile};
//!
//! let tile = Tile::new(1.0, 1.0)?;
//! let segments = [Segment::from_coords(0.0, 0.0, 1.0, 0.0)];
//! let assembly = assemble(&segments, &tile, &AssembleSettings::default())?;
//!
//! for line in &assembly.lines {
//!     println!("{} deg, period offset {}", line.angle, line.offset);
//! }
//! ```

pub mod assemble;
pub mod error;
pub mod lattice;
pub mod line;
pub mod rational;

pub use assemble::{assemble, Assembly, AssembleSettings, FailurePolicy, SkippedSegment};
pub use error::{HatcherError, Result};
pub use lattice::{solve, LatticeSolution, SolverParams, Tile, VERTICAL_SLOPE_LIMIT};
pub use line::{HatchLine, Segment};
pub use rational::{limit_denominator, Rational};
