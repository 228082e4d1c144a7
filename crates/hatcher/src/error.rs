//! Error types for hatch synthesis.

use thiserror::Error;

/// Errors that can occur while solving for a tiling hatch line.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HatcherError {
    /// The lattice solver found no closure point for this direction.
    #[error("no tiling solution for direction {angle_degrees}\u{b0}")]
    NoTilingSolution {
        /// Direction of the offending segment, in degrees.
        angle_degrees: f64,
    },

    /// Tile dimensions are zero, negative, or non-finite.
    #[error("degenerate tile {width} x {height}")]
    DegenerateTile {
        /// Requested tile width.
        width: f64,
        /// Requested tile height.
        height: f64,
    },
}

/// Result type for hatch synthesis operations.
pub type Result<T> = std::result::Result<T, HatcherError>;
