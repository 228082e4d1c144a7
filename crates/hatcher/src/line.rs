//! Segments and hatch line records.

use hatcher_math::{direction_angle, round_to_decimals, rotate_about, Point2};
use serde::{Deserialize, Serialize};

use crate::lattice::LatticeSolution;

/// One dash to reproduce: an ordered pair of points inside the tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start point; becomes the hatch line's base point.
    pub p0: Point2,
    /// End point.
    pub p1: Point2,
}

impl Segment {
    /// Create a segment from two points.
    pub fn new(p0: Point2, p1: Point2) -> Self {
        Self { p0, p1 }
    }

    /// Create a segment from raw coordinates.
    pub fn from_coords(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    /// Copy with both endpoints rounded to `decimals` fractional digits.
    ///
    /// Unrounded coordinates differing in the last bit produce
    /// high-entropy directions that defeat rational approximation, so
    /// the assembler rounds every segment before solving.
    pub fn rounded(&self, decimals: u32) -> Self {
        Self::new(
            Point2::new(
                round_to_decimals(self.p0.x, decimals),
                round_to_decimals(self.p0.y, decimals),
            ),
            Point2::new(
                round_to_decimals(self.p1.x, decimals),
                round_to_decimals(self.p1.y, decimals),
            ),
        )
    }

    /// Direction angle in `[0, 2π)`.
    pub fn direction(&self) -> f64 {
        direction_angle(self.p1.x - self.p0.x, self.p1.y - self.p0.y)
    }

    /// Euclidean length; this is the hatch line's dash length.
    pub fn length(&self) -> f64 {
        let dx = self.p1.x - self.p0.x;
        let dy = self.p1.y - self.p0.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One line of a hatch pattern definition.
///
/// Field order matches the pattern-file grammar: angle, base point,
/// shift, offset, dash, space. `space` is stored negated: a positive
/// dash followed by a negative space is how the format encodes
/// "draw, then skip".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HatchLine {
    /// Direction in degrees.
    pub angle: f64,
    /// Base point x.
    pub x: f64,
    /// Base point y.
    pub y: f64,
    /// Repeat component parallel to the line.
    pub shift: f64,
    /// Repeat component perpendicular to the line.
    pub offset: f64,
    /// Visible dash length.
    pub dash: f64,
    /// Negated gap completing one period.
    pub space: f64,
}

impl HatchLine {
    /// Build the record for one segment from its lattice solution.
    pub fn from_segment(segment: &Segment, solution: &LatticeSolution) -> Self {
        let dash = segment.length();
        Self {
            angle: segment.direction().to_degrees(),
            x: segment.p0.x,
            y: segment.p0.y,
            shift: solution.shift,
            offset: solution.offset,
            dash,
            space: -(solution.period - dash),
        }
    }

    /// Reconstruct the segment this line encodes.
    pub fn segment(&self) -> Segment {
        let theta = self.angle.to_radians();
        Segment::from_coords(
            self.x,
            self.y,
            self.x + self.dash * theta.cos(),
            self.y + self.dash * theta.sin(),
        )
    }

    /// Definition tuple for drawing-library consumers: the (shift,
    /// offset) pair rotated into the line's own frame, plus the dash
    /// pattern. Drawing libraries expect the translation vector in
    /// world coordinates rather than line-relative components.
    pub fn carrier_definition(&self) -> (f64, Point2, Point2, [f64; 2]) {
        let carrier = rotate_about(
            Point2::new(self.shift, self.offset),
            Point2::origin(),
            self.angle.to_radians(),
        );
        (
            self.angle,
            Point2::new(self.x, self.y),
            carrier,
            [self.dash, self.space],
        )
    }
}
