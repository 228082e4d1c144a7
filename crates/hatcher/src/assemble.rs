//! Pattern assembly: segments in, ordered hatch lines out.

use std::collections::HashMap;

use crate::error::{HatcherError, Result};
use crate::lattice::{solve, LatticeSolution, SolverParams, Tile};
use crate::line::{HatchLine, Segment};

/// What to do when a segment's direction has no tiling solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Drop the segment, record a diagnostic, keep going.
    #[default]
    Skip,
    /// Re-run the whole assembly with the slope bound lowered by one
    /// decimal per attempt, then give up with the error.
    RetryCoarser {
        /// Maximum number of coarser re-runs.
        attempts: u32,
    },
}

/// Assembly parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssembleSettings {
    /// Fractional digits segments are rounded to before solving; also
    /// bounds the slope rationalization.
    pub round_decimals: u32,
    /// Decimal digits bounding the integer-equation coefficients.
    pub precision: u32,
    /// Per-segment failure handling.
    pub policy: FailurePolicy,
}

impl Default for AssembleSettings {
    fn default() -> Self {
        let params = SolverParams::default();
        Self {
            round_decimals: params.round_decimals,
            precision: params.precision,
            policy: FailurePolicy::default(),
        }
    }
}

/// A segment dropped under [`FailurePolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSegment {
    /// Index into the caller's segment slice.
    pub index: usize,
    /// The error that caused the drop.
    pub error: HatcherError,
}

/// Ordered assembly output.
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    /// One hatch line per surviving segment, in input order.
    pub lines: Vec<HatchLine>,
    /// Segments dropped under the skip policy.
    pub skipped: Vec<SkippedSegment>,
}

/// Assemble hatch lines for a whole segment set.
///
/// Each segment is rounded, its direction computed, and the lattice
/// solution looked up or solved. Solutions depend only on direction and
/// tile shape, so they are memoized per unique rounded direction for
/// the duration of the call.
pub fn assemble(segments: &[Segment], tile: &Tile, settings: &AssembleSettings) -> Result<Assembly> {
    tile.validate()?;

    let attempts = match settings.policy {
        FailurePolicy::Skip => 0,
        FailurePolicy::RetryCoarser { attempts } => attempts,
    };
    let skip = matches!(settings.policy, FailurePolicy::Skip);

    let mut last_err = None;
    for attempt in 0..=attempts {
        let decimals = settings.round_decimals.saturating_sub(attempt).max(1);
        if attempt > 0 {
            log::warn!("retrying assembly at {decimals} decimals (attempt {attempt})");
        }
        let params = SolverParams {
            round_decimals: decimals,
            precision: settings.precision,
        };
        match assemble_pass(segments, tile, &params, skip) {
            Ok(assembly) => return Ok(assembly),
            Err(err) => last_err = Some(err),
        }
    }
    // Loop body always runs at least once.
    Err(last_err.unwrap_or(HatcherError::NoTilingSolution { angle_degrees: 0.0 }))
}

fn assemble_pass(
    segments: &[Segment],
    tile: &Tile,
    params: &SolverParams,
    skip: bool,
) -> Result<Assembly> {
    let mut cache: HashMap<u64, Result<LatticeSolution>> = HashMap::new();
    let mut assembly = Assembly::default();

    for (index, segment) in segments.iter().enumerate() {
        let segment = segment.rounded(params.round_decimals);
        let angle = segment.direction();
        let solved = cache
            .entry(angle.to_bits())
            .or_insert_with(|| solve(angle, tile, params))
            .clone();
        match solved {
            Ok(solution) => assembly
                .lines
                .push(HatchLine::from_segment(&segment, &solution)),
            Err(error) if skip => {
                log::warn!(
                    "skipping segment {index} at ({}, {}): {error}",
                    segment.p0.x,
                    segment.p0.y
                );
                assembly.skipped.push(SkippedSegment { index, error });
            }
            Err(error) => return Err(error),
        }
    }
    Ok(assembly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn failing_segment() -> Segment {
        // No tiling solution on a 2.103 x 1.86 tile at four decimals;
        // solvable at three.
        Segment::from_coords(0.0, 0.0, 1.2603, 2.1313)
    }

    fn awkward_tile() -> Tile {
        Tile::new(2.103, 1.86).unwrap()
    }

    #[test]
    fn test_assembles_in_input_order() {
        let tile = Tile::new(0.5, 1.0).unwrap();
        let segments = [
            Segment::from_coords(0.125, 0.05, 0.125, 0.125),
            Segment::from_coords(0.0366, 0.2134, 0.125, 0.125),
        ];
        let assembly = assemble(&segments, &tile, &AssembleSettings::default()).unwrap();
        assert_eq!(assembly.lines.len(), 2);
        assert!(assembly.skipped.is_empty());
        assert_relative_eq!(assembly.lines[0].angle, 90.0);
        assert_relative_eq!(assembly.lines[1].angle, 315.0);
    }

    #[test]
    fn test_memoizes_shared_directions() {
        // Two parallel segments share one lattice solution.
        let tile = Tile::new(1.0, 1.0).unwrap();
        let segments = [
            Segment::from_coords(0.0, 0.0, 0.5, 0.25),
            Segment::from_coords(0.1, 0.6, 0.6, 0.85),
        ];
        let assembly = assemble(&segments, &tile, &AssembleSettings::default()).unwrap();
        assert_eq!(assembly.lines.len(), 2);
        assert_relative_eq!(assembly.lines[0].shift, assembly.lines[1].shift);
        assert_relative_eq!(assembly.lines[0].offset, assembly.lines[1].offset);
    }

    #[test]
    fn test_skip_policy_keeps_going() {
        let segments = [
            failing_segment(),
            Segment::from_coords(0.0, 0.0, 1.0, 0.0),
        ];
        let assembly = assemble(&segments, &awkward_tile(), &AssembleSettings::default()).unwrap();
        assert_eq!(assembly.lines.len(), 1);
        assert_eq!(assembly.skipped.len(), 1);
        assert_eq!(assembly.skipped[0].index, 0);
        assert!(matches!(
            assembly.skipped[0].error,
            HatcherError::NoTilingSolution { .. }
        ));
    }

    #[test]
    fn test_retry_policy_recovers_with_coarser_rounding() {
        let settings = AssembleSettings {
            policy: FailurePolicy::RetryCoarser { attempts: 1 },
            ..AssembleSettings::default()
        };
        let assembly = assemble(&[failing_segment()], &awkward_tile(), &settings).unwrap();
        assert_eq!(assembly.lines.len(), 1);
        // The coarser pass rounds the endpoint to three decimals.
        assert_relative_eq!(assembly.lines[0].shift, 644017.6763960306, epsilon = 1e-3);
    }

    #[test]
    fn test_retry_policy_gives_up() {
        let settings = AssembleSettings {
            policy: FailurePolicy::RetryCoarser { attempts: 0 },
            ..AssembleSettings::default()
        };
        let err = assemble(&[failing_segment()], &awkward_tile(), &settings).unwrap_err();
        assert!(matches!(err, HatcherError::NoTilingSolution { .. }));
    }

    #[test]
    fn test_degenerate_tile_is_fatal() {
        let tile = Tile {
            width: 0.0,
            height: 1.0,
        };
        let err = assemble(&[], &tile, &AssembleSettings::default()).unwrap_err();
        assert!(matches!(err, HatcherError::DegenerateTile { .. }));
    }
}
