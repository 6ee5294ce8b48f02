//! Douglas–Peucker toolpath reduction.
//!
//! Dense point streams from contouring and pocketing routines carry long
//! runs of nearly-collinear samples. [`simplify`] reduces such a run to the
//! minimal subsequence whose piecewise-linear path stays within a caller
//! supplied deviation of the original, always keeping the first and last
//! point.

use super::{point_segment_distance, Point3};

/// Reduces `points` to a subsequence whose piecewise-linear path deviates
/// from the original by at most `tolerance`.
///
/// The first and last point are always kept, the relative order of kept
/// points is the input order, and a single-point input is returned
/// unchanged.
///
/// # Panics
///
/// Panics when `points` is empty, contains a non-finite coordinate, or
/// `tolerance` is negative or NaN. A malformed path must never reach the
/// command stream, so these are treated as caller bugs rather than
/// recoverable errors.
pub fn simplify(points: &[Point3], tolerance: f64) -> Vec<Point3> {
    simplify_indices(points, tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Same reduction as [`simplify`], returning the *indices* of the kept
/// points in ascending order (always starting with `0` and ending with
/// `points.len() - 1` for multi-point inputs).
///
/// The emitter uses this form so it can carry per-axis metadata for the
/// kept points through the reduction.
///
/// # Panics
///
/// Same preconditions as [`simplify`].
pub fn simplify_indices(points: &[Point3], tolerance: f64) -> Vec<usize> {
    assert!(!points.is_empty(), "cannot simplify an empty path");
    assert!(
        tolerance >= 0.0,
        "simplification tolerance must be nonnegative, got {tolerance}"
    );
    assert!(
        points.iter().all(Point3::is_finite),
        "path contains a non-finite coordinate"
    );

    let mut kept = Vec::with_capacity(2);
    kept.push(0);
    reduce_span(points, 0, points.len() - 1, tolerance, &mut kept);
    kept
}

/// Recursively reduces the span `[lo, hi]`, appending the kept indices
/// *after* `lo` (which the caller has already recorded) up to and
/// including `hi`.
///
/// Each recursive call strictly shrinks its span, so depth is bounded by
/// the input length. The shared boundary index of a split is contributed
/// exactly once, by the left half.
fn reduce_span(points: &[Point3], lo: usize, hi: usize, tolerance: f64, kept: &mut Vec<usize>) {
    if hi <= lo {
        // Single-point span: lo is already recorded.
        return;
    }

    let a = points[lo];
    let b = points[hi];
    // Zero-length chord: every interior point measures at 0 so the span
    // collapses to its endpoints. Skipping the distance computation avoids
    // projecting onto a zero-length direction vector.
    let degenerate = a == b;

    // Endpoints are excluded by index, never by value, so duplicated
    // coordinates at the ends cannot recurse forever. Strict `>` keeps the
    // first index encountered at the maximum distance (the tie-break
    // policy).
    let mut worst = lo;
    let mut worst_dist = 0.0;
    for i in lo + 1..hi {
        let dist = if degenerate {
            0.0
        } else {
            point_segment_distance(points[i], a, b)
        };
        if dist > worst_dist {
            worst = i;
            worst_dist = dist;
        }
    }

    if worst_dist > tolerance {
        reduce_span(points, lo, worst, tolerance, kept);
        reduce_span(points, worst, hi, tolerance, kept);
    } else {
        kept.push(hi);
    }
}
