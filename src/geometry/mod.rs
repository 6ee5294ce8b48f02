//! Geometric primitives shared by the path simplifier and the emitter.
//!
//! # Module structure
//!
//! ```text
//! geometry/
//! ├── mod.rs      — Point3 value type, point-to-segment distance
//! └── simplify.rs — Douglas–Peucker path reduction
//! ```
//!
//! Everything here is pure: no shared state, deterministic for a given
//! input, safe to call concurrently from independent emitters.

pub mod simplify;

pub use simplify::{simplify, simplify_indices};

use serde::{Deserialize, Serialize};

/// A 3D point sampled along a toolpath, in work coordinates.
///
/// Value type: no identity beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Point3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point3 { x, y, z }
    }

    pub fn zero() -> Self {
        Point3 {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// `true` when no coordinate is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point3) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Default for Point3 {
    fn default() -> Self {
        Self::zero()
    }
}

/// Distance from `p` to the line *segment* `a`–`b`.
///
/// The scalar projection `t` of `p` onto the segment's direction is clamped
/// to `[0, 1]`, so points "before" `a` or "after" `b` measure to the nearest
/// endpoint rather than to an extrapolated point on the infinite line.
///
/// A zero-length segment (`a == b`) has no direction vector; the distance
/// degenerates to the plain point-to-point distance to `a`.
pub fn point_segment_distance(p: Point3, a: Point3, b: Point3) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dz = b.z - a.z;
    let len2 = dx * dx + dy * dy + dz * dz;
    if len2 == 0.0 {
        return p.distance_to(a);
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy + (p.z - a.z) * dz) / len2;
    let t = t.clamp(0.0, 1.0);
    let closest = Point3 {
        x: a.x + t * dx,
        y: a.y + t * dy,
        z: a.z + t * dz,
    };
    p.distance_to(closest)
}
