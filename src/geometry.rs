//! Planar points and the Euclidean distance metric.

use std::fmt;

use rand::Rng;

/// An immutable city location in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(&self, other: &Point) -> f64 {
        distance(self, other)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}

/// Euclidean distance `sqrt((x1-x2)^2 + (y1-y2)^2)`.
///
/// Symmetric and non-negative for finite inputs.
#[inline]
pub fn distance(a: &Point, b: &Point) -> f64 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Draws `n` points uniformly from `[0, extent) x [0, extent)`.
///
/// # Panics
/// Panics if `extent` is not strictly positive.
pub fn random_points<R: Rng>(n: usize, extent: f64, rng: &mut R) -> Vec<Point> {
    assert!(extent > 0.0, "extent must be positive");
    (0..n)
        .map(|_| Point::new(rng.random_range(0.0..extent), rng.random_range(0.0..extent)))
        .collect()
}
