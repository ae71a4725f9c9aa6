//! Tours and tour energy.
//!
//! A [`Tour`] is a permutation of city indices `0..n` describing a closed
//! path. The edge from the last city back to the first is implicit and is
//! always part of the [`energy`].

use std::fmt;

use rand::Rng;

use crate::error::{Error, Result};
use crate::geometry::{distance, Point};
use crate::random::shuffle;

/// An ordered permutation of all cities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour {
    order: Vec<usize>,
}

impl Tour {
    /// Wraps `order` after checking it is a permutation of `0..order.len()`.
    pub fn new(order: Vec<usize>) -> Result<Self> {
        validate_permutation(&order, order.len())?;
        Ok(Self { order })
    }

    /// Visits cities in index order: `[0, 1, ..., n-1]`.
    pub fn identity(n: usize) -> Self {
        Self {
            order: (0..n).collect(),
        }
    }

    /// A uniformly random permutation of `0..n`.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..n).collect();
        shuffle(&mut order, rng);
        Self { order }
    }

    /// Builds a tour from an order the caller guarantees is a permutation.
    pub(crate) fn from_order_unchecked(order: Vec<usize>) -> Self {
        debug_assert!(is_permutation(&order, order.len()));
        Self { order }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    /// Consecutive edges including the closing edge `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.order.len();
        (0..n).map(move |i| (self.order[i], self.order[(i + 1) % n]))
    }

    /// Whether this tour is a permutation of `0..n`.
    pub fn is_permutation_of(&self, n: usize) -> bool {
        is_permutation(&self.order, n)
    }
}

impl AsRef<[usize]> for Tour {
    fn as_ref(&self) -> &[usize] {
        &self.order
    }
}

impl fmt::Display for Tour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, city) in self.order.iter().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{city}")?;
        }
        if let Some(first) = self.order.first() {
            write!(f, " -> {first}")?;
        }
        write!(f, "]")
    }
}

/// Total length of the closed path `tour` over `points`.
///
/// Callers guarantee `tour` is a permutation of `0..points.len()` with at
/// least two cities; the result is then strictly positive unless every
/// city shares one location.
///
/// # Panics
/// Panics if `tour` references an index outside `points`.
pub fn energy(tour: &Tour, points: &[Point]) -> f64 {
    tour.edges()
        .map(|(a, b)| distance(&points[a], &points[b]))
        .sum()
}

/// Checks that `order` holds each of `0..n` exactly once.
pub fn validate_permutation(order: &[usize], n: usize) -> Result<()> {
    if order.len() != n {
        return Err(Error::invalid_input(format!(
            "tour has {} entries, expected {n}",
            order.len()
        )));
    }
    let mut seen = vec![false; n];
    for &city in order {
        if city >= n {
            return Err(Error::invalid_input(format!(
                "tour references city {city}, but there are only {n}"
            )));
        }
        if seen[city] {
            return Err(Error::invalid_input(format!(
                "tour visits city {city} more than once"
            )));
        }
        seen[city] = true;
    }
    Ok(())
}

/// Boolean form of [`validate_permutation`].
pub fn is_permutation(order: &[usize], n: usize) -> bool {
    if order.len() != n {
        return false;
    }
    let mut seen = vec![false; n];
    for &city in order {
        if city >= n || seen[city] {
            return false;
        }
        seen[city] = true;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 0.0),
        ]
    }

    #[test]
    fn test_unit_square_perimeter() {
        let tour = Tour::new(vec![0, 1, 2, 3]).unwrap();
        assert!((energy(&tour, &unit_square()) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_crossing_tour_is_longer() {
        let tour = Tour::new(vec![0, 2, 1, 3]).unwrap();
        let expected = 2.0 * 2f64.sqrt() + 2.0;
        assert!((energy(&tour, &unit_square()) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_two_cities_count_edge_twice() {
        let pts = vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)];
        assert!((energy(&Tour::identity(2), &pts) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_energy_rotation_invariant() {
        let pts = unit_square();
        let a = Tour::new(vec![0, 2, 1, 3]).unwrap();
        let b = Tour::new(vec![2, 1, 3, 0]).unwrap();
        assert!((energy(&a, &pts) - energy(&b, &pts)).abs() < 1e-12);
    }

    #[test]
    fn test_edges_close_the_loop() {
        let tour = Tour::new(vec![2, 0, 1]).unwrap();
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(2, 0), (0, 1), (1, 2)]);
    }

    #[test]
    fn test_new_rejects_duplicate() {
        let err = Tour::new(vec![0, 1, 1]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Tour::new(vec![0, 3, 1]).is_err());
    }

    #[test]
    fn test_validate_rejects_wrong_length() {
        assert!(validate_permutation(&[0, 1, 2], 4).is_err());
        assert!(!is_permutation(&[0, 1, 2], 4));
    }

    #[test]
    fn test_display() {
        let tour = Tour::new(vec![1, 0, 2]).unwrap();
        assert_eq!(tour.to_string(), "[1 -> 0 -> 2 -> 1]");
    }

    #[test]
    fn test_random_tour_is_permutation() {
        let mut rng = create_rng(42);
        for n in [1, 2, 5, 50] {
            assert!(Tour::random(n, &mut rng).is_permutation_of(n));
        }
    }

    proptest! {
        #[test]
        fn prop_energy_non_negative(seed in any::<u64>(), n in 2usize..40) {
            let mut rng = create_rng(seed);
            let pts = crate::geometry::random_points(n, 100.0, &mut rng);
            let tour = Tour::random(n, &mut rng);
            prop_assert!(energy(&tour, &pts) >= 0.0);
        }
    }
}
