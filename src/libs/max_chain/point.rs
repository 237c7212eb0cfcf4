use std::cmp::Ordering;
use std::fmt;

/// Index of a [`Point`] inside the per-invocation point arena.
pub type PointId = usize;

/// A coordinate tuple with one coordinate per input sequence.
///
/// Points compare by value. The derived ordering is lexicographic, so the
/// primary coordinate (index 0) drives the sweep order and the remaining
/// coordinates break ties deterministically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    coords: Vec<i64>,
}

impl Point {
    pub fn new(coords: Vec<i64>) -> Self {
        Point { coords }
    }

    /// Every coordinate is minus infinity: dominated by every other point.
    pub fn always_dominated(dims: usize) -> Self {
        Point {
            coords: vec![i64::MIN; dims],
        }
    }

    /// Every coordinate is plus infinity: dominates every other point.
    pub fn always_dominating(dims: usize) -> Self {
        Point {
            coords: vec![i64::MAX; dims],
        }
    }

    pub fn dims(&self) -> usize {
        self.coords.len()
    }

    pub fn coord(&self, dim: usize) -> i64 {
        self.coords[dim]
    }

    pub fn coords(&self) -> &[i64] {
        &self.coords
    }

    /// `true` if every coordinate of `self` is <= the matching one of `other`.
    pub fn is_dominated_by(&self, other: &Point) -> bool {
        self.coords
            .iter()
            .zip(other.coords.iter())
            .all(|(a, b)| a <= b)
    }

    /// Dominance restricted to coordinates `1..=k`.
    ///
    /// The primary coordinate is handled by the sweep order, so the range
    /// tree only ever looks at this prefix of the secondary coordinates.
    pub fn is_dominated_upto(&self, other: &Point, k: usize) -> bool {
        (1..=k).all(|j| self.coords[j] <= other.coords[j])
    }

    /// Total order used by the range tree at dimension `k`.
    ///
    /// Compares coordinate `k` first, then cycles downwards through
    /// `k-1, ..., 0, d-1, ..., k+1`. Distinct points never compare equal.
    pub fn cmp_from(&self, other: &Point, k: usize) -> Ordering {
        let d = self.coords.len();
        for i in 0..d {
            let j = (k + d - i) % d;
            match self.coords[j].cmp(&other.coords[j]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }

    /// Component-wise minimum.
    pub fn meet(&self, other: &Point) -> Point {
        Point {
            coords: self
                .coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| *a.min(b))
                .collect(),
        }
    }

    /// Component-wise maximum.
    pub fn join(&self, other: &Point) -> Point {
        Point {
            coords: self
                .coords
                .iter()
                .zip(other.coords.iter())
                .map(|(a, b)| *a.max(b))
                .collect(),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.coords.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match *c {
                i64::MIN => write!(f, "-inf")?,
                i64::MAX => write!(f, "+inf")?,
                v => write!(f, "{}", v)?,
            }
        }
        write!(f, ")")
    }
}
