//! A multi-level range tree answering "heaviest point dominated by `p`".
//!
//! The tree indexes points by their secondary coordinates `1..=dims`; the
//! primary coordinate is left to the caller's sweep. A level-`k` tree is a
//! balanced binary tree ordered by coordinate `k`. Each internal node also
//! owns a level-`k-1` tree over the same points, so once a query has
//! resolved coordinate `k` for a whole subtree it can drop down a level.
//! Queries and inserts cost `O(log^k n)`.
//!
//! Nodes refer to points by [`PointId`]; the point arena is passed to every
//! call.

use std::cmp::Ordering;

use super::error::{ChainError, Result};
use super::point::{Point, PointId};

/// A weighted point, or nothing (the always-dominated sentinel, weight 0).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Best {
    pub point: Option<PointId>,
    pub weight: f64,
}

impl Best {
    pub const NONE: Best = Best {
        point: None,
        weight: 0.0,
    };

    pub fn new(point: PointId, weight: f64) -> Self {
        Best {
            point: Some(point),
            weight,
        }
    }

    /// The heavier of the two; `self` wins ties.
    pub fn max(self, other: Best) -> Best {
        if other.weight > self.weight {
            other
        } else {
            self
        }
    }
}

pub enum Node {
    Leaf {
        point: PointId,
        best: Best,
    },
    Internal {
        /// First point of the right half in this level's order
        split: PointId,
        min: Point,
        max: Point,
        left: Box<Node>,
        right: Box<Node>,
        /// Same points, one dimension down; absent at level 1
        nested: Option<Box<Node>>,
        best: Best,
    },
}

impl Node {
    pub fn best(&self) -> Best {
        match self {
            Node::Leaf { best, .. } => *best,
            Node::Internal { best, .. } => *best,
        }
    }

    pub fn min<'a>(&'a self, points: &'a [Point]) -> &'a Point {
        match self {
            Node::Leaf { point, .. } => &points[*point],
            Node::Internal { min, .. } => min,
        }
    }

    pub fn max<'a>(&'a self, points: &'a [Point]) -> &'a Point {
        match self {
            Node::Leaf { point, .. } => &points[*point],
            Node::Internal { max, .. } => max,
        }
    }

    /// The structure to search once the current coordinate is resolved.
    ///
    /// A leaf serves as its own lower-level tree.
    fn lower(&self) -> &Node {
        match self {
            Node::Internal {
                nested: Some(nested),
                ..
            } => nested,
            _ => self,
        }
    }

    fn build(ids: &mut [PointId], points: &[Point], k: usize) -> Box<Node> {
        ids.sort_by(|&a, &b| points[a].cmp_from(&points[b], k));
        Self::build_sorted(ids, points, k)
    }

    // `ids` is sorted by `cmp_from(_, k)`.
    fn build_sorted(ids: &[PointId], points: &[Point], k: usize) -> Box<Node> {
        if ids.len() == 1 {
            return Box::new(Node::Leaf {
                point: ids[0],
                best: Best::NONE,
            });
        }

        let mid = ids.len() / 2;
        let left = Self::build_sorted(&ids[..mid], points, k);
        let right = Self::build_sorted(&ids[mid..], points, k);

        let nested = if k > 1 {
            let mut lower_ids = ids.to_vec();
            Some(Self::build(&mut lower_ids, points, k - 1))
        } else {
            None
        };

        let min = left.min(points).meet(right.min(points));
        let max = left.max(points).join(right.max(points));

        Box::new(Node::Internal {
            split: ids[mid],
            min,
            max,
            left,
            right,
            nested,
            best: Best::NONE,
        })
    }

    fn insert(&mut self, id: PointId, weight: f64, points: &[Point], k: usize) -> Result<()> {
        match self {
            Node::Leaf { point, best } => {
                if *point != id {
                    return Err(ChainError::LogicError(format!(
                        "point {} is not indexed by the range tree",
                        points[id]
                    )));
                }
                *best = best.max(Best::new(id, weight));
            }
            Node::Internal {
                split,
                left,
                right,
                nested,
                best,
                ..
            } => {
                *best = best.max(Best::new(id, weight));
                if let Some(nested) = nested {
                    nested.insert(id, weight, points, k - 1)?;
                }
                match points[id].cmp_from(&points[*split], k) {
                    Ordering::Less => left.insert(id, weight, points, k)?,
                    _ => right.insert(id, weight, points, k)?,
                }
            }
        }
        Ok(())
    }

    fn query(&self, p: &Point, points: &[Point], k: usize) -> Best {
        match self {
            Node::Leaf { point, best } => {
                if points[*point].is_dominated_upto(p, k) {
                    *best
                } else {
                    Best::NONE
                }
            }
            Node::Internal {
                min,
                max,
                left,
                right,
                best,
                ..
            } => {
                if !min.is_dominated_upto(p, k) {
                    return Best::NONE;
                }
                if max.is_dominated_upto(p, k) {
                    return *best;
                }

                if p.coord(k) < right.min(points).coord(k) {
                    left.query(p, points, k)
                } else {
                    // every left point is <= p in coordinate k
                    let from_left = if k == 1 {
                        left.best()
                    } else {
                        left.lower().query(p, points, k - 1)
                    };
                    from_left.max(right.query(p, points, k))
                }
            }
        }
    }

    fn collect(&self, out: &mut Vec<PointId>) {
        match self {
            Node::Leaf { point, .. } => out.push(*point),
            Node::Internal { left, right, .. } => {
                left.collect(out);
                right.collect(out);
            }
        }
    }

    fn check(&self, points: &[Point], k: usize) -> Result<()> {
        let fail = |msg: String| Err(ChainError::LogicError(msg));
        if let Node::Internal {
            min,
            max,
            left,
            right,
            nested,
            best,
            ..
        } = self
        {
            if left.max(points).coord(k) > right.min(points).coord(k) {
                return fail(format!("partition out of order at level {}", k));
            }
            if best.weight != left.best().max(right.best()).weight {
                return fail(format!("max weight not propagated at level {}", k));
            }
            if *min != left.min(points).meet(right.min(points))
                || *max != left.max(points).join(right.max(points))
            {
                return fail(format!("stale bounds at level {}", k));
            }
            if let Some(nested) = nested {
                let mut here = Vec::new();
                let mut below = Vec::new();
                self.collect(&mut here);
                nested.collect(&mut below);
                here.sort_unstable();
                below.sort_unstable();
                if here != below {
                    return fail(format!("nested tree differs at level {}", k));
                }
                if nested.best().weight != best.weight {
                    return fail(format!("nested max weight differs at level {}", k));
                }
                nested.check(points, k - 1)?;
            }
            left.check(points, k)?;
            right.check(points, k)?;
        }
        Ok(())
    }
}

/// Range tree over a fixed set of points.
///
/// Weights only ever grow: inserting a smaller weight at a point than the
/// one it already carries has no effect.
pub struct RangeTree {
    root: Option<Box<Node>>,
    dims: usize,
}

impl RangeTree {
    /// Builds the tree over `ids`, which must be distinct.
    ///
    /// `dims` is the highest coordinate index taken into account; the tree
    /// covers coordinates `1..=dims`.
    pub fn build(ids: &[PointId], points: &[Point], dims: usize) -> Self {
        if ids.is_empty() || dims == 0 {
            return RangeTree { root: None, dims };
        }
        let mut ids = ids.to_vec();
        RangeTree {
            root: Some(Node::build(&mut ids, points, dims)),
            dims,
        }
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Raises the weight recorded at `id` to `weight`.
    pub fn insert(&mut self, id: PointId, weight: f64, points: &[Point]) -> Result<()> {
        match &mut self.root {
            Some(root) => root.insert(id, weight, points, self.dims),
            None => Err(ChainError::LogicError(
                "insert into an empty range tree".to_string(),
            )),
        }
    }

    /// Heaviest point whose secondary coordinates are all `<=` those of `p`.
    pub fn query_max_dominated(&self, p: &Point, points: &[Point]) -> Best {
        match &self.root {
            Some(root) => root.query(p, points, self.dims),
            None => Best::NONE,
        }
    }

    /// Walks the whole structure and verifies its invariants.
    pub fn check_invariants(&self, points: &[Point]) -> Result<()> {
        match &self.root {
            Some(root) => root.check(points, self.dims),
            None => Ok(()),
        }
    }
}
