use std::collections::HashMap;

use super::boxes::ChainBox;
use super::error::{ChainError, Result};
use super::point::{Point, PointId};
use super::range_tree::{Best, RangeTree};

/// The heaviest chain found, boxes in increasing coordinate order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaxChain {
    pub boxes: Vec<ChainBox>,
    pub weight: f64,
}

impl MaxChain {
    pub fn empty() -> Self {
        MaxChain::default()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.boxes.iter().map(|b| b.label.as_str()).collect()
    }

    /// Checks that consecutive boxes are dominance ordered and that the
    /// box weights add up to the tracked chain weight.
    pub fn validate(&self) -> Result<()> {
        for (i, pair) in self.boxes.windows(2).enumerate() {
            if !pair[0].end.is_dominated_by(&pair[1].start) {
                return Err(ChainError::LogicError(format!(
                    "box {} ends at {} after box {} starts at {}",
                    i,
                    pair[0].end,
                    i + 1,
                    pair[1].start
                )));
            }
        }

        let sum: f64 = self.boxes.iter().map(|b| b.weight).sum();
        let tolerance = 1e-9 * self.weight.abs().max(1.0);
        if (sum - self.weight).abs() > tolerance {
            return Err(ChainError::LogicError(format!(
                "chain weight {} differs from the sum of its boxes {}",
                self.weight, sum
            )));
        }
        Ok(())
    }
}

/// Weight of the best chain so far and the box it ends with.
#[derive(Clone, Copy, Debug)]
struct Link {
    pred: Option<usize>,
    weight: f64,
}

impl Link {
    fn ending(b: usize, weight: f64) -> Self {
        Link {
            pred: Some(b),
            weight,
        }
    }

    fn extend(self, weight: f64) -> Self {
        Link {
            pred: self.pred,
            weight: self.weight + weight,
        }
    }
}

/// Distinct box corners, with the boxes starting and ending at each.
struct PointIndex {
    points: Vec<Point>,
    starts_at: Vec<Vec<usize>>,
    ends_at: Vec<Vec<usize>>,
    box_start: Vec<PointId>,
    box_end: Vec<PointId>,
}

impl PointIndex {
    fn new(boxes: &[ChainBox]) -> Self {
        let mut index = PointIndex {
            points: Vec::new(),
            starts_at: Vec::new(),
            ends_at: Vec::new(),
            box_start: Vec::with_capacity(boxes.len()),
            box_end: Vec::with_capacity(boxes.len()),
        };
        let mut ids: HashMap<Point, PointId> = HashMap::new();

        for (b, bx) in boxes.iter().enumerate() {
            let s = index.intern(&mut ids, &bx.start);
            index.starts_at[s].push(b);
            index.box_start.push(s);

            let e = index.intern(&mut ids, &bx.end);
            index.ends_at[e].push(b);
            index.box_end.push(e);
        }
        index
    }

    fn intern(&mut self, ids: &mut HashMap<Point, PointId>, p: &Point) -> PointId {
        if let Some(&id) = ids.get(p) {
            return id;
        }
        let id = self.points.len();
        self.points.push(p.clone());
        self.starts_at.push(Vec::new());
        self.ends_at.push(Vec::new());
        ids.insert(p.clone(), id);
        id
    }

    /// Points in sweep order: primary coordinate first, ties broken by the
    /// remaining coordinates.
    fn sweep_order(&self) -> Vec<PointId> {
        let mut order: Vec<PointId> = (0..self.points.len()).collect();
        order.sort_by(|&a, &b| self.points[a].cmp(&self.points[b]));
        order
    }

    fn end_points(&self) -> Vec<PointId> {
        (0..self.points.len())
            .filter(|&p| !self.ends_at[p].is_empty())
            .collect()
    }
}

/// Finds the heaviest chain over `boxes`.
///
/// All boxes must share the same dimensionality, at least 2. Points are
/// visited in non-decreasing primary coordinate. At each point the range
/// tree (over the end points' secondary coordinates) yields the best chain
/// that can be extended from there; boxes ending at the point may raise it,
/// and boxes starting at the point cache it for when their end is reached.
pub fn sweep(boxes: &[ChainBox]) -> Result<MaxChain> {
    let dims = match boxes.first() {
        Some(b) => b.dims(),
        None => return Ok(MaxChain::empty()),
    };
    if dims < 2 {
        return Err(ChainError::LogicError(format!(
            "chaining needs at least 2 dimensions, got {}",
            dims
        )));
    }
    if let Some(b) = boxes.iter().find(|b| b.dims() != dims || b.end.dims() != dims) {
        return Err(ChainError::InvalidArgument(format!(
            "box {} has {} dimensions, expected {}",
            b.label,
            b.dims(),
            dims
        )));
    }

    let index = PointIndex::new(boxes);
    let points = &index.points;
    let mut tree = RangeTree::build(&index.end_points(), points, dims - 1);

    // chain weight (and the box it extends) cached when a box starts
    let mut started: Vec<Option<Link>> = vec![None; boxes.len()];
    // the box ending the best chain that ends at each point
    let mut ending_box: Vec<Option<usize>> = vec![None; points.len()];

    let mut previous: Option<i64> = None;
    for p in index.sweep_order() {
        let here = &points[p];
        if let Some(prev) = previous {
            if here.coord(0) < prev {
                return Err(ChainError::LogicError(format!(
                    "sweep reached {} after primary coordinate {}",
                    here, prev
                )));
            }
        }
        previous = Some(here.coord(0));

        let reached = tree.query_max_dominated(here, points);
        let mut best = Link {
            pred: match reached.point {
                Some(q) => Some(ending_box[q].ok_or_else(|| {
                    ChainError::LogicError(format!("no box ends the chain at {}", points[q]))
                })?),
                None => None,
            },
            weight: reached.weight,
        };

        let (degenerate, proper): (Vec<usize>, Vec<usize>) = index.ends_at[p]
            .iter()
            .copied()
            .partition(|&b| index.box_start[b] == p);

        for b in proper {
            let link = started[b].ok_or_else(|| {
                ChainError::LogicError(format!(
                    "box {} ends at {} before it started",
                    boxes[b].label, here
                ))
            })?;
            if link.weight > best.weight {
                best = Link::ending(b, link.weight);
                ending_box[p] = Some(b);
                tree.insert(p, link.weight, points)?;
            }
        }

        // zero-length boxes start and end here: each extends the best so far
        for b in degenerate {
            let link = best.extend(boxes[b].weight);
            started[b] = Some(link);
            if link.weight > best.weight {
                best = Link::ending(b, link.weight);
                ending_box[p] = Some(b);
                tree.insert(p, link.weight, points)?;
            }
        }

        for &b in &index.starts_at[p] {
            if index.box_end[b] != p {
                started[b] = Some(best.extend(boxes[b].weight));
            }
        }
    }

    let top = tree.query_max_dominated(&Point::always_dominating(dims), points);
    let chain = reconstruct(boxes, &index, &started, &ending_box, top)?;

    log::debug!(
        "swept {} points over {} boxes: chain of {} boxes, weight {}",
        points.len(),
        boxes.len(),
        chain.len(),
        chain.weight
    );
    Ok(chain)
}

fn reconstruct(
    boxes: &[ChainBox],
    index: &PointIndex,
    started: &[Option<Link>],
    ending_box: &[Option<usize>],
    top: Best,
) -> Result<MaxChain> {
    let last = match top.point {
        Some(p) => ending_box[p].ok_or_else(|| {
            ChainError::LogicError(format!(
                "no box ends the best chain at {}",
                index.points[p]
            ))
        })?,
        None => return Ok(MaxChain::empty()),
    };

    let mut picked = vec![last];
    let mut cursor = last;
    while let Some(pred) = started[cursor].and_then(|link| link.pred) {
        if picked.len() > boxes.len() {
            return Err(ChainError::LogicError(
                "cycle while backtracking the chain".to_string(),
            ));
        }
        picked.push(pred);
        cursor = pred;
    }

    picked.reverse();
    Ok(MaxChain {
        boxes: picked.into_iter().map(|b| boxes[b].clone()).collect(),
        weight: top.weight,
    })
}
