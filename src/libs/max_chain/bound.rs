//! Adaptive trimming of the candidate intervals so the cross product stays
//! under a box-count ceiling.
//!
//! A weight threshold is bisected until the boxes built from intervals at or
//! above it straddle the ceiling. Per-label targets are then log-interpolated
//! between the counts at the two ends of the final bracket and apportioned
//! so that they add up to the ceiling. Each label is trimmed to its target
//! by discarding its lowest-weight candidates first.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::boxes::LabelGroup;

const REL_TOLERANCE: f64 = 1e-5;
const ALPHA_STEPS: usize = 50;

/// Number of candidates with weight `>= t` in an ascending list.
fn count_at(list: &[usize], weights: &[f64], t: f64) -> u64 {
    (list.len() - list.partition_point(|&i| weights[i] < t)) as u64
}

fn label_count(group: &LabelGroup, weights: &[Vec<f64>], t: f64) -> u64 {
    group
        .members
        .iter()
        .enumerate()
        .fold(1u64, |acc, (s, list)| {
            acc.saturating_mul(count_at(list, &weights[s], t))
        })
}

fn total_count(groups: &[LabelGroup], weights: &[Vec<f64>], t: f64) -> u64 {
    groups
        .iter()
        .fold(0u64, |acc, g| acc.saturating_add(label_count(g, weights, t)))
}

/// Bisects the weight threshold.
///
/// Returns `(lo, hi)` with more than `max_boxes` boxes at `lo` and at most
/// `max_boxes` at `hi`.
fn bracket_threshold(groups: &[LabelGroup], weights: &[Vec<f64>], max_boxes: u64) -> (f64, f64) {
    let mut min_w = f64::INFINITY;
    let mut max_w = f64::NEG_INFINITY;
    for g in groups {
        for (s, list) in g.members.iter().enumerate() {
            for &i in list {
                min_w = min_w.min(weights[s][i]);
                max_w = max_w.max(weights[s][i]);
            }
        }
    }

    let range = max_w - min_w;
    let eps = range.max(1.0) * 1e-3;
    let mut lo = min_w - eps;
    let mut hi = max_w + eps;
    let tolerance = REL_TOLERANCE * (hi - lo);

    while hi - lo > tolerance {
        let mid = 0.5 * (lo + hi);
        if total_count(groups, weights, mid) > max_boxes {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    (lo, hi)
}

/// Per-label box budgets that sum to `max_boxes`.
///
/// `lower[l]` and `upper[l]` are the box counts of label `l` at the high and
/// low thresholds respectively. Budgets are interpolated in log space with a
/// shared exponent, then the remainder is handed out one box at a time to
/// labels in descending order of headroom.
fn apportion(lower: &[u64], upper: &[u64], max_boxes: u64) -> Vec<u64> {
    let n = lower.len();
    let interp = |alpha: f64| -> Vec<u64> {
        (0..n)
            .map(|l| {
                if upper[l] == 0 {
                    return 0;
                }
                let a = (lower[l].max(1) as f64).ln();
                let b = (upper[l] as f64).ln();
                let t = (a + alpha * (b - a)).exp().floor() as u64;
                t.clamp(lower[l].max(1).min(upper[l]), upper[l])
            })
            .collect()
    };
    let sum = |v: &[u64]| v.iter().fold(0u64, |acc, x| acc.saturating_add(*x));

    // largest shared exponent whose budgets still fit
    let mut a_lo = 0.0;
    let mut a_hi = 1.0;
    for _ in 0..ALPHA_STEPS {
        let mid = 0.5 * (a_lo + a_hi);
        if sum(&interp(mid)) <= max_boxes {
            a_lo = mid;
        } else {
            a_hi = mid;
        }
    }
    let mut targets = interp(a_lo);
    let mut total = sum(&targets);

    if total < max_boxes {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&l| std::cmp::Reverse(upper[l] - targets[l]));
        while total < max_boxes {
            let mut moved = false;
            for &l in &order {
                if total == max_boxes {
                    break;
                }
                if targets[l] < upper[l] {
                    targets[l] += 1;
                    total += 1;
                    moved = true;
                }
            }
            if !moved {
                break;
            }
        }
    } else if total > max_boxes {
        // too many labels to give each one a box: shrink the largest first
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by_key(|&l| std::cmp::Reverse(targets[l]));
        while total > max_boxes {
            for &l in &order {
                if total == max_boxes {
                    break;
                }
                if targets[l] > 0 {
                    targets[l] -= 1;
                    total -= 1;
                }
            }
        }
    }

    targets
}

/// Trims one label's candidates until its cross product fits `target`.
///
/// Candidates below `threshold` go first. The survivors are shuffled and then
/// stably sorted by weight, so ties are broken at random while the lowest
/// weights are still discarded first. Every sequence keeps at least one
/// candidate.
fn trim_group(
    group: &mut LabelGroup,
    weights: &[Vec<f64>],
    threshold: f64,
    target: u64,
    rng: &mut StdRng,
) {
    for (s, list) in group.members.iter_mut().enumerate() {
        let cut = list.partition_point(|&i| weights[s][i] < threshold);
        list.drain(..cut);
    }

    let mut counts: Vec<u64> = group.members.iter().map(|m| m.len() as u64).collect();
    let product = |c: &[u64]| c.iter().fold(1u64, |acc, x| acc.saturating_mul(*x));
    if product(&counts) <= target {
        return;
    }

    let mut pool: Vec<(usize, usize)> = group
        .members
        .iter()
        .enumerate()
        .flat_map(|(s, list)| list.iter().map(move |&i| (s, i)))
        .collect();
    pool.shuffle(rng);
    pool.sort_by(|a, b| weights[a.0][a.1].total_cmp(&weights[b.0][b.1]));

    let mut removed = vec![Vec::new(); group.members.len()];
    for (s, i) in pool {
        if product(&counts) <= target {
            break;
        }
        if counts[s] > 1 {
            counts[s] -= 1;
            removed[s].push(i);
        }
    }

    for (list, gone) in group.members.iter_mut().zip(removed) {
        list.retain(|i| !gone.contains(i));
    }
}

/// Trims `groups` in place so that their cross products add up to at most
/// `max_boxes`. A ceiling of `0` disables bounding.
///
/// Returns `true` when anything was discarded.
pub fn bound_groups(
    groups: &mut Vec<LabelGroup>,
    weights: &[Vec<f64>],
    max_boxes: u64,
    rng: &mut StdRng,
) -> bool {
    if max_boxes == 0 || groups.is_empty() {
        return false;
    }
    let raw = total_count(groups, weights, f64::NEG_INFINITY);
    if raw <= max_boxes {
        return false;
    }

    let (lo, hi) = bracket_threshold(groups, weights, max_boxes);
    let lower: Vec<u64> = groups.iter().map(|g| label_count(g, weights, hi)).collect();
    let upper: Vec<u64> = groups.iter().map(|g| label_count(g, weights, lo)).collect();
    let targets = apportion(&lower, &upper, max_boxes);

    log::info!(
        "bounding {} raw boxes to {} (threshold bracket {:.6}..{:.6})",
        raw,
        max_boxes,
        lo,
        hi
    );

    for (group, &target) in groups.iter_mut().zip(targets.iter()) {
        if target == 0 {
            group.members.iter_mut().for_each(|m| m.clear());
        } else {
            trim_group(group, weights, lo, target, rng);
        }
    }
    groups.retain(|g| g.members.iter().all(|m| !m.is_empty()));

    true
}
