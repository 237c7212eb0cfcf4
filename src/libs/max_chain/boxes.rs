use indexmap::IndexMap;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::bound::bound_groups;
use super::error::{ChainError, Result};
use super::interval::{check_intervals, Interval};
use super::point::Point;

/// One interval per input sequence, all sharing a label.
///
/// The box spans from the starts of its members to their ends. `members[s]`
/// is the index of the chosen interval inside sequence `s`; the first
/// member doubles as the payload reference.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainBox {
    pub label: String,
    pub start: Point,
    pub end: Point,
    pub weight: f64,
    pub members: Vec<usize>,
}

impl ChainBox {
    /// Payload of the member taken from the first sequence.
    pub fn payload<'a, P>(&self, sequences: &'a [Vec<Interval<P>>]) -> &'a P {
        &sequences[0][self.members[0]].payload
    }

    /// Payloads of all members, in sequence order.
    pub fn payloads<'a, P>(&self, sequences: &'a [Vec<Interval<P>>]) -> Vec<&'a P> {
        self.members
            .iter()
            .enumerate()
            .map(|(s, &i)| &sequences[s][i].payload)
            .collect()
    }

    pub fn dims(&self) -> usize {
        self.start.dims()
    }
}

/// Candidate intervals of one label, split per sequence.
///
/// Each inner list holds interval indices sorted by ascending weight.
#[derive(Clone, Debug)]
pub struct LabelGroup {
    pub label: String,
    pub members: Vec<Vec<usize>>,
}

impl LabelGroup {
    /// Size of the cross product over all sequences.
    pub fn box_count(&self) -> u64 {
        self.members
            .iter()
            .fold(1u64, |acc, m| acc.saturating_mul(m.len() as u64))
    }
}

/// The boxes materialised for one invocation.
#[derive(Clone, Debug, Default)]
pub struct BoxSet {
    boxes: Vec<ChainBox>,
    labels: Vec<String>,
    raw_count: u64,
    bounded: bool,
}

impl BoxSet {
    pub fn boxes(&self) -> &[ChainBox] {
        &self.boxes
    }

    pub fn into_boxes(self) -> Vec<ChainBox> {
        self.boxes
    }

    /// Labels present in every sequence, in first-seen order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of boxes the full cross product would have produced.
    pub fn raw_count(&self) -> u64 {
        self.raw_count
    }

    /// `true` if the bounding step discarded candidates.
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }
}

/// Groups intervals by label and keeps labels present in every sequence.
///
/// The first sequence seeds the candidate labels; a label missing from any
/// later sequence is dropped.
pub fn group_by_label<P>(sequences: &[Vec<Interval<P>>]) -> Vec<LabelGroup> {
    let d = sequences.len();
    let mut groups: IndexMap<&str, Vec<Vec<usize>>> = IndexMap::new();

    if let Some(first) = sequences.first() {
        for (i, iv) in first.iter().enumerate() {
            groups
                .entry(iv.label.as_str())
                .or_insert_with(|| vec![Vec::new(); d])[0]
                .push(i);
        }
    }

    for (s, seq) in sequences.iter().enumerate().skip(1) {
        for (i, iv) in seq.iter().enumerate() {
            if let Some(lists) = groups.get_mut(iv.label.as_str()) {
                lists[s].push(i);
            }
        }
        groups.retain(|_, lists| !lists[s].is_empty());
    }

    groups
        .into_iter()
        .map(|(label, mut members)| {
            for (s, list) in members.iter_mut().enumerate() {
                let seq = &sequences[s];
                list.sort_by(|&a, &b| seq[a].weight.total_cmp(&seq[b].weight));
            }
            LabelGroup {
                label: label.to_string(),
                members,
            }
        })
        .collect()
}

/// Builds every box for the given sequences.
///
/// `dims` is the dimensionality the caller expects; it must equal the number
/// of sequences. With `max_boxes > 0` the candidate intervals are trimmed
/// first so that at most `max_boxes` boxes come out; `seed` fixes the
/// tie-breaking order of that trimming.
pub fn generate_boxes<P>(
    sequences: &[Vec<Interval<P>>],
    dims: usize,
    max_boxes: u64,
    seed: u64,
) -> Result<BoxSet> {
    if dims != sequences.len() {
        return Err(ChainError::InvalidArgument(format!(
            "expected {} sequences, got {}",
            dims,
            sequences.len()
        )));
    }
    check_intervals(sequences)?;

    let mut groups = group_by_label(sequences);
    let labels = groups.iter().map(|g| g.label.clone()).collect::<Vec<_>>();
    let raw_count = groups
        .iter()
        .fold(0u64, |acc, g| acc.saturating_add(g.box_count()));

    let weights: Vec<Vec<f64>> = sequences
        .iter()
        .map(|seq| seq.iter().map(|iv| iv.weight).collect())
        .collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let bounded = bound_groups(&mut groups, &weights, max_boxes, &mut rng);

    let mut boxes = Vec::new();
    for group in &groups {
        materialize(sequences, group, &mut boxes);
    }

    log::debug!(
        "{} shared labels, {} raw boxes, {} materialised",
        labels.len(),
        raw_count,
        boxes.len()
    );

    Ok(BoxSet {
        boxes,
        labels,
        raw_count,
        bounded,
    })
}

// Walks the cross product of one label's per-sequence candidates.
fn materialize<P>(sequences: &[Vec<Interval<P>>], group: &LabelGroup, out: &mut Vec<ChainBox>) {
    if group.members.iter().any(|m| m.is_empty()) {
        return;
    }
    let d = group.members.len() as f64;

    for combo in group
        .members
        .iter()
        .map(|m| m.iter().copied())
        .multi_cartesian_product()
    {
        let chosen = combo
            .iter()
            .enumerate()
            .map(|(s, &i)| &sequences[s][i])
            .collect::<Vec<_>>();

        let start = Point::new(chosen.iter().map(|iv| iv.start).collect());
        let end = Point::new(chosen.iter().map(|iv| iv.end).collect());
        let weight = chosen.iter().map(|iv| iv.weight).sum::<f64>() / d;

        out.push(ChainBox {
            label: group.label.clone(),
            start,
            end,
            weight,
            members: combo,
        });
    }
}
