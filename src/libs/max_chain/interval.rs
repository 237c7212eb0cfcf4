use super::error::{ChainError, Result};

/// A labelled, weighted hit on one input sequence.
///
/// Only intervals sharing a `label` across every sequence can be combined
/// into a box. `payload` is opaque to the core and is handed back with the
/// resulting chain.
#[derive(Clone, Debug, PartialEq)]
pub struct Interval<P> {
    pub label: String,
    pub start: i64,
    pub end: i64,
    pub weight: f64,
    pub payload: P,
}

impl<P> Interval<P> {
    pub fn new(label: impl Into<String>, start: i64, end: i64, weight: f64, payload: P) -> Self {
        Interval {
            label: label.into(),
            start,
            end,
            weight,
            payload,
        }
    }

    pub fn len(&self) -> i64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

impl Interval<()> {
    /// An interval without payload, handy for tests and benchmarks.
    pub fn bare(label: impl Into<String>, start: i64, end: i64, weight: f64) -> Self {
        Interval::new(label, start, end, weight, ())
    }
}

/// Rejects reversed coordinates and non-finite weights.
pub(crate) fn check_intervals<P>(sequences: &[Vec<Interval<P>>]) -> Result<()> {
    for (s, seq) in sequences.iter().enumerate() {
        for (i, iv) in seq.iter().enumerate() {
            if iv.end < iv.start {
                return Err(ChainError::InvalidArgument(format!(
                    "interval {} of sequence {} ends before it starts ({} > {})",
                    i, s, iv.start, iv.end
                )));
            }
            if !iv.weight.is_finite() {
                return Err(ChainError::InvalidArgument(format!(
                    "interval {} of sequence {} has a non-finite weight",
                    i, s
                )));
            }
        }
    }
    Ok(())
}
