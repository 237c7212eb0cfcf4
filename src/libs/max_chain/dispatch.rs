use super::boxes::generate_boxes;
use super::config::ChainConfig;
use super::error::{ChainError, Result};
use super::interval::Interval;
use super::sweep::{sweep, MaxChain};

/// Result of a [`max_chain`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// The sweep ran; the chain may be empty
    Chain(MaxChain),
    /// More boxes than `ChainConfig::box_limit` survived bounding
    Skipped { boxes: u64, limit: u64 },
}

impl Outcome {
    pub fn ran(&self) -> bool {
        matches!(self, Outcome::Chain(_))
    }

    pub fn chain(&self) -> Option<&MaxChain> {
        match self {
            Outcome::Chain(chain) => Some(chain),
            Outcome::Skipped { .. } => None,
        }
    }

    pub fn into_chain(self) -> Option<MaxChain> {
        match self {
            Outcome::Chain(chain) => Some(chain),
            Outcome::Skipped { .. } => None,
        }
    }
}

/// Heaviest chain of same-label boxes across all `sequences`.
///
/// * no sequences: an empty chain of weight 0
/// * one sequence: [`ChainError::LogicError`], there is nothing to chain against
/// * more than `config.max_dimensions`: [`ChainError::InvalidArgument`]
///
/// ```
/// use maxchain::libs::max_chain::{max_chain, ChainConfig, Interval};
///
/// let a = vec![Interval::bare("a", 0, 1, 0.1), Interval::bare("c", 1, 2, 1.0)];
/// let b = vec![Interval::bare("c", 0, 1, 1.0), Interval::bare("c", 1, 2, 0.1)];
///
/// let outcome = max_chain(&[a, b], &ChainConfig::default()).unwrap();
/// let chain = outcome.chain().unwrap();
/// assert_eq!(chain.labels(), vec!["c"]);
/// assert!((chain.weight - 1.0).abs() < 1e-12);
/// ```
pub fn max_chain<P>(sequences: &[Vec<Interval<P>>], config: &ChainConfig) -> Result<Outcome> {
    let dims = sequences.len();
    match dims {
        0 => return Ok(Outcome::Chain(MaxChain::empty())),
        1 => {
            return Err(ChainError::LogicError(
                "a max chain needs at least 2 sequences".to_string(),
            ))
        }
        d if d > config.max_dimensions => {
            return Err(ChainError::InvalidArgument(format!(
                "{} sequences exceed the maximum of {}",
                d, config.max_dimensions
            )))
        }
        _ => {}
    }

    let box_set = generate_boxes(sequences, dims, config.max_boxes, config.seed)?;
    if let Some(limit) = config.box_limit {
        if box_set.len() as u64 > limit {
            log::warn!(
                "skipping max chain: {} boxes exceed the limit of {}",
                box_set.len(),
                limit
            );
            return Ok(Outcome::Skipped {
                boxes: box_set.len() as u64,
                limit,
            });
        }
    }

    let chain = sweep(box_set.boxes())?;
    if cfg!(debug_assertions) {
        chain.validate()?;
    }
    Ok(Outcome::Chain(chain))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seq(items: &[(&str, i64, i64, f64)]) -> Vec<Interval<()>> {
        items
            .iter()
            .map(|&(l, s, e, w)| Interval::bare(l, s, e, w))
            .collect()
    }

    fn acgt() -> Vec<Interval<()>> {
        seq(&[
            ("a", 0, 1, 1.0),
            ("c", 1, 2, 1.0),
            ("g", 2, 3, 1.0),
            ("t", 3, 4, 1.0),
        ])
    }

    #[test]
    fn test_best_matching_pair() {
        let seqs = vec![
            seq(&[("a", 0, 1, 0.1), ("c", 1, 2, 1.0)]),
            seq(&[("c", 0, 1, 1.0), ("c", 1, 2, 0.1)]),
        ];
        let outcome = max_chain(&seqs, &ChainConfig::default()).unwrap();
        assert!(outcome.ran());
        let chain = outcome.into_chain().unwrap();
        assert_eq!(chain.labels(), vec!["c"]);
        assert_relative_eq!(chain.weight, 1.0);
        assert_eq!(chain.boxes[0].members, vec![1, 0]);
    }

    #[test]
    fn test_identical_sequences() {
        let seqs = vec![acgt(), acgt()];
        let chain = max_chain(&seqs, &ChainConfig::default())
            .unwrap()
            .into_chain()
            .unwrap();
        assert_eq!(chain.labels(), vec!["a", "c", "g", "t"]);
        assert_relative_eq!(chain.weight, 4.0);
        let sum: f64 = chain.boxes.iter().map(|b| b.weight).sum();
        assert_relative_eq!(sum, chain.weight);
    }

    #[test]
    fn test_five_sequences() {
        let seqs = vec![acgt(), acgt(), acgt(), acgt(), acgt()];
        let chain = max_chain(&seqs, &ChainConfig::default())
            .unwrap()
            .into_chain()
            .unwrap();
        assert_eq!(chain.len(), 4);
        assert_relative_eq!(chain.weight, 4.0);
    }

    #[test]
    fn test_dimension_guards() {
        let none: Vec<Vec<Interval<()>>> = vec![];
        let chain = max_chain(&none, &ChainConfig::default())
            .unwrap()
            .into_chain()
            .unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.weight, 0.0);

        assert!(matches!(
            max_chain(&[acgt()], &ChainConfig::default()),
            Err(ChainError::LogicError(_))
        ));

        let three = vec![acgt(), acgt(), acgt()];
        let config = ChainConfig::default().with_max_dimensions(2);
        assert!(matches!(
            max_chain(&three, &config),
            Err(ChainError::InvalidArgument(_))
        ));

        let six = vec![acgt(); 6];
        assert!(matches!(
            max_chain(&six, &ChainConfig::default()),
            Err(ChainError::InvalidArgument(_))
        ));
        // the cap is a runtime value
        let config = ChainConfig::default().with_max_dimensions(6);
        assert!(max_chain(&six, &config).unwrap().ran());
    }

    #[test]
    fn test_no_shared_label() {
        let seqs = vec![seq(&[("a", 0, 1, 1.0)]), seq(&[("c", 0, 1, 1.0)])];
        let chain = max_chain(&seqs, &ChainConfig::default())
            .unwrap()
            .into_chain()
            .unwrap();
        assert!(chain.is_empty());
        assert_eq!(chain.weight, 0.0);
    }

    #[test]
    fn test_box_limit() {
        let seqs = vec![acgt(), acgt()];
        let config = ChainConfig::default().with_box_limit(Some(3));
        let outcome = max_chain(&seqs, &config).unwrap();
        assert!(!outcome.ran());
        assert_eq!(outcome, Outcome::Skipped { boxes: 4, limit: 3 });

        let config = ChainConfig::default().with_box_limit(Some(4));
        assert!(max_chain(&seqs, &config).unwrap().ran());
    }

    #[test]
    fn test_bounded_run_is_deterministic() {
        let seqs: Vec<Vec<Interval<()>>> = (0..3)
            .map(|s| {
                (0..10)
                    .map(|i| Interval::bare("m", i * 4 + s, i * 4 + s + 2, 1.0))
                    .collect()
            })
            .collect();
        let config = ChainConfig::default().with_max_boxes(50).with_seed(17);

        let first = max_chain(&seqs, &config).unwrap();
        let second = max_chain(&seqs, &config).unwrap();
        assert_eq!(first, second);
        let chain = first.into_chain().unwrap();
        assert!(!chain.is_empty());
        chain.validate().unwrap();
    }
}
