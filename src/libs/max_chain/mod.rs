//! Maximal-weight chains of labelled intervals across several sequences.
//!
//! Every input sequence carries a set of labelled, weighted intervals (for
//! instance motif hits). A *box* picks one interval with the same label from
//! each sequence; a *chain* is a run of boxes whose corners are ordered in
//! every sequence at once. The heaviest chain is a weighted, multi-sequence
//! relative of the longest common subsequence.
//!
//! # Core Components
//!
//! * [`boxes`] - Label grouping and cross-product materialisation.
//! * [`bound`] - Adaptive trimming of candidates under a box-count ceiling.
//! * [`range_tree`] - Multi-level range tree for dominance queries.
//! * [`sweep`] - The chain sweep and its backtracking.
//! * [`dispatch`] - Entry point with dimensionality guards.
//!
//! # Algorithm Overview
//!
//! 1. **Boxes**: labels present in every sequence are expanded into boxes,
//!    optionally bounded in number.
//! 2. **Indexing**: box end points are indexed in a range tree over all but
//!    the first coordinate.
//! 3. **Sweep**: corners are visited in order of the first coordinate. The
//!    tree gives the heaviest chain whose end is dominated by the corner.
//! 4. **Backtracking**: the globally heaviest end point is followed back
//!    through the boxes that produced it.

pub mod bound;
pub mod boxes;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod interval;
pub mod point;
pub mod range_tree;
pub mod sweep;

pub use boxes::{generate_boxes, group_by_label, BoxSet, ChainBox, LabelGroup};
pub use config::ChainConfig;
pub use dispatch::{max_chain, Outcome};
pub use error::{ChainError, Result};
pub use interval::Interval;
pub use point::{Point, PointId};
pub use range_tree::{Best, RangeTree};
pub use sweep::{sweep, MaxChain};
