/// Errors raised by the max-chain core.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The caller supplied inconsistent input (e.g. too many sequences)
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// An internal invariant was violated (e.g. the sweep ran out of order)
    #[error("max chain logic error: {0}")]
    LogicError(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;
