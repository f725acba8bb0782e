use thiserror::Error;

/// Bulk construction from a slice that is not strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BuildError {
    /// `keys[index]` is not greater than `keys[index - 1]`.
    #[error("keys are not strictly increasing at index {index}")]
    NotStrictlyIncreasing { index: usize },
}

/// A structural invariant found broken by `validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("in-order traversal is not strictly increasing")]
    Unordered,

    #[error("stored height {stored} differs from computed height {computed}")]
    StaleHeight { stored: isize, computed: isize },

    #[error("balance factor {factor} is out of [-1, 1]")]
    Unbalanced { factor: isize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("the number of worker threads must be at least 1")]
    ZeroThreads,

    #[error("the chunk size must be at least 1")]
    ZeroChunk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// At least one worker unwound while inserting. The remaining workers were joined.
    #[error("a worker thread panicked during insertion")]
    WorkerPanicked,
}
