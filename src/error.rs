//! Fatal error conditions of the construction.

use thiserror::Error;

/// Conditions that stop an evaluation.
///
/// Every variant is fatal. Any byte sequence is a valid input, so an error
/// always reports an environment or programmer fault, never a bad input.
/// The C entry points abort the process on any of them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The scratch area could not be reserved.
    #[error("failed to allocate {bytes} bytes of scratch memory")]
    ScratchAllocation { bytes: usize },

    /// The memory-hard core refused to run or the scratch area does not fit it.
    #[error("memory-hard evaluation failed: {0}")]
    Evaluation(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
