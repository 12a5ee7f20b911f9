//! Errors returned by the array and the script runner.
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ArrayError {
    /// Read past the live elements, or insert beyond the end.
    ///
    /// `index` is wide enough to hold any `usize` from the array and any
    /// negative index from a script without clamping.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: i128, len: usize },
    /// `remove` found no element equal to the value.
    #[error("element not found: {0:?}")]
    NotFound(String),
    /// The allocator refused the buffer, or the capacity overflowed.
    #[error("could not allocate storage for {capacity} elements")]
    ResourceExhaustion { capacity: usize },
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("could not write output: {0}")]
    Output(String),
    #[error("could not initialize logger: {0}")]
    Logger(String),
}

impl ArrayError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        ArrayError::IndexOutOfRange {
            // usize is at most 64 bits, so the cast is lossless.
            index: index as i128,
            len,
        }
    }
}

impl From<std::io::Error> for ArrayError {
    fn from(error: std::io::Error) -> Self {
        ArrayError::Output(error.to_string())
    }
}
