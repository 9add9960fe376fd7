use thiserror::Error;

/// Errors that can occur when rebuilding a sample from a flat vector.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The vector length does not match what the template requires.
    #[error("vector has length {actual}, but the template requires {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
