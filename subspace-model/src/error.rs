use thiserror::Error;

/// Broad category of an [`Error`], for callers that only need to know
/// who is at fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An argument is out of range or describes a degenerate configuration.
    InvalidArgument,
    /// The input data does not satisfy the model's structural requirements.
    PreconditionViolation,
    /// The operation has no definition for this model.
    Unimplemented,
    /// A numerical routine failed to produce a result.
    Numerical,
}

/// Errors that can occur when building or using a linear model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("number of weights ({given}) cannot be greater than {n_components}")]
    TooManyWeights { given: usize, n_components: usize },

    #[error("requested {requested} components, but the model has {n_components}")]
    ComponentsOutOfRange {
        requested: usize,
        n_components: usize,
    },

    #[error("requested {requested} components, but at most {max} can be fitted")]
    TooManyComponents { requested: usize, max: usize },

    #[error("anchor points {anchors:?} are collinear")]
    DegenerateAnchors { anchors: [usize; 3] },

    #[error("anchor index {index} is out of range for {n_points} points")]
    AnchorOutOfRange { index: usize, n_points: usize },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },

    #[error("vector has length {actual}, but the model expects {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("at least {required} samples are required, got {given}")]
    InsufficientSamples { given: usize, required: usize },

    #[error("samples flatten to empty vectors")]
    EmptySample,

    #[error("sample {index} has length {actual}, but the first sample has length {expected}")]
    InconsistentSample {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("at least {required} points are required, got {given}")]
    InsufficientPoints { given: usize, required: usize },

    #[error("reference points do not span four independent similarity directions")]
    DegenerateReference,

    #[error("failed to rebuild sample")]
    Sample(#[from] subspace_core::Error),

    /// The operation is declared by [`LinearModel`](crate::LinearModel) but
    /// the model does not define it.
    #[error("`{operation}` is not implemented by this model")]
    NotImplemented { operation: &'static str },

    #[error("{method} decomposition failed")]
    DecompositionFailed { method: &'static str },
}

impl Error {
    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManyWeights { .. }
            | Self::ComponentsOutOfRange { .. }
            | Self::TooManyComponents { .. }
            | Self::DegenerateAnchors { .. }
            | Self::AnchorOutOfRange { .. }
            | Self::InvalidConfig { .. } => ErrorKind::InvalidArgument,
            Self::LengthMismatch { .. }
            | Self::InsufficientSamples { .. }
            | Self::EmptySample
            | Self::InconsistentSample { .. }
            | Self::InsufficientPoints { .. }
            | Self::DegenerateReference
            | Self::Sample(_) => ErrorKind::PreconditionViolation,
            Self::NotImplemented { .. } => ErrorKind::Unimplemented,
            Self::DecompositionFailed { .. } => ErrorKind::Numerical,
        }
    }
}
