use thiserror::Error;

/// Broad classification of a [`ShapeError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed something that cannot be honored. Nothing was copied.
    InvalidArgument,
    /// An operation finished with a result that violates its own postcondition.
    /// This is a bug in the library and must not be retried.
    ConsistencyFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Reduction {reduction} on axis {axis} cannot be negative")]
    NegativeReduction { axis: usize, reduction: isize },

    #[error("Reduction {reduction} on axis {axis} exceeds dimension size {size}")]
    ReductionExceedsDimension {
        axis: usize,
        reduction: usize,
        size: usize,
    },

    #[error("{given} axes requested but the array only has {ndim}")]
    RankMismatch { given: usize, ndim: usize },

    #[error("Target size {target} on axis {axis} exceeds input size {size}, cropping cannot enlarge")]
    ShapeExceedsInput {
        axis: usize,
        target: usize,
        size: usize,
    },

    #[error("Invalid where: {0}")]
    InvalidPlacement(String),

    #[error("Invalid padding mode: {0}")]
    InvalidMode(String),

    #[error("Cannot pad empty axis {axis} with mode {mode}")]
    EmptyAxis { axis: usize, mode: &'static str },

    #[error("No volume named {0:?}")]
    MissingKey(String),

    #[error("Volume {key:?} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        key: String,
        expected: [usize; 3],
        actual: [usize; 3],
    },

    #[error("No foreground voxels found")]
    EmptyForeground,

    #[error("Final size is {actual:?}, instead of {expected:?}")]
    SizeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
}

impl ShapeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ShapeError::SizeMismatch { .. } => ErrorKind::ConsistencyFailure,
            _ => ErrorKind::InvalidArgument,
        }
    }
}

pub type Result<T, E = ShapeError> = std::result::Result<T, E>;
