use thiserror::Error;

/// Errors that stop a dump from being decoded at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DumpError {
    /// The dump length is none of the recognized card sizes
    #[error(
        "Wrong dump size: {actual} bytes. Only 320, 1024, 2048 or 4096 bytes are allowed"
    )]
    InvalidLength { actual: usize },

    /// Forced 1K decoding needs at least a full 1K image
    #[error("Dump too small: expected at least {expected} bytes, got {actual}")]
    TooSmall { expected: usize, actual: usize },
}

impl DumpError {
    pub fn invalid_length(actual: usize) -> Self {
        Self::InvalidLength { actual }
    }

    pub fn too_small(expected: usize, actual: usize) -> Self {
        Self::TooSmall { expected, actual }
    }
}
