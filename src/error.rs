//! Error types for paracore.
//!
//! Editing operations treat out-of-range positions as programming errors and
//! panic. The variants here cover the checks that run on data coming from
//! outside the core: font run tables handed over by a document reader, and
//! the invariant audit used by tests and debug tooling.

use std::fmt;

/// Result type alias for paracore operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for paracore operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Position outside `[0, size]`.
    PositionOutOfBounds { pos: usize, size: usize },
    /// Font run table that could not be normalized into a partition.
    InvalidFontRuns(String),
    /// Change range list that does not cover `[0, size]`.
    InvalidChanges(String),
    /// Inset table entry that does not line up with an inset sentinel.
    InsetMismatch { pos: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PositionOutOfBounds { pos, size } => {
                write!(f, "position {pos} out of bounds for paragraph of size {size}")
            }
            Self::InvalidFontRuns(reason) => write!(f, "invalid font runs: {reason}"),
            Self::InvalidChanges(reason) => write!(f, "invalid change ranges: {reason}"),
            Self::InsetMismatch { pos } => {
                write!(f, "inset table out of sync with content at position {pos}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::PositionOutOfBounds { pos: 7, size: 3 };
        assert!(err.to_string().contains("position 7"));
        assert!(err.to_string().contains("size 3"));

        let err = Error::InvalidFontRuns("gap after 4".to_string());
        assert!(err.to_string().contains("gap after 4"));

        let err = Error::InsetMismatch { pos: 2 };
        assert!(err.to_string().contains("position 2"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&Error::InvalidChanges("empty".to_string()));
    }
}
