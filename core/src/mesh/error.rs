//! Mesh preparation errors.

use std::fmt::Display;

use thiserror::Error;

/// Errors reported by mesh preparation routines.
///
/// The message carries the name of the operation that rejected its input,
/// e.g. `generate_flat_normals_into(): position count not divisible by 3`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// An input or output buffer violated a size contract.
    #[error("{0}")]
    InvalidArgument(String),
}

impl MeshError {
    pub(crate) fn invalid_argument(operation: &str, message: impl Display) -> Self {
        Self::InvalidArgument(format!("{operation}(): {message}"))
    }

    pub(crate) fn bad_output_size(operation: &str, expected: usize, got: usize) -> Self {
        Self::invalid_argument(
            operation,
            format_args!("bad output size, expected {expected} but got {got}"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MeshError::invalid_argument("resample", "index count not divisible by 3");
        assert_eq!(err.to_string(), "resample(): index count not divisible by 3");

        let err = MeshError::bad_output_size("resample", 6, 7);
        assert_eq!(
            err.to_string(),
            "resample(): bad output size, expected 6 but got 7"
        );
    }
}
