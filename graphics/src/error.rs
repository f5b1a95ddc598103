//! Graphics error types.

use std::fmt;

/// Errors that can occur in the graphics system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphicsError {
    /// An invalid parameter was provided.
    InvalidParameter(String),
    /// Shader code is not in a format the engine can consume.
    InvalidShaderCode(String),
}

impl fmt::Display for GraphicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter(msg) => write!(f, "invalid parameter: {msg}"),
            Self::InvalidShaderCode(msg) => write!(f, "invalid shader code: {msg}"),
        }
    }
}

impl std::error::Error for GraphicsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GraphicsError::InvalidParameter("size is 3".to_string());
        assert_eq!(err.to_string(), "invalid parameter: size is 3");

        let err = GraphicsError::InvalidShaderCode("missing magic number".to_string());
        assert_eq!(err.to_string(), "invalid shader code: missing magic number");
    }
}
