//! # Container Error Types
//!
//! Failures reported by the checked half of the container API.

use thiserror::Error;

/// Errors that can occur in checked container operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VectorError {
    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow: {requested} elements of {element_size} bytes")]
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },

    /// Checked access past the logical end of the vector.
    #[error("index out of bounds: index {index}, len {len}")]
    IndexOutOfBounds {
        /// The index that was requested.
        index: usize,
        /// Logical length at the time of access.
        len: usize,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for container operations.
pub type VectorResult<T> = Result<T, VectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_numbers() {
        let err = VectorError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index out of bounds: index 7, len 3");

        let err = VectorError::CapacityOverflow {
            requested: usize::MAX,
            element_size: 8,
        };
        assert!(err.to_string().starts_with("capacity overflow"));
    }
}
