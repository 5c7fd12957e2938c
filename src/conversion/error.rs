//! Conversion error types
//!
//! Defines the errors `encode` can report. `decode` is total and has none.

use rhai::Dynamic;
use thiserror::Error;

/// Errors that can occur while encoding a rhai `Dynamic` into a document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Value matches none of the supported capabilities
    #[error("Unsupported type for JSON conversion: {type_name} ({repr})")]
    UnsupportedType { type_name: String, repr: String },

    /// Integer fits neither i64 nor u64
    #[error("Integer out of range for both i64 and u64: {repr}")]
    IntegerOutOfRange { repr: String },

    /// Containers nested deeper than the configured limit
    #[error("Value nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },
}

impl ConversionError {
    /// Create an unsupported type error describing `value`
    pub fn unsupported_type(value: &Dynamic) -> Self {
        Self::UnsupportedType {
            type_name: value.type_name().to_string(),
            repr: format!("{:?}", value),
        }
    }

    /// Create an integer out of range error
    pub fn integer_out_of_range(repr: impl Into<String>) -> Self {
        Self::IntegerOutOfRange { repr: repr.into() }
    }

    /// Create a depth limit error
    pub fn depth_limit_exceeded(limit: usize) -> Self {
        Self::DepthLimitExceeded { limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_type_names_the_value() {
        let err = ConversionError::unsupported_type(&Dynamic::from(f64::NAN));
        let message = err.to_string();
        assert!(message.contains("f64"));
        assert!(message.contains("NaN"));
    }

    #[test]
    fn test_integer_out_of_range_display() {
        let err = ConversionError::integer_out_of_range(u128::MAX.to_string());
        assert!(err.to_string().contains("340282366920938463463374607431768211455"));
    }

    #[test]
    fn test_depth_limit_display() {
        let err = ConversionError::depth_limit_exceeded(4);
        assert_eq!(err.to_string(), "Value nesting exceeds the maximum depth of 4");
    }
}
