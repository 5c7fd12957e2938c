//! Doc binding error types

use std::fmt;
use std::str::Utf8Error;

use thiserror::Error;

/// The kind of symbol a docstring was attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    /// Plain callable
    Function,
    /// Instance method wrapping a callable
    BoundMethod,
    /// Method accessor exposed on a type
    Method,
    /// Property (getter/setter) accessor
    Property,
    /// Type object
    Type,
    /// Any other object carrying a generic `doc` attribute
    Object,
}

impl fmt::Display for DescriptorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Function | Self::BoundMethod => "function",
            Self::Method => "method",
            Self::Property => "attribute",
            Self::Type => "type",
            Self::Object => "object",
        };
        f.write_str(label)
    }
}

/// Errors that can occur while attaching a docstring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachError {
    /// Doc text given as bytes is not valid UTF-8
    #[error("Error unpacking doc text as utf-8: {0}")]
    InvalidEncoding(#[from] Utf8Error),

    /// The symbol already carries a non-empty docstring
    #[error("{kind} '{name}' already has a docstring")]
    AlreadyDocumented { kind: DescriptorKind, name: String },

    /// The target rejects assignment of a doc attribute
    #[error("Cannot set a docstring for a value of type '{type_name}'")]
    UnsupportedTarget { type_name: String },
}

impl AttachError {
    /// Create an already documented error
    pub fn already_documented(kind: DescriptorKind, name: impl Into<String>) -> Self {
        Self::AlreadyDocumented {
            kind,
            name: name.into(),
        }
    }

    /// Create an unsupported target error
    pub fn unsupported_target(type_name: impl Into<String>) -> Self {
        Self::UnsupportedTarget {
            type_name: type_name.into(),
        }
    }
}
