//! Crate-level error type and script-facing error helpers

use rhai::{Dynamic, EvalAltResult, Map, Position};
use thiserror::Error;

use crate::conversion::ConversionError;
use crate::docs::AttachError;

/// Any error raised by the bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Encoding a value into a document failed
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Attaching a docstring failed
    #[error(transparent)]
    Attach(#[from] AttachError),

    /// Document text could not be parsed or printed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BridgeError {
    /// Get the error type name exposed to scripts
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Conversion(ConversionError::UnsupportedType { .. }) => "UnsupportedType",
            Self::Conversion(ConversionError::IntegerOutOfRange { .. }) => "IntegerOutOfRange",
            Self::Conversion(ConversionError::DepthLimitExceeded { .. }) => "DepthLimitExceeded",
            Self::Attach(AttachError::InvalidEncoding(_)) => "InvalidEncoding",
            Self::Attach(AttachError::AlreadyDocumented { .. }) => "AlreadyDocumented",
            Self::Attach(AttachError::UnsupportedTarget { .. }) => "UnsupportedTarget",
            Self::Json(_) => "JsonError",
        }
    }

    /// Convert into a rhai runtime error
    pub fn into_eval_error(self) -> Box<EvalAltResult> {
        Box::new(EvalAltResult::ErrorRuntime(
            Dynamic::from(self.to_string()),
            Position::NONE,
        ))
    }
}

/// Convert a Result to a rhai-friendly result map
///
/// Returns a map in the format:
/// - Success: `#{ ok: true, value: ... }`
/// - Error: `#{ ok: false, error_type: "...", message: "..." }`
pub fn result_to_dynamic<T, E>(result: Result<T, E>) -> Dynamic
where
    T: Into<Dynamic>,
    E: Into<BridgeError>,
{
    let mut map = Map::new();

    match result {
        Ok(value) => {
            map.insert("ok".into(), Dynamic::from(true));
            map.insert("value".into(), value.into());
        }
        Err(err) => {
            let err = err.into();
            map.insert("ok".into(), Dynamic::from(false));
            map.insert("error_type".into(), Dynamic::from(err.error_type()));
            map.insert("message".into(), Dynamic::from(err.to_string()));
        }
    }

    Dynamic::from_map(map)
}
