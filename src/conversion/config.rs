//! Configuration for the document converter

use base64::engine::general_purpose::{STANDARD, URL_SAFE};
use base64::engine::GeneralPurpose;
use serde::{Deserialize, Serialize};

/// Base64 alphabet used when encoding byte strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Base64Alphabet {
    /// RFC 4648 standard alphabet, padded
    #[default]
    Standard,
    /// RFC 4648 URL-safe alphabet, padded
    UrlSafe,
}

impl Base64Alphabet {
    pub(crate) fn engine(self) -> &'static GeneralPurpose {
        match self {
            Self::Standard => &STANDARD,
            Self::UrlSafe => &URL_SAFE,
        }
    }
}

/// Configuration for [`Converter`](super::Converter)
///
/// # Example
///
/// ```rust
/// use rhai_bridge::conversion::{Base64Alphabet, ConversionConfig};
///
/// let config = ConversionConfig::default()
///     .with_max_depth(32)
///     .with_bytes_alphabet(Base64Alphabet::UrlSafe);
/// assert_eq!(config.max_depth, Some(32));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Maximum container nesting accepted by `encode`, unbounded if `None`
    ///
    /// Scalars at the top level are depth 0; each array or map adds one.
    pub max_depth: Option<usize>,

    /// Alphabet for byte strings, which are encoded as base64 text
    pub bytes_alphabet: Base64Alphabet,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            bytes_alphabet: Base64Alphabet::Standard,
        }
    }
}

impl ConversionConfig {
    /// Limit the nesting depth accepted by `encode`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Set the base64 alphabet for byte strings
    pub fn with_bytes_alphabet(mut self, alphabet: Base64Alphabet) -> Self {
        self.bytes_alphabet = alphabet;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_config() {
        let config = ConversionConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.bytes_alphabet, Base64Alphabet::Standard);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: ConversionConfig =
            serde_json::from_value(json!({ "bytes_alphabet": "url_safe" })).unwrap();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.bytes_alphabet, Base64Alphabet::UrlSafe);
    }

    #[test]
    fn test_serialize_config() {
        let config = ConversionConfig::default().with_max_depth(8);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({ "max_depth": 8, "bytes_alphabet": "standard" }));
    }

    #[test]
    fn test_deserialize_depth_limit() {
        let config: ConversionConfig = serde_json::from_value(json!({ "max_depth": 16 })).unwrap();
        assert_eq!(config.max_depth, Some(16));

        let config: ConversionConfig =
            serde_json::from_value(json!({ "max_depth": null })).unwrap();
        assert_eq!(config.max_depth, None);
    }
}
