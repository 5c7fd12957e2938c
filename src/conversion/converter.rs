//! rhai `Dynamic` ↔ JSON document conversion
//!
//! Provides the bidirectional conversion between rhai values and
//! `serde_json::Value` documents.
//!
//! # Type Mappings
//!
//! | rhai                        | Document                  |
//! |-----------------------------|---------------------------|
//! | `()`                        | `null`                    |
//! | `bool`                      | `bool`                    |
//! | `INT`, `i8..i128`, `u8..u128` | `Int` (i64) or `UInt` (u64) |
//! | `FLOAT`, `f32`              | `Float`                   |
//! | `Blob`                      | base64 `String`           |
//! | `ImmutableString`, `char`   | `String`                  |
//! | `Array`                     | `Array`                   |
//! | `Map`                       | `Object`                  |
//!
//! Byte strings are one-directional: `decode` returns the base64 text as a
//! string and never reverses it. Callers that store blobs must know the
//! convention.

use base64::Engine as _;
use rhai::{Array, Blob, Dynamic, ImmutableString, Map};
use serde_json::{Number, Value};

use super::classify::{classify, ValueKind, WideInt};
use super::config::ConversionConfig;
use super::error::ConversionError;

/// The structured-document model values are converted into
pub type Document = Value;

/// Converts between rhai values and documents using a [`ConversionConfig`]
///
/// # Example
///
/// ```rust
/// use rhai::Dynamic;
/// use rhai_bridge::conversion::Converter;
/// use serde_json::json;
///
/// let converter = Converter::default();
/// let doc = converter.encode(&Dynamic::from(42_i64)).unwrap();
/// assert_eq!(doc, json!(42));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConversionConfig,
}

impl Converter {
    /// Create a converter with the given configuration
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Convert a rhai value into a document
    ///
    /// # Errors
    ///
    /// - `UnsupportedType` for values with no document representation
    ///   (custom types, function pointers, non-finite floats)
    /// - `IntegerOutOfRange` for integers that fit neither i64 nor u64
    /// - `DepthLimitExceeded` when a `max_depth` is configured and containers
    ///   nest deeper than it
    pub fn encode(&self, value: &Dynamic) -> Result<Document, ConversionError> {
        self.encode_at(value, 0).inspect_err(|e| {
            tracing::trace!("Encoding {} failed: {}", value.type_name(), e);
        })
    }

    /// Convert a document into a rhai value
    ///
    /// Total over every document. Objects become rhai maps, which iterate in
    /// key order.
    pub fn decode(&self, doc: &Document) -> Dynamic {
        match doc {
            Value::Null => Dynamic::UNIT,
            Value::Bool(b) => Dynamic::from(*b),
            Value::Number(n) => decode_number(n),
            Value::String(s) => Dynamic::from(s.clone()),
            Value::Array(items) => {
                let array: Array = items.iter().map(|item| self.decode(item)).collect();
                Dynamic::from_array(array)
            }
            Value::Object(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    map.insert(key.as_str().into(), self.decode(value));
                }
                Dynamic::from_map(map)
            }
        }
    }

    fn encode_at(&self, value: &Dynamic, depth: usize) -> Result<Document, ConversionError> {
        match classify(value) {
            ValueKind::Null => Ok(Value::Null),
            ValueKind::Bool(b) => Ok(Value::Bool(b)),
            ValueKind::Integer(n) => encode_integer(n),
            ValueKind::Float(f) => Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| ConversionError::unsupported_type(value)),
            ValueKind::Bytes => {
                let blob = value
                    .read_lock::<Blob>()
                    .ok_or_else(|| ConversionError::unsupported_type(value))?;
                let text = self.config.bytes_alphabet.engine().encode(blob.as_slice());
                Ok(Value::String(text))
            }
            ValueKind::Text => {
                let text = value
                    .read_lock::<ImmutableString>()
                    .ok_or_else(|| ConversionError::unsupported_type(value))?;
                Ok(Value::String(text.to_string()))
            }
            ValueKind::Char(c) => Ok(Value::String(c.to_string())),
            ValueKind::Sequence => {
                let depth = self.descend(depth)?;
                let array = value
                    .read_lock::<Array>()
                    .ok_or_else(|| ConversionError::unsupported_type(value))?;
                let items = array
                    .iter()
                    .map(|item| self.encode_at(item, depth))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Value::Array(items))
            }
            ValueKind::Mapping => {
                let depth = self.descend(depth)?;
                let map = value
                    .read_lock::<Map>()
                    .ok_or_else(|| ConversionError::unsupported_type(value))?;
                let mut object = serde_json::Map::with_capacity(map.len());
                for (key, item) in map.iter() {
                    // Last write wins for keys that stringify identically.
                    object.insert(key.to_string(), self.encode_at(item, depth)?);
                }
                Ok(Value::Object(object))
            }
            ValueKind::Unsupported => Err(ConversionError::unsupported_type(value)),
        }
    }

    fn descend(&self, depth: usize) -> Result<usize, ConversionError> {
        match self.config.max_depth {
            Some(limit) if depth >= limit => Err(ConversionError::depth_limit_exceeded(limit)),
            _ => Ok(depth + 1),
        }
    }
}

fn encode_integer(n: WideInt) -> Result<Document, ConversionError> {
    if let Some(signed) = n.to_i64() {
        return Ok(Value::Number(Number::from(signed)));
    }
    if let Some(unsigned) = n.to_u64() {
        return Ok(Value::Number(Number::from(unsigned)));
    }
    Err(ConversionError::integer_out_of_range(n.to_string()))
}

fn decode_number(n: &Number) -> Dynamic {
    if let Some(i) = n.as_i64() {
        return Dynamic::from(i);
    }
    // Past INT range: keep the full u64 so encoding it again yields UInt.
    if let Some(u) = n.as_u64() {
        return Dynamic::from(u);
    }
    // Should not happen: without arbitrary_precision every number is i64, u64 or f64.
    n.as_f64().map(Dynamic::from).unwrap_or(Dynamic::UNIT)
}

/// Convert a rhai value into a document with the default configuration
///
/// # Example
///
/// ```rust
/// use rhai::{Dynamic, Map};
/// use rhai_bridge::encode;
/// use serde_json::json;
///
/// let mut map = Map::new();
/// map.insert("name".into(), Dynamic::from("test"));
/// map.insert("count".into(), Dynamic::from(42_i64));
///
/// let doc = encode(&Dynamic::from_map(map)).unwrap();
/// assert_eq!(doc, json!({ "name": "test", "count": 42 }));
/// ```
pub fn encode(value: &Dynamic) -> Result<Document, ConversionError> {
    Converter::default().encode(value)
}

/// Convert a document into a rhai value with the default configuration
pub fn decode(doc: &Document) -> Dynamic {
    Converter::default().decode(doc)
}
