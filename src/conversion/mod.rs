//! Document conversion for rhai values
//!
//! # Features
//!
//! - **Capability classification**: each value is classified once, in a fixed
//!   precedence order, before it is encoded
//! - **Exact integers**: integers of any width become `i64` or `u64`
//!   documents, or fail with `IntegerOutOfRange`
//! - **Byte strings**: blobs encode as base64 text (one-directional)
//! - **Configurable**: nesting limit and base64 alphabet via [`ConversionConfig`]

pub mod classify;
pub mod config;
pub mod converter;
pub mod error;

pub use classify::{classify, ValueKind, WideInt};
pub use config::{Base64Alphabet, ConversionConfig};
pub use converter::{decode, encode, Converter, Document};
pub use error::ConversionError;
