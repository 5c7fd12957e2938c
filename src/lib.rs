//! # rhai-bridge: rhai values ↔ documents, and docstrings for exposed symbols
//!
//! Two independent pieces used by a layer that exposes native symbols to
//! rhai scripts:
//!
//! 1. **Document Converter** - [`encode`] a rhai `Dynamic` into a
//!    `serde_json::Value` document and [`decode`] it back, with exact
//!    integer range handling and a fixed capability precedence
//! 2. **Doc Binder** - [`attach_doc`] writes a docstring into a function,
//!    bound method, method descriptor, property descriptor, type object or
//!    object map exactly once
//!
//! [`register_bridge`] installs both into a rhai `Engine`.
//!
//! ## Example Usage
//!
//! ```rust
//! use rhai::{Dynamic, Map};
//! use rhai_bridge::docs::{attach_doc, TypeObject};
//! use rhai_bridge::{decode, encode};
//! use serde_json::json;
//!
//! // Documents in, values out, and back
//! let doc = json!({ "name": "cache", "shards": 4, "ratio": 0.5 });
//! let value = decode(&doc);
//! assert_eq!(encode(&value).unwrap(), doc);
//!
//! // Document a type once, before publishing it
//! let cache = TypeObject::new("Cache");
//! attach_doc(&mut Dynamic::from(cache.clone()), "An in-memory cache").unwrap();
//! assert_eq!(cache.doc().as_deref(), Some("An in-memory cache"));
//! ```

pub mod conversion;
pub mod docs;
pub mod error;
pub mod registration;

pub use conversion::{decode, encode, ConversionConfig, ConversionError, Converter, Document};
pub use docs::{attach_doc, AttachError, Descriptor, DescriptorKind, DocText};
pub use error::{result_to_dynamic, BridgeError};
pub use registration::{register_bridge, register_bridge_with};

// Re-export rhai types that users will commonly need
pub use rhai::{Array, Blob, Dynamic, Engine, Map};
