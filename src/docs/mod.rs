//! Docstring binding for runtime-exposed symbols
//!
//! A registration layer calls [`attach_doc`] once per exposed symbol, after
//! the symbol exists and before scripts can see it.
//!
//! # Targets
//!
//! | Value                  | Documentation slot                   |
//! |------------------------|--------------------------------------|
//! | [`Function`]           | the function's symbol record         |
//! | [`BoundMethod`]        | the wrapped function's record        |
//! | [`MethodDescriptor`]   | the method's symbol record           |
//! | [`PropertyDescriptor`] | the property's symbol record         |
//! | [`TypeObject`]         | the type's symbol record             |
//! | object map             | its `doc` entry                      |
//!
//! Slots are written at most once. Typed slots are checked and written under
//! one lock; object maps are mutated through the caller's exclusive borrow.

pub mod binder;
pub mod descriptor;
pub mod error;

pub use binder::{attach_doc, DocText, DOC_ATTRIBUTE};
pub use descriptor::{
    BoundMethod, Descriptor, DocSlot, Function, MethodDescriptor, PropertyDescriptor, SymbolDef,
    TypeObject,
};
pub use error::{AttachError, DescriptorKind};
