//! One-shot docstring binding
//!
//! [`attach_doc`] writes documentation into a runtime-exposed symbol exactly
//! once. A second attempt against the same symbol is a configuration bug and
//! fails with [`AttachError::AlreadyDocumented`]; it is never ignored or
//! overwritten.
//!
//! The text is always copied into an owned buffer before it is stored, so a
//! slot never aliases storage the caller may release or reuse after the call.

use rhai::{Blob, Dynamic, ImmutableString, Map};

use super::descriptor::{Descriptor, DocSlot};
use super::error::{AttachError, DescriptorKind};

/// Key of the generic doc attribute on object maps
pub const DOC_ATTRIBUTE: &str = "doc";

/// Documentation text as handed over by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocText<'a> {
    /// Already-validated text
    Str(&'a str),
    /// Raw bytes that must be valid UTF-8
    Bytes(&'a [u8]),
}

impl DocText<'_> {
    /// Validate and copy the text into an owned buffer
    pub fn normalize(self) -> Result<Box<str>, AttachError> {
        let text = match self {
            Self::Str(text) => text,
            Self::Bytes(bytes) => std::str::from_utf8(bytes)?,
        };
        Ok(Box::from(text))
    }
}

impl<'a> From<&'a str> for DocText<'a> {
    fn from(text: &'a str) -> Self {
        Self::Str(text)
    }
}

impl<'a> From<&'a String> for DocText<'a> {
    fn from(text: &'a String) -> Self {
        Self::Str(text.as_str())
    }
}

impl<'a> From<&'a ImmutableString> for DocText<'a> {
    fn from(text: &'a ImmutableString) -> Self {
        Self::Str(text.as_str())
    }
}

impl<'a> From<&'a [u8]> for DocText<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for DocText<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        Self::Bytes(bytes.as_slice())
    }
}

impl<'a> From<&'a Blob> for DocText<'a> {
    fn from(bytes: &'a Blob) -> Self {
        Self::Bytes(bytes.as_slice())
    }
}

/// Attach a docstring to a runtime value
///
/// `target` is classified once (see [`Descriptor::classify`]) and the text is
/// written into its documentation slot. Nothing is mutated on failure.
///
/// # Errors
///
/// - `InvalidEncoding` if `text` is bytes that are not valid UTF-8
/// - `AlreadyDocumented` if the slot already holds non-empty documentation
/// - `UnsupportedTarget` if the value cannot carry a doc attribute
///
/// # Example
///
/// ```rust
/// use rhai::Dynamic;
/// use rhai_bridge::docs::{attach_doc, AttachError, Function};
///
/// let greet = Function::new("greet");
/// let mut target = Dynamic::from(greet.clone());
///
/// attach_doc(&mut target, "Say hello").unwrap();
/// assert_eq!(greet.doc().as_deref(), Some("Say hello"));
///
/// let err = attach_doc(&mut target, "again").unwrap_err();
/// assert!(matches!(err, AttachError::AlreadyDocumented { .. }));
/// ```
pub fn attach_doc<'t>(target: &mut Dynamic, text: impl Into<DocText<'t>>) -> Result<(), AttachError> {
    Descriptor::classify(target).attach(text)
}

impl Descriptor<'_> {
    /// Attach a docstring to this descriptor
    pub fn attach<'t>(self, text: impl Into<DocText<'t>>) -> Result<(), AttachError> {
        let text = text.into().normalize()?;
        let kind = self.kind();

        match self {
            Self::Function(f) => fill_slot(kind, f.name(), f.def().doc_slot(), text),
            Self::BoundMethod(m) => {
                let function = m.function();
                fill_slot(kind, function.name(), function.def().doc_slot(), text)
            }
            Self::Method(m) => fill_slot(kind, m.name(), m.def().doc_slot(), text),
            Self::Property(p) => fill_slot(kind, p.name(), p.def().doc_slot(), text),
            Self::Type(t) => fill_slot(kind, t.name(), t.def().doc_slot(), text),
            Self::Object(value) => set_doc_attribute(value, text),
        }
    }
}

fn fill_slot(
    kind: DescriptorKind,
    name: &ImmutableString,
    slot: &DocSlot,
    text: Box<str>,
) -> Result<(), AttachError> {
    if !slot.fill(text) {
        tracing::warn!("Rejected second docstring for {} '{}'", kind, name);
        return Err(AttachError::already_documented(kind, name.as_str()));
    }
    tracing::debug!("Attached docstring to {} '{}'", kind, name);
    Ok(())
}

fn set_doc_attribute(value: &mut Dynamic, text: Box<str>) -> Result<(), AttachError> {
    let type_name = value.type_name();
    if value.is_read_only() {
        return Err(AttachError::unsupported_target(type_name));
    }

    let mut map = value
        .write_lock::<Map>()
        .ok_or_else(|| AttachError::unsupported_target(type_name))?;

    if map.get(DOC_ATTRIBUTE).is_some_and(has_text) {
        let name = map
            .get("name")
            .and_then(|name| name.read_lock::<ImmutableString>().map(|s| s.to_string()))
            .unwrap_or_else(|| type_name.to_string());
        tracing::warn!("Rejected second docstring for object '{}'", name);
        return Err(AttachError::already_documented(DescriptorKind::Object, name));
    }

    map.insert(DOC_ATTRIBUTE.into(), Dynamic::from(String::from(text)));
    tracing::debug!("Attached docstring to object map");
    Ok(())
}

/// Only non-empty strings and blobs count as existing documentation.
fn has_text(doc: &Dynamic) -> bool {
    if let Some(text) = doc.read_lock::<ImmutableString>() {
        return !text.is_empty();
    }
    if let Some(bytes) = doc.read_lock::<Blob>() {
        return !bytes.is_empty();
    }
    false
}
