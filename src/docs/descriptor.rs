//! Runtime-exposed symbols and their documentation slots
//!
//! A registration layer exposes native symbols to scripts as rhai custom
//! values. Every symbol is backed by a [`SymbolDef`] record shared by all
//! descriptors that expose it, so a docstring written through one handle is
//! visible through every other handle (and to script-side introspection).
//!
//! # Architecture Note
//!
//! Descriptors are cheap `Clone` handles around `Arc<SymbolDef>`. rhai
//! stores custom values by clone, so the slot must live behind the `Arc`
//! for a write through one copy to be seen by the others.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use rhai::{Dynamic, ImmutableString};

use super::error::DescriptorKind;

/// Nullable documentation text, written at most once
///
/// An empty string counts as no documentation.
#[derive(Clone, Default)]
pub struct DocSlot(Arc<RwLock<Option<Box<str>>>>);

impl DocSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot that already holds `text`
    pub fn with_text(text: impl Into<Box<str>>) -> Self {
        Self(Arc::new(RwLock::new(Some(text.into()))))
    }

    /// Current documentation, if any
    pub fn text(&self) -> Option<String> {
        self.0
            .read()
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }

    /// Whether the slot holds non-empty documentation
    pub fn is_documented(&self) -> bool {
        self.0.read().as_deref().is_some_and(|text| !text.is_empty())
    }

    /// Store `text` if the slot is empty
    ///
    /// The check and the write happen under one write guard. Returns `false`
    /// and leaves the slot untouched if it was already documented.
    pub(crate) fn fill(&self, text: Box<str>) -> bool {
        let mut guard = self.0.write();
        if guard.as_deref().is_some_and(|existing| !existing.is_empty()) {
            return false;
        }
        *guard = Some(text);
        true
    }
}

impl fmt::Debug for DocSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DocSlot").field(&self.text()).finish()
    }
}

/// Host-owned record for one exposed symbol
#[derive(Debug)]
pub struct SymbolDef {
    name: ImmutableString,
    doc: DocSlot,
}

impl SymbolDef {
    /// Create an undocumented symbol record
    pub fn new(name: impl Into<ImmutableString>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            doc: DocSlot::new(),
        })
    }

    /// Create a symbol record that already carries documentation
    pub fn documented(name: impl Into<ImmutableString>, doc: impl Into<Box<str>>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            doc: DocSlot::with_text(doc),
        })
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        &self.name
    }

    /// The shared documentation slot
    pub fn doc_slot(&self) -> &DocSlot {
        &self.doc
    }
}

/// A plain callable exposed to scripts
#[derive(Debug, Clone)]
pub struct Function {
    def: Arc<SymbolDef>,
}

impl Function {
    /// Create a function backed by a fresh symbol record
    pub fn new(name: impl Into<ImmutableString>) -> Self {
        Self::from_def(SymbolDef::new(name))
    }

    /// Wrap an existing symbol record
    pub fn from_def(def: Arc<SymbolDef>) -> Self {
        Self { def }
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        self.def.name()
    }

    /// Current documentation, if any
    pub fn doc(&self) -> Option<String> {
        self.def.doc_slot().text()
    }

    /// The backing symbol record
    pub fn def(&self) -> &Arc<SymbolDef> {
        &self.def
    }
}

/// An instance method wrapping a [`Function`]
///
/// Its documentation is the documentation of the wrapped function.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    function: Function,
}

impl BoundMethod {
    /// Bind `function` as an instance method
    pub fn new(function: Function) -> Self {
        Self { function }
    }

    /// The wrapped function
    pub fn function(&self) -> &Function {
        &self.function
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        self.function.name()
    }

    /// Current documentation, if any
    pub fn doc(&self) -> Option<String> {
        self.function.doc()
    }
}

/// A method accessor exposed on a type
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    owner: ImmutableString,
    def: Arc<SymbolDef>,
}

impl MethodDescriptor {
    /// Expose `def` on the type named `owner`
    pub fn new(owner: impl Into<ImmutableString>, def: Arc<SymbolDef>) -> Self {
        Self {
            owner: owner.into(),
            def,
        }
    }

    /// Name of the type the method is exposed on
    pub fn owner(&self) -> &ImmutableString {
        &self.owner
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        self.def.name()
    }

    /// Current documentation, if any
    pub fn doc(&self) -> Option<String> {
        self.def.doc_slot().text()
    }

    /// The backing symbol record
    pub fn def(&self) -> &Arc<SymbolDef> {
        &self.def
    }
}

/// A property (getter/setter pair) exposed on a type
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    owner: ImmutableString,
    def: Arc<SymbolDef>,
}

impl PropertyDescriptor {
    /// Expose `def` on the type named `owner`
    pub fn new(owner: impl Into<ImmutableString>, def: Arc<SymbolDef>) -> Self {
        Self {
            owner: owner.into(),
            def,
        }
    }

    /// Name of the type the property is exposed on
    pub fn owner(&self) -> &ImmutableString {
        &self.owner
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        self.def.name()
    }

    /// Current documentation, if any
    pub fn doc(&self) -> Option<String> {
        self.def.doc_slot().text()
    }

    /// The backing symbol record
    pub fn def(&self) -> &Arc<SymbolDef> {
        &self.def
    }
}

/// A type exposed to scripts
#[derive(Debug, Clone)]
pub struct TypeObject {
    def: Arc<SymbolDef>,
}

impl TypeObject {
    /// Create a type backed by a fresh symbol record
    pub fn new(name: impl Into<ImmutableString>) -> Self {
        Self::from_def(SymbolDef::new(name))
    }

    /// Wrap an existing symbol record
    pub fn from_def(def: Arc<SymbolDef>) -> Self {
        Self { def }
    }

    /// Name the symbol is exposed under
    pub fn name(&self) -> &ImmutableString {
        self.def.name()
    }

    /// Current documentation, if any
    pub fn doc(&self) -> Option<String> {
        self.def.doc_slot().text()
    }

    /// The backing symbol record
    pub fn def(&self) -> &Arc<SymbolDef> {
        &self.def
    }
}

/// A doc-binding target, classified once at the runtime boundary
#[derive(Debug)]
pub enum Descriptor<'a> {
    Function(Function),
    BoundMethod(BoundMethod),
    Method(MethodDescriptor),
    Property(PropertyDescriptor),
    Type(TypeObject),
    /// Any other value; documented through its generic `doc` attribute
    Object(&'a mut Dynamic),
}

impl<'a> Descriptor<'a> {
    /// Classify a runtime value
    ///
    /// Precedence: function, bound method, method descriptor, property
    /// descriptor, type object, then the generic attribute fallback.
    pub fn classify(target: &'a mut Dynamic) -> Self {
        if let Some(f) = target.read_lock::<Function>() {
            return Self::Function(Function::clone(&f));
        }
        if let Some(m) = target.read_lock::<BoundMethod>() {
            return Self::BoundMethod(BoundMethod::clone(&m));
        }
        if let Some(m) = target.read_lock::<MethodDescriptor>() {
            return Self::Method(MethodDescriptor::clone(&m));
        }
        if let Some(p) = target.read_lock::<PropertyDescriptor>() {
            return Self::Property(PropertyDescriptor::clone(&p));
        }
        if let Some(t) = target.read_lock::<TypeObject>() {
            return Self::Type(TypeObject::clone(&t));
        }
        Self::Object(target)
    }

    /// Kind label used in error messages
    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Function(_) => DescriptorKind::Function,
            Self::BoundMethod(_) => DescriptorKind::BoundMethod,
            Self::Method(_) => DescriptorKind::Method,
            Self::Property(_) => DescriptorKind::Property,
            Self::Type(_) => DescriptorKind::Type,
            Self::Object(_) => DescriptorKind::Object,
        }
    }
}
