//! Bridge registration for rhai
//!
//! Provides functions to register the converter and the doc binder with a
//! rhai `Engine`, so scripts can read documentation of exposed symbols and
//! move values across the document boundary.

use rhai::{Blob, Dynamic, Engine, FuncRegistration, ImmutableString, Map};

use crate::conversion::{ConversionConfig, Converter};
use crate::docs::{
    attach_doc, BoundMethod, Function, MethodDescriptor, PropertyDescriptor, TypeObject,
};
use crate::error::{result_to_dynamic, BridgeError};

/// Register the bridge with the default conversion configuration
///
/// See [`register_bridge_with`].
pub fn register_bridge(engine: &mut Engine) {
    register_bridge_with(engine, ConversionConfig::default());
}

/// Register the bridge with a rhai Engine
///
/// This function registers:
///
/// - the descriptor types `Function`, `BoundMethod`, `MethodDescriptor`,
///   `PropertyDescriptor` and `TypeObject`, each with `name` and `doc`
///   getters (`doc` is `()` while undocumented)
/// - `add_doc(target, text)` for every descriptor type and object maps,
///   with `text` given as a string or a blob; failures raise a runtime error.
///   `m.add_doc(..)` on a constant map is refused, while the function-call
///   form `add_doc(m, ..)` receives a copy of a constant, as for any rhai call
/// - `to_json(value)` - encode a value and print it as compact JSON text
/// - `from_json(text)` - parse JSON text and decode it into a value
///
/// `to_json` and `from_json` return a result map:
/// `#{ ok: bool, value/error_type/message }`
///
/// # Example
///
/// ```rust
/// use rhai::{Engine, Scope};
/// use rhai_bridge::docs::Function;
/// use rhai_bridge::register_bridge;
///
/// let mut engine = Engine::new();
/// register_bridge(&mut engine);
///
/// let mut scope = Scope::new();
/// scope.push("greet", Function::new("greet"));
///
/// let doc: String = engine
///     .eval_with_scope(&mut scope, r#"add_doc(greet, "Say hello"); greet.doc"#)
///     .unwrap();
/// assert_eq!(doc, "Say hello");
/// ```
pub fn register_bridge_with(engine: &mut Engine, config: ConversionConfig) {
    register_descriptor_types(engine);

    // Descriptor handles leave the value untouched and write the shared slot.
    register_add_doc::<Function>(engine, true);
    register_add_doc::<BoundMethod>(engine, true);
    register_add_doc::<MethodDescriptor>(engine, true);
    register_add_doc::<PropertyDescriptor>(engine, true);
    register_add_doc::<TypeObject>(engine, true);
    // Maps are mutated in place, so constants are rejected by the engine.
    register_add_doc::<Map>(engine, false);

    let converter = Converter::new(config);

    // ========================================
    // to_json(value) -> Dynamic
    // ========================================
    let to_json_converter = converter.clone();
    engine.register_fn("to_json", move |value: Dynamic| -> Dynamic {
        result_to_dynamic(to_json_impl(&to_json_converter, &value))
    });

    // ========================================
    // from_json(text) -> Dynamic
    // ========================================
    engine.register_fn("from_json", move |text: &str| -> Dynamic {
        result_to_dynamic(from_json_impl(&converter, text))
    });
}

fn register_descriptor_types(engine: &mut Engine) {
    engine
        .register_type_with_name::<Function>("Function")
        .register_get("name", |f: &mut Function| f.name().clone())
        .register_get("doc", |f: &mut Function| doc_to_dynamic(f.doc()));

    engine
        .register_type_with_name::<BoundMethod>("BoundMethod")
        .register_get("name", |m: &mut BoundMethod| m.name().clone())
        .register_get("doc", |m: &mut BoundMethod| doc_to_dynamic(m.doc()))
        .register_get("function", |m: &mut BoundMethod| m.function().clone());

    engine
        .register_type_with_name::<MethodDescriptor>("MethodDescriptor")
        .register_get("name", |m: &mut MethodDescriptor| m.name().clone())
        .register_get("owner", |m: &mut MethodDescriptor| m.owner().clone())
        .register_get("doc", |m: &mut MethodDescriptor| doc_to_dynamic(m.doc()));

    engine
        .register_type_with_name::<PropertyDescriptor>("PropertyDescriptor")
        .register_get("name", |p: &mut PropertyDescriptor| p.name().clone())
        .register_get("owner", |p: &mut PropertyDescriptor| p.owner().clone())
        .register_get("doc", |p: &mut PropertyDescriptor| doc_to_dynamic(p.doc()));

    engine
        .register_type_with_name::<TypeObject>("TypeObject")
        .register_get("name", |t: &mut TypeObject| t.name().clone())
        .register_get("doc", |t: &mut TypeObject| doc_to_dynamic(t.doc()));
}

/// Register `add_doc(target, text)` for one target type, with string and
/// blob text.
///
/// The target is classified through a `Dynamic` copy; descriptors share
/// their slot with the copy, object maps are written back afterwards.
///
/// Overloads registered with `pure = false` raise
/// `ErrorNonPureMethodCallOnConstant` when called on a constant.
fn register_add_doc<T: Clone + Send + Sync + 'static>(engine: &mut Engine, pure: bool) {
    FuncRegistration::new("add_doc").with_purity(pure).register_into_engine(
        engine,
        |target: &mut T, text: ImmutableString| -> Result<(), Box<rhai::EvalAltResult>> {
            add_doc_impl(target, |value| attach_doc(value, &text))
        },
    );
    FuncRegistration::new("add_doc").with_purity(pure).register_into_engine(
        engine,
        |target: &mut T, text: Blob| -> Result<(), Box<rhai::EvalAltResult>> {
            add_doc_impl(target, |value| attach_doc(value, &text))
        },
    );
}

fn add_doc_impl<T, F>(target: &mut T, attach: F) -> Result<(), Box<rhai::EvalAltResult>>
where
    T: Clone + Send + Sync + 'static,
    F: FnOnce(&mut Dynamic) -> Result<(), crate::docs::AttachError>,
{
    let mut value = Dynamic::from(target.clone());
    attach(&mut value).map_err(|e| BridgeError::from(e).into_eval_error())?;
    if let Some(updated) = value.try_cast::<T>() {
        *target = updated;
    }
    Ok(())
}

fn doc_to_dynamic(doc: Option<String>) -> Dynamic {
    doc.map(Dynamic::from).unwrap_or(Dynamic::UNIT)
}

/// Implementation of to_json
fn to_json_impl(converter: &Converter, value: &Dynamic) -> Result<String, BridgeError> {
    let doc = converter.encode(value)?;
    Ok(serde_json::to_string(&doc)?)
}

/// Implementation of from_json
fn from_json_impl(converter: &Converter, text: &str) -> Result<Dynamic, BridgeError> {
    let doc: serde_json::Value = serde_json::from_str(text)?;
    Ok(converter.decode(&doc))
}
