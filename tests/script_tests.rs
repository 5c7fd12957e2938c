// Script-level tests for the registered bridge functions
// Run with: cargo test --test script_tests

use rhai::{Dynamic, Engine, ImmutableString, Map, Scope};
use rhai_bridge::conversion::ConversionConfig;
use rhai_bridge::docs::{
    BoundMethod, Function, MethodDescriptor, PropertyDescriptor, SymbolDef, TypeObject,
};
use rhai_bridge::{register_bridge, register_bridge_with};

/// Helper to build an engine with the bridge installed
fn setup_engine() -> Engine {
    let mut engine = Engine::new();
    register_bridge(&mut engine);
    engine
}

fn result_map(value: Dynamic) -> Map {
    value.cast::<Map>()
}

#[test]
fn test_add_doc_then_read_from_script() -> anyhow::Result<()> {
    let engine = setup_engine();
    let connect = Function::new("connect");

    let mut scope = Scope::new();
    scope.push("connect", connect.clone());

    let doc: String = engine.eval_with_scope(
        &mut scope,
        r#"
            add_doc(connect, "Open a connection");
            connect.doc
        "#,
    )?;

    assert_eq!(doc, "Open a connection");
    assert_eq!(connect.doc().as_deref(), Some("Open a connection"));
    Ok(())
}

#[test]
fn test_undocumented_doc_is_unit() -> anyhow::Result<()> {
    let engine = setup_engine();
    let mut scope = Scope::new();
    scope.push("point", TypeObject::new("Point"));

    let is_unit: bool = engine.eval_with_scope(&mut scope, "point.doc == ()")?;
    assert!(is_unit);

    let name: String = engine.eval_with_scope(&mut scope, "point.name")?;
    assert_eq!(name, "Point");
    Ok(())
}

#[test]
fn test_second_add_doc_raises() {
    let engine = setup_engine();
    let mut scope = Scope::new();
    scope.push("connect", Function::new("connect"));

    let err = engine
        .run_with_scope(
            &mut scope,
            r#"
                add_doc(connect, "first");
                add_doc(connect, "second");
            "#,
        )
        .unwrap_err();

    assert!(err
        .to_string()
        .contains("function 'connect' already has a docstring"));
}

#[test]
fn test_add_doc_all_descriptor_kinds() -> anyhow::Result<()> {
    let engine = setup_engine();
    let area = Function::new("area");
    let scale = SymbolDef::new("scale");
    let width = SymbolDef::new("width");
    let rect = TypeObject::new("Rect");

    let mut scope = Scope::new();
    scope.push("area", BoundMethod::new(area.clone()));
    scope.push("scale", MethodDescriptor::new("Rect", scale.clone()));
    scope.push("width", PropertyDescriptor::new("Rect", width.clone()));
    scope.push("rect", rect.clone());

    engine.run_with_scope(
        &mut scope,
        r#"
            add_doc(area, "Area of the rectangle");
            add_doc(scale, "Scale by a factor");
            add_doc(width, "Width in pixels");
            add_doc(rect, "An axis-aligned rectangle");
        "#,
    )?;

    assert_eq!(area.doc().as_deref(), Some("Area of the rectangle"));
    assert_eq!(scale.doc_slot().text().as_deref(), Some("Scale by a factor"));
    assert_eq!(width.doc_slot().text().as_deref(), Some("Width in pixels"));
    assert_eq!(rect.doc().as_deref(), Some("An axis-aligned rectangle"));

    let owner: String = engine.eval_with_scope(&mut scope, "scale.owner")?;
    assert_eq!(owner, "Rect");
    let function_doc: String = engine.eval_with_scope(&mut scope, "area.function.doc")?;
    assert_eq!(function_doc, "Area of the rectangle");
    Ok(())
}

#[test]
fn test_add_doc_blob_text() -> anyhow::Result<()> {
    let engine = setup_engine();
    let f = Function::new("f");
    let mut scope = Scope::new();
    scope.push("f", f.clone());
    scope.push("text", rhai::Blob::from("from bytes".as_bytes()));

    engine.run_with_scope(&mut scope, "add_doc(f, text);")?;
    assert_eq!(f.doc().as_deref(), Some("from bytes"));
    Ok(())
}

#[test]
fn test_add_doc_invalid_blob_raises() {
    let engine = setup_engine();
    let f = Function::new("f");
    let mut scope = Scope::new();
    scope.push("f", f.clone());
    scope.push("text", vec![0xFF_u8, 0xFE]);

    let err = engine.run_with_scope(&mut scope, "add_doc(f, text);").unwrap_err();
    assert!(err.to_string().contains("utf-8"));
    assert_eq!(f.doc(), None);
}

#[test]
fn test_add_doc_object_map() -> anyhow::Result<()> {
    let engine = setup_engine();

    let doc: String = engine.eval(
        r#"
            let options = #{ name: "options", retries: 3 };
            options.add_doc("Connection options");
            options.doc
        "#,
    )?;
    assert_eq!(doc, "Connection options");
    Ok(())
}

#[test]
fn test_add_doc_on_constant_map_raises() -> anyhow::Result<()> {
    let engine = setup_engine();

    let err = engine
        .run(
            r#"
                const OPTIONS = #{ name: "options", retries: 3 };
                OPTIONS.add_doc("Connection options");
            "#,
        )
        .unwrap_err();
    assert!(matches!(
        *err,
        rhai::EvalAltResult::ErrorNonPureMethodCallOnConstant(..)
    ));

    let doc_is_unit: bool = engine.eval(
        r#"
            const OPTIONS = #{ name: "options" };
            try { OPTIONS.add_doc("Connection options"); } catch {}
            OPTIONS.doc == ()
        "#,
    )?;
    assert!(doc_is_unit);
    Ok(())
}

#[test]
fn test_add_doc_on_host_constant_map_raises() {
    let engine = setup_engine();
    let mut scope = Scope::new();
    scope.push_constant("settings", Map::new());

    let err = engine
        .run_with_scope(&mut scope, r#"settings.add_doc("Server settings");"#)
        .unwrap_err();
    assert!(err.to_string().contains("cannot be called on constant"));

    let settings = scope.get_value::<Map>("settings").unwrap();
    assert!(settings.is_empty());
}

#[test]
fn test_add_doc_on_constant_descriptor_writes_shared_slot() -> anyhow::Result<()> {
    let engine = setup_engine();
    let connect = Function::new("connect");
    let mut scope = Scope::new();
    scope.push_constant("connect", connect.clone());

    engine.run_with_scope(&mut scope, r#"connect.add_doc("Open a connection");"#)?;
    assert_eq!(connect.doc().as_deref(), Some("Open a connection"));
    Ok(())
}

#[test]
fn test_to_json_result_map() -> anyhow::Result<()> {
    let engine = setup_engine();

    let result = result_map(engine.eval(r#"to_json(#{ b: [1, 2.5, "x"], a: true, n: () })"#)?);
    assert_eq!(result["ok"].as_bool().unwrap(), true);

    let text = result["value"].clone().cast::<ImmutableString>();
    let parsed: serde_json::Value = serde_json::from_str(&text)?;
    assert_eq!(
        parsed,
        serde_json::json!({ "a": true, "b": [1, 2.5, "x"], "n": null })
    );
    Ok(())
}

#[test]
fn test_to_json_blob_is_base64() -> anyhow::Result<()> {
    let engine = setup_engine();
    let mut scope = Scope::new();
    scope.push("payload", vec![0x00_u8, 0xFF, 0x10]);

    let result = result_map(engine.eval_with_scope(&mut scope, "to_json(payload)")?);
    assert_eq!(result["value"].clone().cast::<String>(), "\"AP8Q\"");
    Ok(())
}

#[test]
fn test_to_json_unsupported_reports_error_type() -> anyhow::Result<()> {
    let engine = setup_engine();

    let result = result_map(engine.eval(r#"to_json(Fn("print"))"#)?);
    assert_eq!(result["ok"].as_bool().unwrap(), false);
    assert_eq!(
        result["error_type"].clone().cast::<String>(),
        "UnsupportedType"
    );
    Ok(())
}

#[test]
fn test_to_json_depth_limit_from_config() -> anyhow::Result<()> {
    let mut engine = Engine::new();
    register_bridge_with(&mut engine, ConversionConfig::default().with_max_depth(1));

    let result = result_map(engine.eval("to_json([[1]])")?);
    assert_eq!(
        result["error_type"].clone().cast::<String>(),
        "DepthLimitExceeded"
    );
    Ok(())
}

#[test]
fn test_from_json_decodes_value() -> anyhow::Result<()> {
    let engine = setup_engine();

    let total: i64 = engine.eval(
        r#"
            let result = from_json(`{"items": [1, 2, 3], "offset": 10}`);
            if !result.ok { throw result.message; }
            let doc = result.value;
            doc.items.reduce(|sum, x| sum + x, 0) + doc.offset
        "#,
    )?;
    assert_eq!(total, 16);
    Ok(())
}

#[test]
fn test_from_json_parse_error() -> anyhow::Result<()> {
    let engine = setup_engine();

    let result = result_map(engine.eval(r#"from_json("{ broken")"#)?);
    assert_eq!(result["ok"].as_bool().unwrap(), false);
    assert_eq!(result["error_type"].clone().cast::<String>(), "JsonError");
    Ok(())
}
