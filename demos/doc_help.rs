// Documents a few exposed symbols at registration time, then lets a script
// read them back the way a help command would.
//
// Run with: cargo run --example doc_help

use rhai::{Dynamic, Engine, Scope};
use rhai_bridge::docs::{attach_doc, Function, MethodDescriptor, SymbolDef, TypeObject};
use rhai_bridge::register_bridge;

fn main() -> anyhow::Result<()> {
    let mut engine = Engine::new();
    register_bridge(&mut engine);

    let store = TypeObject::new("Store");
    let put = SymbolDef::new("put");
    let open = Function::new("open");

    // Registration: each symbol is documented once, before scripts see it.
    attach_doc(&mut Dynamic::from(store.clone()), "A content-addressed object store")?;
    attach_doc(
        &mut Dynamic::from(MethodDescriptor::new("Store", put.clone())),
        "Insert an object and return its id",
    )?;
    attach_doc(&mut Dynamic::from(open.clone()), b"Open a store by path".as_slice())?;

    let mut scope = Scope::new();
    scope.push("Store", store);
    scope.push("put", MethodDescriptor::new("Store", put));
    scope.push("open", open);

    engine.run_with_scope(
        &mut scope,
        r#"
            for symbol in [Store, put, open] {
                print(`${symbol.name}: ${symbol.doc}`);
            }

            let meta = from_json(`{"replicas": 3, "tags": ["hot", "ssd"]}`);
            print(to_json(meta.value).value);
        "#,
    )?;

    Ok(())
}
