//! WASM bridge: one editor session per page, driven by a JavaScript tree view.
//!
//! ```js
//! editor_init(containerJson, inheritedJson, null);
//! if (editor_dispatch(JSON.stringify({ action: "add" }))) {
//!     render(JSON.parse(editor_container_json()), JSON.parse(editor_view_json()));
//! }
//! ```

pub mod runner;

pub use runner::{EditorRunner, EditorView};

use std::cell::RefCell;

use js_sys::Array;
use vartree::EditorError;
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<EditorRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut EditorRunner) -> R) -> Result<R, JsValue> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow
            .as_mut()
            .ok_or_else(|| JsValue::from_str("Editor not initialized. Call editor_init() first."))?;
        Ok(f(runner))
    })
}

fn to_js(err: EditorError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn strings(array: &Array) -> Vec<String> {
    array.iter().filter_map(|value| value.as_string()).collect()
}

#[wasm_bindgen]
pub fn editor_init(
    container_json: &str,
    inherited_json: Option<String>,
    config_json: Option<String>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = EditorRunner::from_json(container_json, inherited_json.as_deref(), config_json.as_deref())
        .map_err(to_js)?;
    let count = runner.editor().container().len();
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("vartree: editor initialized with {count} variables");
    Ok(())
}

/// Apply a JSON action. Returns whether the container changed.
#[wasm_bindgen]
pub fn editor_dispatch(action_json: &str) -> Result<bool, JsValue> {
    with_runner(|r| r.dispatch_json(action_json))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn editor_change_type(node_id: &str, type_name: &str) -> Result<bool, JsValue> {
    with_runner(|r| r.change_type(node_id, type_name))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn editor_can_drop(node_id: &str) -> Result<bool, JsValue> {
    with_runner(|r| r.can_drop(node_id))
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn editor_container_json() -> Result<String, JsValue> {
    with_runner(|r| r.container_json())?.map_err(to_js)
}

#[wasm_bindgen]
pub fn editor_view_json() -> Result<String, JsValue> {
    with_runner(|r| r.view_json())?.map_err(to_js)
}

#[wasm_bindgen]
pub fn editor_revision() -> Result<u32, JsValue> {
    with_runner(|r| r.revision())
}

#[wasm_bindgen]
pub fn editor_name_error(node_id: &str) -> Result<Option<String>, JsValue> {
    with_runner(|r| r.name_error(node_id))
}

/// Names from `all_names` not yet defined, for the name field autocompletion.
#[wasm_bindgen]
pub fn editor_undefined_variable_names(all_names: Array) -> Result<Array, JsValue> {
    let all_names = strings(&all_names);
    let undefined = with_runner(|r| r.undefined_variable_names(&all_names))?;
    Ok(undefined.into_iter().map(JsValue::from).collect())
}
