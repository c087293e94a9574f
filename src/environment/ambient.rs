//! Reflect-based ambient browser API access
//!
//! Environment detectors read many nonstandard or optional properties
//! (`navigator.webdriver`, `deviceMemory`, automation-tool globals). Going
//! through `Reflect` keeps absence a plain `None` instead of a typed-API
//! compile dependency, and a missing API can never throw out of a detector.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;

/// Read a property from the global scope. `None` when absent, undefined or
/// null.
pub fn global_prop(name: &str) -> Option<JsValue> {
    prop_of(&js_sys::global(), name)
}

/// Read a property of an object, flattening undefined/null to `None`.
pub fn prop_of(obj: &JsValue, name: &str) -> Option<JsValue> {
    let value = Reflect::get(obj, &JsValue::from_str(name)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// Read a property of `navigator`.
pub fn navigator_prop(name: &str) -> Option<JsValue> {
    let nav = global_prop("navigator")?;
    prop_of(&nav, name)
}

/// Whether a global property exists and is truthy.
pub fn global_truthy(name: &str) -> bool {
    global_prop(name).map(|v| v.is_truthy()).unwrap_or(false)
}

/// Install a getter for `prop` on `obj` via `Object.defineProperty`.
///
/// Install-once: the getter closure is leaked into JS with `forget()`, so
/// callers must hold the patched object for reuse instead of re-installing
/// per poll.
pub fn define_getter(
    obj: &js_sys::Object,
    prop: &str,
    getter: Closure<dyn FnMut() -> JsValue>,
) -> Result<(), JsValue> {
    let descriptor = js_sys::Object::new();
    Reflect::set(&descriptor, &JsValue::from_str("get"), getter.as_ref())?;
    Reflect::set(&descriptor, &JsValue::from_str("configurable"), &JsValue::TRUE)?;
    js_sys::Object::define_property(obj, &JsValue::from_str(prop), &descriptor);
    getter.forget();
    Ok(())
}
