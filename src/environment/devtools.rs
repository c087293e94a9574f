//! Devtools and debugger presence heuristics
//!
//! Signals are re-evaluated on every call, an inspector can open at any
//! time. The console getter probe is installed once and reused across polls
//! (its getter closure is leaked into JS); only its flag is reset per call.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

use super::ambient;

/// Window-chrome delta beyond which an attached inspector panel is assumed.
const CHROME_DELTA_PX: f64 = 160.0;
/// Debugger pause beyond this duration flags an active breakpoint.
const DEBUGGER_PAUSE_MS: f64 = 100.0;

/// Whether developer tools appear to be open.
///
/// Combines window-chrome geometry (docked panels inflate the outer/inner
/// delta), the Firebug legacy marker, and a getter-probe object whose `id`
/// accessor flips a flag when the console's own inspection reads it.
pub fn detect_dev_tools() -> bool {
    geometry_suggests_devtools() || firebug_present() || getter_probe_triggered()
}

fn geometry_suggests_devtools() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let width_delta = dim(window.outer_width()) - dim(window.inner_width());
    let height_delta = dim(window.outer_height()) - dim(window.inner_height());
    width_delta > CHROME_DELTA_PX || height_delta > CHROME_DELTA_PX
}

fn firebug_present() -> bool {
    ambient::global_prop("Firebug")
        .and_then(|fb| ambient::prop_of(&fb, "chrome"))
        .and_then(|chrome| ambient::prop_of(&chrome, "isInitialized"))
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}

thread_local! {
    // One probe object and getter closure for the whole session; polling
    // must not leak a closure per call
    static CONSOLE_PROBE: Option<(js_sys::Object, Rc<Cell<bool>>)> = install_console_probe();
}

fn install_console_probe() -> Option<(js_sys::Object, Rc<Cell<bool>>)> {
    let flag = Rc::new(Cell::new(false));
    let probe = js_sys::Object::new();

    let flag_in_getter = Rc::clone(&flag);
    let getter = Closure::wrap(Box::new(move || -> JsValue {
        flag_in_getter.set(true);
        JsValue::from_str("detect")
    }) as Box<dyn FnMut() -> JsValue>);

    ambient::define_getter(&probe, "id", getter).ok()?;
    Some((probe, flag))
}

fn getter_probe_triggered() -> bool {
    CONSOLE_PROBE.with(|installed| {
        let Some((probe, flag)) = installed else {
            return false;
        };
        flag.set(false);
        // An open console inspects logged objects eagerly enough to pull the
        // lazy getter; with devtools closed the getter is never read.
        web_sys::console::debug_1(probe);
        flag.get()
    })
}

/// Best-effort breakpoint detection by timing a `debugger;` statement.
///
/// Flaky by nature (tooling- and environment-dependent); advisory signal
/// only, never a hard gate.
pub fn detect_debugger_timing() -> bool {
    let Some(perf) = web_sys::window().and_then(|w| w.performance()) else {
        return false;
    };
    let start = perf.now();
    if js_sys::eval("debugger;").is_err() {
        return false;
    }
    perf.now() - start > DEBUGGER_PAUSE_MS
}
