//! Canvas fingerprint generation
//!
//! Renders a fixed drawing to an offscreen 220×60 canvas and condenses the
//! serialized data URL through the three hash primitives. The drawing mixes
//! scripts, an emoji, overlapping text sizes and a gradient so that font
//! stacks, rasterizers and GPUs each leave a mark.
//!
//! Fingerprints are only ever compared against each other with
//! [`super::similarity::calculate_similarity`]; the rendered content itself
//! never leaves the page.

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::hashing::{hash_a, hash_b, hash_c, to_base36};

const WIDTH: u32 = 220;
const HEIGHT: u32 = 60;
const PANGRAM: &str = "Cwm fjordbank glyphs vext quiz, 😃";

/// Render the probe drawing and return its condensed fingerprint.
///
/// Degrades to an empty string when the canvas API is unavailable or any
/// step throws — downstream validation treats a missing fingerprint as
/// non-blocking.
pub fn canvas_fingerprint() -> String {
    render_probe().unwrap_or_default()
}

fn render_probe() -> Option<String> {
    let document = web_sys::window()?.document()?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);

    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .ok()??
        .dyn_into()
        .ok()?;
    let ctx_js: &JsValue = ctx.as_ref();

    // Style properties go through Reflect so a throwing setter degrades
    // instead of aborting the whole probe
    set(ctx_js, "textBaseline", &"top".into())?;
    set(ctx_js, "font", &"14px \"Arial\"".into())?;
    set(ctx_js, "textBaseline", &"alphabetic".into())?;
    set(ctx_js, "fillStyle", &"#f60".into())?;
    ctx.fill_rect(125.0, 1.0, 62.0, 20.0);

    set(ctx_js, "fillStyle", &"#069".into())?;
    set(ctx_js, "font", &"11pt no-real-font-123".into())?;
    ctx.fill_text(PANGRAM, 2.0, 15.0).ok()?;

    set(ctx_js, "fillStyle", &"rgba(102, 204, 0, 0.7)".into())?;
    set(ctx_js, "font", &"18pt Arial".into())?;
    ctx.fill_text(PANGRAM, 4.0, 45.0).ok()?;

    let gradient = ctx.create_linear_gradient(0.0, 0.0, WIDTH as f64, HEIGHT as f64);
    gradient.add_color_stop(0.0, "red").ok()?;
    gradient.add_color_stop(0.5, "green").ok()?;
    gradient.add_color_stop(1.0, "blue").ok()?;
    set(ctx_js, "fillStyle", &gradient.into())?;
    ctx.fill_rect(0.0, 0.0, WIDTH as f64, HEIGHT as f64);

    let data_url = canvas.to_data_url().ok()?;
    let condensed = hash_a(&data_url) ^ hash_b(&data_url) ^ hash_c(&data_url);
    Some(to_base36(condensed as u64))
}

fn set(obj: &JsValue, prop: &str, value: &JsValue) -> Option<()> {
    Reflect::set(obj, &JsValue::from_str(prop), value).ok().map(|_| ())
}
