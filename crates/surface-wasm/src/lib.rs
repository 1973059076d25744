use wasm_bindgen::prelude::*;
use surface_core::{render_to_string, RenderConfig};

/// Render a surface from a JSON-serialised `RenderConfig`.
/// Returns the SVG document as a string.
#[wasm_bindgen]
pub fn render_svg(params_json: &str) -> Result<String, JsValue> {
    let config = RenderConfig::from_json(params_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid params: {e}")))?;
    render_to_string(&config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a surface from a URL query string (`function=eggbox&width=800`).
#[wasm_bindgen]
pub fn render_svg_query(query: &str) -> Result<String, JsValue> {
    let config = RenderConfig::from_query(query.trim_start_matches('?'))
        .map_err(|e| JsValue::from_str(&format!("error: {e}")))?;
    render_to_string(&config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Names accepted for the `function` parameter.
#[wasm_bindgen]
pub fn surface_names() -> Vec<String> {
    surface_core::SurfaceFn::ALL
        .iter()
        .map(|f| f.name().to_string())
        .collect()
}
