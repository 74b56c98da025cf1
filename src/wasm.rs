use js_sys::{Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

use crate::analyzer::GridColorAnalyzer;
use crate::config::AnalyzerConfig;

/// Analyze an encoded image for browser callers.
///
/// Returns `{ image, report }`: `image` holds the PNG-encoded contour overlay
/// and `report` the JSON `{ grid_colors, summary }` document.
#[wasm_bindgen(js_name = analyzeImage)]
pub fn analyze_image(
    input: Vec<u8>,
    grid_size: u32,
    with_summary: bool,
) -> Result<Object, JsValue> {
    let config = AnalyzerConfig::default()
        .with_grid_size(grid_size)
        .with_summary(with_summary);
    let to_js = |e: crate::AnalysisError| JsValue::from_str(&e.to_string());

    let analyzer = GridColorAnalyzer::new(config).map_err(to_js)?;
    let result = analyzer.analyze_bytes(&input).map_err(to_js)?;
    let png = result.overlay_png().map_err(to_js)?;
    let report = result.report_json().map_err(to_js)?;

    let out = Object::new();
    let image = Uint8Array::from(png.as_slice());
    Reflect::set(&out, &JsValue::from_str("image"), &image)?;
    Reflect::set(&out, &JsValue::from_str("report"), &JsValue::from_str(&report))?;
    Ok(out)
}
