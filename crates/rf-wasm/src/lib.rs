use rf_core::{control_options, pipeline, Dataset, ViewRequest};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Offer the selectable metrics and PLMNs for an uploaded CSV.
#[wasm_bindgen]
pub fn inspect(csv: &str) -> Result<JsValue, JsValue> {
    let dataset = Dataset::from_csv_str(csv).map_err(js_err)?;
    to_js(&control_options(&dataset))
}

/// Run the full pipeline for a CSV upload and a JSON `ViewRequest`.
/// Schema failures reject; empty results come back as report warnings.
#[wasm_bindgen]
pub fn analyze(csv: &str, request_json: &str) -> Result<JsValue, JsValue> {
    let dataset = Dataset::from_csv_str(csv).map_err(js_err)?;
    let request = parse_request(request_json).map_err(js_err)?;
    let report = pipeline::run(&dataset, &request).map_err(js_err)?;
    to_js(&report)
}

/// Marker colour keyword for a single value.
#[wasm_bindgen]
pub fn signal_color(metric: &str, value: f64) -> String {
    rf_core::get_color(metric, value).as_str().to_string()
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    // Plain objects instead of ES Maps so the UI can read fields directly.
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value.serialize(&serializer).map_err(js_err)
}

fn js_err<E: std::fmt::Display>(e: E) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn parse_request(request_json: &str) -> Result<ViewRequest, String> {
    if request_json.trim().is_empty() {
        return Ok(ViewRequest::default());
    }
    serde_json::from_str(request_json).map_err(|e| format!("Invalid request: {e}"))
}

/// JSON form of `inspect`.
pub fn inspect_json(csv: &str) -> Result<String, String> {
    let dataset = Dataset::from_csv_str(csv).map_err(|e| e.to_string())?;
    serde_json::to_string(&control_options(&dataset)).map_err(|e| e.to_string())
}

/// JSON form of `analyze`.
pub fn analyze_json(csv: &str, request_json: &str) -> Result<String, String> {
    let dataset = Dataset::from_csv_str(csv).map_err(|e| e.to_string())?;
    let request = parse_request(request_json)?;
    let report = pipeline::run(&dataset, &request).map_err(|e| e.to_string())?;
    serde_json::to_string(&report).map_err(|e| e.to_string())
}
