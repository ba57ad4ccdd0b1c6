use serde::{de::DeserializeOwned, Serialize};
use sunburst_core::{Activation, IgnoreReason, SunburstConfig, Tick};
use wasm_bindgen::JsValue;

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Serialize with plain JS objects for maps (not `Map`), so payloads read like JSON.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value.serialize(&serde_wasm_bindgen::Serializer::json_compatible()).map_err(js_err)
}

/// Accept either a JSON string or a plain JS object.
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<T, JsValue> {
    match value.as_string() {
        Some(json) => serde_json::from_str(&json).map_err(js_err),
        None => serde_wasm_bindgen::from_value(value).map_err(js_err),
    }
}

/// Missing or `undefined` config means defaults.
pub(crate) fn parse_config(config: JsValue) -> Result<SunburstConfig, JsValue> {
    if config.is_undefined() || config.is_null() { return Ok(SunburstConfig::default()) }
    let config: SunburstConfig = from_js(config)?;
    config.validate().map_err(js_err)?;
    Ok(config)
}

pub(crate) fn activation_str(activation: Activation) -> &'static str {
    match activation {
        Activation::Started { .. } => "started",
        Activation::Ignored(IgnoreReason::Animating) => "animating",
        Activation::Ignored(IgnoreReason::UnknownNode) => "unknown",
        Activation::Ignored(IgnoreReason::Leaf) => "leaf",
        Activation::Ignored(IgnoreReason::Degenerate) => "degenerate",
        Activation::Ignored(IgnoreReason::AlreadyFocused) => "focused",
    }
}

pub(crate) fn tick_str(tick: Tick) -> &'static str {
    match tick {
        Tick::Idle => "idle",
        Tick::Running { .. } => "running",
        Tick::Completed { .. } => "completed",
    }
}
