use js_sys::Function;
use sunburst_core::{Callbacks, Coord, Dataset, NodeId, Sunburst};
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

/// Browser handle on one chart. Time arguments are milliseconds, typically
/// `performance.now()` from a `requestAnimationFrame` callback.
#[wasm_bindgen]
pub struct WasmSunburst {
    inner: Sunburst,
}

#[wasm_bindgen]
impl WasmSunburst {
    /// `data` is `{ regions, schemes, villages }` as an object or JSON string.
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue, config: JsValue) -> Result<WasmSunburst, JsValue> {
        let dataset: Dataset = from_js(data)?;
        let config = parse_config(config)?;
        Ok(WasmSunburst { inner: Sunburst::from_dataset(&dataset, None, config) })
    }

    /// Build from the three CSV tables as strings.
    pub fn from_csv(regions: &str, schemes: &str, villages: &str, config: JsValue) -> Result<WasmSunburst, JsValue> {
        let dataset = Dataset::from_csv_strings(regions, schemes, villages).map_err(js_err)?;
        let config = parse_config(config)?;
        Ok(WasmSunburst { inner: Sunburst::from_dataset(&dataset, None, config) })
    }

    /// Replace the data; the view returns to the root.
    pub fn set_data(&mut self, data: JsValue) -> Result<(), JsValue> {
        let dataset: Dataset = from_js(data)?;
        let builder = sunburst_core::HierarchyBuilder::new(self.inner.config().root_label.as_str());
        self.inner.set_data(dataset.to_hierarchy(&builder, None));
        Ok(())
    }

    /// Returns "started" or the reason the request was ignored.
    pub fn activate(&mut self, id: u32, now: f64) -> String {
        activation_str(self.inner.activate(NodeId(id), now)).to_owned()
    }

    pub fn zoom_out(&mut self, now: f64) -> String {
        activation_str(self.inner.zoom_out(now)).to_owned()
    }

    /// Returns `undefined` when nothing is under the pointer.
    pub fn pointer_down(&mut self, x: f64, y: f64, now: f64) -> Option<String> {
        self.inner.pointer_down(Coord { x, y }, now).map(|a| activation_str(a).to_owned())
    }

    /// Hovered node id, if any.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<u32> {
        self.inner.pointer_move(Coord { x, y }).map(|id| id.0)
    }

    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    /// "idle", "running" or "completed".
    pub fn tick(&mut self, now: f64) -> String {
        tick_str(self.inner.tick(now)).to_owned()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    /// The published frame: wedges, labels, breadcrumb and tooltip.
    pub fn frame(&self) -> Result<JsValue, JsValue> {
        to_js(&*self.inner.frame())
    }

    pub fn breadcrumb(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.breadcrumb())
    }

    pub fn focus(&self) -> u32 {
        self.inner.focus().0
    }

    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    pub fn hit_test(&self, x: f64, y: f64) -> Option<u32> {
        self.inner.hit_test(Coord { x, y }).map(|id| id.0)
    }

    /// `callback(event)` on every focus change, with `{ node, path, details }`.
    pub fn on_focus(&mut self, callback: Function) {
        self.inner.subscribe(Callbacks::new().on_focus(move |event| {
            if let Ok(value) = to_js(event) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        }));
    }

    /// `callback(event)` when the hovered wedge changes, with `{ node, name, value, details }`.
    pub fn on_hover(&mut self, callback: Function) {
        self.inner.subscribe(Callbacks::new().on_hover(move |event| {
            if let Ok(value) = to_js(event) {
                let _ = callback.call1(&JsValue::NULL, &value);
            }
        }));
    }

    pub fn to_svg(&self) -> Result<String, JsValue> {
        self.inner.to_svg_string().map_err(js_err)
    }
}
