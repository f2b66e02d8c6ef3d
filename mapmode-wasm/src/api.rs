use crate::error;
use crate::interop::{arr_u32, is_absent, latlngs, to_js};
use crate::PmMap;
use js_sys::{Function, Uint32Array};
use mapmode::{
    Color, DrawOptions, EditOptions, Layer, LatLng, MapHost, PathStyle, PmEvent, PmOptions,
    ToolbarOptions,
};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Deserialize an optional JS options object, falling back to `default`
fn options_or<T: DeserializeOwned>(param: &str, v: JsValue, default: T) -> Result<T, JsValue> {
    if is_absent(&v) {
        return Ok(default);
    }
    serde_wasm_bindgen::from_value(v).map_err(|e| error::invalid_value(param, e))
}

#[wasm_bindgen]
impl PmMap {
    #[wasm_bindgen(constructor)]
    pub fn new(map_id: u32) -> PmMap {
        PmMap::rs_new(map_id, PmOptions::default())
    }

    /// Construct with a `PmOptions`-shaped object; rejects invalid options
    pub fn with_options(map_id: u32, options: JsValue) -> Result<PmMap, JsValue> {
        let opts = options_or("options", options, PmOptions::default())?;
        opts.validate().map_err(|e| error::config(&e))?;
        Ok(PmMap::rs_new(map_id, opts))
    }

    pub fn map_id(&self) -> u32 {
        self.inner.host().map_id()
    }

    // Layers

    /// `lat_lngs` is a flat `[lat, lng, ...]` exterior ring
    pub fn add_polygon(&mut self, lat_lngs: Vec<f64>, color: Option<String>) -> u32 {
        self.inner.add_layer(Layer::polygon(vec![latlngs(&lat_lngs)], color.map(Color::from)))
    }
    pub fn add_polygon_res(&mut self, lat_lngs: Vec<f64>, color: Option<String>) -> JsValue {
        if lat_lngs.len() % 2 != 0 || lat_lngs.len() < 6 {
            return error::invalid_array("lat_lngs", lat_lngs.len(), 3);
        }
        if lat_lngs.iter().any(|v| !v.is_finite()) {
            return error::non_finite("lat_lngs");
        }
        error::ok(JsValue::from_f64(self.add_polygon(lat_lngs, color) as f64))
    }
    pub fn add_marker(&mut self, lat: f64, lng: f64) -> u32 {
        self.inner.add_layer(Layer::marker(LatLng::new(lat, lng)))
    }
    /// Add any layer given as a serialized `Layer` object
    pub fn add_layer_res(&mut self, layer: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<Layer>(layer) {
            Ok(l) => error::ok(JsValue::from_f64(self.inner.add_layer(l) as f64)),
            Err(e) => error::invalid_value("layer", e),
        }
    }
    pub fn remove_layer(&mut self, id: u32) -> bool {
        match self.inner.host_mut().remove_layer(id) {
            Ok(_) => {
                self.inner.layer_removed(id);
                true
            }
            Err(_) => false,
        }
    }
    pub fn click(&mut self, id: u32) {
        self.inner.click(id)
    }
    pub fn find_layers(&self) -> Uint32Array {
        arr_u32(&self.inner.find_layers())
    }
    pub fn layer_count(&self) -> u32 {
        self.inner.host().len() as u32
    }
    /// Layer plus its edit/drag state, or null
    pub fn get_layer(&self, id: u32) -> JsValue {
        match self.inner.host().get(id) {
            Some(l) => to_js(l),
            None => JsValue::NULL,
        }
    }
    pub fn get_layer_res(&self, id: u32) -> JsValue {
        match self.inner.host().get(id) {
            Some(l) => error::ok(to_js(l)),
            None => error::invalid_id("layer", id),
        }
    }

    /// Names of the enabled modes, e.g. `["removal", "drag"]`
    pub fn enabled_modes(&self) -> JsValue {
        to_js(&self.inner.modes().enabled_modes().collect::<Vec<_>>())
    }

    /// Snapshot of every layer and its edit/drag state as a JSON string
    pub fn layers_json(&self) -> JsValue {
        match serde_json::to_string(self.inner.host()) {
            Ok(s) => error::ok(JsValue::from_str(&s)),
            Err(e) => error::err("serialize", e.to_string(), None),
        }
    }

    // Removal mode

    pub fn enable_global_removal_mode(&mut self) {
        self.inner.enable_global_removal_mode()
    }
    pub fn disable_global_removal_mode(&mut self) {
        self.inner.disable_global_removal_mode()
    }
    pub fn toggle_global_removal_mode(&mut self) {
        self.inner.toggle_global_removal_mode()
    }
    pub fn global_removal_enabled(&self) -> bool {
        self.inner.global_removal_enabled()
    }

    // Edit mode; `options` may be omitted to use the configured defaults

    pub fn enable_global_edit_mode(&mut self, options: JsValue) -> JsValue {
        let default = self.inner.options().edit.clone();
        match options_or::<EditOptions>("options", options, default) {
            Ok(o) => {
                self.inner.enable_global_edit_mode(o);
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn disable_global_edit_mode(&mut self) {
        self.inner.disable_global_edit_mode()
    }
    pub fn toggle_global_edit_mode(&mut self, options: JsValue) -> JsValue {
        let default = self.inner.options().edit.clone();
        match options_or::<EditOptions>("options", options, default) {
            Ok(o) => {
                self.inner.toggle_global_edit_mode(o);
                error::ok(JsValue::from_bool(self.inner.global_edit_enabled()))
            }
            Err(e) => e,
        }
    }
    pub fn global_edit_enabled(&self) -> bool {
        self.inner.global_edit_enabled()
    }

    // Drag mode

    pub fn enable_global_drag_mode(&mut self) {
        self.inner.enable_global_drag_mode()
    }
    pub fn disable_global_drag_mode(&mut self) {
        self.inner.disable_global_drag_mode()
    }
    pub fn toggle_global_drag_mode(&mut self) {
        self.inner.toggle_global_drag_mode()
    }
    pub fn global_drag_mode_enabled(&self) -> bool {
        self.inner.global_drag_mode_enabled()
    }
    /// Simulate the user grabbing or releasing a layer
    pub fn set_dragging(&mut self, id: u32, dragging: bool) -> bool {
        self.inner.host_mut().set_dragging(id, dragging)
    }

    // Selection mode

    pub fn toggle_global_selection_mode(&mut self) {
        self.inner.toggle_global_selection_mode()
    }
    pub fn enable_global_selection_mode(&mut self) {
        self.inner.enable_global_selection_mode()
    }
    pub fn disable_global_selection_mode(&mut self) {
        self.inner.disable_global_selection_mode()
    }
    pub fn global_selection_enabled(&self) -> bool {
        self.inner.global_selection_enabled()
    }
    pub fn is_selected(&self, id: u32) -> bool {
        self.inner.is_selected(id)
    }
    pub fn selected_layers(&self) -> Uint32Array {
        arr_u32(&self.inner.selected_layers())
    }
    pub fn original_color(&self, id: u32) -> Option<String> {
        self.inner.original_color(id).map(|c| c.to_string())
    }
    pub fn layer_color(&self, id: u32) -> Option<String> {
        self.inner.host().color(id).map(|c| c.to_string())
    }

    // Merge

    pub fn merge_selected_polygons_res(&mut self) -> JsValue {
        match self.inner.merge_selected_polygons() {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::merge(&e),
        }
    }

    // Events

    /// Call `callback(payload)` for every event named `event` ("*" for all).
    /// Returns a listener id for `off`.
    pub fn on(&mut self, event: String, callback: Function) -> u32 {
        self.inner.events_mut().subscribe(Box::new(move |e: &PmEvent| {
            if event != "*" && event != e.name() {
                return;
            }
            let payload = to_js(e);
            if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                log::warn!("{} listener threw: {:?}", e.name(), err);
            }
        }))
    }
    pub fn off(&mut self, listener: u32) -> bool {
        self.inner.events_mut().unsubscribe(listener)
    }

    // Toolbar and draw tool

    pub fn add_controls(&mut self, options: JsValue) -> JsValue {
        match options_or("options", options, ToolbarOptions::default()) {
            Ok(o) => {
                self.inner.add_controls(&o);
                error::ok(JsValue::TRUE)
            }
            Err(e) => e,
        }
    }
    pub fn remove_controls(&mut self) {
        self.inner.remove_controls()
    }
    pub fn toggle_controls(&mut self) {
        self.inner.toggle_controls()
    }
    pub fn controls_visible(&self) -> bool {
        self.inner.controls_visible()
    }
    pub fn button_active(&self, name: &str) -> bool {
        self.inner.toolbar().button_active(name)
    }
    pub fn enable_draw_res(&mut self, shape: &str, options: JsValue) -> JsValue {
        let opts = match options_or("options", options, DrawOptions::default()) {
            Ok(o) => o,
            Err(e) => return e,
        };
        match self.inner.enable_draw(shape, &opts) {
            Ok(s) => error::ok(JsValue::from_str(s.as_str())),
            Err(e) => error::shape(&e),
        }
    }
    pub fn disable_draw_res(&mut self, shape: &str) -> JsValue {
        match self.inner.disable_draw(shape) {
            Ok(s) => error::ok(JsValue::from_str(s.as_str())),
            Err(e) => error::shape(&e),
        }
    }
    pub fn active_shape(&self) -> Option<String> {
        self.inner.draw().active_shape().map(|s| s.to_string())
    }
    pub fn set_path_options_res(&mut self, style: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<PathStyle>(style) {
            Ok(s) => {
                self.inner.set_path_options(s);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::invalid_value("style", e),
        }
    }
}
