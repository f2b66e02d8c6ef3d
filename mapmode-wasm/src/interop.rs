use js_sys::{Object, Reflect, Uint32Array};
use mapmode::LatLng;
use serde::Serialize;
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object { Object::new() }
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
pub fn arr_u32(slice: &[u32]) -> Uint32Array {
    let arr = Uint32Array::new_with_length(slice.len() as u32);
    arr.copy_from(slice); arr
}

/// Serialize to a plain JS value; null when the value has no JS form
pub fn to_js<T: Serialize + ?Sized>(v: &T) -> JsValue {
    serde_wasm_bindgen::to_value(v).unwrap_or(JsValue::NULL)
}

/// `undefined`/`null` means "use the default"
pub fn is_absent(v: &JsValue) -> bool { v.is_undefined() || v.is_null() }

/// Flat `[lat0, lng0, lat1, lng1, ...]` to points
pub fn latlngs(flat: &[f64]) -> Vec<LatLng> {
    flat.chunks_exact(2).map(|c| LatLng::new(c[0], c[1])).collect()
}
