use crate::interop::{new_obj, set_kv};
use mapmode::{ConfigError, MergeError, ShapeError};
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}

#[inline]
pub fn invalid_id(kind: &str, id: u32) -> JsValue {
    let d = new_obj();
    set_kv(&d, "kind", &JsValue::from_str(kind));
    set_kv(&d, "id", &JsValue::from_f64(id as f64));
    err("invalid_id", format!("invalid {} id", kind), Some(d.into()))
}

/// Coordinate array with an odd length or fewer than `min_points` pairs
#[inline]
pub fn invalid_array(param: &str, len: usize, min_points: usize) -> JsValue {
    let d = new_obj();
    set_kv(&d, "param", &JsValue::from_str(param));
    set_kv(&d, "len", &JsValue::from_f64(len as f64));
    set_kv(&d, "min_points", &JsValue::from_f64(min_points as f64));
    err("invalid_array", format!("parameter '{}' must hold at least {} lat/lng pairs", param, min_points), Some(d.into()))
}

/// A JS object that does not deserialize into the expected shape
#[inline]
pub fn invalid_value(param: &str, message: impl std::fmt::Display) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("invalid_value", format!("parameter '{}': {}", param, message), Some(d.into()))
}

pub fn merge(e: &MergeError) -> JsValue {
    let data = match e {
        MergeError::NotContiguous { regions } => {
            let d = new_obj(); set_kv(&d, "regions", &JsValue::from_f64(*regions as f64));
            Some(d.into())
        }
        MergeError::NothingSelected | MergeError::Degenerate => None,
    };
    err(e.code(), e.to_string(), data)
}

pub fn shape(e: &ShapeError) -> JsValue {
    let ShapeError::Unknown(got) = e;
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("unknown_shape", e.to_string(), Some(d.into()))
}

pub fn config(e: &ConfigError) -> JsValue {
    match e {
        ConfigError::Json(_) => err("invalid_value", e.to_string(), None),
        ConfigError::OutOfRange { param, got } => {
            let d = new_obj();
            set_kv(&d, "param", &JsValue::from_str(param));
            set_kv(&d, "got", &JsValue::from_f64(*got));
            err("out_of_range", e.to_string(), Some(d.into()))
        }
    }
}
