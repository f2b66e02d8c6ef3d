// Centralized tolerances for planar polygon work (map units, usually degrees)

pub const EPS_SNAP: f64 = 1e-9;           // default vertex coincidence threshold
pub const EPS_DENOM: f64 = 1e-18;         // denominator guard for line intersection
pub const PROBE_FACTOR: f64 = 100.0;      // side probe distance as a multiple of the snap eps
pub const MAX_TRACE_STEPS: usize = 1 << 20;

#[inline] pub fn near_zero(x: f64, eps: f64) -> bool { x.abs() <= eps }
#[inline] pub fn clamp01(x: f64) -> f64 { x.clamp(0.0, 1.0) }

#[inline]
pub fn safe_div(num: f64, den: f64, fallback: f64) -> f64 {
    if den.abs() <= EPS_DENOM { fallback } else { num / den }
}
