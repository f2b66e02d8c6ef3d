// Segment-segment intersection in f64 with a positional tolerance.
// Classifies proper crossings, endpoint touches, and collinear overlaps.

use super::point::Point;
use super::tolerance::{clamp01, near_zero, safe_div, EPS_DENOM};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegIntersection {
    None,
    // Interior crossing of both segments
    Proper { t: f64, u: f64, at: Point },
    // At least one endpoint lies on the other segment (within eps)
    Touch { t: f64, u: f64, at: Point },
    // Collinear overlapping span: parameter ranges on each segment (ordered)
    CollinearOverlap { t0: f64, t1: f64, u0: f64, u1: f64 },
}

// Parameter of p projected on a->b
#[inline]
fn project(p: Point, a: Point, b: Point) -> f64 {
    let r = b - a;
    safe_div((p - a).dot(r), r.dot(r), 0.0)
}

fn collinear_overlap(a: Point, b: Point, c: Point, d: Point, eps: f64) -> SegIntersection {
    let len_ab = a.dist(b);
    let slack = safe_div(eps, len_ab, 0.0);

    let tc = project(c, a, b);
    let td = project(d, a, b);
    let lo = tc.min(td);
    let hi = tc.max(td);
    if hi < -slack || lo > 1.0 + slack {
        return SegIntersection::None;
    }
    let t0 = clamp01(lo);
    let t1 = clamp01(hi);

    let ua = clamp01(project(a.lerp(b, t0), c, d));
    let ub = clamp01(project(a.lerp(b, t1), c, d));
    let (u0, u1) = if ua <= ub { (ua, ub) } else { (ub, ua) };

    if (t1 - t0) * len_ab <= eps {
        // Overlap collapsed to a single shared point
        return SegIntersection::Touch { t: t0, u: u0, at: a.lerp(b, t0) };
    }
    SegIntersection::CollinearOverlap { t0, t1, u0, u1 }
}

pub fn intersect_segments(a: Point, b: Point, c: Point, d: Point, eps: f64) -> SegIntersection {
    let r = b - a;
    let s = d - c;
    let len_r = r.norm();
    let len_s = s.norm();
    if len_r <= eps || len_s <= eps {
        return SegIntersection::None;
    }

    // Distances of C and D from line AB, and of A and B from line CD
    let dc = r.cross(c - a) / len_r;
    let dd = r.cross(d - a) / len_r;
    if near_zero(dc, eps) && near_zero(dd, eps) {
        return collinear_overlap(a, b, c, d, eps);
    }
    let da = s.cross(a - c) / len_s;
    let db = s.cross(b - c) / len_s;

    // Both segments must straddle (or touch) the other's line
    let straddle_cd = (dc > eps && dd > eps) || (dc < -eps && dd < -eps);
    let straddle_ab = (da > eps && db > eps) || (da < -eps && db < -eps);
    if straddle_cd || straddle_ab {
        return SegIntersection::None;
    }

    let rxs = r.cross(s);
    if near_zero(rxs, EPS_DENOM) {
        return SegIntersection::None;
    }
    let qp = c - a;
    let t = qp.cross(s) / rxs;
    let u = qp.cross(r) / rxs;

    let slack_t = eps / len_r;
    let slack_u = eps / len_s;
    if t < -slack_t || t > 1.0 + slack_t || u < -slack_u || u > 1.0 + slack_u {
        return SegIntersection::None;
    }

    let touch = near_zero(t, slack_t)
        || near_zero(1.0 - t, slack_t)
        || near_zero(u, slack_u)
        || near_zero(1.0 - u, slack_u);
    let (t, u) = (clamp01(t), clamp01(u));
    let at = a.lerp(b, t);

    if touch {
        SegIntersection::Touch { t, u, at }
    } else {
        SegIntersection::Proper { t, u, at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EP: f64 = 1e-9;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn proper_cross() {
        let r = intersect_segments(pt(0.0, 0.0), pt(2.0, 2.0), pt(0.0, 2.0), pt(2.0, 0.0), EP);
        match r {
            SegIntersection::Proper { t, u, at } => {
                assert!((t - 0.5).abs() < 1e-12 && (u - 0.5).abs() < 1e-12);
                assert!(at.dist(pt(1.0, 1.0)) < 1e-12);
            }
            _ => panic!("expected proper, got {:?}", r),
        }
    }

    #[test]
    fn endpoint_touch() {
        let r = intersect_segments(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), EP);
        match r {
            SegIntersection::Touch { t, u, at } => {
                assert!((t - 1.0).abs() < 1e-12 && u.abs() < 1e-12);
                assert!(at.dist(pt(1.0, 0.0)) < 1e-12);
            }
            _ => panic!("expected touch, got {:?}", r),
        }
    }

    #[test]
    fn t_junction_is_touch() {
        let r = intersect_segments(pt(0.0, 0.0), pt(2.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0), EP);
        match r {
            SegIntersection::Touch { t, .. } => assert!((t - 0.5).abs() < 1e-12),
            _ => panic!("expected touch, got {:?}", r),
        }
    }

    #[test]
    fn collinear_overlap_span() {
        let r = intersect_segments(pt(0.0, 0.0), pt(3.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), EP);
        match r {
            SegIntersection::CollinearOverlap { t0, t1, u0, u1 } => {
                assert!((t0 - 1.0 / 3.0).abs() < 1e-12 && (t1 - 2.0 / 3.0).abs() < 1e-12);
                assert!(u0.abs() < 1e-12 && (u1 - 1.0).abs() < 1e-12);
            }
            _ => panic!("expected overlap, got {:?}", r),
        }
    }

    #[test]
    fn collinear_end_to_end_is_touch() {
        let r = intersect_segments(pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), EP);
        assert!(matches!(r, SegIntersection::Touch { .. }), "got {:?}", r);
    }

    #[test]
    fn disjoint() {
        let r = intersect_segments(pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(1.0, 1.0), EP);
        assert_eq!(r, SegIntersection::None);
        let r = intersect_segments(pt(0.0, 0.0), pt(1.0, 0.0), pt(2.0, 0.0), pt(3.0, 0.0), EP);
        assert_eq!(r, SegIntersection::None);
    }
}
