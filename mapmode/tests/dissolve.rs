use mapmode::algorithms::dissolve::dissolve;
use mapmode::algorithms::winding::ring_area;
use mapmode::geometry::point::{Point, Polygon};

const EPS: f64 = 1e-9;

fn rect(x: f64, y: f64, w: f64, h: f64) -> Polygon {
    Polygon::new(
        vec![
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ],
        Vec::new(),
    )
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_input() {
    assert!(dissolve(&[], EPS).is_empty());
}

#[test]
fn degenerate_input_is_dropped() {
    let flat = Polygon::new(
        vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(2.0, 0.0)],
        Vec::new(),
    );
    let two = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], Vec::new());
    assert!(dissolve(&[flat, two], EPS).is_empty());
}

#[test]
fn overlapping_squares() {
    let out = dissolve(&[rect(0.0, 0.0, 2.0, 2.0), rect(1.0, 1.0, 2.0, 2.0)], EPS);
    assert_eq!(out.len(), 1);
    assert!(close(out[0].area(), 7.0));
    assert_eq!(out[0].exterior.len(), 8);
    assert!(out[0].interiors.is_empty());
    assert!(ring_area(&out[0].exterior) > 0.0);
}

#[test]
fn shared_edge_collapses_to_rectangle() {
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].exterior.len(), 4);
    assert!(close(out[0].area(), 2.0));
}

#[test]
fn partial_shared_edge() {
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 1.0, 0.5)], EPS);
    assert_eq!(out.len(), 1);
    assert!(close(out[0].area(), 1.5));
    assert_eq!(out[0].exterior.len(), 6);
}

#[test]
fn corner_touch_stays_separate() {
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 1.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 2);
    for p in &out {
        assert!(close(p.area(), 1.0));
        assert_eq!(p.exterior.len(), 4);
    }
}

#[test]
fn disjoint_squares() {
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), rect(5.0, 5.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 2);
}

#[test]
fn containment_keeps_container() {
    let out = dissolve(&[rect(0.0, 0.0, 4.0, 4.0), rect(1.0, 1.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 1);
    assert!(close(out[0].area(), 16.0));
    assert_eq!(out[0].exterior.len(), 4);
    assert!(out[0].interiors.is_empty());
}

#[test]
fn hole_is_preserved() {
    let outer = rect(0.0, 0.0, 4.0, 4.0).exterior;
    let hole = rect(1.0, 1.0, 2.0, 2.0).exterior;
    let donut = Polygon::new(outer, vec![hole]);
    let out = dissolve(&[donut, rect(10.0, 0.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 2);
    let big = out.iter().find(|p| p.exterior.len() == 4 && close(p.area(), 12.0));
    let big = big.expect("donut region");
    assert_eq!(big.interiors.len(), 1);
    assert!(ring_area(&big.interiors[0]) < 0.0);
}

#[test]
fn filling_the_hole_removes_it() {
    let donut = Polygon::new(
        rect(0.0, 0.0, 4.0, 4.0).exterior,
        vec![rect(1.0, 1.0, 2.0, 2.0).exterior],
    );
    let out = dissolve(&[donut, rect(1.0, 1.0, 2.0, 2.0)], EPS);
    assert_eq!(out.len(), 1);
    assert!(out[0].interiors.is_empty());
    assert!(close(out[0].area(), 16.0));
}

#[test]
fn ring_of_rectangles_encloses_hole() {
    let out = dissolve(
        &[
            rect(0.0, 0.0, 3.0, 1.0),
            rect(0.0, 2.0, 3.0, 1.0),
            rect(0.0, 0.0, 1.0, 3.0),
            rect(2.0, 0.0, 1.0, 3.0),
        ],
        EPS,
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].interiors.len(), 1);
    assert!(close(out[0].area(), 8.0));
}

#[test]
fn chain_of_three() {
    let out = dissolve(
        &[rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 1.0, 1.0), rect(2.0, 0.0, 1.0, 1.0)],
        EPS,
    );
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].exterior.len(), 4);
    assert!(close(out[0].area(), 3.0));
}

#[test]
fn duplicates_and_clockwise_input() {
    let mut cw = rect(0.0, 0.0, 1.0, 1.0);
    cw.exterior.reverse();
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), cw], EPS);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].exterior.len(), 4);
    assert!(ring_area(&out[0].exterior) > 0.0);
}

#[test]
fn closed_input_rings_are_accepted() {
    let mut closed = rect(0.0, 0.0, 1.0, 1.0);
    closed.exterior.push(Point::new(0.0, 0.0));
    let out = dissolve(&[closed, rect(0.5, 0.0, 1.0, 1.0)], EPS);
    assert_eq!(out.len(), 1);
    assert!(close(out[0].area(), 1.5));
}

#[test]
fn near_coincident_vertices_snap() {
    let nudged = rect(1.0 + 1e-12, 0.0, 1.0, 1.0);
    let out = dissolve(&[rect(0.0, 0.0, 1.0, 1.0), nudged], EPS);
    assert_eq!(out.len(), 1);
    assert!((out[0].area() - 2.0).abs() < 1e-6);
}
