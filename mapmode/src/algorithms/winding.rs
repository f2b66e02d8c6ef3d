//! Ring orientation and point-in-ring tests.
//!
//! Rings are open vertex lists (the closing edge from last to first is implied).

use crate::geometry::point::Point;

/// Signed shoelace area. Positive = counter-clockwise.
pub fn ring_area(ring: &[Point]) -> f64 {
    if ring.len() < 3 {
        return 0.0;
    }
    let n = ring.len();
    let twice: f64 = (0..n).map(|i| ring[i].cross(ring[(i + 1) % n])).sum();
    twice * 0.5
}

/// Even-odd point-in-ring test
pub fn point_in_ring(p: Point, ring: &[Point]) -> bool {
    crossing_number(p, ring) % 2 == 1
}

/// Number of ring edges crossed by the horizontal ray to the right of `p`
pub fn crossing_number(p: Point, ring: &[Point]) -> i32 {
    if ring.len() < 3 {
        return 0;
    }

    let mut crossings = 0i32;
    let n = ring.len();

    for i in 0..n {
        let p1 = ring[i];
        let p2 = ring[(i + 1) % n];

        let y_crosses = (p1.y <= p.y && p2.y > p.y) || (p2.y <= p.y && p1.y > p.y);
        if y_crosses {
            let t = (p.y - p1.y) / (p2.y - p1.y);
            let x_intersect = p1.x + t * (p2.x - p1.x);
            if p.x < x_intersect {
                crossings += 1;
            }
        }
    }

    crossings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square() -> Vec<Point> {
        vec![pt(0.0, 0.0), pt(10.0, 0.0), pt(10.0, 10.0), pt(0.0, 10.0)]
    }

    #[test]
    fn test_area_sign() {
        assert_eq!(ring_area(&square()), 100.0);
        let mut cw = square();
        cw.reverse();
        assert_eq!(ring_area(&cw), -100.0);
        assert_eq!(ring_area(&[pt(0.0, 0.0), pt(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_crossings() {
        assert_eq!(crossing_number(pt(5.0, 5.0), &square()), 1);
        assert_eq!(crossing_number(pt(-5.0, 5.0), &square()), 2);
        assert_eq!(crossing_number(pt(15.0, 5.0), &square()), 0);
    }

    #[test]
    fn test_concave_ring() {
        let l_shape = vec![
            pt(0.0, 0.0),
            pt(10.0, 0.0),
            pt(10.0, 5.0),
            pt(5.0, 5.0),
            pt(5.0, 10.0),
            pt(0.0, 10.0),
        ];
        assert!(point_in_ring(pt(2.0, 7.0), &l_shape));
        assert!(!point_in_ring(pt(7.0, 7.0), &l_shape));
    }

    #[test]
    fn test_degenerate() {
        assert!(!point_in_ring(pt(0.0, 0.0), &[]));
        assert_eq!(crossing_number(pt(0.0, 0.0), &[pt(0.0, 0.0), pt(1.0, 1.0)]), 0);
    }
}
