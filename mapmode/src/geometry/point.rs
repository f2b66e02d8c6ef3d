use std::ops::{Add, Mul, Sub};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Point { x, y } }

    #[inline] pub fn cross(self, o: Point) -> f64 { self.x * o.y - self.y * o.x }
    #[inline] pub fn dot(self, o: Point) -> f64 { self.x * o.x + self.y * o.y }
    #[inline] pub fn norm(self) -> f64 { self.dot(self).sqrt() }
    #[inline] pub fn dist(self, o: Point) -> f64 { (self - o).norm() }

    /// Left-hand normal (rotated +90 degrees)
    #[inline] pub fn perp(self) -> Point { Point::new(-self.y, self.x) }

    #[inline] pub fn lerp(self, o: Point, t: f64) -> Point { self + (o - self) * t }
}

impl Add for Point { type Output = Point; fn add(self, o: Point) -> Point { Point::new(self.x + o.x, self.y + o.y) } }
impl Sub for Point { type Output = Point; fn sub(self, o: Point) -> Point { Point::new(self.x - o.x, self.y - o.y) } }
impl Mul<f64> for Point { type Output = Point; fn mul(self, k: f64) -> Point { Point::new(self.x * k, self.y * k) } }

/// Planar polygon: one exterior ring plus holes. Rings are not closed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub exterior: Vec<Point>,
    pub interiors: Vec<Vec<Point>>,
}

impl Polygon {
    pub fn new(exterior: Vec<Point>, interiors: Vec<Vec<Point>>) -> Self {
        Polygon { exterior, interiors }
    }

    /// Unsigned area, holes subtracted
    pub fn area(&self) -> f64 {
        use crate::algorithms::winding::ring_area;
        let holes: f64 = self.interiors.iter().map(|r| ring_area(r).abs()).sum();
        ring_area(&self.exterior).abs() - holes
    }

    pub fn contains(&self, p: Point) -> bool {
        use crate::algorithms::winding::point_in_ring;
        point_in_ring(p, &self.exterior) && !self.interiors.iter().any(|h| point_in_ring(p, h))
    }

    pub fn rings(&self) -> impl Iterator<Item = &Vec<Point>> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }
}
