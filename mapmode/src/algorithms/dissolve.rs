//! Dissolve: planar union of polygons into maximal contiguous regions.
//!
//! This module computes the union by:
//! 1. Snapping ring vertices and splitting every segment at its intersections with all others
//! 2. Keeping the split edges whose two sides differ in union membership
//! 3. Orienting kept edges with the union interior on their left and tracing faces
//! 4. Treating counter-clockwise faces as shells and clockwise faces as holes
//!
//! Regions that meet at a single point stay separate.

use crate::algorithms::winding::{point_in_ring, ring_area};
use crate::geometry::intersect::{intersect_segments, SegIntersection};
use crate::geometry::point::{Point, Polygon};
use crate::geometry::tolerance::{near_zero, MAX_TRACE_STEPS, PROBE_FACTOR};
use std::collections::{BTreeSet, HashMap};
use std::f64::consts::TAU;

/// Union `polygons` and return one polygon per contiguous region.
///
/// Output shells are counter-clockwise, holes clockwise, rings open, and
/// collinear vertices removed. `eps` is the vertex snapping distance.
pub fn dissolve(polygons: &[Polygon], eps: f64) -> Vec<Polygon> {
    let polygons: Vec<Polygon> = polygons
        .iter()
        .filter_map(|p| clean_polygon(p, eps))
        .collect();
    if polygons.is_empty() {
        return Vec::new();
    }

    let mut pool = VertexPool::new(eps);
    let edges = split_edges(&polygons, &mut pool, eps);
    let directed = boundary_edges(&polygons, &pool.points, &edges, eps);
    let rings = trace_rings(&pool.points, &directed);

    let mut shells: Vec<(Vec<Point>, f64)> = Vec::new();
    let mut holes: Vec<Vec<Point>> = Vec::new();
    for ring in rings {
        let ring = drop_collinear(ring, eps);
        let area = ring_area(&ring);
        if ring.len() < 3 || area.abs() <= eps * eps {
            continue;
        }
        if area > 0.0 {
            shells.push((ring, area));
        } else {
            holes.push(ring);
        }
    }

    let mut out: Vec<Polygon> = shells
        .iter()
        .map(|(ring, _)| Polygon::new(ring.clone(), Vec::new()))
        .collect();
    for hole in holes {
        let probe = left_probe(hole[0], hole[1], eps);
        let owner = shells
            .iter()
            .enumerate()
            .filter(|(_, (ring, _))| point_in_ring(probe, ring))
            .min_by(|(_, (_, a)), (_, (_, b))| a.total_cmp(b))
            .map(|(i, _)| i);
        match owner {
            Some(i) => out[i].interiors.push(hole),
            None => log::debug!("dissolve: dropped hole with no enclosing shell"),
        }
    }
    out
}

/// Whether `poly` covers any area on its own once cleaned and snapped
pub fn has_area(poly: &Polygon, eps: f64) -> bool {
    !dissolve(std::slice::from_ref(poly), eps).is_empty()
}

/// Remove repeated/closing vertices; None when fewer than three remain
fn clean_polygon(poly: &Polygon, eps: f64) -> Option<Polygon> {
    let exterior = clean_ring(&poly.exterior, eps)?;
    let interiors = poly
        .interiors
        .iter()
        .filter_map(|r| clean_ring(r, eps))
        .collect();
    Some(Polygon::new(exterior, interiors))
}

fn clean_ring(ring: &[Point], eps: f64) -> Option<Vec<Point>> {
    let mut out: Vec<Point> = Vec::with_capacity(ring.len());
    for &p in ring {
        if !p.x.is_finite() || !p.y.is_finite() {
            return None;
        }
        if out.last().map_or(true, |q| q.dist(p) > eps) {
            out.push(p);
        }
    }
    while out.len() > 1 && out[0].dist(out[out.len() - 1]) <= eps {
        out.pop();
    }
    (out.len() >= 3).then_some(out)
}

/// Grid-hashed vertex snapping; points within eps share an id
struct VertexPool {
    points: Vec<Point>,
    cells: HashMap<(i64, i64), Vec<usize>>,
    eps: f64,
}

impl VertexPool {
    fn new(eps: f64) -> Self {
        VertexPool { points: Vec::new(), cells: HashMap::new(), eps }
    }

    fn cell(&self, p: Point) -> (i64, i64) {
        ((p.x / self.eps).floor() as i64, (p.y / self.eps).floor() as i64)
    }

    fn intern(&mut self, p: Point) -> usize {
        let (cx, cy) = self.cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(ids) = self.cells.get(&(cx + dx, cy + dy)) {
                    if let Some(&id) = ids.iter().find(|&&i| self.points[i].dist(p) <= self.eps) {
                        return id;
                    }
                }
            }
        }
        let id = self.points.len();
        self.points.push(p);
        self.cells.entry((cx, cy)).or_default().push(id);
        id
    }
}

struct Segment {
    a: Point,
    b: Point,
    cuts: Vec<f64>,
    bbox: (f64, f64, f64, f64),
}

impl Segment {
    fn new(a: Point, b: Point) -> Self {
        let bbox = (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y));
        Segment { a, b, cuts: vec![0.0, 1.0], bbox }
    }

    fn bbox_overlaps(&self, o: &Segment, eps: f64) -> bool {
        self.bbox.0 <= o.bbox.2 + eps
            && o.bbox.0 <= self.bbox.2 + eps
            && self.bbox.1 <= o.bbox.3 + eps
            && o.bbox.1 <= self.bbox.3 + eps
    }

    fn at(&self, t: f64) -> Point {
        if t <= 0.0 {
            self.a
        } else if t >= 1.0 {
            self.b
        } else {
            self.a.lerp(self.b, t)
        }
    }
}

/// Planarize all rings: unique undirected edges (lo, hi) between pooled vertices
fn split_edges(polygons: &[Polygon], pool: &mut VertexPool, eps: f64) -> BTreeSet<(usize, usize)> {
    let mut segments: Vec<Segment> = Vec::new();
    for ring in polygons.iter().flat_map(|p| p.rings()) {
        let n = ring.len();
        for i in 0..n {
            segments.push(Segment::new(ring[i], ring[(i + 1) % n]));
        }
    }

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            if !segments[i].bbox_overlaps(&segments[j], eps) {
                continue;
            }
            let (si, sj) = (&segments[i], &segments[j]);
            match intersect_segments(si.a, si.b, sj.a, sj.b, eps) {
                SegIntersection::None => {}
                SegIntersection::Proper { t, u, .. } | SegIntersection::Touch { t, u, .. } => {
                    segments[i].cuts.push(t);
                    segments[j].cuts.push(u);
                }
                SegIntersection::CollinearOverlap { t0, t1, u0, u1 } => {
                    segments[i].cuts.extend([t0, t1]);
                    segments[j].cuts.extend([u0, u1]);
                }
            }
        }
    }

    let mut edges = BTreeSet::new();
    for seg in &mut segments {
        seg.cuts.sort_by(|a, b| a.total_cmp(b));
        seg.cuts.dedup();
        let ids: Vec<usize> = seg.cuts.iter().map(|&t| pool.intern(seg.at(t))).collect();
        for w in ids.windows(2) {
            let (a, b) = (w[0], w[1]);
            if a != b {
                edges.insert((a.min(b), a.max(b)));
            }
        }
    }
    edges
}

fn left_probe(a: Point, b: Point, eps: f64) -> Point {
    let d = b - a;
    let len = d.norm();
    let delta = (eps * PROBE_FACTOR).min(len * 0.25);
    a.lerp(b, 0.5) + d.perp() * (delta / len)
}

/// Edges separating union interior from exterior, directed with the interior on the left
fn boundary_edges(
    polygons: &[Polygon],
    points: &[Point],
    edges: &BTreeSet<(usize, usize)>,
    eps: f64,
) -> Vec<(usize, usize)> {
    let inside = |p: Point| polygons.iter().any(|poly| poly.contains(p));
    let mut directed = Vec::new();
    for &(a, b) in edges {
        let (pa, pb) = (points[a], points[b]);
        let left = inside(left_probe(pa, pb, eps));
        let right = inside(left_probe(pb, pa, eps));
        match (left, right) {
            (true, false) => directed.push((a, b)),
            (false, true) => directed.push((b, a)),
            _ => {}
        }
    }
    directed
}

/// Walk faces: from each edge u->v continue with the outgoing edge at v that is
/// first clockwise from v->u.
fn trace_rings(points: &[Point], directed: &[(usize, usize)]) -> Vec<Vec<Point>> {
    let mut outgoing: HashMap<usize, Vec<usize>> = HashMap::new();
    for (i, &(u, _)) in directed.iter().enumerate() {
        outgoing.entry(u).or_default().push(i);
    }

    let angle = |from: usize, to: usize| {
        let d = points[to] - points[from];
        d.y.atan2(d.x)
    };
    let next_edge = |e: usize| -> Option<usize> {
        let (u, v) = directed[e];
        let back = angle(v, u);
        outgoing.get(&v)?.iter().copied().min_by(|&x, &y| {
            let cw = |c: usize| {
                let turn = (back - angle(v, directed[c].1)).rem_euclid(TAU);
                if turn == 0.0 { TAU } else { turn }
            };
            cw(x).total_cmp(&cw(y))
        })
    };

    let mut used = vec![false; directed.len()];
    let mut rings = Vec::new();
    for start in 0..directed.len() {
        if used[start] {
            continue;
        }
        let mut ring = Vec::new();
        let mut e = start;
        let mut closed = false;
        for _ in 0..MAX_TRACE_STEPS {
            used[e] = true;
            ring.push(points[directed[e].0]);
            match next_edge(e) {
                Some(n) if n == start => {
                    closed = true;
                    break;
                }
                Some(n) if !used[n] => e = n,
                _ => break,
            }
        }
        if closed && ring.len() >= 3 {
            rings.push(ring);
        } else {
            log::debug!("dissolve: discarded open boundary chain of {} vertices", ring.len());
        }
    }
    rings
}

/// Remove vertices lying on the straight line between their neighbours
fn drop_collinear(mut ring: Vec<Point>, eps: f64) -> Vec<Point> {
    loop {
        let n = ring.len();
        if n <= 3 {
            return ring;
        }
        let redundant = (0..n).find(|&i| {
            let prev = ring[(i + n - 1) % n];
            let cur = ring[i];
            let next = ring[(i + 1) % n];
            let base = next - prev;
            let blen = base.norm();
            blen > eps
                && near_zero(base.cross(cur - prev) / blen, eps)
                && (cur - prev).dot(next - cur) > 0.0
        });
        match redundant {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}
