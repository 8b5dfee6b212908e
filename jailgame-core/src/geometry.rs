//! Polygon hit-testing and label placement on the map.
//!
//! Coordinates are screen pixels in the fixed 800x600 map space.

use serde::{Deserialize, Serialize};

/// A point in map space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Ray-casting point-in-polygon test.
///
/// The polygon is implicitly closed: the last vertex connects back to the
/// first. A horizontal ray is cast to the right of `point` and each edge it
/// crosses flips the result. Self-intersecting polygons get whatever parity
/// the crossings produce; no winding rule is applied.
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }

    let Point { x, y } = point;
    let mut inside = false;
    let mut prev = polygon[0];

    for i in 1..=n {
        let cur = polygon[i % n];
        let (px, py) = (prev.x, prev.y);
        let (sx, sy) = (cur.x, cur.y);

        // The half-open band test excludes horizontal edges, so py != sy below.
        if y > py.min(sy) && y <= py.max(sy) && x <= px.max(sx) {
            let x_intersect = (y - py) * (sx - px) / (sy - py) + px;
            if px == sx || x <= x_intersect {
                inside = !inside;
            }
        }

        prev = cur;
    }

    inside
}

/// Area-weighted centroid of a closed polygon.
///
/// Zero-area input (collinear or repeated vertices) yields the first vertex
/// unchanged; an empty polygon yields the origin.
pub fn polygon_centroid(polygon: &[Point]) -> Point {
    let Some(&first) = polygon.first() else {
        return Point::default();
    };

    let n = polygon.len();
    let (mut x_sum, mut y_sum, mut area) = (0.0f64, 0.0f64, 0.0f64);

    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let (x0, y0, x1, y1) = (a.x as f64, a.y as f64, b.x as f64, b.y as f64);
        let cross = x0 * y1 - x1 * y0;
        area += cross;
        x_sum += (x0 + x1) * cross;
        y_sum += (y0 + y1) * cross;
    }

    area /= 2.0;
    if area == 0.0 {
        return first;
    }

    Point::new((x_sum / (6.0 * area)) as f32, (y_sum / (6.0 * area)) as f32)
}
