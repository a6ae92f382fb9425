use serde::{Deserialize, Serialize};

/// A position in frame pixel coordinates (origin top-left, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Axis-aligned rectangle described by its centre and half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitBox {
    pub center: Point,
    pub half_width: f64,
    pub half_height: f64,
}

impl HitBox {
    /// True iff `p` lies strictly inside the rectangle; the border does not count.
    pub fn contains(&self, p: Point) -> bool {
        self.center.x - self.half_width < p.x
            && p.x < self.center.x + self.half_width
            && self.center.y - self.half_height < p.y
            && p.y < self.center.y + self.half_height
    }

    /// Top-left corner, where a sprite of this extent is composited
    pub fn top_left(&self) -> Point {
        Point::new(
            self.center.x - self.half_width,
            self.center.y - self.half_height,
        )
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance(Point::new(a.x + t * dx, a.y + t * dy))
}

/// Signed distance from `p` to the boundary of the closed polygon `vertices`.
///
/// Positive inside, negative outside, zero on an edge. The last vertex is
/// joined back to the first. Returns `None` for an empty polygon. A single
/// vertex or a two-vertex polygon has no interior, so the result is the
/// negated distance to that point or segment.
pub fn signed_distance_to_polygon(vertices: &[Point], p: Point) -> Option<f64> {
    if vertices.is_empty() {
        return None;
    }

    let mut min_dist = f64::INFINITY;
    let mut inside = false;

    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % vertices.len()];
        min_dist = min_dist.min(distance_to_segment(p, a, b));

        // Even-odd ray cast towards +x
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }

    if min_dist == 0.0 {
        Some(0.0)
    } else if inside {
        Some(min_dist)
    } else {
        Some(-min_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_hitbox_is_strict() {
        let hit = HitBox {
            center: Point::new(500.0, 500.0),
            half_width: 30.0,
            half_height: 30.0,
        };
        assert!(hit.contains(Point::new(500.0, 500.0)));
        assert!(hit.contains(Point::new(529.0, 471.0)));
        assert!(!hit.contains(Point::new(530.0, 500.0)));
        assert!(!hit.contains(Point::new(500.0, 470.0)));
        assert_eq!(hit.top_left(), Point::new(470.0, 470.0));
    }

    #[test]
    fn test_signed_distance_inside_outside() {
        let poly = square();
        assert_eq!(signed_distance_to_polygon(&poly, Point::new(5.0, 5.0)), Some(5.0));
        assert_eq!(signed_distance_to_polygon(&poly, Point::new(13.0, 5.0)), Some(-3.0));
        assert_eq!(signed_distance_to_polygon(&poly, Point::new(10.0, 5.0)), Some(0.0));
    }

    #[test]
    fn test_signed_distance_degenerate() {
        assert_eq!(signed_distance_to_polygon(&[], Point::new(1.0, 1.0)), None);

        let single = [Point::new(0.0, 0.0)];
        assert_eq!(signed_distance_to_polygon(&single, Point::new(3.0, 4.0)), Some(-5.0));

        let segment = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        assert_eq!(signed_distance_to_polygon(&segment, Point::new(5.0, 2.0)), Some(-2.0));
    }
}
