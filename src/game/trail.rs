use std::collections::VecDeque;

use super::geometry::{Point, signed_distance_to_polygon};

/// Distance band around the trail outline that counts as the head biting the body
const BITE_THRESHOLD: f64 = 1.0;

/// The snake body: recent head positions, oldest first
///
/// `lengths[i]` is the distance between `points[i]` and `points[i + 1]`, so a
/// non-empty trail always holds exactly one more point than segment lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Point>,
    lengths: VecDeque<f64>,
    total_length: f64,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push `p` as the new head, extending the path by its distance from the old head
    pub fn append(&mut self, p: Point) {
        if let Some(&prev) = self.points.back() {
            let dist = prev.distance(p);
            self.lengths.push_back(dist);
            self.total_length += dist;
        }
        self.points.push_back(p);
    }

    /// Drop points from the tail until the path fits within `allowed_length`
    ///
    /// A single remaining point is never removed, so the head survives even
    /// when `allowed_length` is negative.
    pub fn trim(&mut self, allowed_length: f64) {
        while self.total_length > allowed_length {
            let Some(dist) = self.lengths.pop_front() else {
                break;
            };
            self.points.pop_front();
            self.total_length -= dist;
        }

        if self.lengths.is_empty() {
            self.total_length = 0.0;
        }
    }

    /// The most recently appended point
    pub fn head(&self) -> Option<Point> {
        self.points.back().copied()
    }

    /// Whether the head lies on the outline of the older part of the trail
    ///
    /// The outline is the closed polygon through every point except the
    /// newest `exclude_last_n`. This approximates a self-crossing check: a
    /// sharp turn can trip it early and a fast swipe across the body can
    /// slip through.
    pub fn self_intersects(&self, exclude_last_n: usize) -> bool {
        let Some(head) = self.head() else {
            return false;
        };

        let keep = self.points.len().saturating_sub(exclude_last_n);
        let outline: Vec<Point> = self.points.iter().take(keep).copied().collect();

        match signed_distance_to_polygon(&outline, head) {
            Some(dist) => (-BITE_THRESHOLD..=BITE_THRESHOLD).contains(&dist),
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.lengths.clear();
        self.total_length = 0.0;
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    pub fn lengths(&self) -> impl Iterator<Item = f64> + '_ {
        self.lengths.iter().copied()
    }

    pub fn total_length(&self) -> f64 {
        self.total_length
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trail_of(points: &[(f64, f64)]) -> Trail {
        let mut trail = Trail::new();
        for &p in points {
            trail.append(p.into());
        }
        trail
    }

    #[test]
    fn test_append_accumulates_length() {
        let mut trail = Trail::new();
        trail.append(Point::new(0.0, 0.0));
        assert_eq!(trail.total_length(), 0.0);
        assert_eq!(trail.lengths().count(), 0);

        trail.append(Point::new(3.0, 4.0));
        assert_eq!(trail.total_length(), 5.0);
        assert_eq!(trail.head(), Some(Point::new(3.0, 4.0)));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn test_trim_drops_tail() {
        let mut trail = trail_of(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]);
        trail.trim(15.0);

        assert_eq!(
            trail.points().collect::<Vec<_>>(),
            vec![Point::new(10.0, 0.0), Point::new(20.0, 0.0)]
        );
        assert_eq!(trail.lengths().collect::<Vec<_>>(), vec![10.0]);
        assert_eq!(trail.total_length(), 10.0);
    }

    #[test]
    fn test_trim_keeps_single_point() {
        let mut trail = trail_of(&[(0.0, 0.0), (100.0, 0.0)]);
        trail.trim(-1.0);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.head(), Some(Point::new(100.0, 0.0)));
        assert_eq!(trail.total_length(), 0.0);
    }

    #[test]
    fn test_head_of_empty_trail() {
        let trail = Trail::new();
        assert_eq!(trail.head(), None);
        assert!(!trail.self_intersects(2));
    }

    #[test]
    fn test_self_intersection_on_loop() {
        // Square loop whose head comes back onto the first edge
        let trail = trail_of(&[
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (0.0, 100.0),
            (0.0, 50.0),
            (50.0, 0.5),
        ]);
        assert!(trail.self_intersects(2));
    }

    #[test]
    fn test_straight_line_does_not_intersect() {
        let trail = trail_of(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        // Outline is the segment 0..10; head at 30 is 20 away
        assert!(!trail.self_intersects(2));
    }

    #[test]
    fn test_short_trail_excluded_entirely() {
        let trail = trail_of(&[(0.0, 0.0), (0.5, 0.0)]);
        assert!(!trail.self_intersects(2));
    }

    #[test]
    fn test_clear() {
        let mut trail = trail_of(&[(0.0, 0.0), (10.0, 0.0)]);
        trail.clear();
        assert!(trail.is_empty());
        assert_eq!(trail.total_length(), 0.0);
    }
}
