//! Integer canvas geometry: points and axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

/// A point on the canvas, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this point offset by the given delta, saturating at the
    /// `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Squared euclidean distance, widened so large coordinates cannot overflow.
    pub fn distance_squared(self, other: Point) -> i64 {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    pub fn distance(self, other: Point) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl From<Point> for kurbo::Point {
    fn from(p: Point) -> Self {
        kurbo::Point::new(f64::from(p.x), f64::from(p.y))
    }
}

/// Axis-aligned bounding box with inclusive edges.
///
/// Edges are normalized on construction, so `left <= right` and
/// `top <= bottom` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    /// Top-left, bottom-left, bottom-right, top-right.
    corners: [Point; 4],
}

impl BoundingBox {
    /// Degenerate box at the origin (used for empty groups).
    pub const ZERO: BoundingBox = BoundingBox::new(0, 0, 0, 0);

    /// Create a box from its edges, in `left, right, top, bottom` order.
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        let (left, right) = if left <= right { (left, right) } else { (right, left) };
        let (top, bottom) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Self {
            left,
            right,
            top,
            bottom,
            corners: [
                Point::new(left, top),
                Point::new(left, bottom),
                Point::new(right, bottom),
                Point::new(right, top),
            ],
        }
    }

    /// Create a box centered on `center` extending `half_w`/`half_h` each way.
    pub fn around(center: Point, half_w: i32, half_h: i32) -> Self {
        Self::new(
            center.x - half_w,
            center.x + half_w,
            center.y - half_h,
            center.y + half_h,
        )
    }

    /// Create the box spanned by two arbitrary points.
    pub fn from_points(a: Point, b: Point) -> Self {
        Self::new(a.x, b.x, a.y, b.y)
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// The top-left corner.
    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.left + self.width() / 2,
            self.top + self.height() / 2,
        )
    }

    /// Corners in top-left, bottom-left, bottom-right, top-right order.
    ///
    /// Opposite corners are two positions apart (`(i + 2) % 4`).
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Corner-based intersection test.
    ///
    /// Checks our corners against `other`, then theirs against us. Two boxes
    /// can still overlap without either holding a corner of the other when
    /// they cross like a plus sign; the last two checks catch that.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        if self.corners.iter().any(|&c| other.contains(c)) {
            return true;
        }
        if other.corners.iter().any(|&c| self.contains(c)) {
            return true;
        }
        if self.left < other.left
            && self.right > other.right
            && self.top > other.top
            && self.bottom < other.bottom
        {
            return true;
        }
        self.left > other.left
            && self.right < other.right
            && self.top < other.top
            && self.bottom > other.bottom
    }

    /// The smallest box covering both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.left.min(other.left),
            self.right.max(other.right),
            self.top.min(other.top),
            self.bottom.max(other.bottom),
        )
    }

    /// Convert to a kurbo rectangle for rendering.
    pub fn to_rect(&self) -> kurbo::Rect {
        kurbo::Rect::new(
            f64::from(self.left),
            f64::from(self.top),
            f64::from(self.right),
            f64::from(self.bottom),
        )
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "left={} right={} top={} bottom={}",
            self.left, self.right, self.top, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: &BoundingBox, b: &BoundingBox) -> bool {
        a.left().max(b.left()) <= a.right().min(b.right())
            && a.top().max(b.top()) <= a.bottom().min(b.bottom())
    }

    #[test]
    fn test_offset_saturates() {
        let p = Point::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(p.offset(5, -5), Point::new(i32::MAX, i32::MIN));
        assert_eq!(Point::new(1, 2).offset(3, -4), Point::new(4, -2));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let b = BoundingBox::new(0, 10, 0, 20);
        assert!(b.contains(Point::new(0, 0)));
        assert!(b.contains(Point::new(10, 20)));
        assert!(b.contains(Point::new(5, 5)));
        assert!(!b.contains(Point::new(11, 5)));
        assert!(!b.contains(Point::new(5, -1)));
    }

    #[test]
    fn test_new_normalizes_edges() {
        let b = BoundingBox::new(10, 0, 20, 5);
        assert_eq!(b.left(), 0);
        assert_eq!(b.right(), 10);
        assert_eq!(b.top(), 5);
        assert_eq!(b.bottom(), 20);
    }

    #[test]
    fn test_corner_intersection() {
        let a = BoundingBox::new(0, 10, 0, 10);
        let b = BoundingBox::new(5, 15, 5, 15);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_shared_edge_intersects() {
        let a = BoundingBox::new(0, 10, 0, 10);
        let b = BoundingBox::new(10, 20, 0, 10);
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_full_containment_intersects() {
        let outer = BoundingBox::new(0, 100, 0, 100);
        let inner = BoundingBox::new(40, 60, 40, 60);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn test_cross_intersects_without_corners() {
        let wide = BoundingBox::new(0, 100, 40, 60);
        let tall = BoundingBox::new(40, 60, 0, 100);
        assert!(!wide.corners().iter().any(|&c| tall.contains(c)));
        assert!(!tall.corners().iter().any(|&c| wide.contains(c)));
        assert!(wide.intersects(&tall));
        assert!(tall.intersects(&wide));
    }

    #[test]
    fn test_disjoint() {
        let a = BoundingBox::new(0, 10, 0, 10);
        let b = BoundingBox::new(11, 20, 0, 10);
        assert!(!a.intersects(&b));
        assert!(!b.intersects(&a));
    }

    #[test]
    fn test_intersects_symmetric_and_matches_overlap() {
        let edges = [-2, 0, 3, 5, 8];
        let mut boxes = Vec::new();
        for &l in &edges {
            for &r in &edges {
                for &t in &edges {
                    for &b in &edges {
                        if l <= r && t <= b {
                            boxes.push(BoundingBox::new(l, r, t, b));
                        }
                    }
                }
            }
        }
        let probes = [
            BoundingBox::new(0, 5, 0, 5),
            BoundingBox::new(1, 4, -1, 6),
            BoundingBox::new(-1, 6, 1, 4),
            BoundingBox::new(3, 3, 3, 3),
        ];
        for a in &boxes {
            for b in probes.iter().chain(boxes.iter().step_by(7)) {
                assert_eq!(a.intersects(b), b.intersects(a), "{a} vs {b}");
                assert_eq!(a.intersects(b), overlaps(a, b), "{a} vs {b}");
            }
        }
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(0, 10, 5, 10);
        let b = BoundingBox::new(-5, 3, 8, 30);
        let u = a.union(&b);
        assert_eq!(u, BoundingBox::new(-5, 10, 5, 30));
    }

    #[test]
    fn test_corner_order() {
        let b = BoundingBox::new(0, 10, 0, 20);
        let c = b.corners();
        assert_eq!(c[0], Point::new(0, 0));
        assert_eq!(c[1], Point::new(0, 20));
        assert_eq!(c[2], Point::new(10, 20));
        assert_eq!(c[3], Point::new(10, 0));
    }

    #[test]
    fn test_to_rect() {
        let r = BoundingBox::new(1, 11, 2, 22).to_rect();
        assert!((r.x0 - 1.0).abs() < f64::EPSILON);
        assert!((r.y1 - 22.0).abs() < f64::EPSILON);
    }
}
