//! Marquee selection and corner resize handles.

use crate::geometry::{BoundingBox, Point};
use crate::shapes::{SelectionRectangle, Shape};

/// A drag-selection rectangle in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marquee {
    /// Where the drag started.
    pub start: Point,
    /// Where the pointer is now.
    pub current: Point,
}

impl Marquee {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    pub fn update(&mut self, current: Point) {
        self.current = current;
    }

    /// Normalized box spanned by the drag, whichever way it went.
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::from_points(self.start, self.current)
    }

    /// Overlay shape for drawing the marquee.
    pub fn to_shape(&self) -> SelectionRectangle {
        SelectionRectangle::spanning(self.start, self.current)
    }

    /// Whether `shape`'s bounding box overlaps the marquee.
    pub fn touches(&self, shape: &Shape) -> bool {
        self.bounds().intersects(&shape.bounds())
    }
}

/// A corner handle grabbed for resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerHandle {
    /// Index into [`BoundingBox::corners`].
    pub corner: usize,
    /// The diagonally opposite corner when the drag started.
    pub opposite: Point,
}

/// Index of the corner diagonally across from `corner`.
pub fn opposite_corner(corner: usize) -> usize {
    (corner + 2) % 4
}

/// Find a bounding-box corner of `shape` strictly closer than `tolerance`
/// to `point`.
pub fn hit_test_corner(shape: &Shape, point: Point, tolerance: f64) -> Option<CornerHandle> {
    let bounds = shape.bounds();
    let corners = bounds.corners();
    let corner = corners
        .iter()
        .position(|corner| corner.distance(point) < tolerance)?;
    Some(CornerHandle {
        corner,
        opposite: corners[opposite_corner(corner)],
    })
}

/// Resize `shape` so the dragged corner follows `pointer`.
///
/// Rectangles take the per-axis distance to the opposite corner, squares
/// the larger of the two, circles the distance from their center. Sizes
/// floor at the minimum shape size. Returns whether the size changed;
/// other shapes are not resizable and always return `false`.
pub fn apply_resize(shape: &mut Shape, handle: &CornerHandle, pointer: Point) -> bool {
    let dx = (pointer.x - handle.opposite.x).abs();
    let dy = (pointer.y - handle.opposite.y).abs();
    match shape {
        Shape::Rectangle(rect) => {
            let before = (rect.width, rect.height);
            rect.set_size(dx, dy);
            (rect.width, rect.height) != before
        }
        Shape::Square(square) => {
            let before = square.size;
            square.set_size(dx.max(dy));
            square.size != before
        }
        Shape::Circle(circle) => {
            let before = circle.radius;
            circle.set_radius(circle.center.distance(pointer) as i32);
            circle.radius != before
        }
        Shape::Selection(_) | Shape::Group(_) => false,
    }
}
