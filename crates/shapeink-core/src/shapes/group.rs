//! Group shape for combining multiple shapes.

use super::{BorderStyle, Shape, ShapeBase, ShapeColor, ShapeId, ShapeTrait, normalize_degrees};
use crate::geometry::{BoundingBox, Point};
use kurbo::BezPath;
use serde::{Deserialize, Serialize};

/// A group of shapes that can be manipulated as a single unit.
/// Groups own their children and can contain other groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(flatten)]
    pub(crate) base: ShapeBase,
    /// Set to the children's bounding-box origin at creation. Moves shift
    /// it with the children; scaling and adding children leave it in place.
    anchor: Point,
    /// Child shapes in this group, in draw order.
    pub(crate) children: Vec<Shape>,
}

impl Group {
    /// Create a new group from a list of shapes.
    pub fn new(children: Vec<Shape>) -> Self {
        let mut group = Self {
            base: ShapeBase::new(ShapeColor::BLACK),
            anchor: Point::ZERO,
            children,
        };
        group.anchor = group.bounds().origin();
        group
    }

    /// Append a shape to the group.
    pub fn add_shape(&mut self, shape: Shape) {
        self.children.push(shape);
    }

    /// Get the children of this group.
    pub fn children(&self) -> &[Shape] {
        &self.children
    }

    /// Get mutable access to children.
    pub fn children_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Dissolve this group and return its children.
    pub fn ungroup(self) -> Vec<Shape> {
        self.children
    }

    /// The group's id followed by every id beneath it, depth first.
    pub fn all_shape_ids(&self) -> Vec<ShapeId> {
        std::iter::once(self.base.id)
            .chain(self.children.iter().flat_map(Shape::all_ids))
            .collect()
    }
}

impl ShapeTrait for Group {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn bounds(&self) -> BoundingBox {
        let mut iter = self.children.iter();
        let Some(first) = iter.next() else {
            return BoundingBox::ZERO;
        };
        iter.fold(first.bounds(), |acc, child| acc.union(&child.bounds()))
    }

    fn contains(&self, point: Point) -> bool {
        self.children.iter().any(|child| child.contains(point))
    }

    fn intersects(&self, other: &Shape) -> bool {
        self.children.iter().any(|child| child.intersects(other))
    }

    fn anchor_point(&self) -> Point {
        self.anchor
    }

    /// Moves every child by the same delta as the anchor.
    fn set_anchor_point(&mut self, point: Point) {
        let dx = point.x.saturating_sub(self.anchor.x);
        let dy = point.y.saturating_sub(self.anchor.y);
        for child in &mut self.children {
            child.translate(dx, dy);
        }
        self.anchor = point;
    }

    /// Scales every child about its own anchor.
    fn scale(&mut self, factor: f64) {
        for child in &mut self.children {
            child.scale(factor);
        }
    }

    fn set_selected(&mut self, selected: bool) {
        self.base.selected = selected;
        for child in &mut self.children {
            child.set_selected(selected);
        }
    }

    fn set_color(&mut self, color: ShapeColor) {
        self.base.style.color = color;
        for child in &mut self.children {
            child.set_color(color);
        }
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.base.style.opacity = opacity.clamp(0.0, 1.0);
        for child in &mut self.children {
            child.set_opacity(opacity);
        }
    }

    fn set_border_style(&mut self, border: BorderStyle) {
        self.base.style.border = border;
        for child in &mut self.children {
            child.set_border_style(border);
        }
    }

    fn rotate(&mut self, degrees: f64) {
        self.base.rotation = normalize_degrees(self.base.rotation + degrees);
        for child in &mut self.children {
            child.rotate(degrees);
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for child in &self.children {
            path.extend(child.to_path());
        }
        path
    }

    fn to_record(&self) -> String {
        let mut record = String::from("GROUP,");
        for child in &self.children {
            record.push_str(&child.to_record());
            record.push(';');
        }
        record
    }
}
