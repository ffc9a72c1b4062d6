//! Circle shape.

use super::{scale_dimension, Shape, ShapeBase, ShapeColor, ShapeTrait, MIN_SHAPE_SIZE};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Circle as KurboCircle, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A circle given by its center and radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    #[serde(flatten)]
    pub(crate) base: ShapeBase,
    /// Center point (the anchor).
    pub center: Point,
    /// Radius in pixels.
    pub radius: i32,
}

impl Circle {
    /// Create a new circle.
    pub fn new(center: Point, radius: i32, color: ShapeColor) -> Self {
        Self {
            base: ShapeBase::new(color),
            center,
            radius,
        }
    }

    /// Set the radius, floored at [`MIN_SHAPE_SIZE`].
    pub fn set_radius(&mut self, radius: i32) {
        self.radius = radius.max(MIN_SHAPE_SIZE);
    }

    /// Get as a kurbo Circle.
    pub fn as_kurbo(&self) -> KurboCircle {
        KurboCircle::new(self.center, f64::from(self.radius))
    }
}

impl ShapeTrait for Circle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::around(self.center, self.radius, self.radius)
    }

    fn contains(&self, point: Point) -> bool {
        let r = i64::from(self.radius);
        self.center.distance_squared(point) <= r * r
    }

    /// Two circles intersect when their centers are no further apart than
    /// the sum of their radii; anything else compares bounding boxes.
    fn intersects(&self, other: &Shape) -> bool {
        match other {
            Shape::Circle(c) => {
                let reach = i64::from(self.radius) + i64::from(c.radius);
                self.center.distance_squared(c.center) <= reach * reach
            }
            _ => self.bounds().intersects(&other.bounds()),
        }
    }

    fn anchor_point(&self) -> Point {
        self.center
    }

    fn set_anchor_point(&mut self, point: Point) {
        self.center = point;
    }

    fn scale(&mut self, factor: f64) {
        self.radius = scale_dimension(self.radius, factor);
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }

    fn to_record(&self) -> String {
        format!(
            "CIRCLE,{},{},{},{}",
            self.center.x,
            self.center.y,
            self.base.style.color.to_rgb_int(),
            self.radius
        )
    }
}
