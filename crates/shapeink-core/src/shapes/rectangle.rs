//! Rectangle shape.

use super::{scale_dimension, ShapeBase, ShapeColor, ShapeTrait, MIN_SHAPE_SIZE};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    #[serde(flatten)]
    pub(crate) base: ShapeBase,
    /// Center position.
    pub center: Point,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(center: Point, width: i32, height: i32, color: ShapeColor) -> Self {
        Self {
            base: ShapeBase::new(color),
            center,
            width,
            height,
        }
    }

    /// Set both dimensions, each floored at [`MIN_SHAPE_SIZE`].
    pub fn set_size(&mut self, width: i32, height: i32) {
        self.width = width.max(MIN_SHAPE_SIZE);
        self.height = height.max(MIN_SHAPE_SIZE);
    }
}

impl ShapeTrait for Rectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::around(self.center, self.width / 2, self.height / 2)
    }

    fn contains(&self, point: Point) -> bool {
        let (hw, hh) = (self.width / 2, self.height / 2);
        point.x >= self.center.x - hw
            && point.x <= self.center.x + hw
            && point.y >= self.center.y - hh
            && point.y <= self.center.y + hh
    }

    fn anchor_point(&self) -> Point {
        self.center
    }

    fn set_anchor_point(&mut self, point: Point) {
        self.center = point;
    }

    fn scale(&mut self, factor: f64) {
        self.width = scale_dimension(self.width, factor);
        self.height = scale_dimension(self.height, factor);
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_rect().to_path(0.1)
    }

    fn to_record(&self) -> String {
        format!(
            "RECTANGLE,{},{},{},{},{}",
            self.center.x,
            self.center.y,
            self.base.style.color.to_rgb_int(),
            self.width,
            self.height
        )
    }
}
