//! Square shape.

use super::{scale_dimension, ShapeBase, ShapeColor, ShapeTrait, MIN_SHAPE_SIZE};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A square anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Square {
    #[serde(flatten)]
    pub(crate) base: ShapeBase,
    pub center: Point,
    /// Edge length.
    pub size: i32,
}

impl Square {
    pub fn new(center: Point, size: i32, color: ShapeColor) -> Self {
        Self {
            base: ShapeBase::new(color),
            center,
            size,
        }
    }

    pub fn set_size(&mut self, size: i32) {
        self.size = size.max(MIN_SHAPE_SIZE);
    }
}

impl ShapeTrait for Square {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::around(self.center, self.size / 2, self.size / 2)
    }

    fn contains(&self, point: Point) -> bool {
        let half = self.size / 2;
        point.x >= self.center.x - half
            && point.x <= self.center.x + half
            && point.y >= self.center.y - half
            && point.y <= self.center.y + half
    }

    fn anchor_point(&self) -> Point {
        self.center
    }

    fn set_anchor_point(&mut self, point: Point) {
        self.center = point;
    }

    fn scale(&mut self, factor: f64) {
        self.size = scale_dimension(self.size, factor);
    }

    fn to_path(&self) -> BezPath {
        self.bounds().to_rect().to_path(0.1)
    }

    fn to_record(&self) -> String {
        format!(
            "SQUARE,{},{},{},{}",
            self.center.x,
            self.center.y,
            self.base.style.color.to_rgb_int(),
            self.size
        )
    }
}
