//! Transient marquee overlay shape.

use super::{Shape, ShapeBase, ShapeColor, ShapeTrait};
use crate::geometry::{BoundingBox, Point};
use kurbo::{BezPath, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Translucent white used to draw the marquee.
const MARQUEE_COLOR: ShapeColor = ShapeColor::new(255, 255, 255, 128);

/// The rectangle drawn while drag-selecting.
///
/// It never intersects anything, is never selectable and is skipped by
/// the persistence formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRectangle {
    #[serde(flatten)]
    pub(crate) base: ShapeBase,
    /// Top-left corner.
    pub origin: Point,
    pub width: i32,
    pub height: i32,
}

impl SelectionRectangle {
    pub fn new(origin: Point, width: i32, height: i32) -> Self {
        Self {
            base: ShapeBase::new(MARQUEE_COLOR),
            origin,
            width,
            height,
        }
    }

    /// Build the rectangle spanned by a drag from `start` to `current`,
    /// whichever direction the drag went.
    pub fn spanning(start: Point, current: Point) -> Self {
        let bounds = BoundingBox::from_points(start, current);
        Self::new(bounds.origin(), bounds.width(), bounds.height())
    }
}

impl ShapeTrait for SelectionRectangle {
    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            self.origin.x,
            self.origin.x + self.width,
            self.origin.y,
            self.origin.y + self.height,
        )
    }

    fn contains(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.origin.x + self.width
            && point.y >= self.origin.y
            && point.y <= self.origin.y + self.height
    }

    fn intersects(&self, _other: &Shape) -> bool {
        false
    }

    fn anchor_point(&self) -> Point {
        self.origin
    }

    fn set_anchor_point(&mut self, point: Point) {
        self.origin = point;
    }

    fn scale(&mut self, factor: f64) {
        self.width = (f64::from(self.width) * factor) as i32;
        self.height = (f64::from(self.height) * factor) as i32;
    }

    /// The marquee is an overlay; it cannot be selected.
    fn set_selected(&mut self, _selected: bool) {}

    fn to_path(&self) -> BezPath {
        self.bounds().to_rect().to_path(0.1)
    }

    fn to_record(&self) -> String {
        format!(
            "SELECTION,{},{},{},{}",
            self.origin.x, self.origin.y, self.width, self.height
        )
    }
}
