//! Shape definitions for the editor canvas.

mod circle;
mod group;
mod rectangle;
mod selection_rect;
mod square;

pub use circle::Circle;
pub use group::Group;
pub use rectangle::Rectangle;
pub use selection_rect::SelectionRectangle;
pub use square::Square;

use crate::geometry::{BoundingBox, Point};
use kurbo::{Affine, BezPath};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Smallest edge length or radius a shape can be scaled or resized down to.
pub const MIN_SHAPE_SIZE: i32 = 1;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ShapeColor {
    pub const RED: ShapeColor = ShapeColor::rgb(255, 0, 0);
    pub const GREEN: ShapeColor = ShapeColor::rgb(0, 255, 0);
    pub const BLUE: ShapeColor = ShapeColor::rgb(0, 0, 255);
    pub const YELLOW: ShapeColor = ShapeColor::rgb(255, 255, 0);
    pub const MAGENTA: ShapeColor = ShapeColor::rgb(255, 0, 255);
    pub const CYAN: ShapeColor = ShapeColor::rgb(0, 255, 255);
    pub const ORANGE: ShapeColor = ShapeColor::rgb(255, 200, 0);
    pub const PINK: ShapeColor = ShapeColor::rgb(255, 175, 175);
    pub const BLACK: ShapeColor = ShapeColor::rgb(0, 0, 0);
    pub const WHITE: ShapeColor = ShapeColor::rgb(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Decode a packed color integer.
    ///
    /// Only the low 24 bits are read, so both `0xRRGGBB` and signed ARGB
    /// values (`-65536` for red) decode to the same opaque color.
    pub fn from_rgb_int(value: i64) -> Self {
        let v = value as u32;
        Self::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }

    /// Packed `0xRRGGBB` form used by the text format.
    pub fn to_rgb_int(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl Default for ShapeColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Color> for ShapeColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<ShapeColor> for Color {
    fn from(color: ShapeColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Border stroke style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BorderStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl BorderStyle {
    /// Cycle to the next border style.
    pub fn next(self) -> Self {
        match self {
            BorderStyle::Solid => BorderStyle::Dashed,
            BorderStyle::Dashed => BorderStyle::Dotted,
            BorderStyle::Dotted => BorderStyle::Solid,
        }
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeStyle {
    /// Fill color.
    pub color: ShapeColor,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Border stroke style.
    #[serde(default)]
    pub border: BorderStyle,
}

fn default_opacity() -> f64 {
    1.0
}

impl ShapeStyle {
    pub fn new(color: ShapeColor) -> Self {
        Self {
            color,
            opacity: 1.0,
            border: BorderStyle::default(),
        }
    }

    /// Get the fill color with opacity applied.
    pub fn fill_with_opacity(&self) -> Color {
        let alpha = (f64::from(self.color.a) * self.opacity) as u8;
        Color::from_rgba8(self.color.r, self.color.g, self.color.b, alpha)
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self::new(ShapeColor::default())
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// State every shape variant carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBase {
    pub(crate) id: ShapeId,
    pub style: ShapeStyle,
    /// View state; not persisted.
    #[serde(skip)]
    pub selected: bool,
    /// Rotation in degrees, always within `[0, 360)`. Rendering only.
    #[serde(default)]
    pub rotation: f64,
}

impl ShapeBase {
    pub fn new(color: ShapeColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            style: ShapeStyle::new(color),
            selected: false,
            rotation: 0.0,
        }
    }
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Multiply a size by `factor`, truncating toward zero and flooring at
/// [`MIN_SHAPE_SIZE`].
pub fn scale_dimension(size: i32, factor: f64) -> i32 {
    ((f64::from(size) * factor) as i32).max(MIN_SHAPE_SIZE)
}

/// Common trait for all shapes.
///
/// Variants supply geometry; the shared state lives in [`ShapeBase`] and
/// the default methods operate on it.
pub trait ShapeTrait {
    fn base(&self) -> &ShapeBase;

    fn base_mut(&mut self) -> &mut ShapeBase;

    /// Get the bounding box, derived from the current geometry.
    fn bounds(&self) -> BoundingBox;

    /// Check if a point lies inside the shape's own geometry.
    fn contains(&self, point: Point) -> bool;

    /// The authoritative position (the center for simple shapes).
    fn anchor_point(&self) -> Point;

    fn set_anchor_point(&mut self, point: Point);

    /// Multiply the size fields by `factor`; position is kept.
    fn scale(&mut self, factor: f64);

    /// Get the path representation for rendering (unrotated).
    fn to_path(&self) -> BezPath;

    /// Canonical type-tagged, comma-separated record.
    fn to_record(&self) -> String;

    fn id(&self) -> ShapeId {
        self.base().id
    }

    fn style(&self) -> &ShapeStyle {
        &self.base().style
    }

    /// Intersection test against another shape.
    ///
    /// Falls back to bounding-box intersection; variants with a tighter
    /// test override this.
    fn intersects(&self, other: &Shape) -> bool {
        self.bounds().intersects(&other.bounds())
    }

    /// Translate the anchor point.
    fn translate(&mut self, dx: i32, dy: i32) {
        let anchor = self.anchor_point();
        self.set_anchor_point(anchor.offset(dx, dy));
    }

    fn is_selected(&self) -> bool {
        self.base().selected
    }

    fn set_selected(&mut self, selected: bool) {
        self.base_mut().selected = selected;
    }

    fn set_color(&mut self, color: ShapeColor) {
        self.base_mut().style.color = color;
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.base_mut().style.opacity = opacity.clamp(0.0, 1.0);
    }

    fn set_border_style(&mut self, border: BorderStyle) {
        self.base_mut().style.border = border;
    }

    fn rotation(&self) -> f64 {
        self.base().rotation
    }

    /// Add to the rotation, normalized into `[0, 360)`.
    fn rotate(&mut self, degrees: f64) {
        let base = self.base_mut();
        base.rotation = normalize_degrees(base.rotation + degrees);
    }
}

/// Enum wrapper for all shape types (for dispatch and serialization).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rectangle(Rectangle),
    Square(Square),
    Selection(SelectionRectangle),
    Group(Group),
}

impl From<Circle> for Shape {
    fn from(s: Circle) -> Self {
        Shape::Circle(s)
    }
}

impl From<Rectangle> for Shape {
    fn from(s: Rectangle) -> Self {
        Shape::Rectangle(s)
    }
}

impl From<Square> for Shape {
    fn from(s: Square) -> Self {
        Shape::Square(s)
    }
}

impl From<SelectionRectangle> for Shape {
    fn from(s: SelectionRectangle) -> Self {
        Shape::Selection(s)
    }
}

impl From<Group> for Shape {
    fn from(s: Group) -> Self {
        Shape::Group(s)
    }
}

impl Shape {
    fn inner(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Selection(s) => s,
            Shape::Group(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Circle(s) => s,
            Shape::Rectangle(s) => s,
            Shape::Square(s) => s,
            Shape::Selection(s) => s,
            Shape::Group(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.inner().id()
    }

    pub fn bounds(&self) -> BoundingBox {
        self.inner().bounds()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.inner().contains(point)
    }

    /// Intersection test between two shapes.
    ///
    /// A shape never intersects itself (same id), and selection rectangles
    /// never intersect anything. Groups intersect when any child does.
    pub fn intersects(&self, other: &Shape) -> bool {
        if self.id() == other.id() {
            return false;
        }
        match (self, other) {
            (Shape::Selection(_), _) | (_, Shape::Selection(_)) => false,
            (Shape::Group(group), _) => group.intersects(other),
            (_, Shape::Group(group)) => group.children().iter().any(|c| self.intersects(c)),
            _ => self.inner().intersects(other),
        }
    }

    pub fn anchor_point(&self) -> Point {
        self.inner().anchor_point()
    }

    pub fn set_anchor_point(&mut self, point: Point) {
        self.inner_mut().set_anchor_point(point);
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.inner_mut().translate(dx, dy);
    }

    pub fn scale(&mut self, factor: f64) {
        self.inner_mut().scale(factor);
    }

    pub fn rotate(&mut self, degrees: f64) {
        self.inner_mut().rotate(degrees);
    }

    pub fn rotation(&self) -> f64 {
        self.inner().rotation()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.inner().style()
    }

    pub fn color(&self) -> ShapeColor {
        self.style().color
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.inner_mut().set_color(color);
    }

    pub fn opacity(&self) -> f64 {
        self.style().opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.inner_mut().set_opacity(opacity);
    }

    pub fn border_style(&self) -> BorderStyle {
        self.style().border
    }

    pub fn set_border_style(&mut self, border: BorderStyle) {
        self.inner_mut().set_border_style(border);
    }

    pub fn is_selected(&self) -> bool {
        self.inner().is_selected()
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.inner_mut().set_selected(selected);
    }

    pub fn to_path(&self) -> BezPath {
        self.inner().to_path()
    }

    /// Rotation about the bounds center, for the renderer.
    ///
    /// Groups return the identity: their children carry their own rotation.
    pub fn render_transform(&self) -> Affine {
        match self {
            Shape::Group(_) => Affine::IDENTITY,
            _ => Affine::rotate_about(
                self.rotation().to_radians(),
                kurbo::Point::from(self.bounds().center()),
            ),
        }
    }

    pub fn to_record(&self) -> String {
        self.inner().to_record()
    }

    /// Record tag of this variant.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "CIRCLE",
            Shape::Rectangle(_) => "RECTANGLE",
            Shape::Square(_) => "SQUARE",
            Shape::Selection(_) => "SELECTION",
            Shape::Group(_) => "GROUP",
        }
    }

    /// Whether this shape is written by the persistence formats.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, Shape::Selection(_))
    }

    /// Check if this shape is a group.
    pub fn is_group(&self) -> bool {
        matches!(self, Shape::Group(_))
    }

    /// Get the group if this shape is a group.
    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Shape::Group(g) => Some(g),
            _ => None,
        }
    }

    /// This shape's id followed by every nested id, for groups.
    pub fn all_ids(&self) -> Vec<ShapeId> {
        match self {
            Shape::Group(group) => group.all_shape_ids(),
            _ => vec![self.id()],
        }
    }

    /// Bring deserialized values back inside their valid ranges.
    ///
    /// Opacity is clamped to `[0, 1]`, rotation wrapped into `[0, 360)` and
    /// sizes floored at [`MIN_SHAPE_SIZE`]. Selection rectangles and empty
    /// groups nested in a group are dropped. Returns how many nested shapes
    /// were dropped.
    pub(crate) fn sanitize(&mut self) -> usize {
        let mut dropped = 0;
        match self {
            Shape::Circle(circle) => circle.set_radius(circle.radius),
            Shape::Rectangle(rect) => rect.set_size(rect.width, rect.height),
            Shape::Square(square) => square.set_size(square.size),
            Shape::Selection(_) => {}
            Shape::Group(group) => {
                for child in group.children_mut().iter_mut() {
                    dropped += child.sanitize();
                }
                let before = group.len();
                group
                    .children_mut()
                    .retain(|child| child.is_persistent() && !child.as_group().is_some_and(Group::is_empty));
                dropped += before - group.len();
            }
        }
        let base = self.inner_mut().base_mut();
        base.style.opacity = if base.style.opacity.is_nan() {
            1.0
        } else {
            base.style.opacity.clamp(0.0, 1.0)
        };
        base.rotation = if base.rotation.is_finite() {
            normalize_degrees(base.rotation)
        } else {
            0.0
        };
        dropped
    }

    /// Copy with fresh ids (recursively), for duplicating shapes.
    ///
    /// Plain `clone()` keeps ids, which is what undo snapshots need.
    pub fn duplicate(&self) -> Shape {
        let mut copy = self.clone();
        copy.regenerate_ids();
        copy
    }

    fn regenerate_ids(&mut self) {
        self.inner_mut().base_mut().id = Uuid::new_v4();
        if let Shape::Group(group) = self {
            for child in group.children_mut() {
                child.regenerate_ids();
            }
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_record())
    }
}
