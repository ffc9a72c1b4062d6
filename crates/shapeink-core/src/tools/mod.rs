//! Drawing tools.

use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::shapes::{BorderStyle, Circle, Rectangle, Shape, ShapeColor, ShapeStyle, Square};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Square,
    Circle,
    Rectangle,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Select,
        ToolKind::Square,
        ToolKind::Circle,
        ToolKind::Rectangle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Select => "select",
            ToolKind::Square => "square",
            ToolKind::Circle => "circle",
            ToolKind::Rectangle => "rectangle",
        }
    }

}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unrecognized tool name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tool: {0}")]
pub struct UnknownTool(pub String);

impl FromStr for ToolKind {
    type Err = UnknownTool;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ToolKind::ALL
            .into_iter()
            .find(|tool| tool.name() == lower)
            .ok_or_else(|| UnknownTool(s.to_string()))
    }
}

/// The active tool and the style applied to new shapes.
#[derive(Debug, Clone)]
pub struct ToolManager {
    pub current_tool: ToolKind,
    pub current_style: ShapeStyle,
}

impl ToolManager {
    pub fn new(color: ShapeColor) -> Self {
        Self {
            current_tool: ToolKind::default(),
            current_style: ShapeStyle::new(color),
        }
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
    }

    pub fn set_color(&mut self, color: ShapeColor) {
        self.current_style.color = color;
    }

    pub fn set_border_style(&mut self, border: BorderStyle) {
        self.current_style.border = border;
    }

    /// Build a new shape for the current tool at `at`.
    pub fn create_shape(&self, at: Point, config: &EditorConfig) -> Option<Shape> {
        let mut shape = create_shape(self.current_tool, at, self.current_style.color, config)?;
        shape.set_border_style(self.current_style.border);
        shape.set_opacity(self.current_style.opacity);
        Some(shape)
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new(ShapeColor::RED)
    }
}

/// Build a new shape of the tool's kind centered at `at`, using the
/// configured default size. The select tool creates nothing.
pub fn create_shape(
    tool: ToolKind,
    at: Point,
    color: ShapeColor,
    config: &EditorConfig,
) -> Option<Shape> {
    let shape: Shape = match tool {
        ToolKind::Select => return None,
        ToolKind::Square => Square::new(at, config.default_square_size, color).into(),
        ToolKind::Circle => Circle::new(at, config.default_circle_radius, color).into(),
        ToolKind::Rectangle => Rectangle::new(
            at,
            config.default_rect_width,
            config.default_rect_height,
            color,
        )
        .into(),
    };
    Some(shape)
}
