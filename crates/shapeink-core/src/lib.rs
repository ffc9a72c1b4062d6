//! ShapeInk Core Library
//!
//! Shapes, scenes and editing logic for the ShapeInk 2D shape editor,
//! independent of any windowing or rendering backend.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use config::{ConfigError, EditorConfig, SceneConfig};
pub use editor::{palette_color, Command, Editor, PALETTE};
pub use geometry::{BoundingBox, Point};
pub use input::{Key, KeyEvent, Modifiers, PointerEvent};
pub use scene::Scene;
pub use selection::Marquee;
pub use shapes::{
    BorderStyle, Circle, Group, Rectangle, SelectionRectangle, Shape, ShapeColor, ShapeId,
    ShapeStyle, ShapeTrait, Square,
};
pub use storage::{Format, LoadSummary, StorageError, StorageResult};
pub use tools::ToolKind;
