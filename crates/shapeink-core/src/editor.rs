//! Interactive editing: pointer gestures and keyboard commands on a scene.

use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::input::{Key, KeyEvent, Modifiers, PointerEvent};
use crate::scene::Scene;
use crate::selection::{apply_resize, hit_test_corner, CornerHandle, Marquee};
use crate::shapes::{BorderStyle, SelectionRectangle, ShapeColor, ShapeId};
use crate::tools::{ToolKind, ToolManager};

/// Colors offered by the color menu, by name.
pub const PALETTE: [(&str, ShapeColor); 9] = [
    ("red", ShapeColor::RED),
    ("blue", ShapeColor::BLUE),
    ("green", ShapeColor::GREEN),
    ("yellow", ShapeColor::YELLOW),
    ("magenta", ShapeColor::MAGENTA),
    ("cyan", ShapeColor::CYAN),
    ("orange", ShapeColor::ORANGE),
    ("pink", ShapeColor::PINK),
    ("black", ShapeColor::BLACK),
];

/// Look up a palette color by name (case-insensitive).
pub fn palette_color(name: &str) -> Option<ShapeColor> {
    PALETTE
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name.trim()))
        .map(|&(_, color)| color)
}

/// Keyboard bindings, for help output.
pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("left", "Nudge selection left"),
    ("right", "Nudge selection right"),
    ("up", "Nudge selection up"),
    ("down", "Nudge selection down"),
    ("shift+left", "Nudge selection left by a large step"),
    ("delete", "Delete selected shapes"),
    ("backspace", "Delete selected shapes"),
    ("+", "Grow selected shapes"),
    ("=", "Grow selected shapes"),
    ("-", "Shrink selected shapes"),
    ("]", "Increase opacity"),
    ("[", "Decrease opacity"),
    ("r", "Rotate clockwise"),
    ("shift+r", "Rotate counter-clockwise"),
    ("b", "Cycle border style"),
    ("ctrl+g", "Group selected shapes"),
    ("ctrl+u", "Ungroup selected groups"),
    ("ctrl+]", "Bring to front"),
    ("ctrl+[", "Send to back"),
    ("ctrl+z", "Undo"),
    ("ctrl+a", "Select all"),
    ("escape", "Clear selection"),
    ("s", "Square tool"),
    ("c", "Circle tool"),
    ("t", "Rectangle tool"),
    ("v", "Select tool"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    fn delta(self, step: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -step),
            Direction::Down => (0, step),
            Direction::Left => (-step, 0),
            Direction::Right => (step, 0),
        }
    }
}

/// Editor actions that do not depend on pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Nudge { direction: Direction, large: bool },
    Delete,
    ScaleUp,
    ScaleDown,
    Group,
    Ungroup,
    OpacityUp,
    OpacityDown,
    RotateClockwise,
    RotateCounterClockwise,
    BringToFront,
    SendToBack,
    Undo,
    SetColor(ShapeColor),
    SetBorderStyle(BorderStyle),
    CycleBorderStyle,
    SetTool(ToolKind),
    SelectAll,
    ClearSelection,
}

impl Command {
    /// Map a key press to a command.
    pub fn from_key(event: KeyEvent, modifiers: Modifiers) -> Option<Command> {
        let KeyEvent::Pressed(key) = event else {
            return None;
        };
        let command = if modifiers.command() {
            match key {
                Key::Char('g') => Command::Group,
                Key::Char('u') => Command::Ungroup,
                Key::Char('z') => Command::Undo,
                Key::Char('a') => Command::SelectAll,
                Key::Char(']') => Command::BringToFront,
                Key::Char('[') => Command::SendToBack,
                _ => return None,
            }
        } else {
            let nudge = |direction| Command::Nudge {
                direction,
                large: modifiers.shift,
            };
            match key {
                Key::ArrowUp => nudge(Direction::Up),
                Key::ArrowDown => nudge(Direction::Down),
                Key::ArrowLeft => nudge(Direction::Left),
                Key::ArrowRight => nudge(Direction::Right),
                Key::Delete | Key::Backspace => Command::Delete,
                Key::Escape => Command::ClearSelection,
                Key::Char('+') | Key::Char('=') => Command::ScaleUp,
                Key::Char('-') => Command::ScaleDown,
                Key::Char(']') => Command::OpacityUp,
                Key::Char('[') => Command::OpacityDown,
                Key::Char('r') if modifiers.shift => Command::RotateCounterClockwise,
                Key::Char('r') => Command::RotateClockwise,
                Key::Char('b') => Command::CycleBorderStyle,
                Key::Char('s') => Command::SetTool(ToolKind::Square),
                Key::Char('c') => Command::SetTool(ToolKind::Circle),
                Key::Char('t') => Command::SetTool(ToolKind::Rectangle),
                Key::Char('v') => Command::SetTool(ToolKind::Select),
                _ => return None,
            }
        };
        Some(command)
    }
}

/// Pointer gesture in progress.
#[derive(Debug, Clone)]
enum Gesture {
    /// Dragging a corner of one shape.
    Resize {
        id: ShapeId,
        handle: CornerHandle,
        last: Point,
        changed: bool,
    },
    /// Dragging the selected shapes.
    Move { last: Point, changed: bool },
    /// Drag-selecting on empty canvas.
    Select(Marquee),
}

/// A scene plus the interaction state around it: the active tool, the
/// style for new shapes and any gesture in progress.
#[derive(Debug, Clone)]
pub struct Editor {
    scene: Scene,
    config: EditorConfig,
    tools: ToolManager,
    gesture: Option<Gesture>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let scene = Scene::with_config(&config.scene);
        Self::with_scene(scene, config)
    }

    /// Edit an existing scene.
    pub fn with_scene(scene: Scene, config: EditorConfig) -> Self {
        let tools = ToolManager::new(config.default_color);
        Self {
            scene,
            config,
            tools,
            gesture: None,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn into_scene(self) -> Scene {
        self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tool(&self) -> ToolKind {
        self.tools.current_tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        log::debug!("Tool: {tool}");
        self.tools.set_tool(tool);
    }

    /// Color given to new shapes.
    pub fn current_color(&self) -> ShapeColor {
        self.tools.current_style.color
    }

    pub fn current_border_style(&self) -> BorderStyle {
        self.tools.current_style.border
    }

    /// The marquee overlay to draw on top of the scene, if dragging one.
    pub fn overlay(&self) -> Option<SelectionRectangle> {
        match &self.gesture {
            Some(Gesture::Select(marquee)) => Some(marquee.to_shape()),
            _ => None,
        }
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, modifiers: Modifiers) {
        match event {
            PointerEvent::Down { position } => self.pointer_down(position, modifiers),
            PointerEvent::Drag { position } => self.pointer_drag(position),
            PointerEvent::Up { position } => self.pointer_up(position),
        }
    }

    /// Returns whether the key mapped to a command that changed something.
    pub fn handle_key(&mut self, event: KeyEvent, modifiers: Modifiers) -> bool {
        match Command::from_key(event, modifiers) {
            Some(command) => self.execute(command),
            None => false,
        }
    }

    /// Start a gesture.
    ///
    /// Without Ctrl the selection is cleared first. Shapes are searched from
    /// the top down; a bounding-box corner within the handle tolerance starts
    /// a resize, a hit on the shape itself starts a move. Missing everything
    /// places a new shape with a drawing tool, or starts a marquee with the
    /// select tool.
    pub fn pointer_down(&mut self, position: Point, modifiers: Modifiers) {
        self.gesture = None;
        if !modifiers.command() {
            self.scene.clear_selection();
        }

        let tolerance = self.config.resize_handle_tolerance;
        let mut hit = None;
        for shape in self.scene.shapes().iter().rev() {
            if let Some(handle) = hit_test_corner(shape, position, tolerance) {
                hit = Some((shape.id(), Some(handle)));
                break;
            }
            if shape.contains(position) {
                hit = Some((shape.id(), None));
                break;
            }
        }

        match hit {
            Some((id, Some(handle))) => {
                self.scene.set_selected(id, true);
                self.gesture = Some(Gesture::Resize {
                    id,
                    handle,
                    last: position,
                    changed: false,
                });
            }
            Some((id, None)) => {
                self.scene.set_selected(id, true);
                self.gesture = Some(Gesture::Move {
                    last: position,
                    changed: false,
                });
            }
            None => match self.tools.create_shape(position, &self.config) {
                Some(mut shape) => {
                    shape.set_selected(true);
                    self.scene.add_shape(shape);
                    self.gesture = Some(Gesture::Move {
                        last: position,
                        changed: false,
                    });
                }
                None => self.gesture = Some(Gesture::Select(Marquee::new(position))),
            },
        }
    }

    pub fn pointer_drag(&mut self, position: Point) {
        let Some(gesture) = self.gesture.as_mut() else {
            return;
        };
        match gesture {
            Gesture::Resize {
                id,
                handle,
                last,
                changed,
            } => {
                if position == *last {
                    return;
                }
                *last = position;
                if let Some(shape) = self.scene.shape_mut(*id) {
                    *changed |= apply_resize(shape, handle, position);
                }
            }
            Gesture::Move { last, changed } => {
                let dx = position.x.saturating_sub(last.x);
                let dy = position.y.saturating_sub(last.y);
                if dx == 0 && dy == 0 {
                    return;
                }
                for id in self.scene.selected_ids() {
                    if let Some(shape) = self.scene.shape_mut(id) {
                        shape.translate(dx, dy);
                    }
                }
                *last = position;
                *changed = true;
            }
            Gesture::Select(marquee) => {
                marquee.update(position);
                let marquee = *marquee;
                let touched: Vec<ShapeId> = self
                    .scene
                    .shapes()
                    .iter()
                    .filter(|s| marquee.touches(s))
                    .map(|s| s.id())
                    .collect();
                self.scene.select_only(&touched);
            }
        }
    }

    /// Finish the gesture, recording one undo step if geometry changed.
    pub fn pointer_up(&mut self, position: Point) {
        if self.gesture.is_some() {
            self.pointer_drag(position);
        }
        match self.gesture.take() {
            Some(Gesture::Resize { changed: true, .. }) | Some(Gesture::Move { changed: true, .. }) => {
                self.scene.commit();
            }
            _ => {}
        }
    }

    /// Run a command. Returns whether anything changed.
    pub fn execute(&mut self, command: Command) -> bool {
        log::debug!("Executing {command:?}");
        let config = &self.config;
        match command {
            Command::Nudge { direction, large } => {
                let step = if large {
                    config.nudge_step_large
                } else {
                    config.nudge_step
                };
                let (dx, dy) = direction.delta(step);
                self.scene.move_selected(dx, dy)
            }
            Command::Delete => self.scene.remove_selected_shapes() > 0,
            Command::ScaleUp => self.scene.scale_selected(config.scale_up_factor),
            Command::ScaleDown => self.scene.scale_selected(config.scale_down_factor),
            Command::Group => self.scene.group_selected_shapes().is_some(),
            Command::Ungroup => !self.scene.ungroup_selected_shapes().is_empty(),
            Command::OpacityUp => self.scene.adjust_opacity_selected(config.opacity_step),
            Command::OpacityDown => self.scene.adjust_opacity_selected(-config.opacity_step),
            Command::RotateClockwise => self.scene.rotate_selected(config.rotate_step),
            Command::RotateCounterClockwise => self.scene.rotate_selected(-config.rotate_step),
            Command::BringToFront => {
                let ids = self.scene.selected_ids();
                self.scene.bring_to_front(&ids)
            }
            Command::SendToBack => {
                let ids = self.scene.selected_ids();
                self.scene.send_to_back(&ids)
            }
            Command::Undo => {
                self.gesture = None;
                self.scene.undo()
            }
            Command::SetColor(color) => {
                self.tools.set_color(color);
                self.scene.set_color_selected(color);
                true
            }
            Command::SetBorderStyle(border) => {
                self.tools.set_border_style(border);
                self.scene.set_border_style_selected(border);
                true
            }
            Command::CycleBorderStyle => {
                let border = self.tools.current_style.border.next();
                self.execute(Command::SetBorderStyle(border))
            }
            Command::SetTool(tool) => {
                self.set_tool(tool);
                true
            }
            Command::SelectAll => {
                self.scene.select_all();
                !self.scene.is_empty()
            }
            Command::ClearSelection => {
                self.gesture = None;
                let had_selection = !self.scene.selected_ids().is_empty();
                self.scene.clear_selection();
                had_selection
            }
        }
    }
}
