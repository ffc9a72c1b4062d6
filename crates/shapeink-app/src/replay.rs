//! Scripted input for driving an editor without a window.
//!
//! One step per line; blank lines and `#` comments are ignored.
//!
//! ```text
//! tool circle
//! color blue
//! down 100 100          # optional trailing modifiers: ctrl shift alt meta
//! drag 140 120
//! up                    # or `up X Y`
//! key ctrl+g
//! border dashed
//! ```

use shapeink_core::editor::palette_color;
use shapeink_core::input::{parse_key_chord, Key, KeyEvent, Modifiers};
use shapeink_core::{BorderStyle, Command, Editor, Point, ShapeColor, ToolKind};
use thiserror::Error;

/// A script line that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// One scripted input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Down { at: Point, modifiers: Modifiers },
    Drag { at: Point },
    /// Release, at the last pointer position when `at` is omitted.
    Up { at: Option<Point> },
    Key { key: Key, modifiers: Modifiers },
    Tool(ToolKind),
    Color(ShapeColor),
    Border(BorderStyle),
}

fn parse_point(args: &[&str]) -> Result<Point, String> {
    match args {
        [x, y, ..] => {
            let x = x.parse().map_err(|_| format!("bad x coordinate `{x}`"))?;
            let y = y.parse().map_err(|_| format!("bad y coordinate `{y}`"))?;
            Ok(Point::new(x, y))
        }
        _ => Err("expected X Y".to_string()),
    }
}

fn parse_modifiers(args: &[&str]) -> Result<Modifiers, String> {
    let mut modifiers = Modifiers::default();
    for arg in args {
        match arg.to_ascii_lowercase().as_str() {
            "ctrl" => modifiers.ctrl = true,
            "shift" => modifiers.shift = true,
            "alt" => modifiers.alt = true,
            "meta" | "cmd" => modifiers.meta = true,
            other => return Err(format!("unknown modifier `{other}`")),
        }
    }
    Ok(modifiers)
}

fn parse_border(name: &str) -> Result<BorderStyle, String> {
    match name.to_ascii_lowercase().as_str() {
        "solid" => Ok(BorderStyle::Solid),
        "dashed" => Ok(BorderStyle::Dashed),
        "dotted" => Ok(BorderStyle::Dotted),
        other => Err(format!("unknown border style `{other}`")),
    }
}

fn parse_step(line: &str) -> Result<Option<Step>, String> {
    let line = line.split('#').next().unwrap_or_default().trim();
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&verb, args)) = words.split_first() else {
        return Ok(None);
    };
    let one_arg = || match args {
        [arg] => Ok(*arg),
        _ => Err(format!("`{verb}` takes one argument")),
    };

    let step = match verb.to_ascii_lowercase().as_str() {
        "down" => Step::Down {
            at: parse_point(args)?,
            modifiers: parse_modifiers(args.get(2..).unwrap_or_default())?,
        },
        "drag" | "move" => Step::Drag {
            at: parse_point(args)?,
        },
        "up" if args.is_empty() => Step::Up { at: None },
        "up" => Step::Up {
            at: Some(parse_point(args)?),
        },
        "key" => {
            let (key, modifiers) = parse_key_chord(one_arg()?).map_err(|e| e.to_string())?;
            Step::Key { key, modifiers }
        }
        "tool" => Step::Tool(one_arg()?.parse::<ToolKind>().map_err(|e| e.to_string())?),
        "color" => {
            let name = one_arg()?;
            Step::Color(palette_color(name).ok_or_else(|| format!("unknown color `{name}`"))?)
        }
        "border" => Step::Border(parse_border(one_arg()?)?),
        other => return Err(format!("unknown step `{other}`")),
    };
    Ok(Some(step))
}

/// Parse a whole script, stopping at the first bad line.
pub fn parse_script(script: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, line) in script.lines().enumerate() {
        match parse_step(line) {
            Ok(Some(step)) => steps.push(step),
            Ok(None) => {}
            Err(message) => {
                return Err(ScriptError {
                    line: index + 1,
                    message,
                });
            }
        }
    }
    Ok(steps)
}

/// Feed steps to the editor in order.
pub fn run_steps(editor: &mut Editor, steps: &[Step]) {
    let mut last = Point::ZERO;
    for step in steps {
        log::debug!("Replaying {step:?}");
        match *step {
            Step::Down { at, modifiers } => {
                last = at;
                editor.pointer_down(at, modifiers);
            }
            Step::Drag { at } => {
                last = at;
                editor.pointer_drag(at);
            }
            Step::Up { at } => {
                let at = at.unwrap_or(last);
                last = at;
                editor.pointer_up(at);
            }
            Step::Key { key, modifiers } => {
                editor.handle_key(KeyEvent::Pressed(key), modifiers);
            }
            Step::Tool(tool) => editor.set_tool(tool),
            Step::Color(color) => {
                editor.execute(Command::SetColor(color));
            }
            Step::Border(border) => {
                editor.execute(Command::SetBorderStyle(border));
            }
        }
    }
}
