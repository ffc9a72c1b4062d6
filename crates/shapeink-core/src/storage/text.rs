//! Line-oriented text record codec.
//!
//! ```text
//! SQUARE,<x>,<y>,<rgb>,<size>
//! CIRCLE,<x>,<y>,<rgb>,<radius>
//! RECTANGLE,<x>,<y>,<rgb>,<width>,<height>
//! GROUP,<record>;<record>;...
//! ```

use crate::geometry::Point;
use crate::shapes::{Circle, Group, Rectangle, Shape, ShapeColor, Square};

const GROUP_PREFIX: &str = "GROUP,";

/// Shapes recovered from a text document.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub shapes: Vec<Shape>,
    /// Number of non-blank lines that could not be parsed.
    pub skipped: usize,
}

/// Parse one record. Returns `None` for anything malformed or unknown.
pub fn parse_record(line: &str) -> Option<Shape> {
    let line = line.trim();
    if let Some(body) = line.strip_prefix(GROUP_PREFIX) {
        return parse_group(body).map(Shape::from);
    }
    parse_simple(line)
}

/// Children of a group record, flattened one level deep.
fn parse_group(body: &str) -> Option<Group> {
    let mut children = Vec::new();
    for part in body.split(';') {
        let mut part = part.trim();
        if part.is_empty() {
            continue;
        }
        while let Some(rest) = part.strip_prefix(GROUP_PREFIX) {
            part = rest.trim_start();
        }
        children.push(parse_simple(part)?);
    }
    if children.is_empty() {
        return None;
    }
    Some(Group::new(children))
}

fn parse_simple(record: &str) -> Option<Shape> {
    let fields: Vec<&str> = record.split(',').map(str::trim).collect();
    if fields.len() < 4 {
        return None;
    }
    let center = Point::new(fields[1].parse().ok()?, fields[2].parse().ok()?);
    let color = ShapeColor::from_rgb_int(fields[3].parse().ok()?);
    let size = |index: usize| -> Option<i32> {
        let value: i32 = fields.get(index)?.parse().ok()?;
        (value > 0).then_some(value)
    };

    let shape: Shape = match fields[0] {
        "SQUARE" => Square::new(center, size(4)?, color).into(),
        "CIRCLE" => Circle::new(center, size(4)?, color).into(),
        "RECTANGLE" => Rectangle::new(center, size(4)?, size(5)?, color).into(),
        _ => return None,
    };
    Some(shape)
}

/// Parse a whole document, skipping blank lines and logging bad ones.
pub fn parse_document(contents: &str) -> ParsedDocument {
    let mut doc = ParsedDocument::default();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Some(shape) => doc.shapes.push(shape),
            None => {
                log::warn!("Skipping malformed record on line {}: {}", index + 1, line.trim());
                doc.skipped += 1;
            }
        }
    }
    doc
}

/// Render shapes as one record per line. Selection rectangles are left out.
pub fn write_document(shapes: &[Shape]) -> String {
    let mut out = String::new();
    for shape in shapes.iter().filter(|s| s.is_persistent()) {
        out.push_str(&shape.to_record());
        out.push('\n');
    }
    out
}
