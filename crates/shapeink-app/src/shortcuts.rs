//! Keyboard shortcut listing.

use shapeink_core::editor::KEY_BINDINGS;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub chord: &'static str,
    pub description: &'static str,
}

impl Shortcut {
    /// Format the chord for display (e.g., "Ctrl+G").
    pub fn format(&self) -> String {
        let (modifiers, key) = match self.chord.strip_suffix("++") {
            Some(modifiers) => (modifiers, "+"),
            None => match self.chord.rsplit_once('+') {
                Some((modifiers, key)) if !key.is_empty() => (modifiers, key),
                _ => ("", self.chord),
            },
        };
        modifiers
            .split('+')
            .filter(|part| !part.is_empty())
            .chain(std::iter::once(key))
            .map(capitalize)
            .collect::<Vec<_>>()
            .join("+")
    }
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        KEY_BINDINGS
            .iter()
            .map(|&(chord, description)| Shortcut { chord, description })
            .collect()
    }

    /// Render every shortcut as an aligned table.
    pub fn render() -> String {
        let mut out = String::from("Keyboard shortcuts:\n");
        for shortcut in Self::all() {
            out.push_str(&format!("  {:14} {}\n", shortcut.format(), shortcut.description));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let ctrl_g = Shortcut {
            chord: "ctrl+g",
            description: "",
        };
        assert_eq!(ctrl_g.format(), "Ctrl+G");
        let left = Shortcut {
            chord: "shift+left",
            description: "",
        };
        assert_eq!(left.format(), "Shift+Left");
        let plus = Shortcut {
            chord: "+",
            description: "",
        };
        assert_eq!(plus.format(), "+");
        let grow = Shortcut {
            chord: "ctrl++",
            description: "",
        };
        assert_eq!(grow.format(), "Ctrl++");
    }

    #[test]
    fn test_render_lists_group() {
        let table = ShortcutRegistry::render();
        assert!(table.contains("Ctrl+G"));
        assert!(table.contains("Group selected shapes"));
    }
}
