//! Named styles. Widgets emit style names like `ui` or `ui/focus`; the
//! terminal backend resolves them to concrete attributes here. Resolution
//! walks toward the path root, so `ui/focus` falls back to `ui` when no
//! focus variant is registered.

use std::collections::HashMap;

use crossterm::style::Color;

/// A resolved text attribute: one foreground color, optionally reversed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Style {
    pub fg: Color,
    pub reverse: bool,
}

impl Style {
    pub fn fg(fg: Color) -> Self {
        Self { fg, reverse: false }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// The style table for a session.
pub struct StyleMap {
    styles: HashMap<String, Style>,
    default: Style,
}

impl StyleMap {
    /// The stock palette: a single green accent for captions and controls,
    /// reversed under focus, with plain text left alone.
    pub fn new() -> Self {
        let mut map = Self {
            styles: HashMap::new(),
            default: Style::fg(Color::Reset),
        };
        map.add("ui", Style::fg(Color::Green));
        map.add("ui/focus", Style::fg(Color::Green).reversed());
        map
    }

    pub fn add(&mut self, name: &str, style: Style) {
        self.styles.insert(name.to_owned(), style);
    }

    /// Resolve a style name, dropping path segments from the right until a
    /// registered entry matches, then the default.
    pub fn resolve(&self, name: &str) -> Style {
        let mut name = name;
        loop {
            if let Some(style) = self.styles.get(name) {
                return *style;
            }
            match name.rfind('/') {
                Some(idx) => name = &name[..idx],
                None => return self.default,
            }
        }
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tresolve_fallback() {
        let map = StyleMap::new();
        assert_eq!(map.resolve("ui"), Style::fg(Color::Green));
        assert_eq!(map.resolve("ui/focus"), Style::fg(Color::Green).reversed());
        // Unregistered variant falls back to its parent.
        assert_eq!(map.resolve("ui/warn"), Style::fg(Color::Green));
        // Unknown root falls back to the default.
        assert_eq!(map.resolve("missing/deeply"), Style::fg(Color::Reset));
    }
}
