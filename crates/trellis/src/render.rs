//! Views render to lines of styled text. Each line carries the name of a
//! style, resolved against a [`crate::style::StyleMap`] only at the point
//! where a backend draws it.

use crate::Result;
use crate::widgets::Widget;

/// One rendered line: a style name and its text.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Line {
    pub style: String,
    pub text: String,
}

/// A complete rendered view, top line first.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Frame {
    pub lines: Vec<Line>,
}

impl Frame {
    /// The frame as plain text, one row per line. Handy in assertions.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Collects the lines a view emits during one render sweep, and carries the
/// focus flag a container sets before rendering each child.
pub struct Render {
    lines: Vec<Line>,
    focused: bool,
}

impl Render {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            focused: false,
        }
    }

    /// Emit text under a named style. Embedded newlines split into separate
    /// lines, all carrying the same style.
    pub fn text(&mut self, style: &str, text: impl AsRef<str>) {
        for part in text.as_ref().split('\n') {
            self.lines.push(Line {
                style: style.to_owned(),
                text: part.to_owned(),
            });
        }
    }

    /// Whether the widget currently rendering holds the focus cursor.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set the focus flag for the next child render. Containers own this.
    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// The widget's base style, switched to its `/focus` variant while the
    /// focus flag is up.
    pub fn focus_style(&self, base: &str) -> String {
        if self.focused {
            format!("{base}/focus")
        } else {
            base.to_owned()
        }
    }

    pub fn into_frame(self) -> Frame {
        Frame { lines: self.lines }
    }
}

/// Render a widget as a full view and return the frame.
pub fn render_view(view: &dyn Widget) -> Result<Frame> {
    let mut r = Render::new();
    view.render(&mut r)?;
    Ok(r.into_frame())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tsplit_lines() {
        let mut r = Render::new();
        r.text("ui", "Edit client\n");
        r.text("text", "Name");
        let f = r.into_frame();
        assert_eq!(f.lines.len(), 3);
        assert_eq!(f.lines[0].text, "Edit client");
        assert_eq!(f.lines[1].text, "");
        assert_eq!(f.lines[0].style, "ui");
        assert_eq!(f.text(), "Edit client\n\nName");
    }

    #[test]
    fn tfocus_style() {
        let mut r = Render::new();
        assert_eq!(r.focus_style("ui"), "ui");
        r.set_focus(true);
        assert_eq!(r.focus_style("ui"), "ui/focus");
    }
}
