use crate::Result;
use crate::event::key::Key;
use crate::render::Render;
use crate::viewstack::Context;
use crate::widgets::{EventOutcome, Widget};

/// A static run of text. Never focusable, never handles a key.
pub struct Text {
    raw: String,
    style: String,
}

impl Text {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into(),
            style: "ui".to_owned(),
        }
    }

    pub fn with_style(mut self, style: &str) -> Self {
        self.style = style.to_owned();
        self
    }
}

impl Widget for Text {
    fn handle_key(&mut self, _ctx: &mut Context, _key: Key) -> Result<EventOutcome> {
        Ok(EventOutcome::Ignore)
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        r.text(&self.style, &self.raw);
        Ok(())
    }
}
