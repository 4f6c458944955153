use crate::Result;
use crate::event::key::{Key, KeyCode};
use crate::render::Render;
use crate::viewstack::Context;
use crate::widgets::{EventOutcome, Widget};

/// An observer fired when a button is activated.
pub type PressCallback = Box<dyn FnMut(&mut Context) -> Result<()>>;

/// A one-line button, activated with Enter or Space.
pub struct Button {
    label: String,
    on_press: Vec<PressCallback>,
}

impl Button {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            on_press: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Register an activation observer. Observers fire in registration
    /// order.
    pub fn on_press(&mut self, callback: PressCallback) {
        self.on_press.push(callback);
    }

    fn fire(&mut self, ctx: &mut Context) -> Result<()> {
        for callback in &mut self.on_press {
            callback(ctx)?;
        }
        Ok(())
    }
}

impl Widget for Button {
    fn accept_focus(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.fire(ctx)?;
                Ok(EventOutcome::Handle)
            }
            _ => Ok(EventOutcome::Ignore),
        }
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        let style = r.focus_style("ui");
        r.text(&style, format!("< {} >", self.label));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn tactivation() {
        let hits = Rc::new(Cell::new(0));
        let mut button = Button::new("OK");
        {
            let hits = Rc::clone(&hits);
            button.on_press(Box::new(move |_ctx| {
                hits.set(hits.get() + 1);
                Ok(())
            }));
        }

        let mut ctx = Context::detached();
        assert_eq!(
            button.handle_key(&mut ctx, Key::from(KeyCode::Enter)).unwrap(),
            EventOutcome::Handle
        );
        assert_eq!(
            button.handle_key(&mut ctx, Key::from(' ')).unwrap(),
            EventOutcome::Handle
        );
        assert_eq!(
            button.handle_key(&mut ctx, Key::from('x')).unwrap(),
            EventOutcome::Ignore
        );
        assert_eq!(hits.get(), 2);
    }
}
