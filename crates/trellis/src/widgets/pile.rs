use tracing::trace;

use crate::event::key::{Key, KeyCode};
use crate::render::Render;
use crate::viewstack::{Context, TerminationReason};
use crate::widgets::{EventOutcome, Widget};
use crate::{Error, Result};

/// An ordered stack of widgets with a focus cursor.
///
/// Tab, or Enter while a line editor has focus, moves the cursor to the next
/// focusable widget; Shift+Tab moves it back. There is no wraparound in
/// either direction, and the cursor never lands on index 0, which holds the
/// view's title by convention. Esc aborts the enclosing session outright.
/// Every other key goes to the focused widget.
pub struct FocusPile {
    widgets: Vec<Box<dyn Widget>>,
    focus: usize,
}

impl FocusPile {
    /// Build a pile over `widgets`, focusing the first focusable one. Fails
    /// if nothing can take focus: a pile without an interactive widget would
    /// strand the cursor.
    pub fn new(widgets: Vec<Box<dyn Widget>>) -> Result<Self> {
        let focus = widgets
            .iter()
            .position(|w| w.accept_focus())
            .ok_or_else(|| Error::Focus("pile has no focusable widget".into()))?;
        Ok(Self { widgets, focus })
    }

    /// The current focus index.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Move focus to the next focusable widget. At the end the key is
    /// swallowed with no effect.
    fn focus_next(&mut self) {
        if let Some(offset) = self.widgets[self.focus + 1..]
            .iter()
            .position(|w| w.accept_focus())
        {
            self.focus += offset + 1;
            trace!(focus = self.focus, "focus advanced");
        }
    }

    /// Move focus back one focusable widget, never onto index 0.
    fn focus_prev(&mut self) {
        if let Some(prev) = (1..self.focus).rev().find(|&i| self.widgets[i].accept_focus()) {
            self.focus = prev;
            trace!(focus = self.focus, "focus moved back");
        }
    }
}

impl Widget for FocusPile {
    fn accept_focus(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        match key.code {
            KeyCode::Esc => {
                ctx.quit(TerminationReason::UserAborted);
                return Ok(EventOutcome::Handle);
            }
            KeyCode::Tab => {
                self.focus_next();
                return Ok(EventOutcome::Handle);
            }
            KeyCode::Enter if self.widgets[self.focus].advance_on_enter() => {
                self.focus_next();
                return Ok(EventOutcome::Handle);
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return Ok(EventOutcome::Handle);
            }
            _ => {}
        }
        self.widgets[self.focus].handle_key(ctx, key)
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        for (i, widget) in self.widgets.iter().enumerate() {
            r.set_focus(i == self.focus);
            widget.render(r)?;
        }
        r.set_focus(false);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::{Button, Text, TextInput};

    fn pile() -> FocusPile {
        FocusPile::new(vec![
            Box::new(Text::new("Title\n")),
            Box::new(TextInput::new("A:\n", "")),
            Box::new(TextInput::new("B:\n", "")),
            Box::new(Button::new("OK")),
        ])
        .unwrap()
    }

    fn press(p: &mut FocusPile, code: KeyCode) -> Context {
        let mut ctx = Context::detached();
        p.handle_key(&mut ctx, Key::new(code)).unwrap();
        ctx
    }

    #[test]
    fn tfocus_starts_past_the_title() {
        assert_eq!(pile().focus(), 1);
    }

    #[test]
    fn ttab_advances_without_wrapping() {
        let mut p = pile();
        let mut seen = vec![p.focus()];
        for _ in 0..5 {
            press(&mut p, KeyCode::Tab);
            seen.push(p.focus());
        }
        // Strictly increasing until the last focusable, then pinned there.
        assert_eq!(seen, vec![1, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn tbacktab_stops_at_the_first_field() {
        let mut p = pile();
        press(&mut p, KeyCode::Tab);
        press(&mut p, KeyCode::Tab);
        assert_eq!(p.focus(), 3);
        press(&mut p, KeyCode::BackTab);
        assert_eq!(p.focus(), 2);
        press(&mut p, KeyCode::BackTab);
        assert_eq!(p.focus(), 1);
        // Index 0 is the title; the cursor never reaches it.
        press(&mut p, KeyCode::BackTab);
        assert_eq!(p.focus(), 1);
    }

    #[test]
    fn tenter_advances_from_an_editor_but_not_a_button() {
        let mut p = pile();
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.focus(), 2);
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.focus(), 3);
        // On the button, Enter is delivered instead of advancing.
        press(&mut p, KeyCode::Enter);
        assert_eq!(p.focus(), 3);
    }

    #[test]
    fn tesc_aborts_regardless_of_focus() {
        let mut p = pile();
        press(&mut p, KeyCode::Tab);
        let ctx = press(&mut p, KeyCode::Esc);
        assert_eq!(ctx.termination(), Some(TerminationReason::UserAborted));
    }

    #[test]
    fn tother_keys_reach_the_focused_widget() {
        let mut p = pile();
        press(&mut p, KeyCode::Char('h'));
        press(&mut p, KeyCode::Char('i'));
        let mut r = Render::new();
        p.render(&mut r).unwrap();
        assert!(r.into_frame().text().contains("A:\nhi"));
    }

    #[test]
    fn tno_focusable_widget_fails_fast() {
        let err = FocusPile::new(vec![Box::new(Text::new("only a title"))]).err();
        assert_eq!(err, Some(Error::Focus("pile has no focusable widget".into())));
    }
}
