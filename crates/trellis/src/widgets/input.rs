use std::cell::RefCell;
use std::ops::BitOr;
use std::rc::Rc;

use crate::Result;
use crate::event::key::{Key, KeyCode};
use crate::render::Render;
use crate::viewstack::Context;
use crate::widgets::{EventOutcome, Widget};

/// A single-line edit buffer with a character-indexed cursor.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct TextBuf {
    value: String,
    /// Cursor position in characters, 0 ..= char count.
    cursor: usize,
}

impl TextBuf {
    /// A buffer holding `start`, cursor at the end.
    pub fn new(start: &str) -> Self {
        Self {
            value: start.to_owned(),
            cursor: start.chars().count(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Byte offset of the given character position.
    fn byte_at(&self, chars: usize) -> usize {
        self.value
            .char_indices()
            .nth(chars)
            .map_or(self.value.len(), |(i, _)| i)
    }

    /// Insert a character at the cursor.
    pub fn insert(&mut self, c: char) -> bool {
        let at = self.byte_at(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.value.remove(at);
        true
    }

    /// Delete the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        let at = self.byte_at(self.cursor);
        self.value.remove(at);
        true
    }

    /// Move the cursor left by one character.
    pub fn left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move the cursor right by one character.
    pub fn right(&mut self) -> bool {
        if self.cursor >= self.value.chars().count() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Move the cursor to the start of the line.
    pub fn home(&mut self) -> bool {
        let moved = self.cursor != 0;
        self.cursor = 0;
        moved
    }

    /// Move the cursor past the last character.
    pub fn end(&mut self) -> bool {
        let len = self.value.chars().count();
        let moved = self.cursor != len;
        self.cursor = len;
        moved
    }
}

/// The typed events a [`TextInput`] raises instead of swallowing terminal
/// keys.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum EditEvent {
    /// Esc was pressed. The buffer was not touched.
    Cancelled,
    /// Enter was pressed.
    Confirmed,
    /// Arrow up, for observers steering an external highlight.
    MoveUp,
    /// Arrow down.
    MoveDown,
    /// The buffer content changed; carries the new value.
    Changed(String),
}

impl EditEvent {
    /// The registration slot this event matches.
    pub fn set(&self) -> EventSet {
        match self {
            Self::Cancelled => EventSet::CANCELLED,
            Self::Confirmed => EventSet::CONFIRMED,
            Self::MoveUp => EventSet::MOVE_UP,
            Self::MoveDown => EventSet::MOVE_DOWN,
            Self::Changed(_) => EventSet::CHANGED,
        }
    }
}

/// A set of event kinds, combinable with `|` when registering an observer
/// for several kinds at once.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct EventSet(u8);

impl EventSet {
    pub const CANCELLED: Self = Self(1);
    pub const CONFIRMED: Self = Self(1 << 1);
    pub const MOVE_UP: Self = Self(1 << 2);
    pub const MOVE_DOWN: Self = Self(1 << 3);
    pub const CHANGED: Self = Self(1 << 4);

    /// Does this set overlap `other`?
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for EventSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// An observer called when a matching event fires.
pub type EditCallback = Box<dyn FnMut(&mut Context, &EditEvent) -> Result<()>>;

/// A single-line text input.
///
/// Terminal keys (Esc, Enter, the vertical arrows) are reported to
/// registered observers as [`EditEvent`]s rather than acted on; everything
/// else edits the buffer, raising [`EditEvent::Changed`] when the content
/// actually changed. A keystroke that raises a terminal event never also
/// raises `Changed`.
pub struct TextInput {
    caption: String,
    buf: Rc<RefCell<TextBuf>>,
    observers: Vec<(EventSet, EditCallback)>,
    style: String,
}

impl TextInput {
    /// A text input captioned `caption`, starting with `start` in the
    /// buffer. A caption ending in a newline puts the text on its own row.
    pub fn new(caption: &str, start: &str) -> Self {
        Self {
            caption: caption.to_owned(),
            buf: Rc::new(RefCell::new(TextBuf::new(start))),
            observers: Vec::new(),
            style: "ui".to_owned(),
        }
    }

    /// A shared handle on the buffer, so the final text can be read after
    /// the widget's view is gone.
    pub fn buffer(&self) -> Rc<RefCell<TextBuf>> {
        Rc::clone(&self.buf)
    }

    /// The current buffer content.
    pub fn text(&self) -> String {
        self.buf.borrow().value().to_owned()
    }

    /// Register `callback` for every event kind in `events`. A kind may have
    /// any number of observers; they fire synchronously, in registration
    /// order.
    pub fn on(&mut self, events: EventSet, callback: EditCallback) {
        self.observers.push((events, callback));
    }

    fn fire(&mut self, ctx: &mut Context, event: &EditEvent) -> Result<()> {
        for (set, callback) in &mut self.observers {
            if set.contains(event.set()) {
                callback(ctx, event)?;
            }
        }
        Ok(())
    }
}

impl Widget for TextInput {
    fn accept_focus(&self) -> bool {
        true
    }

    fn advance_on_enter(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        let event = match key.code {
            KeyCode::Esc => Some(EditEvent::Cancelled),
            KeyCode::Enter => Some(EditEvent::Confirmed),
            KeyCode::Up => Some(EditEvent::MoveUp),
            KeyCode::Down => Some(EditEvent::MoveDown),
            _ => None,
        };
        if let Some(event) = event {
            self.fire(ctx, &event)?;
            return Ok(EventOutcome::Handle);
        }

        let changed = {
            let mut buf = self.buf.borrow_mut();
            match key.code {
                KeyCode::Char(c) => buf.insert(c),
                KeyCode::Backspace => buf.backspace(),
                KeyCode::Delete => buf.delete(),
                KeyCode::Left => {
                    buf.left();
                    false
                }
                KeyCode::Right => {
                    buf.right();
                    false
                }
                KeyCode::Home => {
                    buf.home();
                    false
                }
                KeyCode::End => {
                    buf.end();
                    false
                }
                _ => return Ok(EventOutcome::Ignore),
            }
        };
        if changed {
            let value = self.buf.borrow().value().to_owned();
            self.fire(ctx, &EditEvent::Changed(value))?;
        }
        Ok(EventOutcome::Handle)
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        let style = r.focus_style(&self.style);
        r.text(&style, format!("{}{}", self.caption, self.buf.borrow().value()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(input: &mut TextInput, code: KeyCode) -> EventOutcome {
        let mut ctx = Context::detached();
        input.handle_key(&mut ctx, Key::new(code)).unwrap()
    }

    #[test]
    fn tbuf_edit() {
        let mut buf = TextBuf::new("ab");
        assert_eq!(buf.cursor(), 2);
        buf.insert('c');
        assert_eq!(buf.value(), "abc");
        assert!(buf.backspace());
        assert_eq!(buf.value(), "ab");
        assert!(buf.left());
        buf.insert('x');
        assert_eq!(buf.value(), "axb");
        assert!(buf.home());
        assert!(!buf.home());
        assert!(buf.delete());
        assert_eq!(buf.value(), "xb");
        assert!(buf.end());
        assert!(!buf.right());
        assert!(!buf.delete());
    }

    #[test]
    fn tbuf_multibyte() {
        let mut buf = TextBuf::new("héllo");
        assert!(buf.home());
        assert!(buf.right());
        assert!(buf.right());
        buf.insert('é');
        assert_eq!(buf.value(), "hééllo");
        assert!(buf.backspace());
        assert_eq!(buf.value(), "héllo");
    }

    #[test]
    fn tevents_fire_in_registration_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = TextInput::new("f: ", "");

        for tag in ["first", "second"] {
            let log = Rc::clone(&log);
            input.on(
                EventSet::CONFIRMED,
                Box::new(move |_ctx, _ev| {
                    log.borrow_mut().push(tag);
                    Ok(())
                }),
            );
        }
        press(&mut input, KeyCode::Enter);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn tchanged_only_on_content_change() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let mut input = TextInput::new("f: ", "a");
        {
            let changes = Rc::clone(&changes);
            input.on(
                EventSet::CHANGED,
                Box::new(move |_ctx, ev| {
                    if let EditEvent::Changed(text) = ev {
                        changes.borrow_mut().push(text.clone());
                    }
                    Ok(())
                }),
            );
        }

        press(&mut input, KeyCode::Char('b'));
        // Cursor motion leaves the content alone.
        press(&mut input, KeyCode::Left);
        press(&mut input, KeyCode::Home);
        // Backspace at the start has nothing to delete.
        press(&mut input, KeyCode::Backspace);
        press(&mut input, KeyCode::End);
        press(&mut input, KeyCode::Backspace);
        assert_eq!(*changes.borrow(), vec!["ab".to_owned(), "a".to_owned()]);
    }

    #[test]
    fn tterminal_keys_never_raise_changed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut input = TextInput::new("f: ", "x");
        {
            let log = Rc::clone(&log);
            input.on(
                EventSet::CANCELLED
                    | EventSet::CONFIRMED
                    | EventSet::MOVE_UP
                    | EventSet::MOVE_DOWN
                    | EventSet::CHANGED,
                Box::new(move |_ctx, ev| {
                    log.borrow_mut().push(ev.clone());
                    Ok(())
                }),
            );
        }

        press(&mut input, KeyCode::Esc);
        press(&mut input, KeyCode::Enter);
        press(&mut input, KeyCode::Up);
        press(&mut input, KeyCode::Down);
        assert_eq!(
            *log.borrow(),
            vec![
                EditEvent::Cancelled,
                EditEvent::Confirmed,
                EditEvent::MoveUp,
                EditEvent::MoveDown,
            ]
        );
        // Esc must not have touched the buffer.
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn tunknown_keys_are_ignored() {
        let mut input = TextInput::new("f: ", "x");
        assert_eq!(press(&mut input, KeyCode::Tab), EventOutcome::Ignore);
        assert_eq!(press(&mut input, KeyCode::Null), EventOutcome::Ignore);
        assert_eq!(input.text(), "x");
    }

    #[test]
    fn trender_inline_and_captioned() {
        let input = TextInput::new("Name:\n", "Ada");
        let mut r = Render::new();
        input.render(&mut r).unwrap();
        let frame = r.into_frame();
        assert_eq!(frame.text(), "Name:\nAda");
    }
}
