//! The widget set: a static text line, a single-line editor with typed key
//! events, a button, a date input, a searchable select, and the focus pile
//! that stacks them into a form view.

mod button;
mod date;
mod input;
mod pile;
mod select;
mod text;

pub use button::{Button, PressCallback};
pub use date::{DateInput, format_date, parse_date};
pub use input::{EditCallback, EditEvent, EventSet, TextBuf, TextInput};
pub use pile::FocusPile;
pub use select::{NO_SELECTION, SearchView, Select, SelectState};
pub use text::Text;

use crate::Result;
use crate::event::key::Key;
use crate::render::Render;
use crate::viewstack::Context;

/// What a widget did with a key.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The key was processed.
    Handle,
    /// The key means nothing to this widget.
    Ignore,
}

/// The capability surface shared by everything a pile or a view stack can
/// hold. Containers only ever see widgets through this trait.
pub trait Widget {
    /// Can this widget take keyboard focus inside a pile? Static content
    /// says no.
    fn accept_focus(&self) -> bool {
        false
    }

    /// Should Enter move focus onward instead of being delivered? True for
    /// line editors, where Enter means "done with this field"; false for
    /// controls that Enter activates.
    fn advance_on_enter(&self) -> bool {
        false
    }

    /// Handle a keystroke routed to this widget.
    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome>;

    /// Emit this widget's lines for the current render sweep.
    fn render(&self, r: &mut Render) -> Result<()>;
}
