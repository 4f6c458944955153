//! Where keys come from and frames go. The engine drives a [`Backend`] and
//! nothing else, so a session runs identically against a real terminal
//! ([`term::Term`]) or a scripted test double ([`crate::tutils::TestBackend`]).

pub mod term;

use crate::Result;
use crate::event::key::Key;
use crate::render::Frame;

/// The engine's contact surface with the outside world.
pub trait Backend {
    /// Draw a complete frame, replacing whatever was on screen.
    fn render(&mut self, frame: &Frame) -> Result<()>;

    /// Block until the next keystroke. This is the run loop's only
    /// suspension point.
    fn next_key(&mut self) -> Result<Key>;
}
