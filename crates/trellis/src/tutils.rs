//! Utilities for driving sessions without a terminal.

use std::collections::VecDeque;

use crate::backend::Backend;
use crate::event::key::{Key, KeyCode};
use crate::render::Frame;
use crate::{Error, Result};

/// A scripted backend: feeds a fixed key sequence to the run loop and
/// captures every frame it renders. The script running dry is an error, so a
/// test that forgets to end its session fails loudly instead of hanging.
pub struct TestBackend {
    keys: VecDeque<Key>,
    /// Every frame rendered during the run, in order.
    pub frames: Vec<Frame>,
}

impl TestBackend {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            frames: Vec::new(),
        }
    }

    /// The last rendered frame as plain text.
    pub fn screen(&self) -> String {
        self.frames.last().map(Frame::text).unwrap_or_default()
    }
}

impl Backend for TestBackend {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key> {
        self.keys
            .pop_front()
            .ok_or_else(|| Error::RunLoop("key script ran out".into()))
    }
}

/// Every character of `text` as a keystroke.
pub fn typed(text: &str) -> Vec<Key> {
    text.chars().map(Key::from).collect()
}

/// Shorthand for a bare keycode.
pub fn key(code: KeyCode) -> Key {
    Key::new(code)
}

/// Concatenate key script fragments.
pub fn script<const N: usize>(parts: [Vec<Key>; N]) -> Vec<Key> {
    parts.into_iter().flatten().collect()
}
