#![allow(clippy::new_without_default)]
//! A small engine for keyboard-driven forms in a text terminal.
//!
//! The pieces, leaf first: [`widgets::TextInput`] is a single-line editor
//! that reports terminal keys (Esc, Enter, arrows) to registered observers
//! instead of swallowing them; [`widgets::FocusPile`] stacks widgets
//! vertically and moves a focus cursor between them; [`ViewStack`] layers
//! full-screen views so a widget can open a modal popup and return;
//! [`widgets::Select`] combines the two into a filter-as-you-type dropdown;
//! and [`Form`] assembles field descriptors into one end-to-end session.
//!
//! The engine is agnostic about where keys come from and where lines of
//! styled text go: both sides sit behind the [`Backend`] trait, with a
//! crossterm implementation in [`backend::term`] and a scripted one for
//! tests in [`tutils`].

pub mod backend;
pub mod error;
pub mod event;
pub mod form;
pub mod render;
pub mod style;
pub mod tutils;
pub mod viewstack;
pub mod widgets;

pub use backend::Backend;
pub use error::{Error, Result};
pub use event::key::{Key, KeyCode, Mods};
pub use form::{Field, FieldKind, FieldValue, Form, FormResult};
pub use render::{Frame, Line, Render};
pub use style::{Style, StyleMap};
pub use viewstack::{Context, TerminationReason, ViewStack};
pub use widgets::{EventOutcome, Widget};
