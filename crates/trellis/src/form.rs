//! The form engine: turns a list of field descriptors into a focus pile,
//! runs one view-stack session over it, and collects the surviving values.
//! The engine knows a field's kind and label, never its business meaning,
//! and it persists nothing: a caller acts on the result, and only when the
//! session was not cancelled.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::NaiveDate;
use tracing::debug;

use crate::Result;
use crate::backend::Backend;
use crate::backend::term::with_terminal;
use crate::viewstack::{TerminationReason, ViewStack};
use crate::widgets::{
    Button, DateInput, FocusPile, Select, SelectState, Text, TextBuf, TextInput, Widget,
    format_date, parse_date,
};

/// What kind of widget a field builds. A closed set: select options travel
/// with their variant, so a descriptor cannot be miswired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A free-text line.
    Text,
    /// One choice from a fixed option list, or no choice at all.
    Select(Vec<String>),
    /// A `d/m/y` date, parsed on extraction.
    Date,
}

/// One field of a form: a kind, a label, and an optional starting value.
/// Immutable once a session starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub kind: FieldKind,
    pub label: String,
    pub value: Option<String>,
}

impl Field {
    pub fn text(label: &str, value: &str) -> Self {
        Self {
            kind: FieldKind::Text,
            label: label.to_owned(),
            value: Some(value.to_owned()),
        }
    }

    pub fn select(label: &str, options: Vec<String>, value: Option<String>) -> Self {
        Self {
            kind: FieldKind::Select(options),
            label: label.to_owned(),
            value,
        }
    }

    pub fn date(label: &str, value: Option<NaiveDate>) -> Self {
        Self {
            kind: FieldKind::Date,
            label: label.to_owned(),
            value: value.map(format_date),
        }
    }
}

/// A field's final value, typed by its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    /// None is "no selection".
    Choice(Option<String>),
    /// None is "the text did not parse".
    Date(Option<NaiveDate>),
}

/// The outcome of one form session. A cancelled result carries no values;
/// callers must not persist anything from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormResult {
    cancelled: bool,
    values: Vec<(String, FieldValue)>,
}

impl FormResult {
    fn cancelled() -> Self {
        Self {
            cancelled: true,
            values: Vec::new(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Field values, in descriptor order.
    pub fn values(&self) -> &[(String, FieldValue)] {
        &self.values
    }

    /// Look a value up by field label.
    pub fn get(&self, label: &str) -> Option<&FieldValue> {
        self.values
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }
}

/// Reads a field's final value out of the widget state that survives the
/// session.
enum FieldHandle {
    Text(Rc<RefCell<TextBuf>>),
    Date(Rc<RefCell<TextBuf>>),
    Select(Rc<RefCell<SelectState>>),
}

impl FieldHandle {
    fn extract(&self) -> FieldValue {
        match self {
            Self::Text(buf) => FieldValue::Text(buf.borrow().value().to_owned()),
            Self::Date(buf) => FieldValue::Date(parse_date(buf.borrow().value())),
            Self::Select(state) => {
                FieldValue::Choice(state.borrow().value().map(str::to_owned))
            }
        }
    }
}

/// A form under construction, and the engine that runs it.
pub struct Form {
    title: String,
    fields: Vec<Field>,
}

impl Form {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Fields keep their insertion order everywhere: focus
    /// traversal, rendering, and the result.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Run one session against a backend: title at the top, one widget per
    /// field, an OK button at the bottom, all in a fresh pile and view
    /// stack. Returns when the user confirms or backs out.
    pub fn run(self, backend: &mut dyn Backend) -> Result<FormResult> {
        debug!(title = %self.title, fields = self.fields.len(), "form session starting");

        let mut widgets: Vec<Box<dyn Widget>> =
            vec![Box::new(Text::new(format!("{}\n", self.title)))];
        let mut handles: Vec<(String, FieldHandle)> = Vec::new();

        for field in &self.fields {
            let start = field.value.as_deref().unwrap_or_default();
            let handle = match &field.kind {
                FieldKind::Text => {
                    let input = TextInput::new(&format!("{}:\n", field.label), start);
                    let handle = FieldHandle::Text(input.buffer());
                    widgets.push(Box::new(input));
                    handle
                }
                FieldKind::Date => {
                    let input = DateInput::with_text(&field.label, start);
                    let handle = FieldHandle::Date(input.buffer());
                    widgets.push(Box::new(input));
                    handle
                }
                FieldKind::Select(options) => {
                    let select =
                        Select::new(&field.label, options.clone(), field.value.clone());
                    let handle = FieldHandle::Select(select.state());
                    widgets.push(Box::new(select));
                    handle
                }
            };
            handles.push((field.label.clone(), handle));
        }

        let mut ok = Button::new("OK");
        ok.on_press(Box::new(|ctx| {
            ctx.quit(TerminationReason::Confirmed);
            Ok(())
        }));
        widgets.push(Box::new(ok));

        let pile = FocusPile::new(widgets)?;
        let mut stack = ViewStack::new(Box::new(pile));
        let reason = stack.run(backend)?;
        debug!(?reason, "form session ended");

        match reason {
            TerminationReason::Confirmed => Ok(FormResult {
                cancelled: false,
                values: handles
                    .into_iter()
                    .map(|(label, handle)| (label, handle.extract()))
                    .collect(),
            }),
            TerminationReason::UserAborted | TerminationReason::StackEmptied => {
                Ok(FormResult::cancelled())
            }
        }
    }

    /// Run fullscreen in the attached terminal.
    pub fn run_fullscreen(self) -> Result<FormResult> {
        with_terminal(|term| self.run(term))
    }
}
