use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::Result;
use crate::event::key::{Key, KeyCode};
use crate::render::Render;
use crate::viewstack::Context;
use crate::widgets::input::{EditEvent, EventSet, TextInput};
use crate::widgets::{EventOutcome, Widget};

/// The synthetic first row of every result list, standing for a null choice.
pub const NO_SELECTION: &str = "<None>";

/// The state a select field shares between its button face, its popup, and
/// the form that reads the final choice.
#[derive(Debug, PartialEq, Eq)]
pub struct SelectState {
    label: String,
    options: Vec<String>,
    value: Option<String>,
    results: Vec<String>,
    highlight: usize,
}

impl SelectState {
    fn new(label: &str, options: Vec<String>, value: Option<String>) -> Self {
        let mut state = Self {
            label: label.to_owned(),
            options,
            value,
            results: Vec::new(),
            highlight: 0,
        };
        state.set_results("");
        state
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The committed choice; None means "no selection".
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The current result list, synthetic row included.
    pub fn results(&self) -> &[String] {
        &self.results
    }

    /// The highlighted row index within [`SelectState::results`].
    pub fn highlight(&self) -> usize {
        self.highlight
    }

    /// Recompute the result list for a filter: case-insensitive substring
    /// match over the options, original order kept, [`NO_SELECTION`] always
    /// first. The highlight lands on the first real match when there is one,
    /// else on the synthetic row.
    pub fn set_results(&mut self, filter: &str) {
        let needle = filter.to_lowercase();
        self.results = std::iter::once(NO_SELECTION.to_owned())
            .chain(
                self.options
                    .iter()
                    .filter(|o| o.to_lowercase().contains(&needle))
                    .cloned(),
            )
            .collect();
        self.highlight = if self.results.len() > 1 { 1 } else { 0 };
    }

    /// Move the highlight one row, clamped to the result list.
    pub fn move_highlight(&mut self, up: bool) {
        if up {
            self.highlight = self.highlight.saturating_sub(1);
        } else if self.highlight + 1 < self.results.len() {
            self.highlight += 1;
        }
    }

    /// Commit the highlighted row as the selected value. The synthetic row
    /// clears the selection.
    pub fn commit(&mut self) {
        self.value = if self.highlight == 0 {
            None
        } else {
            Some(self.results[self.highlight].clone())
        };
        debug!(label = %self.label, value = ?self.value, "select committed");
    }
}

/// The button face of a searchable dropdown.
///
/// Closed, it shows `Select a {label} [{value}]`. Activation (Enter or
/// Space) pushes a [`SearchView`] over the current view; when that popup is
/// dismissed the button is exactly where it was, showing the possibly
/// updated value.
pub struct Select {
    state: Rc<RefCell<SelectState>>,
}

impl Select {
    pub fn new(label: &str, options: Vec<String>, value: Option<String>) -> Self {
        Self {
            state: Rc::new(RefCell::new(SelectState::new(label, options, value))),
        }
    }

    /// The shared state handle, for reading the choice after a session.
    pub fn state(&self) -> Rc<RefCell<SelectState>> {
        Rc::clone(&self.state)
    }

    /// The committed choice.
    pub fn value(&self) -> Option<String> {
        self.state.borrow().value.clone()
    }
}

impl Widget for Select {
    fn accept_focus(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                debug!(label = %self.state.borrow().label(), "select opened");
                ctx.push_view(Box::new(SearchView::open(Rc::clone(&self.state))))?;
                Ok(EventOutcome::Handle)
            }
            _ => Ok(EventOutcome::Ignore),
        }
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        let state = self.state.borrow();
        let style = r.focus_style("ui");
        r.text(
            &style,
            format!(
                "< Select a {} [{}] >",
                state.label,
                state.value.as_deref().unwrap_or(NO_SELECTION)
            ),
        );
        Ok(())
    }
}

/// The filter-as-you-type popup a [`Select`] pushes on activation: a filter
/// input on top, the result list under it.
///
/// The popup is built fresh for every activation and dropped when it pops
/// itself off; all durable state lives in the shared [`SelectState`]. The
/// filter input's observers do the work: Changed refilters, Up/Down steer
/// the highlight, Enter commits and pops, Esc pops without committing.
pub struct SearchView {
    search: TextInput,
    state: Rc<RefCell<SelectState>>,
}

impl SearchView {
    /// Build the popup for the select's current state. The filter starts as
    /// the current value (or empty) and the result list reflects it
    /// immediately.
    pub fn open(state: Rc<RefCell<SelectState>>) -> Self {
        let (label, init) = {
            let s = state.borrow();
            (s.label.clone(), s.value.clone().unwrap_or_default())
        };
        state.borrow_mut().set_results(&init);

        let mut search = TextInput::new(&format!("{label}: "), &init);

        let st = Rc::clone(&state);
        search.on(
            EventSet::CHANGED,
            Box::new(move |_ctx, event| {
                if let EditEvent::Changed(text) = event {
                    st.borrow_mut().set_results(text);
                }
                Ok(())
            }),
        );

        search.on(
            EventSet::CANCELLED,
            Box::new(|ctx, _event| ctx.pop_view()),
        );

        let st = Rc::clone(&state);
        search.on(
            EventSet::CONFIRMED,
            Box::new(move |ctx, _event| {
                st.borrow_mut().commit();
                ctx.pop_view()
            }),
        );

        let st = Rc::clone(&state);
        search.on(
            EventSet::MOVE_UP | EventSet::MOVE_DOWN,
            Box::new(move |_ctx, event| {
                st.borrow_mut()
                    .move_highlight(matches!(event, EditEvent::MoveUp));
                Ok(())
            }),
        );

        Self { search, state }
    }
}

impl Widget for SearchView {
    fn accept_focus(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        self.search.handle_key(ctx, key)
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        // The filter input is the popup's only focus target.
        r.set_focus(true);
        self.search.render(r)?;
        r.set_focus(false);

        let state = self.state.borrow();
        for (i, result) in state.results.iter().enumerate() {
            let marker = if i == state.highlight { "> " } else { "  " };
            r.text("text", format!("{marker}{result}"));
        }
        Ok(())
    }
}
