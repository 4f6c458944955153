use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::Result;
use crate::event::key::Key;
use crate::render::Render;
use crate::viewstack::Context;
use crate::widgets::input::{TextBuf, TextInput};
use crate::widgets::{EventOutcome, Widget};

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})/(?P<month>\d{1,2})/(?P<year>\d{1,4})$").expect("date pattern")
});

/// Parse `d/m/y` text: 1-2 digit day and month, 1-4 digit year. Returns
/// None for anything malformed or out of range; bad input degrades to "no
/// date" for the caller to notice, it is never a failure.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let caps = DATE_RE.captures(text)?;
    let day: u32 = caps["day"].parse().ok()?;
    let month: u32 = caps["month"].parse().ok()?;
    let year: i32 = caps["year"].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Format a date the way [`parse_date`] reads it back.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// A text input for a `d/m/y` date. The text is parsed on extraction, never
/// per keystroke.
pub struct DateInput {
    input: TextInput,
}

impl DateInput {
    pub fn new(label: &str, value: Option<NaiveDate>) -> Self {
        let start = value.map(format_date).unwrap_or_default();
        Self::with_text(label, &start)
    }

    /// Like [`DateInput::new`], starting from already-formatted text.
    pub fn with_text(label: &str, start: &str) -> Self {
        Self {
            input: TextInput::new(&format!("{label} (dd/mm/yyyy):\n"), start),
        }
    }

    /// A shared handle on the underlying text buffer.
    pub fn buffer(&self) -> Rc<RefCell<TextBuf>> {
        self.input.buffer()
    }

    /// The current date, or None while the text does not parse.
    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.input.text())
    }
}

impl Widget for DateInput {
    fn accept_focus(&self) -> bool {
        true
    }

    fn advance_on_enter(&self) -> bool {
        true
    }

    fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
        self.input.handle_key(ctx, key)
    }

    fn render(&self, r: &mut Render) -> Result<()> {
        self.input.render(r)
    }
}
