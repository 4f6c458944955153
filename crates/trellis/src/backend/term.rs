//! The crossterm terminal backend.

use std::io::{Write, stderr};
use std::panic;

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{Event, KeyEventKind, read},
    execute, queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use scopeguard::defer;

use crate::Result;
use crate::backend::Backend;
use crate::event::key::Key;
use crate::render::Frame;
use crate::style::StyleMap;

/// A terminal driven through crossterm. Renders to stderr so stdout stays
/// free for whatever the caller prints after the session.
pub struct Term {
    styles: StyleMap,
}

impl Term {
    pub fn new() -> Self {
        Self {
            styles: StyleMap::default(),
        }
    }

    pub fn with_styles(styles: StyleMap) -> Self {
        Self { styles }
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for Term {
    fn render(&mut self, frame: &Frame) -> Result<()> {
        let mut w = stderr();
        queue!(w, Clear(ClearType::All), MoveTo(0, 0))?;
        for (row, line) in frame.lines.iter().enumerate() {
            let style = self.styles.resolve(&line.style);
            queue!(w, MoveTo(0, row as u16), SetForegroundColor(style.fg))?;
            if style.reverse {
                queue!(w, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                w,
                Print(&line.text),
                ResetColor,
                SetAttribute(Attribute::Reset)
            )?;
        }
        w.flush()?;
        Ok(())
    }

    fn next_key(&mut self) -> Result<Key> {
        loop {
            if let Event::Key(k) = read()? {
                if k.kind != KeyEventKind::Release {
                    return Ok(k.into());
                }
            }
        }
    }
}

/// Put the terminal into raw, alternate-screen mode, run `f` against it, and
/// restore the terminal afterwards, including on error or panic.
pub fn with_terminal<T>(f: impl FnOnce(&mut Term) -> Result<T>) -> Result<T> {
    enable_raw_mode()?;
    let mut w = stderr();
    execute!(w, EnterAlternateScreen, Hide)?;
    defer! {
        let mut w = stderr();
        #[allow(unused_must_use)]
        {
            execute!(w, LeaveAlternateScreen, Show);
            disable_raw_mode();
        }
    }

    panic::set_hook(Box::new(|pi| {
        let mut w = stderr();
        #[allow(unused_must_use)]
        {
            execute!(w, LeaveAlternateScreen, Show);
            disable_raw_mode();
            BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
        }
    }));

    let res = f(&mut Term::new());
    let _ = panic::take_hook();
    res
}
