//! A stack of full-screen views and the cooperative loop that drives them.
//!
//! Invariants:
//! - The stack is never empty while a session is running; popping the sole
//!   remaining view is the defined termination path, not an error.
//! - The top view is the only one rendered and the only one receiving keys;
//!   views below keep their state untouched until they resurface.
//! - Everything runs on the thread calling [`ViewStack::run`]: a keystroke is
//!   fully processed, including any stack operations its callbacks request,
//!   before the next key is read.

use tracing::{debug, trace};

use crate::backend::Backend;
use crate::event::key::Key;
use crate::render::{Frame, Render};
use crate::widgets::Widget;
use crate::{Error, Result};

/// Why a run loop ended.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TerminationReason {
    /// The last view was popped off the stack.
    StackEmptied,
    /// The user backed out of the root view.
    UserAborted,
    /// A confirm control accepted the session.
    Confirmed,
}

/// A stack operation requested by a widget while it processed a key.
enum StackOp {
    Push(Box<dyn Widget>),
    Pop,
}

/// Handed to every key handler. Collects the stack operations and the
/// termination request raised while processing one keystroke; the run loop
/// applies them as soon as the handler returns.
pub struct Context {
    ops: Vec<StackOp>,
    quit: Option<TerminationReason>,
    attached: bool,
}

impl Context {
    pub(crate) fn new() -> Self {
        Self {
            ops: Vec::new(),
            quit: None,
            attached: true,
        }
    }

    /// A context with no view stack behind it, for driving a widget in
    /// isolation. Stack operations fail immediately, so a widget that needs
    /// a stack (a select popup, say) reports the wiring bug at the first
    /// activation instead of silently doing nothing.
    pub fn detached() -> Self {
        Self {
            attached: false,
            ..Self::new()
        }
    }

    /// Show `view` on top of the active one.
    pub fn push_view(&mut self, view: Box<dyn Widget>) -> Result<()> {
        self.ensure_attached()?;
        self.ops.push(StackOp::Push(view));
        Ok(())
    }

    /// Dismiss the active view.
    pub fn pop_view(&mut self) -> Result<()> {
        self.ensure_attached()?;
        self.ops.push(StackOp::Pop);
        Ok(())
    }

    /// End the session once the current keystroke has been processed.
    pub fn quit(&mut self, reason: TerminationReason) {
        self.quit = Some(reason);
    }

    /// The termination requested so far, if any.
    pub fn termination(&self) -> Option<TerminationReason> {
        self.quit
    }

    fn ensure_attached(&self) -> Result<()> {
        if self.attached {
            Ok(())
        } else {
            Err(Error::Invalid(
                "no view stack attached to this context".into(),
            ))
        }
    }
}

/// A stack of views, root first. The last element is the active view.
pub struct ViewStack {
    views: Vec<Box<dyn Widget>>,
}

impl ViewStack {
    pub fn new(root: Box<dyn Widget>) -> Self {
        Self { views: vec![root] }
    }

    pub fn push(&mut self, view: Box<dyn Widget>) {
        debug!(depth = self.views.len(), "push view");
        self.views.push(view);
    }

    /// Remove and return the active view. Popping the sole remaining view is
    /// how a session ends; popping an already-empty stack is a caller bug.
    pub fn pop(&mut self) -> Result<Box<dyn Widget>> {
        debug!(depth = self.views.len(), "pop view");
        self.views
            .pop()
            .ok_or_else(|| Error::Internal("pop from an empty view stack".into()))
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    /// Render the active view.
    pub fn render(&self) -> Result<Frame> {
        let top = self
            .views
            .last()
            .ok_or_else(|| Error::Render("render on an empty view stack".into()))?;
        let mut r = Render::new();
        top.render(&mut r)?;
        Ok(r.into_frame())
    }

    /// Feed one key to the active view, then apply the stack operations the
    /// dispatch requested. Returns the termination reason if this keystroke
    /// ended the session.
    pub fn dispatch(&mut self, key: Key) -> Result<Option<TerminationReason>> {
        trace!(?key, depth = self.views.len(), "dispatch");
        let mut ctx = Context::new();
        let top = self
            .views
            .last_mut()
            .ok_or_else(|| Error::Internal("dispatch on an empty view stack".into()))?;
        top.handle_key(&mut ctx, key)?;

        for op in ctx.ops {
            match op {
                StackOp::Push(view) => self.push(view),
                StackOp::Pop => {
                    self.pop()?;
                    if self.views.is_empty() {
                        return Ok(Some(TerminationReason::StackEmptied));
                    }
                }
            }
        }
        Ok(ctx.quit)
    }

    /// Drive the session: render the active view, block for a key, dispatch
    /// it, repeat until the stack empties or a widget requests termination.
    pub fn run(&mut self, backend: &mut dyn Backend) -> Result<TerminationReason> {
        loop {
            backend.render(&self.render()?)?;
            let key = backend.next_key()?;
            if let Some(reason) = self.dispatch(key)? {
                debug!(?reason, "run loop ended");
                return Ok(reason);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::key::KeyCode;
    use crate::render::Render;
    use crate::widgets::EventOutcome;

    /// A view that pushes a copy of itself on 'n', pops itself on 'p', and
    /// requests confirmation on 'q'. Renders its name.
    struct TView {
        name: String,
    }

    impl TView {
        fn boxed(name: &str) -> Box<dyn Widget> {
            Box::new(Self {
                name: name.to_owned(),
            })
        }
    }

    impl Widget for TView {
        fn handle_key(&mut self, ctx: &mut Context, key: Key) -> Result<EventOutcome> {
            match key.code {
                KeyCode::Char('n') => {
                    ctx.push_view(TView::boxed(&format!("{}+", self.name)))?;
                    Ok(EventOutcome::Handle)
                }
                KeyCode::Char('p') => {
                    ctx.pop_view()?;
                    Ok(EventOutcome::Handle)
                }
                KeyCode::Char('q') => {
                    ctx.quit(TerminationReason::Confirmed);
                    Ok(EventOutcome::Handle)
                }
                _ => Ok(EventOutcome::Ignore),
            }
        }

        fn render(&self, r: &mut Render) -> Result<()> {
            r.text("text", &self.name);
            Ok(())
        }
    }

    #[test]
    fn tpush_pop() -> Result<()> {
        let mut stack = ViewStack::new(TView::boxed("root"));
        assert_eq!(stack.dispatch(Key::from('n'))?, None);
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.render()?.text(), "root+");

        assert_eq!(stack.dispatch(Key::from('p'))?, None);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.render()?.text(), "root");
        Ok(())
    }

    #[test]
    fn tpop_last_view_terminates() -> Result<()> {
        let mut stack = ViewStack::new(TView::boxed("root"));
        assert_eq!(
            stack.dispatch(Key::from('p'))?,
            Some(TerminationReason::StackEmptied)
        );
        assert!(stack.is_empty());
        Ok(())
    }

    #[test]
    fn tpop_empty_stack_is_an_error() {
        let mut stack = ViewStack::new(TView::boxed("root"));
        stack.pop().unwrap();
        assert_eq!(
            stack.pop().err(),
            Some(Error::Internal("pop from an empty view stack".into()))
        );
    }

    #[test]
    fn tquit_propagates() -> Result<()> {
        let mut stack = ViewStack::new(TView::boxed("root"));
        assert_eq!(
            stack.dispatch(Key::from('q'))?,
            Some(TerminationReason::Confirmed)
        );
        // The stack survives an explicit quit; only popping empties it.
        assert_eq!(stack.depth(), 1);
        Ok(())
    }

    #[test]
    fn tunrouted_keys_do_nothing() -> Result<()> {
        let mut stack = ViewStack::new(TView::boxed("root"));
        assert_eq!(stack.dispatch(Key::from('x'))?, None);
        assert_eq!(stack.depth(), 1);
        Ok(())
    }

    #[test]
    fn tdetached_context_rejects_stack_ops() {
        let mut ctx = Context::detached();
        assert!(matches!(
            ctx.pop_view(),
            Err(Error::Invalid(_))
        ));
        assert!(matches!(
            ctx.push_view(TView::boxed("x")),
            Err(Error::Invalid(_))
        ));
        // Quit needs no stack.
        ctx.quit(TerminationReason::UserAborted);
        assert_eq!(ctx.termination(), Some(TerminationReason::UserAborted));
    }
}
