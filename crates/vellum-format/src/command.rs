//! The copy-formatting command pair and its tri-state.
//!
//! Two commands share one piece of state: *copy* captures the style chain
//! at the caret element, *apply* replays it over a later selection. The
//! invocation source matters: UI invocations (toolbar button, and the
//! pointer-release implicit apply) drive the tri-state toggle and consume
//! the captured chain, while keystroke invocations are repeatable and
//! leave the tri-state alone.

use strum_macros::Display;
use vellum_dom::{DomTree, NodeId};

use crate::apply::apply_format;
use crate::descriptor::{StyleChain, extract_style_chain};
use crate::selection::EditingContext;

/// Tri-state of the copy-formatting toggle, as rendered by a toolbar
/// button: off, or armed with a captured chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CommandState {
    /// No captured style; the toggle is off.
    Off,
    /// A style chain is captured and waiting to be applied.
    Armed,
}

/// Where a command invocation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum InvocationSource {
    /// Toolbar button or other UI affordance (including the implicit
    /// apply on pointer release inside the editing surface).
    Ui,
    /// A keyboard chord bound by the UI layer.
    Keystroke,
}

/// State owned by the copy-formatting command pair.
///
/// An explicit value the caller owns and passes into both commands,
/// with its lifetime tied to one editing session; nothing global.
#[derive(Debug, Clone)]
pub struct CopyFormatting {
    styles: Option<StyleChain>,
    state: CommandState,
}

impl Default for CopyFormatting {
    fn default() -> Self {
        Self {
            styles: None,
            state: CommandState::Off,
        }
    }
}

impl CopyFormatting {
    /// Fresh command state: off, nothing captured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tri-state, for the UI layer's toggle indicator.
    #[must_use]
    pub fn state(&self) -> CommandState {
        self.state
    }

    /// The captured chain, if any.
    #[must_use]
    pub fn captured(&self) -> Option<&StyleChain> {
        self.styles.as_ref()
    }

    /// The *copy formatting* command: capture the style chain at `element`
    /// (typically the deepest element at the caret).
    ///
    /// From the UI while armed, this is a toggle-off: the chain is
    /// discarded without applying anything. Otherwise the chain is
    /// (re)captured — re-capture overwrites any uncommitted chain — and a
    /// UI invocation arms the tri-state. Keystroke invocations always
    /// recapture and never touch the tri-state, so the chord is freely
    /// repeatable.
    pub fn copy(&mut self, tree: &DomTree, element: NodeId, source: InvocationSource) {
        let from_keystroke = source == InvocationSource::Keystroke;

        if !from_keystroke && self.state() == CommandState::Armed {
            self.styles = None;
            self.state = CommandState::Off;
            return;
        }

        self.styles = Some(extract_style_chain(tree, element));

        if !from_keystroke {
            self.state = CommandState::Armed;
        }
    }

    /// The *apply formatting* command: replay the captured chain over the
    /// context's selection.
    ///
    /// A UI invocation requires the armed state and consumes it (chain
    /// cleared, tri-state off) after applying. A keystroke invocation
    /// applies whenever a chain exists, regardless of tri-state, and
    /// leaves everything in place for the next chord. With no captured
    /// chain this is a no-op either way.
    pub fn apply(&mut self, ctx: &mut EditingContext, source: InvocationSource) {
        let from_keystroke = source == InvocationSource::Keystroke;

        let Some(styles) = &self.styles else { return };
        if !from_keystroke && self.state() != CommandState::Armed {
            return;
        }

        apply_format(ctx, styles);

        if !from_keystroke {
            self.styles = None;
            self.state = CommandState::Off;
        }
    }

    /// Implicit apply on pointer release inside the editing surface;
    /// behaves exactly like a UI [`CopyFormatting::apply`].
    pub fn pointer_release(&mut self, ctx: &mut EditingContext) {
        self.apply(ctx, InvocationSource::Ui);
    }
}
