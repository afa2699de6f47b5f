//! Lexical mode stack.
//!
//! Quote (`'`) and quasiquote (`` ` ``) switch the lexer into a mode where
//! literals are self-quoting data. The mode lasts for one datum: a single
//! atom, or a parenthesized form up to its matching closer. Inside a
//! quasiquote, `,` and `,@` re-enter normal mode for one datum.
//!
//! Each [`Frame`] pairs a mode with the number of delimiters opened since it
//! was pushed. Transitions are computed by the pure [`step`] function; the
//! [`ModeStack`] applies them.
//!
//! Finishing a datum in a pushed frame pops it, and the finished frame then
//! counts as one datum in its parent. So `''x` closes both quotes after `x`,
//! and in `` `(a ,b c) `` the unquote ends after `b` while the quasiquote
//! keeps going until `)`.

use std::fmt;

/// Token interpretation rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LexMode {
    #[default]
    Normal,
    Quote,
    Quasiquote,
}

impl LexMode {
    pub fn as_str(self) -> &'static str {
        match self {
            LexMode::Normal => "normal",
            LexMode::Quote => "quote",
            LexMode::Quasiquote => "quasiquote",
        }
    }
}

impl fmt::Display for LexMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One mode stack entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub mode: LexMode,
    /// Unmatched `(`/`[` since this frame was pushed.
    pub depth: u32,
}

impl Frame {
    pub const fn new(mode: LexMode) -> Self {
        Frame { mode, depth: 0 }
    }
}

/// Structural effect of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormEvent {
    /// `(` or `[`
    Open,
    /// `)` or `]`
    Close,
    /// Any complete datum that is not a delimiter.
    Atom,
    /// A mode trigger: `'`, `` ` ``, `,` or `,@`.
    Enter(LexMode),
}

/// What to do with the stack after updating the top frame's depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackAction {
    Keep,
    Pop,
    Push(LexMode),
}

/// Result of [`step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Step {
    /// New depth of the top frame.
    pub depth: u32,
    pub action: StackAction,
}

/// Transition for one event against the top frame.
///
/// The root frame is never popped and its depth never goes below zero:
/// excess closers at the root are ignored.
pub fn step(top: Frame, is_root: bool, event: FormEvent) -> Step {
    match event {
        FormEvent::Enter(mode) => Step {
            depth: top.depth,
            action: StackAction::Push(mode),
        },
        FormEvent::Open => Step {
            depth: top.depth.saturating_add(1),
            action: StackAction::Keep,
        },
        FormEvent::Close => {
            let depth = top.depth.saturating_sub(1);
            Step {
                depth,
                action: pop_unless_root(depth, is_root),
            }
        }
        FormEvent::Atom => Step {
            depth: top.depth,
            action: pop_unless_root(top.depth, is_root),
        },
    }
}

fn pop_unless_root(depth: u32, is_root: bool) -> StackAction {
    if depth == 0 && !is_root {
        StackAction::Pop
    } else {
        StackAction::Keep
    }
}

/// Non-empty stack of frames. The root frame is `{Normal, 0}` initially.
#[derive(Clone, Debug, Default)]
pub struct ModeStack {
    top: Frame,
    below: Vec<Frame>,
}

impl Default for Frame {
    fn default() -> Self {
        Frame::new(LexMode::Normal)
    }
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active mode (the top frame's).
    #[inline]
    pub fn mode(&self) -> LexMode {
        self.top.mode
    }

    #[inline]
    pub fn top(&self) -> Frame {
        self.top
    }

    /// Number of frames, root included.
    pub fn len(&self) -> usize {
        self.below.len() + 1
    }

    /// Always false; the root frame cannot be popped.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_root(&self) -> bool {
        self.below.is_empty()
    }

    /// Frames from root to top.
    pub fn frames(&self) -> impl DoubleEndedIterator<Item = &Frame> + '_ {
        self.below.iter().chain(std::iter::once(&self.top))
    }

    /// Innermost quote or quasiquote still open, if any.
    pub fn open_quote(&self) -> Option<LexMode> {
        self.frames()
            .rev()
            .map(|frame| frame.mode)
            .find(|&mode| mode != LexMode::Normal)
    }

    /// Apply a token's structural event.
    pub fn apply(&mut self, event: FormEvent) {
        let mut event = event;
        loop {
            let Step { depth, action } = step(self.top, self.is_root(), event);
            self.top.depth = depth;
            match action {
                StackAction::Keep => return,
                StackAction::Push(mode) => {
                    let parent = std::mem::replace(&mut self.top, Frame::new(mode));
                    self.below.push(parent);
                    tracing::trace!(%mode, frames = self.len(), "push lexer mode");
                    return;
                }
                StackAction::Pop => {
                    let Some(parent) = self.below.pop() else {
                        return;
                    };
                    let closed = std::mem::replace(&mut self.top, parent);
                    tracing::trace!(
                        closed = %closed.mode,
                        mode = %self.top.mode,
                        frames = self.len(),
                        "pop lexer mode"
                    );
                    // The closed frame was one datum of its parent.
                    event = FormEvent::Atom;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
