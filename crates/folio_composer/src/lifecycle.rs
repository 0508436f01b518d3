//! Modal open/close state machine.
//!
//! ```text
//! Closed --open--> Opening --finish_opening--> Open --close--> Closing --finish_closing--> Closed
//! ```
//!
//! Side effects tied to the modal being on screen (body scroll lock, focus trap)
//! run from [`ModalHooks`]: `on_enter` when leaving `Closed`, `on_exit` when
//! returning to it. Each pair fires exactly once per open.

use std::sync::Arc;
use tracing::debug;

/// Where the modal is in its open/close cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum ModalState {
    /// Not shown
    #[default]
    #[display("closed")]
    Closed,
    /// Enter transition running
    #[display("opening")]
    Opening,
    /// Interactive
    #[display("open")]
    Open,
    /// Exit transition running
    #[display("closing")]
    Closing,
}

/// Host side effects bracketing an open modal.
pub trait ModalHooks: Send + Sync {
    /// The modal is about to appear.
    fn on_enter(&self) {}

    /// The modal has gone away.
    fn on_exit(&self) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ModalHooks for NoopHooks {}

/// Tracks [`ModalState`] and fires the hooks on entry and exit.
pub struct ModalLifecycle {
    state: ModalState,
    hooks: Arc<dyn ModalHooks>,
}

impl std::fmt::Debug for ModalLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalLifecycle")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Default for ModalLifecycle {
    fn default() -> Self {
        Self::new(Arc::new(NoopHooks))
    }
}

impl ModalLifecycle {
    /// Closed lifecycle with the given hooks.
    pub fn new(hooks: Arc<dyn ModalHooks>) -> Self {
        Self {
            state: ModalState::Closed,
            hooks,
        }
    }

    /// Current state.
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Whether the modal accepts input.
    pub fn is_open(&self) -> bool {
        self.state == ModalState::Open
    }

    /// Begin opening. Only valid from `Closed`.
    pub fn open(&mut self) -> bool {
        if self.state != ModalState::Closed {
            return false;
        }
        self.hooks.on_enter();
        self.transition(ModalState::Opening);
        true
    }

    /// Enter transition finished.
    pub fn finish_opening(&mut self) -> bool {
        if self.state != ModalState::Opening {
            return false;
        }
        self.transition(ModalState::Open);
        true
    }

    /// Begin closing. Valid while opening or open.
    pub fn close(&mut self) -> bool {
        if !matches!(self.state, ModalState::Opening | ModalState::Open) {
            return false;
        }
        self.transition(ModalState::Closing);
        true
    }

    /// Exit transition finished.
    pub fn finish_closing(&mut self) -> bool {
        if self.state != ModalState::Closing {
            return false;
        }
        self.transition(ModalState::Closed);
        self.hooks.on_exit();
        true
    }

    fn transition(&mut self, next: ModalState) {
        debug!(from = %self.state, to = %next, "Modal transition");
        self.state = next;
    }
}
