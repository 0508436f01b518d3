//! Swipe-to-reveal delete affordance on the attachment row.
//!
//! The row has two detents: closed (offset 0) and open (offset `reveal_width`).
//! While dragging, the offset follows the finger within `[0, reveal_width]`;
//! releasing snaps to whichever detent the offset is past `open_threshold` toward.

use crate::GestureConfig;
use tracing::debug;

/// Converts pointer deltas into a reveal offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GestureInterpreter {
    config: GestureConfig,
    reveal_offset: u32,
    drag_start_x: Option<i32>,
}

impl GestureInterpreter {
    /// Create an interpreter with the given detents.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            reveal_offset: 0,
            drag_start_x: None,
        }
    }

    /// Current reveal offset in pixels.
    pub fn reveal_offset(&self) -> u32 {
        self.reveal_offset
    }

    /// Whether the delete button is fully exposed.
    pub fn is_open(&self) -> bool {
        self.reveal_offset == self.config.reveal_width
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag_start_x.is_some()
    }

    /// Record where the drag began.
    pub fn drag_start(&mut self, x: i32) {
        self.drag_start_x = Some(x);
    }

    /// Follow the pointer. Ignored when no drag is in progress.
    pub fn drag_move(&mut self, x: i32) -> u32 {
        let Some(start) = self.drag_start_x else {
            return self.reveal_offset;
        };
        let width = i64::from(self.config.reveal_width);
        let delta = i64::from(start) - i64::from(x);

        if delta > 0 {
            self.reveal_offset = delta.min(width) as u32;
        } else if self.reveal_offset > 0 && delta < 0 {
            self.reveal_offset = (width + delta).max(0) as u32;
        }
        self.reveal_offset
    }

    /// Snap to the nearest detent.
    pub fn drag_end(&mut self) -> u32 {
        self.drag_start_x = None;
        self.reveal_offset = if self.reveal_offset > self.config.open_threshold {
            self.config.reveal_width
        } else {
            0
        };
        debug!(offset = self.reveal_offset, "Attachment row settled");
        self.reveal_offset
    }

    /// Consume a tap on the delete button.
    ///
    /// Returns true and closes the row when the button was fully exposed; the
    /// caller performs the removal. Returns false otherwise.
    pub fn tap_delete(&mut self) -> bool {
        if !self.is_open() || self.config.reveal_width == 0 {
            return false;
        }
        self.reveal_offset = 0;
        true
    }

    /// A tap anywhere else closes the row.
    pub fn tap_outside(&mut self) {
        if self.reveal_offset > 0 {
            debug!("Dismissing revealed delete button");
        }
        self.reset();
    }

    /// Return to the closed detent and forget any drag.
    pub fn reset(&mut self) {
        self.reveal_offset = 0;
        self.drag_start_x = None;
    }
}
