//! Debounced container-resize handling.
//!
//! The coordinator is tick-driven: the host forwards size observations with
//! a logical `now_ms` clock and calls [`ResizeCoordinator::tick`] on its
//! timer/frame cadence. Only after a quiet window with no further size
//! change does the coordinator push the last-observed size into the API and
//! invoke `resize()` (trailing-edge semantics). Closing the coordinator
//! cancels any pending invocation, so no deferred resize fires into a
//! torn-down grid.

use crate::api::{GridApi, WeakGridApi};
use crate::types::ElementSize;

#[derive(Clone, Copy, Debug)]
struct PendingResize {
    size: ElementSize,
    last_observed_ms: u64,
}

pub struct ResizeCoordinator {
    api: WeakGridApi,
    debounce_ms: u64,
    pending: Option<PendingResize>,
    closed: bool,
}

impl ResizeCoordinator {
    /// Creates a coordinator using the grid's configured debounce window.
    pub fn new(api: &GridApi) -> Self {
        let debounce_ms = api.options().resize_debounce_ms;
        Self::with_debounce(api, debounce_ms)
    }

    pub fn with_debounce(api: &GridApi, debounce_ms: u64) -> Self {
        Self {
            api: api.downgrade(),
            debounce_ms,
            pending: None,
            closed: false,
        }
    }

    /// Records a size observation. Each observation restarts the quiet
    /// window; the last size seen within it is the one acted upon.
    pub fn observe(&mut self, size: ElementSize, now_ms: u64) {
        if self.closed {
            return;
        }
        gtrace!(
            width = size.width,
            height = size.height,
            now_ms,
            "ResizeCoordinator::observe"
        );
        self.pending = Some(PendingResize {
            size,
            last_observed_ms: now_ms,
        });
    }

    /// Advances the coordinator. Returns `true` when the debounced resize
    /// fired on this tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.closed {
            return false;
        }
        let Some(pending) = self.pending else {
            return false;
        };
        if now_ms.saturating_sub(pending.last_observed_ms) < self.debounce_ms {
            return false;
        }
        self.pending = None;
        let Some(api) = self.api.upgrade() else {
            return false;
        };
        gdebug!(
            width = pending.size.width,
            height = pending.size.height,
            "debounced resize"
        );
        api.set_viewport_size(pending.size);
        api.resize();
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Cancels any pending invocation and ignores further observations.
    /// Idempotent; also invoked on drop.
    pub fn close(&mut self) {
        self.pending = None;
        self.closed = true;
    }
}

impl Drop for ResizeCoordinator {
    fn drop(&mut self) {
        self.close();
    }
}
