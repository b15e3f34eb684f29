//! A typed, synchronous publish/subscribe bus.
//!
//! This is the only sanctioned cross-feature communication path: feature
//! controllers observe user-intent channels and mutate shared state through
//! the API, never through each other. Dispatch is synchronous and honors
//! subscription order within a channel; no ordering is promised across
//! channels.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;

use crate::error::ErrorState;
use crate::rows::{PaginationModel, RowId, SortModel};
use crate::types::ElementSize;

/// Named event channels. Subscribing targets a channel; the payload arrives
/// as the full [`GridEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventChannel {
    ComponentError,
    Resize,
    SelectionChanged,
    SortModelChanged,
    PageChanged,
    PageSizeChanged,
    ColumnResized,
    // User-intent channels, published by the host UI and consumed by the
    // feature controllers.
    RowClick,
    HeaderClick,
    PageChangeRequested,
    PageSizeChangeRequested,
}

/// Event payloads are the corresponding state fragments.
#[derive(Clone, Debug, PartialEq)]
pub enum GridEvent {
    ComponentError(ErrorState),
    Resize(ElementSize),
    SelectionChanged(Vec<RowId>),
    SortModelChanged(SortModel),
    PageChanged(PaginationModel),
    PageSizeChanged(usize),
    ColumnResized { field: String, width: u32 },
    RowClick(RowId),
    HeaderClick(String),
    PageChangeRequested(usize),
    PageSizeChangeRequested(usize),
}

impl GridEvent {
    pub fn channel(&self) -> EventChannel {
        match self {
            Self::ComponentError(_) => EventChannel::ComponentError,
            Self::Resize(_) => EventChannel::Resize,
            Self::SelectionChanged(_) => EventChannel::SelectionChanged,
            Self::SortModelChanged(_) => EventChannel::SortModelChanged,
            Self::PageChanged(_) => EventChannel::PageChanged,
            Self::PageSizeChanged(_) => EventChannel::PageSizeChanged,
            Self::ColumnResized { .. } => EventChannel::ColumnResized,
            Self::RowClick(_) => EventChannel::RowClick,
            Self::HeaderClick(_) => EventChannel::HeaderClick,
            Self::PageChangeRequested(_) => EventChannel::PageChangeRequested,
            Self::PageSizeChangeRequested(_) => EventChannel::PageSizeChangeRequested,
        }
    }
}

type Handler = Rc<dyn Fn(&GridEvent)>;

/// Token returned by [`EventBus::subscribe`]; unsubscribing is idempotent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// A subscriber that panicked during dispatch. The bus never lets a failure
/// halt delivery to the remaining handlers on the channel.
#[derive(Clone, Debug)]
pub struct DispatchFailure {
    pub channel: EventChannel,
    pub message: String,
}

#[derive(Default)]
pub struct EventBus {
    channels: RefCell<HashMap<EventChannel, Vec<(SubscriptionId, Handler)>>>,
    next_id: Cell<u64>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        channel: EventChannel,
        handler: impl Fn(&GridEvent) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.channels
            .borrow_mut()
            .entry(channel)
            .or_default()
            .push((id, Rc::new(handler)));
        gtrace!(?channel, id = id.0, "EventBus::subscribe");
        id
    }

    /// Removes a subscription. Unknown or already-removed tokens are a no-op.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        for handlers in self.channels.borrow_mut().values_mut() {
            handlers.retain(|(sub, _)| *sub != id);
        }
    }

    /// Invokes every handler currently subscribed to the event's channel, in
    /// subscription order. The handler list is snapshotted first, so
    /// handlers may subscribe/unsubscribe re-entrantly without observing the
    /// in-flight event.
    ///
    /// A panicking handler is captured and reported in the returned list
    /// instead of unwinding through `publish`; remaining handlers still run.
    pub fn publish(&self, event: &GridEvent) -> Vec<DispatchFailure> {
        let channel = event.channel();
        let snapshot: Vec<Handler> = self
            .channels
            .borrow()
            .get(&channel)
            .map(|handlers| handlers.iter().map(|(_, h)| Rc::clone(h)).collect())
            .unwrap_or_default();

        let mut failures = Vec::new();
        for handler in snapshot {
            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| handler(event))) {
                let message = panic_message(payload.as_ref());
                gwarn!(?channel, %message, "subscriber panicked during dispatch");
                failures.push(DispatchFailure { channel, message });
            }
        }
        failures
    }

    pub fn subscriber_count(&self, channel: EventChannel) -> usize {
        self.channels
            .borrow()
            .get(&channel)
            .map_or(0, |handlers| handlers.len())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "subscriber panicked".to_owned()
    }
}
