//! The grid capability object.
//!
//! A [`GridApi`] owns one grid instance's state store and event bus — there
//! is no global registry; each grid constructs an independent API/state
//! pair. All mutation flows through the operations here, and every operation
//! leaves the store fully consistent before any subscriber can observe it:
//! events are published only after the store borrow is released.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::columns::{Column, ColumnsState};
use crate::error::{ErrorSource, ErrorState, GridError};
use crate::events::{EventBus, EventChannel, GridEvent, SubscriptionId};
use crate::options::{GridOptions, GridOptionsUpdate};
use crate::rows::{PaginationModel, Row, RowId, RowsState, SortModel};
use crate::store::{GridStateStore, SelectionState};
use crate::types::{ElementSize, RenderContext, ScrollPosition};

struct ApiShared {
    state: RefCell<GridStateStore>,
    bus: EventBus,
}

/// A cheap, clonable handle to one grid instance.
///
/// Construction wires the event channels before any data is supplied, so a
/// subscriber registered immediately after `GridApi::new` observes every
/// event from the very first resolution pass onward.
#[derive(Clone)]
pub struct GridApi {
    shared: Rc<ApiShared>,
}

/// Non-owning handle for subscribers and coordinators; prevents reference
/// cycles through closures held by the bus.
#[derive(Clone)]
pub struct WeakGridApi {
    shared: Weak<ApiShared>,
}

impl WeakGridApi {
    pub fn upgrade(&self) -> Option<GridApi> {
        self.shared.upgrade().map(|shared| GridApi { shared })
    }
}

impl GridApi {
    pub fn new(mut options: GridOptions) -> Self {
        if options.page_size == 0 {
            gwarn!("page_size 0 is not meaningful, defaulting to 1");
            options.page_size = 1;
        }
        gdebug!(
            row_height = options.row_height,
            pagination = options.pagination,
            page_size = options.page_size,
            "GridApi::new"
        );
        Self {
            shared: Rc::new(ApiShared {
                state: RefCell::new(GridStateStore::new(options)),
                bus: EventBus::new(),
            }),
        }
    }

    pub fn downgrade(&self) -> WeakGridApi {
        WeakGridApi {
            shared: Rc::downgrade(&self.shared),
        }
    }

    // ---- event bus passthrough -------------------------------------------

    pub fn subscribe_event(
        &self,
        channel: EventChannel,
        handler: impl Fn(&GridEvent) + 'static,
    ) -> SubscriptionId {
        self.shared.bus.subscribe(channel, handler)
    }

    pub fn unsubscribe_event(&self, id: SubscriptionId) {
        self.shared.bus.unsubscribe(id);
    }

    /// Publishes an event, capturing subscriber panics into [`ErrorState`]
    /// and a follow-up `component-error` event instead of unwinding.
    pub fn publish_event(&self, event: GridEvent) {
        self.dispatch(&event);
    }

    fn dispatch(&self, event: &GridEvent) {
        let failures = self.shared.bus.publish(event);
        if failures.is_empty() {
            return;
        }
        if event.channel() == EventChannel::ComponentError {
            // A failing error subscriber must not recurse into more error
            // events.
            gwarn!(
                failures = failures.len(),
                "component-error subscriber failed, not re-reporting"
            );
            return;
        }
        for failure in failures {
            let state = ErrorState::dispatch(failure.message);
            self.shared.state.borrow_mut().error = Some(state.clone());
            self.dispatch(&GridEvent::ComponentError(state));
        }
    }

    // ---- data inputs ------------------------------------------------------

    /// Replaces the column definitions. Rejects duplicate fields with the
    /// prior state left unchanged.
    pub fn set_columns(&self, columns: Vec<Column>) -> Result<(), GridError> {
        {
            let mut st = self.shared.state.borrow_mut();
            let resolved = ColumnsState::resolve(columns, st.options.column_min_width)?;
            st.columns = resolved;
            st.reflow();
        }
        Ok(())
    }

    /// Replaces the raw row sequence and invalidates the resolved view.
    pub fn set_rows(&self, rows: Vec<Row>) {
        let mut st = self.shared.state.borrow_mut();
        st.raw_rows = rows;
        st.mark_rows_dirty();
        st.reflow();
    }

    /// Structurally merges a partial options update; fields absent from the
    /// update keep their current value.
    pub fn update_options(&self, update: GridOptionsUpdate) -> Result<(), GridError> {
        if update.page_size == Some(0) {
            return Err(GridError::ZeroPageSize);
        }
        let mut selection_event = None;
        {
            let mut st = self.shared.state.borrow_mut();
            let prev = st.options.clone();
            st.options = prev.merged(&update);

            if st.options.page_size != prev.page_size {
                // Infallible: zero was rejected above.
                let page_size = st.options.page_size;
                st.pagination.set_page_size(page_size)?;
                st.mark_page_dirty();
            }
            if st.options.pagination != prev.pagination {
                st.mark_page_dirty();
            }
            if !st.options.enable_multiple_selection && st.selection.len() > 1 {
                // Re-establish the single-selection invariant, keeping the
                // lowest id.
                let keep = st.selection.ids().into_iter().next();
                st.selection.replace(keep, false);
                selection_event = Some(GridEvent::SelectionChanged(st.selection.ids()));
            }
            st.reflow();
        }
        if let Some(event) = selection_event {
            self.dispatch(&event);
        }
        Ok(())
    }

    // ---- geometry ---------------------------------------------------------

    /// Records a new viewport size and recomputes the render context. The
    /// `resize` event is emitted by [`GridApi::resize`], which the
    /// `ResizeCoordinator` calls after its quiet window.
    pub fn set_viewport_size(&self, size: ElementSize) {
        let mut st = self.shared.state.borrow_mut();
        st.viewport = size;
        st.reflow();
    }

    /// Applies a scroll offset (clamped to the virtual content extent) and
    /// recomputes the render context.
    pub fn set_scroll_position(&self, position: ScrollPosition) {
        let mut st = self.shared.state.borrow_mut();
        st.scroll = position;
        st.reflow();
    }

    /// Forces a geometry re-measurement pass and publishes `resize`.
    ///
    /// Idempotent: with unchanged geometry the recomputed render context is
    /// value-equal to the previous one.
    pub fn resize(&self) {
        let viewport = {
            let mut st = self.shared.state.borrow_mut();
            st.reflow();
            st.viewport
        };
        gdebug!(
            width = viewport.width,
            height = viewport.height,
            "GridApi::resize"
        );
        self.dispatch(&GridEvent::Resize(viewport));
    }

    // ---- errors -----------------------------------------------------------

    /// Sets the error banner state and publishes `component-error`.
    ///
    /// `show_error(None)` clears only an error this operation previously set
    /// (source-tagged lineage) — it never clears errors captured from a
    /// failing subscriber.
    pub fn show_error(&self, message: Option<&str>) {
        match message {
            Some(message) => {
                let state = ErrorState::external(message);
                self.shared.state.borrow_mut().error = Some(state.clone());
                self.dispatch(&GridEvent::ComponentError(state));
            }
            None => {
                let mut st = self.shared.state.borrow_mut();
                if matches!(&st.error, Some(e) if e.source == ErrorSource::External) {
                    st.error = None;
                }
            }
        }
    }

    // ---- pagination -------------------------------------------------------

    /// Moves to `page`, clamping out-of-range input, and publishes
    /// `page-changed`.
    pub fn set_page(&self, page: usize) {
        let model = {
            let mut st = self.shared.state.borrow_mut();
            st.pagination.set_page(page);
            st.mark_page_dirty();
            st.reflow();
            st.pagination
        };
        self.dispatch(&GridEvent::PageChanged(model));
    }

    /// Changes the page size, recomputing the page count and re-clamping the
    /// current page. Also syncs `options.page_size` so a later partial
    /// options merge cannot resurrect a stale value.
    pub fn set_page_size(&self, page_size: usize) -> Result<(), GridError> {
        let model = {
            let mut st = self.shared.state.borrow_mut();
            st.pagination.set_page_size(page_size)?;
            st.options.page_size = page_size;
            st.mark_page_dirty();
            st.reflow();
            st.pagination
        };
        self.dispatch(&GridEvent::PageSizeChanged(page_size));
        self.dispatch(&GridEvent::PageChanged(model));
        Ok(())
    }

    // ---- sorting ----------------------------------------------------------

    /// Replaces the sort model (stable multi-key sort) and publishes
    /// `sort-model-changed`. Rejects references to unknown columns.
    pub fn set_sort_model(&self, model: SortModel) -> Result<(), GridError> {
        let model = {
            let mut st = self.shared.state.borrow_mut();
            for item in &model {
                if st.columns.column(&item.field).is_none() {
                    return Err(GridError::UnknownField(item.field.clone()));
                }
            }
            st.sort_model = model;
            st.mark_sort_dirty();
            st.reflow();
            st.sort_model.clone()
        };
        self.dispatch(&GridEvent::SortModelChanged(model));
        Ok(())
    }

    // ---- selection --------------------------------------------------------

    /// Replaces the selection. In single-selection mode only the first id is
    /// kept. Publishes `selection-changed`.
    pub fn set_selection(&self, ids: Vec<RowId>) {
        let ids = {
            let mut st = self.shared.state.borrow_mut();
            let multiple = st.options.enable_multiple_selection;
            st.selection.replace(ids, multiple);
            st.selection.ids()
        };
        self.dispatch(&GridEvent::SelectionChanged(ids));
    }

    /// Toggles one row id per the selection invariants and publishes
    /// `selection-changed`.
    pub fn toggle_row_selection(&self, id: RowId) {
        let ids = {
            let mut st = self.shared.state.borrow_mut();
            let multiple = st.options.enable_multiple_selection;
            st.selection.toggle(id, multiple);
            st.selection.ids()
        };
        self.dispatch(&GridEvent::SelectionChanged(ids));
    }

    // ---- columns ----------------------------------------------------------

    /// Applies a resize delta to one column, clamped to the configured
    /// minimum width, and publishes `column-resized`. Unknown fields and
    /// non-resizable columns are rejected with state unchanged.
    pub fn resize_column(&self, field: &str, delta: i64) -> Result<u32, GridError> {
        let width = {
            let mut st = self.shared.state.borrow_mut();
            let min_width = st.options.column_min_width;
            let width = st.columns.resize(field, delta, min_width)?;
            st.reflow();
            width
        };
        self.dispatch(&GridEvent::ColumnResized {
            field: field.to_owned(),
            width,
        });
        Ok(width)
    }

    pub fn set_column_hidden(&self, field: &str, hide: bool) -> Result<(), GridError> {
        let mut st = self.shared.state.borrow_mut();
        st.columns.set_hidden(field, hide)?;
        st.reflow();
        Ok(())
    }

    // ---- read-only snapshots ----------------------------------------------

    pub fn options(&self) -> GridOptions {
        self.shared.state.borrow().options.clone()
    }

    pub fn columns(&self) -> ColumnsState {
        self.shared.state.borrow().columns.clone()
    }

    /// The resolved row sequence for the current view (sorted, paged).
    pub fn rows(&self) -> RowsState {
        self.shared.state.borrow().rows_state().clone()
    }

    pub fn render_context(&self) -> RenderContext {
        self.shared.state.borrow().render_ctx.clone()
    }

    pub fn selection(&self) -> SelectionState {
        self.shared.state.borrow().selection.clone()
    }

    pub fn sort_model(&self) -> SortModel {
        self.shared.state.borrow().sort_model.clone()
    }

    pub fn pagination(&self) -> PaginationModel {
        self.shared.state.borrow().pagination
    }

    pub fn error_state(&self) -> Option<ErrorState> {
        self.shared.state.borrow().error.clone()
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        self.shared.state.borrow().scroll
    }

    pub fn viewport_size(&self) -> ElementSize {
        self.shared.state.borrow().viewport
    }

    /// Total rows in the raw dataset (pre-pagination), for footer labels.
    pub fn row_count(&self) -> usize {
        self.shared.state.borrow().raw_rows.len()
    }

    pub fn visible_column_count(&self) -> usize {
        self.shared.state.borrow().columns.visible_len()
    }

    #[cfg(test)]
    pub(crate) fn row_resolve_count(&self) -> u64 {
        self.shared.state.borrow().resolve_count
    }
}
