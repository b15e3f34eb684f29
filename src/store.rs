//! The single shared mutable resource: every piece of grid-wide state lives
//! here, and every mutation flows through the API layer. Derived values
//! (resolved rows, render context) are recomputed from explicit generation
//! counters rather than implicit dependency tracking.

use std::collections::BTreeSet;

use crate::columns::ColumnsState;
use crate::error::ErrorState;
use crate::options::GridOptions;
use crate::render;
use crate::rows::{PaginationModel, Row, RowId, RowsState, SortModel, resolve_rows};
use crate::types::{ElementSize, RenderContext, ScrollPosition};

/// Monotonic version counter for one derived-value input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Generation(u64);

impl Generation {
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// The set of selected row ids.
///
/// With multiple selection disabled the set never holds more than one id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionState {
    selected: BTreeSet<RowId>,
}

impl SelectionState {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<RowId> {
        self.selected.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Toggles `id`: removes it when selected, adds it otherwise. In
    /// single-selection mode adding clears the rest first. Returns whether
    /// the id is selected afterwards.
    pub(crate) fn toggle(&mut self, id: RowId, multiple: bool) -> bool {
        if self.selected.remove(&id) {
            return false;
        }
        if !multiple {
            self.selected.clear();
        }
        self.selected.insert(id);
        true
    }

    pub(crate) fn replace(&mut self, ids: impl IntoIterator<Item = RowId>, multiple: bool) {
        self.selected.clear();
        for id in ids {
            self.selected.insert(id);
            if !multiple {
                break;
            }
        }
    }
}

/// Inputs the resolved row sequence was last computed from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct RowsResolvedFor {
    rows: Generation,
    sort: Generation,
    page: Generation,
}

pub(crate) struct GridStateStore {
    pub(crate) options: GridOptions,
    pub(crate) columns: ColumnsState,
    pub(crate) raw_rows: Vec<Row>,
    pub(crate) sort_model: SortModel,
    pub(crate) pagination: PaginationModel,
    pub(crate) selection: SelectionState,
    pub(crate) error: Option<ErrorState>,
    pub(crate) viewport: ElementSize,
    pub(crate) scroll: ScrollPosition,

    rows_state: RowsState,
    rows_gen: Generation,
    sort_gen: Generation,
    page_gen: Generation,
    resolved_for: Option<RowsResolvedFor>,
    // Number of times the row resolution actually ran; memoization tests
    // assert on it.
    pub(crate) resolve_count: u64,

    pub(crate) render_ctx: RenderContext,
}

impl GridStateStore {
    pub(crate) fn new(options: GridOptions) -> Self {
        let pagination = PaginationModel::new(options.page_size);
        Self {
            options,
            columns: ColumnsState::default(),
            raw_rows: Vec::new(),
            sort_model: SortModel::new(),
            pagination,
            selection: SelectionState::default(),
            error: None,
            viewport: ElementSize::default(),
            scroll: ScrollPosition::default(),
            rows_state: RowsState::default(),
            rows_gen: Generation::default(),
            sort_gen: Generation::default(),
            page_gen: Generation::default(),
            resolved_for: None,
            resolve_count: 0,
            render_ctx: RenderContext::default(),
        }
    }

    pub(crate) fn rows_state(&self) -> &RowsState {
        &self.rows_state
    }

    pub(crate) fn mark_rows_dirty(&mut self) {
        self.rows_gen.bump();
    }

    pub(crate) fn mark_sort_dirty(&mut self) {
        self.sort_gen.bump();
    }

    pub(crate) fn mark_page_dirty(&mut self) {
        self.page_gen.bump();
    }

    /// Re-derives everything downstream of the raw inputs: pagination
    /// bookkeeping, the resolved row sequence (only when a relevant
    /// generation moved), and a fresh render context.
    pub(crate) fn reflow(&mut self) {
        let prev_page = self.pagination.page;
        self.pagination.set_row_count(self.raw_rows.len());
        if self.pagination.page != prev_page {
            self.page_gen.bump();
        }

        let wanted = RowsResolvedFor {
            rows: self.rows_gen,
            sort: self.sort_gen,
            page: self.page_gen,
        };
        if self.resolved_for != Some(wanted) {
            let pagination = self.options.pagination.then_some(&self.pagination);
            self.rows_state = resolve_rows(&self.raw_rows, &self.sort_model, pagination);
            self.resolved_for = Some(wanted);
            self.resolve_count += 1;
        }

        // Scroll offsets can fall out of range when content shrinks.
        let max = render::max_scroll_position(
            &self.options,
            &self.columns,
            &self.rows_state,
            self.viewport,
        );
        self.scroll.left = self.scroll.left.min(max.left);
        self.scroll.top = self.scroll.top.min(max.top);

        self.render_ctx = render::compute_render_context(
            &self.options,
            &self.columns,
            &self.rows_state,
            self.pagination.page,
            self.viewport,
            self.scroll,
        );
    }
}
