//! The virtualization core: maps scroll offset + viewport size + resolved
//! row/column geometry into the minimal index ranges to materialize.
//!
//! Recomputation is pull-based and wholesale: every scroll, geometry, or
//! data change produces a fresh [`RenderContext`] value. The computation is
//! cheap by construction — O(1) for rows (uniform height) and O(log n) for
//! columns (prefix-sum binary search) — so no incremental patching is ever
//! needed.

use crate::columns::ColumnsState;
use crate::options::GridOptions;
use crate::rows::RowsState;
use crate::types::{ContainerSizes, ElementSize, IndexRange, RenderContext, ScrollPosition};

/// Rows of vertical space reserved for the empty-state overlay when the
/// resolved row set is empty.
const EMPTY_STATE_ROW_SPACES: u64 = 2;

pub fn compute_render_context(
    options: &GridOptions,
    columns: &ColumnsState,
    rows: &RowsState,
    page: usize,
    viewport: ElementSize,
    scroll: ScrollPosition,
) -> RenderContext {
    let row_height = options.row_height.max(1) as u64;
    let total_width = columns.total_width();
    let row_count = rows.len();

    let virtual_height = if row_count == 0 {
        row_height * EMPTY_STATE_ROW_SPACES
    } else {
        row_count as u64 * row_height
    };

    let ctx = RenderContext {
        page,
        rows: row_window(scroll.top, viewport.height, row_height, row_count, options.overscan),
        cols: col_window(columns, scroll.left, viewport.width, options.overscan),
        has_scroll_x: total_width > viewport.width as u64,
        data_container_sizes: ContainerSizes {
            width: total_width,
            height: virtual_height,
        },
    };
    gtrace!(
        page = ctx.page,
        rows_start = ctx.rows.start,
        rows_end = ctx.rows.end,
        cols_start = ctx.cols.start,
        cols_end = ctx.cols.end,
        has_scroll_x = ctx.has_scroll_x,
        "compute_render_context"
    );
    ctx
}

/// Vertical window over uniform-height rows, widened by `overscan` on both
/// edges and clamped to the resolved row count.
fn row_window(
    scroll_top: u64,
    viewport_height: u32,
    row_height: u64,
    row_count: usize,
    overscan: usize,
) -> IndexRange {
    if row_count == 0 || viewport_height == 0 {
        return IndexRange::EMPTY;
    }

    let max_top = (row_count as u64 * row_height).saturating_sub(viewport_height as u64);
    let top = scroll_top.min(max_top);
    let bottom = top.saturating_add(viewport_height as u64);

    let first = (top / row_height) as usize;
    let last_exclusive = (bottom.div_ceil(row_height) as usize).min(row_count);

    IndexRange {
        start: first.saturating_sub(overscan),
        end: last_exclusive.saturating_add(overscan).min(row_count),
    }
}

/// Horizontal window: the visible columns covering
/// `[scroll_left, scroll_left + viewport_width)`, widened by `overscan`.
fn col_window(
    columns: &ColumnsState,
    scroll_left: u64,
    viewport_width: u32,
    overscan: usize,
) -> IndexRange {
    let count = columns.visible_len();
    let total_width = columns.total_width();
    if count == 0 || viewport_width == 0 || total_width == 0 {
        return IndexRange::EMPTY;
    }

    let max_left = total_width.saturating_sub(viewport_width as u64);
    let left = scroll_left.min(max_left);
    let right_inclusive = left
        .saturating_add(viewport_width as u64)
        .saturating_sub(1)
        .min(total_width - 1);

    let first = columns.column_at_offset(left).unwrap_or(0);
    let last = columns.column_at_offset(right_inclusive).unwrap_or(count - 1);

    IndexRange {
        start: first.saturating_sub(overscan),
        end: (last + 1).saturating_add(overscan).min(count),
    }
}

/// Largest meaningful scroll offsets for the current content extent. Scroll
/// input beyond these is clamped before recomputation.
pub fn max_scroll_position(
    options: &GridOptions,
    columns: &ColumnsState,
    rows: &RowsState,
    viewport: ElementSize,
) -> ScrollPosition {
    let row_height = options.row_height.max(1) as u64;
    let height = rows.len() as u64 * row_height;
    ScrollPosition {
        left: columns.total_width().saturating_sub(viewport.width as u64),
        top: height.saturating_sub(viewport.height as u64),
    }
}
