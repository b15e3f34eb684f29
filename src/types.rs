/// Pixel size of the scrollable data viewport (excludes the header band).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementSize {
    pub width: u32,
    pub height: u32,
}

impl ElementSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Current scroll offsets of the data viewport, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollPosition {
    pub left: u64,
    pub top: u64,
}

impl ScrollPosition {
    pub fn new(left: u64, top: u64) -> Self {
        Self { left, top }
    }
}

/// A half-open index range (`start..end`) into a resolved row or column
/// sequence. The empty range is the "nothing to materialize" sentinel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl IndexRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// First index in the range, or `None` when empty.
    pub fn first(&self) -> Option<usize> {
        (!self.is_empty()).then_some(self.start)
    }

    /// Last (inclusive) index in the range, or `None` when empty.
    pub fn last(&self) -> Option<usize> {
        (!self.is_empty()).then(|| self.end - 1)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    pub fn iter(&self) -> core::ops::Range<usize> {
        self.start..self.end
    }
}

/// Full virtual extent of the data container, independent of what is
/// materialized. Scrollbar sizing and auto-height need the true extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerSizes {
    pub width: u64,
    pub height: u64,
}

/// The computed render window: which row/column indices must be
/// materialized for the current scroll position and viewport.
///
/// A `RenderContext` is recomputed wholesale on every geometry, scroll, or
/// data change — it is never patched field-by-field — so downstream
/// consumers can memoize on value equality.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderContext {
    /// Current pagination page (0 when pagination is disabled).
    pub page: usize,
    /// Row indices (into the resolved `RowsState`) to materialize.
    pub rows: IndexRange,
    /// Visible-column indices (into `ColumnsState::visible`) to materialize.
    pub cols: IndexRange,
    /// Whether the total visible column width exceeds the viewport width.
    pub has_scroll_x: bool,
    pub data_container_sizes: ContainerSizes,
}

impl RenderContext {
    pub fn first_row_idx(&self) -> Option<usize> {
        self.rows.first()
    }

    pub fn last_row_idx(&self) -> Option<usize> {
        self.rows.last()
    }

    pub fn first_col_idx(&self) -> Option<usize> {
        self.cols.first()
    }

    pub fn last_col_idx(&self) -> Option<usize> {
        self.cols.last()
    }
}
