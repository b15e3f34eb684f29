use crate::error::GridError;

/// A raw column definition, as supplied by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Unique key into each row's cells.
    pub field: String,
    pub header_name: Option<String>,
    /// Width in pixels. Clamped to the configured minimum on resolution.
    pub width: u32,
    pub hide: bool,
    pub sortable: bool,
    pub resizable: bool,
}

impl Column {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: None,
            width: 100,
            hide: false,
            sortable: true,
            resizable: true,
        }
    }

    pub fn with_header_name(mut self, header_name: impl Into<String>) -> Self {
        self.header_name = Some(header_name.into());
        self
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hide = true;
        self
    }

    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

/// The resolved column partition: the full ordered definition list plus the
/// visible projection with cached width prefix sums.
///
/// `visible` is always an order-preserving filtered view of `all`; the
/// prefix sums make `x offset → visible column index` a binary search, which
/// keeps render-window recomputation cheap even with many columns.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnsState {
    all: Vec<Column>,
    visible: Vec<usize>,
    // offsets[i] is the left edge of visible column i; offsets[len] is the
    // total visible width.
    offsets: Vec<u64>,
}

impl ColumnsState {
    /// Resolves raw definitions, rejecting duplicate fields and clamping
    /// widths to `min_width`.
    pub fn resolve(mut columns: Vec<Column>, min_width: u32) -> Result<Self, GridError> {
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.field == col.field) {
                return Err(GridError::DuplicateField(col.field.clone()));
            }
        }
        for col in &mut columns {
            col.width = col.width.max(min_width);
        }
        let mut state = Self {
            all: columns,
            visible: Vec::new(),
            offsets: Vec::new(),
        };
        state.rebuild_projection();
        gdebug!(
            all = state.all.len(),
            visible = state.visible.len(),
            total_width = state.total_width(),
            "ColumnsState::resolve"
        );
        Ok(state)
    }

    pub fn all(&self) -> &[Column] {
        &self.all
    }

    pub fn column(&self, field: &str) -> Option<&Column> {
        self.all.iter().find(|c| c.field == field)
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    pub fn visible(&self) -> impl Iterator<Item = &Column> {
        self.visible.iter().map(|&i| &self.all[i])
    }

    /// The visible column at visible-index `idx` (indices match the render
    /// context's column window).
    pub fn visible_column(&self, idx: usize) -> Option<&Column> {
        self.visible.get(idx).map(|&i| &self.all[i])
    }

    /// Left pixel edge of visible column `idx`.
    pub fn offset_of(&self, idx: usize) -> Option<u64> {
        (idx < self.visible.len()).then(|| self.offsets[idx])
    }

    /// Sum of all visible column widths.
    pub fn total_width(&self) -> u64 {
        self.offsets.last().copied().unwrap_or(0)
    }

    /// Maps an x offset to the visible column covering it, or `None` when
    /// the offset lies past the total visible width.
    pub fn column_at_offset(&self, x: u64) -> Option<usize> {
        if x >= self.total_width() {
            return None;
        }
        // First offset strictly greater than x, minus one, is the covering
        // column. Zero-width columns are skipped by the strict comparison.
        let idx = self.offsets.partition_point(|&edge| edge <= x);
        Some(idx.saturating_sub(1).min(self.visible.len() - 1))
    }

    /// Applies a user resize delta to one column, clamping the result to
    /// `min_width`. Returns the new width.
    pub fn resize(&mut self, field: &str, delta: i64, min_width: u32) -> Result<u32, GridError> {
        let idx = self
            .index_of(field)
            .ok_or_else(|| GridError::UnknownField(field.to_owned()))?;
        if !self.all[idx].resizable {
            return Err(GridError::ColumnNotResizable(field.to_owned()));
        }
        let current = self.all[idx].width as i64;
        let next = current.saturating_add(delta).max(min_width as i64) as u32;
        if next != self.all[idx].width {
            self.all[idx].width = next;
            self.rebuild_projection();
        }
        gtrace!(field, delta, width = next, "ColumnsState::resize");
        Ok(next)
    }

    pub fn set_hidden(&mut self, field: &str, hide: bool) -> Result<(), GridError> {
        let idx = self
            .index_of(field)
            .ok_or_else(|| GridError::UnknownField(field.to_owned()))?;
        if self.all[idx].hide != hide {
            self.all[idx].hide = hide;
            self.rebuild_projection();
        }
        Ok(())
    }

    fn index_of(&self, field: &str) -> Option<usize> {
        self.all.iter().position(|c| c.field == field)
    }

    fn rebuild_projection(&mut self) {
        self.visible.clear();
        self.offsets.clear();
        let mut edge = 0u64;
        self.offsets.push(0);
        for (i, col) in self.all.iter().enumerate() {
            if col.hide {
                continue;
            }
            self.visible.push(i);
            edge = edge.saturating_add(col.width as u64);
            self.offsets.push(edge);
        }
    }
}
