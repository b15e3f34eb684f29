use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::error::GridError;

/// Unique row identity, stable across sorting and paging.
pub type RowId = u64;

/// A typed cell value with a total ordering, so the multi-key sort is
/// well-defined for mixed and missing data. Nulls sort first; floats use
/// `total_cmp`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    fn rank(&self) -> u8 {
        match self {
            Self::Null => 0,
            Self::Bool(_) => 1,
            Self::Int(_) | Self::Float(_) => 2,
            Self::Text(_) => 3,
        }
    }

    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Int(a), Self::Int(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.total_cmp(b),
            (Self::Int(a), Self::Float(b)) => (*a as f64).total_cmp(b),
            (Self::Float(a), Self::Int(b)) => a.total_cmp(&(*b as f64)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// An opaque data row keyed by a unique id. The raw row sequence supplied by
/// the host is immutable per update cycle; sorting and paging operate on
/// resolved copies.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    id: RowId,
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new(id: RowId) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, field: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(field.into(), value.into());
        self
    }

    pub fn id(&self) -> RowId {
        self.id
    }

    /// Cell for `field`; missing cells read as [`CellValue::Null`].
    pub fn cell(&self, field: &str) -> &CellValue {
        self.cells.get(field).unwrap_or(&CellValue::Null)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    Asc,
    Desc,
}

/// One sort key. The full model is an ordered multi-key sequence; an empty
/// model means natural (input) order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortItem {
    pub field: String,
    pub direction: SortDirection,
}

impl SortItem {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

pub type SortModel = Vec<SortItem>;

/// Pagination bookkeeping.
///
/// Invariants: `page_size > 0`, `page_count = ceil(row_count / page_size)`,
/// and `page` stays clamped to `[0, page_count - 1]` across every mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaginationModel {
    pub page: usize,
    pub page_size: usize,
    pub page_count: usize,
    pub row_count: usize,
}

impl PaginationModel {
    pub fn new(page_size: usize) -> Self {
        let mut model = Self {
            page: 0,
            page_size: page_size.max(1),
            page_count: 0,
            row_count: 0,
        };
        model.reclamp();
        model
    }

    pub fn set_row_count(&mut self, row_count: usize) {
        self.row_count = row_count;
        self.reclamp();
    }

    /// Clamps out-of-range input instead of rejecting it.
    pub fn set_page(&mut self, page: usize) {
        self.page = page;
        self.reclamp();
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if page_size == 0 {
            return Err(GridError::ZeroPageSize);
        }
        self.page_size = page_size;
        self.reclamp();
        Ok(())
    }

    fn reclamp(&mut self) {
        self.page_count = self.row_count.div_ceil(self.page_size);
        self.page = self.page.min(self.page_count.saturating_sub(1));
    }
}

/// The resolved row sequence for the current view: raw rows after the sort
/// model and (when enabled) the pagination slice are applied.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowsState {
    rows: Vec<Row>,
}

impl RowsState {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }
}

/// Resolves the display row sequence: a stable multi-key sort over the full
/// raw sequence, then the current page slice when `pagination` is supplied.
pub fn resolve_rows(
    raw: &[Row],
    sort_model: &SortModel,
    pagination: Option<&PaginationModel>,
) -> RowsState {
    let mut rows: Vec<Row> = raw.to_vec();

    if !sort_model.is_empty() {
        // Vec::sort_by is stable, so equal keys keep their input order.
        rows.sort_by(|a, b| compare_rows(a, b, sort_model));
    }

    if let Some(p) = pagination {
        let start = p.page.saturating_mul(p.page_size).min(rows.len());
        let end = start.saturating_add(p.page_size).min(rows.len());
        rows = rows[start..end].to_vec();
    }

    gtrace!(
        raw = raw.len(),
        resolved = rows.len(),
        sorted = !sort_model.is_empty(),
        paged = pagination.is_some(),
        "resolve_rows"
    );
    RowsState { rows }
}

fn compare_rows(a: &Row, b: &Row, sort_model: &SortModel) -> Ordering {
    for item in sort_model {
        let ord = a.cell(&item.field).total_cmp(b.cell(&item.field));
        let ord = match item.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}
