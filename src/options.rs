/// Advisory verbosity hint carried with the options record.
///
/// The engine itself logs through `tracing`; this field lets hosts that
/// configure their subscriber per grid instance honor the option the way the
/// original surface exposed it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LogLevel {
    Off,
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

/// Configuration for a grid instance.
///
/// Created once at construction from defaults plus host overrides, then
/// re-merged with [`GridOptionsUpdate`] values: fields absent from an update
/// keep their prior value (structural merge, never replace).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    /// Uniform row height in pixels.
    pub row_height: u32,
    /// Header band height in pixels.
    pub header_height: u32,
    /// Whether row pagination is enabled.
    pub pagination: bool,
    pub page_size: usize,
    pub rows_per_page_options: Vec<usize>,
    /// When set, the consumer sizes the grid to its content instead of a
    /// fixed viewport.
    pub auto_height: bool,
    pub enable_multiple_selection: bool,
    pub checkbox_selection: bool,
    pub hide_footer_pagination: bool,
    /// Extra rows/columns materialized beyond the visible edge to reduce
    /// flicker during fast scrolling.
    pub overscan: usize,
    /// Lower bound applied to column widths on resolution and resize.
    pub column_min_width: u32,
    /// Quiet window for the resize debounce, in milliseconds.
    pub resize_debounce_ms: u64,
    pub log_level: LogLevel,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: 52,
            header_height: 56,
            pagination: false,
            page_size: 100,
            rows_per_page_options: vec![25, 50, 100],
            auto_height: false,
            enable_multiple_selection: true,
            checkbox_selection: false,
            hide_footer_pagination: false,
            overscan: 2,
            column_min_width: 50,
            resize_debounce_ms: 100,
            log_level: LogLevel::default(),
        }
    }
}

impl GridOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_header_height(mut self, header_height: u32) -> Self {
        self.header_height = header_height;
        self
    }

    pub fn with_pagination(mut self, pagination: bool) -> Self {
        self.pagination = pagination;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_rows_per_page_options(mut self, rows_per_page_options: Vec<usize>) -> Self {
        self.rows_per_page_options = rows_per_page_options;
        self
    }

    pub fn with_auto_height(mut self, auto_height: bool) -> Self {
        self.auto_height = auto_height;
        self
    }

    pub fn with_enable_multiple_selection(mut self, enable: bool) -> Self {
        self.enable_multiple_selection = enable;
        self
    }

    pub fn with_checkbox_selection(mut self, checkbox_selection: bool) -> Self {
        self.checkbox_selection = checkbox_selection;
        self
    }

    pub fn with_hide_footer_pagination(mut self, hide: bool) -> Self {
        self.hide_footer_pagination = hide;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_column_min_width(mut self, column_min_width: u32) -> Self {
        self.column_min_width = column_min_width;
        self
    }

    pub fn with_resize_debounce_ms(mut self, resize_debounce_ms: u64) -> Self {
        self.resize_debounce_ms = resize_debounce_ms;
        self
    }

    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = log_level;
        self
    }

    /// Returns a copy of `self` with every field present in `update`
    /// overwritten and every absent field preserved.
    pub fn merged(&self, update: &GridOptionsUpdate) -> Self {
        let mut next = self.clone();
        if let Some(v) = update.row_height {
            next.row_height = v;
        }
        if let Some(v) = update.header_height {
            next.header_height = v;
        }
        if let Some(v) = update.pagination {
            next.pagination = v;
        }
        if let Some(v) = update.page_size {
            next.page_size = v;
        }
        if let Some(v) = &update.rows_per_page_options {
            next.rows_per_page_options = v.clone();
        }
        if let Some(v) = update.auto_height {
            next.auto_height = v;
        }
        if let Some(v) = update.enable_multiple_selection {
            next.enable_multiple_selection = v;
        }
        if let Some(v) = update.checkbox_selection {
            next.checkbox_selection = v;
        }
        if let Some(v) = update.hide_footer_pagination {
            next.hide_footer_pagination = v;
        }
        if let Some(v) = update.overscan {
            next.overscan = v;
        }
        if let Some(v) = update.column_min_width {
            next.column_min_width = v;
        }
        if let Some(v) = update.resize_debounce_ms {
            next.resize_debounce_ms = v;
        }
        if let Some(v) = update.log_level {
            next.log_level = v;
        }
        next
    }
}

/// A partial options record. `None` fields are left untouched by the merge.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptionsUpdate {
    pub row_height: Option<u32>,
    pub header_height: Option<u32>,
    pub pagination: Option<bool>,
    pub page_size: Option<usize>,
    pub rows_per_page_options: Option<Vec<usize>>,
    pub auto_height: Option<bool>,
    pub enable_multiple_selection: Option<bool>,
    pub checkbox_selection: Option<bool>,
    pub hide_footer_pagination: Option<bool>,
    pub overscan: Option<usize>,
    pub column_min_width: Option<u32>,
    pub resize_debounce_ms: Option<u64>,
    pub log_level: Option<LogLevel>,
}

impl GridOptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
