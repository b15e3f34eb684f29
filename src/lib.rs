//! A headless data grid state engine.
//!
//! This crate is the state-and-rendering-window core behind an interactive
//! tabular grid: given a full logical dataset (ordered rows, ordered/visible
//! columns), a viewport size, and a scroll position, it computes exactly
//! which row and column indices must be materialized, and keeps that
//! computation consistent as columns resize, rows sort, pages change, and
//! the container itself resizes.
//!
//! It is UI-agnostic. A GUI/TUI layer is expected to provide:
//! - viewport size and scroll offsets
//! - raw rows, column definitions, and options
//! - user-intent events (row clicks, header clicks, page requests)
//!
//! and to paint only the subset described by the computed [`RenderContext`].
//!
//! Cross-feature communication goes through a typed [`EventBus`] behind the
//! [`GridApi`] capability object; selection, sorting, and pagination are
//! independent controllers that can be composed or omitted per instance.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod api;
mod columns;
mod controllers;
mod error;
mod events;
mod options;
mod render;
mod resize;
mod rows;
mod store;
mod types;


pub use api::{GridApi, WeakGridApi};
pub use columns::{Column, ColumnsState};
pub use controllers::{PaginationController, SelectionController, SortController};
pub use error::{ErrorSource, ErrorState, GridError};
pub use events::{DispatchFailure, EventBus, EventChannel, GridEvent, SubscriptionId};
pub use options::{GridOptions, GridOptionsUpdate, LogLevel};
pub use render::{compute_render_context, max_scroll_position};
pub use resize::ResizeCoordinator;
pub use rows::{
    CellValue, PaginationModel, Row, RowId, RowsState, SortDirection, SortItem, SortModel,
    resolve_rows,
};
pub use store::SelectionState;
pub use types::{ContainerSizes, ElementSize, IndexRange, RenderContext, ScrollPosition};
