//! Independent feature controllers.
//!
//! Each controller subscribes only to the user-intent channels relevant to
//! it and drives shared state through [`GridApi`] operations. Controllers
//! never reference each other and never touch another feature's state, so
//! any of them can be composed or omitted per grid instance. Handlers hold
//! weak API handles; a controller outliving its grid degrades to a no-op.

use crate::api::{GridApi, WeakGridApi};
use crate::events::{EventChannel, GridEvent, SubscriptionId};
use crate::rows::{SortDirection, SortItem, SortModel};

/// Toggles row selection on `row-click` intents.
pub struct SelectionController {
    api: WeakGridApi,
    sub: Option<SubscriptionId>,
}

impl SelectionController {
    pub fn register(api: &GridApi) -> Self {
        let weak = api.downgrade();
        let sub = api.subscribe_event(EventChannel::RowClick, move |event| {
            let Some(api) = weak.upgrade() else {
                return;
            };
            if let GridEvent::RowClick(id) = event {
                api.toggle_row_selection(*id);
            }
        });
        Self {
            api: api.downgrade(),
            sub: Some(sub),
        }
    }

    pub fn detach(&mut self) {
        detach(&self.api, &mut self.sub);
    }
}

impl Drop for SelectionController {
    fn drop(&mut self) {
        self.detach();
    }
}

/// Cycles a column's sort direction on `header-click` intents:
/// ascending → descending → unsorted, replacing the model (single-column
/// sort). Clicks on unknown or non-sortable columns are ignored.
pub struct SortController {
    api: WeakGridApi,
    sub: Option<SubscriptionId>,
}

impl SortController {
    pub fn register(api: &GridApi) -> Self {
        let weak = api.downgrade();
        let sub = api.subscribe_event(EventChannel::HeaderClick, move |event| {
            let Some(api) = weak.upgrade() else {
                return;
            };
            let GridEvent::HeaderClick(field) = event else {
                return;
            };
            match api.columns().column(field) {
                Some(col) if col.sortable => {}
                _ => return,
            }
            let next = cycle_sort_model(&api.sort_model(), field);
            if let Err(err) = api.set_sort_model(next) {
                gwarn!(%err, field = field.as_str(), "sort cycle rejected");
            }
        });
        Self {
            api: api.downgrade(),
            sub: Some(sub),
        }
    }

    pub fn detach(&mut self) {
        detach(&self.api, &mut self.sub);
    }
}

impl Drop for SortController {
    fn drop(&mut self) {
        self.detach();
    }
}

fn cycle_sort_model(current: &SortModel, field: &str) -> SortModel {
    match current.iter().find(|item| item.field == field) {
        Some(SortItem {
            direction: SortDirection::Asc,
            ..
        }) => vec![SortItem::desc(field)],
        Some(SortItem {
            direction: SortDirection::Desc,
            ..
        }) => SortModel::new(),
        None => vec![SortItem::asc(field)],
    }
}

/// Applies `page-change-requested` / `page-size-change-requested` intents
/// from the host's pagination widget.
pub struct PaginationController {
    api: WeakGridApi,
    page_sub: Option<SubscriptionId>,
    size_sub: Option<SubscriptionId>,
}

impl PaginationController {
    pub fn register(api: &GridApi) -> Self {
        let weak = api.downgrade();
        let page_sub = api.subscribe_event(EventChannel::PageChangeRequested, move |event| {
            let Some(api) = weak.upgrade() else {
                return;
            };
            if let GridEvent::PageChangeRequested(page) = event {
                api.set_page(*page);
            }
        });
        let weak = api.downgrade();
        let size_sub = api.subscribe_event(EventChannel::PageSizeChangeRequested, move |event| {
            let Some(api) = weak.upgrade() else {
                return;
            };
            if let GridEvent::PageSizeChangeRequested(size) = event {
                if let Err(err) = api.set_page_size(*size) {
                    gwarn!(%err, size = *size, "page size request rejected");
                }
            }
        });
        Self {
            api: api.downgrade(),
            page_sub: Some(page_sub),
            size_sub: Some(size_sub),
        }
    }

    pub fn detach(&mut self) {
        detach(&self.api, &mut self.page_sub);
        detach(&self.api, &mut self.size_sub);
    }
}

impl Drop for PaginationController {
    fn drop(&mut self) {
        self.detach();
    }
}

fn detach(api: &WeakGridApi, sub: &mut Option<SubscriptionId>) {
    if let (Some(api), Some(id)) = (api.upgrade(), sub.take()) {
        api.unsubscribe_event(id);
    }
}
