//! Inventory Page State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use listing_core::cache::RowCache;
use listing_core::sort::SortSpec;
use listing_core::table::LoadStatus;
use listing_core::{InventoryRow, Project};
use reactive_stores::Store;

/// Inventory page state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct InventoryState {
    /// Projects offered in the selector
    pub projects: Vec<Project>,
    /// Selected project name
    pub selected: String,
    /// Rows of the selected project, fetch order
    pub cache: RowCache,
    pub sort: SortSpec,
    pub status: LoadStatus,
    /// Last known `innerWidth`
    pub viewport_width: f64,
}

/// Type alias for the store
pub type InventoryStore = Store<InventoryState>;

/// Get the inventory store from context
pub fn use_inventory_store() -> InventoryStore {
    expect_context::<InventoryStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the cached rows and derive the status from them
pub fn store_set_rows(store: &InventoryStore, project: &str, rows: Vec<InventoryRow>) {
    let status = if rows.is_empty() { LoadStatus::Empty } else { LoadStatus::Ready };
    store.cache().write().set_rows(project, rows);
    store.status().set(status);
}

/// Rows in display order for the current sort
pub fn store_sorted_rows(store: &InventoryStore) -> Vec<InventoryRow> {
    let spec = store.sort().get();
    store.cache().with(|cache| cache.apply_sort(spec))
}

pub fn store_reset_sort(store: &InventoryStore) {
    store.sort().set(SortSpec::default());
}
