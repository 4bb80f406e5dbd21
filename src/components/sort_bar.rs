//! Sort Bar Component
//!
//! Unit and size selects plus Reset. Changing either re-sorts the cached rows
//! without a fetch.

use leptos::prelude::*;
use listing_core::sort::SortDirection;

use crate::store::{store_reset_sort, use_inventory_store, InventoryStateStoreFields};

#[component]
pub fn SortBar() -> impl IntoView {
    let store = use_inventory_store();

    let unit_value = move || SortDirection::as_select(store.sort().get().unit);
    let size_value = move || SortDirection::as_select(store.sort().get().size);

    view! {
        <div class="sort-bar">
            <label>
                "Unit "
                <select
                    prop:value=unit_value
                    on:change=move |ev| {
                        let direction = SortDirection::from_select(&event_target_value(&ev));
                        store.sort().update(|spec| spec.unit = direction);
                    }
                >
                    <option value="">"None"</option>
                    <option value="asc">"A → Z"</option>
                    <option value="desc">"Z → A"</option>
                </select>
            </label>
            <label>
                "Size "
                <select
                    prop:value=size_value
                    on:change=move |ev| {
                        let direction = SortDirection::from_select(&event_target_value(&ev));
                        store.sort().update(|spec| spec.size = direction);
                    }
                >
                    <option value="">"None"</option>
                    <option value="asc">"Low → High"</option>
                    <option value="desc">"High → Low"</option>
                </select>
            </label>
            <button class="btn-secondary" on:click=move |_| store_reset_sort(&store)>"Reset"</button>
        </div>
    }
}
