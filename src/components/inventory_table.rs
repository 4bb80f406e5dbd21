//! Inventory Table Component
//!
//! Renders the sorted rows; locked projects show masked cells and a SHOW
//! button that opens the lead popup for that unit.

use leptos::prelude::*;
use listing_core::table::{build_table, CellView, RowAction, TableRow, TABLE_HEADERS};
use listing_core::AppError;

use crate::browser;
use crate::context::use_session;
use crate::store::{store_sorted_rows, use_inventory_store, InventoryStateStoreFields};

fn cell(value: CellView) -> impl IntoView {
    let class = if value.is_masked() { "masked" } else { "" };
    view! { <td class=class>{value.text().to_string()}</td> }
}

#[component]
fn InventoryRowView(row: TableRow) -> impl IntoView {
    let session = use_session();
    let cells = row.cells();

    let action = match row.action {
        RowAction::Unlocked => view! { <span class="unlocked-label">"Unlocked"</span> }.into_any(),
        RowAction::Reveal { project, unit } => view! {
            <button
                class="btn-primary btn-show"
                on:click=move |_| {
                    let config = session.config();
                    match browser::open_lead_popup(&project, &unit, &config) {
                        Ok(()) => log::info!("[LEAD] popup opened for {} / {}", project, unit),
                        Err(AppError::PopupBlocked) => session.notify("Popup blocked", false),
                        Err(e) => session.notify(&e.to_string(), false),
                    }
                }
            >
                "SHOW"
            </button>
        }
        .into_any(),
    };

    view! {
        <tr>
            {cells.into_iter().map(cell).collect_view()}
            <td>{action}</td>
        </tr>
    }
}

#[component]
pub fn InventoryTable() -> impl IntoView {
    let session = use_session();
    let store = use_inventory_store();

    let rows = move || {
        let unlocked = session.is_unlocked(&store.selected().get());
        build_table(&store_sorted_rows(&store), unlocked)
    };

    view! {
        <table class="inventory-table">
            <thead>
                <tr>
                    {TABLE_HEADERS.iter().map(|h| view! { <th>{*h}</th> }).collect_view()}
                </tr>
            </thead>
            <tbody>
                {move || match store.status().get().message() {
                    Some(message) => view! {
                        <tr class="status-row"><td colspan={TABLE_HEADERS.len().to_string()}>{message}</td></tr>
                    }
                    .into_any(),
                    None => rows()
                        .into_iter()
                        .map(|row| view! { <InventoryRowView row=row /> })
                        .collect_view()
                        .into_any(),
                }}
            </tbody>
        </table>
    }
}
