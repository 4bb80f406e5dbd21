//! Download Actions
//!
//! The export button: in the header on wide screens, a sticky bottom bar on
//! narrow ones, and nowhere until the selected project is unlocked.

use leptos::prelude::*;
use listing_core::export::ExportDocument;
use listing_core::table::{build_table, DownloadPlacement};

use crate::browser;
use crate::context::use_session;
use crate::store::{use_inventory_store, InventoryStateStoreFields};

/// Renders only when the current layout resolves to `placement`.
#[component]
pub fn DownloadActions(placement: DownloadPlacement) -> impl IntoView {
    let session = use_session();
    let store = use_inventory_store();
    let breakpoint = session.config().mobile_breakpoint_px;

    let resolved = move || {
        DownloadPlacement::resolve(
            session.is_unlocked(&store.selected().get()),
            store.status().get(),
            store.viewport_width().get(),
            breakpoint,
        )
    };

    let export = move |_| {
        let project = store.selected().get_untracked();
        let unlocked = session.unlocked.with_untracked(|set| set.is_unlocked(&project));
        let spec = store.sort().get_untracked();
        let rows = store.cache().with_untracked(|cache| cache.apply_sort(spec));
        let table = build_table(&rows, unlocked);
        let doc = ExportDocument::from_table(&project, &table);
        if let Err(e) = browser::open_print_window(&doc, &session.config()) {
            session.notify(&format!("Export failed: {}", e), false);
        }
    };

    let class = match placement {
        DownloadPlacement::StickyBar => "download-bar",
        _ => "download-header",
    };

    view! {
        <Show when=move || resolved() == placement>
            <div class=class>
                <button class="btn-primary" on:click=export>"Download PDF"</button>
            </div>
        </Show>
    }
}
