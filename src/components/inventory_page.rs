//! Inventory Page
//!
//! Project selector, sort bar, masked table and export. Listens for the
//! lead popup's message to unlock the selected project.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::cache::LatestRequest;
use listing_core::models::find_project;
use listing_core::route::home_link;
use listing_core::table::{DownloadPlacement, LoadStatus};
use listing_core::unlock::{OriginPolicy, WindowMessage};
use reactive_stores::Store;
use wasm_bindgen::JsCast;
use web_sys::MessageEvent;

use crate::api;
use crate::browser;
use crate::components::{DownloadActions, InventoryTable, SortBar};
use crate::context::use_session;
use crate::store::{store_set_rows, InventoryState, InventoryStateStoreFields};

#[component]
pub fn InventoryPage() -> impl IntoView {
    let session = use_session();
    let store = Store::new(InventoryState {
        viewport_width: browser::viewport_width(),
        ..Default::default()
    });
    provide_context(store);
    let latest = StoredValue::new_local(LatestRequest::new());

    // Unlock messages from the lead popup
    let policy = OriginPolicy::new(&browser::origin(), &session.config().extra_message_origins);
    browser::listen_window("message", move |ev| {
        let Some(ev) = ev.dyn_ref::<MessageEvent>() else { return };
        if !policy.permits(&ev.origin()) {
            log::debug!("[UNLOCK] ignored message from {}", ev.origin());
            return;
        }
        match serde_wasm_bindgen::from_value::<WindowMessage>(ev.data()) {
            Ok(message) => {
                session.apply_message(&message);
            }
            Err(_) => log::debug!("[UNLOCK] ignored message of unknown shape"),
        }
    });
    browser::listen_window("resize", move |_| {
        store.viewport_width().set(browser::viewport_width());
    });

    let load_inventory = move |refresh: bool| {
        let project = store.selected().get_untracked();
        if project.is_empty() {
            store.status().set(LoadStatus::NoProject);
            return;
        }
        let ticket = latest.with_value(|l| l.issue());
        store.status().set(if refresh { LoadStatus::Refreshing } else { LoadStatus::Loading });
        log::info!("[INVENTORY] loading {}", project);

        spawn_local(async move {
            let client = session.client();
            let result = api::list_inventory(&client, &project).await;
            if !latest.with_value(|l| l.is_current(ticket)) {
                log::debug!("[INVENTORY] dropped stale response for {}", project);
                return;
            }
            match result {
                Ok(rows) => {
                    log::info!("[INVENTORY] {} rows for {}", rows.len(), project);
                    store_set_rows(&store, &project, rows);
                }
                Err(e) => {
                    store.cache().write().clear();
                    store.status().set(LoadStatus::Failed);
                    session.notify(&format!("Inventory: {}", e), false);
                }
            }
        });
    };

    let load_projects = move || {
        spawn_local(async move {
            let client = session.client();
            match api::list_projects(&client).await {
                Ok(projects) => {
                    let wanted = browser::query_param("project").unwrap_or_default();
                    let selected = find_project(&projects, &wanted)
                        .map(|p| p.project_name.clone())
                        .unwrap_or_default();
                    store.projects().set(projects);
                    store.selected().set(selected);
                    load_inventory(false);
                }
                Err(e) => {
                    store.status().set(LoadStatus::ProjectsFailed);
                    session.notify(&format!("Projects: {}", e), false);
                }
            }
        });
    };

    // Warm-up, not awaited
    spawn_local(async move {
        api::ping(&session.client()).await;
    });
    load_projects();

    let refresh = move |_| {
        if store.projects().with_untracked(|p| p.is_empty()) {
            load_projects();
        } else {
            load_inventory(true);
        }
    };

    view! {
        <div class="inventory-page">
            <header class="inventory-header">
                <a class="back-link" href={home_link()}>"← Projects"</a>
                <h1>"Inventory"</h1>
                <select
                    class="project-select"
                    on:change=move |ev| {
                        store.selected().set(event_target_value(&ev));
                        load_inventory(false);
                    }
                >
                    <For
                        each=move || store.projects().get()
                        key=|project| project.project_name.clone()
                        children=move |project| {
                            let name = project.project_name.clone();
                            let is_selected = {
                                let name = name.clone();
                                move || store.selected().get() == name
                            };
                            let value = name.clone();
                            view! {
                                <option value=value prop:selected=is_selected>{name}</option>
                            }
                        }
                    />
                </select>
                <button
                    class="btn-secondary"
                    on:click=refresh
                    disabled=move || store.status().get().is_loading()
                >
                    "Refresh"
                </button>
                <DownloadActions placement=DownloadPlacement::HeaderButton />
            </header>
            <SortBar />
            <InventoryTable />
            <DownloadActions placement=DownloadPlacement::StickyBar />
        </div>
    }
}
