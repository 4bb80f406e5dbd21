//! Listing Frontend App
//!
//! Resolves configuration, provides the session and routes to the page
//! named by `?page=` (or the location path).

use leptos::prelude::*;
use listing_core::route::Page;
use listing_core::ListingConfig;

use crate::browser;
use crate::components::{BusyOverlay, InventoryPage, LeadPage, ProjectDetail, ProjectGrid, ToastHost};
use crate::context::SessionContext;

/// Defaults, then the build-time endpoint, then the host page's meta tag.
fn resolve_config() -> ListingConfig {
    let config = ListingConfig::default()
        .with_endpoint(option_env!("LISTING_ENDPOINT"))
        .with_endpoint(browser::meta_content("listing-endpoint").as_deref());
    log::debug!("[APP] endpoint {}", config.endpoint);
    config
}

#[component]
pub fn App() -> impl IntoView {
    let session = SessionContext::new(resolve_config());
    provide_context(session);

    let page = Page::resolve(browser::query_param("page").as_deref(), &browser::location_path());
    log::info!("[APP] page {:?}", page);

    let body = match page {
        Page::Home => view! { <ProjectGrid /> }.into_any(),
        Page::Project => view! { <ProjectDetail /> }.into_any(),
        Page::Inventory => view! { <InventoryPage /> }.into_any(),
        Page::Lead => view! { <LeadPage /> }.into_any(),
    };

    view! {
        <ToastHost />
        <BusyOverlay />
        <main class="page">{body}</main>
    }
}
