//! Toasts and Busy Overlay

use leptos::prelude::*;

use crate::context::use_session;

/// Stack of transient notifications
#[component]
pub fn ToastHost() -> impl IntoView {
    let session = use_session();

    view! {
        <div class="toast-host">
            <For
                each=move || session.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let class = if toast.ok { "toast toast-ok" } else { "toast toast-error" };
                    view! { <div class=class>{toast.message}</div> }
                }
            />
        </div>
    }
}

/// Visible while any endpoint call is in flight
#[component]
pub fn BusyOverlay() -> impl IntoView {
    let session = use_session();

    view! {
        <Show when=move || session.is_busy()>
            <div class="busy-overlay" aria-busy="true">
                <div class="spinner"></div>
            </div>
        </Show>
    }
}
