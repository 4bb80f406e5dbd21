//! Project Page
//!
//! One project by `?name=`, first project when the name is unknown.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::models::ProjectLookup;
use listing_core::route::{home_link, inventory_link};
use listing_core::Project;

use crate::api;
use crate::browser;
use crate::context::use_session;

/// Link line that disappears when the sheet has no URL
fn optional_link(label: &'static str, url: String) -> impl IntoView {
    (!url.is_empty()).then(|| {
        view! { <a class="btn-secondary" href=url target="_blank" rel="noopener">{label}</a> }
    })
}

#[component]
fn ProjectView(project: Project) -> impl IntoView {
    let inventory = inventory_link(&project.project_name);
    let photos = project.photo_urls.clone();

    view! {
        <article class="project-detail">
            <h1>{project.project_name.clone()}</h1>
            <p class="location">{project.location}</p>
            <dl>
                <dt>"Product Mix"</dt>
                <dd>{project.product_mix}</dd>
                <dt>"Budget"</dt>
                <dd>{project.budget_range}</dd>
            </dl>
            <p class="description">{project.description}</p>
            <div class="project-links">
                {optional_link("Brochure", project.brochure_url)}
                {optional_link("Video", project.video_url)}
                <a class="btn-primary" href=inventory>"View Inventory"</a>
            </div>
            <div class="gallery">
                {photos
                    .into_iter()
                    .map(|url| view! { <img src=url loading="lazy" /> })
                    .collect_view()}
            </div>
        </article>
    }
}

#[component]
pub fn ProjectDetail() -> impl IntoView {
    let session = use_session();
    let (lookup, set_lookup) = signal(ProjectLookup::Loading);
    let wanted = StoredValue::new(browser::query_param("name").unwrap_or_default());

    let load = move || {
        set_lookup.set(ProjectLookup::Loading);
        spawn_local(async move {
            let result = api::list_projects(&session.client()).await;
            if let Err(e) = &result {
                session.notify(&format!("Projects: {}", e), false);
            }
            set_lookup.set(wanted.with_value(|name| ProjectLookup::from_result(&result, name)));
        });
    };
    load();

    view! {
        <div class="project-page">
            <a class="back-link" href={home_link()}>"← Projects"</a>
            {move || match lookup.get() {
                ProjectLookup::Found(p) => view! { <ProjectView project=p /> }.into_any(),
                other => {
                    let retry = other.can_retry().then(|| view! {
                        <button class="btn-secondary" on:click=move |_| load()>"Retry"</button>
                    });
                    view! { <p class="status">{other.message()} " " {retry}</p> }.into_any()
                }
            }}
        </div>
    }
}
