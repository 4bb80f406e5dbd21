//! Home Page
//!
//! Tile grid of all projects.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::route::project_link;
use listing_core::Project;

use crate::api;
use crate::context::use_session;

#[component]
fn ProjectTile(project: Project) -> impl IntoView {
    let cover = project.cover_url().to_string();
    let href = project_link(&project.project_name);

    view! {
        <a class="project-tile" href=href>
            <img src=cover alt=project.project_name.clone() loading="lazy" />
            <div class="project-tile-body">
                <h3>{project.project_name}</h3>
                <p class="location">{project.location}</p>
            </div>
        </a>
    }
}

#[component]
pub fn ProjectGrid() -> impl IntoView {
    let session = use_session();
    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (failed, set_failed) = signal(false);

    let load = move || {
        set_failed.set(false);
        spawn_local(async move {
            match api::list_projects(&session.client()).await {
                Ok(loaded) => set_projects.set(loaded),
                Err(e) => {
                    set_failed.set(true);
                    session.notify(&format!("Projects: {}", e), false);
                }
            }
        });
    };
    load();

    view! {
        <div class="home-page">
            <h1>"Projects"</h1>
            <Show when=move || failed.get()>
                <p class="status">
                    "Failed to load projects. "
                    <button class="btn-secondary" on:click=move |_| load()>"Retry"</button>
                </p>
            </Show>
            <div class="project-grid">
                <For
                    each=move || projects.get()
                    key=|project| project.project_name.clone()
                    children=move |project| view! { <ProjectTile project=project /> }
                />
            </div>
        </div>
    }
}
