//! Lead Page
//!
//! Runs inside the popup. Collects contact details, posts the lead and tells
//! the opener whether the unit's project may be unlocked.

use leptos::prelude::*;
use leptos::task::spawn_local;
use listing_core::lead::{agent_label, ClientInfo, DeviceClass, LeadForm, PopupStatus};

use crate::api;
use crate::browser;
use crate::context::use_session;

#[component]
pub fn LeadPage() -> impl IntoView {
    let session = use_session();
    let project = browser::query_param("project").unwrap_or_default();
    let unit = browser::query_param("unit").unwrap_or_default();

    let (name, set_name) = signal(String::new());
    let (mobile, set_mobile) = signal(String::new());
    let (is_agent, set_is_agent) = signal(false);
    let (status, set_status) = signal(PopupStatus::Idle);

    let on_submit = {
        let project = project.clone();
        let unit = unit.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            if status.get_untracked().is_submitting() {
                return;
            }
            let form = LeadForm {
                name: name.get_untracked(),
                mobile: mobile.get_untracked(),
                is_agent: is_agent.get_untracked(),
                project: project.clone(),
                unit: unit.clone(),
            };
            let lead = match form.validate() {
                Ok(lead) => lead,
                Err(e) => {
                    log::debug!("[LEAD] invalid form: {}", e);
                    set_status.set(PopupStatus::Invalid(e));
                    return;
                }
            };
            set_status.set(PopupStatus::Submitting);

            let project = project.clone();
            let unit = unit.clone();
            spawn_local(async move {
                let config = session.config();
                let client = session.client();
                let ip = api::public_ip(&client, &config.ip_lookup_url).await;
                let client_info = ClientInfo {
                    device: DeviceClass::from_user_agent(&browser::user_agent()),
                    timezone: browser::timezone(),
                    ip,
                };
                let result = api::submit_lead(&client, lead.into_submission(client_info)).await;
                let next = PopupStatus::from_result(&result);

                if let Ok(outcome) = &result {
                    match browser::post_to_opener(&outcome.message(&project, &unit)) {
                        Ok(true) => log::info!("[LEAD] {:?} sent to opener", outcome),
                        Ok(false) => log::warn!("[LEAD] opener is gone"),
                        Err(e) => log::warn!("[LEAD] could not notify opener: {}", e),
                    }
                }
                if let Some((text, ok)) = next.toast() {
                    session.notify(&text, ok);
                }

                if let Some(delay) = next.close_delay(&config) {
                    browser::close_window_after(u32::try_from(delay.as_millis()).unwrap_or(u32::MAX));
                }
                set_status.set(next);
            });
        }
    };

    let status_class = move || match status.get() {
        PopupStatus::Saved => "lead-status ok",
        PopupStatus::Blocked => "lead-status blocked",
        PopupStatus::Idle | PopupStatus::Submitting => "lead-status",
        _ => "lead-status error",
    };

    view! {
        <div class="lead-page">
            <h2>"Unlock details"</h2>
            <p class="lead-target">{project.clone()} " · " {unit.clone()}</p>
            <form on:submit=on_submit>
                <label>
                    "Name"
                    <input
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                    />
                </label>
                <label>
                    "Mobile"
                    <input
                        type="tel"
                        inputmode="numeric"
                        placeholder="10-digit number without +91"
                        prop:value=move || mobile.get()
                        on:input=move |ev| set_mobile.set(event_target_value(&ev))
                    />
                </label>
                <div class="agent-toggle">
                    "Are you an agent? "
                    <button
                        type="button"
                        class:active=move || is_agent.get()
                        on:click=move |_| set_is_agent.update(|v| *v = !*v)
                    >
                        {move || agent_label(is_agent.get())}
                    </button>
                </div>
                <div class="lead-actions">
                    <button type="submit" class="btn-primary" disabled=move || status.get().is_submitting()>
                        "Submit"
                    </button>
                    <button type="button" class="btn-secondary" on:click=move |_| browser::close_window_after(0)>
                        "Close"
                    </button>
                </div>
            </form>
            <p class=status_class>{move || status.get().label()}</p>
        </div>
    }
}
