//! Browser Glue
//!
//! Thin `web_sys` wrappers: location and query string, visitor details,
//! the lead popup, opener messaging and the print window.

use gloo_timers::callback::Timeout;
use listing_core::export::ExportDocument;
use listing_core::route::{lead_link, PopupGeometry, LEAD_WINDOW_NAME};
use listing_core::unlock::WindowMessage;
use listing_core::{AppError, ListingConfig};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlMetaElement, UrlSearchParams, Window};

use crate::api::js_error_text;

fn window() -> Result<Window, AppError> {
    web_sys::window().ok_or(AppError::NoWindow)
}

fn browser_error(value: JsValue) -> AppError {
    AppError::Browser(js_error_text(&value))
}

// ========================
// Location & Visitor
// ========================

pub fn query_param(name: &str) -> Option<String> {
    let search = window().ok()?.location().search().ok()?;
    let params = UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|v| !v.is_empty())
}

pub fn location_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

pub fn user_agent() -> String {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .unwrap_or_default()
}

/// IANA zone from `Intl.DateTimeFormat().resolvedOptions()`
pub fn timezone() -> String {
    let format = js_sys::Intl::DateTimeFormat::new(&js_sys::Array::new(), &js_sys::Object::new());
    js_sys::Reflect::get(&format.resolved_options(), &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or_default()
}

/// `content` of `<meta name="...">` in the host page
pub fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let element = document
        .query_selector(&format!("meta[name=\"{}\"]", name))
        .ok()??;
    let meta: HtmlMetaElement = element.dyn_into().ok()?;
    Some(meta.content()).filter(|c| !c.trim().is_empty())
}

pub fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Attach a window listener for the lifetime of the page.
pub fn listen_window(event: &str, handler: impl FnMut(web_sys::Event) + 'static) {
    let Some(w) = web_sys::window() else { return };
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
    if let Err(e) = w.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        log::warn!("[APP] could not listen for {}: {}", event, js_error_text(&e));
    }
    callback.forget();
}

// ========================
// Lead Popup
// ========================

/// Open the lead form for one unit in a centred popup.
pub fn open_lead_popup(project: &str, unit: &str, config: &ListingConfig) -> Result<(), AppError> {
    let w = window()?;
    let screen = w.screen().map_err(browser_error)?;
    let geometry = PopupGeometry::centered(
        screen.width().map_err(browser_error)?,
        screen.height().map_err(browser_error)?,
        config.popup_width,
        config.popup_height,
    );
    let opened = w
        .open_with_url_and_target_and_features(&lead_link(project, unit), LEAD_WINDOW_NAME, &geometry.features())
        .map_err(browser_error)?;
    match opened {
        Some(popup) => {
            let _ = popup.focus();
            Ok(())
        }
        None => {
            alert("Popup blocked. Please allow popups for this site and try again.");
            Err(AppError::PopupBlocked)
        }
    }
}

/// Post to the window that opened this one. `Ok(false)` when it is gone.
pub fn post_to_opener(message: &WindowMessage) -> Result<bool, AppError> {
    let w = window()?;
    let opener = w.opener().map_err(browser_error)?;
    if opener.is_null() || opener.is_undefined() {
        return Ok(false);
    }
    // The opener lives in another realm, so `instanceof Window` would fail.
    let opener: Window = opener.unchecked_into();
    if opener.closed().unwrap_or(true) {
        return Ok(false);
    }
    let value = message
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| AppError::Browser(e.to_string()))?;
    opener.post_message(&value, &origin()).map_err(browser_error)?;
    let _ = opener.focus();
    Ok(true)
}

pub fn close_window_after(delay_ms: u32) {
    Timeout::new(delay_ms, || {
        if let Some(w) = web_sys::window() {
            let _ = w.close();
        }
    })
    .forget();
}

// ========================
// Print Window
// ========================

/// Write `doc` into a new window and print it after the configured delay.
pub fn open_print_window(doc: &ExportDocument, config: &ListingConfig) -> Result<(), AppError> {
    let w = window()?;
    let printer = w
        .open_with_url_and_target_and_features("", "_blank", &config.print_window_features)
        .map_err(browser_error)?
        .ok_or(AppError::PopupBlocked)?;
    let root = printer
        .document()
        .and_then(|d| d.document_element())
        .ok_or(AppError::NoWindow)?;
    root.set_inner_html(&doc.to_html());
    log::info!("[EXPORT] {} rows for {}", doc.rows.len(), doc.project);

    Timeout::new(config.print_delay_ms, move || {
        let _ = printer.focus();
        if let Err(e) = printer.print() {
            log::warn!("[EXPORT] print failed: {}", js_error_text(&e));
        }
    })
    .forget();
    Ok(())
}
