//! Endpoint Bindings
//!
//! `web_sys` fetch transport for the core client, organized by concern.

mod reads;
mod lead;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use listing_core::endpoint::{Endpoint, HttpRequest, TEXT_CONTENT_TYPE};
use listing_core::transport::{ApiClient, BusyIndicator, RawResponse, RetryPolicy, Transport};
use listing_core::{ApiError, ListingConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Headers, Request, RequestCache, RequestInit, RequestMode, Response};

// Re-export all public items
pub use reads::*;
pub use lead::*;

/// Client used by every page
pub type Client = ApiClient<FetchTransport, SignalBusy>;

pub fn client(config: &ListingConfig, busy: WriteSignal<u32>) -> Client {
    ApiClient::new(
        Endpoint::new(config.endpoint.clone()),
        FetchTransport,
        SignalBusy(busy),
        RetryPolicy::from_config(config),
    )
}

/// Readable text of a thrown JS value
pub fn js_error_text(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| value.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", value))
}

/// `window.fetch` with an abort-on-deadline controller
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: &HttpRequest, deadline: Duration) -> Result<RawResponse, ApiError> {
        let window = web_sys::window().ok_or_else(|| ApiError::Network("no window".to_string()))?;
        let to_network = |e: JsValue| ApiError::Network(js_error_text(&e));

        let controller = AbortController::new().map_err(to_network)?;
        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);
        opts.set_cache(RequestCache::NoStore);
        opts.set_signal(Some(&controller.signal()));
        if let Some(body) = &request.body {
            // text/plain keeps this a "simple" request: no CORS pre-flight.
            let headers = Headers::new().map_err(to_network)?;
            headers.set("Content-Type", TEXT_CONTENT_TYPE).map_err(to_network)?;
            opts.set_headers(&headers);
            opts.set_body(&JsValue::from_str(body));
        }
        let js_request = Request::new_with_str_and_init(&request.url, &opts).map_err(to_network)?;

        let timed_out = Rc::new(Cell::new(false));
        // Dropping the timer at the end of this call cancels it.
        let _deadline = {
            let timed_out = timed_out.clone();
            let controller = controller.clone();
            let millis = u32::try_from(deadline.as_millis()).unwrap_or(u32::MAX);
            Timeout::new(millis, move || {
                timed_out.set(true);
                controller.abort();
            })
        };

        let exchange = async {
            let value = JsFuture::from(window.fetch_with_request(&js_request)).await?;
            let response: Response = value.dyn_into()?;
            let text = JsFuture::from(response.text()?).await?;
            Ok::<_, JsValue>((response.status(), text.as_string().unwrap_or_default()))
        };

        match exchange.await {
            Ok((status, body)) => Ok(RawResponse { status, body }),
            Err(_) if timed_out.get() => Err(ApiError::Timeout),
            Err(e) => Err(to_network(e)),
        }
    }
}

/// Busy indicator backed by the session's in-flight signal
#[derive(Clone, Copy)]
pub struct SignalBusy(pub WriteSignal<u32>);

impl BusyIndicator for SignalBusy {
    fn begin(&self) {
        self.0.update(|n| *n += 1);
    }

    fn end(&self) {
        self.0.update(|n| *n = n.saturating_sub(1));
    }
}
