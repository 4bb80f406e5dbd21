//! Front-end Configuration
//!
//! One `ListingConfig` per page load. Defaults match the production endpoint;
//! the endpoint can be overridden at build time and again by the host page.

use std::time::Duration;

use serde::Deserialize;

/// Endpoint the front end talks to when nothing overrides it.
pub const DEFAULT_ENDPOINT: &str =
    "https://script.google.com/macros/s/AKfycbwvXjRgF1kFZBXxfSTOhMvY0Gw1sI_cl41ZrubUFF0uo6QJHo7LBdZ-ZnJszLxmAmyI/exec";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Base URL of the spreadsheet endpoint
    pub endpoint: String,
    /// Per-attempt deadline
    pub timeout_ms: u32,
    pub get_retries: u32,
    pub post_retries: u32,
    /// Lead popup size in CSS pixels
    pub popup_width: u32,
    pub popup_height: u32,
    /// `window.open` features for the print document
    pub print_window_features: String,
    /// Settle time before `print()` is invoked
    pub print_delay_ms: u32,
    pub close_after_saved_ms: u32,
    pub close_after_blocked_ms: u32,
    pub toast_ms: u32,
    /// Viewports at or below this width get the sticky download bar
    pub mobile_breakpoint_px: u32,
    /// Origins accepted for cross-window messages besides our own
    pub extra_message_origins: Vec<String>,
    /// Best-effort public IP lookup
    pub ip_lookup_url: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: 12_000,
            get_retries: 1,
            post_retries: 0,
            popup_width: 680,
            popup_height: 720,
            print_window_features: "width=1100,height=760".to_string(),
            print_delay_ms: 300,
            close_after_saved_ms: 800,
            close_after_blocked_ms: 1000,
            toast_ms: 3500,
            mobile_breakpoint_px: 640,
            extra_message_origins: Vec::new(),
            ip_lookup_url: "https://api.ipify.org?format=json".to_string(),
        }
    }
}

impl ListingConfig {
    /// Replace the endpoint when an override is present and non-blank.
    pub fn with_endpoint(mut self, endpoint: Option<&str>) -> Self {
        if let Some(url) = endpoint.map(str::trim).filter(|u| !u.is_empty()) {
            self.endpoint = url.to_string();
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.timeout_ms))
    }
}
