//! Session Context
//!
//! Page-lifetime state provided via Leptos Context API: busy counter,
//! unlocked projects, toasts and the resolved configuration.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use listing_core::unlock::{UnlockSet, UnlockTransition, WindowMessage};
use listing_core::ListingConfig;

use crate::api;

/// Transient notification
#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub ok: bool,
}

/// Session-wide signals provided via context
#[derive(Clone, Copy)]
pub struct SessionContext {
    /// Calls in flight - read
    pub busy: ReadSignal<u32>,
    /// Calls in flight - write, only through the api client
    set_busy: WriteSignal<u32>,
    /// Projects revealed in this session - read
    pub unlocked: ReadSignal<UnlockSet>,
    set_unlocked: WriteSignal<UnlockSet>,
    pub toasts: ReadSignal<Vec<Toast>>,
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast: StoredValue<u64>,
    config: StoredValue<ListingConfig>,
}

impl SessionContext {
    pub fn new(config: ListingConfig) -> Self {
        let (busy, set_busy) = signal(0u32);
        let (unlocked, set_unlocked) = signal(UnlockSet::new());
        let (toasts, set_toasts) = signal(Vec::<Toast>::new());
        Self {
            busy,
            set_busy,
            unlocked,
            set_unlocked,
            toasts,
            set_toasts,
            next_toast: StoredValue::new(0),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> ListingConfig {
        self.config.get_value()
    }

    /// Fresh client wired to this session's busy counter
    pub fn client(&self) -> api::Client {
        self.config.with_value(|config| api::client(config, self.set_busy))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get() > 0
    }

    /// Reactive: re-runs the caller when the unlock set changes.
    pub fn is_unlocked(&self, project: &str) -> bool {
        self.unlocked.with(|set| set.is_unlocked(project))
    }

    /// Feed a lead-capture message to the unlock latch and tell the user.
    pub fn apply_message(&self, message: &WindowMessage) -> UnlockTransition {
        let mut transition = UnlockTransition::Ignored;
        self.set_unlocked.maybe_update(|set| {
            transition = set.apply(message);
            matches!(transition, UnlockTransition::Unlocked(_))
        });
        match &transition {
            UnlockTransition::Unlocked(project) => self.notify(&format!("{} unlocked", project), true),
            UnlockTransition::Blocked(_) => self.notify("Blocked", false),
            UnlockTransition::AlreadyUnlocked(_) | UnlockTransition::Ignored => {}
        }
        transition
    }

    /// Show a toast that removes itself after the configured lifetime.
    pub fn notify(&self, message: &str, ok: bool) {
        let id = self.next_toast.get_value();
        self.next_toast.set_value(id + 1);
        if ok {
            log::info!("[APP] {}", message);
        } else {
            log::warn!("[APP] {}", message);
        }
        self.set_toasts.update(|toasts| {
            toasts.push(Toast { id, message: message.to_string(), ok })
        });

        let set_toasts = self.set_toasts;
        let lifetime = self.config.with_value(|c| c.toast_ms);
        Timeout::new(lifetime, move || {
            set_toasts.update(|toasts| toasts.retain(|t| t.id != id));
        })
        .forget();
    }
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>().expect("SessionContext should be provided")
}
