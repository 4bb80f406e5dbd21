//! Lead Capture
//!
//! Contact-form validation, the `addlead` payload, and the popup's status machine.

use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::config::ListingConfig;
use crate::error::{ApiError, ValidationError};
use crate::models::WriteAck;
use crate::unlock::WindowMessage;

/// Device class inferred from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    pub fn from_user_agent(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        // "android" without "mobile" is a tablet; with it, the mobile check already matched.
        if ["mobile", "iphone", "ipod", "windows phone"].iter().any(|k| ua.contains(k)) {
            DeviceClass::Mobile
        } else if ["ipad", "tablet", "android"].iter().any(|k| ua.contains(k)) {
            DeviceClass::Tablet
        } else {
            DeviceClass::Desktop
        }
    }
}

/// 6 to 15 ASCII digits, nothing else (no `+`, no spaces).
pub fn validate_mobile(mobile: &str) -> Result<(), ValidationError> {
    let ok = (6..=15).contains(&mobile.len()) && mobile.bytes().all(|b| b.is_ascii_digit());
    if ok {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobile)
    }
}

/// Raw form input from the popup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadForm {
    pub name: String,
    pub mobile: String,
    pub is_agent: bool,
    pub project: String,
    pub unit: String,
}

impl LeadForm {
    /// Trim and check the form; nothing is sent unless this passes.
    pub fn validate(&self) -> Result<ValidLead, ValidationError> {
        let name = self.name.trim();
        let mobile = self.mobile.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        validate_mobile(mobile)?;
        Ok(ValidLead {
            name: name.to_string(),
            mobile: mobile.to_string(),
            is_agent: self.is_agent,
            project: self.project.clone(),
            unit: self.unit.clone(),
        })
    }
}

/// A form that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidLead {
    name: String,
    mobile: String,
    is_agent: bool,
    project: String,
    unit: String,
}

impl ValidLead {
    pub fn into_submission(self, client: ClientInfo) -> LeadSubmission {
        LeadSubmission {
            is_agent: self.is_agent,
            name: self.name,
            mobile: self.mobile,
            timezone: client.timezone,
            ip: client.ip,
            device_type: client.device,
            project: self.project,
            unit: self.unit,
        }
    }
}

/// What the browser tells us about the visitor
#[derive(Debug, Clone, PartialEq)]
pub struct ClientInfo {
    pub device: DeviceClass,
    pub timezone: String,
    /// Empty when the lookup failed
    pub ip: String,
}

/// Body of the `addlead` action
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadSubmission {
    #[serde(serialize_with = "yes_no")]
    pub is_agent: bool,
    pub name: String,
    pub mobile: String,
    pub timezone: String,
    pub ip: String,
    pub device_type: DeviceClass,
    pub project: String,
    pub unit: String,
}

fn yes_no<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(agent_label(*flag))
}

pub fn agent_label(is_agent: bool) -> &'static str {
    if is_agent { "Yes" } else { "No" }
}

/// Business result of a lead submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadOutcome {
    Saved,
    /// The endpoint accepted the call but refused the lead
    Blocked,
}

impl LeadOutcome {
    pub fn from_ack(ack: &WriteAck) -> Result<Self, ApiError> {
        if !ack.is_success() {
            return Err(ApiError::Rejected(ack.error_text()));
        }
        Ok(if ack.is_blocked() { LeadOutcome::Blocked } else { LeadOutcome::Saved })
    }

    /// Message the popup sends back to its opener.
    pub fn message(self, project: &str, unit: &str) -> WindowMessage {
        WindowMessage::LeadSaved {
            project: project.to_string(),
            unit: unit.to_string(),
            blocked: self == LeadOutcome::Blocked,
        }
    }
}

/// Status line of the lead popup
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PopupStatus {
    #[default]
    Idle,
    Invalid(ValidationError),
    Submitting,
    Saved,
    Blocked,
    /// Endpoint answered but did not save
    SaveFailed(String),
    /// Transport failure
    Error(String),
}

impl PopupStatus {
    pub fn from_result(result: &Result<LeadOutcome, ApiError>) -> Self {
        match result {
            Ok(LeadOutcome::Saved) => PopupStatus::Saved,
            Ok(LeadOutcome::Blocked) => PopupStatus::Blocked,
            Err(ApiError::Rejected(reason)) => PopupStatus::SaveFailed(reason.clone()),
            Err(err) => PopupStatus::Error(err.to_string()),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PopupStatus::Idle => "",
            PopupStatus::Invalid(_) => "Please provide valid Name and Mobile without \"+91\"",
            PopupStatus::Submitting => "Submitting…",
            PopupStatus::Saved => "Saved ✓",
            PopupStatus::Blocked => "Blocked",
            PopupStatus::SaveFailed(_) => "Save failed",
            PopupStatus::Error(_) => "Error",
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, PopupStatus::Submitting)
    }

    /// Toast raised in the popup for this status, if any.
    pub fn toast(&self) -> Option<(String, bool)> {
        match self {
            PopupStatus::Blocked => Some(("Blocked".to_string(), false)),
            PopupStatus::SaveFailed(reason) => Some((format!("Save failed: {}", reason), false)),
            PopupStatus::Error(err) => Some((err.clone(), false)),
            _ => None,
        }
    }

    /// Delay before the popup closes itself; `None` keeps it open for a retry.
    pub fn close_delay(&self, config: &ListingConfig) -> Option<Duration> {
        let ms = match self {
            PopupStatus::Saved => config.close_after_saved_ms,
            PopupStatus::Blocked => config.close_after_blocked_ms,
            _ => return None,
        };
        Some(Duration::from_millis(u64::from(ms)))
    }
}
