//! Lead Calls

use listing_core::endpoint::{HttpRequest, WriteAction};
use listing_core::lead::{LeadOutcome, LeadSubmission};
use listing_core::ApiError;
use serde_json::Value;

use super::Client;

/// Post a lead. `Blocked` is an answer, not an error.
pub async fn submit_lead(client: &Client, submission: LeadSubmission) -> Result<LeadOutcome, ApiError> {
    log::info!("[LEAD] submitting lead for {} / {}", submission.project, submission.unit);
    let ack = client.post(&WriteAction::AddLead(submission)).await?;
    LeadOutcome::from_ack(&ack)
}

/// Best-effort public IP; empty on any failure.
pub async fn public_ip(client: &Client, lookup_url: &str) -> String {
    match client.execute_with_retries(&HttpRequest::get(lookup_url), 0).await {
        Ok(value) => value.get("ip").and_then(Value::as_str).unwrap_or_default().to_string(),
        Err(err) => {
            log::debug!("[LEAD] ip lookup failed: {}", err);
            String::new()
        }
    }
}
