//! Endpoint Requests
//!
//! The spreadsheet endpoint takes `GET ?type=...` reads and `POST ?action=...`
//! writes. POST bodies are JSON carried as `text/plain` so the browser skips
//! the CORS pre-flight.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::error::ApiError;
use crate::lead::LeadSubmission;
use crate::models::{InventoryKey, InventoryRow, Project, Record};

/// Characters `encodeURIComponent` leaves alone.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const TEXT_CONTENT_TYPE: &str = "text/plain;charset=utf-8";

pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// `base` plus `key=value` pairs, percent-encoded.
pub fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    let query = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        return base.to_string();
    }
    let sep = if base.contains('?') { '&' } else { '?' };
    format!("{}{}{}", base, sep, query)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A fully built request, ready for a [`crate::transport::Transport`]
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// JSON text, sent as `text/plain`
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self { method: Method::Get, url: url.into(), body: None }
    }
}

/// Read shapes (`?type=`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadQuery {
    Projects,
    /// All inventory, or one project's
    Inventory { project: Option<String> },
    /// Credential rows. Listed for completeness; nothing in the front end compares them.
    Admins,
    Ping,
}

impl ReadQuery {
    pub fn inventory_for(project: &str) -> Self {
        ReadQuery::Inventory { project: Some(project.to_string()) }
    }

    fn type_name(&self) -> &'static str {
        match self {
            ReadQuery::Projects => "projects",
            ReadQuery::Inventory { .. } => "inventory",
            ReadQuery::Admins => "admins",
            ReadQuery::Ping => "ping",
        }
    }

    fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![("type", self.type_name())];
        if let ReadQuery::Inventory { project: Some(project) } = self {
            pairs.push(("project", project.as_str()));
        }
        pairs
    }
}

/// Write actions (`?action=`) with their bodies
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WriteAction {
    AddProject(Project),
    AddInventory(InventoryRow),
    BulkAddInventory {
        rows: Vec<Record>,
    },
    UpdateProject {
        id: String,
        fields: Record,
    },
    DeleteProject {
        id: String,
    },
    UpdateInventory {
        #[serde(rename = "match")]
        key: InventoryKey,
        fields: Record,
    },
    DeleteInventory {
        #[serde(rename = "match")]
        key: InventoryKey,
    },
    AddLead(LeadSubmission),
}

impl WriteAction {
    pub fn name(&self) -> &'static str {
        match self {
            WriteAction::AddProject(_) => "addproject",
            WriteAction::AddInventory(_) => "addinventory",
            WriteAction::BulkAddInventory { .. } => "bulkaddinventory",
            WriteAction::UpdateProject { .. } => "updateproject",
            WriteAction::DeleteProject { .. } => "deleteproject",
            WriteAction::UpdateInventory { .. } => "updateinventory",
            WriteAction::DeleteInventory { .. } => "deleteinventory",
            WriteAction::AddLead(_) => "addlead",
        }
    }
}

/// The single base URL every request goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    base: String,
}

impl Endpoint {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn read(&self, query: &ReadQuery) -> HttpRequest {
        HttpRequest::get(with_query(&self.base, &query.pairs()))
    }

    pub fn write(&self, action: &WriteAction) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(action).map_err(|e| ApiError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: Method::Post,
            url: with_query(&self.base, &[("action", action.name())]),
            body: Some(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{ClientInfo, DeviceClass, LeadForm};
    use serde_json::{json, Value};

    const BASE: &str = "https://example.test/exec";

    fn body_json(request: &HttpRequest) -> Value {
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn test_encode_component_matches_browser() {
        assert_eq!(encode_component("Sky Line & Co"), "Sky%20Line%20%26%20Co");
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_component("₹"), "%E2%82%B9");
    }

    #[test]
    fn test_read_requests() {
        let endpoint = Endpoint::new(BASE);
        assert_eq!(endpoint.read(&ReadQuery::Projects).url, format!("{}?type=projects", BASE));
        assert_eq!(endpoint.read(&ReadQuery::Ping).url, format!("{}?type=ping", BASE));
        assert_eq!(endpoint.read(&ReadQuery::Admins).url, format!("{}?type=admins", BASE));
        assert_eq!(
            endpoint.read(&ReadQuery::inventory_for("Green Vale")).url,
            format!("{}?type=inventory&project=Green%20Vale", BASE)
        );
        let all = endpoint.read(&ReadQuery::Inventory { project: None });
        assert_eq!(all.url, format!("{}?type=inventory", BASE));
        assert_eq!(all.method, Method::Get);
        assert!(all.body.is_none());
    }

    #[test]
    fn test_base_with_existing_query() {
        assert_eq!(with_query("https://x.test/exec?v=2", &[("type", "ping")]), "https://x.test/exec?v=2&type=ping");
        assert_eq!(with_query(BASE, &[]), BASE);
    }

    #[test]
    fn test_write_inventory_update_uses_natural_key() {
        let mut fields = Record::new();
        fields.insert("Size".into(), json!("1400"));
        let action = WriteAction::UpdateInventory {
            key: InventoryKey { project_name: "Skyline".into(), unit_number: "A-1".into() },
            fields,
        };
        let request = Endpoint::new(BASE).write(&action).unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{}?action=updateinventory", BASE));
        assert_eq!(
            body_json(&request),
            json!({"match": {"Project Name": "Skyline", "Unit Number": "A-1"}, "fields": {"Size": "1400"}})
        );
    }

    #[test]
    fn test_write_bodies() {
        let endpoint = Endpoint::new(BASE);

        let delete = endpoint.write(&WriteAction::DeleteProject { id: "Skyline".into() }).unwrap();
        assert_eq!(body_json(&delete), json!({"id": "Skyline"}));

        let bulk = endpoint.write(&WriteAction::BulkAddInventory { rows: vec![Record::new()] }).unwrap();
        assert_eq!(bulk.url, format!("{}?action=bulkaddinventory", BASE));
        assert_eq!(body_json(&bulk), json!({"rows": [{}]}));

        let project = Project { project_name: "Skyline".into(), photo_urls: vec!["p1".into()], ..Default::default() };
        let add = endpoint.write(&WriteAction::AddProject(project)).unwrap();
        let body = body_json(&add);
        assert_eq!(body["projectName"], "Skyline");
        assert_eq!(body["photoUrls"], json!(["p1"]));
        assert!(body.get("brochureURL").is_some());
    }

    #[test]
    fn test_add_lead_request() {
        let submission = LeadForm {
            name: "Asha".into(),
            mobile: "9876543210".into(),
            is_agent: false,
            project: "Skyline".into(),
            unit: "A-1".into(),
        }
        .validate()
        .unwrap()
        .into_submission(ClientInfo { device: DeviceClass::Desktop, timezone: "UTC".into(), ip: "1.2.3.4".into() });
        let request = Endpoint::new(BASE).write(&WriteAction::AddLead(submission)).unwrap();
        assert_eq!(request.url, format!("{}?action=addlead", BASE));
        let body = body_json(&request);
        assert_eq!(body["isAgent"], "No");
        assert_eq!(body["deviceType"], "Desktop");
        assert_eq!(body["ip"], "1.2.3.4");
    }
}
