//! Listing Models
//!
//! Spreadsheet records as delivered by the endpoint, and the typed rows read from them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// One spreadsheet row keyed by header text.
pub type Record = Map<String, Value>;

/// First non-empty value among `keys`, stringified.
///
/// Sheet cells arrive as strings, numbers or booleans depending on the column format.
pub fn field(record: &Record, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .map(cell_text)
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Inventory row (one unit of one project)
///
/// Serializes with the camelCase keys the endpoint expects for `addinventory`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub project_name: String,
    pub unit_number: String,
    pub property_type: String,
    pub property_status: String,
    pub size: String,
    pub budget: String,
    pub possession: String,
    pub payment_plan: String,
}

impl InventoryRow {
    pub fn from_record(record: &Record) -> Self {
        Self {
            project_name: field(record, &["Project Name"]),
            unit_number: field(record, &["Unit Number", "Unit No", "Unit"]),
            property_type: field(record, &["Property Type", "Project Type"]),
            property_status: field(record, &["Property Status", "Status"]),
            size: field(record, &["Size", "Unit Size"]),
            budget: field(record, &["Budget", "Price"]),
            possession: field(record, &["Possession"]),
            payment_plan: field(record, &["Payment Plan", "Pay Plan"]),
        }
    }

    /// Natural key used by `updateinventory` / `deleteinventory`.
    pub fn key(&self) -> InventoryKey {
        InventoryKey {
            project_name: self.project_name.clone(),
            unit_number: self.unit_number.clone(),
        }
    }
}

/// (project name, unit number) pair identifying an inventory row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryKey {
    #[serde(rename = "Project Name")]
    pub project_name: String,
    #[serde(rename = "Unit Number")]
    pub unit_number: String,
}

/// Project as shown on the home grid and the project page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub project_name: String,
    pub location: String,
    pub product_mix: String,
    pub budget_range: String,
    pub description: String,
    #[serde(rename = "brochureURL")]
    pub brochure_url: String,
    #[serde(rename = "videoURL")]
    pub video_url: String,
    pub photo_urls: Vec<String>,
}

impl Project {
    pub fn from_record(record: &Record) -> Self {
        let photo_urls = ["Photo URL 1", "Photo URL 2", "Photo URL 3", "Photo URL 4"]
            .iter()
            .map(|key| field(record, &[key]))
            .filter(|url| !url.is_empty())
            .collect();
        Self {
            project_name: field(record, &["Project Name"]),
            location: field(record, &["Location"]),
            product_mix: field(record, &["Product Mix"]),
            budget_range: field(record, &["Budget Range"]),
            description: field(record, &["Description"]),
            brochure_url: field(record, &["Brochure URL"]),
            video_url: field(record, &["Video URL"]),
            photo_urls,
        }
        .with_cover_fallback(field(record, &["Photo"]))
    }

    fn with_cover_fallback(mut self, photo: String) -> Self {
        if self.photo_urls.is_empty() && !photo.is_empty() {
            self.photo_urls.push(photo);
        }
        self
    }

    /// Tile image for the home grid.
    pub fn cover_url(&self) -> &str {
        self.photo_urls
            .first()
            .map(String::as_str)
            .unwrap_or(PLACEHOLDER_PHOTO)
    }
}

pub const PLACEHOLDER_PHOTO: &str = "https://picsum.photos/seed/realestate/600/400";

/// Pick a project by name, falling back to the first one.
pub fn find_project<'a>(projects: &'a [Project], name: &str) -> Option<&'a Project> {
    projects
        .iter()
        .find(|p| p.project_name == name)
        .or_else(|| projects.first())
}

/// What the project page shows for one `?name=`
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProjectLookup {
    #[default]
    Loading,
    Found(Project),
    /// The list loaded but holds no project at all
    NotFound,
    /// The list did not load; the page offers a retry
    Failed,
}

impl ProjectLookup {
    pub fn from_result(result: &Result<Vec<Project>, ApiError>, name: &str) -> Self {
        match result {
            Ok(projects) => find_project(projects, name)
                .cloned()
                .map(ProjectLookup::Found)
                .unwrap_or(ProjectLookup::NotFound),
            Err(_) => ProjectLookup::Failed,
        }
    }

    pub fn message(&self) -> Option<&'static str> {
        match self {
            ProjectLookup::Loading => Some("Loading…"),
            ProjectLookup::Found(_) => None,
            ProjectLookup::NotFound => Some("Project not found."),
            ProjectLookup::Failed => Some("Failed to load."),
        }
    }

    pub fn can_retry(&self) -> bool {
        matches!(self, ProjectLookup::Failed)
    }
}

/// Acknowledgement body of every POST action
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WriteAck {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<Value>,
    /// Only `addlead` sets this
    #[serde(default)]
    pub blocked: Option<bool>,
}

impl WriteAck {
    /// `success: true`, or no `error` at all.
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || (self.error.is_none() && self.success != Some(false))
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked == Some(true)
    }

    pub fn error_text(&self) -> String {
        match &self.error {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "request failed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_inventory_row_reads_aliases() {
        let row = InventoryRow::from_record(&record(json!({
            "Project Name": "Skyline",
            "Unit No": "A-101",
            "Project Type": "Apartment",
            "Status": "Available",
            "Unit Size": 1200,
            "Price": "₹1,20,00,000",
            "Pay Plan": "CLP"
        })));
        assert_eq!(row.project_name, "Skyline");
        assert_eq!(row.unit_number, "A-101");
        assert_eq!(row.property_type, "Apartment");
        assert_eq!(row.property_status, "Available");
        assert_eq!(row.size, "1200");
        assert_eq!(row.budget, "₹1,20,00,000");
        assert_eq!(row.payment_plan, "CLP");
        assert_eq!(row.possession, "");
    }

    #[test]
    fn test_empty_primary_key_falls_through_to_alias() {
        let row = InventoryRow::from_record(&record(json!({
            "Unit Number": "",
            "Unit": "B-7",
            "Size": null
        })));
        assert_eq!(row.unit_number, "B-7");
        assert_eq!(row.size, "");
    }

    #[test]
    fn test_inventory_row_serializes_write_keys() {
        let row = InventoryRow {
            project_name: "Skyline".into(),
            unit_number: "A-1".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["projectName"], "Skyline");
        assert_eq!(value["unitNumber"], "A-1");
        assert!(value.get("paymentPlan").is_some());
    }

    #[test]
    fn test_project_photos_and_fallback() {
        let project = Project::from_record(&record(json!({
            "Project Name": "Skyline",
            "Photo URL 1": "",
            "Photo URL 2": "https://img/2.jpg",
            "Photo URL 4": "https://img/4.jpg"
        })));
        assert_eq!(project.photo_urls, vec!["https://img/2.jpg", "https://img/4.jpg"]);
        assert_eq!(project.cover_url(), "https://img/2.jpg");

        let bare = Project::from_record(&record(json!({"Project Name": "Bare"})));
        assert_eq!(bare.cover_url(), PLACEHOLDER_PHOTO);

        let legacy = Project::from_record(&record(json!({"Photo": "https://img/p.jpg"})));
        assert_eq!(legacy.cover_url(), "https://img/p.jpg");
    }

    #[test]
    fn test_find_project_falls_back_to_first() {
        let projects = vec![
            Project { project_name: "A".into(), ..Default::default() },
            Project { project_name: "B".into(), ..Default::default() },
        ];
        assert_eq!(find_project(&projects, "B").unwrap().project_name, "B");
        assert_eq!(find_project(&projects, "Z").unwrap().project_name, "A");
        assert!(find_project(&[], "A").is_none());
    }

    #[test]
    fn test_project_lookup_failure_is_retryable() {
        let failed = ProjectLookup::from_result(&Err(ApiError::Timeout), "A");
        assert_eq!(failed, ProjectLookup::Failed);
        assert_eq!(failed.message(), Some("Failed to load."));
        assert!(failed.can_retry());

        let empty = ProjectLookup::from_result(&Ok(Vec::new()), "A");
        assert_eq!(empty, ProjectLookup::NotFound);
        assert_eq!(empty.message(), Some("Project not found."));
        assert!(!empty.can_retry());
    }

    #[test]
    fn test_project_lookup_found_falls_back_to_first() {
        let projects = vec![
            Project { project_name: "A".into(), ..Default::default() },
            Project { project_name: "B".into(), ..Default::default() },
        ];
        let found = ProjectLookup::from_result(&Ok(projects.clone()), "B");
        assert_eq!(found, ProjectLookup::Found(projects[1].clone()));
        assert_eq!(found.message(), None);
        let fallback = ProjectLookup::from_result(&Ok(projects.clone()), "missing");
        assert_eq!(fallback, ProjectLookup::Found(projects[0].clone()));
        assert_eq!(ProjectLookup::default().message(), Some("Loading…"));
    }

    #[test]
    fn test_write_ack_success_rules() {
        let ack: WriteAck = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(ack.is_success());
        let ack: WriteAck = serde_json::from_str(r#"{"ok":1}"#).unwrap();
        assert!(ack.is_success());
        let ack: WriteAck = serde_json::from_str(r#"{"error":"sheet locked"}"#).unwrap();
        assert!(!ack.is_success());
        assert_eq!(ack.error_text(), "sheet locked");
        let ack: WriteAck = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(!ack.is_success());
        let ack: WriteAck = serde_json::from_str(r#"{"success":true,"blocked":true}"#).unwrap();
        assert!(ack.is_success() && ack.is_blocked());
    }
}
