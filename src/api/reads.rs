//! Read Calls
//!
//! `GET ?type=...` reads: projects, inventory and the warm-up ping.

use listing_core::endpoint::ReadQuery;
use listing_core::{ApiError, InventoryRow, Project};

use super::Client;

// ========================
// Project Commands
// ========================

/// All projects, rows without a name dropped
pub async fn list_projects(client: &Client) -> Result<Vec<Project>, ApiError> {
    let records = client.get_records(&ReadQuery::Projects).await?;
    let projects: Vec<Project> = records
        .iter()
        .map(Project::from_record)
        .filter(|p| !p.project_name.is_empty())
        .collect();
    log::debug!("[API] loaded {} projects", projects.len());
    Ok(projects)
}

// ========================
// Inventory Commands
// ========================

pub async fn list_inventory(client: &Client, project: &str) -> Result<Vec<InventoryRow>, ApiError> {
    let records = client.get_records(&ReadQuery::inventory_for(project)).await?;
    Ok(records.iter().map(InventoryRow::from_record).collect())
}

/// Wakes the endpoint up; the answer is not used. Retries like any read.
pub async fn ping(client: &Client) {
    if let Err(err) = client.get(&ReadQuery::Ping).await {
        log::debug!("[API] ping failed: {}", err);
    }
}
