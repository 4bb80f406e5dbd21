//! Inventory Table View Model
//!
//! What each rendered row shows for a given unlock state, the load status
//! line under the table, and where the download action goes.

use crate::models::InventoryRow;

/// Placeholder shown instead of a locked value.
pub const MASK: &str = "•••";

/// Column headers of the on-screen table, in [`TableRow::cells`] order plus the action column
pub const TABLE_HEADERS: [&str; 8] = [
    "Project Name",
    "Project Type",
    "Unit Number",
    "Size",
    "Budget",
    "Status",
    "PayPlan",
    "Action",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Plain(String),
    /// Hidden until the project is unlocked. Carries no data.
    Masked,
}

impl CellView {
    fn reveal(value: &str, unlocked: bool) -> Self {
        if unlocked {
            CellView::Plain(value.to_string())
        } else {
            CellView::Masked
        }
    }

    pub fn text(&self) -> &str {
        match self {
            CellView::Plain(s) => s,
            CellView::Masked => MASK,
        }
    }

    pub fn is_masked(&self) -> bool {
        matches!(self, CellView::Masked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    /// Opens the lead popup for this unit
    Reveal { project: String, unit: String },
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub project_name: String,
    pub property_type: String,
    pub unit: CellView,
    pub size: CellView,
    pub budget: CellView,
    pub status: String,
    pub payment_plan: String,
    pub action: RowAction,
}

impl TableRow {
    pub fn new(row: &InventoryRow, unlocked: bool) -> Self {
        let action = if unlocked {
            RowAction::Unlocked
        } else {
            RowAction::Reveal {
                project: row.project_name.clone(),
                unit: row.unit_number.clone(),
            }
        };
        Self {
            project_name: row.project_name.clone(),
            property_type: row.property_type.clone(),
            unit: CellView::reveal(&row.unit_number, unlocked),
            size: CellView::reveal(&row.size, unlocked),
            budget: CellView::reveal(&row.budget, unlocked),
            status: row.property_status.clone(),
            payment_plan: row.payment_plan.clone(),
            action,
        }
    }
}

impl TableRow {
    /// Data cells in column order; the action column is rendered separately.
    pub fn cells(&self) -> [CellView; 7] {
        [
            CellView::Plain(self.project_name.clone()),
            CellView::Plain(self.property_type.clone()),
            self.unit.clone(),
            self.size.clone(),
            self.budget.clone(),
            CellView::Plain(self.status.clone()),
            CellView::Plain(self.payment_plan.clone()),
        ]
    }
}

/// Rows in display order, masked or not.
pub fn build_table(rows: &[InventoryRow], unlocked: bool) -> Vec<TableRow> {
    rows.iter().map(|row| TableRow::new(row, unlocked)).collect()
}

/// State of the inventory area
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    NoProject,
    Loading,
    Refreshing,
    Ready,
    Empty,
    Failed,
    ProjectsFailed,
}

impl LoadStatus {
    /// Text shown in place of the rows, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            LoadStatus::NoProject => Some("Select a project."),
            LoadStatus::Loading => Some("Loading inventory…"),
            LoadStatus::Refreshing => Some("Refreshing…"),
            LoadStatus::Ready => None,
            LoadStatus::Empty => Some("No inventory for selected project."),
            LoadStatus::Failed => Some("Failed to load inventory. Click Refresh."),
            LoadStatus::ProjectsFailed => Some("Failed to load projects."),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading | LoadStatus::Refreshing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadPlacement {
    Hidden,
    HeaderButton,
    StickyBar,
}

impl DownloadPlacement {
    /// Downloads exist only for an unlocked project with rows on screen.
    pub fn resolve(unlocked: bool, status: LoadStatus, viewport_width: f64, breakpoint_px: u32) -> Self {
        if !unlocked || status != LoadStatus::Ready {
            DownloadPlacement::Hidden
        } else if viewport_width <= f64::from(breakpoint_px) {
            DownloadPlacement::StickyBar
        } else {
            DownloadPlacement::HeaderButton
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> InventoryRow {
        InventoryRow {
            project_name: "Skyline".into(),
            unit_number: "A-101".into(),
            property_type: "Apartment".into(),
            property_status: "Available".into(),
            size: "1200".into(),
            budget: "₹90L".into(),
            possession: "2026".into(),
            payment_plan: "CLP".into(),
        }
    }

    #[test]
    fn test_locked_row_masks_sensitive_cells() {
        let row = TableRow::new(&sample(), false);
        assert!(row.unit.is_masked() && row.size.is_masked() && row.budget.is_masked());
        assert_eq!(row.size.text(), MASK);
        assert_eq!(row.status, "Available");
        assert_eq!(
            row.action,
            RowAction::Reveal { project: "Skyline".into(), unit: "A-101".into() }
        );
        // The real values never leak into a masked cell.
        assert!(!format!("{:?}", row.budget).contains("90L"));
    }

    #[test]
    fn test_unlocked_row_shows_values() {
        let row = TableRow::new(&sample(), true);
        assert_eq!(row.unit.text(), "A-101");
        assert_eq!(row.size.text(), "1200");
        assert_eq!(row.budget.text(), "₹90L");
        assert_eq!(row.action, RowAction::Unlocked);
    }

    #[test]
    fn test_cells_lead_with_project_name() {
        let locked = TableRow::new(&sample(), false).cells();
        assert_eq!(locked.len() + 1, TABLE_HEADERS.len());
        assert_eq!(TABLE_HEADERS[0], "Project Name");
        assert_eq!(locked[0], CellView::Plain("Skyline".into()));
        assert!(locked[2].is_masked() && locked[3].is_masked() && locked[4].is_masked());

        let texts: Vec<String> = TableRow::new(&sample(), true)
            .cells()
            .iter()
            .map(|c| c.text().to_string())
            .collect();
        assert_eq!(texts, ["Skyline", "Apartment", "A-101", "1200", "₹90L", "Available", "CLP"]);
    }

    #[test]
    fn test_build_table_keeps_order() {
        let mut second = sample();
        second.unit_number = "B-2".into();
        let table = build_table(&[sample(), second], true);
        assert_eq!(table[1].unit.text(), "B-2");
    }

    #[test]
    fn test_download_placement() {
        use DownloadPlacement::*;
        assert_eq!(DownloadPlacement::resolve(false, LoadStatus::Ready, 1200.0, 640), Hidden);
        assert_eq!(DownloadPlacement::resolve(true, LoadStatus::Loading, 1200.0, 640), Hidden);
        assert_eq!(DownloadPlacement::resolve(true, LoadStatus::Ready, 1200.0, 640), HeaderButton);
        assert_eq!(DownloadPlacement::resolve(true, LoadStatus::Ready, 640.0, 640), StickyBar);
        assert_eq!(DownloadPlacement::resolve(true, LoadStatus::Ready, 375.0, 640), StickyBar);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(LoadStatus::Ready.message(), None);
        assert_eq!(LoadStatus::Failed.message(), Some("Failed to load inventory. Click Refresh."));
        assert!(LoadStatus::Refreshing.is_loading());
        assert!(!LoadStatus::Empty.is_loading());
    }
}
