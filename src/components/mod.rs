//! UI Components
//!
//! Pages and the pieces they are built from.

mod toast_host;
mod sort_bar;
mod inventory_table;
mod download_actions;
mod inventory_page;
mod project_grid;
mod project_detail;
mod lead_form;

pub use toast_host::{BusyOverlay, ToastHost};
pub use sort_bar::SortBar;
pub use inventory_table::InventoryTable;
pub use download_actions::DownloadActions;
pub use inventory_page::InventoryPage;
pub use project_grid::ProjectGrid;
pub use project_detail::ProjectDetail;
pub use lead_form::LeadPage;
