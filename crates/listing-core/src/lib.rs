//! Listing Core
//!
//! Browser-independent logic of the listing front end:
//! - endpoint: request shapes for the spreadsheet endpoint
//! - transport: retrying client over a pluggable transport, busy tracking
//! - sort / cache: inventory ordering and the per-project row cache
//! - unlock / lead: the lead-capture handshake and the session unlock latch
//! - table / export: what the inventory table and its print export show

pub mod cache;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod export;
pub mod lead;
pub mod models;
pub mod route;
pub mod sort;
pub mod table;
pub mod transport;
pub mod unlock;

pub use config::ListingConfig;
pub use error::{ApiError, AppError, Result, ValidationError};
pub use models::{InventoryRow, Project, Record, WriteAck};
