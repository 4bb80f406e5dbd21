//! Row Cache
//!
//! Last-fetched inventory rows of the active project, plus the token guard
//! that drops responses for a selection the user already moved away from.

use std::cell::Cell;
use std::rc::Rc;

use crate::models::InventoryRow;
use crate::sort::{apply_sort, SortSpec};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowCache {
    project: String,
    rows: Vec<InventoryRow>,
}

impl RowCache {
    /// Replace the cached rows wholesale.
    pub fn set_rows(&mut self, project: &str, rows: Vec<InventoryRow>) {
        self.project = project.to_string();
        self.rows = rows;
    }

    pub fn clear(&mut self) {
        self.project.clear();
        self.rows.clear();
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn rows(&self) -> &[InventoryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sorted view of the cache; the cache itself keeps fetch order.
    pub fn apply_sort(&self, spec: SortSpec) -> Vec<InventoryRow> {
        apply_sort(&self.rows, spec)
    }
}

/// Ticket handed out per inventory request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Issues tickets and tells whether one is still the newest.
///
/// Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct LatestRequest {
    latest: Rc<Cell<u64>>,
}

impl LatestRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request; every earlier ticket becomes stale.
    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }
}
