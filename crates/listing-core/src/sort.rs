//! Inventory Sorting
//!
//! Size then unit, as two independent full stable sorts. The unit pass, when
//! selected, decides the final order and only keeps size order among equal units.
//! This is how the listing has always behaved; a conventional (size, unit)
//! composite key would give different results.

use std::cmp::Ordering;

use crate::models::InventoryRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse a select value (`"asc"` / `"desc"`); anything else means "no sort".
    pub fn from_select(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_select(direction: Option<Self>) -> &'static str {
        match direction {
            Some(SortDirection::Asc) => "asc",
            Some(SortDirection::Desc) => "desc",
            None => "",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub size: Option<SortDirection>,
    pub unit: Option<SortDirection>,
}

impl SortSpec {
    pub fn is_none(&self) -> bool {
        self.size.is_none() && self.unit.is_none()
    }
}

/// Numeric value of a size/budget cell.
///
/// Currency symbols and separators are stripped, every remaining non-numeric
/// character is dropped, and the longest leading decimal is parsed.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    leading_decimal(&cleaned)
}

fn leading_decimal(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if frac_end > frac_start || digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

fn compare_size(a: Option<f64>, b: Option<f64>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        // Unparsable sizes stay last in both directions.
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => direction.apply(x.partial_cmp(&y).unwrap_or(Ordering::Equal)),
    }
}

/// Ordered copy of `rows`; the input is left untouched.
pub fn apply_sort(rows: &[InventoryRow], spec: SortSpec) -> Vec<InventoryRow> {
    let mut out = rows.to_vec();
    if let Some(direction) = spec.size {
        out.sort_by(|a, b| compare_size(parse_numeric(&a.size), parse_numeric(&b.size), direction));
    }
    if let Some(direction) = spec.unit {
        out.sort_by(|a, b| {
            direction.apply(a.unit_number.to_lowercase().cmp(&b.unit_number.to_lowercase()))
        });
    }
    out
}
