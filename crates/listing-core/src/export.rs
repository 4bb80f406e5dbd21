//! Print Export
//!
//! Turns the rows currently on screen into a standalone print document.

use crate::table::TableRow;

pub const EXPORT_HEADERS: [&str; 6] = ["Project Type", "Unit Number", "Size", "Budget", "Status", "PayPlan"];

const PRINT_STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 16px; }
h2 { margin: 0 0 12px; }
table { width: 100%; border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 8px; font-size: 12px; text-align: left; }
thead th { background: #f2f2f2; }
@media print { @page { size: A4 landscape; margin: 12mm; } button { display:none; } }";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub project: String,
    pub rows: Vec<[String; 6]>,
}

impl ExportDocument {
    pub fn from_table(project: &str, rows: &[TableRow]) -> Self {
        let project = if project.is_empty() { "Project" } else { project };
        let rows = rows
            .iter()
            .map(|r| {
                [
                    r.property_type.clone(),
                    r.unit.text().to_string(),
                    r.size.text().to_string(),
                    r.budget.text().to_string(),
                    r.status.clone(),
                    r.payment_plan.clone(),
                ]
            })
            .collect();
        Self { project: project.to_string(), rows }
    }

    pub fn title(&self) -> String {
        format!("{} Inventory", self.project)
    }

    /// Inner markup of `<html>` (head and body).
    pub fn to_html(&self) -> String {
        let head: String = EXPORT_HEADERS.iter().map(|h| format!("<th>{}</th>", h)).collect();
        let body: String = self
            .rows
            .iter()
            .map(|row| {
                let cells: String = row.iter().map(|c| format!("<td>{}</td>", escape_html(c))).collect();
                format!("<tr>{}</tr>", cells)
            })
            .collect();
        let project = escape_html(&self.project);
        format!(
            "<head><meta charset=\"utf-8\"/><title>{project} Inventory</title><style>{style}</style></head>\
             <body><h2>{project} - Inventory</h2>\
             <table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>\
             <button onclick=\"window.print()\">Print / Save as PDF</button></body>",
            project = project,
            style = PRINT_STYLE,
            head = head,
            body = body,
        )
    }
}
