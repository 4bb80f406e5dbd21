//! Pages and Links
//!
//! One bundle and one host file serve every page. Links carry the page in
//! `?page=`, so a plain static host needs nothing but `index.html`.

use crate::endpoint::with_query;

/// Host file every link points at
pub const HOST_PAGE: &str = "index.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Project,
    Inventory,
    Lead,
}

impl Page {
    fn from_name(name: &str) -> Self {
        match name.trim().trim_end_matches(".html").to_ascii_lowercase().as_str() {
            "project" => Page::Project,
            "inventory" => Page::Inventory,
            "lead" => Page::Lead,
            _ => Page::Home,
        }
    }

    /// Page named by the last path segment (`/site/lead.html`).
    pub fn from_path(path: &str) -> Self {
        Self::from_name(path.rsplit('/').next().unwrap_or_default())
    }

    /// `?page=` wins; without it the path decides, so hosts that still
    /// serve `lead.html` and friends keep working.
    pub fn resolve(page_param: Option<&str>, path: &str) -> Self {
        match page_param.filter(|p| !p.trim().is_empty()) {
            Some(name) => Self::from_name(name),
            None => Self::from_path(path),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Project => "project",
            Page::Inventory => "inventory",
            Page::Lead => "lead",
        }
    }
}

fn page_link(page: Page, pairs: &[(&str, &str)]) -> String {
    let mut query = vec![("page", page.name())];
    query.extend_from_slice(pairs);
    with_query(HOST_PAGE, &query)
}

pub fn home_link() -> &'static str {
    HOST_PAGE
}

pub fn project_link(name: &str) -> String {
    page_link(Page::Project, &[("name", name)])
}

pub fn inventory_link(project: &str) -> String {
    page_link(Page::Inventory, &[("project", project)])
}

pub fn lead_link(project: &str, unit: &str) -> String {
    page_link(Page::Lead, &[("project", project), ("unit", unit)])
}

/// Window name reused for every lead popup
pub const LEAD_WINDOW_NAME: &str = "lead_capture";

/// Fixed-size popup centred on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: u32,
    pub height: u32,
    pub left: i32,
    pub top: i32,
}

impl PopupGeometry {
    pub fn centered(screen_width: i32, screen_height: i32, width: u32, height: u32) -> Self {
        let left = (screen_width - width as i32) / 2;
        let top = (screen_height - height as i32) / 2;
        Self { width, height, left: left.max(0), top: top.max(0) }
    }

    /// `window.open` feature string.
    pub fn features(&self) -> String {
        format!("width={},height={},left={},top={}", self.width, self.height, self.left, self.top)
    }
}
