//! Dashboard-level model: settings, rows, annotations and links

use serde::Serialize;

use crate::is_false;
use crate::panel::Panel;
use crate::variable::Variable;

/// Name of the row synthesized for panels that precede the first row marker
pub const DEFAULT_ROW_NAME: &str = "Overview";

/// A fully decoded dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardModel {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    pub editable: bool,

    pub shared_crosshair: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_refresh: Option<String>,

    /// `[from, to]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<[String; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags_annotations: Vec<TagAnnotation>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variables: Vec<Variable>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_links: Vec<ExternalLink>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dashboard_links: Vec<DashboardInternalLink>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rows: Vec<Row>,
}

impl DashboardModel {
    /// Iterate over every panel of every row, in display order
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.rows.iter().flat_map(|row| row.panels.iter())
    }
}

/// A horizontal group of panels
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    pub name: String,

    /// Template variable the row is repeated for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_for: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub collapse: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub panels: Vec<Panel>,
}

impl Row {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The implicit row collecting panels declared before any row marker
    pub fn overview() -> Self {
        Self::new(DEFAULT_ROW_NAME)
    }
}

/// Annotation driven by event tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagAnnotation {
    pub name: String,

    /// Empty when the export does not name a datasource
    pub datasource: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub icon_color: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Link to other dashboards, selected by tag
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardInternalLink {
    pub title: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub as_dropdown: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub open_in_new_tab: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_time_range: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_variable_values: bool,
}

/// Link to an arbitrary URL, shown in the dashboard header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    pub title: String,

    pub url: String,

    /// Tooltip text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub open_in_new_tab: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_time_range: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_variable_values: bool,
}

/// Link attached to a single panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PanelLink {
    pub title: String,

    pub url: String,

    #[serde(skip_serializing_if = "is_false")]
    pub open_in_new_tab: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_time_range: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub include_variable_values: bool,
}
