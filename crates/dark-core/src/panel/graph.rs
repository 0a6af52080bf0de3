use serde::Serialize;

use super::PanelCommon;
use crate::alert::Alert;
use crate::target::Target;

/// Legacy graph panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    pub axes: GraphAxes,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<GraphLegendOption>,

    pub visualization: GraphVisualization,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphAxes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<GraphAxis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<GraphAxis>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<GraphAxis>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphAxis {
    pub hidden: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Only set when the export carries an explicit bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_base: Option<u32>,
}

/// Legend flags, emitted in a fixed order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphLegendOption {
    Hide,
    AsTable,
    ToTheRight,
    Min,
    Max,
    Avg,
    Current,
    Total,
    NoNullSeries,
    NoZeroSeries,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphVisualization {
    /// `null`, `connected` or `null as zero`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub null_value: Option<String>,

    #[serde(skip_serializing_if = "crate::is_false")]
    pub staircase: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<SeriesOverride>,
}

/// Per-series display override, matched by alias
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesOverride {
    pub alias: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dashes: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<i64>,
}
