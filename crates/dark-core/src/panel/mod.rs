//! Panels - one closed variant per supported visualization
//!
//! Every variant flattens the same [`PanelCommon`] block and adds its own
//! kind-specific settings.

use serde::Serialize;

use crate::dashboard::PanelLink;
use crate::is_false;

mod graph;
mod heatmap;
mod logs;
mod single_stat;
mod stat;
mod table;
mod text;
mod timeseries;

pub use graph::{Graph, GraphAxes, GraphAxis, GraphLegendOption, GraphVisualization, SeriesOverride};
pub use heatmap::{Heatmap, HeatmapDataFormat, HeatmapTooltip, HeatmapYAxis};
pub use logs::{Logs, LogsDeduplication, LogsOrder, LogsVisualization};
pub use single_stat::{RangeMap, SingleStat, SingleStatColor, SparkLineMode};
pub use stat::{ColorMode, Gauge, Stat, TextMode};
pub use table::{Table, TableAggregation};
pub use text::Text;
pub use timeseries::{
    AxisDisplay, GradientMode, LineInterpolation, OverrideMatcher, OverrideProperties, Scale,
    StackMode, TimeSeries, TimeSeriesAxis, TimeSeriesLegendOption, TimeSeriesOverride,
    TimeSeriesVisualization, TooltipMode,
};

/// A single visualization unit on a dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Graph(Graph),
    Heatmap(Heatmap),
    SingleStat(SingleStat),
    Stat(Stat),
    Gauge(Gauge),
    Table(Table),
    Text(Text),
    Logs(Logs),
    #[serde(rename = "timeseries")]
    TimeSeries(TimeSeries),
}

impl Panel {
    /// Settings shared by every panel kind
    pub fn common(&self) -> &PanelCommon {
        match self {
            Self::Graph(p) => &p.common,
            Self::Heatmap(p) => &p.common,
            Self::SingleStat(p) => &p.common,
            Self::Stat(p) => &p.common,
            Self::Gauge(p) => &p.common,
            Self::Table(p) => &p.common,
            Self::Text(p) => &p.common,
            Self::Logs(p) => &p.common,
            Self::TimeSeries(p) => &p.common,
        }
    }

    pub fn title(&self) -> &str {
        &self.common().title
    }

    /// Grafana's name for this panel kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Graph(_) => "graph",
            Self::Heatmap(_) => "heatmap",
            Self::SingleStat(_) => "singlestat",
            Self::Stat(_) => "stat",
            Self::Gauge(_) => "gauge",
            Self::Table(_) => "table",
            Self::Text(_) => "text",
            Self::Logs(_) => "logs",
            Self::TimeSeries(_) => "timeseries",
        }
    }
}

/// Attributes every panel kind carries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PanelCommon {
    pub title: String,

    /// Width on the legacy 12-column grid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    #[serde(skip_serializing_if = "is_false")]
    pub transparent: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub datasource: Option<String>,

    /// Template variable the panel is repeated for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeat_direction: Option<RepeatDirection>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<PanelLink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatDirection {
    Horizontal,
    Vertical,
}

/// Reduction applied to a series to obtain a single value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReduceCalc {
    First,
    FirstNonNull,
    Last,
    LastNonNull,
    Min,
    Max,
    Avg,
    Count,
    Total,
    Range,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Auto,
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    #[default]
    Absolute,
    Relative,
}

/// One color band; steps are kept in input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdStep {
    pub color: String,

    /// The base step has no lower boundary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}
