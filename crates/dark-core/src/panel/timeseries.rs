use serde::Serialize;

use super::PanelCommon;
use crate::alert::Alert;
use crate::target::Target;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeries {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub legend: Vec<TimeSeriesLegendOption>,

    pub visualization: TimeSeriesVisualization,

    pub axis: TimeSeriesAxis,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub overrides: Vec<TimeSeriesOverride>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSeriesLegendOption {
    Hide,
    AsList,
    AsTable,
    ToTheRight,
    ToBottom,
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

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeriesVisualization {
    pub gradient_mode: GradientMode,

    pub tooltip: TooltipMode,

    pub stack: StackMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_size: Option<i64>,

    /// Only set for line-drawn series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_interpolation: Option<LineInterpolation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientMode {
    None,
    #[default]
    Opacity,
    Hue,
    Scheme,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TooltipMode {
    #[default]
    SingleSeries,
    AllSeries,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackMode {
    #[default]
    None,
    Normal,
    Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LineInterpolation {
    Smooth,
    Linear,
    StepBefore,
    StepAfter,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TimeSeriesAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub soft_max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<AxisDisplay>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<Scale>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDisplay {
    Hidden,
    Left,
    Right,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scale {
    Linear,
    Log2,
    Log10,
}

/// Field-level override applied to the series selected by `matcher`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeriesOverride {
    pub matcher: OverrideMatcher,

    pub properties: OverrideProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideMatcher {
    FieldName(String),
    QueryRef(String),
    Regex(String),
    #[serde(rename = "type")]
    FieldType(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OverrideProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<i64>,

    #[serde(skip_serializing_if = "crate::is_false")]
    pub negative_y: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_display: Option<AxisDisplay>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackMode>,
}

impl OverrideProperties {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
