use serde::Serialize;

use super::PanelCommon;
use crate::is_false;
use crate::target::Target;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Heatmap {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_format: Option<HeatmapDataFormat>,

    #[serde(skip_serializing_if = "is_false")]
    pub hide_zero_buckets: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub highlight_cards: bool,

    #[serde(skip_serializing_if = "is_false")]
    pub reverse_y_buckets: bool,

    pub tooltip: HeatmapTooltip,

    pub y_axis: HeatmapYAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeatmapDataFormat {
    TimeSeriesBuckets,
    TimeSeries,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeatmapTooltip {
    pub show: bool,

    pub show_histogram: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HeatmapYAxis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}
