use serde::Serialize;

use super::{Orientation, PanelCommon, ReduceCalc, ThresholdMode, ThresholdStep};
use crate::is_false;
use crate::target::Target;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stat {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,

    #[serde(skip_serializing_if = "is_false")]
    pub sparkline: bool,

    pub orientation: Orientation,

    pub text: TextMode,

    pub value_type: ReduceCalc,

    pub color_mode: ColorMode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_font_size: Option<i64>,

    pub threshold_mode: ThresholdMode,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<ThresholdStep>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,

    pub orientation: Orientation,

    pub value_type: ReduceCalc,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_font_size: Option<i64>,

    pub threshold_mode: ThresholdMode,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub thresholds: Vec<ThresholdStep>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMode {
    #[default]
    Auto,
    Value,
    Name,
    ValueAndName,
    None,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    Background,
    #[default]
    Value,
}
