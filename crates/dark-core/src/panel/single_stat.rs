use serde::Serialize;

use super::PanelCommon;
use crate::target::Target;

/// Legacy single value panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SingleStat {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<i64>,

    /// Reduction name, passed through as exported (`avg`, `current`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_font_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_font_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postfix_font_size: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sparkline: Option<SparkLineMode>,

    /// Which elements are colored by threshold
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub color: Vec<SingleStatColor>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thresholds: Option<[String; 2]>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<[String; 3]>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranges_to_text: Vec<RangeMap>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SparkLineMode {
    Full,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SingleStatColor {
    Background,
    Value,
}

/// Text displayed when the value falls in `[from, to]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RangeMap {
    pub from: String,
    pub to: String,
    pub text: String,
}
