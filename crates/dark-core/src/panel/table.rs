use serde::Serialize;

use super::PanelCommon;
use crate::target::Target;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    /// Column name patterns hidden from the table
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hidden_columns: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub time_series_aggregations: Vec<TableAggregation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableAggregation {
    pub label: String,

    /// `avg`, `current`, `max`, ...
    #[serde(rename = "type")]
    pub kind: String,
}
