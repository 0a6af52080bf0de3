use serde::Serialize;

use super::PanelCommon;
use crate::target::Target;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Logs {
    #[serde(flatten)]
    pub common: PanelCommon,

    /// Always Loki targets
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<Target>,

    pub visualization: LogsVisualization,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogsVisualization {
    pub time: bool,

    pub unique_labels: bool,

    pub common_labels: bool,

    pub wrap_lines: bool,

    pub prettify_json: bool,

    pub hide_log_details: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<LogsOrder>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deduplication: Option<LogsDeduplication>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogsOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogsDeduplication {
    None,
    Exact,
    Numbers,
    Signature,
}
