//! Legacy panel alert rules

use serde::Serialize;
use std::collections::BTreeMap;

/// Alert rule attached to a graph or time series panel
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Alert {
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Evaluation interval, e.g. `1m`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluate_every: Option<String>,

    /// Pending duration before the alert fires
    #[serde(rename = "for", skip_serializing_if = "Option::is_none")]
    pub for_duration: Option<String>,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_no_data: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub on_execution_error: Option<String>,

    /// Notification channel UIDs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<String>,

    #[serde(rename = "if", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<AlertCondition>,
}

/// One clause of an alert rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertCondition {
    /// `and` / `or`
    pub operand: String,

    pub value: AlertValue,

    pub threshold: AlertThreshold,
}

/// Reducer applied to a query over a time range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlertValue {
    pub func: String,

    #[serde(rename = "ref")]
    pub query_ref: String,

    pub from: String,

    pub to: String,
}

/// Threshold a reduced value is compared against
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertThreshold {
    HasNoValue,
    Below(f64),
    Above(f64),
    OutsideRange([f64; 2]),
    WithinRange([f64; 2]),
}
