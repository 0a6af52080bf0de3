//! Legacy panel alert decoder

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

use dark_core::alert::{Alert, AlertCondition, AlertThreshold, AlertValue};

use crate::error::{ConversionWarning, Diagnostics, WarningCategory, warnings};
use crate::input::{decode_item, non_empty, null_as_default};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAlert {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    message: Option<String>,
    frequency: Option<String>,
    #[serde(rename = "for")]
    for_duration: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    alert_rule_tags: BTreeMap<String, String>,
    no_data_state: Option<String>,
    execution_error_state: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    notifications: Vec<RawNotification>,
    #[serde(deserialize_with = "null_as_default")]
    conditions: Vec<RawCondition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNotification {
    #[serde(deserialize_with = "null_as_default")]
    uid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCondition {
    operator: RawTyped,
    reducer: RawTyped,
    query: RawQuery,
    evaluator: RawEvaluator,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTyped {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawQuery {
    /// `[ref, from, to]`
    #[serde(deserialize_with = "null_as_default")]
    params: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEvaluator {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    params: Vec<f64>,
}

/// Decode the optional `alert` block of a graph or time series panel
pub(crate) fn decode_alert(
    value: Option<&Value>,
    panel_title: &str,
    diagnostics: &mut Diagnostics,
) -> Option<Alert> {
    let value = value.filter(|v| !v.is_null())?;
    let raw: RawAlert = decode_item(value, WarningCategory::Alert, diagnostics)?;

    let title = if raw.name.is_empty() {
        panel_title.to_string()
    } else {
        raw.name
    };

    let conditions = raw
        .conditions
        .into_iter()
        .filter_map(|condition| decode_condition(condition, &title, diagnostics))
        .collect();

    Some(Alert {
        message: non_empty(raw.message),
        evaluate_every: non_empty(raw.frequency),
        for_duration: non_empty(raw.for_duration),
        tags: raw.alert_rule_tags,
        on_no_data: non_empty(raw.no_data_state),
        on_execution_error: non_empty(raw.execution_error_state),
        notifications: raw
            .notifications
            .into_iter()
            .map(|n| n.uid)
            .filter(|uid| !uid.is_empty())
            .collect(),
        conditions,
        title,
    })
}

fn decode_condition(
    raw: RawCondition,
    alert: &str,
    diagnostics: &mut Diagnostics,
) -> Option<AlertCondition> {
    let [query_ref, from, to] = match <[String; 3]>::try_from(raw.query.params) {
        Ok(params) => params,
        Err(params) => {
            diagnostics.push(ConversionWarning::error(
                WarningCategory::Alert,
                alert,
                format!(
                    "condition query expects [ref, from, to], got {} parameter(s): condition skipped",
                    params.len()
                ),
            ));
            return None;
        }
    };

    let threshold = decode_threshold(&raw.evaluator, alert, diagnostics)?;

    Some(AlertCondition {
        operand: raw.operator.kind,
        value: AlertValue {
            func: raw.reducer.kind,
            query_ref,
            from,
            to,
        },
        threshold,
    })
}

fn decode_threshold(
    evaluator: &RawEvaluator,
    alert: &str,
    diagnostics: &mut Diagnostics,
) -> Option<AlertThreshold> {
    let params = &evaluator.params;
    let threshold = match (evaluator.kind.as_str(), params.as_slice()) {
        ("no_value", _) => AlertThreshold::HasNoValue,
        ("lt", [below, ..]) => AlertThreshold::Below(*below),
        ("gt", [above, ..]) => AlertThreshold::Above(*above),
        ("outside_range", [low, high, ..]) => AlertThreshold::OutsideRange([*low, *high]),
        ("within_range", [low, high, ..]) => AlertThreshold::WithinRange([*low, *high]),
        ("lt" | "gt" | "outside_range" | "within_range", _) => {
            diagnostics.push(ConversionWarning::error(
                WarningCategory::Alert,
                alert,
                format!(
                    "evaluator '{}' is missing parameters: condition skipped",
                    evaluator.kind
                ),
            ));
            return None;
        }
        (kind, _) => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Alert,
                alert,
                "evaluator",
                kind,
            ));
            return None;
        }
    };

    Some(threshold)
}
