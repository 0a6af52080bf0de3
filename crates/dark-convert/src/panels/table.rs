use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{Table, TableAggregation};

use super::{RawPanel, decode_common, settings};
use crate::error::{Diagnostics, WarningCategory, warnings};
use crate::input::null_as_default;
use crate::target::decode_targets;

const HIDDEN_STYLE: &str = "hidden";
const AGGREGATIONS_TRANSFORM: &str = "timeseries_aggregations";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTable {
    #[serde(deserialize_with = "null_as_default")]
    styles: Vec<RawColumnStyle>,
    #[serde(deserialize_with = "null_as_default")]
    transform: String,
    #[serde(deserialize_with = "null_as_default")]
    columns: Vec<RawColumn>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColumnStyle {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    pattern: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawColumn {
    #[serde(deserialize_with = "null_as_default")]
    text: String,
    #[serde(deserialize_with = "null_as_default")]
    value: String,
}

pub(super) fn decode(raw: &RawPanel, value: &Value, diagnostics: &mut Diagnostics) -> Option<Table> {
    let table: RawTable = settings(raw, value, diagnostics)?;

    let hidden_columns = table
        .styles
        .into_iter()
        .filter(|style| style.kind == HIDDEN_STYLE)
        .map(|style| style.pattern)
        .collect();

    let time_series_aggregations = match table.transform.as_str() {
        AGGREGATIONS_TRANSFORM => table
            .columns
            .into_iter()
            .map(|column| TableAggregation {
                label: column.text,
                kind: column.value,
            })
            .collect(),
        "" => Vec::new(),
        other => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Field,
                &raw.title,
                "table transform",
                other,
            ));
            Vec::new()
        }
    };

    Some(Table {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        hidden_columns,
        time_series_aggregations,
    })
}
