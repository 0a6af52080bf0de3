use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{Logs, LogsDeduplication, LogsOrder, LogsVisualization};

use super::{RawPanel, decode_common, settings};
use crate::error::{Diagnostics, WarningCategory, warnings};
use crate::input::null_as_default;
use crate::target::decode_loki_target;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawLogs {
    #[serde(deserialize_with = "null_as_default")]
    options: RawLogsOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawLogsOptions {
    #[serde(deserialize_with = "null_as_default")]
    show_time: bool,
    #[serde(deserialize_with = "null_as_default")]
    show_labels: bool,
    #[serde(deserialize_with = "null_as_default")]
    show_common_labels: bool,
    #[serde(deserialize_with = "null_as_default")]
    wrap_log_message: bool,
    #[serde(deserialize_with = "null_as_default")]
    prettify_log_message: bool,
    #[serde(deserialize_with = "null_as_default")]
    enable_log_details: bool,
    #[serde(deserialize_with = "null_as_default")]
    sort_order: String,
    #[serde(deserialize_with = "null_as_default")]
    dedup_strategy: String,
}

pub(super) fn decode(raw: &RawPanel, value: &Value, diagnostics: &mut Diagnostics) -> Option<Logs> {
    let logs: RawLogs = settings(raw, value, diagnostics)?;
    let options = logs.options;

    let order = match options.sort_order.as_str() {
        "Ascending" => Some(LogsOrder::Asc),
        "Descending" => Some(LogsOrder::Desc),
        "" => None,
        other => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Field,
                &raw.title,
                "sort order",
                other,
            ));
            None
        }
    };

    let deduplication = match options.dedup_strategy.as_str() {
        "none" => Some(LogsDeduplication::None),
        "exact" => Some(LogsDeduplication::Exact),
        "numbers" => Some(LogsDeduplication::Numbers),
        "signature" => Some(LogsDeduplication::Signature),
        "" => None,
        other => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Field,
                &raw.title,
                "dedup strategy",
                other,
            ));
            None
        }
    };

    let targets = raw
        .targets
        .iter()
        .filter_map(|target| decode_loki_target(target, diagnostics))
        .collect();

    Some(Logs {
        common: decode_common(raw, diagnostics),
        targets,
        visualization: LogsVisualization {
            time: options.show_time,
            unique_labels: options.show_labels,
            common_labels: options.show_common_labels,
            wrap_lines: options.wrap_log_message,
            prettify_json: options.prettify_log_message,
            hide_log_details: !options.enable_log_details,
            order,
            deduplication,
        },
    })
}
