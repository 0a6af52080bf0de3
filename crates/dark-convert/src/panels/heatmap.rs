use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{Heatmap, HeatmapDataFormat, HeatmapTooltip, HeatmapYAxis};

use super::{RawPanel, decode_common, settings};
use crate::error::{Diagnostics, WarningCategory, warnings};
use crate::input::{Bound, non_empty, null_as_default};
use crate::target::decode_targets;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawHeatmap {
    #[serde(deserialize_with = "null_as_default")]
    data_format: String,
    #[serde(deserialize_with = "null_as_default")]
    hide_zero_buckets: bool,
    #[serde(deserialize_with = "null_as_default")]
    highlight_cards: bool,
    #[serde(deserialize_with = "null_as_default")]
    reverse_y_buckets: bool,
    #[serde(deserialize_with = "null_as_default")]
    tooltip: RawTooltip,
    tooltip_decimals: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    y_axis: RawYAxis,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTooltip {
    #[serde(deserialize_with = "null_as_default")]
    show: bool,
    #[serde(deserialize_with = "null_as_default")]
    show_histogram: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawYAxis {
    decimals: Option<i64>,
    format: Option<String>,
    min: Option<Bound>,
    max: Option<Bound>,
}

pub(super) fn decode(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<Heatmap> {
    let heatmap: RawHeatmap = settings(raw, value, diagnostics)?;

    let data_format = match heatmap.data_format.as_str() {
        "" => None,
        "tsbuckets" => Some(HeatmapDataFormat::TimeSeriesBuckets),
        "time_series" => Some(HeatmapDataFormat::TimeSeries),
        other => {
            diagnostics.push(warnings::unknown_value(
                WarningCategory::Field,
                &raw.title,
                "heatmap data format",
                other,
            ));
            None
        }
    };

    Some(Heatmap {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        data_format,
        hide_zero_buckets: heatmap.hide_zero_buckets,
        highlight_cards: heatmap.highlight_cards,
        reverse_y_buckets: heatmap.reverse_y_buckets,
        tooltip: HeatmapTooltip {
            show: heatmap.tooltip.show,
            show_histogram: heatmap.tooltip.show_histogram,
            decimals: heatmap.tooltip_decimals,
        },
        y_axis: HeatmapYAxis {
            decimals: heatmap.y_axis.decimals,
            unit: non_empty(heatmap.y_axis.format),
            min: Bound::narrow(heatmap.y_axis.min, "y-axis min", &raw.title, diagnostics),
            max: Bound::narrow(heatmap.y_axis.max, "y-axis max", &raw.title, diagnostics),
        },
    })
}
