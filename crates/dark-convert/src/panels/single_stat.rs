use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{RangeMap, SingleStat, SingleStatColor, SparkLineMode};

use super::{RawPanel, decode_common, settings};
use crate::error::Diagnostics;
use crate::input::{non_empty, null_as_default};
use crate::target::decode_targets;

/// `mappingType` value selecting range-to-text mappings
const RANGE_MAPPING: i64 = 2;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawSingleStat {
    format: Option<String>,
    decimals: Option<i64>,
    value_name: Option<String>,
    value_font_size: Option<String>,
    prefix_font_size: Option<String>,
    postfix_font_size: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    thresholds: String,
    #[serde(deserialize_with = "null_as_default")]
    colors: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    color_background: bool,
    #[serde(deserialize_with = "null_as_default")]
    color_value: bool,
    #[serde(deserialize_with = "null_as_default")]
    sparkline: RawSparkline,
    mapping_type: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    range_maps: Vec<RawRangeMap>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSparkline {
    #[serde(deserialize_with = "null_as_default")]
    show: bool,
    #[serde(deserialize_with = "null_as_default")]
    full: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawRangeMap {
    #[serde(deserialize_with = "null_as_default")]
    from: String,
    #[serde(deserialize_with = "null_as_default")]
    to: String,
    #[serde(deserialize_with = "null_as_default")]
    text: String,
}

pub(super) fn decode(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<SingleStat> {
    let stat: RawSingleStat = settings(raw, value, diagnostics)?;

    let thresholds = match stat.thresholds.split(',').collect::<Vec<_>>().as_slice() {
        [low, high] => Some([low.to_string(), high.to_string()]),
        _ => None,
    };

    let colors = <[String; 3]>::try_from(stat.colors).ok();

    let color = [
        (stat.color_background, SingleStatColor::Background),
        (stat.color_value, SingleStatColor::Value),
    ]
    .into_iter()
    .filter_map(|(enabled, color)| enabled.then_some(color))
    .collect();

    let sparkline = match (stat.sparkline.show, stat.sparkline.full) {
        (true, true) => Some(SparkLineMode::Full),
        (true, false) => Some(SparkLineMode::Bottom),
        (false, _) => None,
    };

    let ranges_to_text = if stat.mapping_type == Some(RANGE_MAPPING) {
        stat.range_maps
            .into_iter()
            .map(|range| RangeMap {
                from: range.from,
                to: range.to,
                text: range.text,
            })
            .collect()
    } else {
        Vec::new()
    };

    Some(SingleStat {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        unit: non_empty(stat.format),
        decimals: stat.decimals,
        value_type: non_empty(stat.value_name),
        value_font_size: non_empty(stat.value_font_size),
        prefix_font_size: non_empty(stat.prefix_font_size),
        postfix_font_size: non_empty(stat.postfix_font_size),
        sparkline,
        color,
        thresholds,
        colors,
        ranges_to_text,
    })
}
