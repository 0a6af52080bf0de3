//! Stat and gauge panels
//!
//! Both read the same `fieldConfig` / `options` layout; stat adds text,
//! color and sparkline settings.

use phf::phf_map;
use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{
    ColorMode, Gauge, Orientation, ReduceCalc, Stat, TextMode, ThresholdMode, ThresholdStep,
};

use super::{RawPanel, decode_common, settings};
use crate::error::{Diagnostics, WarningCategory, warnings};
use crate::input::{non_empty, null_as_default};
use crate::target::decode_targets;

/// Grafana reducer ids
static REDUCE_CALCS: phf::Map<&'static str, ReduceCalc> = phf_map! {
    "first" => ReduceCalc::First,
    "firstNotNull" => ReduceCalc::FirstNonNull,
    "last" => ReduceCalc::Last,
    "lastNotNull" => ReduceCalc::LastNonNull,
    "min" => ReduceCalc::Min,
    "max" => ReduceCalc::Max,
    "mean" => ReduceCalc::Avg,
    "count" => ReduceCalc::Count,
    "sum" => ReduceCalc::Total,
    "range" => ReduceCalc::Range,
};

const DEFAULT_CALC: ReduceCalc = ReduceCalc::LastNonNull;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawStatLike {
    #[serde(deserialize_with = "null_as_default")]
    field_config: RawFieldConfig,
    #[serde(deserialize_with = "null_as_default")]
    options: RawOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFieldConfig {
    #[serde(deserialize_with = "null_as_default")]
    defaults: RawDefaults,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDefaults {
    unit: Option<String>,
    decimals: Option<i64>,
    #[serde(deserialize_with = "null_as_default")]
    thresholds: RawThresholds,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawThresholds {
    #[serde(deserialize_with = "null_as_default")]
    mode: String,
    #[serde(deserialize_with = "null_as_default")]
    steps: Vec<RawStep>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStep {
    #[serde(deserialize_with = "null_as_default")]
    color: String,
    value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawOptions {
    #[serde(deserialize_with = "null_as_default")]
    reduce_options: RawReduceOptions,
    #[serde(deserialize_with = "null_as_default")]
    orientation: String,
    #[serde(deserialize_with = "null_as_default")]
    text_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    color_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    graph_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    text: RawTextSize,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReduceOptions {
    #[serde(deserialize_with = "null_as_default")]
    calcs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTextSize {
    value_size: Option<i64>,
    title_size: Option<i64>,
}

pub(super) fn decode_stat(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<Stat> {
    let stat: RawStatLike = settings(raw, value, diagnostics)?;
    let title = raw.title.as_str();

    let text = match stat.options.text_mode.as_str() {
        "" | "auto" => TextMode::Auto,
        "value" => TextMode::Value,
        "name" => TextMode::Name,
        "value_and_name" => TextMode::ValueAndName,
        "none" => TextMode::None,
        other => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Field,
                title,
                "text mode",
                other,
                "auto",
            ));
            TextMode::Auto
        }
    };

    let color_mode = match stat.options.color_mode.as_str() {
        "" | "value" => ColorMode::Value,
        "background" => ColorMode::Background,
        other => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Field,
                title,
                "color mode",
                other,
                "value",
            ));
            ColorMode::Value
        }
    };

    Some(Stat {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        unit: non_empty(stat.field_config.defaults.unit),
        decimals: stat.field_config.defaults.decimals,
        sparkline: stat.options.graph_mode == "area",
        orientation: decode_orientation(&stat.options.orientation, title, diagnostics),
        text,
        value_type: decode_value_type(&stat.options.reduce_options.calcs, title, diagnostics),
        color_mode,
        title_font_size: stat.options.text.title_size,
        value_font_size: stat.options.text.value_size,
        threshold_mode: decode_threshold_mode(&stat.field_config.defaults.thresholds.mode, title, diagnostics),
        thresholds: decode_steps(stat.field_config.defaults.thresholds.steps),
    })
}

pub(super) fn decode_gauge(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<Gauge> {
    let gauge: RawStatLike = settings(raw, value, diagnostics)?;
    let title = raw.title.as_str();

    Some(Gauge {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        unit: non_empty(gauge.field_config.defaults.unit),
        decimals: gauge.field_config.defaults.decimals,
        orientation: decode_orientation(&gauge.options.orientation, title, diagnostics),
        value_type: decode_value_type(&gauge.options.reduce_options.calcs, title, diagnostics),
        title_font_size: gauge.options.text.title_size,
        value_font_size: gauge.options.text.value_size,
        threshold_mode: decode_threshold_mode(&gauge.field_config.defaults.thresholds.mode, title, diagnostics),
        thresholds: decode_steps(gauge.field_config.defaults.thresholds.steps),
    })
}

/// Exactly one reducer is expected; anything else falls back to last non-null
fn decode_value_type(calcs: &[String], panel: &str, diagnostics: &mut Diagnostics) -> ReduceCalc {
    let [calc] = calcs else {
        return DEFAULT_CALC;
    };

    match REDUCE_CALCS.get(calc.as_str()) {
        Some(reduce) => *reduce,
        None => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Field,
                panel,
                "value type",
                calc,
                "last_non_null",
            ));
            DEFAULT_CALC
        }
    }
}

fn decode_orientation(orientation: &str, panel: &str, diagnostics: &mut Diagnostics) -> Orientation {
    match orientation {
        "" | "auto" => Orientation::Auto,
        "horizontal" => Orientation::Horizontal,
        "vertical" => Orientation::Vertical,
        other => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Field,
                panel,
                "orientation",
                other,
                "auto",
            ));
            Orientation::Auto
        }
    }
}

fn decode_threshold_mode(mode: &str, panel: &str, diagnostics: &mut Diagnostics) -> ThresholdMode {
    match mode {
        "" | "absolute" => ThresholdMode::Absolute,
        "percentage" => ThresholdMode::Relative,
        other => {
            diagnostics.push(warnings::defaulted(
                WarningCategory::Field,
                panel,
                "threshold mode",
                other,
                "absolute",
            ));
            ThresholdMode::Absolute
        }
    }
}

fn decode_steps(steps: Vec<RawStep>) -> Vec<ThresholdStep> {
    steps
        .into_iter()
        .map(|step| ThresholdStep {
            color: step.color,
            value: step.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: &Value) -> RawPanel {
        serde_json::from_value(value.clone()).unwrap()
    }

    fn gauge_with_calcs(calcs: Value) -> Gauge {
        let mut diagnostics = Diagnostics::new();
        let value = json!({
            "type": "gauge",
            "title": "Disk",
            "options": {"reduceOptions": {"calcs": calcs}},
        });
        decode_gauge(&parse(&value), &value, &mut diagnostics).unwrap()
    }

    #[test]
    fn test_gauge_value_type() {
        assert_eq!(gauge_with_calcs(json!(["lastNotNull"])).value_type, ReduceCalc::LastNonNull);
        assert_eq!(gauge_with_calcs(json!(["mean"])).value_type, ReduceCalc::Avg);
        assert_eq!(gauge_with_calcs(json!(["sum"])).value_type, ReduceCalc::Total);
        assert_eq!(gauge_with_calcs(json!([])).value_type, ReduceCalc::LastNonNull);
        assert_eq!(
            gauge_with_calcs(json!(["min", "max"])).value_type,
            ReduceCalc::LastNonNull
        );
    }

    #[test]
    fn test_unknown_value_type() {
        let mut diagnostics = Diagnostics::new();
        let calc = decode_value_type(&["median".to_string()], "Disk", &mut diagnostics);

        assert_eq!(calc, ReduceCalc::LastNonNull);
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_reduce_calc_table() {
        assert_eq!(REDUCE_CALCS.len(), 10);
        assert_eq!(REDUCE_CALCS.get("firstNotNull"), Some(&ReduceCalc::FirstNonNull));
        assert_eq!(REDUCE_CALCS.get("range"), Some(&ReduceCalc::Range));
    }

    #[test]
    fn test_gauge_settings() {
        let mut diagnostics = Diagnostics::new();
        let value = json!({
            "type": "gauge",
            "title": "Disk",
            "fieldConfig": {
                "defaults": {
                    "unit": "percent",
                    "decimals": 1,
                    "thresholds": {
                        "mode": "percentage",
                        "steps": [
                            {"color": "green", "value": null},
                            {"color": "orange", "value": 70},
                            {"color": "red", "value": 90},
                        ],
                    },
                },
            },
            "options": {
                "orientation": "horizontal",
                "text": {"titleSize": 12, "valueSize": 24},
            },
        });

        let gauge = decode_gauge(&parse(&value), &value, &mut diagnostics).unwrap();

        assert_eq!(gauge.unit.as_deref(), Some("percent"));
        assert_eq!(gauge.decimals, Some(1));
        assert_eq!(gauge.orientation, Orientation::Horizontal);
        assert_eq!(gauge.threshold_mode, ThresholdMode::Relative);
        assert_eq!(gauge.title_font_size, Some(12));
        assert_eq!(gauge.value_font_size, Some(24));
        assert_eq!(
            gauge.thresholds,
            vec![
                ThresholdStep { color: "green".to_string(), value: None },
                ThresholdStep { color: "orange".to_string(), value: Some(70.0) },
                ThresholdStep { color: "red".to_string(), value: Some(90.0) },
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_stat_settings() {
        let mut diagnostics = Diagnostics::new();
        let value = json!({
            "type": "stat",
            "title": "Requests",
            "options": {
                "graphMode": "area",
                "textMode": "value_and_name",
                "colorMode": "background",
                "reduceOptions": {"calcs": ["max"]},
            },
        });

        let stat = decode_stat(&parse(&value), &value, &mut diagnostics).unwrap();

        assert!(stat.sparkline);
        assert_eq!(stat.text, TextMode::ValueAndName);
        assert_eq!(stat.color_mode, ColorMode::Background);
        assert_eq!(stat.value_type, ReduceCalc::Max);
        assert_eq!(stat.orientation, Orientation::Auto);
        assert_eq!(stat.threshold_mode, ThresholdMode::Absolute);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_stat_defaults_on_unknown_values() {
        let mut diagnostics = Diagnostics::new();
        let value = json!({
            "type": "stat",
            "options": {
                "graphMode": "none",
                "textMode": "huge",
                "colorMode": "rainbow",
                "orientation": "diagonal",
            },
            "fieldConfig": {"defaults": {"thresholds": {"mode": "logarithmic"}}},
        });

        let stat = decode_stat(&parse(&value), &value, &mut diagnostics).unwrap();

        assert!(!stat.sparkline);
        assert_eq!(stat.text, TextMode::Auto);
        assert_eq!(stat.color_mode, ColorMode::Value);
        assert_eq!(stat.orientation, Orientation::Auto);
        assert_eq!(stat.threshold_mode, ThresholdMode::Absolute);
        assert_eq!(diagnostics.len(), 4);
    }

    #[test]
    fn test_stat_null_settings_objects() {
        let mut diagnostics = Diagnostics::new();
        let value = json!({
            "type": "stat",
            "fieldConfig": {"defaults": {"unit": "s", "thresholds": null}},
            "options": {"reduceOptions": null, "text": null},
        });

        let stat = decode_stat(&parse(&value), &value, &mut diagnostics).unwrap();
        assert_eq!(stat.unit.as_deref(), Some("s"));
        assert!(stat.thresholds.is_empty());
        assert_eq!(stat.value_type, ReduceCalc::LastNonNull);

        let value = json!({"type": "gauge", "fieldConfig": null, "options": null});
        let gauge = decode_gauge(&parse(&value), &value, &mut diagnostics).unwrap();
        assert_eq!(gauge.unit, None);
        assert_eq!(gauge.orientation, Orientation::Auto);
        assert!(diagnostics.is_empty());
    }
}
