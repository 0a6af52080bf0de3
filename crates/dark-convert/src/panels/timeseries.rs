//! Time series panels
//!
//! Everything lives under `fieldConfig.defaults` (axis and visualization),
//! `fieldConfig.overrides` (per-field rules) and `options` (legend, tooltip).

use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{
    AxisDisplay, GradientMode, LineInterpolation, OverrideMatcher, OverrideProperties, Scale,
    StackMode, TimeSeries, TimeSeriesAxis, TimeSeriesLegendOption, TimeSeriesOverride,
    TimeSeriesVisualization, TooltipMode,
};

use super::{RawPanel, decode_common, settings};
use crate::alert::decode_alert;
use crate::error::{ConversionWarning, Diagnostics, WarningCategory, warnings};
use crate::input::{decode_each, non_empty, null_as_default};
use crate::target::decode_targets;

/// Legend calculations, in the order they are emitted
const LEGEND_CALCS: [(&str, TimeSeriesLegendOption); 10] = [
    ("first", TimeSeriesLegendOption::First),
    ("firstNotNull", TimeSeriesLegendOption::FirstNonNull),
    ("last", TimeSeriesLegendOption::Last),
    ("lastNotNull", TimeSeriesLegendOption::LastNonNull),
    ("min", TimeSeriesLegendOption::Min),
    ("max", TimeSeriesLegendOption::Max),
    ("mean", TimeSeriesLegendOption::Avg),
    ("count", TimeSeriesLegendOption::Count),
    ("sum", TimeSeriesLegendOption::Total),
    ("range", TimeSeriesLegendOption::Range),
];

const NEGATIVE_Y_TRANSFORM: &str = "negative-Y";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawTimeSeries {
    #[serde(deserialize_with = "null_as_default")]
    field_config: RawFieldConfig,
    #[serde(deserialize_with = "null_as_default")]
    options: RawOptions,
    alert: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawFieldConfig {
    #[serde(deserialize_with = "null_as_default")]
    defaults: RawDefaults,
    #[serde(deserialize_with = "null_as_default")]
    overrides: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDefaults {
    unit: Option<String>,
    decimals: Option<i64>,
    min: Option<f64>,
    max: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    custom: RawCustom,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawCustom {
    axis_label: Option<String>,
    axis_soft_min: Option<f64>,
    axis_soft_max: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    axis_placement: String,
    #[serde(deserialize_with = "null_as_default")]
    scale_distribution: RawScaleDistribution,
    fill_opacity: Option<f64>,
    point_size: Option<f64>,
    line_width: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    draw_style: String,
    #[serde(deserialize_with = "null_as_default")]
    line_interpolation: String,
    #[serde(deserialize_with = "null_as_default")]
    gradient_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    stacking: RawStacking,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawScaleDistribution {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    log: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawStacking {
    #[serde(deserialize_with = "null_as_default")]
    mode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOptions {
    #[serde(deserialize_with = "null_as_default")]
    legend: RawLegend,
    #[serde(deserialize_with = "null_as_default")]
    tooltip: RawTooltip,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawLegend {
    #[serde(alias = "show")]
    show_legend: Option<bool>,
    #[serde(deserialize_with = "null_as_default")]
    display_mode: String,
    #[serde(deserialize_with = "null_as_default")]
    placement: String,
    #[serde(deserialize_with = "null_as_default")]
    calcs: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTooltip {
    #[serde(deserialize_with = "null_as_default")]
    mode: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawOverride {
    #[serde(deserialize_with = "null_as_default")]
    matcher: RawMatcher,
    #[serde(deserialize_with = "null_as_default")]
    properties: Vec<RawProperty>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMatcher {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    options: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawProperty {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    value: Value,
}

pub(super) fn decode(
    raw: &RawPanel,
    value: &Value,
    diagnostics: &mut Diagnostics,
) -> Option<TimeSeries> {
    let ts: RawTimeSeries = settings(raw, value, diagnostics)?;
    let title = raw.title.as_str();
    let defaults = ts.field_config.defaults;

    let visualization = decode_visualization(&defaults.custom, &ts.options.tooltip, title, diagnostics);
    let overrides = decode_each::<RawOverride>(
        &ts.field_config.overrides,
        WarningCategory::Override,
        diagnostics,
    )
    .into_iter()
    .filter_map(|o| decode_override(o, title, diagnostics))
    .collect();

    let axis = TimeSeriesAxis {
        unit: non_empty(defaults.unit),
        label: non_empty(defaults.custom.axis_label),
        decimals: defaults.decimals,
        min: defaults.min,
        max: defaults.max,
        soft_min: defaults.custom.axis_soft_min,
        soft_max: defaults.custom.axis_soft_max,
        display: decode_axis_display(&defaults.custom.axis_placement, title, diagnostics),
        scale: match defaults.custom.scale_distribution.kind.as_str() {
            "linear" => Some(Scale::Linear),
            "log" if defaults.custom.scale_distribution.log == Some(2) => Some(Scale::Log2),
            "log" => Some(Scale::Log10),
            _ => None,
        },
    };

    Some(TimeSeries {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        legend: decode_legend(&ts.options.legend),
        visualization,
        axis,
        overrides,
        alert: decode_alert(ts.alert.as_ref(), title, diagnostics),
    })
}

fn decode_visualization(
    custom: &RawCustom,
    tooltip: &RawTooltip,
    panel: &str,
    diagnostics: &mut Diagnostics,
) -> TimeSeriesVisualization {
    let line_interpolation = (custom.draw_style == "line").then(|| {
        match custom.line_interpolation.as_str() {
            "smooth" => LineInterpolation::Smooth,
            "linear" => LineInterpolation::Linear,
            "stepBefore" => LineInterpolation::StepBefore,
            "stepAfter" => LineInterpolation::StepAfter,
            other => {
                diagnostics.push(warnings::defaulted(
                    WarningCategory::Field,
                    panel,
                    "line interpolation",
                    other,
                    "smooth",
                ));
                LineInterpolation::Smooth
            }
        }
    });

    let gradient_mode = match custom.gradient_mode.as_str() {
        "none" => GradientMode::None,
        "hue" => GradientMode::Hue,
        "scheme" => GradientMode::Scheme,
        "" | "opacity" => GradientMode::Opacity,
        other => {
            diagnostics.push(warnings::fallback(panel, "gradient mode", other, "opacity"));
            GradientMode::Opacity
        }
    };

    let tooltip = match tooltip.mode.as_str() {
        "none" => TooltipMode::None,
        "multi" => TooltipMode::AllSeries,
        "" | "single" => TooltipMode::SingleSeries,
        other => {
            diagnostics.push(warnings::fallback(panel, "tooltip mode", other, "single_series"));
            TooltipMode::SingleSeries
        }
    };

    let stack = match custom.stacking.mode.as_str() {
        "" => StackMode::None,
        mode => parse_stack_mode(mode).unwrap_or_else(|| {
            diagnostics.push(warnings::fallback(panel, "stacking mode", mode, "none"));
            StackMode::None
        }),
    };

    TimeSeriesVisualization {
        gradient_mode,
        tooltip,
        stack,
        fill_opacity: custom.fill_opacity.map(|v| v as i64),
        point_size: custom.point_size.map(|v| v as i64),
        line_interpolation,
        line_width: custom.line_width.map(|v| v as i64),
    }
}

fn decode_legend(legend: &RawLegend) -> Vec<TimeSeriesLegendOption> {
    let mut options = Vec::new();

    if legend.show_legend == Some(false) {
        options.push(TimeSeriesLegendOption::Hide);
    } else {
        options.push(match legend.display_mode.as_str() {
            "list" => TimeSeriesLegendOption::AsList,
            "hidden" => TimeSeriesLegendOption::Hide,
            _ => TimeSeriesLegendOption::AsTable,
        });
        options.push(if legend.placement == "right" {
            TimeSeriesLegendOption::ToTheRight
        } else {
            TimeSeriesLegendOption::ToBottom
        });
    }

    options.extend(
        LEGEND_CALCS
            .iter()
            .filter(|(calc, _)| legend.calcs.iter().any(|c| c == calc))
            .map(|(_, option)| *option),
    );

    options
}

fn decode_axis_display(
    placement: &str,
    panel: &str,
    diagnostics: &mut Diagnostics,
) -> Option<AxisDisplay> {
    match placement {
        "" => None,
        other => {
            let display = parse_axis_display(other);
            if display.is_none() {
                diagnostics.push(warnings::unknown_value(
                    WarningCategory::Field,
                    panel,
                    "axis placement",
                    other,
                ));
            }
            display
        }
    }
}

fn parse_axis_display(placement: &str) -> Option<AxisDisplay> {
    match placement {
        "hidden" => Some(AxisDisplay::Hidden),
        "left" => Some(AxisDisplay::Left),
        "right" => Some(AxisDisplay::Right),
        "auto" => Some(AxisDisplay::Auto),
        _ => None,
    }
}

fn parse_stack_mode(mode: &str) -> Option<StackMode> {
    match mode {
        "none" => Some(StackMode::None),
        "normal" => Some(StackMode::Normal),
        "percent" => Some(StackMode::Percent),
        _ => None,
    }
}

// =============================================================================
// OVERRIDES
// =============================================================================

fn decode_override(
    raw: RawOverride,
    panel: &str,
    diagnostics: &mut Diagnostics,
) -> Option<TimeSeriesOverride> {
    let options = raw.matcher.options;
    let matcher = match raw.matcher.id.as_str() {
        "byName" => OverrideMatcher::FieldName(options),
        "byFrameRefID" => OverrideMatcher::QueryRef(options),
        "byRegexp" => OverrideMatcher::Regex(options),
        "byType" => OverrideMatcher::FieldType(options),
        other => {
            diagnostics.push(
                ConversionWarning::warning(
                    WarningCategory::Override,
                    panel,
                    format!("unknown field override matcher '{}': override skipped", other),
                )
                .with_suggestion("Supported matchers are byName, byFrameRefID, byRegexp and byType"),
            );
            return None;
        }
    };

    let mut properties = OverrideProperties::default();
    for property in &raw.properties {
        decode_property(property, &mut properties, panel, diagnostics);
    }

    Some(TimeSeriesOverride { matcher, properties })
}

fn decode_property(
    property: &RawProperty,
    properties: &mut OverrideProperties,
    panel: &str,
    diagnostics: &mut Diagnostics,
) {
    let value = &property.value;
    let applied = match property.id.as_str() {
        "unit" => value
            .as_str()
            .map(|unit| properties.unit = Some(unit.to_string())),
        "custom.axisPlacement" => value
            .as_str()
            .and_then(parse_axis_display)
            .map(|display| properties.axis_display = Some(display)),
        "custom.fillOpacity" => value
            .as_f64()
            .map(|opacity| properties.fill_opacity = Some(opacity as i64)),
        "custom.stacking" => value
            .get("mode")
            .and_then(Value::as_str)
            .and_then(parse_stack_mode)
            .map(|stack| properties.stack = Some(stack)),
        "custom.transform" => (value.as_str() == Some(NEGATIVE_Y_TRANSFORM))
            .then(|| properties.negative_y = true),
        "color" => (value.get("mode").and_then(Value::as_str) == Some("fixed"))
            .then(|| value.get("fixedColor").and_then(Value::as_str))
            .flatten()
            .map(|color| properties.color = Some(color.to_string())),
        other => {
            diagnostics.push(ConversionWarning::warning(
                WarningCategory::Override,
                panel,
                format!("unhandled override property '{}': ignored", other),
            ));
            return;
        }
    };

    if applied.is_none() {
        diagnostics.push(ConversionWarning::warning(
            WarningCategory::Override,
            panel,
            format!("unsupported value for override property '{}': ignored", property.id),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_ts(value: Value) -> (TimeSeries, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let raw: RawPanel = serde_json::from_value(value.clone()).unwrap();
        let ts = decode(&raw, &value, &mut diagnostics).unwrap();
        (ts, diagnostics)
    }

    #[test]
    fn test_axis() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "title": "Latency",
            "fieldConfig": {
                "defaults": {
                    "unit": "s",
                    "decimals": 2,
                    "min": 0,
                    "max": 10,
                    "custom": {
                        "axisLabel": "seconds",
                        "axisSoftMin": 1,
                        "axisSoftMax": 5,
                        "axisPlacement": "right",
                        "scaleDistribution": {"type": "log", "log": 2},
                    },
                },
            },
        }));

        assert_eq!(
            ts.axis,
            TimeSeriesAxis {
                unit: Some("s".to_string()),
                label: Some("seconds".to_string()),
                decimals: Some(2),
                min: Some(0.0),
                max: Some(10.0),
                soft_min: Some(1.0),
                soft_max: Some(5.0),
                display: Some(AxisDisplay::Right),
                scale: Some(Scale::Log2),
            }
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_scale_distribution() {
        let scale = |distribution: Value| {
            let (ts, _) = decode_ts(json!({
                "type": "timeseries",
                "fieldConfig": {"defaults": {"custom": {"scaleDistribution": distribution}}},
            }));
            ts.axis.scale
        };

        assert_eq!(scale(json!({"type": "linear"})), Some(Scale::Linear));
        assert_eq!(scale(json!({"type": "log", "log": 10})), Some(Scale::Log10));
        assert_eq!(scale(json!({"type": "log"})), Some(Scale::Log10));
        assert_eq!(scale(json!({"type": "ordinal"})), None);
    }

    #[test]
    fn test_visualization() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "fieldConfig": {
                "defaults": {
                    "custom": {
                        "drawStyle": "line",
                        "lineInterpolation": "stepAfter",
                        "fillOpacity": 25,
                        "pointSize": 5,
                        "lineWidth": 1,
                        "gradientMode": "hue",
                        "stacking": {"mode": "percent"},
                    },
                },
            },
            "options": {"tooltip": {"mode": "multi"}},
        }));

        assert_eq!(
            ts.visualization,
            TimeSeriesVisualization {
                gradient_mode: GradientMode::Hue,
                tooltip: TooltipMode::AllSeries,
                stack: StackMode::Percent,
                fill_opacity: Some(25),
                point_size: Some(5),
                line_interpolation: Some(LineInterpolation::StepAfter),
                line_width: Some(1),
            }
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_visualization_defaults() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "fieldConfig": {"defaults": {"custom": {"drawStyle": "bars", "lineInterpolation": "wobbly"}}},
        }));

        let viz = ts.visualization;
        assert_eq!(viz.gradient_mode, GradientMode::Opacity);
        assert_eq!(viz.tooltip, TooltipMode::SingleSeries);
        assert_eq!(viz.stack, StackMode::None);
        assert_eq!(viz.line_interpolation, None);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_cosmetic_values_are_noted() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "title": "Load",
            "fieldConfig": {
                "defaults": {
                    "custom": {"gradientMode": "rainbow", "stacking": {"mode": "sideways"}},
                },
            },
            "options": {"tooltip": {"mode": "everything"}},
        }));

        let viz = ts.visualization;
        assert_eq!(viz.gradient_mode, GradientMode::Opacity);
        assert_eq!(viz.tooltip, TooltipMode::SingleSeries);
        assert_eq!(viz.stack, StackMode::None);

        let severities: Vec<_> = diagnostics.warnings().iter().map(|w| w.severity).collect();
        assert_eq!(severities, vec![crate::error::WarningSeverity::Info; 3]);
        assert!(diagnostics.warnings()[0].message.contains("rainbow"));
        assert!(diagnostics.warnings().iter().all(|w| w.subject == "Load"));
    }

    #[test]
    fn test_unknown_interpolation_defaults_to_smooth() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "fieldConfig": {"defaults": {"custom": {"drawStyle": "line", "lineInterpolation": "wobbly"}}},
        }));

        assert_eq!(ts.visualization.line_interpolation, Some(LineInterpolation::Smooth));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_legend() {
        let (ts, _) = decode_ts(json!({
            "type": "timeseries",
            "options": {
                "legend": {
                    "showLegend": true,
                    "displayMode": "list",
                    "placement": "right",
                    "calcs": ["sum", "mean", "firstNotNull"],
                },
            },
        }));

        assert_eq!(
            ts.legend,
            vec![
                TimeSeriesLegendOption::AsList,
                TimeSeriesLegendOption::ToTheRight,
                TimeSeriesLegendOption::FirstNonNull,
                TimeSeriesLegendOption::Avg,
                TimeSeriesLegendOption::Total,
            ]
        );
    }

    #[test]
    fn test_hidden_legend() {
        let (hidden, _) = decode_ts(json!({
            "type": "timeseries",
            "options": {"legend": {"show": false, "displayMode": "list", "calcs": ["max"]}},
        }));
        assert_eq!(
            hidden.legend,
            vec![TimeSeriesLegendOption::Hide, TimeSeriesLegendOption::Max]
        );

        let (absent, _) = decode_ts(json!({"type": "timeseries"}));
        assert_eq!(
            absent.legend,
            vec![TimeSeriesLegendOption::AsTable, TimeSeriesLegendOption::ToBottom]
        );
    }

    #[test]
    fn test_overrides() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "title": "Traffic",
            "fieldConfig": {
                "overrides": [
                    {
                        "matcher": {"id": "byName", "options": "out"},
                        "properties": [
                            {"id": "custom.transform", "value": "negative-Y"},
                            {"id": "unit", "value": "bps"},
                            {"id": "color", "value": {"mode": "fixed", "fixedColor": "red"}},
                        ],
                    },
                    {
                        "matcher": {"id": "byRegexp", "options": "/.*errors/"},
                        "properties": [
                            {"id": "custom.fillOpacity", "value": 40},
                            {"id": "custom.stacking", "value": {"group": "A", "mode": "normal"}},
                            {"id": "custom.axisPlacement", "value": "hidden"},
                        ],
                    },
                ],
            },
        }));

        assert_eq!(
            ts.overrides,
            vec![
                TimeSeriesOverride {
                    matcher: OverrideMatcher::FieldName("out".to_string()),
                    properties: OverrideProperties {
                        unit: Some("bps".to_string()),
                        color: Some("red".to_string()),
                        negative_y: true,
                        ..Default::default()
                    },
                },
                TimeSeriesOverride {
                    matcher: OverrideMatcher::Regex("/.*errors/".to_string()),
                    properties: OverrideProperties {
                        fill_opacity: Some(40),
                        stack: Some(StackMode::Normal),
                        axis_display: Some(AxisDisplay::Hidden),
                        ..Default::default()
                    },
                },
            ]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_unknown_matcher_skips_override() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "fieldConfig": {
                "overrides": [
                    {"matcher": {"id": "byValue", "options": "x"}, "properties": []},
                    {"matcher": {"id": "byFrameRefID", "options": "A"}, "properties": []},
                ],
            },
        }));

        assert_eq!(ts.overrides.len(), 1);
        assert_eq!(ts.overrides[0].matcher, OverrideMatcher::QueryRef("A".to_string()));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_unsupported_properties_are_ignored() {
        let (ts, diagnostics) = decode_ts(json!({
            "type": "timeseries",
            "fieldConfig": {
                "overrides": [{
                    "matcher": {"id": "byType", "options": "number"},
                    "properties": [
                        {"id": "custom.transform", "value": "constant"},
                        {"id": "color", "value": {"mode": "palette-classic"}},
                        {"id": "custom.lineWidth", "value": 3},
                        {"id": "unit", "value": 12},
                        {"id": "custom.stacking", "value": {"mode": "sideways"}},
                    ],
                }],
            },
        }));

        assert_eq!(ts.overrides.len(), 1);
        assert!(ts.overrides[0].properties.is_empty());
        assert_eq!(diagnostics.len(), 5);
    }
}
