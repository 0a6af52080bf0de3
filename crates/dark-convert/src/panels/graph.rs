use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::{
    Graph, GraphAxes, GraphAxis, GraphLegendOption, GraphVisualization, SeriesOverride,
};

use super::{RawPanel, decode_common, settings};
use crate::alert::decode_alert;
use crate::error::{Diagnostics, WarningCategory};
use crate::input::{Bound, decode_each, non_empty, null_as_default};
use crate::target::decode_targets;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawGraph {
    #[serde(deserialize_with = "null_as_default")]
    xaxis: RawAxis,
    #[serde(deserialize_with = "null_as_default")]
    yaxes: Vec<RawAxis>,
    #[serde(deserialize_with = "null_as_default")]
    legend: RawLegend,
    null_point_mode: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    stepped_line: bool,
    #[serde(deserialize_with = "null_as_default")]
    series_overrides: Vec<Value>,
    alert: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAxis {
    #[serde(deserialize_with = "null_as_default")]
    show: bool,
    label: Option<String>,
    format: Option<String>,
    min: Option<Bound>,
    max: Option<Bound>,
    log_base: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawLegend {
    #[serde(deserialize_with = "null_as_default")]
    show: bool,
    #[serde(deserialize_with = "null_as_default")]
    align_as_table: bool,
    #[serde(deserialize_with = "null_as_default")]
    right_side: bool,
    #[serde(deserialize_with = "null_as_default")]
    min: bool,
    #[serde(deserialize_with = "null_as_default")]
    max: bool,
    #[serde(deserialize_with = "null_as_default")]
    avg: bool,
    #[serde(deserialize_with = "null_as_default")]
    current: bool,
    #[serde(deserialize_with = "null_as_default")]
    total: bool,
    #[serde(deserialize_with = "null_as_default")]
    hide_empty: bool,
    #[serde(deserialize_with = "null_as_default")]
    hide_zero: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSeriesOverride {
    #[serde(deserialize_with = "null_as_default")]
    alias: String,
    color: Option<String>,
    dashes: Option<bool>,
    lines: Option<bool>,
    fill: Option<i64>,
    linewidth: Option<i64>,
}

pub(super) fn decode(raw: &RawPanel, value: &Value, diagnostics: &mut Diagnostics) -> Option<Graph> {
    let graph: RawGraph = settings(raw, value, diagnostics)?;

    let mut axes = GraphAxes {
        bottom: Some(decode_axis(&graph.xaxis, &raw.title, diagnostics)),
        ..Default::default()
    };
    if let [left, right] = graph.yaxes.as_slice() {
        axes.left = Some(decode_axis(left, &raw.title, diagnostics));
        axes.right = Some(decode_axis(right, &raw.title, diagnostics));
    }

    let overrides = decode_each::<RawSeriesOverride>(
        &graph.series_overrides,
        WarningCategory::Override,
        diagnostics,
    )
    .into_iter()
    .map(|o| SeriesOverride {
        alias: o.alias,
        color: non_empty(o.color),
        dashes: o.dashes,
        lines: o.lines,
        fill: o.fill,
        line_width: o.linewidth,
    })
    .collect();

    Some(Graph {
        common: decode_common(raw, diagnostics),
        targets: decode_targets(&raw.targets, diagnostics),
        axes,
        legend: decode_legend(&graph.legend),
        visualization: GraphVisualization {
            null_value: non_empty(graph.null_point_mode),
            staircase: graph.stepped_line,
            overrides,
        },
        alert: decode_alert(graph.alert.as_ref(), &raw.title, diagnostics),
    })
}

fn decode_axis(axis: &RawAxis, panel: &str, diagnostics: &mut Diagnostics) -> GraphAxis {
    GraphAxis {
        hidden: !axis.show,
        label: non_empty(axis.label.clone()),
        unit: non_empty(axis.format.clone()),
        min: Bound::narrow(axis.min.clone(), "axis min", panel, diagnostics),
        max: Bound::narrow(axis.max.clone(), "axis max", panel, diagnostics),
        log_base: axis.log_base,
    }
}

fn decode_legend(legend: &RawLegend) -> Vec<GraphLegendOption> {
    [
        (!legend.show, GraphLegendOption::Hide),
        (legend.align_as_table, GraphLegendOption::AsTable),
        (legend.right_side, GraphLegendOption::ToTheRight),
        (legend.min, GraphLegendOption::Min),
        (legend.max, GraphLegendOption::Max),
        (legend.avg, GraphLegendOption::Avg),
        (legend.current, GraphLegendOption::Current),
        (legend.total, GraphLegendOption::Total),
        (legend.hide_empty, GraphLegendOption::NoNullSeries),
        (legend.hide_zero, GraphLegendOption::NoZeroSeries),
    ]
    .into_iter()
    .filter_map(|(enabled, option)| enabled.then_some(option))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dark_core::alert::AlertThreshold;
    use dark_core::target::Target;
    use serde_json::json;

    fn decode_graph(value: Value) -> (Graph, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let raw: RawPanel = serde_json::from_value(value.clone()).unwrap();
        let graph = decode(&raw, &value, &mut diagnostics).unwrap();
        (graph, diagnostics)
    }

    #[test]
    fn test_graph_axes() {
        let (graph, diagnostics) = decode_graph(json!({
            "type": "graph",
            "title": "Requests",
            "xaxis": {"show": true},
            "yaxes": [
                {"show": true, "format": "reqps", "label": "rps", "min": "0", "logBase": 1},
                {"show": false, "format": "short", "max": 100},
            ],
        }));

        let bottom = graph.axes.bottom.unwrap();
        assert!(!bottom.hidden);
        assert_eq!(bottom.min, None);

        let left = graph.axes.left.unwrap();
        assert_eq!(left.unit.as_deref(), Some("reqps"));
        assert_eq!(left.label.as_deref(), Some("rps"));
        assert_eq!(left.min, Some(0.0));
        assert_eq!(left.max, None);
        assert_eq!(left.log_base, Some(1));

        let right = graph.axes.right.unwrap();
        assert!(right.hidden);
        assert_eq!(right.max, Some(100.0));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_graph_single_yaxis_is_ignored() {
        let (graph, _) = decode_graph(json!({
            "type": "graph",
            "yaxes": [{"show": true, "format": "short"}],
        }));

        assert!(graph.axes.left.is_none());
        assert!(graph.axes.right.is_none());
        assert!(graph.axes.bottom.is_some());
    }

    #[test]
    fn test_graph_legend_order() {
        let (graph, _) = decode_graph(json!({
            "type": "graph",
            "legend": {
                "show": false,
                "hideZero": true,
                "avg": true,
                "alignAsTable": true,
                "hideEmpty": true,
                "max": true,
            },
        }));

        assert_eq!(
            graph.legend,
            vec![
                GraphLegendOption::Hide,
                GraphLegendOption::AsTable,
                GraphLegendOption::Max,
                GraphLegendOption::Avg,
                GraphLegendOption::NoNullSeries,
                GraphLegendOption::NoZeroSeries,
            ]
        );
    }

    #[test]
    fn test_graph_visualization() {
        let (graph, _) = decode_graph(json!({
            "type": "graph",
            "nullPointMode": "connected",
            "steppedLine": true,
            "seriesOverrides": [
                {"alias": "errors", "color": "#F2495C", "dashes": true, "linewidth": 2},
                {"alias": "/.*-p99/", "fill": 0, "lines": false},
            ],
        }));

        let viz = graph.visualization;
        assert_eq!(viz.null_value.as_deref(), Some("connected"));
        assert!(viz.staircase);
        assert_eq!(
            viz.overrides[0],
            SeriesOverride {
                alias: "errors".to_string(),
                color: Some("#F2495C".to_string()),
                dashes: Some(true),
                line_width: Some(2),
                ..Default::default()
            }
        );
        assert_eq!(viz.overrides[1].fill, Some(0));
        assert_eq!(viz.overrides[1].lines, Some(false));
    }

    #[test]
    fn test_graph_targets_and_alert() {
        let (graph, diagnostics) = decode_graph(json!({
            "type": "graph",
            "title": "Errors",
            "datasource": "prom",
            "targets": [
                {"expr": "sum(rate(errors_total[5m]))", "refId": "A"},
                {"refId": "B", "rawQuery": true},
            ],
            "alert": {
                "name": "Too many errors",
                "conditions": [{
                    "evaluator": {"type": "gt", "params": [5]},
                    "operator": {"type": "and"},
                    "query": {"params": ["A", "5m", "now"]},
                    "reducer": {"type": "last"},
                }],
            },
        }));

        assert_eq!(graph.common.datasource.as_deref(), Some("prom"));
        assert_eq!(graph.targets.len(), 1);
        assert!(matches!(graph.targets[0], Target::Prometheus(_)));

        let alert = graph.alert.unwrap();
        assert_eq!(alert.title, "Too many errors");
        assert_eq!(alert.conditions[0].threshold, AlertThreshold::Above(5.0));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_graph_null_settings_objects() {
        let (graph, diagnostics) = decode_graph(json!({
            "type": "graph",
            "title": "Requests",
            "xaxis": null,
            "legend": null,
        }));

        assert!(graph.axes.bottom.unwrap().hidden);
        assert_eq!(graph.legend, vec![GraphLegendOption::Hide]);
        assert!(diagnostics.is_empty());
    }
}
