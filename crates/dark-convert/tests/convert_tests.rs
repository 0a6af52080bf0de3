//! End-to-end conversion tests

use dark_convert::{
    ConvertError, ConvertOptions, Converter, WarningCategory, WarningSeverity, convert,
    convert_dashboard,
};
use dark_core::panel::{Panel, ReduceCalc};
use dark_core::{ManifestError, ManifestOptions, Variable};
use serde_json::json;

/// Get the fixtures path
fn fixtures_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures")
}

fn fixture() -> String {
    std::fs::read_to_string(format!("{}/dashboard.json", fixtures_path()))
        .expect("fixture dashboard should be readable")
}

mod assembly {
    use super::*;

    #[test]
    fn test_row_then_graph() {
        let input = r#"{"title":"T","panels":[{"type":"row","title":"R1"},{"type":"graph","title":"G1","datasource":"prom"}]}"#;

        let conversion = convert_dashboard(input).unwrap();
        let rows = &conversion.dashboard.rows;

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "R1");
        assert_eq!(rows[0].panels.len(), 1);

        let Panel::Graph(graph) = &rows[0].panels[0] else {
            panic!("expected a graph panel");
        };
        assert_eq!(graph.common.title, "G1");
        assert_eq!(graph.common.datasource.as_deref(), Some("prom"));
    }

    #[test]
    fn test_no_panels() {
        let conversion = convert_dashboard(r#"{"title": "Empty"}"#).unwrap();

        assert!(conversion.dashboard.rows.is_empty());
        assert!(conversion.is_clean());
    }

    #[test]
    fn test_unknown_panel_between_valid_panels() {
        let input = json!({
            "title": "T",
            "panels": [
                {"type": "graph", "title": "Before"},
                {"type": "worldmap-panel", "title": "Map"},
                {"type": "text", "title": "After"},
            ],
        });

        let conversion = convert_dashboard(&input.to_string()).unwrap();
        let titles: Vec<_> = conversion.dashboard.panels().map(Panel::title).collect();

        assert_eq!(titles, vec!["Before", "After"]);
        assert_eq!(conversion.warnings.len(), 1);

        let warning = &conversion.warnings[0];
        assert_eq!(warning.severity, WarningSeverity::Unsupported);
        assert_eq!(warning.category, WarningCategory::Panel);
        assert_eq!(warning.subject, "Map");
        assert!(warning.message.contains("worldmap-panel"));
    }

    #[test]
    fn test_malformed_items_do_not_abort() {
        let input = json!({
            "title": "T",
            "panels": [
                {"type": "graph", "title": "Fine", "targets": [{"expr": 12}, {"expr": "up"}]},
                "not a panel",
            ],
            "templating": {"list": [{"type": "custom", "name": ["oops"]}]},
        });

        let conversion = convert_dashboard(&input.to_string()).unwrap();

        let Panel::Graph(graph) = &conversion.dashboard.rows[0].panels[0] else {
            panic!("expected a graph panel");
        };
        assert_eq!(graph.targets.len(), 1);
        assert!(conversion.dashboard.variables.is_empty());
        assert_eq!(conversion.count(WarningSeverity::Error), 3);
    }

    #[test]
    fn test_pass_through_settings() {
        let input = json!({
            "title": "Pass through",
            "uid": "abc-123",
            "slug": "pass-through",
            "editable": true,
            "sharedCrosshair": true,
            "tags": ["a", "b"],
            "timezone": "utc",
        });

        let dashboard = convert_dashboard(&input.to_string()).unwrap().dashboard;

        assert_eq!(dashboard.title, "Pass through");
        assert_eq!(dashboard.uid.as_deref(), Some("abc-123"));
        assert_eq!(dashboard.slug.as_deref(), Some("pass-through"));
        assert!(dashboard.editable);
        assert!(dashboard.shared_crosshair);
        assert_eq!(dashboard.tags, vec!["a", "b"]);
        assert_eq!(dashboard.timezone.as_deref(), Some("utc"));
    }

    #[test]
    fn test_built_in_annotation_is_excluded() {
        let input = json!({
            "annotations": {
                "list": [
                    {"name": "Annotations & Alerts", "type": "tags", "tags": ["x"]},
                    {"name": "Releases", "type": "tags", "datasource": "prom", "tags": ["release"]},
                ],
            },
        });

        let conversion = convert_dashboard(&input.to_string()).unwrap();
        let names: Vec<_> = conversion
            .dashboard
            .tags_annotations
            .iter()
            .map(|a| a.name.as_str())
            .collect();

        assert_eq!(names, vec!["Releases"]);
        assert!(conversion.is_clean());
    }

    #[test]
    fn test_gauge_reducers() {
        for (calcs, expected) in [
            (json!(["lastNotNull"]), ReduceCalc::LastNonNull),
            (json!(["mean"]), ReduceCalc::Avg),
            (json!([]), ReduceCalc::LastNonNull),
        ] {
            let input = json!({
                "panels": [{
                    "type": "gauge",
                    "title": "G",
                    "options": {"reduceOptions": {"calcs": calcs}},
                }],
            });

            let conversion = convert_dashboard(&input.to_string()).unwrap();
            let Panel::Gauge(gauge) = &conversion.dashboard.rows[0].panels[0] else {
                panic!("expected a gauge panel");
            };
            assert_eq!(gauge.value_type, expected);
        }
    }
}

mod output {
    use super::*;

    #[test]
    fn test_yaml_output() {
        let input = r#"{"title": "Snapshot", "panels": [{"type": "row", "title": "Main"}, {"type": "text", "title": "Hello", "gridPos": {"h": 8, "w": 12}, "options": {"mode": "markdown", "content": "hi"}}]}"#;

        let mut output = Vec::new();
        convert(input.as_bytes(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        insta::assert_snapshot!(yaml, @r"
        title: Snapshot
        editable: false
        shared_crosshair: false
        rows:
        - name: Main
          panels:
          - text:
              title: Hello
              span: 6.0
              markdown: hi
        ");
    }

    #[test]
    fn test_manifest_output() {
        let options = ConvertOptions::manifest(
            ManifestOptions::new("api-overview", "Team API").with_namespace("monitoring"),
        );

        let mut output = Vec::new();
        Converter::new(options)
            .convert(r#"{"title": "API"}"#.as_bytes(), &mut output)
            .unwrap();

        let manifest: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
        assert_eq!(manifest["apiVersion"], "k8s.kevingomez.fr/v1");
        assert_eq!(manifest["kind"], "GrafanaDashboard");
        assert_eq!(manifest["metadata"]["name"], "api-overview");
        assert_eq!(manifest["metadata"]["namespace"], "monitoring");
        assert_eq!(manifest["folder"], "Team API");
        assert_eq!(manifest["spec"]["title"], "API");
    }

    #[test]
    fn test_manifest_without_namespace() {
        let options = ConvertOptions::manifest(ManifestOptions::new("api", "Team"));

        let mut output = Vec::new();
        Converter::new(options)
            .convert(r#"{"title": "API"}"#.as_bytes(), &mut output)
            .unwrap();

        let manifest: serde_yaml::Value = serde_yaml::from_slice(&output).unwrap();
        assert!(manifest["metadata"].get("namespace").is_none());
    }

    #[test]
    fn test_manifest_options_checked_before_parsing() {
        let options = ConvertOptions::manifest(ManifestOptions::new("api", ""));

        let mut output = Vec::new();
        let err = Converter::new(options)
            .convert("not even json".as_bytes(), &mut output)
            .unwrap_err();

        assert!(matches!(
            err,
            ConvertError::Manifest(ManifestError::MissingFolder)
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_invalid_json_is_fatal() {
        let mut output = Vec::new();
        let err = convert("{\"title\": ".as_bytes(), &mut output).unwrap_err();

        assert!(matches!(err, ConvertError::Json(_)));
        assert!(output.is_empty());
    }
}

mod fixture_dashboard {
    use super::*;

    #[test]
    fn test_fixture_structure() {
        let conversion = convert_dashboard(&fixture()).unwrap();
        let dashboard = &conversion.dashboard;

        assert_eq!(dashboard.title, "API Overview");
        assert_eq!(dashboard.uid.as_deref(), Some("api-overview"));
        assert!(dashboard.shared_crosshair);
        assert_eq!(dashboard.auto_refresh.as_deref(), Some("1m"));
        assert_eq!(
            dashboard.time,
            Some(["now-6h".to_string(), "now".to_string()])
        );

        let rows: Vec<_> = dashboard
            .rows
            .iter()
            .map(|row| (row.name.as_str(), row.panels.len()))
            .collect();
        assert_eq!(rows, vec![("Overview", 4), ("Traffic", 4), ("Logs", 1)]);
        assert!(dashboard.rows[2].collapse);

        let kinds: Vec<_> = dashboard.panels().map(Panel::kind).collect();
        assert_eq!(
            kinds,
            vec![
                "stat",
                "gauge",
                "singlestat",
                "text",
                "graph",
                "timeseries",
                "heatmap",
                "table",
                "logs",
            ]
        );
    }

    #[test]
    fn test_fixture_variables_links_and_annotations() {
        let dashboard = convert_dashboard(&fixture()).unwrap().dashboard;

        let names: Vec<_> = dashboard.variables.iter().map(Variable::name).collect();
        assert_eq!(
            names,
            vec!["datasource", "namespace", "interval", "quantile", "region"]
        );

        let Variable::Query(namespace) = &dashboard.variables[1] else {
            panic!("expected a query variable");
        };
        assert!(namespace.default_all);
        assert_eq!(namespace.request, "label_values(up{job=\"api\"}, namespace)");

        assert_eq!(dashboard.tags_annotations.len(), 1);
        assert_eq!(dashboard.tags_annotations[0].name, "Deployments");

        assert_eq!(dashboard.dashboard_links.len(), 1);
        assert!(dashboard.dashboard_links[0].as_dropdown);
        assert_eq!(dashboard.external_links.len(), 1);
        assert_eq!(dashboard.external_links[0].url, "https://runbooks.example.com/api");
    }

    #[test]
    fn test_fixture_warnings() {
        let conversion = convert_dashboard(&fixture()).unwrap();

        let subjects: Vec<_> = conversion
            .warnings
            .iter()
            .map(|w| (w.category, w.subject.as_str()))
            .collect();

        assert_eq!(
            subjects,
            vec![
                (WarningCategory::Variable, "search"),
                (WarningCategory::Panel, "Methods"),
            ]
        );
        assert_eq!(conversion.count(WarningSeverity::Unsupported), 2);
        assert!(!conversion.has_errors());
    }

    #[test]
    fn test_fixture_renders() {
        let mut output = Vec::new();
        convert(fixture().as_bytes(), &mut output).unwrap();
        let yaml = String::from_utf8(output).unwrap();

        assert!(yaml.contains("title: API Overview"));
        assert!(yaml.contains("- graph:"));
        assert!(yaml.contains("prometheus:"));
        assert!(yaml.contains("- name: Logs"));
        assert!(!yaml.contains("piechart"));
        assert!(!yaml.contains('!'));
    }
}
