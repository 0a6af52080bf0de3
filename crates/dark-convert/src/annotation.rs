//! Annotation decoder

use serde::Deserialize;
use serde_json::Value;

use dark_core::dashboard::TagAnnotation;

use crate::error::{ConversionWarning, Diagnostics, WarningCategory};
use crate::input::{Datasource, decode_each, null_as_default};

/// Grafana adds this annotation to every dashboard; it is never exported
pub const BUILT_IN_ANNOTATION: &str = "Annotations & Alerts";

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawAnnotation {
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    datasource: Option<Datasource>,
    #[serde(deserialize_with = "null_as_default")]
    icon_color: String,
    #[serde(deserialize_with = "null_as_default")]
    tags: Vec<String>,
}

/// Decode `annotations.list`, keeping tag annotations only
pub(crate) fn decode_annotations(
    raw: &[Value],
    diagnostics: &mut Diagnostics,
) -> Vec<TagAnnotation> {
    let annotations: Vec<RawAnnotation> =
        decode_each(raw, WarningCategory::Annotation, diagnostics);

    annotations
        .into_iter()
        .filter(|annotation| annotation.name != BUILT_IN_ANNOTATION)
        .filter_map(|annotation| {
            if annotation.kind != "tags" {
                diagnostics.push(ConversionWarning::unsupported(
                    WarningCategory::Annotation,
                    &annotation.name,
                    format!("unhandled annotation type '{}': skipped", annotation.kind),
                ));
                return None;
            }

            Some(TagAnnotation {
                name: annotation.name,
                datasource: annotation
                    .datasource
                    .and_then(Datasource::legacy_name)
                    .unwrap_or_default(),
                icon_color: annotation.icon_color,
                tags: annotation.tags,
            })
        })
        .collect()
}
