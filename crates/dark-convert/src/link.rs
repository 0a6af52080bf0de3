//! Dashboard and panel link decoders

use serde::Deserialize;
use serde_json::Value;

use dark_core::dashboard::{DashboardInternalLink, ExternalLink, PanelLink};

use crate::error::{ConversionWarning, Diagnostics, WarningCategory};
use crate::input::{decode_each, non_empty, null_as_default};

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct RawLink {
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    kind: String,
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    url: Option<String>,
    tooltip: Option<String>,
    icon: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    as_dropdown: bool,
    #[serde(deserialize_with = "null_as_default")]
    target_blank: bool,
    #[serde(deserialize_with = "null_as_default")]
    keep_time: bool,
    #[serde(deserialize_with = "null_as_default")]
    include_vars: bool,
}

/// Dashboard header links, split by kind
#[derive(Debug, Default)]
pub(crate) struct DashboardLinks {
    pub internal: Vec<DashboardInternalLink>,
    pub external: Vec<ExternalLink>,
}

/// Decode the dashboard-level `links` list
pub(crate) fn decode_dashboard_links(
    raw: &[Value],
    diagnostics: &mut Diagnostics,
) -> DashboardLinks {
    let mut links = DashboardLinks::default();

    for link in decode_each::<RawLink>(raw, WarningCategory::Link, diagnostics) {
        match link.kind.as_str() {
            "dashboards" => links.internal.push(DashboardInternalLink {
                title: link.title,
                tags: link.tags,
                as_dropdown: link.as_dropdown,
                open_in_new_tab: link.target_blank,
                include_time_range: link.keep_time,
                include_variable_values: link.include_vars,
            }),
            "link" => {
                let Some(url) = non_empty(link.url) else {
                    diagnostics.push(ConversionWarning::warning(
                        WarningCategory::Link,
                        &link.title,
                        "link URL empty: skipped",
                    ));
                    continue;
                };

                links.external.push(ExternalLink {
                    title: link.title,
                    url,
                    description: non_empty(link.tooltip),
                    icon: non_empty(link.icon),
                    open_in_new_tab: link.target_blank,
                    include_time_range: link.keep_time,
                    include_variable_values: link.include_vars,
                });
            }
            kind => diagnostics.push(ConversionWarning::unsupported(
                WarningCategory::Link,
                &link.title,
                format!("unhandled link type '{}': skipped", kind),
            )),
        }
    }

    links
}

/// Decode the links attached to a panel
pub(crate) fn decode_panel_links(raw: &[Value], diagnostics: &mut Diagnostics) -> Vec<PanelLink> {
    decode_each::<RawLink>(raw, WarningCategory::Link, diagnostics)
        .into_iter()
        .filter_map(|link| {
            let Some(url) = non_empty(link.url) else {
                diagnostics.push(ConversionWarning::warning(
                    WarningCategory::Link,
                    &link.title,
                    "panel link URL empty: skipped",
                ));
                return None;
            };

            Some(PanelLink {
                title: link.title,
                url,
                open_in_new_tab: link.target_blank,
                include_time_range: link.keep_time,
                include_variable_values: link.include_vars,
            })
        })
        .collect()
}
