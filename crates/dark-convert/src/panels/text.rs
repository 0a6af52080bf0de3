use serde::Deserialize;
use serde_json::Value;

use dark_core::panel::Text;

use super::{RawPanel, decode_common, settings};
use crate::error::Diagnostics;
use crate::input::null_as_default;

/// Text panels store their content under `options` since Grafana 7; older
/// exports keep `mode` and `content` at the top level.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawText {
    #[serde(deserialize_with = "null_as_default")]
    options: RawTextOptions,
    #[serde(deserialize_with = "null_as_default")]
    mode: String,
    #[serde(deserialize_with = "null_as_default")]
    content: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTextOptions {
    mode: Option<String>,
    content: Option<String>,
}

pub(super) fn decode(raw: &RawPanel, value: &Value, diagnostics: &mut Diagnostics) -> Option<Text> {
    let text: RawText = settings(raw, value, diagnostics)?;

    let mode = text.options.mode.unwrap_or(text.mode);
    let content = text.options.content.unwrap_or(text.content);

    let (markdown, html) = if mode == "markdown" {
        (Some(content), None)
    } else {
        (None, Some(content))
    };

    Some(Text {
        common: decode_common(raw, diagnostics),
        markdown,
        html,
    })
}
