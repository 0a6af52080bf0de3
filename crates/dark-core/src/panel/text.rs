use serde::Serialize;

use super::PanelCommon;

/// Static content panel; exactly one of `markdown` / `html` is set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Text {
    #[serde(flatten)]
    pub common: PanelCommon,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}
