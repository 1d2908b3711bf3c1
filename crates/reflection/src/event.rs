use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::jsdoc::JsDoc;

/// One entry of `meta.events`. Events are not part of the ancestor-merge
/// table (`spec.md` §4.G pass 2 only builds `members`/`properties`); they
/// only go through pass 1's JSDoc fixup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
