use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::jsdoc::JsDoc;

/// One entry of `meta.statics`, same JSDoc-only treatment as [`crate::event::EventEntry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
