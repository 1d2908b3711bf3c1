//! JSDoc fragments attached to meta entries.
//!
//! Parsing JSDoc comments out of source is an external collaborator's job
//! (`spec.md` §1); what lands here is already-parsed structured data that
//! the merger reads (to propagate a signature upward) and writes (to attach
//! the canonical synthesized-accessor descriptions from `spec.md` §6).

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDocParam {
    pub name: String,
    pub r#type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDocReturn {
    pub r#type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// One entity's documentation: a description plus the `@param`/`@return`
/// signature the merger may propagate from an ancestor (`spec.md` §4.G).
/// Tags this crate does not model explicitly (`@see`, `@deprecated`, …)
/// round-trip through `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JsDoc {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#return: Option<JsDocReturn>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<JsDocParam>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JsDoc {
    pub fn with_description(description: impl Into<String>) -> Self {
        Self { description: description.into(), ..Self::default() }
    }

    /// A signature is present once either a return type or at least one
    /// param has been recorded; an empty description alone doesn't count
    /// (`spec.md` §9: `mergeSignature` only looks at `@param`/`@return`).
    pub fn has_signature(&self) -> bool {
        self.r#return.is_some() || !self.params.is_empty()
    }

    /// Copies `@param`/`@return` from `other` into `self`, in place, without
    /// touching `description` or `extra`.
    pub fn adopt_signature_from(&mut self, other: &JsDoc) {
        self.r#return = other.r#return.clone();
        self.params = other.params.clone();
    }
}
