use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::jsdoc::JsDoc;
use crate::member::AccessorKind;
use crate::member::EntityOrigin;

/// A property declaration's type check, the only part of it the merger
/// inspects directly: whether accessors need the `is<P>` Boolean variant
/// (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyCheck(pub String);

impl PropertyCheck {
    pub fn is_boolean(&self) -> bool {
        self.0 == "Boolean"
    }
}

/// One entry of `meta.properties`, merged across the ancestor walk the same
/// way `meta.members` is. `check`/`async`/`refine` are the declaration
/// facts the external compiler records; everything else the property
/// config carries (`init`, `apply`, `event`, `themeable`, …) is opaque to
/// the analyser and round-trips through `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check: Option<PropertyCheck>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not", rename = "async")]
    pub r#async: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub refine: bool,
    #[serde(flatten)]
    pub origin: EntityOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PropertyEntry {
    pub fn declared(check: Option<&str>, is_async: bool) -> Self {
        Self {
            check: check.map(|c| PropertyCheck(c.to_string())),
            r#async: is_async,
            refine: false,
            origin: EntityOrigin::default(),
            jsdoc: None,
            extra: Map::new(),
        }
    }

    /// The accessor kinds `spec.md` §3 requires for this property: `get`,
    /// `set`, `reset` always; `is` when the check is `Boolean`; the three
    /// `Async` variants in addition when the property is declared async.
    pub fn required_accessors(&self) -> Vec<AccessorKind> {
        let is_boolean = self.check.as_ref().is_some_and(PropertyCheck::is_boolean);

        let mut accessors = vec![AccessorKind::Get, AccessorKind::Set, AccessorKind::Reset];
        if is_boolean {
            accessors.push(AccessorKind::Is);
        }
        if self.r#async {
            accessors.push(AccessorKind::GetAsync);
            accessors.push(AccessorKind::SetAsync);
            if is_boolean {
                accessors.push(AccessorKind::IsAsync);
            }
        }

        accessors
    }
}
