use atelier_atom::Atom;
use serde::Deserialize;
use serde::Serialize;

use crate::access::AccessModifier;
use crate::jsdoc::JsDoc;

/// Whether a member is a method (`function`) or a plain field (`variable`);
/// see `spec.md` §3's member entry shape and §4.G's upgrade rule ("a member
/// entry declared `variable` in meta but discovered to be a function in the
/// table" is upgraded to `Function`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Function,
    Variable,
}

/// The flavor of a synthesized property-accessor method (`spec.md` §3,
/// "Property accessor completeness").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessorKind {
    Get,
    Is,
    Set,
    Reset,
    GetAsync,
    SetAsync,
    IsAsync,
}

impl AccessorKind {
    /// The method name for this accessor on property `property_name`, e.g.
    /// `AccessorKind::Get` on `"enabled"` is `"getEnabled"`.
    pub fn method_name(self, property_name: &str) -> String {
        let capitalized = capitalize(property_name);
        match self {
            AccessorKind::Get => format!("get{capitalized}"),
            AccessorKind::Is => format!("is{capitalized}"),
            AccessorKind::Set => format!("set{capitalized}"),
            AccessorKind::Reset => format!("reset{capitalized}"),
            AccessorKind::GetAsync => format!("get{capitalized}Async"),
            AccessorKind::SetAsync => format!("set{capitalized}Async"),
            AccessorKind::IsAsync => format!("is{capitalized}Async"),
        }
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Bookkeeping the ancestor walk (`spec.md` §4.G, pass 2) maintains for
/// every member and property it visits, independent of what kind of entity
/// it is. Shared between [`MemberEntry`] and `PropertyEntry` the same way
/// the walk treats both tables uniformly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityOrigin {
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub r#abstract: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub mixin: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub appears_in: Vec<Atom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden_from: Option<Atom>,
}

impl EntityOrigin {
    /// Records a new ancestor as a supplier of this entity: extends
    /// `appears_in` and claims `overridden_from` if unclaimed yet
    /// (`spec.md` §3: "first-hit wins; walk order defines which ancestor
    /// wins").
    pub fn record_supplier(&mut self, ancestor: Atom) {
        if !self.appears_in.contains(&ancestor) {
            self.appears_in.push(ancestor);
        }
        if self.overridden_from.is_none() {
            self.overridden_from = Some(ancestor);
        }
    }
}

/// One entry of `meta.members`: a method or field, merged across the
/// ancestor walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberEntry {
    pub r#type: EntityKind,
    pub access: AccessModifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<AccessorKind>,
    #[serde(flatten)]
    pub origin: EntityOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsdoc: Option<JsDoc>,
}

impl MemberEntry {
    pub fn declared(name: &str, kind: EntityKind) -> Self {
        Self {
            r#type: kind,
            access: AccessModifier::for_member_name(name),
            property: None,
            origin: EntityOrigin::default(),
            jsdoc: None,
        }
    }

    pub fn is_abstract(&self) -> bool {
        self.origin.r#abstract
    }
}
