use atelier_atom::Atom;
use atelier_atom::AtomMap;
use serde::Deserialize;
use serde::Serialize;

use crate::event::EventEntry;
use crate::jsdoc::JsDoc;
use crate::member::MemberEntry;
use crate::property::PropertyEntry;
use crate::static_entry::StaticEntry;

/// What kind of class-like entity a compiled class is. The ancestor walk
/// (`spec.md` §4.G pass 2) dispatches on this at every visited ancestor:
/// interfaces keep entities abstract, mixins set the `mixin` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassLikeKind {
    Class,
    Interface,
    Mixin,
}

/// The synthetic, non-member JSDoc slots every class carries (`spec.md`
/// §4.G pass 1: "the synthetic slots `clazz`, `construct`, `destruct`,
/// `defer`").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSlots {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clazz: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub construct: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destruct: Option<JsDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defer: Option<JsDoc>,
}

/// The per-class `.meta.json` document: the external compiler's raw
/// per-class output, augmented in place by the merger (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMeta {
    pub kind: ClassLikeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_class: Option<Atom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<Atom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<Atom>,
    #[serde(default, skip_serializing_if = "AtomMap::is_empty")]
    pub properties: AtomMap<PropertyEntry>,
    #[serde(default, skip_serializing_if = "AtomMap::is_empty")]
    pub members: AtomMap<MemberEntry>,
    #[serde(default, skip_serializing_if = "AtomMap::is_empty")]
    pub statics: AtomMap<StaticEntry>,
    #[serde(default, skip_serializing_if = "AtomMap::is_empty")]
    pub events: AtomMap<EventEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descendants: Vec<Atom>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not", rename = "abstract")]
    pub r#abstract: bool,
    #[serde(default, skip_serializing_if = "is_default_slots")]
    pub synthetic: SyntheticSlots,
}

fn is_default_slots(slots: &SyntheticSlots) -> bool {
    *slots == SyntheticSlots::default()
}

impl ClassMeta {
    pub fn new(kind: ClassLikeKind) -> Self {
        Self {
            kind,
            super_class: None,
            interfaces: Vec::new(),
            mixins: Vec::new(),
            properties: AtomMap::default(),
            members: AtomMap::default(),
            statics: AtomMap::default(),
            events: AtomMap::default(),
            descendants: Vec::new(),
            r#abstract: kind == ClassLikeKind::Interface,
            synthetic: SyntheticSlots::default(),
        }
    }

    /// Ancestors to recurse into, in the walk order `spec.md` §4.G pass 2
    /// mandates: interfaces, then mixins, then super-class.
    pub fn direct_ancestors(&self) -> impl Iterator<Item = Atom> + '_ {
        self.interfaces.iter().copied().chain(self.mixins.iter().copied()).chain(self.super_class)
    }
}
