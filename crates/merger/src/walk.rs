//! Pass 2 of the merger: the ancestor walk that builds `members`/`properties`
//! bookkeeping (`spec.md` §4.G).

use atelier_atom::Atom;
use atelier_atom::AtomSet;
use atelier_reflection::ClassLikeKind;
use atelier_reflection::ClassMeta;
use atelier_reflection::EntityKind;
use atelier_reflection::EntityOrigin;
use atelier_reflection::MemberEntry;
use atelier_reflection::PropertyEntry;

use crate::ancestor_source::AncestorMetaSource;

/// Walks `class_name`'s ancestors in the order `spec.md` §4.G mandates
/// (self, then interfaces, then mixins, then super-class) and merges their
/// `members`/`properties` bookkeeping into `meta`'s own tables.
///
/// `meta` is both the input (the class's own freshly-compiled declarations)
/// and the output (the same maps, now carrying `appearsIn`/`overriddenFrom`/
/// `abstract`/`mixin`/`inherited` for every entity reachable from this
/// class, including ones it never declares itself).
pub fn walk_ancestors(class_name: Atom, meta: &mut ClassMeta, source: &mut dyn AncestorMetaSource) {
    let mut visited = AtomSet::default();
    visited.insert(class_name);

    visit_self(class_name, meta.kind, meta);

    let ancestors: Vec<Atom> = meta.direct_ancestors().collect();
    for ancestor in ancestors {
        recurse(ancestor, meta, source, &mut visited);
    }
}

/// Records the class's own declarations as the first (non-inherited)
/// supplier of each entity it declares.
fn visit_self(class_name: Atom, kind: ClassLikeKind, meta: &mut ClassMeta) {
    let _ = class_name;
    for member in meta.members.values_mut() {
        apply_visit(&mut member.origin, kind, true);
    }
    for property in meta.properties.values_mut() {
        apply_visit(&mut property.origin, kind, true);
    }
}

fn recurse(ancestor: Atom, meta: &mut ClassMeta, source: &mut dyn AncestorMetaSource, visited: &mut AtomSet) {
    if visited.contains(&ancestor) {
        return;
    }
    visited.insert(ancestor);

    let Some(ancestor_meta) = source.resolve(ancestor) else {
        return;
    };

    for (name, ancestor_member) in &ancestor_meta.members {
        let row_exists = meta.members.contains_key(name);
        let entry = meta.members.entry(*name).or_insert_with(|| MemberEntry {
            r#type: ancestor_member.r#type,
            access: ancestor_member.access,
            property: ancestor_member.property,
            origin: EntityOrigin::default(),
            jsdoc: ancestor_member.jsdoc.clone(),
        });

        if matches!(ancestor_member.r#type, EntityKind::Function) {
            entry.r#type = EntityKind::Function;
        }

        if !row_exists {
            entry.origin.inherited = true;
        }
        apply_visit(&mut entry.origin, ancestor_meta.kind, !row_exists);
        entry.origin.record_supplier(ancestor);

        if let Some(ancestor_jsdoc) = &ancestor_member.jsdoc {
            if ancestor_jsdoc.has_signature() && entry_signature_missing(&entry.jsdoc) {
                entry.jsdoc.get_or_insert_with(Default::default).adopt_signature_from(ancestor_jsdoc);
            }
        }
    }

    for (name, ancestor_property) in &ancestor_meta.properties {
        let row_exists = meta.properties.contains_key(name);
        let entry = meta.properties.entry(*name).or_insert_with(|| PropertyEntry {
            check: ancestor_property.check.clone(),
            r#async: ancestor_property.r#async,
            refine: false,
            origin: EntityOrigin::default(),
            jsdoc: ancestor_property.jsdoc.clone(),
            extra: ancestor_property.extra.clone(),
        });

        if !row_exists {
            entry.origin.inherited = true;
        }
        apply_visit(&mut entry.origin, ancestor_meta.kind, !row_exists);
        entry.origin.record_supplier(ancestor);

        if let Some(ancestor_jsdoc) = &ancestor_property.jsdoc {
            if ancestor_jsdoc.has_signature() && entry_signature_missing(&entry.jsdoc) {
                entry.jsdoc.get_or_insert_with(Default::default).adopt_signature_from(ancestor_jsdoc);
            }
        }
    }

    for next in ancestor_meta.direct_ancestors().collect::<Vec<_>>() {
        recurse(next, meta, source, visited);
    }
}

/// Whether the entry's jsdoc signature is still unset (used to decide
/// whether to adopt an ancestor's).
fn entry_signature_missing(jsdoc: &Option<atelier_reflection::JsDoc>) -> bool {
    match jsdoc {
        Some(existing) => !existing.has_signature(),
        None => true,
    }
}

/// `spec.md` §4.G: "If A is a mixin and the row is currently abstract, set
/// mixin=true. If A is not an interface, clear abstract." Applied in that
/// order so a mixin that supplies a previously-interface-only entity is
/// marked `mixin=true` before its abstractness is cleared by the same
/// visit. `is_first_sight` skips the mixin/abstract-clear adjustments on
/// creation, where the initial values already encode them.
fn apply_visit(origin: &mut EntityOrigin, ancestor_kind: ClassLikeKind, is_first_sight: bool) {
    if is_first_sight {
        origin.r#abstract = ancestor_kind == ClassLikeKind::Interface;
        origin.mixin = ancestor_kind == ClassLikeKind::Mixin;
        return;
    }

    if ancestor_kind == ClassLikeKind::Mixin && origin.r#abstract {
        origin.mixin = true;
    }
    if ancestor_kind != ClassLikeKind::Interface {
        origin.r#abstract = false;
    }
}
