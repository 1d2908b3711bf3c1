//! Meta Merger (`spec.md` §4.G): turns a freshly compiled class's own
//! declarations into the fully-merged per-class meta-model by walking its
//! ancestors for `appearsIn`/`overriddenFrom`/`abstract`/`mixin` bookkeeping,
//! then synthesizing the property-accessor methods every property requires.
//!
//! This crate owns the merge algorithm only; it knows nothing about where a
//! `ClassMeta` comes from or where it is written back to — that's
//! `atelier-analyzer`'s job, reached through the [`AncestorMetaSource`] seam.

mod accessors;
mod ancestor_source;
mod walk;

pub use ancestor_source::AncestorMetaSource;

use atelier_atom::Atom;
use atelier_reflection::ClassMeta;

/// Runs pass 2 of the merge (`spec.md` §4.G) end to end: the ancestor walk,
/// property-accessor synthesis, and the final `meta.abstract` propagation
/// ("if any materialized member is abstract, set `meta.abstract = true`").
///
/// Pass 1 (JSDoc fixup against the owning class name) is the external
/// JSDoc parser's concern and happens before `meta` reaches this function.
pub fn merge_class(class_name: Atom, meta: &mut ClassMeta, source: &mut dyn AncestorMetaSource) {
    walk::walk_ancestors(class_name, meta, source);
    accessors::synthesize_accessors(meta);

    if meta.members.values().any(|member| member.is_abstract()) {
        meta.r#abstract = true;
    }
}

#[cfg(test)]
mod tests {
    use atelier_atom::AtomMap;
    use atelier_reflection::ClassLikeKind;
    use atelier_reflection::PropertyEntry;

    use super::*;

    #[test]
    fn class_with_only_interface_ancestor_and_declared_property_is_concrete() {
        let mut interface = ClassMeta::new(ClassLikeKind::Interface);
        interface.properties.insert(Atom::new("enabled"), PropertyEntry::declared(Some("Boolean"), false));

        let mut sources: AtomMap<ClassMeta> = AtomMap::default();
        sources.insert(Atom::new("app.IWidget"), interface);

        let mut meta = ClassMeta::new(ClassLikeKind::Class);
        meta.interfaces.push(Atom::new("app.IWidget"));
        meta.properties.insert(Atom::new("enabled"), PropertyEntry::declared(Some("Boolean"), false));

        merge_class(Atom::new("app.Widget"), &mut meta, &mut sources);

        assert!(!meta.r#abstract);
        assert!(meta.members.contains_key(&Atom::new("getEnabled")));
        assert!(meta.members.contains_key(&Atom::new("isEnabled")));
        assert!(meta.members.contains_key(&Atom::new("setEnabled")));
        assert!(meta.members.contains_key(&Atom::new("resetEnabled")));
    }

    #[test]
    fn unimplemented_interface_method_propagates_to_class_abstract() {
        let mut interface = ClassMeta::new(ClassLikeKind::Interface);
        interface.members.insert(
            Atom::new("serialize"),
            atelier_reflection::MemberEntry::declared("serialize", atelier_reflection::EntityKind::Function),
        );

        let mut sources: AtomMap<ClassMeta> = AtomMap::default();
        sources.insert(Atom::new("app.ISerializable"), interface);

        let mut meta = ClassMeta::new(ClassLikeKind::Class);
        meta.interfaces.push(Atom::new("app.ISerializable"));

        merge_class(Atom::new("app.Widget"), &mut meta, &mut sources);

        assert!(meta.r#abstract);
        assert!(meta.members.get(&Atom::new("serialize")).unwrap().is_abstract());
    }
}
