use atelier_atom::Atom;
use atelier_reflection::ClassMeta;

/// What the ancestor walk needs from the meta cache (component F): given a
/// name, the meta that class currently has — live (freshly compiled, this
/// run) or on-disk (not recompiled this run), per the "live-vs-disk" policy
/// in `spec.md` §9. `None` means the ancestor is not visible (one of the
/// three synthetic roots, or a read failure logged upstream); the walk
/// treats it as a dead end.
pub trait AncestorMetaSource {
    fn resolve(&mut self, class_name: Atom) -> Option<ClassMeta>;
}

/// An [`AncestorMetaSource`] backed by a plain map, useful for tests and for
/// callers that have already materialized every ancestor's meta.
impl AncestorMetaSource for atelier_atom::AtomMap<ClassMeta> {
    fn resolve(&mut self, class_name: Atom) -> Option<ClassMeta> {
        self.get(&class_name).cloned()
    }
}
