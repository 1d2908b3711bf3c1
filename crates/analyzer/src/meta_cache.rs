//! Component F — Meta Loader/Cache (`spec.md` §4.F, §9 "Live-vs-disk meta").

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_atom::AtomMap;
use atelier_atom::AtomSet;
use atelier_reflection::ClassMeta;
use atelier_reporting::AnalyserError;

/// The three classes with no `.meta.json` of their own — ancestor walks
/// bottom out here (`spec.md` §4.F).
fn is_synthetic_root(class_name: Atom) -> bool {
    matches!(class_name.as_str(), "Object" | "Array" | "Error")
}

/// Loads, caches, and saves per-class meta for the duration of one run.
///
/// `live` holds meta seeded by freshly compiled classes this run (via
/// [`MetaCache::seed_live`]); `disk_cache` holds meta read from disk for
/// ancestors that were not recompiled. Per the live-vs-disk policy, `live`
/// always takes precedence on a lookup — it shadows any stale on-disk copy
/// while that ancestor may still be mid-merge.
#[derive(Default)]
pub struct MetaCache {
    live: AtomMap<ClassMeta>,
    disk_cache: AtomMap<ClassMeta>,
    written_this_run: AtomSet,
}

impl MetaCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the cache with a freshly compiled class's live meta (component
    /// D calls this right after the external compiler returns).
    pub fn seed_live(&mut self, class_name: Atom, meta: ClassMeta) {
        self.live.insert(class_name, meta);
    }

    /// `loadMeta(name)`: `None` for the synthetic roots; otherwise live
    /// meta if this run compiled it, else a cached or freshly read on-disk
    /// copy; a read failure is logged and treated as "ancestor not
    /// visible" rather than propagated (`spec.md` §4.F).
    pub fn load(&mut self, class_name: Atom, meta_path_for: impl FnOnce(Atom) -> PathBuf) -> Option<ClassMeta> {
        if is_synthetic_root(class_name) {
            return None;
        }

        if let Some(meta) = self.live.get(&class_name) {
            return Some(meta.clone());
        }

        if let Some(meta) = self.disk_cache.get(&class_name) {
            return Some(meta.clone());
        }

        let path = meta_path_for(class_name);
        match read_meta_file(&path) {
            Ok(meta) => {
                self.disk_cache.insert(class_name, meta.clone());
                Some(meta)
            }
            Err(err) => {
                tracing::warn!(class = %class_name, path = %path.display(), error = %err, "failed to read ancestor meta, treating as not visible");
                None
            }
        }
    }

    /// `saveMeta(name, meta)`: writes `meta` to `path`. Writing the same
    /// class twice in one run is a programmer error (`spec.md` §4.F: "must
    /// fail loudly") — it would mean G and H raced on the same class.
    pub fn save(&mut self, class_name: Atom, meta: &ClassMeta, path: &Path) -> Result<(), AnalyserError> {
        if !self.written_this_run.insert(class_name) {
            return Err(AnalyserError::MetaWriteDuplicate { class_name });
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| AnalyserError::SourceIo { class_name, source })?;
        }

        let json = serde_json::to_string_pretty(meta)
            .map_err(|err| AnalyserError::Parse { class_name, message: err.to_string() })?;

        fs::write(path, json).map_err(|source| AnalyserError::SourceIo { class_name, source })
    }

    /// Live meta staged this run, for the merger and descendant fixup to
    /// iterate over once the closure's worklist has drained.
    pub fn live_entries(&self) -> impl Iterator<Item = (&Atom, &ClassMeta)> {
        self.live.iter()
    }

    pub fn live_mut(&mut self, class_name: Atom) -> Option<&mut ClassMeta> {
        self.live.get_mut(&class_name)
    }
}

fn read_meta_file(path: &Path) -> std::io::Result<ClassMeta> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(std::io::Error::other)
}

#[cfg(test)]
mod tests {
    use atelier_reflection::ClassLikeKind;

    use super::*;

    #[test]
    fn synthetic_roots_never_resolve() {
        let mut cache = MetaCache::new();
        assert_eq!(cache.load(Atom::new("Object"), |_| PathBuf::new()), None);
    }

    #[test]
    fn live_meta_shadows_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.Widget.meta.json");
        fs::write(&path, serde_json::to_string(&ClassMeta::new(ClassLikeKind::Interface)).unwrap()).unwrap();

        let mut cache = MetaCache::new();
        cache.seed_live(Atom::new("app.Widget"), ClassMeta::new(ClassLikeKind::Class));

        let resolved = cache.load(Atom::new("app.Widget"), |_| path.clone()).unwrap();
        assert_eq!(resolved.kind, ClassLikeKind::Class);
    }

    #[test]
    fn missing_ancestor_file_is_treated_as_not_visible() {
        let mut cache = MetaCache::new();
        assert_eq!(cache.load(Atom::new("app.Ghost"), |_| PathBuf::from("/does/not/exist.meta.json")), None);
    }

    #[test]
    fn saving_the_same_class_twice_fails_loudly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.Widget.meta.json");
        let mut cache = MetaCache::new();
        let meta = ClassMeta::new(ClassLikeKind::Class);

        cache.save(Atom::new("app.Widget"), &meta, &path).unwrap();
        let second = cache.save(Atom::new("app.Widget"), &meta, &path);

        assert!(matches!(second, Err(AnalyserError::MetaWriteDuplicate { .. })));
    }
}
