//! Component H — Descendant Fixup (`spec.md` §4.H).
//!
//! During D, the driver collects every name appearing as `extends`,
//! `implement`, or `include` in either the old or the new `ClassInfo` of a
//! just-compiled class (see [`collect_candidates`]). After G finishes, any
//! such name that was not itself recompiled this run but does exist in the
//! DB gets its `descendants[]` recomputed by a full DB scan, and is saved.

use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_atom::AtomSet;
use atelier_database::ClassDb;
use atelier_database::ClassInfo;
use atelier_reporting::AnalyserError;

use crate::meta_cache::MetaCache;

/// Folds one compiled class's old/new ancestor names into the running
/// candidate set the driver accumulates across all of component D.
pub fn collect_candidates(candidates: &mut AtomSet, old: Option<&ClassInfo>, new: &ClassInfo) {
    candidates.extend(new.ancestor_names());
    if let Some(old) = old {
        candidates.extend(old.ancestor_names());
    }
}

/// Recomputes and saves `descendants[]` for every candidate not itself
/// recompiled this run. `meta_path_for` names the `.meta.json` path for a
/// class, the same convention [`crate::dispatch::paths_for`] uses.
pub fn fixup(
    candidates: &AtomSet,
    recompiled: &AtomSet,
    db: &ClassDb,
    meta_cache: &mut MetaCache,
    meta_path_for: impl Fn(Atom) -> PathBuf,
) -> Result<(), AnalyserError> {
    for &class_name in candidates {
        if recompiled.contains(&class_name) || !db.contains(class_name) {
            continue;
        }

        let path = meta_path_for(class_name);
        let Some(mut meta) = meta_cache.load(class_name, |_| path.clone()) else {
            continue;
        };

        let mut descendants: Vec<Atom> =
            db.iter().filter(|(_, info)| info.extends == Some(class_name)).map(|(name, _)| *name).collect();
        descendants.sort_by_key(|atom| atom.to_string());
        meta.descendants = descendants;

        meta_cache.seed_live(class_name, meta.clone());
        meta_cache.save(class_name, &meta, &path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use atelier_reflection::ClassLikeKind;
    use atelier_reflection::ClassMeta;
    use atelier_source::Mtime;

    use super::*;

    fn info(extends: Option<&str>) -> ClassInfo {
        let mut info = ClassInfo::stub(Mtime::from_system_time(std::time::UNIX_EPOCH), Atom::new("app"));
        info.extends = extends.map(Atom::new);
        info
    }

    #[test]
    fn recomputes_descendants_from_a_full_db_scan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.Base.meta.json");
        std::fs::write(&path, serde_json::to_string(&ClassMeta::new(ClassLikeKind::Class)).unwrap()).unwrap();

        let mut db = ClassDb::new(dir.path().join("db.json"));
        db.put(Atom::new("app.Base"), info(None));
        db.put(Atom::new("app.Child"), info(Some("app.Base")));
        db.put(Atom::new("app.Other"), info(None));

        let mut candidates = AtomSet::default();
        candidates.insert(Atom::new("app.Base"));

        let mut meta_cache = MetaCache::new();
        fixup(&candidates, &AtomSet::default(), &db, &mut meta_cache, |_| path.clone()).unwrap();

        let saved: ClassMeta = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved.descendants, vec![Atom::new("app.Child")]);
    }

    #[test]
    fn a_candidate_recompiled_this_run_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.Base.meta.json");

        let db = ClassDb::new(dir.path().join("db.json"));
        let mut candidates = AtomSet::default();
        candidates.insert(Atom::new("app.Base"));
        let mut recompiled = AtomSet::default();
        recompiled.insert(Atom::new("app.Base"));

        let mut meta_cache = MetaCache::new();
        fixup(&candidates, &recompiled, &db, &mut meta_cache, |_| path.clone()).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn a_candidate_absent_from_the_db_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let db = ClassDb::new(dir.path().join("db.json"));

        let mut candidates = AtomSet::default();
        candidates.insert(Atom::new("app.Ghost"));

        let mut meta_cache = MetaCache::new();
        fixup(&candidates, &AtomSet::default(), &db, &mut meta_cache, |_| dir.path().join("app.Ghost.meta.json")).unwrap();
    }
}
