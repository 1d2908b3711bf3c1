//! Wires component G (the pure ancestor-walk merger in `atelier-merger`)
//! to component F (this crate's [`MetaCache`]), and drives it over every
//! class compiled in the current run (`spec.md` §2: "G runs over all
//! freshly compiled classes").

use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_merger::AncestorMetaSource;
use atelier_reflection::ClassMeta;
use atelier_reporting::AnalyserError;

use crate::meta_cache::MetaCache;

/// Resolves an ancestor's meta through the cache — live first, then disk —
/// exactly the lookup component F already implements; this is just the
/// adapter the merger's pure algorithm needs to stay decoupled from the
/// cache's I/O.
struct CacheAncestorSource<'a, P> {
    meta_cache: &'a mut MetaCache,
    meta_path_for: &'a P,
}

impl<P> AncestorMetaSource for CacheAncestorSource<'_, P>
where
    P: Fn(Atom) -> PathBuf,
{
    fn resolve(&mut self, class_name: Atom) -> Option<ClassMeta> {
        let path_for = self.meta_path_for;
        self.meta_cache.load(class_name, |name| path_for(name))
    }
}

/// Merges every class currently staged as live meta (this run's freshly
/// compiled classes), writing the merged result back to both the cache and
/// disk. Visiting order does not matter: each class's merge performs its
/// own complete ancestor walk regardless of whether an ancestor has been
/// merged yet this run.
pub fn run(meta_cache: &mut MetaCache, meta_path_for: impl Fn(Atom) -> PathBuf) -> Result<(), AnalyserError> {
    let class_names: Vec<Atom> = meta_cache.live_entries().map(|(name, _)| *name).collect();

    for class_name in class_names {
        let mut meta = meta_cache.live_mut(class_name).expect("name came from live_entries").clone();

        let mut source = CacheAncestorSource { meta_cache, meta_path_for: &meta_path_for };
        atelier_merger::merge_class(class_name, &mut meta, &mut source);

        meta_cache.seed_live(class_name, meta.clone());
        let path = meta_path_for(class_name);
        meta_cache.save(class_name, &meta, &path)?;
    }

    Ok(())
}
