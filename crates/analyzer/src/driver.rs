//! The top-level `open` / `analyse_classes` entry points, sequencing every
//! component in the order `spec.md` §2's data-flow paragraph describes:
//! B → A → E → (D, F) → G → H → F-flush → B-save.

use std::path::Path;
use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_atom::AtomSet;
use atelier_database::resource_db_path_for;
use atelier_database::ClassDb;
use atelier_database::Library;
use atelier_database::LibraryIndex;
use atelier_database::ResourceDatabase;
use atelier_database::SaveDatabaseListeners;
use atelier_reporting::AnalyserError;

use crate::closure;
use crate::closure::ClosureReport;
use crate::closure::ClosureSeed;
use crate::compiler::ClassFileCompiler;
use crate::descendant_fixup;
use crate::dispatch;
use crate::events::DispatchListeners;
use crate::merge;
use crate::meta_cache::MetaCache;

/// The session state that persists across an `analyse_classes` call:
/// everything `open` hydrates and `analyse_classes` then mutates. Owning
/// this in one place is what lets a CLI or test harness call `open` once
/// and `analyse_classes` many times (e.g. once per seed batch).
pub struct AnalyserSession {
    pub db: ClassDb,
    pub resource_db: Option<ResourceDatabase>,
    pub libraries: LibraryIndex,
    pub meta_cache: MetaCache,
    pub save_listeners: SaveDatabaseListeners,
    pub dispatch_listeners: DispatchListeners,
    output_dir: PathBuf,
}

pub struct OpenOptions {
    pub db_path: PathBuf,
    pub output_dir: PathBuf,
    pub process_resources: bool,
    pub libraries: Vec<Library>,
}

/// `open()`: hydrates the class DB (and, if configured, the resource
/// sub-db) from disk, registers every library, and scans each one so the
/// class→library cache is warm before the first `analyse_classes` call
/// (`spec.md` §2: "`open` hydrates B and the resource sub-db, then scans
/// A").
pub fn open(options: OpenOptions) -> Result<AnalyserSession, AnalyserError> {
    let db = ClassDb::load(&options.db_path)?;

    let resource_db = if options.process_resources {
        Some(ResourceDatabase::load(resource_db_path_for(&options.db_path))?)
    } else {
        None
    };

    let mut libraries = LibraryIndex::new();
    for library in options.libraries {
        libraries.add_library(library);
    }

    let namespaces: Vec<Atom> = libraries.libraries().iter().map(|library| library.namespace).collect();
    for namespace in namespaces {
        let classes = libraries.find_library(namespace).map(|library| library.scan_for_classes()).unwrap_or_default();
        for class_name in classes {
            libraries.record_class_library(class_name, namespace);
        }
    }

    Ok(AnalyserSession {
        db,
        resource_db,
        libraries,
        meta_cache: MetaCache::new(),
        save_listeners: SaveDatabaseListeners::default(),
        dispatch_listeners: DispatchListeners::default(),
        output_dir: options.output_dir,
    })
}

fn meta_path_for(output_dir: &Path, class_name: Atom) -> PathBuf {
    let relative = class_name.as_str().replace('.', "/");
    output_dir.join(format!("{relative}.meta.json"))
}

impl AnalyserSession {
    /// `analyseClasses(seeds, forceScan?)`: primes the dependency closure
    /// (E) from `seeds`, drains it through compile dispatch (D) and the
    /// meta cache (F), runs the merger (G) over every class freshly staged
    /// this run, fixes up descendants (H), flushes the meta cache, and
    /// finally persists the class DB (`saveDatabase`).
    pub fn analyse_classes(
        &mut self,
        seeds: Vec<ClosureSeed>,
        force_scan: bool,
        compiler: &mut dyn ClassFileCompiler,
    ) -> Result<ClosureReport, AnalyserError> {
        let output_dir = self.output_dir.clone();
        let AnalyserSession { db, libraries, meta_cache, dispatch_listeners, save_listeners, .. } = self;

        let mut recompiled = AtomSet::default();
        let mut fixup_candidates = AtomSet::default();

        let report = closure::drain(seeds, libraries, |class_name| {
            let outcome = dispatch::get_class_info(
                class_name,
                force_scan,
                libraries,
                db,
                meta_cache,
                compiler,
                dispatch_listeners,
                &output_dir,
            )?;

            if outcome.recompiled {
                recompiled.insert(class_name);
                descendant_fixup::collect_candidates(&mut fixup_candidates, outcome.previous.as_ref(), &outcome.info);
            }

            Ok(outcome.info)
        })?;

        merge::run(meta_cache, |class_name| meta_path_for(&output_dir, class_name))?;

        descendant_fixup::fixup(&fixup_candidates, &recompiled, db, meta_cache, |class_name| {
            meta_path_for(&output_dir, class_name)
        })?;

        db.save(save_listeners)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use atelier_database::ClassInfo;
    use atelier_reflection::ClassLikeKind;
    use atelier_reflection::ClassMeta;
    use atelier_source::Mtime;

    use super::*;
    use crate::compiler::CompiledClass;

    struct FakeCompiler;

    impl ClassFileCompiler for FakeCompiler {
        fn load(&mut self, class_name: Atom, _source_path: &Path) -> Result<CompiledClass, AnalyserError> {
            let mut info = ClassInfo::stub(Mtime::from_system_time(std::time::SystemTime::now()), Atom::new("app"));
            if class_name == Atom::new("app.Widget") {
                info.extends = Some(Atom::new("app.Base"));
            }

            Ok(CompiledClass { info, meta: ClassMeta::new(ClassLikeKind::Class) })
        }
    }

    #[test]
    fn open_then_analyse_classes_compiles_and_persists_a_seeded_class() {
        let dir = tempfile::tempdir().unwrap();
        let source_dir = dir.path().join("src");
        std::fs::create_dir_all(&source_dir).unwrap();
        std::fs::write(source_dir.join("Base.js"), "// class").unwrap();
        std::fs::write(source_dir.join("Widget.js"), "// class").unwrap();

        let output_dir = dir.path().join("out");
        let db_path = dir.path().join("db.json");

        let mut session = open(OpenOptions {
            db_path,
            output_dir,
            process_resources: false,
            libraries: vec![Library::new("app", source_dir.clone(), "1.0.0")],
        })
        .unwrap();

        let mut compiler = FakeCompiler;
        let report = session
            .analyse_classes(vec![ClosureSeed::Class(Atom::new("app.Widget"))], false, &mut compiler)
            .unwrap();

        assert!(report.visited.contains_key(&Atom::new("app.Widget")));
        assert!(session.db.contains(Atom::new("app.Widget")));
    }
}
