//! Component D — Per-Class Compile Dispatch (`spec.md` §4.D).

use std::path::Path;

use atelier_atom::Atom;
use atelier_database::ClassDb;
use atelier_database::ClassInfo;
use atelier_database::Library;
use atelier_database::LibraryIndex;
use atelier_reporting::AnalyserError;
use atelier_source::PathStat;

use crate::compiler::ClassFileCompiler;
use crate::events::CompiledClass;
use crate::events::CompilingClass;
use crate::events::DispatchListeners;
use crate::meta_cache::MetaCache;
use crate::staleness;
use crate::staleness::StalenessInputs;

/// Where a just-compiled class's output and meta files live, for the
/// staleness check (`spec.md` §4.C). The caller (driver) owns the naming
/// convention; this module just stats whatever paths it's given.
pub struct ClassPaths {
    pub source: std::path::PathBuf,
    pub output: std::path::PathBuf,
    pub output_meta: std::path::PathBuf,
}

pub fn paths_for(library: &Library, class_name: Atom, output_dir: &Path) -> ClassPaths {
    let source = library.source_file_for_class(class_name);
    let relative = class_name.as_str().replace('.', "/");
    ClassPaths {
        source,
        output: output_dir.join(format!("{relative}.js")),
        output_meta: output_dir.join(format!("{relative}.meta.json")),
    }
}

/// The result of asking for a class's info: the row itself, whether
/// `freshness` held or a (re)compile was driven, and the row as it stood
/// before this call (used by component H to seed its fixup candidates).
pub struct DispatchOutcome {
    pub info: ClassInfo,
    pub recompiled: bool,
    pub previous: Option<ClassInfo>,
}

/// `getClassInfo(className, forceScan)`: resolves the class to a library,
/// asks the Staleness Oracle, and either returns the cached row or drives
/// a (re)compile through the external compiler.
pub fn get_class_info(
    class_name: Atom,
    force_scan: bool,
    libraries: &LibraryIndex,
    db: &mut ClassDb,
    meta_cache: &mut MetaCache,
    compiler: &mut dyn ClassFileCompiler,
    listeners: &mut DispatchListeners,
    output_dir: &Path,
) -> Result<DispatchOutcome, AnalyserError> {
    let library = libraries.get_library_from_classname(class_name).ok_or(AnalyserError::NoClassFile { class_name })?;

    let paths = paths_for(library, class_name, output_dir);
    let source_stat = PathStat::of(&paths.source).map_err(|source| AnalyserError::SourceIo { class_name, source })?;
    if !source_stat.exists {
        return Err(AnalyserError::NoClassFile { class_name });
    }

    let output_stat = PathStat::of(&paths.output).map_err(|source| AnalyserError::SourceIo { class_name, source })?;
    let output_meta_stat =
        PathStat::of(&paths.output_meta).map_err(|source| AnalyserError::SourceIo { class_name, source })?;

    let existing = db.get(class_name).cloned();
    let inputs = StalenessInputs {
        source: source_stat,
        output: output_stat,
        output_meta: output_meta_stat,
        class_info: existing.as_ref(),
        force_scan,
    };

    if staleness::check(&inputs) {
        let info = existing.clone().expect("fresh requires class_info");
        return Ok(DispatchOutcome { info, recompiled: false, previous: existing });
    }

    let source_mtime = source_stat.mtime.expect("source exists implies mtime");
    let stub = ClassInfo::stub(source_mtime, library.namespace);

    listeners.fire_compiling(&CompilingClass { class_name, old: existing.as_ref(), new: &stub });

    let compiled = compiler.load(class_name, &paths.source).map_err(|err| annotate(err, class_name))?;

    let mut info = compiled.info;
    listeners.fire_compiled(&CompiledClass { class_name, old: existing.as_ref() }, &mut info);

    meta_cache.seed_live(class_name, compiled.meta);
    db.put(class_name, info.clone());

    Ok(DispatchOutcome { info, recompiled: true, previous: existing })
}

fn annotate(err: AnalyserError, class_name: Atom) -> AnalyserError {
    match err {
        AnalyserError::Parse { message, .. } => AnalyserError::Parse { class_name, message },
        other => other,
    }
}
