//! The external collaborator this analyser drives: the per-class compiler
//! that turns a source file into a `ClassFile` (`spec.md` §1, §9 "dynamic
//! dispatch → tagged variants": `{load, writeDbInfo, getOuterClassMeta,
//! getClassName}`).

use std::path::Path;

use atelier_atom::Atom;
use atelier_database::ClassInfo;
use atelier_reflection::ClassMeta;
use atelier_reporting::AnalyserError;

/// What compiling one class produces: the fully populated `ClassInfo` row
/// (extends/implement/include/dependsOn/translations/environmentChecks)
/// and the live meta object the compiler exposes via `getOuterClassMeta()`
/// — the latter seeds the meta cache (component F) before the merger (G)
/// ever reads it from disk.
pub struct CompiledClass {
    pub info: ClassInfo,
    pub meta: ClassMeta,
}

/// Loads and compiles one class's source file. Implementations wrap
/// whatever the real front-end compiler is; this analyser only needs the
/// single capability spec.md §9 names.
pub trait ClassFileCompiler {
    fn load(&mut self, class_name: Atom, source_path: &Path) -> Result<CompiledClass, AnalyserError>;
}
