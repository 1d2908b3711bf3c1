use std::fmt;
use std::io;
use std::path::PathBuf;

use atelier_atom::Atom;

/// The analyser's error taxonomy.
///
/// Only [`AnalyserError::NoClassFile`] is recoverable while walking a
/// dependency closure (it is logged and the class is skipped); every other
/// variant aborts the current `analyse_classes` call.
#[derive(Debug)]
pub enum AnalyserError {
    /// A class name could not be resolved to a library, or its library
    /// could not produce a class file for it.
    NoClassFile { class_name: Atom },
    /// Statting or reading the source file for `class_name` failed.
    SourceIo { class_name: Atom, source: io::Error },
    /// The external compiler failed to parse `class_name`.
    Parse { class_name: Atom, message: String },
    /// `saveMeta` was called twice for the same class in the same run.
    MetaWriteDuplicate { class_name: Atom },
    /// The on-disk class database could not be parsed.
    DbParse { path: PathBuf, message: String },
}

impl AnalyserError {
    /// Whether a dependency-closure walk should log this and keep going
    /// rather than abort the run (spec §4.E, §7).
    pub fn is_recoverable_in_closure(&self) -> bool {
        matches!(self, AnalyserError::NoClassFile { .. })
    }
}

impl fmt::Display for AnalyserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyserError::NoClassFile { class_name } => {
                write!(f, "no class file found for `{class_name}`")
            }
            AnalyserError::SourceIo { class_name, source } => {
                write!(f, "failed to stat/read source for `{class_name}`: {source}")
            }
            AnalyserError::Parse { class_name, message } => {
                write!(f, "failed to compile `{class_name}`: {message}")
            }
            AnalyserError::MetaWriteDuplicate { class_name } => {
                write!(f, "meta for `{class_name}` was written twice in the same run")
            }
            AnalyserError::DbParse { path, message } => {
                write!(f, "failed to parse class database at `{}`: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for AnalyserError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyserError::SourceIo { source, .. } => Some(source),
            _ => None,
        }
    }
}
