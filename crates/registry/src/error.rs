use std::fmt;
use std::io;

/// Errors surfaced by the CLDR and translation loaders, or by malformed
/// environment-map updates. Kept separate from `atelier_reporting::AnalyserError`:
/// the registries are consulted alongside a run, not on the `analyseClasses`
/// critical path the core taxonomy (`spec.md` §7) describes.
#[derive(Debug)]
pub enum RegistryError {
    Io(io::Error),
    Cldr { locale: String, message: String },
    Translation { locale: String, namespace: String, message: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::Io(err) => write!(f, "i/o error: {err}"),
            RegistryError::Cldr { locale, message } => {
                write!(f, "failed to load CLDR data for `{locale}`: {message}")
            }
            RegistryError::Translation { locale, namespace, message } => {
                write!(f, "failed to load translations for `{locale}:{namespace}`: {message}")
            }
        }
    }
}

impl std::error::Error for RegistryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegistryError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for RegistryError {
    fn from(err: io::Error) -> Self {
        RegistryError::Io(err)
    }
}
