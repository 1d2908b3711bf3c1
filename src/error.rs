use atelier_reporting::AnalyserError;

#[derive(Debug)]
pub enum Error {
    Analysis(AnalyserError),
    BuildingConfiguration(config::ConfigError),
    CanonicalizingPath(std::path::PathBuf, std::io::Error),
    Json(serde_json::Error),
    NoSuchClass(atelier_atom::Atom),
    OutputDirRequired,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Analysis(error) => write!(f, "{error}"),
            Self::BuildingConfiguration(error) => write!(f, "{error}"),
            Self::CanonicalizingPath(path, error) => write!(f, "failed to canonicalize `{}`: {error}", path.display()),
            Self::Json(error) => write!(f, "{error}"),
            Self::NoSuchClass(class_name) => write!(f, "no meta found for `{class_name}`"),
            Self::OutputDirRequired => write!(f, "`outputDir` must be configured to run `analyze`"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Analysis(error) => Some(error),
            Self::BuildingConfiguration(error) => Some(error),
            Self::CanonicalizingPath(_, error) => Some(error),
            Self::Json(error) => Some(error),
            Self::NoSuchClass(_) => None,
            Self::OutputDirRequired => None,
        }
    }
}

impl From<AnalyserError> for Error {
    fn from(error: AnalyserError) -> Self {
        Self::Analysis(error)
    }
}

impl From<config::ConfigError> for Error {
    fn from(error: config::ConfigError) -> Self {
        Self::BuildingConfiguration(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error)
    }
}
