use std::fmt;
use std::io;
use std::path::PathBuf;

use atelier_reporting::AnalyserError;

/// Errors from reading or writing one of the on-disk JSON databases
/// (`db.json`, `resource-db.json`, or a `.meta.json` file). Maps onto
/// `AnalyserError::DbParse` at the crate boundary.
#[derive(Debug)]
pub enum DatabaseError {
    Io(io::Error),
    Serialize(serde_json::Error),
    Parse { path: PathBuf, message: String },
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::Io(err) => write!(f, "i/o error: {err}"),
            DatabaseError::Serialize(err) => write!(f, "serialization error: {err}"),
            DatabaseError::Parse { path, message } => {
                write!(f, "failed to parse `{}`: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatabaseError::Io(err) => Some(err),
            DatabaseError::Serialize(err) => Some(err),
            DatabaseError::Parse { .. } => None,
        }
    }
}

impl From<DatabaseError> for AnalyserError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Parse { path, message } => AnalyserError::DbParse { path, message },
            other => AnalyserError::DbParse { path: PathBuf::new(), message: other.to_string() },
        }
    }
}
