//! The resource sub-database.
//!
//! The resource manager itself (scanning resource files, computing image
//! sizes, building the resource manifest) is an external collaborator — see
//! `spec.md` §1. What belongs to the core is only the coordination contract:
//! the sub-db's path is derived from the class database's path, it is
//! loaded/saved alongside it, and it is skipped entirely when
//! `processResources` is `false` (spec.md §6).

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;

use crate::error::DatabaseError;

pub const RESOURCE_DB_FILENAME: &str = "resource-db.json";

/// Derives the resource sub-db path by replacing the class database path's
/// final segment with `resource-db.json` (spec.md §4.B).
pub fn resource_db_path_for(class_db_path: &Path) -> PathBuf {
    class_db_path.with_file_name(RESOURCE_DB_FILENAME)
}

/// An opaque cache of whatever the resource manager last persisted. The
/// analyser does not interpret its contents; it only loads, holds, and
/// saves it as directed by the `processResources` configuration flag.
#[derive(Debug, Clone, Default)]
pub struct ResourceDatabase {
    path: PathBuf,
    contents: Value,
}

impl ResourceDatabase {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self { path, contents: Value::Object(Default::default()) });
            }
            Err(err) => return Err(DatabaseError::Io(err)),
        };

        if raw.trim().is_empty() {
            return Ok(Self { path, contents: Value::Object(Default::default()) });
        }

        let contents =
            json5::from_str(&raw).map_err(|err| DatabaseError::Parse { path: path.clone(), message: err.to_string() })?;

        Ok(Self { path, contents })
    }

    pub fn save(&self) -> Result<(), DatabaseError> {
        let pretty = serde_json::to_string_pretty(&self.contents).map_err(DatabaseError::Serialize)?;

        fs::write(&self.path, pretty).map_err(DatabaseError::Io)
    }

    pub fn contents(&self) -> &Value {
        &self.contents
    }

    pub fn contents_mut(&mut self) -> &mut Value {
        &mut self.contents
    }
}
