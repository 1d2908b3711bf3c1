//! Component B — the in-memory + on-disk class database.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_atom::AtomMap;
use serde::Deserialize;
use serde::Serialize;

use crate::class_info::ClassInfo;
use crate::error::DatabaseError;

pub const DEFAULT_DB_FILENAME: &str = "db.json";

/// The on-disk shape of `db.json`: a single top-level `classInfo` map
/// (spec.md §6). Kept as its own type so `load`/`save` round-trip exactly
/// this shape and nothing else.
#[derive(Debug, Default, Serialize, Deserialize)]
struct OnDiskDatabase {
    #[serde(default)]
    class_info: AtomMap<ClassInfo>,
}

/// A listener invoked synchronously during `save`, with the chance to
/// mutate the map before it is written to disk (spec.md §4.B: "the event is
/// synchronous w.r.t. the write"). Modeled as a registry rather than a
/// single callback since more than one observer may want to contribute
/// (SPEC_FULL.md §11).
pub type SaveDatabaseListener = Box<dyn FnMut(&mut AtomMap<ClassInfo>) + Send>;

#[derive(Default)]
pub struct SaveDatabaseListeners(Vec<SaveDatabaseListener>);

impl SaveDatabaseListeners {
    pub fn register(&mut self, listener: SaveDatabaseListener) {
        self.0.push(listener);
    }

    fn fire(&mut self, classes: &mut AtomMap<ClassInfo>) {
        for listener in &mut self.0 {
            listener(classes);
        }
    }
}

/// The class database: every known class's persisted `ClassInfo`, keyed by
/// fully-qualified class name.
#[derive(Debug, Clone)]
pub struct ClassDb {
    path: PathBuf,
    classes: AtomMap<ClassInfo>,
}

impl ClassDb {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), classes: AtomMap::default() }
    }

    /// Reads `db.json`. A missing or empty file yields an empty database
    /// (spec.md §4.B: "Tolerates absent and empty files"). The parser is
    /// lenient JSON (trailing commas, comments) per spec.md §6.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, DatabaseError> {
        let path = path.into();

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::new(path));
            }
            Err(err) => return Err(DatabaseError::Io(err)),
        };

        if raw.trim().is_empty() {
            return Ok(Self::new(path));
        }

        let on_disk: OnDiskDatabase =
            json5::from_str(&raw).map_err(|err| DatabaseError::Parse { path: path.clone(), message: err.to_string() })?;

        Ok(Self { path, classes: on_disk.class_info })
    }

    pub fn get(&self, class_name: Atom) -> Option<&ClassInfo> {
        self.classes.get(&class_name)
    }

    pub fn put(&mut self, class_name: Atom, info: ClassInfo) {
        self.classes.insert(class_name, info);
    }

    pub fn contains(&self, class_name: Atom) -> bool {
        self.classes.contains_key(&class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Atom, &ClassInfo)> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `db.json` as pretty JSON, firing every registered listener
    /// synchronously first so they can mutate the map being persisted.
    pub fn save(&mut self, listeners: &mut SaveDatabaseListeners) -> Result<(), DatabaseError> {
        listeners.fire(&mut self.classes);

        let on_disk = OnDiskDatabaseRef { class_info: &self.classes };
        let pretty = serde_json::to_string_pretty(&on_disk).map_err(DatabaseError::Serialize)?;

        fs::write(&self.path, pretty).map_err(DatabaseError::Io)
    }
}

#[derive(Serialize)]
struct OnDiskDatabaseRef<'a> {
    class_info: &'a AtomMap<ClassInfo>,
}
