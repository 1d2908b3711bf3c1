//! Component A — the library index.
//!
//! A [`Library`] is a namespace-rooted tree of class source files on disk.
//! The [`LibraryIndex`] tracks the set of registered libraries and answers
//! "which library (if any) owns this class name", which the dependency
//! closure (component E) and compile dispatch (component D) need before they
//! can ask the external compiler to do anything.

use std::path::Path;
use std::path::PathBuf;

use atelier_atom::Atom;
use atelier_atom::AtomMap;
use walkdir::WalkDir;

/// Class source files use this extension; see `spec.md` §4.I, which names
/// `<class-path>.js` explicitly as the form used for translation source
/// references.
pub const SOURCE_EXTENSION: &str = "js";

/// What a name resolves to within a library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolType {
    /// The name is exactly a class file.
    Class,
    /// The name is a member of a class (`namespace.Class.member`); carries
    /// the owning class's name.
    Member { class_name: Atom },
    /// The name is a namespace prefix with no class file of its own.
    Package,
}

/// A registered library: a namespace rooted at a directory of class files.
#[derive(Debug, Clone)]
pub struct Library {
    pub namespace: Atom,
    pub root_dir: PathBuf,
    pub source_path: PathBuf,
    pub version: String,
}

impl Library {
    pub fn new(namespace: impl Into<Atom>, root_dir: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        let root_dir = root_dir.into();
        let source_path = root_dir.clone();

        Self { namespace: namespace.into(), root_dir, source_path, version: version.into() }
    }

    /// Enumerates every class file under this library's root, returning the
    /// fully-qualified class name for each.
    pub fn scan_for_classes(&self) -> Vec<Atom> {
        let mut classes = Vec::new();

        for entry in WalkDir::new(&self.source_path).into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
                continue;
            }

            if let Some(class_name) = self.class_name_for_path(path) {
                classes.push(class_name);
            }
        }

        classes
    }

    /// The absolute path to `class_name`'s source file, whether or not it
    /// exists.
    pub fn source_file_for_class(&self, class_name: Atom) -> PathBuf {
        let relative = self.relative_path_for_class(class_name);

        self.source_path.join(relative)
    }

    fn class_name_for_path(&self, path: &Path) -> Option<Atom> {
        let relative = path.strip_prefix(&self.source_path).ok()?;
        let without_ext = relative.with_extension("");

        let mut segments: Vec<&str> = without_ext.components().filter_map(|c| c.as_os_str().to_str()).collect();
        if segments.is_empty() {
            return None;
        }

        let mut name = self.namespace.to_string();
        for segment in segments.drain(..) {
            name.push('.');
            name.push_str(segment);
        }

        Some(Atom::new(name))
    }

    fn relative_path_for_class(&self, class_name: Atom) -> PathBuf {
        let suffix = class_name
            .as_str()
            .strip_prefix(self.namespace.as_str())
            .and_then(|s| s.strip_prefix('.'))
            .unwrap_or(class_name.as_str());

        let mut path = PathBuf::new();
        for segment in suffix.split('.') {
            path.push(segment);
        }
        path.set_extension(SOURCE_EXTENSION);

        path
    }

    /// Resolves a name against this library: an exact class file, a known
    /// member of one, or a bare namespace prefix with no class file.
    pub fn get_symbol_type(&self, name: Atom) -> Option<SymbolType> {
        if !name.as_str().starts_with(self.namespace.as_str()) {
            return None;
        }

        if self.source_file_for_class(name).is_file() {
            return Some(SymbolType::Class);
        }

        // Walk name's dot segments from the longest prefix down, looking for
        // a class file; anything left over is the member path.
        let segments: Vec<&str> = name.as_str().split('.').collect();
        for split_at in (1..segments.len()).rev() {
            let candidate = Atom::new(segments[..split_at].join("."));
            if self.source_file_for_class(candidate).is_file() {
                return Some(SymbolType::Member { class_name: candidate });
            }
        }

        if self.root_dir.join(segments_to_path(&segments)).is_dir() {
            return Some(SymbolType::Package);
        }

        None
    }
}

fn segments_to_path(segments: &[&str]) -> PathBuf {
    let mut path = PathBuf::new();
    for segment in segments {
        path.push(segment);
    }
    path
}

/// Registry of libraries, resolving class names to the library that owns
/// them. See `spec.md` §4.A for the resolution order.
#[derive(Debug, Default)]
pub struct LibraryIndex {
    libraries: Vec<Library>,
    /// Populated as classes are parsed; takes precedence over the linear
    /// scan (this is how a private-class override wins, per the
    /// "Namespace uniqueness" invariant in `spec.md` §3).
    class_to_library: AtomMap<Atom>,
}

impl LibraryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_library(&mut self, library: Library) {
        self.libraries.retain(|l| l.namespace != library.namespace);
        self.libraries.push(library);
    }

    pub fn find_library(&self, namespace: Atom) -> Option<&Library> {
        self.libraries.iter().find(|l| l.namespace == namespace)
    }

    pub fn libraries(&self) -> &[Library] {
        &self.libraries
    }

    /// Records that `class_name` is owned by `library_namespace`, overriding
    /// whatever the linear scan would otherwise find.
    pub fn record_class_library(&mut self, class_name: Atom, library_namespace: Atom) {
        self.class_to_library.insert(class_name, library_namespace);
    }

    /// Resolution order: (1) the class->library cache; (2) a linear scan of
    /// libraries, accepting the first whose `get_symbol_type` reports
    /// `Class` or `Member`.
    pub fn get_library_from_classname(&self, class_name: Atom) -> Option<&Library> {
        if let Some(namespace) = self.class_to_library.get(&class_name) {
            return self.find_library(*namespace);
        }

        self.libraries.iter().find(|library| {
            matches!(library.get_symbol_type(class_name), Some(SymbolType::Class) | Some(SymbolType::Member { .. }))
        })
    }

    pub fn get_symbol_type(&self, class_name: Atom) -> Option<SymbolType> {
        if let Some(library) = self.get_library_from_classname(class_name) {
            return library.get_symbol_type(class_name);
        }

        self.libraries.iter().find_map(|library| library.get_symbol_type(class_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_library(dir: &Path) -> Library {
        Library::new("app", dir, "1.0.0")
    }

    #[test]
    fn scans_nested_class_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ui")).unwrap();
        std::fs::write(dir.path().join("ui/Button.js"), "// class").unwrap();
        std::fs::write(dir.path().join("Root.js"), "// class").unwrap();

        let library = make_library(dir.path());
        let mut classes: Vec<String> = library.scan_for_classes().iter().map(|a| a.to_string()).collect();
        classes.sort();

        assert_eq!(classes, vec!["app.Root".to_string(), "app.ui.Button".to_string()]);
    }

    #[test]
    fn resolves_member_names_against_the_owning_class() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("ui")).unwrap();
        std::fs::write(dir.path().join("ui/Button.js"), "// class").unwrap();

        let library = make_library(dir.path());

        assert_eq!(library.get_symbol_type(Atom::new("app.ui.Button")), Some(SymbolType::Class));
        assert_eq!(
            library.get_symbol_type(Atom::new("app.ui.Button.fireEvent")),
            Some(SymbolType::Member { class_name: Atom::new("app.ui.Button") })
        );
        assert_eq!(library.get_symbol_type(Atom::new("app.ui")), Some(SymbolType::Package));
        assert_eq!(library.get_symbol_type(Atom::new("other.Thing")), None);
    }

    #[test]
    fn class_to_library_cache_overrides_the_scan() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Widget.js"), "// class").unwrap();

        let mut index = LibraryIndex::new();
        index.add_library(make_library(dir.path()));
        index.add_library(Library::new("other", dir.path(), "1.0.0"));

        // Without an override, the first library registered that resolves wins.
        assert_eq!(index.get_library_from_classname(Atom::new("app.Widget")).map(|l| l.namespace), Some(Atom::new("app")));

        index.record_class_library(Atom::new("app.Widget"), Atom::new("other"));
        assert_eq!(
            index.get_library_from_classname(Atom::new("app.Widget")).map(|l| l.namespace),
            Some(Atom::new("other"))
        );
    }
}
