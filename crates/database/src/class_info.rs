//! Component B (data model) — the persisted `ClassInfo` row.

use atelier_atom::Atom;
use atelier_atom::AtomMap;
use atelier_source::Mtime;
use serde::Deserialize;
use serde::Serialize;

/// How a class depends on another: the `dependsOn` edge kinds from
/// `spec.md` §3. A class can depend on another for more than one reason at
/// once (e.g. it both loads and constructs it).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyFlags {
    #[serde(default, skip_serializing_if = "is_false")]
    pub load: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub construct: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub runtime: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl DependencyFlags {
    pub fn load() -> Self {
        Self { load: true, ..Self::default() }
    }

    pub fn construct() -> Self {
        Self { construct: true, ..Self::default() }
    }

    /// Merge another occurrence of the same dependency edge (a class can be
    /// discovered as, e.g., both a `load` and a `construct` dependency by
    /// different statements in the same source file).
    pub fn merge(&mut self, other: DependencyFlags) {
        self.load |= other.load;
        self.construct |= other.construct;
        self.runtime |= other.runtime;
    }
}

/// Whether a translatable string's line number was recorded as a single
/// value or a list — the source's per-entry JSDoc can produce either, and
/// `spec.md` §4.I and §9 both call out that the array form is the one to
/// trust (adopted per the "Open Questions" resolution in `SPEC_FULL.md`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineNumbers {
    Single(u32),
    Many(Vec<u32>),
}

impl LineNumbers {
    pub fn as_vec(&self) -> Vec<u32> {
        match self {
            LineNumbers::Single(n) => vec![*n],
            LineNumbers::Many(values) => values.clone(),
        }
    }
}

/// One translatable string found in a class's source, as recorded by the
/// (external) parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationSourceEntry {
    pub msgid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub line_no: LineNumbers,
}

/// The persisted row for one class: everything the analyser needs to decide
/// whether to recompile it and what it depends on, without touching the
/// (much larger) merged meta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub mtime: Mtime,
    pub library_name: Atom,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Atom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implement: Vec<Atom>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<Atom>,
    #[serde(default, skip_serializing_if = "AtomMap::is_empty")]
    pub depends_on: AtomMap<DependencyFlags>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub translations: Vec<TranslationSourceEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment_checks: Vec<String>,
}

impl ClassInfo {
    /// The minimal row written just before dispatching a (re)compile: only
    /// `mtime` and `libraryName` are known at that point (spec.md §4.D).
    pub fn stub(mtime: Mtime, library_name: Atom) -> Self {
        Self {
            mtime,
            library_name,
            extends: None,
            implement: Vec::new(),
            include: Vec::new(),
            depends_on: AtomMap::default(),
            translations: Vec::new(),
            environment_checks: Vec::new(),
        }
    }

    /// Every name this row names as an ancestor, in `extends` / `implement`
    /// / `include`, used by the descendant-fixup pass (component H) to
    /// decide which classes' descendant lists need refreshing.
    pub fn ancestor_names(&self) -> impl Iterator<Item = Atom> + '_ {
        self.extends.into_iter().chain(self.implement.iter().copied()).chain(self.include.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_numbers_accept_both_shapes() {
        let single: LineNumbers = serde_json::from_str("12").unwrap();
        let many: LineNumbers = serde_json::from_str("[1,2,3]").unwrap();

        assert_eq!(single.as_vec(), vec![12]);
        assert_eq!(many.as_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn dependency_flags_merge_is_a_union() {
        let mut flags = DependencyFlags::load();
        flags.merge(DependencyFlags::construct());

        assert!(flags.load);
        assert!(flags.construct);
        assert!(!flags.runtime);
    }

    #[test]
    fn stub_serializes_without_empty_noise() {
        let info = ClassInfo::stub(Mtime::from_system_time(std::time::SystemTime::UNIX_EPOCH), Atom::new("app"));
        let json = serde_json::to_value(&info).unwrap();

        assert!(json.get("implement").is_none());
        assert!(json.get("dependsOn").is_none());
        assert_eq!(json["libraryName"], "app");
    }
}
