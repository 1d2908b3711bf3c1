//! Interned identifiers used across the analyser.
//!
//! Class names, library namespaces, locale tags and resource ids are all
//! short, highly repeated strings: a class name such as `app.ui.Button`
//! appears as a map key, as a dependency target, as an `extends` value and
//! as an entry in dozens of `appearsIn` lists. Interning them once with
//! [`ustr`] keeps comparisons and hashing to a pointer-sized operation.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use ustr::Ustr;

/// An interned, globally unique string (a class name, namespace, locale, …).
///
/// Cloning an `Atom` is a cheap copy; equality and hashing are pointer-based.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Atom(Ustr);

impl Atom {
    #[inline]
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Ustr::from(value.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &'static str {
        self.0.as_str()
    }
}

impl From<&str> for Atom {
    #[inline]
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Atom {
    #[inline]
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl AsRef<str> for Atom {
    #[inline]
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl fmt::Debug for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.0.as_str(), f)
    }
}

impl Serialize for Atom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Atom::new(s))
    }
}

/// A fast hash map keyed by [`Atom`], with insertion-order (not hash-order)
/// iteration. Persisted shapes (`db.json`, `.meta.json`) embed these maps
/// directly, and ahash's default `RandomState` reseeds per process — a
/// plain hash map would reorder its keys across runs and break the
/// byte-identical-output guarantee those files need, so this keeps ahash's
/// hashing speed but swaps the backing structure for one whose iteration
/// order only ever depends on insertion order, not on the hasher's seed.
pub type AtomMap<V> = indexmap::IndexMap<Atom, V, ahash::RandomState>;

/// A fast hash set of [`Atom`]s, with the same insertion-order guarantee as
/// [`AtomMap`].
pub type AtomSet = indexmap::IndexSet<Atom, ahash::RandomState>;
