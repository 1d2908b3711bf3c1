use std::collections::HashMap;

use crate::error::RegistryError;

/// An external, per-`"<locale>:<namespace>"` translation object. `check_read`
/// must complete (reading its backing `.po`-style file, if any) before the
/// object is handed to a caller (`spec.md` §4.I).
pub trait Translation {
    fn check_read(&mut self) -> Result<(), RegistryError>;
}

/// Creates a fresh, not-yet-read [`Translation`] for a `"<locale>:<namespace>"`
/// pair. The cache owns *when* one is constructed and read; the loader owns
/// *how*.
pub trait TranslationLoader<T: Translation> {
    fn create(&mut self, locale: &str, namespace: &str) -> T;
}

fn cache_key(locale: &str, namespace: &str) -> String {
    format!("{locale}:{namespace}")
}

/// Cache of translation objects keyed `"<locale>:<namespace>"` (`spec.md`
/// §4.I).
#[derive(Debug, Default)]
pub struct TranslationCache<T: Translation> {
    entries: HashMap<String, T>,
}

impl<T: Translation> TranslationCache<T> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Returns the translation object for `locale:namespace`, constructing
    /// and `check_read`-ing it on a cache miss.
    pub fn get_or_create(
        &mut self,
        locale: &str,
        namespace: &str,
        loader: &mut dyn TranslationLoader<T>,
    ) -> Result<&mut T, RegistryError> {
        let key = cache_key(locale, namespace);
        if !self.entries.contains_key(&key) {
            let mut translation = loader.create(locale, namespace);
            translation.check_read()?;
            self.entries.insert(key.clone(), translation);
        }
        Ok(self.entries.get_mut(&key).expect("just inserted"))
    }

    pub fn is_loaded(&self, locale: &str, namespace: &str) -> bool {
        self.entries.contains_key(&cache_key(locale, namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct FakeTranslation {
        read_count: usize,
    }

    impl Translation for FakeTranslation {
        fn check_read(&mut self) -> Result<(), RegistryError> {
            self.read_count += 1;
            Ok(())
        }
    }

    struct FakeLoader {
        creations: usize,
    }

    impl TranslationLoader<FakeTranslation> for FakeLoader {
        fn create(&mut self, _locale: &str, _namespace: &str) -> FakeTranslation {
            self.creations += 1;
            FakeTranslation::default()
        }
    }

    #[test]
    fn distinct_locale_namespace_pairs_get_distinct_entries() {
        let mut cache = TranslationCache::new();
        let mut loader = FakeLoader { creations: 0 };

        cache.get_or_create("en", "myapp", &mut loader).unwrap();
        cache.get_or_create("de", "myapp", &mut loader).unwrap();
        cache.get_or_create("en", "myapp", &mut loader).unwrap();

        assert_eq!(loader.creations, 2);
        assert!(cache.is_loaded("en", "myapp"));
        assert!(cache.is_loaded("de", "myapp"));
    }

    #[test]
    fn check_read_runs_exactly_once_per_entry() {
        let mut cache = TranslationCache::new();
        let mut loader = FakeLoader { creations: 0 };

        cache.get_or_create("en", "myapp", &mut loader).unwrap();
        let translation = cache.get_or_create("en", "myapp", &mut loader).unwrap();

        assert_eq!(translation.read_count, 1);
    }
}
