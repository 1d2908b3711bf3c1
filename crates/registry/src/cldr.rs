use std::collections::HashMap;

use serde_json::Value;

use crate::error::RegistryError;

/// Loads a locale's CLDR data from wherever it actually lives (a vendored
/// data directory, a bundled crate, …). Parsing CLDR itself is out of
/// scope (`spec.md` §1); the cache below only owns *when* a locale is
/// loaded, not *how*.
pub trait CldrLoader {
    fn load(&mut self, locale: &str) -> Result<Value, RegistryError>;
}

/// Cache of locale → CLDR object, loaded lazily on first request
/// (`spec.md` §4.I).
#[derive(Debug, Default)]
pub struct CldrCache {
    loaded: HashMap<String, Value>,
}

impl CldrCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached CLDR data for `locale`, loading it through
    /// `loader` on a cache miss.
    pub fn get_or_load(&mut self, locale: &str, loader: &mut dyn CldrLoader) -> Result<&Value, RegistryError> {
        if !self.loaded.contains_key(locale) {
            let data = loader.load(locale)?;
            self.loaded.insert(locale.to_string(), data);
        }
        Ok(self.loaded.get(locale).expect("just inserted"))
    }

    pub fn is_loaded(&self, locale: &str) -> bool {
        self.loaded.contains_key(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct CountingLoader {
        calls: usize,
    }

    impl CldrLoader for CountingLoader {
        fn load(&mut self, locale: &str) -> Result<Value, RegistryError> {
            self.calls += 1;
            Ok(json!({ "locale": locale }))
        }
    }

    #[test]
    fn second_request_for_the_same_locale_does_not_reload() {
        let mut cache = CldrCache::new();
        let mut loader = CountingLoader { calls: 0 };

        cache.get_or_load("de", &mut loader).unwrap();
        cache.get_or_load("de", &mut loader).unwrap();

        assert_eq!(loader.calls, 1);
        assert!(cache.is_loaded("de"));
    }
}
