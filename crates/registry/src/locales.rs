/// An ordered set of locale codes with `en` as the default (`spec.md`
/// §4.I: "Locales: ordered set with `en` as default"). Insertion order is
/// preserved for everything after the default, and re-inserting a known
/// locale is a no-op rather than a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    locales: Vec<String>,
}

pub const DEFAULT_LOCALE: &str = "en";

impl Default for LocaleSet {
    fn default() -> Self {
        Self { locales: vec![DEFAULT_LOCALE.to_string()] }
    }
}

impl LocaleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `locale` if it isn't already present. Returns whether it was
    /// newly added.
    pub fn add(&mut self, locale: impl Into<String>) -> bool {
        let locale = locale.into();
        if self.locales.iter().any(|existing| *existing == locale) {
            return false;
        }
        self.locales.push(locale);
        true
    }

    pub fn remove(&mut self, locale: &str) -> bool {
        if locale == DEFAULT_LOCALE {
            return false;
        }
        let before = self.locales.len();
        self.locales.retain(|existing| existing != locale);
        self.locales.len() != before
    }

    pub fn contains(&self, locale: &str) -> bool {
        self.locales.iter().any(|existing| existing == locale)
    }

    pub fn default_locale(&self) -> &str {
        self.locales.first().map(String::as_str).unwrap_or(DEFAULT_LOCALE)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locales.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }
}
