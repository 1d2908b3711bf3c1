//! The locale, CLDR, translation, and environment-check registries a run
//! consults alongside the class database (`spec.md` §4.I). None of these
//! are on the `analyseClasses` critical path the way the database and
//! merger are — they're consulted by the compiler and the translation
//! extractor, both external collaborators.

mod cldr;
mod environment;
mod error;
mod locales;
mod translation;
mod update;

pub use cldr::CldrCache;
pub use cldr::CldrLoader;
pub use environment::EnvironmentMap;
pub use error::RegistryError;
pub use locales::LocaleSet;
pub use locales::DEFAULT_LOCALE;
pub use translation::Translation;
pub use translation::TranslationCache;
pub use translation::TranslationLoader;
pub use update::update_translations;
pub use update::ClassTranslations;
pub use update::LineNumbers;
pub use update::RawTranslationHit;
pub use update::TranslationEntry;
