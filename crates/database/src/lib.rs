//! The library index and the persistent class database.
//!
//! This crate owns the two on-disk-backed stores the analyser consults
//! before it does any work: [`LibraryIndex`] (component A — which library
//! owns a given class name, and where its source file lives) and
//! [`ClassDb`] (component B — the per-class facts recorded the last time
//! each class was compiled, keyed by class name). The resource sub-database
//! rides alongside the class database but is otherwise opaque to this
//! crate; see [`resource_db`].

mod class_db;
mod class_info;
mod error;
mod library;
mod resource_db;

pub use class_db::ClassDb;
pub use class_db::SaveDatabaseListener;
pub use class_db::SaveDatabaseListeners;
pub use class_db::DEFAULT_DB_FILENAME;
pub use class_info::ClassInfo;
pub use class_info::DependencyFlags;
pub use class_info::LineNumbers;
pub use class_info::TranslationSourceEntry;
pub use error::DatabaseError;
pub use library::Library;
pub use library::LibraryIndex;
pub use library::SymbolType;
pub use library::SOURCE_EXTENSION;
pub use resource_db::resource_db_path_for;
pub use resource_db::ResourceDatabase;
pub use resource_db::RESOURCE_DB_FILENAME;
