//! The merged per-class meta-model.
//!
//! This crate is pure data: [`ClassMeta`] and the entry types nested inside
//! it. The ancestor walk that populates them lives in `atelier-merger`; the
//! cache that loads/saves them by class name lives in `atelier-analyzer`.
//! Both depend on this crate rather than the other way around.

mod access;
mod event;
mod jsdoc;
mod member;
mod meta;
mod property;
mod static_entry;

pub use access::AccessModifier;
pub use event::EventEntry;
pub use jsdoc::JsDoc;
pub use jsdoc::JsDocParam;
pub use jsdoc::JsDocReturn;
pub use member::AccessorKind;
pub use member::EntityKind;
pub use member::EntityOrigin;
pub use member::MemberEntry;
pub use meta::ClassLikeKind;
pub use meta::ClassMeta;
pub use meta::SyntheticSlots;
pub use property::PropertyCheck;
pub use property::PropertyEntry;
pub use static_entry::StaticEntry;
