//! Orchestrates one run over a set of libraries: the staleness oracle (C),
//! per-class compile dispatch (D), the transitive dependency closure (E),
//! the meta cache (F), the ancestor-walk merger (G, implemented in
//! `atelier-merger`), descendant fixup (H), and the top-level
//! `open`/`analyse_classes` driver that sequences them (`spec.md` §2, §4).

mod closure;
mod compiler;
mod descendant_fixup;
mod dispatch;
mod driver;
mod events;
mod merge;
mod meta_cache;
mod staleness;

pub use closure::ClosureReport;
pub use closure::ClosureSeed;
pub use compiler::ClassFileCompiler;
pub use compiler::CompiledClass;
pub use dispatch::ClassPaths;
pub use dispatch::DispatchOutcome;
pub use driver::open;
pub use driver::AnalyserSession;
pub use driver::OpenOptions;
pub use events::CompiledClass as CompiledClassEvent;
pub use events::CompilingClass;
pub use events::DispatchListeners;
pub use meta_cache::MetaCache;
pub use staleness::check as is_fresh;
pub use staleness::StalenessInputs;
