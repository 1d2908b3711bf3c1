//! Error taxonomy for the class analyser.
//!
//! This crate carries no behavior of its own: it is the vocabulary that the
//! `atelier-analyzer` crate's dispatch loop speaks, kept separate so that
//! lower-level crates (`atelier-database`, `atelier-reflection`) do not need
//! to depend on the orchestration crate to describe what went wrong.

mod error;

pub use error::AnalyserError;
