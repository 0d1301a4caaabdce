#![forbid(unsafe_code)]
//! stowage-core: records, digests, configuration, and errors shared by every
//! stage of the archiving pipeline.
//!
//! This crate does no I/O. Streaming file hashes, manifest serialization, and
//! tree traversal live in `stowage-io`; keeping them out of core keeps the
//! planner and its tests free of filesystem setup.

pub mod config;
pub mod digest;
pub mod error;
pub mod prelude;
pub mod record;

/// Crate version string, recorded in logs for provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
