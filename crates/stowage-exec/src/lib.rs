#![forbid(unsafe_code)]
//! stowage-exec: materializes planned buckets onto disk and verifies
//! manifests against their asset folders.
//!
//! Materialization is not transactional: a bucket whose move step fails
//! midway keeps its manifest and a partially populated asset folder. The
//! verifier is the recovery mechanism of record; re-running it against such a
//! bucket reports the missing or mismatched files.

pub mod materialize;
pub mod mover;
pub mod verify;

pub use materialize::{MaterializeReport, Materializer};
pub use verify::verify_manifest;
