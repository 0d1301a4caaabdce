#![forbid(unsafe_code)]
//! Facade crate pulling the stowage pipeline stages together for integration
//! tests and downstream embedding. The `stowage` binary lives in
//! `crates/stowage-cli`.

pub use stowage_core::prelude;
pub use stowage_core::{config, digest, error, record};

pub use stowage_exec::{verify_manifest, MaterializeReport, Materializer};
pub use stowage_io::{
    collect_records, digest_file, discover_manifests, generate_manifest, load_digest_set,
    read_manifest, save_digest_set, write_manifest,
};
pub use stowage_planner::{pack, plan, Bucket, PlanOutcome};
