#![forbid(unsafe_code)]
//! stowage-io: filesystem adapters for the archiving pipeline.
//!
//! This crate owns everything that touches the disk on the inventory side:
//! - streaming file fingerprints (`fingerprint`)
//! - deterministic tree traversal and manifest generation (`walk`)
//! - the CSV manifest codec (`codec`)
//! - persistence of the cross-run seen-digest set (`digest_store`)
//!
//! Relocating files into buckets lives in `stowage-exec`; the packing
//! algorithm itself is `stowage-planner` and is I/O-free.

pub mod codec;
pub mod digest_store;
pub mod fingerprint;
pub mod walk;

pub use codec::{read_manifest, write_manifest, ManifestWriter};
pub use digest_store::{load_digest_set, save_digest_set};
pub use fingerprint::{digest_file, file_record, BLOCK_SIZE};
pub use walk::{collect_records, discover_manifests, generate_manifest};
