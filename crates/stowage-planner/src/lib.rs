#![forbid(unsafe_code)]
//! stowage-planner: one or more manifests → size-bounded buckets plus the
//! duplicates and oversized sets.
//!
//! Design:
//! - `pack` is the pure algorithm; it never touches the filesystem.
//! - `plan` reads manifests through the `stowage-io` codec in the order
//!   given, annotates each record with its origin, and feeds `pack`.
//! - The caller owns the seen-digest set (load/persist via
//!   `stowage_io::digest_store`), so tests can inject empty or pre-seeded
//!   sets deterministically and runs can share dedupe state.

pub mod outcome;
pub mod pack;

pub use outcome::{Bucket, PlanOutcome};
pub use pack::pack;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use stowage_core::digest::Digest;
use stowage_core::error::{Error, Result};
use stowage_core::record::{FileRecord, ASSETS_DIR_NAME};

/// Read `manifest_paths` in the order given and partition their records into
/// capacity-bounded buckets.
///
/// Record order is the concatenation of the manifests as listed, each in file
/// order; the packer never reorders. Capacity is validated before any I/O.
pub fn plan(
    manifest_paths: &[PathBuf],
    capacity_bytes: u64,
    dedupe: bool,
    seen: &mut BTreeSet<Digest>,
) -> Result<PlanOutcome> {
    if capacity_bytes == 0 {
        return Err(Error::Config(
            "bucket capacity must be greater than zero".to_string(),
        ));
    }

    let mut records: Vec<FileRecord> = Vec::new();
    for path in manifest_paths {
        let (_, rows) = stowage_io::read_manifest(path)?;
        let origin = origin_for(path);
        tracing::debug!(manifest = %path.display(), rows = rows.len(), "manifest loaded");
        records.extend(rows.into_iter().map(|r| r.with_origin(origin.clone())));
    }

    let outcome = pack(records, capacity_bytes, dedupe, seen)?;
    tracing::info!(
        buckets = outcome.buckets.len(),
        duplicates = outcome.duplicates.len(),
        oversized = outcome.oversized.len(),
        "plan complete"
    );
    Ok(outcome)
}

// A manifest's files live in its sibling `assets` directory; that directory is
// the record's origin for the materializer.
fn origin_for(manifest_path: &Path) -> String {
    let dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    dir.join(ASSETS_DIR_NAME).to_string_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::digest::digest_bytes;
    use stowage_io::codec::write_manifest;

    fn rec(name: &str, size: u64) -> FileRecord {
        FileRecord::new(name, size, digest_bytes(name.as_bytes()), "t")
    }

    #[test]
    fn plan_annotates_origin_and_preserves_manifest_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("batch-1").join("file_manifest.csv");
        let second = dir.path().join("batch-2").join("file_manifest.csv");
        std::fs::create_dir_all(first.parent().unwrap()).unwrap();
        std::fs::create_dir_all(second.parent().unwrap()).unwrap();
        write_manifest(&first, &[rec("a", 10), rec("b", 10)], false).unwrap();
        write_manifest(&second, &[rec("c", 10)], false).unwrap();

        let mut seen = BTreeSet::new();
        let outcome = plan(&[first.clone(), second], 100, false, &mut seen).unwrap();

        assert_eq!(outcome.buckets.len(), 1);
        let records = &outcome.buckets[0].records;
        let paths: Vec<&str> = records.iter().map(|r| r.relative_path.as_str()).collect();
        assert_eq!(paths, ["a", "b", "c"]);
        assert_eq!(
            records[0].origin.as_deref(),
            Some(
                first
                    .parent()
                    .unwrap()
                    .join(ASSETS_DIR_NAME)
                    .to_str()
                    .unwrap()
            )
        );
    }

    #[test]
    fn dedupe_spans_manifests() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("batch-1").join("file_manifest.csv");
        let second = dir.path().join("batch-2").join("file_manifest.csv");
        std::fs::create_dir_all(first.parent().unwrap()).unwrap();
        std::fs::create_dir_all(second.parent().unwrap()).unwrap();
        // Same digest under different names in both manifests.
        let shared = digest_bytes(b"same content");
        write_manifest(
            &first,
            &[FileRecord::new("one.bin", 10, shared, "t")],
            false,
        )
        .unwrap();
        write_manifest(
            &second,
            &[FileRecord::new("two.bin", 10, shared, "t")],
            false,
        )
        .unwrap();

        let mut seen = BTreeSet::new();
        let outcome = plan(&[first, second], 100, true, &mut seen).unwrap();
        assert_eq!(outcome.buckets.len(), 1);
        assert_eq!(outcome.buckets[0].records[0].relative_path, "one.bin");
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].relative_path, "two.bin");
    }

    #[test]
    fn malformed_manifest_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file_manifest.csv");
        std::fs::write(&path, "File Path,Bytes,MD5,Timestamp\nx,NaN,93b885adfe0da089cdf634904fd59f71,t\n").unwrap();

        let mut seen = BTreeSet::new();
        assert!(matches!(
            plan(&[path], 100, false, &mut seen),
            Err(Error::Format(_))
        ));
    }

    #[test]
    fn zero_capacity_fails_before_reading_anything() {
        let mut seen = BTreeSet::new();
        let missing = PathBuf::from("/does/not/exist/file_manifest.csv");
        assert!(matches!(
            plan(&[missing], 0, false, &mut seen),
            Err(Error::Config(_))
        ));
    }
}
