//! Deterministic tree traversal and manifest generation.

use std::path::{Path, PathBuf};

use stowage_core::error::{Error, Result};
use stowage_core::record::{FileRecord, MANIFEST_FILE_NAME};
use walkdir::WalkDir;

use crate::codec::ManifestWriter;
use crate::fingerprint;

/// Walk `root`, fingerprint every visible file, and write `file_manifest.csv`
/// into the parent of `root`. Returns the manifest path.
///
/// A failure partway through leaves a partially written manifest; callers
/// must treat an aborted run's output as unreliable.
pub fn generate_manifest(root: &Path) -> Result<PathBuf> {
    if !root.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("root directory not found: {}", root.display()),
        )));
    }
    let parent = root.parent().ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("root {} has no parent for the manifest", root.display()),
        ))
    })?;
    let out_path = parent.join(MANIFEST_FILE_NAME);

    let mut writer = ManifestWriter::to_path(&out_path, false)?;
    let mut count = 0u64;
    visit_files(root, &mut |rec| {
        count += 1;
        writer.write_record(&rec)
    })?;
    writer.flush()?;

    tracing::info!(manifest = %out_path.display(), files = count, "manifest written");
    Ok(out_path)
}

/// Collect fingerprint records for every visible file under `root`, in
/// manifest order, without writing anything.
pub fn collect_records(root: &Path) -> Result<Vec<FileRecord>> {
    let mut records = Vec::new();
    visit_files(root, &mut |rec| {
        records.push(rec);
        Ok(())
    })?;
    Ok(records)
}

// Traversal order is the observable contract: within each directory, files
// first and subdirectories after, each set sorted by name, so repeated runs
// over an unchanged tree produce byte-identical manifests. Entries whose name
// starts with `.` are skipped as files only; hidden directories are still
// descended.
fn visit_files(root: &Path, f: &mut dyn FnMut(FileRecord) -> Result<()>) -> Result<()> {
    if !root.is_dir() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("root directory not found: {}", root.display()),
        )));
    }

    let walker = WalkDir::new(root).sort_by(|a, b| {
        a.file_type()
            .is_dir()
            .cmp(&b.file_type().is_dir())
            .then_with(|| a.file_name().cmp(b.file_name()))
    });

    for entry in walker {
        let entry = entry.map_err(|e| Error::Io(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        f(fingerprint::file_record(entry.path(), root)?)?;
    }
    Ok(())
}

/// Sorted `input_root/*/file_manifest.csv` paths: the layout earlier archiving
/// runs leave behind, one subdirectory per manifest.
pub fn discover_manifests(input_root: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(input_root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let candidate = entry.path().join(MANIFEST_FILE_NAME);
        if candidate.is_file() {
            found.push(candidate);
        }
    }
    found.sort();
    Ok(found)
}
