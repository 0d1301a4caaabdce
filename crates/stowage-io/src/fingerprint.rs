//! Streaming file fingerprints.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use stowage_core::digest::{Digest, Digester};
use stowage_core::error::{Error, Result};
use stowage_core::record::FileRecord;

/// Fixed read block; bounds memory regardless of file size.
pub const BLOCK_SIZE: usize = 64 * 1024;

/// Digest a file's content block by block.
///
/// Fails with an I/O error if the file cannot be opened or a read fails
/// partway; no partial digest is ever returned.
pub fn digest_file(path: &Path) -> Result<Digest> {
    let mut f = File::open(path)?;
    let mut ctx = Digester::new();
    let mut buf = vec![0u8; BLOCK_SIZE];
    loop {
        let n = f.read(&mut buf)?;
        if n == 0 {
            break;
        }
        ctx.update(&buf[..n]);
    }
    Ok(ctx.finish())
}

/// Fingerprint one file into a manifest row, with its path relative to `root`.
pub fn file_record(path: &Path, root: &Path) -> Result<FileRecord> {
    let meta = std::fs::metadata(path)?;
    let digest = digest_file(path)?;
    let timestamp = format_timestamp(meta.modified()?);
    let rel = path.strip_prefix(root).map_err(|_| {
        Error::Config(format!(
            "path {} is not under root {}",
            path.display(),
            root.display()
        ))
    })?;
    Ok(FileRecord::new(
        path_to_string(rel)?,
        meta.len(),
        digest,
        timestamp,
    ))
}

/// Local time, `YYYY-MM-DD HH:MM:SS`. Informational only.
pub fn format_timestamp(t: SystemTime) -> String {
    let dt: DateTime<Local> = t.into();
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

// Manifest rows are text; a path that cannot render as UTF-8 cannot round-trip
// through a manifest and is rejected rather than lossily encoded.
fn path_to_string(p: &Path) -> Result<String> {
    p.to_str().map(|s| s.to_string()).ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("non-UTF-8 path: {}", p.display()),
        ))
    })
}
