//! Persistence for the cross-run seen-digest set.
//!
//! The planner only mutates the set it is handed; loading it before a run and
//! saving it after are the caller's job, which keeps the packing algorithm
//! pure and testable with injected sets.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use stowage_core::digest::Digest;
use stowage_core::error::{Error, Result};

/// Load a digest set previously saved with [`save_digest_set`].
pub fn load_digest_set(path: &Path) -> Result<BTreeSet<Digest>> {
    let f = File::open(path)?;
    serde_json::from_reader(BufReader::new(f))
        .map_err(|e| Error::Format(format!("digest set {}: {e}", path.display())))
}

/// Save the set as a JSON array of hex digests. `BTreeSet` iteration keeps the
/// file sorted, so successive saves diff cleanly.
pub fn save_digest_set(set: &BTreeSet<Digest>, path: &Path) -> Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, set)
        .map_err(|e| Error::Format(format!("digest set {}: {e}", path.display())))?;
    w.flush()?;
    Ok(())
}
