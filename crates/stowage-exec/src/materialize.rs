//! Bucket write-out: directories, manifests, and asset relocation.

use std::path::{Path, PathBuf};

use stowage_core::config::Mode;
use stowage_core::error::{Error, Result};
use stowage_core::record::{FileRecord, ASSETS_DIR_NAME, MANIFEST_FILE_NAME};
use stowage_io::codec::write_manifest;
use stowage_planner::{Bucket, PlanOutcome};

use crate::mover;

/// Totals accumulated over one materialization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    pub buckets_written: usize,
    pub files_relocated: usize,
    pub bytes_relocated: u64,
}

pub struct Materializer {
    output_root: PathBuf,
    prefix: String,
    start_sequence: u32,
    mode: Mode,
}

impl Materializer {
    pub fn new(
        output_root: impl Into<PathBuf>,
        prefix: impl Into<String>,
        start_sequence: u32,
        mode: Mode,
    ) -> Self {
        Self {
            output_root: output_root.into(),
            prefix: prefix.into(),
            start_sequence,
            mode,
        }
    }

    /// Emit every planned bucket in order: `{output_root}/{prefix}{seq:04}/`
    /// with its manifest and `assets` folder, relocating files unless the mode
    /// is plan-only. Duplicates and oversized sets are written as side report
    /// manifests next to the buckets.
    ///
    /// No rollback: a bucket that fails mid-move keeps its manifest and a
    /// partially populated asset folder; re-verification reports the gap.
    pub fn materialize(&self, outcome: &PlanOutcome) -> Result<MaterializeReport> {
        std::fs::create_dir_all(&self.output_root)?;

        let mut report = MaterializeReport::default();
        for (i, bucket) in outcome.buckets.iter().enumerate() {
            let seq = self.start_sequence + i as u32;
            let dest = self.output_root.join(format!("{}{:04}", self.prefix, seq));
            self.write_bucket(bucket, &dest, &mut report)?;
        }

        if !outcome.duplicates.is_empty() {
            write_side_report(&self.output_root, "duplicates.csv", &outcome.duplicates)?;
        }
        if !outcome.oversized.is_empty() {
            write_side_report(&self.output_root, "oversized.csv", &outcome.oversized)?;
        }

        tracing::info!(
            buckets = report.buckets_written,
            files = report.files_relocated,
            bytes = report.bytes_relocated,
            mode = %self.mode,
            "materialization complete"
        );
        Ok(report)
    }

    fn write_bucket(
        &self,
        bucket: &Bucket,
        dest: &Path,
        report: &mut MaterializeReport,
    ) -> Result<()> {
        let assets = dest.join(ASSETS_DIR_NAME);
        std::fs::create_dir_all(&assets)?;
        write_manifest(&dest.join(MANIFEST_FILE_NAME), &bucket.records, true)?;

        if self.mode != Mode::PlanOnly {
            for rec in &bucket.records {
                self.relocate(rec, &assets)?;
                report.files_relocated += 1;
                report.bytes_relocated += rec.size_bytes;
            }
        }
        report.buckets_written += 1;
        tracing::debug!(
            bucket = %dest.display(),
            files = bucket.len(),
            bytes = bucket.total_bytes,
            "bucket written"
        );
        Ok(())
    }

    fn relocate(&self, rec: &FileRecord, assets: &Path) -> Result<()> {
        let origin = rec.origin.as_deref().ok_or_else(|| {
            Error::Format(format!(
                "record '{}' has no origin to relocate from",
                rec.relative_path
            ))
        })?;
        let source = Path::new(origin).join(&rec.relative_path);
        let dest = assets.join(&rec.relative_path);
        match self.mode {
            Mode::Move => mover::move_file(&source, &dest),
            Mode::Copy => mover::copy_file(&source, &dest).map(|_| ()),
            Mode::PlanOnly => Ok(()),
        }
    }
}

fn write_side_report(root: &Path, name: &str, records: &[FileRecord]) -> Result<()> {
    write_manifest(&root.join(name), records, true)
}
