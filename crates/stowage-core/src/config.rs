//! Archiver configuration shared by the planner, materializer, and CLI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How planned buckets are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Relocate files into bucket asset folders.
    Move,
    /// Copy files, leaving the sources in place.
    Copy,
    /// Write bucket manifests only; touch no assets.
    PlanOnly,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "move" => Ok(Mode::Move),
            "copy" => Ok(Mode::Copy),
            "plan-only" => Ok(Mode::PlanOnly),
            other => Err(Error::Config(format!(
                "unknown mode '{other}' (expected move, copy, or plan-only)"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Move => "move",
            Mode::Copy => "copy",
            Mode::PlanOnly => "plan-only",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Hard byte capacity of one bucket. A file larger than this can never be
    /// packed and is diverted to the oversized set.
    pub bucket_capacity_bytes: u64,

    /// Flag records whose digest was already seen instead of packing them
    /// again.
    pub dedupe_enabled: bool,

    /// Directory-name prefix for emitted buckets.
    pub bucket_prefix: String,

    /// Sequence number of the first emitted bucket.
    pub start_sequence: u32,

    /// What the materializer does with planned buckets.
    pub mode: Mode,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            // 50 GB (decimal) fits one LTO-friendly transfer batch.
            bucket_capacity_bytes: 50 * 1000 * 1000 * 1000,
            dedupe_enabled: false,
            bucket_prefix: "BDL-".to_string(),
            start_sequence: 1,
            mode: Mode::Move,
        }
    }
}

impl ArchiveConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `STOWAGE_BUCKET_CAPACITY_BYTES`: bucket capacity in bytes
    /// - `STOWAGE_DEDUPE`: `1`/`true` to enable deduplication
    /// - `STOWAGE_BUCKET_PREFIX`: bucket directory prefix
    /// - `STOWAGE_START_SEQUENCE`: first bucket sequence number
    /// - `STOWAGE_MODE`: `move`, `copy`, or `plan-only`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("STOWAGE_BUCKET_CAPACITY_BYTES") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.bucket_capacity_bytes = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_DEDUPE") {
            cfg.dedupe_enabled = s == "1" || s.eq_ignore_ascii_case("true");
        }

        if let Ok(s) = std::env::var("STOWAGE_BUCKET_PREFIX") {
            cfg.bucket_prefix = s;
        }

        if let Ok(s) = std::env::var("STOWAGE_START_SEQUENCE") {
            if let Ok(v) = s.parse::<u32>() {
                cfg.start_sequence = v;
            }
        }

        if let Ok(s) = std::env::var("STOWAGE_MODE") {
            if let Ok(v) = s.parse::<Mode>() {
                cfg.mode = v;
            }
        }

        cfg
    }

    /// Validate before any I/O begins.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_capacity_bytes == 0 {
            return Err(Error::Config(
                "bucket capacity must be greater than zero".to_string(),
            ));
        }
        if self.bucket_prefix.is_empty() {
            return Err(Error::Config("bucket prefix must not be empty".to_string()));
        }
        Ok(())
    }
}
