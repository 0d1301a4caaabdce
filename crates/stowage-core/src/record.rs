//! Manifest rows and the fixed tabular layout they serialize into.

use serde::{Deserialize, Serialize};

use crate::digest::Digest;

/// Literal manifest header, column names and order both significant.
pub const MANIFEST_HEADER: [&str; 4] = ["File Path", "Bytes", "MD5", "Timestamp"];

/// Header for planner output, which must carry each record's source root
/// through to the materializer.
pub const MANIFEST_HEADER_WITH_ORIGIN: [&str; 5] =
    ["File Path", "Bytes", "MD5", "Timestamp", "Origin"];

/// A manifest is always written under this name, in the parent of the tree it
/// describes.
pub const MANIFEST_FILE_NAME: &str = "file_manifest.csv";

/// The files a manifest describes live in a sibling directory with this name.
/// The verifier and materializer both hard-code the convention.
pub const ASSETS_DIR_NAME: &str = "assets";

/// One row of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path of the file relative to its source root. Unique within one
    /// manifest, not across merged manifests.
    pub relative_path: String,

    /// Byte length at hash time.
    pub size_bytes: u64,

    /// Content fingerprint; the sole deduplication and integrity key.
    pub digest: Digest,

    /// Human-readable modification time captured at generation time.
    /// Informational only, never used for equality.
    pub timestamp: String,

    /// Asset root this record came from. Populated by the planner so the
    /// materializer can locate the file; absent in a freshly generated
    /// manifest.
    pub origin: Option<String>,
}

impl FileRecord {
    pub fn new(
        relative_path: impl Into<String>,
        size_bytes: u64,
        digest: Digest,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            relative_path: relative_path.into(),
            size_bytes,
            digest,
            timestamp: timestamp.into(),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }
}
