//! Convenient re-exports for downstream crates.

pub use crate::config::{ArchiveConfig, Mode};
pub use crate::digest::{digest_bytes, Digest, Digester};
pub use crate::error::{Error, Result};
pub use crate::record::{
    FileRecord, ASSETS_DIR_NAME, MANIFEST_FILE_NAME, MANIFEST_HEADER, MANIFEST_HEADER_WITH_ORIGIN,
};
