//! Content fingerprints used for deduplication and integrity checking.
//!
//! A digest is a 128-bit MD5 of a file's bytes, rendered as 32 lowercase hex
//! characters. The threat model is accidental duplication and corruption, not
//! adversarial tampering, so MD5-class collision resistance is sufficient.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest(pub [u8; 16]);

impl Digest {
    /// Render as 32 lowercase hex characters.
    pub fn to_hex(&self) -> String {
        let mut s = String::with_capacity(32);
        for b in &self.0 {
            use std::fmt::Write as _;
            let _ = write!(&mut s, "{:02x}", b);
        }
        s
    }

    /// Parse a 32-char hex string. Anything else is a malformed manifest.
    pub fn from_hex(s: &str) -> Result<Self, Error> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Format(format!("bad digest '{s}'")));
        }
        let mut out = [0u8; 16];
        for (i, byte) in out.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[2 * i..2 * i + 2], 16)
                .map_err(|e| Error::Format(format!("bad digest '{s}': {e}")))?;
        }
        Ok(Digest(out))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Digest::from_hex(s)
    }
}

// Digests serialize as hex strings so seen-set files and manifests stay
// readable and diffable.
impl Serialize for Digest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Digest::from_hex(&s).map_err(de::Error::custom)
    }
}

/// Digest an in-memory byte slice in one shot.
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    Digest(md5::compute(bytes).0)
}

/// Incremental digest state for block-at-a-time hashing of large files.
pub struct Digester(md5::Context);

impl Digester {
    pub fn new() -> Self {
        Self(md5::Context::new())
    }

    pub fn update(&mut self, block: &[u8]) {
        self.0.consume(block);
    }

    pub fn finish(self) -> Digest {
        Digest(self.0.finalize().0)
    }
}

impl Default for Digester {
    fn default() -> Self {
        Self::new()
    }
}
