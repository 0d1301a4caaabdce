//! Manifest verification: existence and digest equality of every listed file.

use std::path::Path;

use stowage_core::error::Result;
use stowage_core::record::ASSETS_DIR_NAME;
use stowage_io::codec::read_manifest;
use stowage_io::fingerprint::digest_file;

/// Re-hash every file a manifest lists against its sibling `assets` folder.
///
/// Returns `Ok(false)` on the first check that fails: missing assets folder
/// (checked before the manifest is even read), header mismatch when
/// `expected_header` is supplied, a listed file that is absent, or a digest
/// that no longer matches. Sizes and timestamps are never consulted. An
/// unreadable or malformed manifest is an error, not a `false`.
pub fn verify_manifest(manifest_path: &Path, expected_header: Option<&[&str]>) -> Result<bool> {
    let dir = manifest_path.parent().unwrap_or_else(|| Path::new(""));
    let assets = dir.join(ASSETS_DIR_NAME);
    if !assets.is_dir() {
        tracing::warn!(manifest = %manifest_path.display(), "no assets folder");
        return Ok(false);
    }

    let (header, records) = read_manifest(manifest_path)?;
    if let Some(expected) = expected_header {
        if header != expected {
            tracing::warn!(manifest = %manifest_path.display(), ?header, "header mismatch");
            return Ok(false);
        }
    }

    for rec in &records {
        let path = assets.join(&rec.relative_path);
        if !path.exists() {
            tracing::warn!(file = %path.display(), "file missing");
            return Ok(false);
        }
        if digest_file(&path)? != rec.digest {
            tracing::warn!(file = %path.display(), "digest mismatch");
            return Ok(false);
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use stowage_core::error::Error;
    use stowage_core::record::MANIFEST_HEADER;
    use stowage_io::walk::generate_manifest;

    fn seed_and_generate(base: &Path) -> PathBuf {
        let assets = base.join("assets");
        std::fs::create_dir_all(assets.join("sub")).unwrap();
        std::fs::write(assets.join("a.bin"), b"alpha").unwrap();
        std::fs::write(assets.join("sub/b.bin"), b"beta").unwrap();
        generate_manifest(&assets).unwrap()
    }

    #[test]
    fn fresh_manifest_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = seed_and_generate(dir.path());
        assert!(verify_manifest(&manifest, Some(&MANIFEST_HEADER)).unwrap());
    }

    #[test]
    fn missing_assets_folder_fails_without_reading() {
        let dir = tempfile::tempdir().unwrap();
        // A manifest with no sibling assets dir; garbage contents prove the
        // file is never parsed.
        let manifest = dir.path().join("file_manifest.csv");
        std::fs::write(&manifest, b"not,a,real,manifest\n????\n").unwrap();
        assert!(!verify_manifest(&manifest, None).unwrap());
    }

    #[test]
    fn header_mismatch_fails_when_expected() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = seed_and_generate(dir.path());
        let expected = ["Path", "Bytes", "MD5", "Timestamp"];
        assert!(!verify_manifest(&manifest, Some(&expected)).unwrap());
        // Without an expectation the same manifest passes.
        assert!(verify_manifest(&manifest, None).unwrap());
    }

    #[test]
    fn mutated_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = seed_and_generate(dir.path());
        std::fs::write(dir.path().join("assets/a.bin"), b"alphA").unwrap();
        assert!(!verify_manifest(&manifest, None).unwrap());
    }

    #[test]
    fn deleted_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = seed_and_generate(dir.path());
        std::fs::remove_file(dir.path().join("assets/sub/b.bin")).unwrap();
        assert!(!verify_manifest(&manifest, None).unwrap());
    }

    #[test]
    fn malformed_manifest_is_an_error_not_false() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("assets")).unwrap();
        let manifest = dir.path().join("file_manifest.csv");
        std::fs::write(
            &manifest,
            b"File Path,Bytes,MD5,Timestamp\na,ten,93b885adfe0da089cdf634904fd59f71,t\n",
        )
        .unwrap();
        assert!(matches!(
            verify_manifest(&manifest, None),
            Err(Error::Format(_))
        ));
    }
}
