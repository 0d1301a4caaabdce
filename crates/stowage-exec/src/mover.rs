//! File relocation primitives.

use std::fs;
use std::io;
use std::path::Path;

use stowage_core::error::Result;

/// Move one file, creating destination parent directories. A rename that
/// crosses filesystems falls back to copy + remove.
pub fn move_file(source: &Path, dest: &Path) -> Result<()> {
    ensure_parent(dest)?;
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(source, dest)?;
            fs::remove_file(source)?;
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Copy one file, creating destination parent directories. Returns the number
/// of bytes copied.
pub fn copy_file(source: &Path, dest: &Path) -> Result<u64> {
    ensure_parent(dest)?;
    Ok(fs::copy(source, dest)?)
}

fn ensure_parent(dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stowage_core::error::Error;

    #[test]
    fn move_creates_parents_and_removes_source() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dest = dir.path().join("deep/nested/dest.bin");
        fs::write(&src, b"payload").unwrap();

        move_file(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn copy_leaves_source_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src.bin");
        let dest = dir.path().join("out/dest.bin");
        fs::write(&src, b"payload").unwrap();

        assert_eq!(copy_file(&src, &dest).unwrap(), 7);
        assert!(src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = move_file(&dir.path().join("absent"), &dir.path().join("d")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
