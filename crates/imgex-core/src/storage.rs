//! Asset file lifecycle.
//!
//! Streams a download into a `.part` temp file next to its destination and
//! atomically renames it into place once the transfer succeeded, so a failed
//! fetch never leaves a truncated image under the final name.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `a.png` → `a.png.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Sequential writer for one downloaded asset.
pub struct AssetFile {
    file: BufWriter<File>,
    temp_path: PathBuf,
    final_path: PathBuf,
    written: u64,
}

impl AssetFile {
    /// Create the temp file for `final_path`. Overwrites a stale temp file if present.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = temp_path(final_path);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(AssetFile {
            file: BufWriter::new(file),
            temp_path,
            final_path: final_path.to_path_buf(),
            written: 0,
        })
    }

    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.written += data.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync and rename the temp file to its final name. Returns bytes written.
    pub fn finalize(self) -> io::Result<u64> {
        let AssetFile {
            file,
            temp_path,
            final_path,
            written,
        } = self;
        let file = file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&temp_path, &final_path)?;
        Ok(written)
    }

    /// Drop the temp file without touching the final path.
    pub fn discard(self) {
        let temp_path = self.temp_path.clone();
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            tracing::debug!(path = %temp_path.display(), error = %e, "could not remove temp file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("a.png"));
        assert_eq!(p.to_string_lossy(), "a.png.part");
        let p2 = temp_path(Path::new("/tmp/assets/b.jpg"));
        assert_eq!(p2.to_string_lossy(), "/tmp/assets/b.jpg.part");
    }

    #[test]
    fn write_then_finalize() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.png");

        let mut f = AssetFile::create(&final_path).unwrap();
        f.write_chunk(b"\x89PNG").unwrap();
        f.write_chunk(b"rest").unwrap();
        assert_eq!(f.written(), 8);
        let tp = f.temp_path().to_path_buf();
        assert!(tp.exists());
        assert_eq!(f.finalize().unwrap(), 8);

        assert!(!tp.exists());
        assert_eq!(std::fs::read(&final_path).unwrap(), b"\x89PNGrest");
    }

    #[test]
    fn discard_leaves_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.png");
        let mut f = AssetFile::create(&final_path).unwrap();
        f.write_chunk(b"partial").unwrap();
        let tp = f.temp_path().to_path_buf();
        f.discard();
        assert!(!tp.exists());
        assert!(!final_path.exists());
    }

    #[test]
    fn finalize_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let final_path = dir.path().join("out.png");
        std::fs::write(&final_path, b"old").unwrap();
        let mut f = AssetFile::create(&final_path).unwrap();
        f.write_chunk(b"new").unwrap();
        f.finalize().unwrap();
        assert_eq!(std::fs::read(&final_path).unwrap(), b"new");
    }
}
