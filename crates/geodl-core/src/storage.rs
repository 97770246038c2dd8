//! Temp-file writer with atomic rename into place.

use anyhow::{Context, Result};
use std::fs::File;
#[cfg(unix)]
use std::os::unix::fs::FileExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Writer for an artifact's temp file. Safe to clone and use from a curl
/// write callback; each `write_at` is independent (pwrite-style).
#[derive(Clone)]
pub struct StorageWriter {
    file: Arc<File>,
    temp_path: PathBuf,
}

impl StorageWriter {
    /// Create a new temp file at `temp_path` (e.g. `parcelas.geojson.part`).
    /// Overwrites if the path already exists.
    pub fn create(temp_path: &Path) -> Result<Self> {
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(temp_path)
            .with_context(|| format!("failed to create temp file: {}", temp_path.display()))?;
        Ok(StorageWriter {
            file: Arc::new(file),
            temp_path: temp_path.to_path_buf(),
        })
    }

    /// Write `data` at `offset`. Does not change the file's logical cursor.
    #[cfg(unix)]
    pub fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        let n = self
            .file
            .write_at(data, offset)
            .context("storage write_at failed")?;
        if n != data.len() {
            anyhow::bail!("short write: {} of {}", n, data.len());
        }
        Ok(())
    }

    /// Stub for non-Unix (e.g. Windows): use seek + write. Not safe for concurrent use.
    #[cfg(not(unix))]
    pub fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        use std::io::{Seek, SeekFrom, Write};
        let mut f = (*self.file).try_clone()?;
        f.seek(SeekFrom::Start(offset))?;
        f.write_all(data)?;
        Ok(())
    }

    /// Sync file data to disk. Call before `finalize` for durability.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().context("storage sync failed")?;
        Ok(())
    }

    /// Atomically rename the temp file to the final path. Consumes the writer and closes the file.
    /// Call `sync` before this if you need durability. Fails if `final_path` is on a different filesystem.
    pub fn finalize(self, final_path: &Path) -> Result<()> {
        let temp_path = self.temp_path.clone();
        drop(self.file);

        std::fs::rename(&temp_path, final_path).with_context(|| {
            format!(
                "failed to rename {} to {}",
                temp_path.display(),
                final_path.display()
            )
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn write_sync_finalize_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("capa.geojson.part");
        let final_path = dir.path().join("capa.geojson");

        let writer = StorageWriter::create(&temp).unwrap();
        writer.write_at(0, b"{\"type\":").unwrap();
        writer.write_at(8, b"\"FeatureCollection\"}").unwrap();
        writer.sync().unwrap();
        writer.finalize(&final_path).unwrap();

        assert!(!temp.exists());
        let content = fs::read(&final_path).unwrap();
        assert_eq!(content, b"{\"type\":\"FeatureCollection\"}");
    }

    #[test]
    fn finalize_replaces_existing_destination() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("capa.geojson.part");
        let final_path = dir.path().join("capa.geojson");
        fs::write(&final_path, b"old").unwrap();

        let writer = StorageWriter::create(&temp).unwrap();
        writer.write_at(0, b"new").unwrap();
        writer.finalize(&final_path).unwrap();

        assert_eq!(fs::read(&final_path).unwrap(), b"new");
    }

    #[test]
    fn create_truncates_stale_temp() {
        let dir = tempfile::tempdir().unwrap();
        let temp = dir.path().join("capa.geojson.part");
        fs::write(&temp, b"leftover bytes from a dead run").unwrap();

        let writer = StorageWriter::create(&temp).unwrap();
        writer.write_at(0, b"x").unwrap();
        writer.sync().unwrap();

        assert_eq!(fs::read(&temp).unwrap(), b"x");
    }
}
