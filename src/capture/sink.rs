//! Capture file sink
//!
//! Owns the on-disk capture file for the lifetime of the logger. The file is
//! created (truncating any previous capture) when the sink is opened and
//! appended to thereafter.

use anyhow::Context;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// An owned, append-only capture file.
pub struct DumpFile {
    file: File,
    path: PathBuf,
}

impl DumpFile {
    /// Create or truncate the capture file at `path`.
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)
            .with_context(|| format!("creating capture file {}", path.display()))?;
        tracing::info!("Capture file opened at {}", path.display());
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for DumpFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

impl Drop for DumpFile {
    fn drop(&mut self) {
        if let Err(e) = self.file.flush() {
            tracing::warn!("Failed to flush capture file on close: {}", e);
        }
    }
}
