//! Sequential writer for a `.part` file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Buffered writer for `<final>.part`. Either [`finalize`](Self::finalize)
/// it into place or [`discard`](Self::discard) it.
pub struct PartFile {
    file: BufWriter<File>,
    temp_path: PathBuf,
}

impl PartFile {
    /// Create (or truncate) the temp file for `final_path`.
    pub fn create(final_path: &Path) -> io::Result<Self> {
        let temp_path = super::temp_path(final_path);
        let file = File::create(&temp_path)?;
        Ok(Self {
            file: BufWriter::new(file),
            temp_path,
        })
    }

    /// Path to the current temp file.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Flush, sync, and rename onto `final_path`, replacing any existing file.
    pub fn finalize(self, final_path: &Path) -> io::Result<()> {
        let file = self.file.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        drop(file);
        std::fs::rename(&self.temp_path, final_path)
    }

    /// Drop the temp file. Removal errors are logged, not returned.
    pub fn discard(self) {
        let temp_path = self.temp_path;
        drop(self.file);
        if let Err(e) = std::fs::remove_file(&temp_path) {
            if e.kind() != io::ErrorKind::NotFound {
                tracing::warn!("could not remove {}: {}", temp_path.display(), e);
            }
        }
    }
}

impl Write for PartFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
