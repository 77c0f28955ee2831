//! Request-scoped files that must not outlive the request.

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

const CERT_FILE_PREFIX: &str = "attestation_cert";

/// A file on disk owned by a single request.
///
/// The file is removed when the guard is dropped, on every exit path
/// including early returns and a cancelled handler future. Removal failures
/// are logged and otherwise ignored.
#[derive(Debug)]
pub struct TransientFile {
    path: PathBuf,
}

impl TransientFile {
    /// Write `contents` to a new, uniquely named file in `dir`.
    pub async fn write(dir: &Path, contents: &[u8]) -> io::Result<Self> {
        let path = dir.join(format!("{}-{}.cert", CERT_FILE_PREFIX, Uuid::new_v4()));

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create_new(true);
        // Readable by the gateway user only; the directory may be shared.
        #[cfg(unix)]
        options.mode(0o600);
        let mut file = options.open(&path).await?;

        // Guard exists before the write so a partial file is still removed.
        let guard = Self { path };
        file.write_all(contents).await?;
        file.flush().await?;

        tracing::debug!(path = %guard.path.display(), bytes = contents.len(), "Transient file written");
        Ok(guard)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TransientFile {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Transient file removed");
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove transient file"
                );
            }
        }
    }
}
