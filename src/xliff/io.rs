//! Reading and writing documents on disk.

use std::path::Path;

use super::{
    Xliff,
    XliffOptions,
};
use crate::error::XliffError;

impl Xliff {
    /// Reads and parses the document at `path`.
    ///
    /// The path is recorded in the options of the returned document.
    ///
    /// # Errors
    /// [`XliffError::Io`] when the file cannot be read, otherwise the errors
    /// of [`Xliff::parse`] with the path attached.
    pub async fn load(path: impl AsRef<Path>, options: XliffOptions) -> Result<Self, XliffError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let options = XliffOptions { path: Some(path.to_path_buf()), ..options };
        Self::parse(&content, options).map_err(|e| e.with_path(path))
    }

    /// Serializes the document to `path`, creating parent directories.
    ///
    /// # Errors
    /// [`XliffError::Io`] when a directory or the file cannot be written.
    pub async fn write(&self, path: impl AsRef<Path>) -> Result<(), XliffError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, self.serialize()).await?;
        tracing::debug!(path = %path.display(), resources = self.size(), "Wrote xliff file");
        Ok(())
    }

    /// Writes to the path in the options.
    ///
    /// # Errors
    /// As [`write`](Self::write), plus [`XliffError::Io`] with
    /// [`std::io::ErrorKind::InvalidInput`] when no path is configured.
    pub async fn save(&self) -> Result<(), XliffError> {
        let path = self.options.path.as_deref().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "xliff has no output path")
        })?;
        self.write(path).await
    }
}
