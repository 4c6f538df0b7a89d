//! Font file I/O.

use std::{
    fs::{create_dir_all, read, write},
    path::PathBuf,
};

use crate::{Error, Result};

/// A font file handle for I/O operations.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<Vec<u8>> {
        read(&self.path).map_err(|source| Error::Read { path: self.path.clone(), source })
    }

    /// Write font data to the file, creating its directory if needed.
    pub fn write(&self, data: impl AsRef<[u8]>) -> Result<()> {
        self.ensure_parent_dir()?;
        write(&self.path, data).map_err(|source| Error::Write { path: self.path.clone(), source })
    }

    /// Create parent directory if it doesn't exist.
    pub fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            create_dir_all(parent)
                .map_err(|source| Error::Write { path: parent.to_path_buf(), source })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_file() {
        let file = FontFile::new("/nonexistent/font.ttf");
        assert!(matches!(file.read(), Err(Error::Read { .. })));
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = FontFile::new(dir.path().join("nested").join("out.ttf"));
        file.write(b"data").unwrap();
        assert_eq!(file.read().unwrap(), b"data");
    }
}
