use std::{
    io,
    path::{Path, PathBuf},
};

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// A rendered file, relative to the directory it will be written into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: PathBuf,
    content: String,
}

impl File {
    /// Create a new file with the given relative path and content
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the relative file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the file content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Absolute target of this file under `base`
    pub fn target(&self, base: &Path) -> PathBuf {
        base.join(&self.path)
    }

    /// Write the file under `base`, always overwriting
    pub fn write(&self, base: &Path) -> io::Result<PathBuf> {
        let target = self.target(base);
        write_file(&target, &self.content)?;
        Ok(target)
    }
}
