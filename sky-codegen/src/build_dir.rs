//! Output directory management.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use skyway_core::File;

use crate::CompileError;

/// Name of the handler subdirectory inside an output directory.
pub const HANDLERS_DIR: &str = "handlers";

/// An output directory that is reset before every build.
#[derive(Debug, Clone)]
pub struct BuildDir {
    root: PathBuf,
}

impl BuildDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn handlers_dir(&self) -> PathBuf {
        self.root.join(HANDLERS_DIR)
    }

    /// Remove the directory if it exists, then recreate it with an empty
    /// `handlers/` subdirectory.
    pub fn reset(&self) -> io::Result<()> {
        match fs::remove_dir_all(&self.root) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::create_dir_all(self.handlers_dir())
    }

    /// Write rendered files under the root.
    pub fn write_all(&self, files: &[File]) -> Result<(), CompileError> {
        for file in files {
            file.write(&self.root)
                .map_err(CompileError::write(file.target(&self.root)))?;
        }
        Ok(())
    }
}

/// How rendered artifacts reach the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WriteStrategy {
    /// Build into a hidden staging directory next to the output directory
    /// and swap it into place with renames. The output directory holds
    /// either the previous build or the new one, never a partial one.
    #[default]
    Staged,
    /// Reset the output directory, then write into it.
    InPlace,
}

impl WriteStrategy {
    /// Replace the contents of `output_dir` with `files`.
    pub fn write(&self, output_dir: &Path, files: &[File]) -> Result<(), CompileError> {
        match self {
            WriteStrategy::InPlace => {
                let build = BuildDir::new(output_dir);
                build.reset().map_err(CompileError::write(output_dir))?;
                build.write_all(files)
            }
            WriteStrategy::Staged => write_staged(output_dir, files),
        }
    }
}

fn write_staged(output_dir: &Path, files: &[File]) -> Result<(), CompileError> {
    let parent = match output_dir.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(CompileError::write(parent))?;

    // Same parent as the output so the final rename stays on one filesystem
    let staging = tempfile::Builder::new()
        .prefix(".skyway-")
        .tempdir_in(parent)
        .map_err(CompileError::write(parent))?;

    let build = BuildDir::new(staging.path().join("out"));
    build.reset().map_err(CompileError::write(build.root()))?;
    build.write_all(files)?;

    swap_into_place(build.root(), output_dir, &staging.path().join("previous"))?;
    tracing::debug!(output = %output_dir.display(), "swapped staged build into place");

    // Dropping the staging directory removes the previous build
    staging.close().map_err(CompileError::write(parent))
}

fn swap_into_place(staged: &Path, output_dir: &Path, previous: &Path) -> Result<(), CompileError> {
    if fs::symlink_metadata(output_dir).is_err() {
        return fs::rename(staged, output_dir).map_err(CompileError::write(output_dir));
    }

    fs::rename(output_dir, previous).map_err(CompileError::write(output_dir))?;
    if let Err(source) = fs::rename(staged, output_dir) {
        if let Err(restore) = fs::rename(previous, output_dir) {
            tracing::error!(
                output = %output_dir.display(),
                error = %restore,
                "failed to restore previous build"
            );
        }
        return Err(CompileError::ArtifactWrite {
            path: output_dir.to_path_buf(),
            source,
        });
    }
    Ok(())
}
