//! Writes generated files into the output roots.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::constants::TOOL_DIR;
use crate::error::Result;
use crate::paths::OutputDirectorySet;

/// Owns the source and intermediates roots and performs every filesystem
/// write made on behalf of a blueprint.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    source_output_dir: PathBuf,
    intermediates_output_dir: PathBuf,
}

impl CodeWriter {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(source_output_dir: P, intermediates: Q) -> Self {
        Self {
            source_output_dir: source_output_dir.into(),
            intermediates_output_dir: intermediates.into(),
        }
    }

    /// Lays both roots out under `build_dir` as `generated/sourcegen` and
    /// `intermediates/sourcegen`.
    pub fn for_build_dir<P: AsRef<Path>>(build_dir: P) -> Self {
        let build_dir = build_dir.as_ref();
        Self::new(
            build_dir.join("generated").join(TOOL_DIR),
            build_dir.join("intermediates").join(TOOL_DIR),
        )
    }

    pub fn source_output_dir(&self) -> &Path {
        &self.source_output_dir
    }

    pub fn intermediates_output_dir(&self) -> &Path {
        &self.intermediates_output_dir
    }

    pub fn output_dirs(&self, generator: &str, variant: &str) -> OutputDirectorySet {
        OutputDirectorySet::resolve(&self.source_output_dir, generator, variant)
    }

    /// Clears and recreates the four directories of `dirs`.
    pub fn prepare(&self, dirs: &OutputDirectorySet) -> Result<()> {
        for dir in dirs.iter() {
            if dir.exists() {
                debug!("Clearing {}", dir.display());
                fs::remove_dir_all(dir)?;
            }
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Writes a Kotlin source under its package directory below `root`.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the written file
    pub fn write_kotlin(
        &self,
        root: &Path,
        package_name: &str,
        file_name: &str,
        content: &str,
    ) -> Result<PathBuf> {
        let mut path = root.to_path_buf();
        for segment in package_name.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{file_name}.kt"));
        self.write_file(&path, content)?;
        Ok(path)
    }

    /// Writes a resource file at `relative_path` below `root`.
    pub fn write_resource<P: AsRef<Path>>(
        &self,
        root: &Path,
        relative_path: P,
        content: &str,
    ) -> Result<PathBuf> {
        let path = root.join(relative_path);
        self.write_file(&path, content)?;
        Ok(path)
    }

    /// Writes `content` to `path`, creating parent directories.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing file: {}", path.display());
        fs::write(path, content)?;
        Ok(())
    }
}

/// Lists every regular file below `dirs`, sorted by path.
pub fn generated_files(dirs: &OutputDirectorySet) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for dir in dirs.iter() {
        if !dir.exists() {
            continue;
        }
        for entry in WalkDir::new(dir) {
            let entry = entry.map_err(std::io::Error::from)?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    Ok(files)
}
