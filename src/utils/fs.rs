//! Filesystem access for sources and the numbered output directory.
//!
//! The output directory is the only persisted state, so everything that reads
//! or mutates it goes through [`OutputStore`]. Numbering and compaction only
//! ever see that trait, which keeps them testable without touching disk.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use crate::utils::{SequencerError, SequencerResult, is_source_image, output_file_name, parse_output_number};

/// A `<N>.webp` file found in the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub number: u32,
    pub path: PathBuf,
}

/// Read/write access to the numbered output set.
pub trait OutputStore {
    /// Full path of the output file numbered `number`, whether or not it exists.
    fn path_for(&self, number: u32) -> PathBuf;

    /// Lists every numbered output file, sorted ascending by number.
    fn list(&self) -> SequencerResult<Vec<OutputFile>>;

    /// Deletes `<number>.webp`. Returns `false` when there was nothing to delete.
    fn remove(&self, number: u32) -> SequencerResult<bool>;

    /// Renames `<from>.webp` to `<to>.webp`. Refuses to overwrite an existing target.
    fn rename(&self, from: u32, to: u32) -> SequencerResult<()>;

    /// Removes every file in the output directory. Returns how many were removed.
    fn clear(&self) -> SequencerResult<usize>;
}

/// [`OutputStore`] backed by a real directory.
#[derive(Debug, Clone)]
pub struct FsOutputStore {
    root: PathBuf,
}

impl FsOutputStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl OutputStore for FsOutputStore {
    fn path_for(&self, number: u32) -> PathBuf {
        self.root.join(output_file_name(number))
    }

    fn list(&self) -> SequencerResult<Vec<OutputFile>> {
        let entries = fs::read_dir(&self.root).map_err(|e| SequencerError::io(format!(
            "Failed to read output directory {}: {}", self.root.display(), e
        )))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let Some(number) = name.to_str().and_then(parse_output_number) else {
                debug!("Ignoring non-sequence file {}", entry.path().display());
                continue;
            };
            files.push(OutputFile { number, path: entry.path() });
        }

        files.sort_by_key(|file| file.number);
        Ok(files)
    }

    fn remove(&self, number: u32) -> SequencerResult<bool> {
        let path = self.path_for(number);
        if !path.is_file() {
            return Ok(false);
        }
        fs::remove_file(&path).map_err(|e| SequencerError::io(format!(
            "Failed to delete {}: {}", path.display(), e
        )))?;
        Ok(true)
    }

    fn rename(&self, from: u32, to: u32) -> SequencerResult<()> {
        let source = self.path_for(from);
        let target = self.path_for(to);
        if target.exists() {
            return Err(SequencerError::io(format!(
                "Refusing to rename {} over existing {}", source.display(), target.display()
            )));
        }
        fs::rename(&source, &target).map_err(|e| SequencerError::io(format!(
            "Failed to rename {} to {}: {}", source.display(), target.display(), e
        )))
    }

    fn clear(&self) -> SequencerResult<usize> {
        let mut removed = 0;
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                warn!("Leaving subdirectory {} in place", path.display());
                continue;
            }
            fs::remove_file(&path).map_err(|e| SequencerError::io(format!(
                "Failed to delete {}: {}", path.display(), e
            )))?;
            removed += 1;
        }
        Ok(removed)
    }
}

/// Lists the recognised images directly inside `dir`, sorted by path.
pub fn scan_sources(dir: impl AsRef<Path>) -> SequencerResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut sources = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_file() && is_source_image(&path) {
            sources.push(path);
        }
    }
    sources.sort();
    Ok(sources)
}

/// Keeps the explicitly listed paths that are recognised images.
///
/// Other extensions are dropped silently; paths with a good extension that
/// are not readable files are dropped with a warning.
pub fn filter_sources(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|path| is_source_image(path))
        .filter(|path| {
            let exists = path.is_file();
            if !exists {
                warn!("Skipping {}: not a file", path.display());
            }
            exists
        })
        .cloned()
        .collect()
}

/// Get file size in bytes, or zero when it cannot be read.
pub fn file_size(path: impl AsRef<Path>) -> u64 {
    fs::metadata(path.as_ref()).map(|m| m.len()).unwrap_or(0)
}
