//! Directory catalog: which launch-item files exist in which configured folders.
//!
//! The folder list is fixed when the catalog is built. A [`Catalog`] snapshot is produced by
//! [`DirectoryCatalog::load_all`] and is never edited afterwards; a refresh builds a new one.

pub mod removal;

pub use removal::{delete_files, DeleteFailure, DeleteReport, FailureReason};

use crate::error::{LaunchmanError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Suffix that marks a launch-item file.
pub const LAUNCH_ITEM_EXTENSION: &str = ".plist";

/// One launch-item file in one configured folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub directory_index: usize,
    pub directory_path: PathBuf,
    pub file_name: String,
}

impl CatalogEntry {
    pub fn file_path(&self) -> PathBuf {
        self.directory_path.join(&self.file_name)
    }
}

/// Snapshot of every configured folder's launch items, indexed like the folder list.
///
/// Files keep the order the filesystem returned them in.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    folders: Vec<Vec<CatalogEntry>>,
}

impl Catalog {
    /// Number of folders (including empty ones)
    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    /// Entries of one folder; empty for unknown indices.
    pub fn files(&self, directory_index: usize) -> &[CatalogEntry] {
        self.folders
            .get(directory_index)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All entries, folder by folder in index order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.folders.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.folders.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, directory_index: usize, file_name: &str) -> bool {
        self.file_path(directory_index, file_name).is_some()
    }

    /// Full path of a catalogued file.
    pub fn file_path(&self, directory_index: usize, file_name: &str) -> Option<PathBuf> {
        self.files(directory_index)
            .iter()
            .find(|entry| entry.file_name == file_name)
            .map(CatalogEntry::file_path)
    }
}

/// The fixed list of launch directories and the operations that enumerate them.
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    directories: Vec<PathBuf>,
}

impl DirectoryCatalog {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// Configured directories in display order.
    pub fn list_directories(&self) -> &[PathBuf] {
        &self.directories
    }

    pub fn directory(&self, directory_index: usize) -> Option<&Path> {
        self.directories.get(directory_index).map(PathBuf::as_path)
    }

    /// Enumerate every configured directory.
    ///
    /// Missing or unreadable directories contribute an empty folder; the failure is logged
    /// and never returned.
    pub fn load_all(&self) -> Catalog {
        let folders = self
            .directories
            .iter()
            .enumerate()
            .map(|(index, dir)| match read_launch_items(dir) {
                Ok(names) => names
                    .into_iter()
                    .map(|file_name| CatalogEntry {
                        directory_index: index,
                        directory_path: dir.clone(),
                        file_name,
                    })
                    .collect(),
                Err(LaunchmanError::DirectoryNotFound { .. }) => Vec::new(),
                Err(LaunchmanError::PermissionDenied { path }) => {
                    log::warn!("permission denied: cannot access {}", path.display());
                    Vec::new()
                }
                Err(err) => {
                    log::warn!("skipping {}: {}", dir.display(), err);
                    Vec::new()
                }
            })
            .collect();

        Catalog { folders }
    }

    /// Launch-item names of a single directory, for the file pane.
    ///
    /// Unlike [`load_all`](Self::load_all) this reports a missing or forbidden directory.
    pub fn list_files(&self, directory_index: usize) -> Result<Vec<String>> {
        let dir = self.directory(directory_index).ok_or_else(|| {
            LaunchmanError::invalid_argument(format!(
                "directory index {} out of range (0..{})",
                directory_index,
                self.directories.len()
            ))
        })?;
        read_launch_items(dir)
    }
}

fn read_launch_items(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| LaunchmanError::from_io_at(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                return Err(LaunchmanError::PermissionDenied {
                    path: dir.to_path_buf(),
                })
            }
            Err(e) => return Err(LaunchmanError::from_io_at(dir, e)),
        };

        match entry.file_name().into_string() {
            Ok(name) if name.ends_with(LAUNCH_ITEM_EXTENSION) => names.push(name),
            Ok(_) => {}
            Err(raw) => log::debug!("skipping non UTF-8 name {:?} in {}", raw, dir.display()),
        }
    }
    Ok(names)
}
