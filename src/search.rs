//! Filename search across the whole catalog.
//!
//! [`SearchIndex`] flattens a [`Catalog`] into lowercase names once, so each query is a plain
//! substring scan. The index is rebuilt together with the catalog and never on its own.

use crate::catalog::Catalog;
use std::fmt;
use std::path::PathBuf;

/// A file that matched a search, with enough context to jump back to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub file_name: String,
    pub folder_path: PathBuf,
    pub folder_index: usize,
}

impl SearchResult {
    pub fn file_path(&self) -> PathBuf {
        self.folder_path.join(&self.file_name)
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.file_name, self.folder_path.display())
    }
}

#[derive(Debug, Clone)]
struct IndexedName {
    lowered: String,
    result: SearchResult,
}

/// Read-only view over a catalog snapshot, keyed by lowercase filename.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    names: Vec<IndexedName>,
}

impl SearchIndex {
    /// Flatten `catalog` in folder index order, keeping the catalog's file order.
    pub fn build(catalog: &Catalog) -> Self {
        let names = catalog
            .entries()
            .map(|entry| IndexedName {
                lowered: entry.file_name.to_lowercase(),
                result: SearchResult {
                    file_name: entry.file_name.clone(),
                    folder_path: entry.directory_path.clone(),
                    folder_index: entry.directory_index,
                },
            })
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Case-insensitive substring match on file names.
    ///
    /// A blank term matches nothing. Results are not limited or re-sorted.
    pub fn search(&self, term: &str) -> Vec<SearchResult> {
        if term.trim().is_empty() {
            return Vec::new();
        }

        let needle = term.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.lowered.contains(&needle))
            .map(|name| name.result.clone())
            .collect()
    }
}

/// One-shot search over a catalog without keeping the index around.
pub fn search(term: &str, catalog: &Catalog) -> Vec<SearchResult> {
    SearchIndex::build(catalog).search(term)
}
