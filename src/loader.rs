//! Filesystem loading
//!
//! Convenience entry points that read generated files off disk. A
//! search directory holds dozens of independent shard files, so those
//! are parsed in parallel before merging.

use crate::error::Result;
use crate::navtree::NavTree;
use crate::search::{SearchIndex, SearchShard};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Read and parse a `navtreedata.js` file (lenient)
pub fn load_navtree(path: &Path) -> Result<NavTree> {
    log::debug!("loading navigation tree {}", path.display());
    let bytes = std::fs::read(path)?;
    Ok(NavTree::parse(&bytes))
}

/// Read and parse a `navtreedata.js` file in strict mode
pub fn load_navtree_strict(path: &Path) -> Result<NavTree> {
    let bytes = std::fs::read(path)?;
    NavTree::parse_strict(&bytes)
}

/// Read every `.js` shard in a search directory and merge them
///
/// Shards are parsed in parallel and merged in filename order, so the
/// resulting index is deterministic for a given directory.
pub fn load_search_index(dir: &Path) -> Result<SearchIndex> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "js"))
        .collect();
    paths.sort();

    log::debug!("loading {} search shards from {}", paths.len(), dir.display());

    let shards: Vec<SearchShard> = paths
        .par_iter()
        .map(|path| -> Result<SearchShard> {
            let bytes = std::fs::read(path)?;
            Ok(SearchShard::parse(&bytes))
        })
        .collect::<Result<_>>()?;

    Ok(SearchIndex::from_shards(shards))
}
