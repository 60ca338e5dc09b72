//! doxidx - parser and writer for doxygen's generated JS data tables
//!
//! Doxygen emits the interactive parts of its HTML output as
//! JavaScript data tables: `navtreedata.js` carries the hierarchical
//! table of contents plus the `NAVTREEINDEX` pagination table, and the
//! `search/` directory holds one `searchData` shard per token bucket.
//! This crate parses those files into queryable documents and writes
//! them back byte-identically.
//!
//! # Architecture
//!
//! The pipeline has distinct layers:
//!
//! 1. **Scanner** - low-level byte navigation with SIMD search
//! 2. **Tokenizer** - pull-based lexer for the table syntax
//! 3. **Reader** - structural events over the token stream
//! 4. **Documents** - arena navigation tree and search entries
//! 5. **Writer** - re-emission in the generator's layout
//!
//! # Example
//!
//! ```
//! use doxidx::NavTree;
//!
//! let tree = NavTree::parse(b"var NAVTREE =\n[\n  [ \"XCSF\", \"index.html\", null ]\n];\n");
//! let root = tree.roots().next().unwrap();
//! assert_eq!(tree.label(root), Some("XCSF"));
//! ```
//!
//! Parsing is lenient by default and never fails on generator output;
//! the `parse_strict` variants validate shape and report positioned
//! errors.

pub mod core;
pub mod error;
pub mod loader;
pub mod navtree;
pub mod reader;
pub mod search;
pub mod writer;

pub use error::{Error, Result};
pub use loader::{load_navtree, load_navtree_strict, load_search_index};
pub use navtree::{ChildRef, NavTree, NodeId, PageIndex};
pub use search::{Occurrence, SearchEntry, SearchIndex, SearchShard, ShardCache};
pub use writer::{write_navtree, write_search_shard};

/// Parse a `navtreedata.js` table (lenient)
pub fn parse_navtree(input: &[u8]) -> NavTree {
    NavTree::parse(input)
}

/// Parse a `search/*.js` shard (lenient)
pub fn parse_search_shard(input: &[u8]) -> SearchShard {
    SearchShard::parse(input)
}
