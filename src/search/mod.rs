//! Search index model
//!
//! Parses `search/*.js` shards into entries, merges them into a
//! queryable index, and caches parsed shards behind an LRU.

pub mod cache;
pub mod entry;
pub mod index;
pub mod shard;

pub use cache::ShardCache;
pub use entry::{Occurrence, SearchEntry};
pub use index::SearchIndex;
pub use shard::SearchShard;
