//! String Interning Pool
//!
//! Deduplicated string storage for navtree labels and target references,
//! which repeat heavily across a table ("index.html" alone appears in
//! dozens of nodes).
//!
//! Uses hash-based lookup to avoid storing duplicate string data.
//! All stored strings are owned copies: table strings go through escape
//! decoding on the way in, so there is no zero-copy path to preserve.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// String interning pool
///
/// Memory layout:
/// - `offsets`: (offset, len) into `data` for each interned string ID
/// - `data`: one contiguous buffer for all string bytes
/// - `hash_index`: hash -> list of IDs (handles rare collisions)
#[derive(Debug, Default)]
pub struct StringPool {
    /// (offset, len) pairs indexed by string ID
    offsets: Vec<(u32, u32)>,
    /// Buffer holding all interned string bytes
    data: String,
    /// Hash of string content -> list of IDs with that hash
    hash_index: HashMap<u64, Vec<u32>>,
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        let mut pool = StringPool {
            offsets: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        // Entry 0 is reserved for the empty string
        pool.offsets.push((0, 0));
        pool
    }

    /// Compute hash of string content
    #[inline]
    fn compute_hash(s: &str) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a string, returning its ID
    ///
    /// Identical strings get identical IDs.
    pub fn intern(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);

        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == Some(s) {
                    return id;
                }
            }
        }

        let offset = self.data.len() as u32;
        self.data.push_str(s);

        let id = self.offsets.len() as u32;
        self.offsets.push((offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);

        id
    }

    /// Get a string by ID
    pub fn get(&self, id: u32) -> Option<&str> {
        if id == 0 {
            return Some("");
        }
        let &(offset, len) = self.offsets.get(id as usize)?;
        self.data.get(offset as usize..(offset + len) as usize)
    }

    /// Get the number of unique strings stored
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Check if the pool is empty
    pub fn is_empty(&self) -> bool {
        self.offsets.len() <= 1 // Entry 0 is reserved
    }

    /// Get total bytes used for string storage
    pub fn bytes_used(&self) -> usize {
        self.data.len()
    }
}
