//! NAVTREEINDEX pagination table
//!
//! Doxygen splits the per-page navigation state across numbered
//! `navtreeindexN.js` shards. The `NAVTREEINDEX` array in
//! `navtreedata.js` lists, for each shard N, the target of the first
//! page that shard covers. Entries are sorted, so locating a page's
//! shard is a binary search over boundaries.

use crate::error::{Error, Result};
use crate::reader::events::TableEvent;
use crate::reader::slice::SliceReader;

/// The NAVTREEINDEX shard boundary table
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageIndex {
    /// First-page target of each shard, in shard order
    boundaries: Vec<String>,
}

impl PageIndex {
    pub fn new(boundaries: Vec<String>) -> Self {
        PageIndex { boundaries }
    }

    /// Consume the events of the NAVTREEINDEX array, which the reader
    /// is positioned at the start of
    pub(crate) fn from_events(reader: &mut SliceReader<'_>, strict: bool) -> Result<Self> {
        match reader.next_event() {
            Some(TableEvent::ArrayStart) => {}
            _ => {
                if strict {
                    return Err(Error::Malformed(
                        "NAVTREEINDEX value must be an array".into(),
                    ));
                }
                return Ok(Self::default());
            }
        }

        let mut boundaries = Vec::new();
        loop {
            match reader.next_event() {
                Some(TableEvent::Str(s)) => boundaries.push(s.into_owned()),
                Some(TableEvent::ArrayEnd) => break,
                Some(TableEvent::EndOfFile) | None => break,
                Some(other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "NAVTREEINDEX entries must be strings, found {:?}",
                            other
                        )));
                    }
                }
            }
        }
        reader.skip_var_end();

        if strict {
            for pair in boundaries.windows(2) {
                if pair[0] >= pair[1] {
                    return Err(Error::Malformed(format!(
                        "NAVTREEINDEX boundaries out of order: '{}' before '{}'",
                        pair[0], pair[1]
                    )));
                }
            }
        }

        Ok(PageIndex { boundaries })
    }

    /// Number of shards the table describes
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }

    /// Boundary target for shard `n`
    pub fn get(&self, n: usize) -> Option<&str> {
        self.boundaries.get(n).map(String::as_str)
    }

    /// Iterate over shard boundaries in shard order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.boundaries.iter().map(String::as_str)
    }

    /// Index of the `navtreeindexN.js` shard covering `page`
    ///
    /// Pages sorting before the first boundary still map to shard 0,
    /// matching how the generated viewer resolves them.
    pub fn shard_for(&self, page: &str) -> Option<usize> {
        if self.boundaries.is_empty() {
            return None;
        }
        let idx = self
            .boundaries
            .partition_point(|boundary| boundary.as_str() <= page);
        Some(idx.saturating_sub(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> PageIndex {
        PageIndex::new(vec![
            "act__integer_8c.html".to_string(),
            "globals_w.html".to_string(),
            "structClist.html".to_string(),
        ])
    }

    #[test]
    fn test_shard_for_boundary_page() {
        let index = sample();
        assert_eq!(index.shard_for("act__integer_8c.html"), Some(0));
        assert_eq!(index.shard_for("globals_w.html"), Some(1));
        assert_eq!(index.shard_for("structClist.html"), Some(2));
    }

    #[test]
    fn test_shard_for_interior_page() {
        let index = sample();
        assert_eq!(index.shard_for("cond__neural_8c.html"), Some(0));
        assert_eq!(index.shard_for("loss_8c.html"), Some(1));
        assert_eq!(index.shard_for("structXCSF.html"), Some(2));
    }

    #[test]
    fn test_shard_for_page_before_first_boundary() {
        let index = sample();
        assert_eq!(index.shard_for("aaaa.html"), Some(0));
    }

    #[test]
    fn test_empty_index() {
        let index = PageIndex::default();
        assert!(index.is_empty());
        assert_eq!(index.shard_for("anything.html"), None);
    }

    #[test]
    fn test_strict_rejects_unsorted() {
        let input = b"[\n\"b.html\",\n\"a.html\"\n];";
        let mut reader = SliceReader::new_strict(input);
        assert!(PageIndex::from_events(&mut reader, true).is_err());
    }

    #[test]
    fn test_lenient_skips_non_string_entry() {
        let input = b"[\n\"a.html\",\nnull,\n\"b.html\"\n];";
        let mut reader = SliceReader::new(input);
        let index = PageIndex::from_events(&mut reader, false).unwrap();
        assert_eq!(index.len(), 2);
    }
}
