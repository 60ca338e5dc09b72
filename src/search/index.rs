//! Merged search index
//!
//! Combines the entries of every parsed shard into one queryable
//! index. Matching mirrors the generated viewer's search box: queries
//! compare case-insensitively against display labels.

use super::entry::SearchEntry;
use super::shard::SearchShard;
use std::collections::HashMap;

/// All search entries across a set of shards
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
    by_token: HashMap<String, usize>,
}

impl SearchIndex {
    /// Merge parsed shards into one index
    ///
    /// Token ids are unique across a generated index; if shards
    /// disagree the first entry wins and the duplicate is logged.
    pub fn from_shards<I>(shards: I) -> Self
    where
        I: IntoIterator<Item = SearchShard>,
    {
        let mut index = SearchIndex {
            entries: Vec::new(),
            by_token: HashMap::new(),
        };
        for shard in shards {
            for entry in shard.entries() {
                if index.by_token.contains_key(&entry.token) {
                    log::warn!("duplicate token '{}' across shards", entry.token);
                    continue;
                }
                index.by_token.insert(entry.token.clone(), index.entries.len());
                index.entries.push(entry.clone());
            }
        }
        index
    }

    /// Look up an entry by its token id
    pub fn get(&self, token: &str) -> Option<&SearchEntry> {
        self.by_token.get(token).map(|&i| &self.entries[i])
    }

    /// Entries whose label starts with `query`, case-insensitive
    pub fn find_prefix(&self, query: &str) -> Vec<&SearchEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.label.to_lowercase().starts_with(&query))
            .collect()
    }

    /// Entries whose label contains `query`, case-insensitive
    pub fn find_substring(&self, query: &str) -> Vec<&SearchEntry> {
        let query = query.to_lowercase();
        self.entries
            .iter()
            .filter(|e| e.label.to_lowercase().contains(&query))
            .collect()
    }

    /// Entries in shard load order
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_index() -> SearchIndex {
        let all_b = SearchShard::parse(
            br#"var searchData=
[
  ['loss_5fmse_754',['loss_mse',['../loss_8c.html#aaee',1,'loss_mse()']]],
  ['loss_5fhuber_752',['loss_huber',['../loss_8c.html#a77e',1,'loss_huber()']]]
];
"#,
        );
        let all_c = SearchShard::parse(
            br#"var searchData=
[
  ['mutate_801',['mutate',['../structXCSF.html#a111',1,'XCSF']]],
  ['loss_5ffunc_750',['LOSS_FUNC',['../loss_8h.html#a222',1,'loss.h']]]
];
"#,
        );
        SearchIndex::from_shards([all_b, all_c])
    }

    #[test]
    fn test_get_by_token() {
        let index = sample_index();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get("mutate_801").unwrap().label, "mutate");
        assert!(index.get("unknown_0").is_none());
    }

    #[test]
    fn test_find_prefix_case_insensitive() {
        let index = sample_index();
        let hits = index.find_prefix("LOSS_");
        let labels: Vec<_> = hits.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["loss_mse", "loss_huber", "LOSS_FUNC"]);
    }

    #[test]
    fn test_find_substring() {
        let index = sample_index();
        let hits = index.find_substring("mse");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].token, "loss_5fmse_754");
        assert!(index.find_substring("xyzzy").is_empty());
    }

    #[test]
    fn test_duplicate_across_shards_keeps_first() {
        let a = SearchShard::parse(b"var searchData=\n[['t_0',['a',['../a.html',1,'a']]]];");
        let b = SearchShard::parse(b"var searchData=\n[['t_0',['b',['../b.html',1,'b']]]];");
        let index = SearchIndex::from_shards([a, b]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("t_0").unwrap().label, "a");
    }
}
