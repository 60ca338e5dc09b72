//! Search shard parsing
//!
//! One `search/all_N.js` (or `classes_N.js`, `functions_N.js`, ...)
//! file declares a single `var searchData = [...]` table. Entries are
//! sorted by token id within a shard, and every token id is unique
//! across the whole index.

use super::entry::{Occurrence, SearchEntry};
use crate::error::{Error, Result};
use crate::reader::events::TableEvent;
use crate::reader::slice::SliceReader;
use std::collections::HashMap;

/// A parsed search data shard
pub struct SearchShard {
    entries: Vec<SearchEntry>,
    /// Token id to index into `entries`
    by_token: HashMap<String, usize>,
}

impl SearchShard {
    /// Parse a shard (lenient mode)
    ///
    /// Entries with an unrecognized shape are skipped with a warning.
    pub fn parse(input: &[u8]) -> Self {
        Self::build(SliceReader::new(input), false).unwrap_or_else(|_| SearchShard {
            entries: Vec::new(),
            by_token: HashMap::new(),
        })
    }

    /// Parse a shard in strict mode
    pub fn parse_strict(input: &[u8]) -> Result<Self> {
        Self::build(SliceReader::new_strict(input), true)
    }

    fn build(mut reader: SliceReader<'_>, strict: bool) -> Result<Self> {
        let mut shard = SearchShard {
            entries: Vec::new(),
            by_token: HashMap::new(),
        };

        loop {
            match reader.next_event() {
                Some(TableEvent::Comment(_)) => continue,
                Some(TableEvent::VarStart(name)) => {
                    if name != "searchData" {
                        if strict {
                            return Err(Error::Malformed(format!(
                                "Expected searchData declaration, found '{}'",
                                name
                            )));
                        }
                        log::warn!("unexpected variable '{}' in search shard", name);
                    }
                    shard.read_entries(&mut reader, strict)?;
                }
                Some(TableEvent::EndOfFile) | None => break,
                Some(other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Unexpected {:?} at top level of search shard",
                            other
                        )));
                    }
                }
            }

            if let Some(err) = reader.error() {
                return Err(err.clone().into());
            }
        }

        if let Some(err) = reader.error() {
            return Err(err.clone().into());
        }
        Ok(shard)
    }

    fn read_entries(&mut self, reader: &mut SliceReader<'_>, strict: bool) -> Result<()> {
        match reader.next_event() {
            Some(TableEvent::ArrayStart) => {}
            _ => {
                if strict {
                    return Err(Error::Malformed("searchData value must be an array".into()));
                }
                return Ok(());
            }
        }

        loop {
            match reader.next_event() {
                Some(TableEvent::ArrayStart) => {
                    self.read_entry(reader, strict)?;
                }
                Some(TableEvent::ArrayEnd) => break,
                Some(TableEvent::EndOfFile) | None => break,
                Some(other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Expected a search entry, found {:?}",
                            other
                        )));
                    }
                }
            }
        }
        reader.skip_var_end();
        Ok(())
    }

    /// Read one `['token',['label',[occ],...]]` entry; the opening
    /// bracket is already consumed
    fn read_entry(&mut self, reader: &mut SliceReader<'_>, strict: bool) -> Result<()> {
        let token = match reader.next_event() {
            Some(TableEvent::Str(s)) => s.into_owned(),
            _ => {
                if strict {
                    return Err(Error::Malformed(
                        "Search entry must start with a token id".into(),
                    ));
                }
                log::warn!("skipping search entry without a token id");
                skip_to_entry_end(reader, 1);
                return Ok(());
            }
        };

        match reader.next_event() {
            Some(TableEvent::ArrayStart) => {}
            _ => {
                if strict {
                    return Err(Error::Malformed(format!(
                        "Token '{}' has no display payload",
                        token
                    )));
                }
                log::warn!("skipping search entry '{}' without a payload", token);
                skip_to_entry_end(reader, 1);
                return Ok(());
            }
        }

        let label = match reader.next_event() {
            Some(TableEvent::Str(s)) => s.into_owned(),
            _ => {
                if strict {
                    return Err(Error::Malformed(format!("Token '{}' has no label", token)));
                }
                log::warn!("skipping search entry '{}' without a label", token);
                skip_to_entry_end(reader, 2);
                return Ok(());
            }
        };

        let mut entry = SearchEntry::new(token, label);

        loop {
            match reader.next_event() {
                Some(TableEvent::ArrayStart) => {
                    if let Some(occ) = read_occurrence(reader, &entry.token, strict)? {
                        entry.occurrences.push(occ);
                    }
                }
                Some(TableEvent::ArrayEnd) => break,
                Some(TableEvent::EndOfFile) | None => break,
                Some(other) => {
                    if strict {
                        return Err(Error::Malformed(format!(
                            "Unexpected {:?} in payload of '{}'",
                            other, entry.token
                        )));
                    }
                }
            }
        }

        // Entry's closing bracket
        match reader.next_event() {
            Some(TableEvent::ArrayEnd) => {}
            _ if strict => {
                return Err(Error::Malformed(format!(
                    "Entry '{}' not terminated",
                    entry.token
                )));
            }
            _ => {}
        }

        if strict && entry.occurrences.is_empty() {
            return Err(Error::Malformed(format!(
                "Token '{}' has no occurrences",
                entry.token
            )));
        }

        if self.by_token.contains_key(&entry.token) {
            if strict {
                return Err(Error::DuplicateToken(entry.token));
            }
            log::warn!("duplicate token '{}', keeping first entry", entry.token);
            return Ok(());
        }

        self.by_token.insert(entry.token.clone(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    /// Look up an entry by token id
    pub fn get(&self, token: &str) -> Option<&SearchEntry> {
        self.by_token.get(token).map(|&i| &self.entries[i])
    }

    /// Entries in shard order
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

/// Read one `['../page.html#anchor',flag,'context']` occurrence; the
/// opening bracket is already consumed. Returns None for a malformed
/// occurrence skipped in lenient mode.
fn read_occurrence(
    reader: &mut SliceReader<'_>,
    token: &str,
    strict: bool,
) -> Result<Option<Occurrence>> {
    let mut target = None;
    let mut flag = None;
    let mut context = None;

    loop {
        match reader.next_event() {
            Some(TableEvent::Str(s)) => {
                if target.is_none() {
                    target = Some(s.into_owned());
                } else {
                    context = Some(s.into_owned());
                }
            }
            Some(TableEvent::Num(n)) => {
                if strict && n > 1 {
                    return Err(Error::Malformed(format!(
                        "Occurrence flag for '{}' must be 0 or 1, found {}",
                        token, n
                    )));
                }
                flag = Some(n != 0);
            }
            Some(TableEvent::ArrayEnd) => break,
            Some(TableEvent::EndOfFile) | None => break,
            Some(other) => {
                if strict {
                    return Err(Error::Malformed(format!(
                        "Unexpected {:?} in occurrence of '{}'",
                        other, token
                    )));
                }
            }
        }
    }

    match (target, flag, context) {
        (Some(target), Some(same_frame), Some(context)) => {
            Ok(Some(Occurrence { target, same_frame, context }))
        }
        _ => {
            if strict {
                Err(Error::Malformed(format!(
                    "Occurrence of '{}' must be a [target, flag, context] triple",
                    token
                )))
            } else {
                log::warn!("skipping malformed occurrence of '{}'", token);
                Ok(None)
            }
        }
    }
}

/// Consume events until the current entry's brackets balance out
fn skip_to_entry_end(reader: &mut SliceReader<'_>, mut depth: u32) {
    while depth > 0 {
        match reader.next_event() {
            Some(TableEvent::ArrayStart) => depth += 1,
            Some(TableEvent::ArrayEnd) => depth -= 1,
            Some(TableEvent::EndOfFile) | None => break,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &[u8] = br#"var searchData=
[
  ['loss_5fbinary_5flog_751',['loss_binary_log',['../loss_8c.html#a19f29589467ebd6a92bb12ce6b5851a0',1,'loss_binary_log(const struct XCSF *xcsf, const double *pred, const double *y):&#160;loss.c'],['../loss_8h.html#a19f29589467ebd6a92bb12ce6b5851a0',1,'loss_binary_log(const struct XCSF *xcsf, const double *pred, const double *y):&#160;loss.c']]],
  ['loss_5fmse_754',['loss_mse',['../loss_8c.html#aaeed4518371c4e75de20532e3a6aa601',1,'loss_mse(const struct XCSF *xcsf, const double *pred, const double *y):&#160;loss.c'],['../loss_8h.html#aaeed4518371c4e75de20532e3a6aa601',1,'loss_mse(const struct XCSF *xcsf, const double *pred, const double *y):&#160;loss.c'],['../loss_8h.html#a1a23cb399abaa46c19c1c28243b13f39',1,'LOSS_MSE():&#160;loss.h']]],
  ['list_755',['List',['../structXCSF.html#a2c7a54eccdbe05d7a3a69ef541b64b26',1,'XCSF']]]
];
"#;

    #[test]
    fn test_parse_shard() {
        let shard = SearchShard::parse(SAMPLE);
        assert_eq!(shard.len(), 3);
        let entry = shard.get("loss_5fmse_754").unwrap();
        assert_eq!(entry.label, "loss_mse");
        assert_eq!(entry.occurrences.len(), 3);
        assert_eq!(
            entry.occurrences[0].target,
            "../loss_8c.html#aaeed4518371c4e75de20532e3a6aa601"
        );
        assert!(entry.occurrences[0].same_frame);
        assert_eq!(
            entry.occurrences[2].target,
            "../loss_8h.html#a1a23cb399abaa46c19c1c28243b13f39"
        );
        assert_eq!(
            entry.occurrences[2].display_context(),
            "LOSS_MSE():\u{a0}loss.h"
        );
    }

    #[test]
    fn test_entries_keep_shard_order() {
        let shard = SearchShard::parse(SAMPLE);
        let tokens: Vec<_> = shard.entries().iter().map(|e| e.token.as_str()).collect();
        assert_eq!(
            tokens,
            vec!["loss_5fbinary_5flog_751", "loss_5fmse_754", "list_755"]
        );
    }

    #[test]
    fn test_get_missing_token() {
        let shard = SearchShard::parse(SAMPLE);
        assert!(shard.get("loss_5fmse_999").is_none());
    }

    #[test]
    fn test_strict_accepts_sample() {
        assert!(SearchShard::parse_strict(SAMPLE).is_ok());
    }

    #[test]
    fn test_strict_rejects_duplicate_token() {
        let input = br#"var searchData=
[
  ['a_0',['a',['../a.html#x',1,'a()']]],
  ['a_0',['a',['../b.html#y',1,'a()']]]
];
"#;
        match SearchShard::parse_strict(input) {
            Err(Error::DuplicateToken(token)) => assert_eq!(token, "a_0"),
            other => panic!("expected DuplicateToken, got {:?}", other.map(|_| ())),
        }
        // Lenient keeps the first entry
        let shard = SearchShard::parse(input);
        assert_eq!(shard.len(), 1);
        assert_eq!(shard.get("a_0").unwrap().occurrences[0].page(), "../a.html");
    }

    #[test]
    fn test_strict_rejects_entry_without_occurrences() {
        let input = b"var searchData=\n[\n  ['a_0',['a']]\n];";
        assert!(SearchShard::parse_strict(input).is_err());
    }

    #[test]
    fn test_lenient_skips_malformed_occurrence() {
        let input = br#"var searchData=
[
  ['a_0',['a',['../a.html#x',1,'a()'],['../b.html#y']]]
];
"#;
        let shard = SearchShard::parse(input);
        let entry = shard.get("a_0").unwrap();
        assert_eq!(entry.occurrences.len(), 1);
    }

    #[test]
    fn test_flag_zero_means_new_frame() {
        let input = b"var searchData=\n[\n  ['a_0',['a',['../a.html',0,'a']]]\n];";
        let shard = SearchShard::parse(input);
        assert!(!shard.get("a_0").unwrap().occurrences[0].same_frame);
    }

    #[test]
    fn test_empty_input() {
        let shard = SearchShard::parse(b"");
        assert!(shard.is_empty());
    }

    #[test]
    fn test_missing_trailing_semicolon() {
        let input = b"var searchData=\n[\n  ['a_0',['a',['../a.html#x',1,'a()']]]\n]";
        let shard = SearchShard::parse(input);
        assert_eq!(shard.len(), 1);
        assert!(shard.get("a_0").is_some());
    }
}
