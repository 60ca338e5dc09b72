//! Search index entry types
//!
//! A `search/all_N.js` shard holds one entry per indexed token:
//!
//! ```text
//! ['loss_5fmse_754',['loss_mse',['../loss_8c.html#aaee...',1,'loss_mse(...)'],...]]
//! ```
//!
//! The first element is the token id (identifier-mangled token plus a
//! numeric suffix unique across the whole index), the second is the
//! display payload: a label followed by one occurrence triple per
//! place the token appears.

use crate::core::escape::decode_char_refs;
use std::borrow::Cow;

/// One place a search token occurs in the documentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    /// Relative URL of the page and anchor, e.g. `../loss_8c.html#aaee...`
    pub target: String,
    /// Whether the result opens in the same frame as the search box
    pub same_frame: bool,
    /// Qualified context line shown under the result,
    /// e.g. `loss_mse(const struct XCSF *xcsf, ...)`
    pub context: String,
}

impl Occurrence {
    pub fn new(target: impl Into<String>, same_frame: bool, context: impl Into<String>) -> Self {
        Occurrence {
            target: target.into(),
            same_frame,
            context: context.into(),
        }
    }

    /// The page part of the target, without the `#anchor` fragment
    pub fn page(&self) -> &str {
        match self.target.find('#') {
            Some(pos) => &self.target[..pos],
            None => &self.target,
        }
    }

    /// The `#anchor` fragment of the target, if any
    pub fn anchor(&self) -> Option<&str> {
        self.target.find('#').map(|pos| &self.target[pos + 1..])
    }

    /// Context with HTML numeric character references decoded for display
    pub fn display_context(&self) -> Cow<'_, str> {
        decode_char_refs(&self.context)
    }
}

/// One token's entry in a search shard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEntry {
    /// Unique token id, e.g. `loss_5fmse_754`
    pub token: String,
    /// Display label, e.g. `loss_mse`
    pub label: String,
    /// Places this token appears, in shard order
    pub occurrences: Vec<Occurrence>,
}

impl SearchEntry {
    pub fn new(token: impl Into<String>, label: impl Into<String>) -> Self {
        SearchEntry {
            token: token.into(),
            label: label.into(),
            occurrences: Vec::new(),
        }
    }

    /// Label with HTML numeric character references decoded for display
    pub fn display_label(&self) -> Cow<'_, str> {
        decode_char_refs(&self.label)
    }
}
