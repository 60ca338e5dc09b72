//! Table Event Types
//!
//! Event types for pull-parser style processing of the JS data tables.

use std::borrow::Cow;

/// Table parsing event
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent<'a> {
    /// Start of a `var NAME =` declaration
    VarStart(Cow<'a, str>),
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// String literal, escape-decoded
    Str(Cow<'a, str>),
    /// Unsigned integer literal
    Num(u64),
    /// `null`
    Null,
    /// Terminating `;` of a var declaration
    VarEnd,
    /// Block or line comment (raw body, no delimiters)
    Comment(Cow<'a, str>),
    /// End of file
    EndOfFile,
}

impl<'a> TableEvent<'a> {
    /// Get string content if this is a Str event
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TableEvent::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Check if this event opens a nested array
    pub fn is_array_start(&self) -> bool {
        matches!(self, TableEvent::ArrayStart)
    }

    /// Check if this event closes an array
    pub fn is_array_end(&self) -> bool {
        matches!(self, TableEvent::ArrayEnd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str() {
        let ev = TableEvent::Str(Cow::Borrowed("index.html"));
        assert_eq!(ev.as_str(), Some("index.html"));
        assert_eq!(TableEvent::Null.as_str(), None);
    }
}
