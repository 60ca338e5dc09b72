//! Zero-Copy Slice Reader
//!
//! Pulls table events from a byte slice. String literals stay borrowed
//! unless escape decoding forces a copy.

use super::events::TableEvent;
use crate::core::escape;
use crate::core::tokenizer::{ParseError, Token, TokenKind, Tokenizer};

/// Zero-copy table reader from a byte slice
pub struct SliceReader<'a> {
    tokenizer: Tokenizer<'a>,
    strict: bool,
    reader_error: Option<ParseError>,
    /// One-event pushback buffer for peeking
    peeked: Option<TableEvent<'a>>,
}

impl<'a> SliceReader<'a> {
    /// Create a new slice reader (lenient mode)
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new(input),
            strict: false,
            reader_error: None,
            peeked: None,
        }
    }

    /// Create a new slice reader in strict mode
    pub fn new_strict(input: &'a [u8]) -> Self {
        SliceReader {
            tokenizer: Tokenizer::new_strict(input),
            strict: true,
            reader_error: None,
            peeked: None,
        }
    }

    /// Get parse error (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        self.reader_error.as_ref().or_else(|| self.tokenizer.error())
    }

    fn set_error(&mut self, message: impl Into<String>) {
        if self.strict && self.reader_error.is_none() {
            self.reader_error = Some(ParseError::new(message, self.tokenizer.position()));
        }
    }

    /// Get the next table event
    pub fn next_event(&mut self) -> Option<TableEvent<'a>> {
        if let Some(ev) = self.peeked.take() {
            return Some(ev);
        }
        self.pull_event()
    }

    /// Look at the next event without consuming it
    pub fn peek_event(&mut self) -> Option<&TableEvent<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.pull_event();
        }
        self.peeked.as_ref()
    }

    /// Consume a declaration's trailing `;` if it is the next event;
    /// a missing semicolon leaves the stream untouched
    pub fn skip_var_end(&mut self) {
        if matches!(self.peek_event(), Some(TableEvent::VarEnd)) {
            self.next_event();
        }
    }

    fn pull_event(&mut self) -> Option<TableEvent<'a>> {
        loop {
            let token = self.tokenizer.next_token()?;

            match token.kind {
                TokenKind::Eof => return Some(TableEvent::EndOfFile),

                TokenKind::OpenBracket => return Some(TableEvent::ArrayStart),
                TokenKind::CloseBracket => return Some(TableEvent::ArrayEnd),
                TokenKind::Semi => return Some(TableEvent::VarEnd),

                // Commas are separators, never surfaced
                TokenKind::Comma => {}

                // '=' is consumed by var_start_event; one at value
                // position is a syntax error
                TokenKind::Equals => {
                    self.set_error("Unexpected '='");
                    if self.strict {
                        return None;
                    }
                    // Lenient mode: ignore and continue
                }

                TokenKind::Str => return self.string_event(&token),

                TokenKind::Number => {
                    let text = token.text?;
                    // Digits only by construction
                    let value = std::str::from_utf8(text).ok()?.parse::<u64>().ok()?;
                    return Some(TableEvent::Num(value));
                }

                TokenKind::Ident => match token.text? {
                    b"var" => return self.var_start_event(),
                    b"null" => return Some(TableEvent::Null),
                    other => {
                        self.set_error(format!(
                            "Unexpected identifier '{}'",
                            String::from_utf8_lossy(other)
                        ));
                        if self.strict {
                            return None;
                        }
                        // Lenient mode: ignore and continue
                    }
                },

                TokenKind::Comment => {
                    if let Some(text) = token.text {
                        return Some(TableEvent::Comment(String::from_utf8_lossy(text)));
                    }
                }
            }
        }
    }

    /// Handle `var NAME =`: the `var` keyword was just consumed
    fn var_start_event(&mut self) -> Option<TableEvent<'a>> {
        let name = match self.tokenizer.next_token() {
            Some(Token {
                kind: TokenKind::Ident,
                text: Some(name),
                ..
            }) => name,
            _ => {
                self.set_error("Expected variable name after 'var'");
                return None;
            }
        };

        match self.tokenizer.next_token() {
            Some(Token {
                kind: TokenKind::Equals,
                ..
            }) => {}
            _ => {
                self.set_error("Expected '=' after variable name");
                return None;
            }
        }

        Some(TableEvent::VarStart(String::from_utf8_lossy(name)))
    }

    /// Decode a string token into a Str event
    fn string_event(&mut self, token: &Token<'a>) -> Option<TableEvent<'a>> {
        let raw = token.text?;
        let decoded = if self.strict {
            match escape::decode_js_string_strict(raw) {
                Ok(s) => s,
                Err(msg) => {
                    self.set_error(msg);
                    return None;
                }
            }
        } else {
            escape::decode_js_string(raw)
        };
        Some(TableEvent::Str(decoded))
    }
}

/// Iterator adapter for the reader
impl<'a> Iterator for SliceReader<'a> {
    type Item = TableEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event()? {
            TableEvent::EndOfFile => None,
            ev => Some(ev),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    fn events(input: &[u8]) -> Vec<TableEvent<'_>> {
        SliceReader::new(input).collect()
    }

    #[test]
    fn test_stray_equals_at_value_position() {
        let input = b"var X =\n[ = \"a.html\" ];";
        // Lenient mode drops the stray '=' and keeps going
        let evs = events(input);
        assert!(evs.contains(&TableEvent::Str(Cow::Borrowed("a.html"))));
        // Strict mode reports it
        let mut reader = SliceReader::new_strict(input);
        while reader.next_event().is_some() {}
        assert!(reader.error().is_some());
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut reader = SliceReader::new(b"var X =\n'a';");
        assert!(matches!(reader.peek_event(), Some(TableEvent::VarStart(_))));
        assert!(matches!(reader.next_event(), Some(TableEvent::VarStart(_))));
        reader.skip_var_end();
        assert_eq!(reader.next_event(), Some(TableEvent::Str(Cow::Borrowed("a"))));
        reader.skip_var_end();
        assert_eq!(reader.next_event(), Some(TableEvent::EndOfFile));
    }

    #[test]
    fn test_var_array() {
        let evs = events(b"var NAVTREEINDEX =\n[\n\"a.html\",\n\"b.html\"\n];");
        assert_eq!(
            evs,
            vec![
                TableEvent::VarStart(Cow::Borrowed("NAVTREEINDEX")),
                TableEvent::ArrayStart,
                TableEvent::Str(Cow::Borrowed("a.html")),
                TableEvent::Str(Cow::Borrowed("b.html")),
                TableEvent::ArrayEnd,
                TableEvent::VarEnd,
            ]
        );
    }

    #[test]
    fn test_nested_arrays_and_null() {
        let evs = events(b"var NAVTREE =\n[\n  [ \"XCSF\", \"index.html\", null ]\n];");
        assert_eq!(
            evs,
            vec![
                TableEvent::VarStart(Cow::Borrowed("NAVTREE")),
                TableEvent::ArrayStart,
                TableEvent::ArrayStart,
                TableEvent::Str(Cow::Borrowed("XCSF")),
                TableEvent::Str(Cow::Borrowed("index.html")),
                TableEvent::Null,
                TableEvent::ArrayEnd,
                TableEvent::ArrayEnd,
                TableEvent::VarEnd,
            ]
        );
    }

    #[test]
    fn test_search_entry_shape() {
        let evs = events(b"var searchData=\n[\n  ['a_1',['a',['../x.html#y',1,'X::a()']]]\n];");
        assert_eq!(evs[0], TableEvent::VarStart(Cow::Borrowed("searchData")));
        assert!(evs.contains(&TableEvent::Num(1)));
        assert!(evs.contains(&TableEvent::Str(Cow::Borrowed("X::a()"))));
    }

    #[test]
    fn test_scalar_var() {
        let evs = events(b"var SYNCONMSG = 'click to disable';");
        assert_eq!(
            evs,
            vec![
                TableEvent::VarStart(Cow::Borrowed("SYNCONMSG")),
                TableEvent::Str(Cow::Borrowed("click to disable")),
                TableEvent::VarEnd,
            ]
        );
    }

    #[test]
    fn test_comment_surfaced() {
        let mut reader = SliceReader::new(b"/* banner */ var X = [];");
        assert_eq!(
            reader.next_event(),
            Some(TableEvent::Comment(Cow::Borrowed(" banner ")))
        );
    }

    #[test]
    fn test_strict_error_on_bad_var() {
        let mut reader = SliceReader::new_strict(b"var = [];");
        assert!(reader.next_event().is_none());
        assert!(reader.error().is_some());
    }
}
