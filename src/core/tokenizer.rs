//! Table Tokenizer - pull tokenizer for the JS-literal table subset
//!
//! Doxygen's generated data files use a small, fixed slice of JavaScript:
//! a leading block comment (the license banner), `var NAME =` declarations,
//! nested array literals, single- and double-quoted strings, unsigned
//! integers, `null`, commas, and terminating semicolons. This tokenizer
//! extracts exactly those tokens:
//! - Identifiers (variable names, `null`, `var`)
//! - String literals (quote kind preserved, content undecoded)
//! - Integer literals
//! - Punctuation: `[` `]` `,` `=` `;`
//! - Comments (block and line)

use super::scanner::Scanner;

/// Current tokenizing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// Initial state before tokenizing starts
    Init,
    /// Inside the token stream
    Running,
    /// End of input reached
    Done,
}

/// Type of table token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier: `var`, `NAVTREE`, `null`, ...
    Ident,
    /// String literal (span covers content between the quotes)
    Str,
    /// Unsigned integer literal
    Number,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// `=`
    Equals,
    /// `;`
    Semi,
    /// Block or line comment (span covers the comment body)
    Comment,
    /// End of file
    Eof,
}

/// A lexed table token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For Ident/Str/Number/Comment: the relevant text
    pub text: Option<&'a [u8]>,
    /// For Str: the quote byte (b'\'' or b'"')
    pub quote: u8,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            text: None,
            quote: 0,
        }
    }

    fn with_text(mut self, text: &'a [u8]) -> Self {
        self.text = Some(text);
        self
    }

    fn with_quote(mut self, quote: u8) -> Self {
        self.quote = quote;
        self
    }
}

/// Error type for strict mode validation failures
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

/// Pull tokenizer over the table source
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
    strict: bool,
    error: Option<ParseError>,
}

impl<'a> Tokenizer<'a> {
    /// Create a new tokenizer for the given input (lenient mode)
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
            strict: false,
            error: None,
        }
    }

    /// Create a new tokenizer in strict mode
    pub fn new_strict(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
            strict: true,
            error: None,
        }
    }

    /// Get any parse error (strict mode only)
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Set an error if in strict mode
    fn set_error(&mut self, message: impl Into<String>) {
        if self.strict && self.error.is_none() {
            self.error = Some(ParseError::new(message, self.scanner.position()));
        }
    }

    /// Get the current parse state
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Get the current position in the input
    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    /// Get the next token, or None if at end of input or on a strict error
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ParseState::Done {
            return None;
        }
        self.state = ParseState::Running;

        self.scanner.skip_whitespace();

        if self.scanner.is_eof() {
            self.state = ParseState::Done;
            let pos = self.scanner.position();
            return Some(Token::new(TokenKind::Eof, (pos, pos)));
        }

        let start = self.scanner.position();

        match self.scanner.peek()? {
            b'[' => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::OpenBracket, (start, start + 1)))
            }
            b']' => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::CloseBracket, (start, start + 1)))
            }
            b',' => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::Comma, (start, start + 1)))
            }
            b'=' => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::Equals, (start, start + 1)))
            }
            b';' => {
                self.scanner.advance(1);
                Some(Token::new(TokenKind::Semi, (start, start + 1)))
            }
            b'\'' | b'"' => self.parse_string(start),
            b'/' => self.parse_comment(start),
            b'0'..=b'9' => self.parse_number(start),
            _ => self.parse_ident(start),
        }
    }

    /// Parse a quoted string literal
    fn parse_string(&mut self, start: usize) -> Option<Token<'a>> {
        let quote = self.scanner.peek()?;
        self.scanner.advance(1);

        let content_start = self.scanner.position();
        let end = match self.scanner.find_string_end(quote) {
            Some(end) => end,
            None => {
                self.set_error("Unterminated string literal");
                self.state = ParseState::Done;
                return None;
            }
        };

        let content = self.scanner.slice(content_start, end);
        self.scanner.set_position(end + 1);

        Some(
            Token::new(TokenKind::Str, (start, end + 1))
                .with_text(content)
                .with_quote(quote),
        )
    }

    /// Parse a block or line comment
    fn parse_comment(&mut self, start: usize) -> Option<Token<'a>> {
        if self.scanner.starts_with(b"/*") {
            self.scanner.advance(2);
            let content_start = self.scanner.position();

            // Find '*/'
            loop {
                let pos = match self.scanner.find_byte(b'*') {
                    Some(pos) => pos,
                    None => {
                        self.set_error("Unterminated block comment");
                        self.state = ParseState::Done;
                        return None;
                    }
                };
                self.scanner.set_position(pos);
                if self.scanner.starts_with(b"*/") {
                    let content = self.scanner.slice(content_start, pos);
                    self.scanner.advance(2);
                    return Some(
                        Token::new(TokenKind::Comment, (start, self.scanner.position()))
                            .with_text(content),
                    );
                }
                self.scanner.advance(1);
            }
        }

        if self.scanner.starts_with(b"//") {
            self.scanner.advance(2);
            let content_start = self.scanner.position();
            let end = self
                .scanner
                .find_line_end()
                .unwrap_or_else(|| content_start + self.scanner.remaining().len());
            let content = self.scanner.slice(content_start, end);
            self.scanner.set_position(end);
            return Some(Token::new(TokenKind::Comment, (start, end)).with_text(content));
        }

        self.set_error("Unexpected '/'");
        if self.strict {
            self.state = ParseState::Done;
            return None;
        }
        // Lenient mode: skip the stray byte and continue
        self.scanner.advance(1);
        self.next_token()
    }

    /// Parse an unsigned integer literal
    fn parse_number(&mut self, start: usize) -> Option<Token<'a>> {
        let digits = self.scanner.read_digits()?;
        Some(Token::new(TokenKind::Number, (start, self.scanner.position())).with_text(digits))
    }

    /// Parse an identifier (`var`, a variable name, or `null`)
    fn parse_ident(&mut self, start: usize) -> Option<Token<'a>> {
        match self.scanner.read_ident() {
            Some(name) => {
                Some(Token::new(TokenKind::Ident, (start, self.scanner.position())).with_text(name))
            }
            None => {
                self.set_error(format!(
                    "Unexpected byte 0x{:02x}",
                    self.scanner.peek().unwrap_or(0)
                ));
                if self.strict {
                    self.state = ParseState::Done;
                    return None;
                }
                // Lenient mode: skip the stray byte and continue
                self.scanner.advance(1);
                self.next_token()
            }
        }
    }
}

/// Iterator adapter for the tokenizer
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token()?;
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &[u8]) -> Vec<TokenKind> {
        Tokenizer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_var_declaration() {
        let toks = kinds(b"var NAVTREEINDEX =\n[\n\"a.html\"\n];");
        assert_eq!(
            toks,
            vec![
                TokenKind::Ident,
                TokenKind::Ident,
                TokenKind::Equals,
                TokenKind::OpenBracket,
                TokenKind::Str,
                TokenKind::CloseBracket,
                TokenKind::Semi,
            ]
        );
    }

    #[test]
    fn test_string_quote_kinds() {
        let mut tok = Tokenizer::new(b"'single' \"double\"");
        let t1 = tok.next_token().unwrap();
        assert_eq!(t1.kind, TokenKind::Str);
        assert_eq!(t1.quote, b'\'');
        assert_eq!(t1.text, Some(b"single" as &[u8]));
        let t2 = tok.next_token().unwrap();
        assert_eq!(t2.quote, b'"');
        assert_eq!(t2.text, Some(b"double" as &[u8]));
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let mut tok = Tokenizer::new(b"'don\\'t'");
        let t = tok.next_token().unwrap();
        assert_eq!(t.text, Some(b"don\\'t" as &[u8]));
    }

    #[test]
    fn test_block_comment() {
        let mut tok = Tokenizer::new(b"/*\n@licstart banner\n*/\nvar X");
        let t = tok.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Comment);
        assert_eq!(t.text, Some(b"\n@licstart banner\n" as &[u8]));
        assert_eq!(tok.next_token().unwrap().kind, TokenKind::Ident);
    }

    #[test]
    fn test_line_comment() {
        let mut tok = Tokenizer::new(b"// trailing\nnull");
        let t = tok.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Comment);
        let t = tok.next_token().unwrap();
        assert_eq!(t.text, Some(b"null" as &[u8]));
    }

    #[test]
    fn test_number() {
        let mut tok = Tokenizer::new(b"1,");
        let t = tok.next_token().unwrap();
        assert_eq!(t.kind, TokenKind::Number);
        assert_eq!(t.text, Some(b"1" as &[u8]));
    }

    #[test]
    fn test_strict_unterminated_string() {
        let mut tok = Tokenizer::new_strict(b"'never ends");
        assert!(tok.next_token().is_none());
        assert!(tok.error().is_some());
    }

    #[test]
    fn test_lenient_skips_garbage() {
        let toks = kinds(b"@ [ ]");
        assert_eq!(toks, vec![TokenKind::OpenBracket, TokenKind::CloseBracket]);
    }
}
