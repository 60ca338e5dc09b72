//! SIMD-accelerated table scanning using memchr
//!
//! Uses memchr crate for fast byte searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::{memchr, memchr2};

/// Scanner for JS table delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos;
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get remaining bytes
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Get a slice from start to end positions
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peek at byte at offset from current position
    #[inline]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    /// Skip whitespace characters (space, tab, newline, carriage return)
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while self.pos < self.input.len() {
            match self.input[self.pos] {
                b' ' | b'\t' | b'\n' | b'\r' => self.pos += 1,
                _ => break,
            }
        }
    }

    /// Find next occurrence of a specific byte using SIMD
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of either of two bytes
    #[inline]
    pub fn find_byte2(&self, b1: u8, b2: u8) -> Option<usize> {
        memchr2(b1, b2, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find the end of a quoted string literal starting after the opening quote.
    /// Returns the position of the closing quote, skipping backslash escapes.
    pub fn find_string_end(&self, quote: u8) -> Option<usize> {
        let mut pos = self.pos;
        loop {
            let hit = memchr2(quote, b'\\', &self.input[pos..]).map(|i| pos + i)?;
            if self.input[hit] == quote {
                return Some(hit);
            }
            // Escape sequence: skip the backslash and the escaped byte
            pos = hit + 2;
            if pos > self.input.len() {
                return None;
            }
        }
    }

    /// Find the end of a line (position of '\n'), for line comments
    #[inline]
    pub fn find_line_end(&self) -> Option<usize> {
        memchr(b'\n', &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Check if we have at least n bytes remaining
    #[inline]
    pub fn has_remaining(&self, n: usize) -> bool {
        self.pos + n <= self.input.len()
    }

    /// Read a JS identifier (starts with letter/underscore/dollar,
    /// continues with letters/digits/underscores/dollars)
    pub fn read_ident(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;

        if start >= self.input.len() {
            return None;
        }

        if !is_ident_start_char(self.input[start]) {
            return None;
        }

        self.pos += 1;

        while self.pos < self.input.len() && is_ident_char(self.input[self.pos]) {
            self.pos += 1;
        }

        Some(&self.input[start..self.pos])
    }

    /// Read a run of ASCII digits
    pub fn read_digits(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;

        while self.pos < self.input.len() && self.input[self.pos].is_ascii_digit() {
            self.pos += 1;
        }

        if self.pos == start {
            None
        } else {
            Some(&self.input[start..self.pos])
        }
    }
}

/// Check if byte can start a JS identifier
#[inline]
fn is_ident_start_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'_' | b'$')
}

/// Check if byte can continue a JS identifier
#[inline]
fn is_ident_char(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'_' | b'$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_byte() {
        let scanner = Scanner::new(b"var NAVTREE =");
        assert_eq!(scanner.find_byte(b'='), Some(12));
    }

    #[test]
    fn test_read_ident() {
        let mut scanner = Scanner::new(b"searchData=");
        assert_eq!(scanner.read_ident(), Some(b"searchData" as &[u8]));
        assert_eq!(scanner.position(), 10);
    }

    #[test]
    fn test_read_ident_rejects_digit_start() {
        let mut scanner = Scanner::new(b"1abc");
        assert_eq!(scanner.read_ident(), None);
    }

    #[test]
    fn test_find_string_end_skips_escapes() {
        // closing quote comes after the escaped one
        let input = b"ArgsEA\\'s lambda'rest";
        let scanner = Scanner::new(input);
        assert_eq!(scanner.find_string_end(b'\''), Some(16));
    }

    #[test]
    fn test_read_digits() {
        let mut scanner = Scanner::new(b"651,");
        assert_eq!(scanner.read_digits(), Some(b"651" as &[u8]));
        assert_eq!(scanner.position(), 3);
    }

    #[test]
    fn test_skip_whitespace() {
        let mut scanner = Scanner::new(b"  \t\n hello");
        scanner.skip_whitespace();
        assert_eq!(scanner.position(), 5);
    }
}
