//! Core table parsing primitives
//!
//! This module contains the fundamental building blocks for parsing
//! doxygen's generated JS data tables:
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: Pull tokenizer for the JS-literal table subset
//! - Escape: JS string escape decoding with Cow (zero-copy when possible)
//!   and HTML numeric character-reference decoding
//! - Strings: String interning pool for repeated labels and targets

pub mod escape;
pub mod scanner;
pub mod strings;
pub mod tokenizer;
