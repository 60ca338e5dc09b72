//! Table Reader Module
//!
//! Pull-parser layer over the tokenizer:
//! - SliceReader: zero-copy event reader
//! - Events: table event types

pub mod events;
pub mod slice;
