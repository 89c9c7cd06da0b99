//! rsignal_scanner: Tokenizer for ECMAScript module source text.
//!
//! Produces tokens on demand for the parser, with support for:
//! - all punctuators, including optional chaining and logical assignment
//! - template literals (head/middle/tail via `rescan_template_token`)
//! - regular expression literals (via `rescan_slash_token`)
//! - Unicode identifiers and private names

mod char_codes;
mod scanner;

pub use scanner::{Scanner, ScannerState};
