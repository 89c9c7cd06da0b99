//! rsignal_core: Core utilities shared by every stage of the rewriter.
//!
//! Provides string interning for identifiers and literal text, and the
//! range/span types used to locate nodes and diagnostics in source.

pub mod intern;
pub mod text;

pub use intern::{InternedString, StringInterner};
pub use text::{LineAndColumn, LineMap, TextRange, TextSpan};
