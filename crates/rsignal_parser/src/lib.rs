//! rsignal_parser: Recursive descent parser for ECMAScript modules.
//!
//! Parses token streams from the scanner into an arena-allocated AST.
//! The parser never fails outright: it recovers from syntax errors and
//! reports them as diagnostics alongside the tree.

mod parser;

pub use parser::Parser;

use bumpalo::Bump;
use rsignal_ast::node::SourceFile;
use rsignal_core::intern::StringInterner;
use rsignal_diagnostics::DiagnosticCollection;

/// Parse one module, returning its tree and every syntax error found.
pub fn parse_module<'a>(
    arena: &'a Bump,
    interner: &StringInterner,
    file_name: &str,
    source_text: &str,
) -> (SourceFile<'a>, DiagnosticCollection) {
    let mut parser = Parser::new(arena, interner, file_name, source_text);
    let source_file = parser.parse_source_file();
    (source_file, parser.take_diagnostics())
}
