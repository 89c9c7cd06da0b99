//! rsignal_ast: Abstract Syntax Tree definitions for ECMAScript modules.
//!
//! Defines the arena-allocated node types, the SyntaxKind enum, node and
//! token flags, a borrowing visitor, and the factory the rewriter uses to
//! synthesize replacement nodes.

pub mod factory;
pub mod node;
pub mod precedence;
pub mod syntax_kind;
pub mod types;
pub mod visitor;

pub use factory::NodeFactory;
pub use node::*;
pub use syntax_kind::SyntaxKind;
pub use types::*;
