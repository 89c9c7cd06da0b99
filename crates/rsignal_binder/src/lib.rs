//! rsignal_binder: Scope analysis and reference classification.
//!
//! The binder walks a module, creates a symbol for every declared name,
//! resolves each identifier occurrence through the scope chain, and records
//! it on its symbol as a read or a write. The rewriter asks it which
//! occurrences belong to a marker-bound variable and which names are taken.

mod binder;
mod scope;
mod symbol;

pub use binder::Binder;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use symbol::{Reference, ReferenceKind, Symbol, SymbolId, SymbolKind, WriteForm};
