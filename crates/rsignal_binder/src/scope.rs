//! Scope management for the binder.

use crate::symbol::SymbolId;
use rsignal_core::intern::InternedString;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Module,
    /// Function, arrow, method or static block: the target of `var` hoisting.
    Function,
    Block,
    Catch,
    /// Holds the name of a named function or class expression.
    ExpressionName,
}

/// A scope in the binding phase. Scopes form a chain from inner to outer.
#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    /// The names declared directly in this scope.
    pub names: FxHashMap<InternedString, SymbolId>,
    /// The parent scope (None for the module scope).
    pub parent: Option<ScopeId>,
}

impl Scope {
    pub fn new(kind: ScopeKind, parent: Option<ScopeId>) -> Self {
        Self {
            kind,
            names: FxHashMap::default(),
            parent,
        }
    }

    pub fn is_var_target(&self) -> bool {
        matches!(self.kind, ScopeKind::Module | ScopeKind::Function)
    }
}
