//! Symbol and reference definitions.

use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_core::intern::InternedString;
use rsignal_core::text::TextRange;

/// Index of a symbol in the binder's symbol list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What introduced a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Var,
    Let,
    Const,
    Function,
    Class,
    Parameter,
    CatchVariable,
    Import,
}

impl SymbolKind {
    /// Block-scoped names cannot be declared twice in one scope.
    pub fn is_block_scoped(self) -> bool {
        matches!(
            self,
            SymbolKind::Let | SymbolKind::Const | SymbolKind::Class | SymbolKind::Import
        )
    }
}

/// How a write reaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WriteForm {
    /// `x = v`
    Assignment,
    /// `x op= v`; carries the binary operator `op`.
    Compound(SyntaxKind),
    /// `++x`, `x--`; carries `PlusPlusToken` or `MinusMinusToken`.
    Update { operator: SyntaxKind, prefix: bool },
    /// A target inside an object or array assignment pattern.
    Destructuring,
    /// The head of `for (x in o)` or `for (x of xs)`.
    ForInOf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Read,
    Write(WriteForm),
}

/// One resolved occurrence of a symbol's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The identifier itself.
    pub range: TextRange,
    pub kind: ReferenceKind,
    /// The node a rewrite replaces: the identifier for reads and pattern
    /// targets, the whole assignment or update expression otherwise.
    pub expression_range: TextRange,
    /// The callee's name when this read is a direct argument of a call
    /// whose callee is a plain identifier.
    pub call_callee: Option<InternedString>,
    /// Written as `{ name }` in an object literal.
    pub shorthand: bool,
}

impl Reference {
    pub fn is_read(&self) -> bool {
        self.kind == ReferenceKind::Read
    }

    pub fn is_write(&self) -> bool {
        !self.is_read()
    }
}

/// A named entity declared in the module.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: InternedString,
    pub kind: SymbolKind,
    /// Range of the identifier in the first declaration.
    pub declaration: TextRange,
    /// Every resolved occurrence, in source order.
    pub references: Vec<Reference>,
}

impl Symbol {
    pub fn new(id: SymbolId, name: InternedString, kind: SymbolKind, declaration: TextRange) -> Self {
        Self {
            id,
            name,
            kind,
            declaration,
            references: Vec::new(),
        }
    }

    pub fn reads(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| r.is_read())
    }

    pub fn writes(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(|r| r.is_write())
    }
}
