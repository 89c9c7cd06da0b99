//! Flag types attached to nodes and tokens.

bitflags::bitflags! {
    /// Flags for AST nodes.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct NodeFlags: u32 {
        const NONE           = 0;
        const LET            = 1 << 0;
        const CONST          = 1 << 1;
        /// Created by the rewriter rather than the parser.
        const SYNTHESIZED    = 1 << 2;
        /// Member or call written with `?.`.
        const OPTIONAL_CHAIN = 1 << 3;
        /// Generator function or `yield*`.
        const ASTERISK       = 1 << 4;
        /// `for await (...)`.
        const AWAIT          = 1 << 5;
        /// Object literal or class member was written over several lines.
        const MULTI_LINE     = 1 << 6;
        /// String literal written with single quotes.
        const SINGLE_QUOTE   = 1 << 7;

        const BLOCK_SCOPED = Self::LET.bits() | Self::CONST.bits();
    }
}

bitflags::bitflags! {
    /// Modifiers on declarations and class members.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const NONE    = 0;
        const EXPORT  = 1 << 0;
        const DEFAULT = 1 << 1;
        const ASYNC   = 1 << 2;
        const STATIC  = 1 << 3;
    }
}

bitflags::bitflags! {
    /// Token flags set by the scanner.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenFlags: u16 {
        const NONE                 = 0;
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED         = 1 << 1;
        const SINGLE_QUOTE         = 1 << 2;
        const HEX_SPECIFIER        = 1 << 3;
        const BINARY_SPECIFIER     = 1 << 4;
        const OCTAL_SPECIFIER      = 1 << 5;
        const SCIENTIFIC           = 1 << 6;
        const CONTAINS_SEPARATOR   = 1 << 7;
    }
}

/// Which keyword introduced a variable declaration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Var,
    Let,
    Const,
}

impl DeclarationKind {
    pub fn from_flags(flags: NodeFlags) -> Self {
        if flags.contains(NodeFlags::CONST) {
            DeclarationKind::Const
        } else if flags.contains(NodeFlags::LET) {
            DeclarationKind::Let
        } else {
            DeclarationKind::Var
        }
    }

    pub fn to_flags(self) -> NodeFlags {
        match self {
            DeclarationKind::Var => NodeFlags::NONE,
            DeclarationKind::Let => NodeFlags::LET,
            DeclarationKind::Const => NodeFlags::CONST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeclarationKind::Var => "var",
            DeclarationKind::Let => "let",
            DeclarationKind::Const => "const",
        }
    }
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
