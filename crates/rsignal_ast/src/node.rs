//! AST node definitions.
//!
//! Nodes live in a `bumpalo` arena and reference their children through
//! `&'a` borrows, so a node is cheap to clone: cloning copies the node's own
//! fields and shares every child. The rewriter relies on this to reuse
//! untouched subtrees.

use crate::syntax_kind::SyntaxKind;
use crate::types::*;
use rsignal_core::intern::InternedString;
use rsignal_core::text::TextRange;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub range: TextRange,
    pub flags: NodeFlags,
    pub modifier_flags: ModifierFlags,
}

impl NodeData {
    pub fn new(kind: SyntaxKind, pos: u32, end: u32) -> Self {
        Self {
            kind,
            range: TextRange::new(pos, end),
            flags: NodeFlags::NONE,
            modifier_flags: ModifierFlags::NONE,
        }
    }

    /// Data for a node created by the rewriter in place of the node at `range`.
    pub fn synthesized(kind: SyntaxKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            flags: NodeFlags::SYNTHESIZED,
            modifier_flags: ModifierFlags::NONE,
        }
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifier_flags |= modifiers;
        self
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Source File
// ============================================================================

#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
    pub file_name: String,
    pub text: String,
}

// ============================================================================
// Names
// ============================================================================

/// An identifier, or a private name (`#x`) when `data.kind` is
/// `PrivateIdentifier`. Private names keep their leading `#` in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub data: NodeData,
    pub text: InternedString,
}

#[derive(Debug, Clone)]
pub struct ComputedPropertyName<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub enum PropertyName<'a> {
    Identifier(Identifier),
    PrivateIdentifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(LiteralExpression),
    Computed(ComputedPropertyName<'a>),
}

impl<'a> PropertyName<'a> {
    pub fn range(&self) -> TextRange {
        match self {
            PropertyName::Identifier(n) | PropertyName::PrivateIdentifier(n) => n.data.range,
            PropertyName::StringLiteral(n) => n.data.range,
            PropertyName::NumericLiteral(n) => n.data.range,
            PropertyName::Computed(n) => n.data.range,
        }
    }
}

// ============================================================================
// Binding patterns
// ============================================================================

#[derive(Debug, Clone)]
pub enum BindingName<'a> {
    Identifier(Identifier),
    ObjectBindingPattern(&'a ObjectBindingPattern<'a>),
    ArrayBindingPattern(&'a ArrayBindingPattern<'a>),
}

impl<'a> BindingName<'a> {
    pub fn range(&self) -> TextRange {
        match self {
            BindingName::Identifier(n) => n.data.range,
            BindingName::ObjectBindingPattern(n) => n.data.range,
            BindingName::ArrayBindingPattern(n) => n.data.range,
        }
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            BindingName::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Call `f` for every identifier this name binds, in source order.
    pub fn for_each_bound_identifier(&self, f: &mut impl FnMut(&Identifier)) {
        match self {
            BindingName::Identifier(id) => f(id),
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    element.name.for_each_bound_identifier(f);
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        element.name.for_each_bound_identifier(f);
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ObjectBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, BindingElement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ArrayBindingPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, ArrayBindingElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ArrayBindingElement<'a> {
    BindingElement(BindingElement<'a>),
    OmittedExpression(NodeData),
}

/// `name`, `key: name`, `name = init`, `...rest` inside a binding pattern.
#[derive(Debug, Clone)]
pub struct BindingElement<'a> {
    pub data: NodeData,
    pub dot_dot_dot: bool,
    pub property_name: Option<PropertyName<'a>>,
    pub name: BindingName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ParameterDeclaration<'a> {
    pub data: NodeData,
    pub dot_dot_dot: bool,
    pub name: BindingName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone)]
pub enum Expression<'a> {
    Identifier(Identifier),
    PrivateIdentifier(Identifier),
    StringLiteral(StringLiteral),
    NumericLiteral(LiteralExpression),
    BigIntLiteral(LiteralExpression),
    RegularExpressionLiteral(LiteralExpression),
    NoSubstitutionTemplateLiteral(LiteralExpression),
    TemplateExpression(TemplateExpression<'a>),
    ArrayLiteral(ArrayLiteralExpression<'a>),
    ObjectLiteral(ObjectLiteralExpression<'a>),
    PropertyAccess(PropertyAccessExpression<'a>),
    ElementAccess(ElementAccessExpression<'a>),
    Call(CallExpression<'a>),
    New(NewExpression<'a>),
    TaggedTemplate(TaggedTemplateExpression<'a>),
    Parenthesized(ParenthesizedExpression<'a>),
    FunctionExpression(FunctionLikeDeclaration<'a>),
    ArrowFunction(ArrowFunction<'a>),
    ClassExpression(ClassLikeDeclaration<'a>),
    Delete(DeleteExpression<'a>),
    TypeOf(TypeOfExpression<'a>),
    Void(VoidExpression<'a>),
    Await(AwaitExpression<'a>),
    PrefixUnary(PrefixUnaryExpression<'a>),
    PostfixUnary(PostfixUnaryExpression<'a>),
    Binary(BinaryExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Yield(YieldExpression<'a>),
    Spread(SpreadElement<'a>),
    OmittedExpression(NodeData),
    MetaProperty(MetaProperty),
    // Keyword expressions
    ThisKeyword(NodeData),
    SuperKeyword(NodeData),
    NullKeyword(NodeData),
    TrueKeyword(NodeData),
    FalseKeyword(NodeData),
    /// The callee of a dynamic `import(...)`.
    ImportKeyword(NodeData),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) | Expression::PrivateIdentifier(n) => &n.data,
            Expression::StringLiteral(n) => &n.data,
            Expression::NumericLiteral(n)
            | Expression::BigIntLiteral(n)
            | Expression::RegularExpressionLiteral(n)
            | Expression::NoSubstitutionTemplateLiteral(n) => &n.data,
            Expression::TemplateExpression(n) => &n.data,
            Expression::ArrayLiteral(n) => &n.data,
            Expression::ObjectLiteral(n) => &n.data,
            Expression::PropertyAccess(n) => &n.data,
            Expression::ElementAccess(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::New(n) => &n.data,
            Expression::TaggedTemplate(n) => &n.data,
            Expression::Parenthesized(n) => &n.data,
            Expression::FunctionExpression(n) => &n.data,
            Expression::ArrowFunction(n) => &n.data,
            Expression::ClassExpression(n) => &n.data,
            Expression::Delete(n) => &n.data,
            Expression::TypeOf(n) => &n.data,
            Expression::Void(n) => &n.data,
            Expression::Await(n) => &n.data,
            Expression::PrefixUnary(n) => &n.data,
            Expression::PostfixUnary(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Yield(n) => &n.data,
            Expression::Spread(n) => &n.data,
            Expression::MetaProperty(n) => &n.data,
            Expression::OmittedExpression(data)
            | Expression::ThisKeyword(data)
            | Expression::SuperKeyword(data)
            | Expression::NullKeyword(data)
            | Expression::TrueKeyword(data)
            | Expression::FalseKeyword(data)
            | Expression::ImportKeyword(data) => data,
        }
    }

    #[inline]
    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }

    /// Strip any number of enclosing parentheses.
    pub fn skip_parentheses(&self) -> &Expression<'a> {
        let mut expr = self;
        while let Expression::Parenthesized(paren) = expr {
            expr = paren.expression;
        }
        expr
    }

    pub fn as_identifier(&self) -> Option<&Identifier> {
        match self {
            Expression::Identifier(id) => Some(id),
            _ => None,
        }
    }

    /// Whether the value is already a function: a function expression or an
    /// arrow function, possibly parenthesized.
    pub fn is_function_like(&self) -> bool {
        self.skip_parentheses().kind().is_function_like_expression()
    }
}

/// Literal whose source text is kept verbatim: numbers, bigints, regular
/// expressions and templates without substitutions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralExpression {
    pub data: NodeData,
    pub text: InternedString,
}

/// String literal. `text` is the raw contents between the quotes; the quote
/// style is recorded with `NodeFlags::SINGLE_QUOTE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub data: NodeData,
    pub text: InternedString,
}

/// `` `head${a}middle${b}tail` ``. Literal parts are raw source text.
#[derive(Debug, Clone)]
pub struct TemplateExpression<'a> {
    pub data: NodeData,
    pub head: InternedString,
    pub template_spans: NodeList<'a, TemplateSpan<'a>>,
}

#[derive(Debug, Clone)]
pub struct TemplateSpan<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub literal: InternedString,
}

#[derive(Debug, Clone)]
pub struct ArrayLiteralExpression<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct ObjectLiteralExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, ObjectLiteralElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ObjectLiteralElement<'a> {
    PropertyAssignment(PropertyAssignment<'a>),
    ShorthandPropertyAssignment(ShorthandPropertyAssignment<'a>),
    SpreadAssignment(SpreadAssignment<'a>),
    Method(MethodDeclaration<'a>),
}

#[derive(Debug, Clone)]
pub struct PropertyAssignment<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: &'a Expression<'a>,
}

/// `{ name }`, or `{ name = init }` when the literal is an assignment target.
#[derive(Debug, Clone)]
pub struct ShorthandPropertyAssignment<'a> {
    pub data: NodeData,
    pub name: Identifier,
    pub object_assignment_initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SpreadAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `a.b`, `a?.b`, `this.#x`. `data.flags` carries `OPTIONAL_CHAIN` for `?.`.
#[derive(Debug, Clone)]
pub struct PropertyAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub name: Identifier,
}

#[derive(Debug, Clone)]
pub struct ElementAccessExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub argument_expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
}

impl<'a> CallExpression<'a> {
    /// The callee's name when the callee is a plain identifier.
    pub fn callee_identifier(&self) -> Option<&Identifier> {
        self.expression.as_identifier()
    }
}

/// `new C(args)`; `arguments` is `None` for `new C`.
#[derive(Debug, Clone)]
pub struct NewExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub arguments: Option<NodeList<'a, Expression<'a>>>,
}

#[derive(Debug, Clone)]
pub struct TaggedTemplateExpression<'a> {
    pub data: NodeData,
    pub tag: &'a Expression<'a>,
    pub template: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ParenthesizedExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// A `function` declaration or expression; `data.kind` tells which.
/// Generators carry `NodeFlags::ASTERISK`, async functions
/// `ModifierFlags::ASYNC`.
#[derive(Debug, Clone)]
pub struct FunctionLikeDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ArrowFunction<'a> {
    pub data: NodeData,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: ConciseBody<'a>,
}

#[derive(Debug, Clone)]
pub enum ConciseBody<'a> {
    Block(Block<'a>),
    Expression(&'a Expression<'a>),
}

/// A `class` declaration or expression; `data.kind` tells which.
#[derive(Debug, Clone)]
pub struct ClassLikeDeclaration<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub heritage: Option<&'a Expression<'a>>,
    pub members: NodeList<'a, ClassElement<'a>>,
}

#[derive(Debug, Clone)]
pub enum ClassElement<'a> {
    Property(PropertyDeclaration<'a>),
    Method(MethodDeclaration<'a>),
    StaticBlock(ClassStaticBlockDeclaration<'a>),
    Semicolon(NodeData),
}

#[derive(Debug, Clone)]
pub struct PropertyDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

/// Method, getter, setter or constructor, in a class or an object literal.
/// `data.kind` is `MethodDeclaration`, `GetAccessor`, `SetAccessor` or
/// `Constructor`.
#[derive(Debug, Clone)]
pub struct MethodDeclaration<'a> {
    pub data: NodeData,
    pub name: PropertyName<'a>,
    pub parameters: NodeList<'a, ParameterDeclaration<'a>>,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct ClassStaticBlockDeclaration<'a> {
    pub data: NodeData,
    pub body: Block<'a>,
}

#[derive(Debug, Clone)]
pub struct DeleteExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TypeOfExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct VoidExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct AwaitExpression<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PrefixUnaryExpression<'a> {
    pub data: NodeData,
    pub operator: SyntaxKind,
    pub operand: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct PostfixUnaryExpression<'a> {
    pub data: NodeData,
    pub operand: &'a Expression<'a>,
    pub operator: SyntaxKind,
}

/// Binary operators, including assignments and the comma operator.
#[derive(Debug, Clone)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub left: &'a Expression<'a>,
    pub operator: SyntaxKind,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub condition: &'a Expression<'a>,
    pub when_true: &'a Expression<'a>,
    pub when_false: &'a Expression<'a>,
}

/// `yield`, `yield x`, `yield* x` (`NodeFlags::ASTERISK`).
#[derive(Debug, Clone)]
pub struct YieldExpression<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SpreadElement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

/// `new.target` or `import.meta`.
#[derive(Debug, Clone)]
pub struct MetaProperty {
    pub data: NodeData,
    pub keyword_token: SyntaxKind,
    pub name: Identifier,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone)]
pub enum Statement<'a> {
    VariableStatement(VariableStatement<'a>),
    FunctionDeclaration(FunctionLikeDeclaration<'a>),
    ClassDeclaration(ClassLikeDeclaration<'a>),
    ImportDeclaration(ImportDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExportAssignment(ExportAssignment<'a>),
    Block(Block<'a>),
    EmptyStatement(NodeData),
    ExpressionStatement(ExpressionStatement<'a>),
    IfStatement(IfStatement<'a>),
    DoStatement(DoStatement<'a>),
    WhileStatement(WhileStatement<'a>),
    ForStatement(ForStatement<'a>),
    ForInStatement(ForInStatement<'a>),
    ForOfStatement(ForOfStatement<'a>),
    ContinueStatement(JumpStatement),
    BreakStatement(JumpStatement),
    ReturnStatement(ReturnStatement<'a>),
    SwitchStatement(SwitchStatement<'a>),
    LabeledStatement(LabeledStatement<'a>),
    ThrowStatement(ThrowStatement<'a>),
    TryStatement(TryStatement<'a>),
    DebuggerStatement(NodeData),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::VariableStatement(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::ClassDeclaration(n) => &n.data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExportAssignment(n) => &n.data,
            Statement::Block(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::DoStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ForInStatement(n) => &n.data,
            Statement::ForOfStatement(n) => &n.data,
            Statement::ContinueStatement(n) | Statement::BreakStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::SwitchStatement(n) => &n.data,
            Statement::LabeledStatement(n) => &n.data,
            Statement::ThrowStatement(n) => &n.data,
            Statement::TryStatement(n) => &n.data,
            Statement::EmptyStatement(data) | Statement::DebuggerStatement(data) => data,
        }
    }

    #[inline]
    pub fn range(&self) -> TextRange {
        self.data().range
    }
}

/// `var`/`let`/`const` statement; `export` is a modifier flag.
#[derive(Debug, Clone)]
pub struct VariableStatement<'a> {
    pub data: NodeData,
    pub declaration_list: VariableDeclarationList<'a>,
}

/// The declaration keyword lives in `data.flags` (`LET`, `CONST`, or neither
/// for `var`).
#[derive(Debug, Clone)]
pub struct VariableDeclarationList<'a> {
    pub data: NodeData,
    pub declarations: NodeList<'a, VariableDeclaration<'a>>,
}

impl<'a> VariableDeclarationList<'a> {
    pub fn declaration_kind(&self) -> DeclarationKind {
        DeclarationKind::from_flags(self.data.flags)
    }
}

#[derive(Debug, Clone)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub name: BindingName<'a>,
    pub initializer: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct Block<'a> {
    pub data: NodeData,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub then_statement: &'a Statement<'a>,
    pub else_statement: Option<&'a Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct DoStatement<'a> {
    pub data: NodeData,
    pub statement: &'a Statement<'a>,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub enum ForInitializer<'a> {
    VariableDeclarationList(VariableDeclarationList<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub initializer: Option<ForInitializer<'a>>,
    pub condition: Option<&'a Expression<'a>>,
    pub incrementor: Option<&'a Expression<'a>>,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ForInStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

/// `for (... of ...)`; `for await` carries `NodeFlags::AWAIT`.
#[derive(Debug, Clone)]
pub struct ForOfStatement<'a> {
    pub data: NodeData,
    pub initializer: ForInitializer<'a>,
    pub expression: &'a Expression<'a>,
    pub statement: &'a Statement<'a>,
}

/// `break` or `continue`, with an optional label.
#[derive(Debug, Clone)]
pub struct JumpStatement {
    pub data: NodeData,
    pub label: Option<Identifier>,
}

#[derive(Debug, Clone)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
}

#[derive(Debug, Clone)]
pub struct SwitchStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
    pub clauses: NodeList<'a, CaseClause<'a>>,
}

/// `case x:` or, when `expression` is `None`, `default:`.
#[derive(Debug, Clone)]
pub struct CaseClause<'a> {
    pub data: NodeData,
    pub expression: Option<&'a Expression<'a>>,
    pub statements: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone)]
pub struct LabeledStatement<'a> {
    pub data: NodeData,
    pub label: Identifier,
    pub statement: &'a Statement<'a>,
}

#[derive(Debug, Clone)]
pub struct ThrowStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone)]
pub struct TryStatement<'a> {
    pub data: NodeData,
    pub try_block: Block<'a>,
    pub catch_clause: Option<CatchClause<'a>>,
    pub finally_block: Option<Block<'a>>,
}

#[derive(Debug, Clone)]
pub struct CatchClause<'a> {
    pub data: NodeData,
    pub variable_declaration: Option<BindingName<'a>>,
    pub block: Block<'a>,
}

// ============================================================================
// Modules
// ============================================================================

#[derive(Debug, Clone)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub import_clause: Option<ImportClause<'a>>,
    pub module_specifier: StringLiteral,
}

/// `d`, `{ a, b as c }`, `* as ns`, or `d, { ... }`.
#[derive(Debug, Clone)]
pub struct ImportClause<'a> {
    pub data: NodeData,
    pub name: Option<Identifier>,
    pub named_bindings: Option<NamedImportBindings<'a>>,
}

#[derive(Debug, Clone)]
pub enum NamedImportBindings<'a> {
    NamespaceImport(Identifier),
    NamedImports(NodeList<'a, ImportSpecifier>),
}

/// `name` or `property_name as name`; `name` is the local binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpecifier {
    pub data: NodeData,
    pub property_name: Option<Identifier>,
    pub name: Identifier,
}

impl ImportSpecifier {
    /// The name the exporting module uses.
    pub fn imported_name(&self) -> &Identifier {
        self.property_name.as_ref().unwrap_or(&self.name)
    }
}

/// `export { ... } [from "m"]`, `export * [as ns] from "m"`.
/// `export_clause` is `None` for a bare `export *`.
#[derive(Debug, Clone)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub export_clause: Option<NamedExportBindings<'a>>,
    pub module_specifier: Option<StringLiteral>,
}

#[derive(Debug, Clone)]
pub enum NamedExportBindings<'a> {
    NamespaceExport(Identifier),
    NamedExports(NodeList<'a, ExportSpecifier>),
}

/// `name` or `property_name as name`; `name` is the exported name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpecifier {
    pub data: NodeData,
    pub property_name: Option<Identifier>,
    pub name: Identifier,
}

/// `export default <expression>;`
#[derive(Debug, Clone)]
pub struct ExportAssignment<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}
