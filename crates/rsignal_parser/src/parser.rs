//! The recursive descent parser.
//!
//! Pulls tokens from the scanner and builds an arena-allocated AST for an
//! ECMAScript module. Syntax errors are collected rather than returned: the
//! parser always produces a tree, and the caller decides whether the
//! diagnostics make it unusable.

use bumpalo::Bump;
use rsignal_ast::node::*;
use rsignal_ast::precedence::{get_binary_operator_precedence, OperatorPrecedence};
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::types::*;
use rsignal_core::intern::StringInterner;
use rsignal_core::text::{TextRange, TextSpan};
use rsignal_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};
use rsignal_scanner::Scanner;

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
const MAX_RECURSION_DEPTH: u32 = 200;

/// Allocate a Vec into the arena as a slice.
fn alloc_vec_in<T>(arena: &Bump, vec: Vec<T>) -> &[T] {
    arena.alloc_slice_fill_iter(vec)
}

/// The parser produces a SourceFile AST from module source text.
pub struct Parser<'a> {
    arena: &'a Bump,
    interner: StringInterner,
    scanner: Scanner,
    file_name: String,
    source_text: String,
    diagnostics: DiagnosticCollection,
    recursion_depth: u32,
    /// Set once the nesting limit is hit; the rest of the input is skipped
    /// and no further errors are reported.
    aborted: bool,
    /// End of the last consumed token. Nodes end here, before any trivia.
    prev_token_end: u32,
    /// Set while parsing the head of a `for` statement, where `in` ends the
    /// initializer instead of being a binary operator.
    disallow_in: bool,
}

impl<'a> Parser<'a> {
    pub fn new(
        arena: &'a Bump,
        interner: &StringInterner,
        file_name: &str,
        source_text: &str,
    ) -> Self {
        Self {
            arena,
            interner: interner.clone(),
            scanner: Scanner::new(source_text),
            file_name: file_name.to_string(),
            source_text: source_text.to_string(),
            diagnostics: DiagnosticCollection::new(),
            recursion_depth: 0,
            aborted: false,
            prev_token_end: 0,
            disallow_in: false,
        }
    }

    pub fn parse_source_file(&mut self) -> SourceFile<'a> {
        self.scanner.skip_shebang();
        self.next_token();

        let statements = self.parse_statement_list(|_| false);
        let end = self.source_text.len() as u32;

        SourceFile {
            data: NodeData::new(SyntaxKind::SourceFile, 0, end),
            statements,
            file_name: self.file_name.clone(),
            text: self.source_text.clone(),
        }
    }

    /// Syntax errors from both the parser and the scanner, in source order.
    pub fn take_diagnostics(mut self) -> DiagnosticCollection {
        let mut scanner_diagnostics = self.scanner.take_diagnostics();
        scanner_diagnostics.attach_file(&self.file_name);
        self.diagnostics.extend(scanner_diagnostics);
        self.diagnostics.sort();
        self.diagnostics
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current_token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    fn next_token(&mut self) -> SyntaxKind {
        self.prev_token_end = self.token_end();
        self.scanner.scan()
    }

    #[inline]
    fn token_pos(&self) -> u32 {
        self.scanner.token_start() as u32
    }

    #[inline]
    fn token_end(&self) -> u32 {
        self.scanner.token_end() as u32
    }

    #[inline]
    fn token_value(&self) -> &str {
        self.scanner.token_value()
    }

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    fn alloc_vec<T>(&self, vec: Vec<T>) -> &'a [T] {
        alloc_vec_in(self.arena, vec)
    }

    /// Node data spanning from `pos` to the end of the last consumed token.
    #[inline]
    fn finish(&self, kind: SyntaxKind, pos: u32) -> NodeData {
        NodeData::new(kind, pos, self.prev_token_end.max(pos))
    }

    fn expect_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            let text = kind.token_text().unwrap_or("token");
            self.error(&messages::_0_EXPECTED, &[text]);
            false
        }
    }

    fn optional_token(&mut self, kind: SyntaxKind) -> bool {
        if self.current_token() == kind {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume a contextual keyword such as `from` or `as`.
    fn expect_contextual(&mut self, word: &str) -> bool {
        if self.is_identifier_text(word) {
            self.next_token();
            true
        } else {
            self.error(&messages::_0_EXPECTED, &[word]);
            false
        }
    }

    /// Whether a statement may end here without a `;`.
    fn can_parse_semicolon(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::SemicolonToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) || self.scanner.has_preceding_line_break()
    }

    fn parse_expected_semicolon(&mut self) {
        if self.optional_token(SyntaxKind::SemicolonToken) {
            return;
        }
        if !self.can_parse_semicolon() {
            self.error(&messages::_0_EXPECTED, &[";"]);
        }
    }

    fn error(&mut self, msg: &DiagnosticMessage, args: &[&str]) {
        let range = TextRange::new(self.token_pos(), self.token_end());
        self.error_at(range, msg, args);
    }

    fn error_at(&mut self, range: TextRange, msg: &DiagnosticMessage, args: &[&str]) {
        if self.aborted {
            return;
        }
        self.diagnostics.add(Diagnostic::with_location(
            self.file_name.clone(),
            TextSpan::from_bounds(range.pos, range.end),
            msg,
            args,
        ));
    }

    /// Check if identifier text matches (without interning - using scanner token_value).
    fn is_identifier_text(&self, text: &str) -> bool {
        self.current_token() == SyntaxKind::Identifier && self.token_value() == text
    }

    /// Returns false once nesting is too deep. Callers must decrement
    /// `recursion_depth` whatever the result.
    fn enter_recursion(&mut self) -> bool {
        self.recursion_depth += 1;
        if self.recursion_depth <= MAX_RECURSION_DEPTH {
            return true;
        }
        if !self.aborted {
            self.error(&messages::MAXIMUM_NESTING_DEPTH_EXCEEDED, &[]);
            self.aborted = true;
            while self.current_token() != SyntaxKind::EndOfFileToken {
                self.next_token();
            }
        }
        false
    }

    fn missing_identifier(&self) -> Identifier {
        let pos = self.token_pos();
        Identifier {
            data: NodeData::new(SyntaxKind::Identifier, pos, pos),
            text: self.interner.intern(""),
        }
    }

    fn missing_expression(&self) -> Expression<'a> {
        Expression::Identifier(self.missing_identifier())
    }

    fn with_in_allowed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.disallow_in, false);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    fn with_in_disallowed<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.disallow_in, true);
        let result = f(self);
        self.disallow_in = saved;
        result
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statement_list(&mut self, is_end: fn(SyntaxKind) -> bool) -> &'a [Statement<'a>] {
        let mut statements = Vec::new();
        while self.current_token() != SyntaxKind::EndOfFileToken && !is_end(self.current_token()) {
            let start = self.token_pos();
            let reported = self.diagnostics.len();
            let statement = self.parse_statement();
            if self.token_pos() == start && self.current_token() != SyntaxKind::EndOfFileToken {
                // No progress: drop the token and resynchronize.
                if self.diagnostics.len() == reported {
                    self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                }
                self.next_token();
                continue;
            }
            statements.push(statement);
        }
        self.alloc_vec(statements)
    }

    fn parse_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let statement = if self.enter_recursion() {
            self.parse_statement_worker()
        } else {
            Statement::EmptyStatement(NodeData::new(SyntaxKind::EmptyStatement, pos, pos))
        };
        self.recursion_depth -= 1;
        statement
    }

    fn parse_statement_and_alloc(&mut self) -> &'a Statement<'a> {
        let statement = self.parse_statement();
        self.alloc(statement)
    }

    fn parse_statement_worker(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::OpenBraceToken => Statement::Block(self.parse_block()),
            SyntaxKind::SemicolonToken => {
                self.next_token();
                Statement::EmptyStatement(self.finish(SyntaxKind::EmptyStatement, pos))
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, ModifierFlags::NONE)
            }
            SyntaxKind::FunctionKeyword => Statement::FunctionDeclaration(self.parse_function(
                pos,
                SyntaxKind::FunctionDeclaration,
                ModifierFlags::NONE,
            )),
            SyntaxKind::ClassKeyword => Statement::ClassDeclaration(self.parse_class(
                pos,
                SyntaxKind::ClassDeclaration,
                ModifierFlags::NONE,
            )),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ContinueKeyword | SyntaxKind::BreakKeyword => self.parse_jump_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_statement(),
            SyntaxKind::SwitchKeyword => self.parse_switch_statement(),
            SyntaxKind::ThrowKeyword => self.parse_throw_statement(),
            SyntaxKind::TryKeyword => self.parse_try_statement(),
            SyntaxKind::DebuggerKeyword => {
                self.next_token();
                self.parse_expected_semicolon();
                Statement::DebuggerStatement(self.finish(SyntaxKind::DebuggerStatement, pos))
            }
            SyntaxKind::ImportKeyword if !self.is_import_call_or_meta() => {
                self.parse_import_declaration()
            }
            SyntaxKind::ExportKeyword => self.parse_export_declaration_or_assignment(),
            SyntaxKind::Identifier if self.is_async_function() => {
                self.next_token();
                Statement::FunctionDeclaration(self.parse_function(
                    pos,
                    SyntaxKind::FunctionDeclaration,
                    ModifierFlags::ASYNC,
                ))
            }
            SyntaxKind::Identifier if self.is_labeled_statement() => self.parse_labeled_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn is_import_call_or_meta(&mut self) -> bool {
        self.scanner.look_ahead(|s| {
            matches!(s.scan(), SyntaxKind::OpenParenToken | SyntaxKind::DotToken)
        })
    }

    /// `async function`, with no line break after `async`.
    fn is_async_function(&mut self) -> bool {
        self.is_identifier_text("async")
            && self.scanner.look_ahead(|s| {
                s.scan() == SyntaxKind::FunctionKeyword && !s.has_preceding_line_break()
            })
    }

    fn is_labeled_statement(&mut self) -> bool {
        self.scanner.look_ahead(|s| s.scan() == SyntaxKind::ColonToken)
    }

    fn parse_block(&mut self) -> Block<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list(|kind| kind == SyntaxKind::CloseBraceToken);
        self.expect_token(SyntaxKind::CloseBraceToken);
        Block {
            data: self.finish(SyntaxKind::Block, pos),
            statements,
        }
    }

    /// Function, method and arrow bodies: `in` is always an operator inside.
    fn parse_function_body(&mut self) -> Block<'a> {
        self.with_in_allowed(|p| p.parse_block())
    }

    fn parse_variable_statement(&mut self, pos: u32, modifiers: ModifierFlags) -> Statement<'a> {
        let declaration_list = self.parse_variable_declaration_list();
        if declaration_list.declaration_kind() == DeclarationKind::Const {
            let declarations = declaration_list.declarations;
            for declaration in declarations.iter().filter(|d| d.initializer.is_none()) {
                self.error_at(
                    declaration.data.range,
                    &messages::CONST_DECLARATIONS_MUST_BE_INITIALIZED,
                    &[],
                );
            }
        }
        self.parse_expected_semicolon();
        Statement::VariableStatement(VariableStatement {
            data: self
                .finish(SyntaxKind::VariableStatement, pos)
                .with_modifiers(modifiers),
            declaration_list,
        })
    }

    fn parse_variable_declaration_list(&mut self) -> VariableDeclarationList<'a> {
        let pos = self.token_pos();
        let flags = match self.current_token() {
            SyntaxKind::LetKeyword => NodeFlags::LET,
            SyntaxKind::ConstKeyword => NodeFlags::CONST,
            _ => NodeFlags::NONE,
        };
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declaration());
            if !self.optional_token(SyntaxKind::CommaToken) {
                break;
            }
        }

        VariableDeclarationList {
            data: self
                .finish(SyntaxKind::VariableDeclarationList, pos)
                .with_flags(flags),
            declarations: self.alloc_vec(declarations),
        }
    }

    fn parse_variable_declaration(&mut self) -> VariableDeclaration<'a> {
        let pos = self.token_pos();
        let name = if self.is_start_of_binding_name() {
            self.parse_binding_name()
        } else {
            self.error(&messages::VARIABLE_DECLARATION_EXPECTED, &[]);
            BindingName::Identifier(self.missing_identifier())
        };
        let initializer = self.parse_initializer();
        VariableDeclaration {
            data: self.finish(SyntaxKind::VariableDeclaration, pos),
            name,
            initializer,
        }
    }

    fn parse_initializer(&mut self) -> Option<&'a Expression<'a>> {
        if self.optional_token(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        }
    }

    fn is_start_of_binding_name(&self) -> bool {
        matches!(
            self.current_token(),
            SyntaxKind::Identifier | SyntaxKind::OpenBraceToken | SyntaxKind::OpenBracketToken
        )
    }

    fn parse_binding_name(&mut self) -> BindingName<'a> {
        match self.current_token() {
            SyntaxKind::OpenBraceToken => {
                let pattern = self.parse_object_binding_pattern();
                BindingName::ObjectBindingPattern(self.alloc(pattern))
            }
            SyntaxKind::OpenBracketToken => {
                let pattern = self.parse_array_binding_pattern();
                BindingName::ArrayBindingPattern(self.alloc(pattern))
            }
            _ => BindingName::Identifier(self.parse_identifier()),
        }
    }

    fn parse_object_binding_pattern(&mut self) -> ObjectBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut elements = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let element = self.parse_object_binding_element();
            let is_rest = element.dot_dot_dot;
            elements.push(element);
            if self.current_token() != SyntaxKind::CloseBraceToken {
                if is_rest {
                    self.error(&messages::A_REST_ELEMENT_MUST_BE_LAST, &[]);
                }
                if !self.expect_token(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        ObjectBindingPattern {
            data: self.finish(SyntaxKind::ObjectBindingPattern, pos),
            elements: self.alloc_vec(elements),
        }
    }

    fn parse_object_binding_element(&mut self) -> BindingElement<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::DotDotDotToken) {
            let name = self.parse_binding_name();
            return BindingElement {
                data: self.finish(SyntaxKind::BindingElement, pos),
                dot_dot_dot: true,
                property_name: None,
                name,
                initializer: None,
            };
        }

        let property_name = self.parse_property_name();
        let (property_name, name) = if self.optional_token(SyntaxKind::ColonToken) {
            (Some(property_name), self.parse_binding_name())
        } else {
            match property_name {
                PropertyName::Identifier(id) => (None, BindingName::Identifier(id)),
                other => {
                    self.error_at(other.range(), &messages::_0_EXPECTED, &[":"]);
                    (Some(other), BindingName::Identifier(self.missing_identifier()))
                }
            }
        };
        let initializer = self.parse_initializer();
        BindingElement {
            data: self.finish(SyntaxKind::BindingElement, pos),
            dot_dot_dot: false,
            property_name,
            name,
            initializer,
        }
    }

    fn parse_array_binding_pattern(&mut self) -> ArrayBindingPattern<'a> {
        let pos = self.token_pos();
        self.expect_token(SyntaxKind::OpenBracketToken);
        let mut elements = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
        ) {
            if self.current_token() == SyntaxKind::CommaToken {
                let hole = self.token_pos();
                elements.push(ArrayBindingElement::OmittedExpression(NodeData::new(
                    SyntaxKind::OmittedExpression,
                    hole,
                    hole,
                )));
                self.next_token();
                continue;
            }

            let element_pos = self.token_pos();
            let dot_dot_dot = self.optional_token(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_name();
            let initializer = if dot_dot_dot { None } else { self.parse_initializer() };
            elements.push(ArrayBindingElement::BindingElement(BindingElement {
                data: self.finish(SyntaxKind::BindingElement, element_pos),
                dot_dot_dot,
                property_name: None,
                name,
                initializer,
            }));

            if self.current_token() != SyntaxKind::CloseBracketToken {
                if dot_dot_dot {
                    self.error(&messages::A_REST_ELEMENT_MUST_BE_LAST, &[]);
                }
                if !self.expect_token(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
        self.expect_token(SyntaxKind::CloseBracketToken);
        ArrayBindingPattern {
            data: self.finish(SyntaxKind::ArrayBindingPattern, pos),
            elements: self.alloc_vec(elements),
        }
    }

    /// An identifier reference or binding name. Reserved words are rejected.
    fn parse_identifier(&mut self) -> Identifier {
        if self.current_token() == SyntaxKind::Identifier {
            return self.parse_identifier_name();
        }
        self.error(&messages::IDENTIFIER_EXPECTED, &[]);
        self.missing_identifier()
    }

    /// An identifier or any reserved word, as in `obj.default` or
    /// `import { default as x }`.
    fn parse_identifier_name(&mut self) -> Identifier {
        if !self.current_token().is_identifier_or_keyword() {
            self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            return self.missing_identifier();
        }
        let pos = self.token_pos();
        let text = self.interner.intern(self.token_value());
        self.next_token();
        Identifier {
            data: self.finish(SyntaxKind::Identifier, pos),
            text,
        }
    }

    fn parse_expression_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish(SyntaxKind::ExpressionStatement, pos),
            expression,
        })
    }

    /// `( expression )` after `if`, `while`, `switch`.
    fn parse_parenthesized_condition(&mut self) -> &'a Expression<'a> {
        self.expect_token(SyntaxKind::OpenParenToken);
        let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
        self.expect_token(SyntaxKind::CloseParenToken);
        expression
    }

    fn parse_if_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let then_statement = self.parse_statement_and_alloc();
        let else_statement = if self.optional_token(SyntaxKind::ElseKeyword) {
            Some(self.parse_statement_and_alloc())
        } else {
            None
        };
        Statement::IfStatement(IfStatement {
            data: self.finish(SyntaxKind::IfStatement, pos),
            expression,
            then_statement,
            else_statement,
        })
    }

    fn parse_do_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let statement = self.parse_statement_and_alloc();
        self.expect_token(SyntaxKind::WhileKeyword);
        let expression = self.parse_parenthesized_condition();
        // The `;` after `do ... while (x)` is always optional.
        self.optional_token(SyntaxKind::SemicolonToken);
        Statement::DoStatement(DoStatement {
            data: self.finish(SyntaxKind::DoStatement, pos),
            statement,
            expression,
        })
    }

    fn parse_while_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        let statement = self.parse_statement_and_alloc();
        Statement::WhileStatement(WhileStatement {
            data: self.finish(SyntaxKind::WhileStatement, pos),
            expression,
            statement,
        })
    }

    fn parse_for_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let is_await = self.optional_token(SyntaxKind::AwaitKeyword);
        self.expect_token(SyntaxKind::OpenParenToken);

        let initializer = match self.current_token() {
            SyntaxKind::SemicolonToken => None,
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                let list = self.with_in_disallowed(|p| p.parse_variable_declaration_list());
                Some(ForInitializer::VariableDeclarationList(list))
            }
            _ => {
                let expression = self.with_in_disallowed(|p| p.parse_expression_and_alloc());
                Some(ForInitializer::Expression(expression))
            }
        };

        let is_of = self.is_identifier_text("of");
        match initializer {
            Some(initializer) if is_of => {
                self.next_token();
                let expression = self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                let flags = if is_await { NodeFlags::AWAIT } else { NodeFlags::NONE };
                Statement::ForOfStatement(ForOfStatement {
                    data: self.finish(SyntaxKind::ForOfStatement, pos).with_flags(flags),
                    initializer,
                    expression,
                    statement,
                })
            }
            Some(initializer) if self.current_token() == SyntaxKind::InKeyword => {
                self.next_token();
                let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                Statement::ForInStatement(ForInStatement {
                    data: self.finish(SyntaxKind::ForInStatement, pos),
                    initializer,
                    expression,
                    statement,
                })
            }
            initializer => {
                self.expect_token(SyntaxKind::SemicolonToken);
                let condition = if self.current_token() != SyntaxKind::SemicolonToken {
                    Some(self.with_in_allowed(|p| p.parse_expression_and_alloc()))
                } else {
                    None
                };
                self.expect_token(SyntaxKind::SemicolonToken);
                let incrementor = if self.current_token() != SyntaxKind::CloseParenToken {
                    Some(self.with_in_allowed(|p| p.parse_expression_and_alloc()))
                } else {
                    None
                };
                self.expect_token(SyntaxKind::CloseParenToken);
                let statement = self.parse_statement_and_alloc();
                Statement::ForStatement(ForStatement {
                    data: self.finish(SyntaxKind::ForStatement, pos),
                    initializer,
                    condition,
                    incrementor,
                    statement,
                })
            }
        }
    }

    fn parse_jump_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let is_break = self.current_token() == SyntaxKind::BreakKeyword;
        self.next_token();
        let label = if self.current_token() == SyntaxKind::Identifier
            && !self.scanner.has_preceding_line_break()
        {
            Some(self.parse_identifier())
        } else {
            None
        };
        self.parse_expected_semicolon();
        if is_break {
            Statement::BreakStatement(JumpStatement {
                data: self.finish(SyntaxKind::BreakStatement, pos),
                label,
            })
        } else {
            Statement::ContinueStatement(JumpStatement {
                data: self.finish(SyntaxKind::ContinueStatement, pos),
                label,
            })
        }
    }

    fn parse_return_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = if self.can_parse_semicolon() {
            None
        } else {
            Some(self.parse_expression_and_alloc())
        };
        self.parse_expected_semicolon();
        Statement::ReturnStatement(ReturnStatement {
            data: self.finish(SyntaxKind::ReturnStatement, pos),
            expression,
        })
    }

    fn parse_throw_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        if self.scanner.has_preceding_line_break() {
            self.error(&messages::EXPRESSION_EXPECTED, &[]);
        }
        let expression = self.parse_expression_and_alloc();
        self.parse_expected_semicolon();
        Statement::ThrowStatement(ThrowStatement {
            data: self.finish(SyntaxKind::ThrowStatement, pos),
            expression,
        })
    }

    fn parse_switch_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_parenthesized_condition();
        self.expect_token(SyntaxKind::OpenBraceToken);

        let mut clauses = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let clause_pos = self.token_pos();
            let (kind, expression) = match self.current_token() {
                SyntaxKind::CaseKeyword => {
                    self.next_token();
                    let test = self.with_in_allowed(|p| p.parse_expression_and_alloc());
                    (SyntaxKind::CaseClause, Some(test))
                }
                SyntaxKind::DefaultKeyword => {
                    self.next_token();
                    (SyntaxKind::DefaultClause, None)
                }
                _ => {
                    self.error(&messages::UNEXPECTED_TOKEN, &[]);
                    self.next_token();
                    continue;
                }
            };
            self.expect_token(SyntaxKind::ColonToken);
            let statements = self.parse_statement_list(|kind| {
                matches!(
                    kind,
                    SyntaxKind::CaseKeyword | SyntaxKind::DefaultKeyword | SyntaxKind::CloseBraceToken
                )
            });
            clauses.push(CaseClause {
                data: self.finish(kind, clause_pos),
                expression,
                statements,
            });
        }
        self.expect_token(SyntaxKind::CloseBraceToken);

        Statement::SwitchStatement(SwitchStatement {
            data: self.finish(SyntaxKind::SwitchStatement, pos),
            expression,
            clauses: self.alloc_vec(clauses),
        })
    }

    fn parse_try_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let try_block = self.parse_block();

        let catch_clause = if self.current_token() == SyntaxKind::CatchKeyword {
            let catch_pos = self.token_pos();
            self.next_token();
            let variable_declaration = if self.optional_token(SyntaxKind::OpenParenToken) {
                let name = self.parse_binding_name();
                self.expect_token(SyntaxKind::CloseParenToken);
                Some(name)
            } else {
                None
            };
            let block = self.parse_block();
            Some(CatchClause {
                data: self.finish(SyntaxKind::CatchClause, catch_pos),
                variable_declaration,
                block,
            })
        } else {
            None
        };

        let finally_block = if self.optional_token(SyntaxKind::FinallyKeyword) {
            Some(self.parse_block())
        } else {
            None
        };

        if catch_clause.is_none() && finally_block.is_none() {
            self.error(&messages::_0_EXPECTED, &["catch"]);
        }

        Statement::TryStatement(TryStatement {
            data: self.finish(SyntaxKind::TryStatement, pos),
            try_block,
            catch_clause,
            finally_block,
        })
    }

    fn parse_labeled_statement(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        let label = self.parse_identifier();
        self.expect_token(SyntaxKind::ColonToken);
        let statement = self.parse_statement_and_alloc();
        Statement::LabeledStatement(LabeledStatement {
            data: self.finish(SyntaxKind::LabeledStatement, pos),
            label,
            statement,
        })
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    /// `function [*] [name] (params) { body }`. `pos` is where the node
    /// starts, which is before any `export` or `async` the caller consumed.
    fn parse_function(
        &mut self,
        pos: u32,
        kind: SyntaxKind,
        modifiers: ModifierFlags,
    ) -> FunctionLikeDeclaration<'a> {
        self.expect_token(SyntaxKind::FunctionKeyword);
        let flags = if self.optional_token(SyntaxKind::AsteriskToken) {
            NodeFlags::ASTERISK
        } else {
            NodeFlags::NONE
        };
        let name = if self.current_token() == SyntaxKind::Identifier {
            Some(self.parse_identifier())
        } else {
            if kind == SyntaxKind::FunctionDeclaration && !modifiers.contains(ModifierFlags::DEFAULT) {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            }
            None
        };
        let parameters = self.parse_parameter_list();
        let body = self.parse_function_body();
        FunctionLikeDeclaration {
            data: self
                .finish(kind, pos)
                .with_flags(flags)
                .with_modifiers(modifiers),
            name,
            parameters,
            body,
        }
    }

    fn parse_parameter_list(&mut self) -> &'a [ParameterDeclaration<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut parameters = Vec::new();
        self.with_in_allowed(|p| {
            while !matches!(
                p.current_token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                let parameter = p.parse_parameter();
                let is_rest = parameter.dot_dot_dot;
                parameters.push(parameter);
                if p.current_token() != SyntaxKind::CloseParenToken {
                    if is_rest {
                        p.error(&messages::A_REST_ELEMENT_MUST_BE_LAST, &[]);
                    }
                    if !p.expect_token(SyntaxKind::CommaToken) {
                        break;
                    }
                }
            }
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        self.alloc_vec(parameters)
    }

    fn parse_parameter(&mut self) -> ParameterDeclaration<'a> {
        let pos = self.token_pos();
        let dot_dot_dot = self.optional_token(SyntaxKind::DotDotDotToken);
        let name = self.parse_binding_name();
        let initializer = self.parse_initializer();
        ParameterDeclaration {
            data: self.finish(SyntaxKind::Parameter, pos),
            dot_dot_dot,
            name,
            initializer,
        }
    }

    fn parse_class(
        &mut self,
        pos: u32,
        kind: SyntaxKind,
        modifiers: ModifierFlags,
    ) -> ClassLikeDeclaration<'a> {
        self.expect_token(SyntaxKind::ClassKeyword);
        let name = if self.current_token() == SyntaxKind::Identifier {
            Some(self.parse_identifier())
        } else {
            if kind == SyntaxKind::ClassDeclaration && !modifiers.contains(ModifierFlags::DEFAULT) {
                self.error(&messages::IDENTIFIER_EXPECTED, &[]);
            }
            None
        };
        let heritage = if self.optional_token(SyntaxKind::ExtendsKeyword) {
            let expression = self.parse_left_hand_side_expression();
            Some(self.alloc(expression))
        } else {
            None
        };
        let members = self.with_in_allowed(|p| p.parse_class_members());
        ClassLikeDeclaration {
            data: self.finish(kind, pos).with_modifiers(modifiers),
            name,
            heritage,
            members,
        }
    }

    fn parse_class_members(&mut self) -> &'a [ClassElement<'a>] {
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut members = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let start = self.token_pos();
            let member = self.parse_class_member();
            if self.token_pos() == start {
                self.error(&messages::UNEXPECTED_TOKEN, &[]);
                self.next_token();
                continue;
            }
            members.push(member);
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.alloc_vec(members)
    }

    fn parse_class_member(&mut self) -> ClassElement<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::SemicolonToken) {
            return ClassElement::Semicolon(self.finish(SyntaxKind::SemicolonClassElement, pos));
        }

        let mut modifiers = ModifierFlags::NONE;
        if self.is_identifier_text("static") {
            if self.scanner.look_ahead(|s| s.scan() == SyntaxKind::OpenBraceToken) {
                self.next_token();
                let body = self.parse_function_body();
                return ClassElement::StaticBlock(ClassStaticBlockDeclaration {
                    data: self.finish(SyntaxKind::ClassStaticBlockDeclaration, pos),
                    body,
                });
            }
            if self.next_is_member_name(false) {
                self.next_token();
                modifiers |= ModifierFlags::STATIC;
            }
        }

        let (method_kind, prefix_modifiers, flags) = self.parse_member_prefix();
        modifiers |= prefix_modifiers;
        let name = self.parse_property_name();

        if method_kind != SyntaxKind::Unknown || self.current_token() == SyntaxKind::OpenParenToken {
            let kind = match method_kind {
                SyntaxKind::Unknown if self.is_constructor_name(&name, modifiers) => {
                    SyntaxKind::Constructor
                }
                SyntaxKind::Unknown => SyntaxKind::MethodDeclaration,
                kind => kind,
            };
            return ClassElement::Method(self.parse_method_rest(pos, kind, modifiers, flags, name));
        }

        let initializer = self.parse_initializer();
        self.parse_expected_semicolon();
        ClassElement::Property(PropertyDeclaration {
            data: self
                .finish(SyntaxKind::PropertyDeclaration, pos)
                .with_modifiers(modifiers),
            name,
            initializer,
        })
    }

    fn is_constructor_name(&self, name: &PropertyName<'a>, modifiers: ModifierFlags) -> bool {
        !modifiers.contains(ModifierFlags::STATIC)
            && matches!(name, PropertyName::Identifier(id) if self.interner.is(id.text, "constructor"))
    }

    /// The `async`, `get`, `set` and `*` prefixes of a method. Returns the
    /// method kind they imply, or `Unknown` when only a following `(` can
    /// tell a method from a property.
    fn parse_member_prefix(&mut self) -> (SyntaxKind, ModifierFlags, NodeFlags) {
        let mut kind = SyntaxKind::Unknown;
        let mut modifiers = ModifierFlags::NONE;
        let mut flags = NodeFlags::NONE;

        if self.is_identifier_text("async") && self.next_is_member_name(true) {
            self.next_token();
            modifiers |= ModifierFlags::ASYNC;
            kind = SyntaxKind::MethodDeclaration;
        } else if self.is_identifier_text("get") && self.next_is_member_name(false) {
            self.next_token();
            kind = SyntaxKind::GetAccessor;
        } else if self.is_identifier_text("set") && self.next_is_member_name(false) {
            self.next_token();
            kind = SyntaxKind::SetAccessor;
        }

        if self.optional_token(SyntaxKind::AsteriskToken) {
            flags |= NodeFlags::ASTERISK;
            if kind == SyntaxKind::Unknown {
                kind = SyntaxKind::MethodDeclaration;
            }
        }
        (kind, modifiers, flags)
    }

    /// Whether the token after the current one can start a member name, so
    /// the current word is a modifier rather than the name itself.
    fn next_is_member_name(&mut self, disallow_line_break: bool) -> bool {
        self.scanner.look_ahead(|s| {
            let kind = s.scan();
            if disallow_line_break && s.has_preceding_line_break() {
                return false;
            }
            kind.is_identifier_or_keyword()
                || matches!(
                    kind,
                    SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::BigIntLiteral
                        | SyntaxKind::PrivateIdentifier
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::AsteriskToken
                )
        })
    }

    fn parse_method_rest(
        &mut self,
        pos: u32,
        kind: SyntaxKind,
        modifiers: ModifierFlags,
        flags: NodeFlags,
        name: PropertyName<'a>,
    ) -> MethodDeclaration<'a> {
        let parameters = self.parse_parameter_list();
        let body = self.parse_function_body();
        MethodDeclaration {
            data: self
                .finish(kind, pos)
                .with_modifiers(modifiers)
                .with_flags(flags),
            name,
            parameters,
            body,
        }
    }

    fn parse_property_name(&mut self) -> PropertyName<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::PrivateIdentifier => {
                PropertyName::PrivateIdentifier(self.parse_private_identifier())
            }
            SyntaxKind::StringLiteral => PropertyName::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NumericLiteral | SyntaxKind::BigIntLiteral => {
                PropertyName::NumericLiteral(self.parse_literal())
            }
            SyntaxKind::OpenBracketToken => {
                self.next_token();
                let expression = self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
                self.expect_token(SyntaxKind::CloseBracketToken);
                PropertyName::Computed(ComputedPropertyName {
                    data: self.finish(SyntaxKind::ComputedPropertyName, pos),
                    expression,
                })
            }
            kind if kind.is_identifier_or_keyword() => {
                PropertyName::Identifier(self.parse_identifier_name())
            }
            _ => {
                self.error(&messages::PROPERTY_ASSIGNMENT_EXPECTED, &[]);
                PropertyName::Identifier(self.missing_identifier())
            }
        }
    }

    fn parse_private_identifier(&mut self) -> Identifier {
        let pos = self.token_pos();
        let text = self.interner.intern(self.token_value());
        self.next_token();
        Identifier {
            data: self.finish(SyntaxKind::PrivateIdentifier, pos),
            text,
        }
    }

    // ========================================================================
    // Imports and exports
    // ========================================================================

    fn parse_import_declaration(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        let import_clause = if self.current_token() == SyntaxKind::StringLiteral {
            None
        } else {
            let clause = self.parse_import_clause();
            self.expect_contextual("from");
            Some(clause)
        };
        let module_specifier = self.parse_module_specifier();
        self.parse_expected_semicolon();
        Statement::ImportDeclaration(ImportDeclaration {
            data: self.finish(SyntaxKind::ImportDeclaration, pos),
            import_clause,
            module_specifier,
        })
    }

    fn parse_import_clause(&mut self) -> ImportClause<'a> {
        let pos = self.token_pos();
        let name = if self.current_token() == SyntaxKind::Identifier {
            Some(self.parse_identifier())
        } else {
            None
        };
        let named_bindings = if name.is_none() || self.optional_token(SyntaxKind::CommaToken) {
            match self.current_token() {
                SyntaxKind::AsteriskToken => {
                    self.next_token();
                    self.expect_contextual("as");
                    Some(NamedImportBindings::NamespaceImport(self.parse_identifier()))
                }
                SyntaxKind::OpenBraceToken => {
                    Some(NamedImportBindings::NamedImports(self.parse_import_specifiers()))
                }
                _ => {
                    self.error(&messages::_0_EXPECTED, &["{"]);
                    None
                }
            }
        } else {
            None
        };
        ImportClause {
            data: self.finish(SyntaxKind::ImportClause, pos),
            name,
            named_bindings,
        }
    }

    fn parse_import_specifiers(&mut self) -> &'a [ImportSpecifier] {
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut specifiers = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let pos = self.token_pos();
            let imported = self.parse_identifier_name();
            let (property_name, name) = if self.is_identifier_text("as") {
                self.next_token();
                (Some(imported), self.parse_identifier())
            } else {
                (None, imported)
            };
            specifiers.push(ImportSpecifier {
                data: self.finish(SyntaxKind::ImportSpecifier, pos),
                property_name,
                name,
            });
            if self.current_token() != SyntaxKind::CloseBraceToken
                && !self.expect_token(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.alloc_vec(specifiers)
    }

    fn parse_module_specifier(&mut self) -> StringLiteral {
        if self.current_token() == SyntaxKind::StringLiteral {
            return self.parse_string_literal();
        }
        self.error(&messages::_0_EXPECTED, &["string literal"]);
        let pos = self.token_pos();
        StringLiteral {
            data: NodeData::new(SyntaxKind::StringLiteral, pos, pos),
            text: self.interner.intern(""),
        }
    }

    fn parse_export_declaration_or_assignment(&mut self) -> Statement<'a> {
        let pos = self.token_pos();
        self.next_token();
        match self.current_token() {
            SyntaxKind::DefaultKeyword => {
                self.next_token();
                let modifiers = ModifierFlags::EXPORT | ModifierFlags::DEFAULT;
                match self.current_token() {
                    SyntaxKind::FunctionKeyword => Statement::FunctionDeclaration(
                        self.parse_function(pos, SyntaxKind::FunctionDeclaration, modifiers),
                    ),
                    SyntaxKind::ClassKeyword => Statement::ClassDeclaration(self.parse_class(
                        pos,
                        SyntaxKind::ClassDeclaration,
                        modifiers,
                    )),
                    SyntaxKind::Identifier if self.is_async_function() => {
                        self.next_token();
                        Statement::FunctionDeclaration(self.parse_function(
                            pos,
                            SyntaxKind::FunctionDeclaration,
                            modifiers | ModifierFlags::ASYNC,
                        ))
                    }
                    _ => {
                        let expression =
                            self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
                        self.parse_expected_semicolon();
                        Statement::ExportAssignment(ExportAssignment {
                            data: self.finish(SyntaxKind::ExportAssignment, pos),
                            expression,
                        })
                    }
                }
            }
            SyntaxKind::VarKeyword | SyntaxKind::LetKeyword | SyntaxKind::ConstKeyword => {
                self.parse_variable_statement(pos, ModifierFlags::EXPORT)
            }
            SyntaxKind::FunctionKeyword => Statement::FunctionDeclaration(self.parse_function(
                pos,
                SyntaxKind::FunctionDeclaration,
                ModifierFlags::EXPORT,
            )),
            SyntaxKind::ClassKeyword => Statement::ClassDeclaration(self.parse_class(
                pos,
                SyntaxKind::ClassDeclaration,
                ModifierFlags::EXPORT,
            )),
            SyntaxKind::Identifier if self.is_async_function() => {
                self.next_token();
                Statement::FunctionDeclaration(self.parse_function(
                    pos,
                    SyntaxKind::FunctionDeclaration,
                    ModifierFlags::EXPORT | ModifierFlags::ASYNC,
                ))
            }
            SyntaxKind::AsteriskToken => {
                self.next_token();
                let export_clause = if self.is_identifier_text("as") {
                    self.next_token();
                    Some(NamedExportBindings::NamespaceExport(self.parse_identifier_name()))
                } else {
                    None
                };
                self.expect_contextual("from");
                let module_specifier = Some(self.parse_module_specifier());
                self.parse_expected_semicolon();
                Statement::ExportDeclaration(ExportDeclaration {
                    data: self.finish(SyntaxKind::ExportDeclaration, pos),
                    export_clause,
                    module_specifier,
                })
            }
            SyntaxKind::OpenBraceToken => {
                let specifiers = self.parse_export_specifiers();
                let module_specifier = if self.is_identifier_text("from") {
                    self.next_token();
                    Some(self.parse_module_specifier())
                } else {
                    None
                };
                self.parse_expected_semicolon();
                Statement::ExportDeclaration(ExportDeclaration {
                    data: self.finish(SyntaxKind::ExportDeclaration, pos),
                    export_clause: Some(NamedExportBindings::NamedExports(specifiers)),
                    module_specifier,
                })
            }
            _ => {
                self.error(&messages::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                Statement::EmptyStatement(self.finish(SyntaxKind::EmptyStatement, pos))
            }
        }
    }

    fn parse_export_specifiers(&mut self) -> &'a [ExportSpecifier] {
        self.expect_token(SyntaxKind::OpenBraceToken);
        let mut specifiers = Vec::new();
        while !matches!(
            self.current_token(),
            SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
        ) {
            let pos = self.token_pos();
            let local = self.parse_identifier_name();
            let (property_name, name) = if self.is_identifier_text("as") {
                self.next_token();
                (Some(local), self.parse_identifier_name())
            } else {
                (None, local)
            };
            specifiers.push(ExportSpecifier {
                data: self.finish(SyntaxKind::ExportSpecifier, pos),
                property_name,
                name,
            });
            if self.current_token() != SyntaxKind::CloseBraceToken
                && !self.expect_token(SyntaxKind::CommaToken)
            {
                break;
            }
        }
        self.expect_token(SyntaxKind::CloseBraceToken);
        self.alloc_vec(specifiers)
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_expression();
        self.alloc(expression)
    }

    fn parse_assignment_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_assignment_expression();
        self.alloc(expression)
    }

    /// Comma-separated sequence of assignment expressions.
    fn parse_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let mut expression = self.parse_assignment_expression();
        while self.current_token() == SyntaxKind::CommaToken {
            self.next_token();
            let left = self.alloc(expression);
            let right = self.parse_assignment_expression_and_alloc();
            expression = Expression::Binary(BinaryExpression {
                data: self.finish(SyntaxKind::BinaryExpression, pos),
                left,
                operator: SyntaxKind::CommaToken,
                right,
            });
        }
        expression
    }

    fn parse_assignment_expression(&mut self) -> Expression<'a> {
        let expression = if self.enter_recursion() {
            self.parse_assignment_expression_worker()
        } else {
            self.missing_expression()
        };
        self.recursion_depth -= 1;
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> Expression<'a> {
        if self.current_token() == SyntaxKind::YieldKeyword {
            return self.parse_yield_expression();
        }
        if let Some(arrow) = self.try_parse_arrow_function() {
            return arrow;
        }

        let pos = self.token_pos();
        let left = self.parse_conditional_expression();
        let operator = self.current_token();
        if !operator.is_assignment_operator() {
            return left;
        }
        if !is_valid_assignment_target(&left, operator) {
            self.error_at(left.range(), &messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[]);
        }
        self.next_token();
        let left = self.alloc(left);
        let right = self.parse_assignment_expression_and_alloc();
        Expression::Binary(BinaryExpression {
            data: self.finish(SyntaxKind::BinaryExpression, pos),
            left,
            operator,
            right,
        })
    }

    fn parse_yield_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let mut flags = NodeFlags::NONE;
        let expression = if self.scanner.has_preceding_line_break() {
            None
        } else if self.optional_token(SyntaxKind::AsteriskToken) {
            flags |= NodeFlags::ASTERISK;
            Some(self.parse_assignment_expression_and_alloc())
        } else if self.is_start_of_expression() {
            Some(self.parse_assignment_expression_and_alloc())
        } else {
            None
        };
        Expression::Yield(YieldExpression {
            data: self.finish(SyntaxKind::YieldExpression, pos).with_flags(flags),
            expression,
        })
    }

    fn is_start_of_expression(&self) -> bool {
        let kind = self.current_token();
        !kind.is_assignment_operator()
            && !matches!(
                kind,
                SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
                    | SyntaxKind::CloseBraceToken
                    | SyntaxKind::CommaToken
                    | SyntaxKind::SemicolonToken
                    | SyntaxKind::ColonToken
                    | SyntaxKind::QuestionToken
                    | SyntaxKind::EndOfFileToken
            )
    }

    /// Arrow functions are recognized by looking ahead for `=>`: after a
    /// single identifier, or after a balanced parameter list.
    fn try_parse_arrow_function(&mut self) -> Option<Expression<'a>> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::Identifier if self.is_identifier_text("async") => {
                let simple = self.scanner.look_ahead(|s| {
                    s.scan() == SyntaxKind::Identifier
                        && !s.has_preceding_line_break()
                        && s.scan() == SyntaxKind::EqualsGreaterThanToken
                        && !s.has_preceding_line_break()
                });
                if simple {
                    self.next_token();
                    let parameters = self.parse_single_arrow_parameter();
                    return Some(self.parse_arrow_function_rest(pos, parameters, ModifierFlags::ASYNC));
                }
                let parenthesized = self.scanner.look_ahead(|s| {
                    s.scan() == SyntaxKind::OpenParenToken
                        && !s.has_preceding_line_break()
                        && is_parenthesized_arrow_head(s)
                });
                if parenthesized {
                    self.next_token();
                    let parameters = self.parse_parameter_list();
                    return Some(self.parse_arrow_function_rest(pos, parameters, ModifierFlags::ASYNC));
                }
                self.try_parse_simple_arrow_function(pos)
            }
            SyntaxKind::Identifier => self.try_parse_simple_arrow_function(pos),
            SyntaxKind::OpenParenToken => {
                if !self.scanner.look_ahead(is_parenthesized_arrow_head) {
                    return None;
                }
                let parameters = self.parse_parameter_list();
                Some(self.parse_arrow_function_rest(pos, parameters, ModifierFlags::NONE))
            }
            _ => None,
        }
    }

    fn try_parse_simple_arrow_function(&mut self, pos: u32) -> Option<Expression<'a>> {
        let is_arrow = self.scanner.look_ahead(|s| {
            s.scan() == SyntaxKind::EqualsGreaterThanToken && !s.has_preceding_line_break()
        });
        if !is_arrow {
            return None;
        }
        let parameters = self.parse_single_arrow_parameter();
        Some(self.parse_arrow_function_rest(pos, parameters, ModifierFlags::NONE))
    }

    fn parse_single_arrow_parameter(&mut self) -> &'a [ParameterDeclaration<'a>] {
        let pos = self.token_pos();
        let name = self.parse_identifier();
        let parameter = ParameterDeclaration {
            data: self.finish(SyntaxKind::Parameter, pos),
            dot_dot_dot: false,
            name: BindingName::Identifier(name),
            initializer: None,
        };
        self.alloc_vec(vec![parameter])
    }

    fn parse_arrow_function_rest(
        &mut self,
        pos: u32,
        parameters: &'a [ParameterDeclaration<'a>],
        modifiers: ModifierFlags,
    ) -> Expression<'a> {
        self.expect_token(SyntaxKind::EqualsGreaterThanToken);
        let body = if self.current_token() == SyntaxKind::OpenBraceToken {
            ConciseBody::Block(self.parse_function_body())
        } else {
            ConciseBody::Expression(self.parse_assignment_expression_and_alloc())
        };
        Expression::ArrowFunction(ArrowFunction {
            data: self
                .finish(SyntaxKind::ArrowFunction, pos)
                .with_modifiers(modifiers),
            parameters,
            body,
        })
    }

    fn parse_conditional_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let condition = self.parse_binary_expression(OperatorPrecedence::NullishCoalescing);
        if !self.optional_token(SyntaxKind::QuestionToken) {
            return condition;
        }
        let condition = self.alloc(condition);
        let when_true = self.with_in_allowed(|p| p.parse_assignment_expression_and_alloc());
        self.expect_token(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression_and_alloc();
        Expression::Conditional(ConditionalExpression {
            data: self.finish(SyntaxKind::ConditionalExpression, pos),
            condition,
            when_true,
            when_false,
        })
    }

    /// Precedence climbing. `**` is right-associative; everything else
    /// associates to the left.
    fn parse_binary_expression(&mut self, min_precedence: OperatorPrecedence) -> Expression<'a> {
        let pos = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.current_token();
            if operator == SyntaxKind::InKeyword && self.disallow_in {
                break;
            }
            let precedence = get_binary_operator_precedence(operator);
            if precedence == OperatorPrecedence::Invalid || precedence < min_precedence {
                break;
            }
            self.next_token();
            let right_precedence = if operator == SyntaxKind::AsteriskAsteriskToken {
                precedence
            } else {
                precedence.next()
            };
            let right = self.parse_binary_expression(right_precedence);
            self.check_binary_operands(operator, &left, &right);
            let left_ref = self.alloc(left);
            let right = self.alloc(right);
            left = Expression::Binary(BinaryExpression {
                data: self.finish(SyntaxKind::BinaryExpression, pos),
                left: left_ref,
                operator,
                right,
            });
        }
        left
    }

    /// `-x ** 2` and `a ?? b || c` parse, but are not valid ECMAScript.
    fn check_binary_operands(&mut self, operator: SyntaxKind, left: &Expression<'a>, right: &Expression<'a>) {
        if operator == SyntaxKind::AsteriskAsteriskToken && is_unary_expression(left) {
            self.error_at(left.range(), &messages::UNARY_OPERAND_OF_EXPONENTIATION, &[]);
            return;
        }
        let is_logical = |op: SyntaxKind| matches!(op, SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken);
        let is_nullish = |op: SyntaxKind| op == SyntaxKind::QuestionQuestionToken;
        let conflicts = |op: SyntaxKind| {
            (is_nullish(operator) && is_logical(op)) || (is_logical(operator) && is_nullish(op))
        };
        for operand in [left, right] {
            if let Expression::Binary(inner) = operand {
                if conflicts(inner.operator) {
                    let outer = operator.token_text().unwrap_or_default();
                    let nested = inner.operator.token_text().unwrap_or_default();
                    self.error_at(operand.range(), &messages::CANNOT_MIX_0_AND_1_WITHOUT_PARENTHESES, &[nested, outer]);
                    return;
                }
            }
        }
    }

    fn parse_unary_expression(&mut self) -> Expression<'a> {
        let expression = if self.enter_recursion() {
            self.parse_unary_expression_worker()
        } else {
            self.missing_expression()
        };
        self.recursion_depth -= 1;
        expression
    }

    fn parse_unary_expression_and_alloc(&mut self) -> &'a Expression<'a> {
        let expression = self.parse_unary_expression();
        self.alloc(expression)
    }

    fn parse_unary_expression_worker(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::TildeToken
            | SyntaxKind::ExclamationToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken => {
                let operator = self.current_token();
                self.next_token();
                let operand = self.parse_unary_expression_and_alloc();
                if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !is_valid_update_target(operand)
                {
                    self.error_at(operand.range(), &messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT, &[]);
                }
                Expression::PrefixUnary(PrefixUnaryExpression {
                    data: self.finish(SyntaxKind::PrefixUnaryExpression, pos),
                    operator,
                    operand,
                })
            }
            SyntaxKind::DeleteKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression_and_alloc();
                Expression::Delete(DeleteExpression {
                    data: self.finish(SyntaxKind::DeleteExpression, pos),
                    expression,
                })
            }
            SyntaxKind::TypeOfKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression_and_alloc();
                Expression::TypeOf(TypeOfExpression {
                    data: self.finish(SyntaxKind::TypeOfExpression, pos),
                    expression,
                })
            }
            SyntaxKind::VoidKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression_and_alloc();
                Expression::Void(VoidExpression {
                    data: self.finish(SyntaxKind::VoidExpression, pos),
                    expression,
                })
            }
            SyntaxKind::AwaitKeyword => {
                self.next_token();
                let expression = self.parse_unary_expression_and_alloc();
                Expression::Await(AwaitExpression {
                    data: self.finish(SyntaxKind::AwaitExpression, pos),
                    expression,
                })
            }
            _ => {
                let expression = self.parse_left_hand_side_expression();
                let operator = self.current_token();
                if matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
                    && !self.scanner.has_preceding_line_break()
                {
                    if !is_valid_update_target(&expression) {
                        self.error_at(
                            expression.range(),
                            &messages::INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT,
                            &[],
                        );
                    }
                    self.next_token();
                    let operand = self.alloc(expression);
                    return Expression::PostfixUnary(PostfixUnaryExpression {
                        data: self.finish(SyntaxKind::PostfixUnaryExpression, pos),
                        operand,
                        operator,
                    });
                }
                expression
            }
        }
    }

    fn parse_left_hand_side_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let expression = match self.current_token() {
            SyntaxKind::NewKeyword => self.parse_new_expression(),
            SyntaxKind::SuperKeyword => Expression::SuperKeyword(self.parse_keyword_node()),
            SyntaxKind::ImportKeyword => self.parse_import_expression(),
            _ => self.parse_primary_expression(),
        };
        self.parse_member_expression_rest(pos, expression, true)
    }

    /// Property accesses, element accesses, tagged templates and, when
    /// `allow_call` is set, calls and optional chains following `expression`.
    fn parse_member_expression_rest(
        &mut self,
        pos: u32,
        mut expression: Expression<'a>,
        allow_call: bool,
    ) -> Expression<'a> {
        loop {
            expression = match self.current_token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    let object = self.alloc(expression);
                    Expression::PropertyAccess(PropertyAccessExpression {
                        data: self.finish(SyntaxKind::PropertyAccessExpression, pos),
                        expression: object,
                        name,
                    })
                }
                SyntaxKind::QuestionDotToken if allow_call => {
                    self.next_token();
                    let object = self.alloc(expression);
                    match self.current_token() {
                        SyntaxKind::OpenParenToken => {
                            let arguments = self.parse_arguments();
                            Expression::Call(CallExpression {
                                data: self
                                    .finish(SyntaxKind::CallExpression, pos)
                                    .with_flags(NodeFlags::OPTIONAL_CHAIN),
                                expression: object,
                                arguments,
                            })
                        }
                        SyntaxKind::OpenBracketToken => {
                            let argument_expression = self.parse_element_argument();
                            Expression::ElementAccess(ElementAccessExpression {
                                data: self
                                    .finish(SyntaxKind::ElementAccessExpression, pos)
                                    .with_flags(NodeFlags::OPTIONAL_CHAIN),
                                expression: object,
                                argument_expression,
                            })
                        }
                        _ => {
                            let name = self.parse_member_name();
                            Expression::PropertyAccess(PropertyAccessExpression {
                                data: self
                                    .finish(SyntaxKind::PropertyAccessExpression, pos)
                                    .with_flags(NodeFlags::OPTIONAL_CHAIN),
                                expression: object,
                                name,
                            })
                        }
                    }
                }
                SyntaxKind::OpenBracketToken => {
                    let object = self.alloc(expression);
                    let argument_expression = self.parse_element_argument();
                    Expression::ElementAccess(ElementAccessExpression {
                        data: self.finish(SyntaxKind::ElementAccessExpression, pos),
                        expression: object,
                        argument_expression,
                    })
                }
                SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                    let tag = self.alloc(expression);
                    let template = self.parse_template_literal();
                    let template = self.alloc(template);
                    Expression::TaggedTemplate(TaggedTemplateExpression {
                        data: self.finish(SyntaxKind::TaggedTemplateExpression, pos),
                        tag,
                        template,
                    })
                }
                SyntaxKind::OpenParenToken if allow_call => {
                    let callee = self.alloc(expression);
                    let arguments = self.parse_arguments();
                    Expression::Call(CallExpression {
                        data: self.finish(SyntaxKind::CallExpression, pos),
                        expression: callee,
                        arguments,
                    })
                }
                _ => break,
            };
        }
        expression
    }

    /// `[ expression ]` of an element access.
    fn parse_element_argument(&mut self) -> &'a Expression<'a> {
        self.expect_token(SyntaxKind::OpenBracketToken);
        let argument = self.with_in_allowed(|p| p.parse_expression_and_alloc());
        self.expect_token(SyntaxKind::CloseBracketToken);
        argument
    }

    /// The name after `.` or `?.`: any identifier name or a private name.
    fn parse_member_name(&mut self) -> Identifier {
        if self.current_token() == SyntaxKind::PrivateIdentifier {
            return self.parse_private_identifier();
        }
        self.parse_identifier_name()
    }

    fn parse_new_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        if self.optional_token(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return Expression::MetaProperty(MetaProperty {
                data: self.finish(SyntaxKind::MetaProperty, pos),
                keyword_token: SyntaxKind::NewKeyword,
                name,
            });
        }

        let callee_pos = self.token_pos();
        let callee = if self.current_token() == SyntaxKind::NewKeyword {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let callee = self.parse_member_expression_rest(callee_pos, callee, false);
        let callee = self.alloc(callee);
        let arguments = if self.current_token() == SyntaxKind::OpenParenToken {
            Some(self.parse_arguments())
        } else {
            None
        };
        Expression::New(NewExpression {
            data: self.finish(SyntaxKind::NewExpression, pos),
            expression: callee,
            arguments,
        })
    }

    /// `import(...)` callee or `import.meta`.
    fn parse_import_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        if self.optional_token(SyntaxKind::DotToken) {
            let name = self.parse_identifier_name();
            return Expression::MetaProperty(MetaProperty {
                data: self.finish(SyntaxKind::MetaProperty, pos),
                keyword_token: SyntaxKind::ImportKeyword,
                name,
            });
        }
        Expression::ImportKeyword(self.finish(SyntaxKind::ImportKeyword, pos))
    }

    fn parse_arguments(&mut self) -> &'a [Expression<'a>] {
        self.expect_token(SyntaxKind::OpenParenToken);
        let mut arguments = Vec::new();
        self.with_in_allowed(|p| {
            while !matches!(
                p.current_token(),
                SyntaxKind::CloseParenToken | SyntaxKind::EndOfFileToken
            ) {
                let argument = if p.current_token() == SyntaxKind::DotDotDotToken {
                    p.parse_spread_element()
                } else {
                    p.parse_assignment_expression()
                };
                arguments.push(argument);
                if p.current_token() != SyntaxKind::CloseParenToken
                    && !p.expect_token(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.expect_token(SyntaxKind::CloseParenToken);
        self.alloc_vec(arguments)
    }

    fn parse_spread_element(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.parse_assignment_expression_and_alloc();
        Expression::Spread(SpreadElement {
            data: self.finish(SyntaxKind::SpreadElement, pos),
            expression,
        })
    }

    fn parse_keyword_node(&mut self) -> NodeData {
        let pos = self.token_pos();
        let kind = self.current_token();
        self.next_token();
        self.finish(kind, pos)
    }

    fn parse_primary_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        match self.current_token() {
            SyntaxKind::Identifier => {
                if self.is_async_function() {
                    self.next_token();
                    return Expression::FunctionExpression(self.parse_function(
                        pos,
                        SyntaxKind::FunctionExpression,
                        ModifierFlags::ASYNC,
                    ));
                }
                Expression::Identifier(self.parse_identifier_name())
            }
            SyntaxKind::PrivateIdentifier => {
                Expression::PrivateIdentifier(self.parse_private_identifier())
            }
            SyntaxKind::NumericLiteral => Expression::NumericLiteral(self.parse_literal()),
            SyntaxKind::BigIntLiteral => Expression::BigIntLiteral(self.parse_literal()),
            SyntaxKind::StringLiteral => Expression::StringLiteral(self.parse_string_literal()),
            SyntaxKind::NoSubstitutionTemplateLiteral | SyntaxKind::TemplateHead => {
                self.parse_template_literal()
            }
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken => {
                self.scanner.rescan_slash_token();
                Expression::RegularExpressionLiteral(self.parse_literal())
            }
            SyntaxKind::ThisKeyword => Expression::ThisKeyword(self.parse_keyword_node()),
            SyntaxKind::NullKeyword => Expression::NullKeyword(self.parse_keyword_node()),
            SyntaxKind::TrueKeyword => Expression::TrueKeyword(self.parse_keyword_node()),
            SyntaxKind::FalseKeyword => Expression::FalseKeyword(self.parse_keyword_node()),
            SyntaxKind::OpenParenToken => self.parse_parenthesized_expression(),
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => Expression::FunctionExpression(self.parse_function(
                pos,
                SyntaxKind::FunctionExpression,
                ModifierFlags::NONE,
            )),
            SyntaxKind::ClassKeyword => Expression::ClassExpression(self.parse_class(
                pos,
                SyntaxKind::ClassExpression,
                ModifierFlags::NONE,
            )),
            _ => {
                self.error(&messages::EXPRESSION_EXPECTED, &[]);
                self.missing_expression()
            }
        }
    }

    /// A literal whose kind is the current token and whose text is kept
    /// verbatim.
    fn parse_literal(&mut self) -> LiteralExpression {
        let pos = self.token_pos();
        let kind = self.current_token();
        let text = self.interner.intern(self.token_value());
        self.next_token();
        LiteralExpression {
            data: self.finish(kind, pos),
            text,
        }
    }

    fn parse_string_literal(&mut self) -> StringLiteral {
        let pos = self.token_pos();
        let text = self.interner.intern(self.token_value());
        let flags = if self.scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE) {
            NodeFlags::SINGLE_QUOTE
        } else {
            NodeFlags::NONE
        };
        self.next_token();
        StringLiteral {
            data: self.finish(SyntaxKind::StringLiteral, pos).with_flags(flags),
            text,
        }
    }

    fn parse_template_literal(&mut self) -> Expression<'a> {
        if self.current_token() == SyntaxKind::NoSubstitutionTemplateLiteral {
            Expression::NoSubstitutionTemplateLiteral(self.parse_literal())
        } else {
            self.parse_template_expression()
        }
    }

    fn parse_template_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        let head = self.interner.intern(self.token_value());
        self.next_token();

        let mut template_spans = Vec::new();
        loop {
            let span_pos = self.token_pos();
            let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
            if self.current_token() != SyntaxKind::CloseBraceToken {
                self.error(&messages::_0_EXPECTED, &["}"]);
                break;
            }
            let kind = self.scanner.rescan_template_token();
            let literal = self.interner.intern(self.token_value());
            self.next_token();
            template_spans.push(TemplateSpan {
                data: self.finish(SyntaxKind::TemplateSpan, span_pos),
                expression,
                literal,
            });
            if kind != SyntaxKind::TemplateMiddle {
                break;
            }
        }

        Expression::TemplateExpression(TemplateExpression {
            data: self.finish(SyntaxKind::TemplateExpression, pos),
            head,
            template_spans: self.alloc_vec(template_spans),
        })
    }

    fn parse_parenthesized_expression(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let expression = self.with_in_allowed(|p| p.parse_expression_and_alloc());
        self.expect_token(SyntaxKind::CloseParenToken);
        Expression::Parenthesized(ParenthesizedExpression {
            data: self.finish(SyntaxKind::ParenthesizedExpression, pos),
            expression,
        })
    }

    fn parse_array_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let mut elements = Vec::new();
        self.with_in_allowed(|p| {
            while !matches!(
                p.current_token(),
                SyntaxKind::CloseBracketToken | SyntaxKind::EndOfFileToken
            ) {
                if p.current_token() == SyntaxKind::CommaToken {
                    let hole = p.token_pos();
                    elements.push(Expression::OmittedExpression(NodeData::new(
                        SyntaxKind::OmittedExpression,
                        hole,
                        hole,
                    )));
                    p.next_token();
                    continue;
                }
                let element = if p.current_token() == SyntaxKind::DotDotDotToken {
                    p.parse_spread_element()
                } else {
                    p.parse_assignment_expression()
                };
                elements.push(element);
                if p.current_token() != SyntaxKind::CloseBracketToken
                    && !p.expect_token(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.expect_token(SyntaxKind::CloseBracketToken);
        Expression::ArrayLiteral(ArrayLiteralExpression {
            data: self.finish(SyntaxKind::ArrayLiteralExpression, pos),
            elements: self.alloc_vec(elements),
        })
    }

    fn parse_object_literal(&mut self) -> Expression<'a> {
        let pos = self.token_pos();
        self.next_token();
        let multi_line = self.scanner.has_preceding_line_break();
        let mut properties = Vec::new();
        self.with_in_allowed(|p| {
            while !matches!(
                p.current_token(),
                SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken
            ) {
                properties.push(p.parse_object_literal_element());
                if p.current_token() != SyntaxKind::CloseBraceToken
                    && !p.expect_token(SyntaxKind::CommaToken)
                {
                    break;
                }
            }
        });
        self.expect_token(SyntaxKind::CloseBraceToken);
        let flags = if multi_line { NodeFlags::MULTI_LINE } else { NodeFlags::NONE };
        Expression::ObjectLiteral(ObjectLiteralExpression {
            data: self
                .finish(SyntaxKind::ObjectLiteralExpression, pos)
                .with_flags(flags),
            properties: self.alloc_vec(properties),
        })
    }

    fn parse_object_literal_element(&mut self) -> ObjectLiteralElement<'a> {
        let pos = self.token_pos();
        if self.optional_token(SyntaxKind::DotDotDotToken) {
            let expression = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
                data: self.finish(SyntaxKind::SpreadAssignment, pos),
                expression,
            });
        }

        let (method_kind, modifiers, flags) = self.parse_member_prefix();
        let name = self.parse_property_name();
        if method_kind != SyntaxKind::Unknown || self.current_token() == SyntaxKind::OpenParenToken {
            let kind = if method_kind == SyntaxKind::Unknown {
                SyntaxKind::MethodDeclaration
            } else {
                method_kind
            };
            return ObjectLiteralElement::Method(self.parse_method_rest(pos, kind, modifiers, flags, name));
        }

        if self.optional_token(SyntaxKind::ColonToken) {
            let initializer = self.parse_assignment_expression_and_alloc();
            return ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                data: self.finish(SyntaxKind::PropertyAssignment, pos),
                name,
                initializer,
            });
        }

        match name {
            PropertyName::Identifier(name) => {
                let object_assignment_initializer = self.parse_initializer();
                ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                    data: self.finish(SyntaxKind::ShorthandPropertyAssignment, pos),
                    name,
                    object_assignment_initializer,
                })
            }
            name => {
                self.error(&messages::_0_EXPECTED, &[":"]);
                let initializer = self.missing_expression();
                let initializer = self.alloc(initializer);
                ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                    data: self.finish(SyntaxKind::PropertyAssignment, pos),
                    name,
                    initializer,
                })
            }
        }
    }
}

/// Scans past a balanced `( ... )` starting at the current `(` and reports
/// whether `=>` follows on the same line.
fn is_parenthesized_arrow_head(scanner: &mut Scanner) -> bool {
    let mut closers: Vec<SyntaxKind> = Vec::new();
    loop {
        match scanner.token() {
            SyntaxKind::OpenParenToken => closers.push(SyntaxKind::CloseParenToken),
            SyntaxKind::OpenBracketToken => closers.push(SyntaxKind::CloseBracketToken),
            SyntaxKind::OpenBraceToken => closers.push(SyntaxKind::CloseBraceToken),
            // A substitution is closed by `}` and resumes the template.
            SyntaxKind::TemplateHead => closers.push(SyntaxKind::TemplateTail),
            SyntaxKind::CloseBraceToken if closers.last() == Some(&SyntaxKind::TemplateTail) => {
                if scanner.rescan_template_token() != SyntaxKind::TemplateMiddle {
                    closers.pop();
                }
            }
            kind @ (SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CloseBraceToken) => {
                if closers.pop() != Some(kind) {
                    return false;
                }
                if closers.is_empty() {
                    break;
                }
            }
            SyntaxKind::EndOfFileToken => return false,
            _ => {}
        }
        scanner.scan();
    }
    scanner.scan() == SyntaxKind::EqualsGreaterThanToken && !scanner.has_preceding_line_break()
}

/// A unary operator applied without parentheses. Prefix `++`/`--` are update
/// expressions and may sit left of `**`.
fn is_unary_expression(expression: &Expression<'_>) -> bool {
    match expression {
        Expression::PrefixUnary(n) => {
            !matches!(n.operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken)
        }
        Expression::Delete(_) | Expression::TypeOf(_) | Expression::Void(_) | Expression::Await(_) => true,
        _ => false,
    }
}

fn is_valid_update_target(expression: &Expression<'_>) -> bool {
    match expression.skip_parentheses() {
        Expression::Identifier(_) | Expression::ElementAccess(_) => true,
        Expression::PropertyAccess(access) => {
            !access.data.flags.contains(NodeFlags::OPTIONAL_CHAIN)
        }
        _ => false,
    }
}

/// Identifiers and member accesses can be assigned with any operator;
/// unparenthesized object and array literals are destructuring targets
/// for plain `=`.
fn is_valid_assignment_target(expression: &Expression<'_>, operator: SyntaxKind) -> bool {
    match expression {
        Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_) => {
            operator == SyntaxKind::EqualsToken
        }
        other => is_valid_update_target(other),
    }
}
