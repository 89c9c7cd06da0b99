//! The binder implementation.
//!
//! Walks the AST, builds the scope chain, and resolves identifiers.
//! Handles:
//! - Symbol creation for all declarations
//! - Scope management (module, function, block, catch, loop heads)
//! - `var` hoisting to the nearest function scope, lexical hoisting to the
//!   enclosing block
//! - Reference classification (reads, and writes by form)
//! - Redeclaration errors for block-scoped names

use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::symbol::{Reference, ReferenceKind, Symbol, SymbolId, SymbolKind, WriteForm};
use rsignal_ast::node::*;
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::types::DeclarationKind;
use rsignal_core::intern::{InternedString, StringInterner};
use rsignal_core::text::{TextPos, TextRange};
use rsignal_diagnostics::{messages, Diagnostic, DiagnosticCollection};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, instrument};

/// The binder creates symbols and links every identifier occurrence to one.
pub struct Binder {
    interner: StringInterner,
    file_name: String,
    /// All symbols created during binding.
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
    current_scope: ScopeId,
    /// Declaring identifier position → symbol.
    declarations: FxHashMap<TextPos, SymbolId>,
    /// Every name declared or referenced anywhere in the module.
    names_in_use: FxHashSet<InternedString>,
    diagnostics: DiagnosticCollection,
}

impl Binder {
    pub fn new(interner: &StringInterner, file_name: &str) -> Self {
        Self {
            interner: interner.clone(),
            file_name: file_name.to_string(),
            symbols: Vec::new(),
            scopes: vec![Scope::new(ScopeKind::Module, None)],
            current_scope: ScopeId::new(0),
            declarations: FxHashMap::default(),
            names_in_use: FxHashSet::default(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Take diagnostics from the binder.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }

    /// The symbol whose declaring identifier starts at `pos`.
    pub fn symbol_declared_at(&self, pos: TextPos) -> Option<&Symbol> {
        self.declarations.get(&pos).map(|&id| self.symbol(id))
    }

    pub fn names_in_use(&self) -> &FxHashSet<InternedString> {
        &self.names_in_use
    }

    pub fn is_name_in_use(&self, name: &str) -> bool {
        self.interner
            .get(name)
            .is_some_and(|key| self.names_in_use.contains(&key))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    // ========================================================================
    // Source file binding
    // ========================================================================

    /// Bind a source file, creating symbols for all declarations.
    #[instrument(level = "debug", skip_all, fields(file = %source_file.file_name))]
    pub fn bind_source_file(&mut self, source_file: &SourceFile<'_>) {
        self.hoist_declarations(source_file.statements, true);
        for statement in source_file.statements.iter() {
            self.bind_statement(statement);
        }
        debug!(
            symbols = self.symbols.len(),
            scopes = self.scopes.len(),
            names = self.names_in_use.len(),
            "bound module"
        );
    }

    // ========================================================================
    // Hoisting
    // ========================================================================

    /// Declare the names a statement list introduces before any of it is
    /// bound. With `include_vars`, `var` declarations nested anywhere below
    /// (outside inner functions) are hoisted too.
    fn hoist_declarations(&mut self, statements: &[Statement<'_>], include_vars: bool) {
        for statement in statements {
            match statement {
                Statement::VariableStatement(n) => {
                    match n.declaration_list.declaration_kind() {
                        DeclarationKind::Var if include_vars => self.hoist_var_list(&n.declaration_list),
                        DeclarationKind::Var => {}
                        DeclarationKind::Let => self.declare_list(&n.declaration_list, SymbolKind::Let),
                        DeclarationKind::Const => {
                            self.declare_list(&n.declaration_list, SymbolKind::Const)
                        }
                    }
                }
                Statement::FunctionDeclaration(n) => {
                    if let Some(name) = &n.name {
                        self.declare(name, SymbolKind::Function);
                    }
                }
                Statement::ClassDeclaration(n) => {
                    if let Some(name) = &n.name {
                        self.declare(name, SymbolKind::Class);
                    }
                }
                Statement::ImportDeclaration(n) => self.declare_import(n),
                other if include_vars => self.hoist_vars(other),
                _ => {}
            }
        }
    }

    fn hoist_vars(&mut self, statement: &Statement<'_>) {
        match statement {
            Statement::VariableStatement(n) => {
                if n.declaration_list.declaration_kind() == DeclarationKind::Var {
                    self.hoist_var_list(&n.declaration_list);
                }
            }
            Statement::Block(n) => self.hoist_vars_in(n.statements),
            Statement::IfStatement(n) => {
                self.hoist_vars(n.then_statement);
                if let Some(else_statement) = n.else_statement {
                    self.hoist_vars(else_statement);
                }
            }
            Statement::DoStatement(n) => self.hoist_vars(n.statement),
            Statement::WhileStatement(n) => self.hoist_vars(n.statement),
            Statement::LabeledStatement(n) => self.hoist_vars(n.statement),
            Statement::ForStatement(n) => {
                if let Some(ForInitializer::VariableDeclarationList(list)) = &n.initializer {
                    self.hoist_var_list(list);
                }
                self.hoist_vars(n.statement);
            }
            Statement::ForInStatement(n) => {
                if let ForInitializer::VariableDeclarationList(list) = &n.initializer {
                    self.hoist_var_list(list);
                }
                self.hoist_vars(n.statement);
            }
            Statement::ForOfStatement(n) => {
                if let ForInitializer::VariableDeclarationList(list) = &n.initializer {
                    self.hoist_var_list(list);
                }
                self.hoist_vars(n.statement);
            }
            Statement::SwitchStatement(n) => {
                for clause in n.clauses.iter() {
                    self.hoist_vars_in(clause.statements);
                }
            }
            Statement::TryStatement(n) => {
                self.hoist_vars_in(n.try_block.statements);
                if let Some(catch_clause) = &n.catch_clause {
                    self.hoist_vars_in(catch_clause.block.statements);
                }
                if let Some(finally_block) = &n.finally_block {
                    self.hoist_vars_in(finally_block.statements);
                }
            }
            _ => {}
        }
    }

    fn hoist_vars_in(&mut self, statements: &[Statement<'_>]) {
        for statement in statements {
            self.hoist_vars(statement);
        }
    }

    fn hoist_var_list(&mut self, list: &VariableDeclarationList<'_>) {
        if list.declaration_kind() != DeclarationKind::Var {
            return;
        }
        let target = self.var_target_scope();
        for decl in list.declarations.iter() {
            decl.name.for_each_bound_identifier(&mut |id| {
                self.declare_in(target, id, SymbolKind::Var);
            });
        }
    }

    fn declare_list(&mut self, list: &VariableDeclarationList<'_>, kind: SymbolKind) {
        for decl in list.declarations.iter() {
            decl.name.for_each_bound_identifier(&mut |id| {
                self.declare(id, kind);
            });
        }
    }

    fn declare_import(&mut self, node: &ImportDeclaration<'_>) {
        let Some(clause) = &node.import_clause else {
            return;
        };
        if let Some(name) = &clause.name {
            self.declare(name, SymbolKind::Import);
        }
        match &clause.named_bindings {
            Some(NamedImportBindings::NamespaceImport(name)) => {
                self.declare(name, SymbolKind::Import);
            }
            Some(NamedImportBindings::NamedImports(specifiers)) => {
                for specifier in specifiers.iter() {
                    self.declare(&specifier.name, SymbolKind::Import);
                }
            }
            None => {}
        }
    }

    // ========================================================================
    // Statement binding
    // ========================================================================

    fn bind_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::VariableStatement(n) => self.bind_variable_declaration_list(&n.declaration_list),
            Statement::FunctionDeclaration(n) => self.bind_function_body(n.parameters, &n.body),
            Statement::ClassDeclaration(n) => self.bind_class(n),
            Statement::ImportDeclaration(_) => {}
            Statement::ExportDeclaration(n) => self.bind_export_declaration(n),
            Statement::ExportAssignment(n) => self.bind_expression(n.expression),
            Statement::Block(n) => self.bind_block(n),
            Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => {}
            Statement::ExpressionStatement(n) => self.bind_expression(n.expression),
            Statement::IfStatement(n) => {
                self.bind_expression(n.expression);
                self.bind_statement(n.then_statement);
                if let Some(else_statement) = n.else_statement {
                    self.bind_statement(else_statement);
                }
            }
            Statement::DoStatement(n) => {
                self.bind_statement(n.statement);
                self.bind_expression(n.expression);
            }
            Statement::WhileStatement(n) => {
                self.bind_expression(n.expression);
                self.bind_statement(n.statement);
            }
            Statement::ForStatement(n) => self.bind_for_statement(n),
            Statement::ForInStatement(n) => {
                self.bind_for_in_or_of(&n.initializer, n.expression, n.statement)
            }
            Statement::ForOfStatement(n) => {
                self.bind_for_in_or_of(&n.initializer, n.expression, n.statement)
            }
            Statement::ContinueStatement(_) | Statement::BreakStatement(_) => {}
            Statement::ReturnStatement(n) => {
                if let Some(expression) = n.expression {
                    self.bind_expression(expression);
                }
            }
            Statement::SwitchStatement(n) => self.bind_switch_statement(n),
            Statement::LabeledStatement(n) => self.bind_statement(n.statement),
            Statement::ThrowStatement(n) => self.bind_expression(n.expression),
            Statement::TryStatement(n) => self.bind_try_statement(n),
        }
    }

    fn bind_variable_declaration_list(&mut self, list: &VariableDeclarationList<'_>) {
        for decl in list.declarations.iter() {
            self.bind_binding_name_expressions(&decl.name);
            if let Some(initializer) = decl.initializer {
                self.bind_expression(initializer);
            }
        }
    }

    /// Bind the expressions inside a binding pattern: defaults and computed
    /// keys. The names themselves are declared separately.
    fn bind_binding_name_expressions(&mut self, name: &BindingName<'_>) {
        match name {
            BindingName::Identifier(id) => {
                self.names_in_use.insert(id.text);
            }
            BindingName::ObjectBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    if let Some(property_name) = &element.property_name {
                        self.bind_property_name(property_name);
                    }
                    self.bind_binding_name_expressions(&element.name);
                    if let Some(initializer) = element.initializer {
                        self.bind_expression(initializer);
                    }
                }
            }
            BindingName::ArrayBindingPattern(pattern) => {
                for element in pattern.elements.iter() {
                    if let ArrayBindingElement::BindingElement(element) = element {
                        self.bind_binding_name_expressions(&element.name);
                        if let Some(initializer) = element.initializer {
                            self.bind_expression(initializer);
                        }
                    }
                }
            }
        }
    }

    fn bind_block(&mut self, block: &Block<'_>) {
        self.push_scope(ScopeKind::Block);
        self.hoist_declarations(block.statements, false);
        for statement in block.statements.iter() {
            self.bind_statement(statement);
        }
        self.pop_scope();
    }

    fn bind_for_statement(&mut self, node: &ForStatement<'_>) {
        self.push_scope(ScopeKind::Block);
        match &node.initializer {
            Some(ForInitializer::VariableDeclarationList(list)) => {
                self.declare_loop_head(list);
                self.bind_variable_declaration_list(list);
            }
            Some(ForInitializer::Expression(expression)) => self.bind_expression(expression),
            None => {}
        }
        if let Some(condition) = node.condition {
            self.bind_expression(condition);
        }
        if let Some(incrementor) = node.incrementor {
            self.bind_expression(incrementor);
        }
        self.bind_statement(node.statement);
        self.pop_scope();
    }

    fn bind_for_in_or_of(
        &mut self,
        initializer: &ForInitializer<'_>,
        expression: &Expression<'_>,
        statement: &Statement<'_>,
    ) {
        self.push_scope(ScopeKind::Block);
        match initializer {
            ForInitializer::VariableDeclarationList(list) => {
                self.declare_loop_head(list);
                self.bind_variable_declaration_list(list);
            }
            ForInitializer::Expression(target) => {
                self.bind_assignment_target(target, WriteForm::ForInOf);
            }
        }
        self.bind_expression(expression);
        self.bind_statement(statement);
        self.pop_scope();
    }

    /// `let`/`const` in a loop head live in the loop's own scope; `var` was
    /// hoisted already.
    fn declare_loop_head(&mut self, list: &VariableDeclarationList<'_>) {
        match list.declaration_kind() {
            DeclarationKind::Var => {}
            DeclarationKind::Let => self.declare_list(list, SymbolKind::Let),
            DeclarationKind::Const => self.declare_list(list, SymbolKind::Const),
        }
    }

    fn bind_switch_statement(&mut self, node: &SwitchStatement<'_>) {
        self.bind_expression(node.expression);
        self.push_scope(ScopeKind::Block);
        for clause in node.clauses.iter() {
            self.hoist_declarations(clause.statements, false);
        }
        for clause in node.clauses.iter() {
            if let Some(expression) = clause.expression {
                self.bind_expression(expression);
            }
            for statement in clause.statements.iter() {
                self.bind_statement(statement);
            }
        }
        self.pop_scope();
    }

    fn bind_try_statement(&mut self, node: &TryStatement<'_>) {
        self.bind_block(&node.try_block);
        if let Some(catch_clause) = &node.catch_clause {
            self.push_scope(ScopeKind::Catch);
            if let Some(variable) = &catch_clause.variable_declaration {
                variable.for_each_bound_identifier(&mut |id| {
                    self.declare(id, SymbolKind::CatchVariable);
                });
                self.bind_binding_name_expressions(variable);
            }
            self.bind_block(&catch_clause.block);
            self.pop_scope();
        }
        if let Some(finally_block) = &node.finally_block {
            self.bind_block(finally_block);
        }
    }

    fn bind_export_declaration(&mut self, node: &ExportDeclaration<'_>) {
        // Local names exported without a module specifier keep their
        // bindings alive; they are names in use but not rewritable reads.
        if node.module_specifier.is_some() {
            return;
        }
        if let Some(NamedExportBindings::NamedExports(specifiers)) = &node.export_clause {
            for specifier in specifiers.iter() {
                let local = specifier.property_name.as_ref().unwrap_or(&specifier.name);
                self.names_in_use.insert(local.text);
            }
        }
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    fn bind_function_body(&mut self, parameters: &[ParameterDeclaration<'_>], body: &Block<'_>) {
        self.push_scope(ScopeKind::Function);
        self.bind_parameters(parameters);
        self.hoist_declarations(body.statements, true);
        for statement in body.statements.iter() {
            self.bind_statement(statement);
        }
        self.pop_scope();
    }

    fn bind_parameters(&mut self, parameters: &[ParameterDeclaration<'_>]) {
        for parameter in parameters {
            parameter.name.for_each_bound_identifier(&mut |id| {
                self.declare(id, SymbolKind::Parameter);
            });
        }
        for parameter in parameters {
            self.bind_binding_name_expressions(&parameter.name);
            if let Some(initializer) = parameter.initializer {
                self.bind_expression(initializer);
            }
        }
    }

    fn bind_function_expression(&mut self, node: &FunctionLikeDeclaration<'_>) {
        match &node.name {
            Some(name) => {
                self.push_scope(ScopeKind::ExpressionName);
                self.declare(name, SymbolKind::Function);
                self.bind_function_body(node.parameters, &node.body);
                self.pop_scope();
            }
            None => self.bind_function_body(node.parameters, &node.body),
        }
    }

    fn bind_arrow_function(&mut self, node: &ArrowFunction<'_>) {
        match &node.body {
            ConciseBody::Block(body) => self.bind_function_body(node.parameters, body),
            ConciseBody::Expression(body) => {
                self.push_scope(ScopeKind::Function);
                self.bind_parameters(node.parameters);
                self.bind_expression(body);
                self.pop_scope();
            }
        }
    }

    fn bind_class(&mut self, node: &ClassLikeDeclaration<'_>) {
        if let Some(heritage) = node.heritage {
            self.bind_expression(heritage);
        }
        let named_expression = node.data.kind == SyntaxKind::ClassExpression && node.name.is_some();
        if named_expression {
            self.push_scope(ScopeKind::ExpressionName);
            if let Some(name) = &node.name {
                self.declare(name, SymbolKind::Class);
            }
        }

        for member in node.members.iter() {
            match member {
                ClassElement::Property(property) => {
                    self.bind_property_name(&property.name);
                    if let Some(initializer) = property.initializer {
                        self.bind_expression(initializer);
                    }
                }
                ClassElement::Method(method) => self.bind_method(method),
                ClassElement::StaticBlock(block) => self.bind_function_body(&[], &block.body),
                ClassElement::Semicolon(_) => {}
            }
        }

        if named_expression {
            self.pop_scope();
        }
    }

    fn bind_method(&mut self, node: &MethodDeclaration<'_>) {
        self.bind_property_name(&node.name);
        self.bind_function_body(node.parameters, &node.body);
    }

    fn bind_property_name(&mut self, name: &PropertyName<'_>) {
        if let PropertyName::Computed(computed) = name {
            self.bind_expression(computed.expression);
        }
    }

    // ========================================================================
    // Expression binding
    // ========================================================================

    fn bind_expression(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Identifier(id) => self.record_read(id, None, false),
            Expression::PrivateIdentifier(_)
            | Expression::StringLiteral(_)
            | Expression::NumericLiteral(_)
            | Expression::BigIntLiteral(_)
            | Expression::RegularExpressionLiteral(_)
            | Expression::NoSubstitutionTemplateLiteral(_)
            | Expression::OmittedExpression(_)
            | Expression::MetaProperty(_)
            | Expression::ThisKeyword(_)
            | Expression::SuperKeyword(_)
            | Expression::NullKeyword(_)
            | Expression::TrueKeyword(_)
            | Expression::FalseKeyword(_)
            | Expression::ImportKeyword(_) => {}
            Expression::TemplateExpression(n) => {
                for span in n.template_spans.iter() {
                    self.bind_expression(span.expression);
                }
            }
            Expression::ArrayLiteral(n) => {
                for element in n.elements.iter() {
                    self.bind_expression(element);
                }
            }
            Expression::ObjectLiteral(n) => {
                for property in n.properties.iter() {
                    match property {
                        ObjectLiteralElement::PropertyAssignment(p) => {
                            self.bind_property_name(&p.name);
                            self.bind_expression(p.initializer);
                        }
                        ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                            self.record_read(&p.name, None, true);
                            if let Some(initializer) = p.object_assignment_initializer {
                                self.bind_expression(initializer);
                            }
                        }
                        ObjectLiteralElement::SpreadAssignment(p) => self.bind_expression(p.expression),
                        ObjectLiteralElement::Method(m) => self.bind_method(m),
                    }
                }
            }
            Expression::PropertyAccess(n) => self.bind_expression(n.expression),
            Expression::ElementAccess(n) => {
                self.bind_expression(n.expression);
                self.bind_expression(n.argument_expression);
            }
            Expression::Call(n) => {
                self.bind_expression(n.expression);
                let callee = n.callee_identifier().map(|id| id.text);
                for argument in n.arguments.iter() {
                    match argument.skip_parentheses() {
                        Expression::Identifier(id) => self.record_read(id, callee, false),
                        other => self.bind_expression(other),
                    }
                }
            }
            Expression::New(n) => {
                self.bind_expression(n.expression);
                for argument in n.arguments.unwrap_or_default().iter() {
                    self.bind_expression(argument);
                }
            }
            Expression::TaggedTemplate(n) => {
                self.bind_expression(n.tag);
                self.bind_expression(n.template);
            }
            Expression::Parenthesized(n) => self.bind_expression(n.expression),
            Expression::FunctionExpression(n) => self.bind_function_expression(n),
            Expression::ArrowFunction(n) => self.bind_arrow_function(n),
            Expression::ClassExpression(n) => self.bind_class(n),
            Expression::Delete(n) => self.bind_expression(n.expression),
            Expression::TypeOf(n) => self.bind_expression(n.expression),
            Expression::Void(n) => self.bind_expression(n.expression),
            Expression::Await(n) => self.bind_expression(n.expression),
            Expression::Spread(n) => self.bind_expression(n.expression),
            Expression::Yield(n) => {
                if let Some(expression) = n.expression {
                    self.bind_expression(expression);
                }
            }
            Expression::PrefixUnary(n) => {
                self.bind_update_operand(n.operator, n.operand, true, n.data.range)
            }
            Expression::PostfixUnary(n) => {
                self.bind_update_operand(n.operator, n.operand, false, n.data.range)
            }
            Expression::Binary(n) if n.operator.is_assignment_operator() => {
                self.bind_assignment(n)
            }
            Expression::Binary(n) => {
                self.bind_expression(n.left);
                self.bind_expression(n.right);
            }
            Expression::Conditional(n) => {
                self.bind_expression(n.condition);
                self.bind_expression(n.when_true);
                self.bind_expression(n.when_false);
            }
        }
    }

    fn bind_update_operand(
        &mut self,
        operator: SyntaxKind,
        operand: &Expression<'_>,
        prefix: bool,
        range: TextRange,
    ) {
        let is_update = matches!(operator, SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken);
        match operand.skip_parentheses() {
            Expression::Identifier(id) if is_update => {
                self.record_write(id, WriteForm::Update { operator, prefix }, range)
            }
            _ => self.bind_expression(operand),
        }
    }

    fn bind_assignment(&mut self, node: &BinaryExpression<'_>) {
        let target = node.left.skip_parentheses();
        match target {
            Expression::Identifier(id) => {
                let form = match node.operator.compound_assignment_operator() {
                    Some(operator) => WriteForm::Compound(operator),
                    None => WriteForm::Assignment,
                };
                self.record_write(id, form, node.data.range);
            }
            Expression::ObjectLiteral(_) | Expression::ArrayLiteral(_)
                if node.operator == SyntaxKind::EqualsToken =>
            {
                self.bind_assignment_target(target, WriteForm::Destructuring)
            }
            _ => self.bind_expression(node.left),
        }
        self.bind_expression(node.right);
    }

    /// Bind an assignment target: identifiers become writes of `form`, nested
    /// patterns are destructuring writes, member targets are plain reads of
    /// their object.
    fn bind_assignment_target(&mut self, target: &Expression<'_>, form: WriteForm) {
        match target {
            Expression::Identifier(id) => self.record_write(id, form, id.data.range),
            Expression::Parenthesized(n) => self.bind_assignment_target(n.expression, form),
            Expression::ArrayLiteral(n) => {
                for element in n.elements.iter() {
                    self.bind_assignment_target(element, WriteForm::Destructuring);
                }
            }
            Expression::ObjectLiteral(n) => {
                for property in n.properties.iter() {
                    match property {
                        ObjectLiteralElement::PropertyAssignment(p) => {
                            self.bind_property_name(&p.name);
                            self.bind_assignment_target(p.initializer, WriteForm::Destructuring);
                        }
                        ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                            self.record_write(&p.name, WriteForm::Destructuring, p.name.data.range);
                            if let Some(initializer) = p.object_assignment_initializer {
                                self.bind_expression(initializer);
                            }
                        }
                        ObjectLiteralElement::SpreadAssignment(p) => {
                            self.bind_assignment_target(p.expression, WriteForm::Destructuring)
                        }
                        ObjectLiteralElement::Method(m) => self.bind_method(m),
                    }
                }
            }
            Expression::Spread(n) => self.bind_assignment_target(n.expression, WriteForm::Destructuring),
            Expression::Binary(n) if n.operator == SyntaxKind::EqualsToken => {
                self.bind_assignment_target(n.left, WriteForm::Destructuring);
                self.bind_expression(n.right);
            }
            Expression::OmittedExpression(_) => {}
            other => self.bind_expression(other),
        }
    }

    // ========================================================================
    // Symbols and references
    // ========================================================================

    fn record_read(&mut self, id: &Identifier, call_callee: Option<InternedString>, shorthand: bool) {
        self.record(
            id,
            Reference {
                range: id.data.range,
                kind: ReferenceKind::Read,
                expression_range: id.data.range,
                call_callee,
                shorthand,
            },
        );
    }

    fn record_write(&mut self, id: &Identifier, form: WriteForm, expression_range: TextRange) {
        self.record(
            id,
            Reference {
                range: id.data.range,
                kind: ReferenceKind::Write(form),
                expression_range,
                call_callee: None,
                shorthand: false,
            },
        );
    }

    fn record(&mut self, id: &Identifier, reference: Reference) {
        self.names_in_use.insert(id.text);
        if let Some(symbol) = self.resolve(id.text) {
            self.symbols[symbol.index()].references.push(reference);
        }
    }

    /// Resolve a name through the scope chain, innermost first.
    pub fn resolve(&self, name: InternedString) -> Option<SymbolId> {
        let mut scope = Some(self.current_scope);
        while let Some(id) = scope {
            let current = &self.scopes[id.index()];
            if let Some(&symbol) = current.names.get(&name) {
                return Some(symbol);
            }
            scope = current.parent;
        }
        None
    }

    fn declare(&mut self, name: &Identifier, kind: SymbolKind) -> SymbolId {
        self.declare_in(self.current_scope, name, kind)
    }

    fn declare_in(&mut self, scope: ScopeId, name: &Identifier, kind: SymbolKind) -> SymbolId {
        self.names_in_use.insert(name.text);
        if let Some(&existing) = self.scopes[scope.index()].names.get(&name.text) {
            let existing_kind = self.symbols[existing.index()].kind;
            if kind.is_block_scoped() || existing_kind.is_block_scoped() {
                let text = self.interner.resolve(name.text).to_string();
                self.diagnostics.add(Diagnostic::with_location(
                    self.file_name.clone(),
                    name.data.range.to_span(),
                    &messages::CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0,
                    &[&text],
                ));
            }
            self.declarations.insert(name.data.range.pos, existing);
            return existing;
        }

        let id = SymbolId::new(self.symbols.len());
        self.symbols.push(Symbol::new(id, name.text, kind, name.data.range));
        self.scopes[scope.index()].names.insert(name.text, id);
        self.declarations.insert(name.data.range.pos, id);
        id
    }

    // ========================================================================
    // Scope management
    // ========================================================================

    fn push_scope(&mut self, kind: ScopeKind) {
        let id = ScopeId::new(self.scopes.len());
        self.scopes.push(Scope::new(kind, Some(self.current_scope)));
        self.current_scope = id;
    }

    fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current_scope.index()].parent {
            self.current_scope = parent;
        }
    }

    fn var_target_scope(&self) -> ScopeId {
        let mut id = self.current_scope;
        loop {
            let scope = &self.scopes[id.index()];
            match scope.parent {
                Some(parent) if !scope.is_var_target() => id = parent,
                _ => return id,
            }
        }
    }
}
