//! Applies a [`RewritePlan`] to a module.
//!
//! The rewriter is a fold: it rebuilds the tree bottom-up in the arena,
//! replacing the nodes the plan names and sharing every subtree that
//! contains no edit. The parsed tree is never mutated.

use crate::plan::{ReadEdit, RewritePlan, SetterValue, WriteEdit};
use rsignal_ast::node::*;
use rsignal_ast::{NodeFactory, SyntaxKind};
use rsignal_core::text::{TextPos, TextRange};

pub struct Rewriter<'p, 'a> {
    plan: &'p RewritePlan,
    factory: &'p NodeFactory<'a>,
    positions: Vec<TextPos>,
}

impl<'p, 'a> Rewriter<'p, 'a> {
    pub fn new(plan: &'p RewritePlan, factory: &'p NodeFactory<'a>) -> Self {
        Self {
            plan,
            factory,
            positions: plan.edit_positions(),
        }
    }

    /// Rewrite the top-level statements, stripping macro imports and placing
    /// `prelude` right after the directive prologue.
    pub fn rewrite_module(
        &self,
        statements: &'a [Statement<'a>],
        prelude: Vec<Statement<'a>>,
    ) -> &'a [Statement<'a>] {
        let directives = statements.iter().take_while(|stmt| is_directive(stmt)).count();
        let mut result = Vec::with_capacity(statements.len() + prelude.len());
        result.extend(statements[..directives].iter().cloned());
        result.extend(prelude);
        for stmt in statements[directives..].iter() {
            match stmt {
                Statement::ImportDeclaration(import) if self.plan.is_stripped_import(import.data.range) => {
                    if let Some(kept) = self.strip_import(import) {
                        result.push(Statement::ImportDeclaration(kept));
                    }
                }
                _ => result.push(self.statement(stmt)),
            }
        }
        self.factory.alloc_slice(result)
    }

    /// Whether any edit lies inside `range`.
    fn touches(&self, range: TextRange) -> bool {
        let index = self.positions.partition_point(|&pos| pos < range.pos);
        index < self.positions.len() && self.positions[index] < range.end
    }

    fn strip_import(&self, import: &'a ImportDeclaration<'a>) -> Option<ImportDeclaration<'a>> {
        let clause = import.import_clause.as_ref()?;
        let Some(NamedImportBindings::NamedImports(specifiers)) = &clause.named_bindings else {
            return Some(import.clone());
        };
        let kept: Vec<ImportSpecifier> = specifiers
            .iter()
            .filter(|s| !self.plan.is_stripped_name(s.name.text))
            .cloned()
            .collect();
        if kept.is_empty() && clause.name.is_none() {
            return None;
        }
        let named_bindings = if kept.is_empty() {
            None
        } else {
            Some(NamedImportBindings::NamedImports(self.factory.alloc_slice(kept)))
        };
        Some(ImportDeclaration {
            data: import.data.clone(),
            import_clause: Some(ImportClause {
                data: clause.data.clone(),
                name: clause.name.clone(),
                named_bindings,
            }),
            module_specifier: import.module_specifier.clone(),
        })
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn statements(&self, list: &'a [Statement<'a>]) -> &'a [Statement<'a>] {
        if !list.iter().any(|s| self.touches(s.range())) {
            return list;
        }
        self.factory
            .alloc_slice(list.iter().map(|s| self.statement(s)).collect())
    }

    fn boxed_statement(&self, stmt: &'a Statement<'a>) -> &'a Statement<'a> {
        if !self.touches(stmt.range()) {
            return stmt;
        }
        self.factory.alloc(self.statement(stmt))
    }

    fn statement(&self, stmt: &'a Statement<'a>) -> Statement<'a> {
        if !self.touches(stmt.range()) {
            return stmt.clone();
        }
        match stmt {
            Statement::VariableStatement(n) => Statement::VariableStatement(VariableStatement {
                data: n.data.clone(),
                declaration_list: self.declaration_list(&n.declaration_list),
            }),
            Statement::FunctionDeclaration(n) => Statement::FunctionDeclaration(self.function(n)),
            Statement::ClassDeclaration(n) => Statement::ClassDeclaration(self.class(n)),
            Statement::ExportAssignment(n) => Statement::ExportAssignment(ExportAssignment {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Statement::Block(n) => Statement::Block(self.block(n)),
            Statement::ExpressionStatement(n) => Statement::ExpressionStatement(ExpressionStatement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Statement::IfStatement(n) => Statement::IfStatement(IfStatement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                then_statement: self.boxed_statement(n.then_statement),
                else_statement: n.else_statement.map(|s| self.boxed_statement(s)),
            }),
            Statement::DoStatement(n) => Statement::DoStatement(DoStatement {
                data: n.data.clone(),
                statement: self.boxed_statement(n.statement),
                expression: self.expression(n.expression),
            }),
            Statement::WhileStatement(n) => Statement::WhileStatement(WhileStatement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                statement: self.boxed_statement(n.statement),
            }),
            Statement::ForStatement(n) => Statement::ForStatement(ForStatement {
                data: n.data.clone(),
                initializer: n.initializer.as_ref().map(|i| self.for_initializer(i)),
                condition: n.condition.map(|e| self.expression(e)),
                incrementor: n.incrementor.map(|e| self.expression(e)),
                statement: self.boxed_statement(n.statement),
            }),
            Statement::ForInStatement(n) => Statement::ForInStatement(ForInStatement {
                data: n.data.clone(),
                initializer: self.for_initializer(&n.initializer),
                expression: self.expression(n.expression),
                statement: self.boxed_statement(n.statement),
            }),
            Statement::ForOfStatement(n) => Statement::ForOfStatement(ForOfStatement {
                data: n.data.clone(),
                initializer: self.for_initializer(&n.initializer),
                expression: self.expression(n.expression),
                statement: self.boxed_statement(n.statement),
            }),
            Statement::ReturnStatement(n) => Statement::ReturnStatement(ReturnStatement {
                data: n.data.clone(),
                expression: n.expression.map(|e| self.expression(e)),
            }),
            Statement::SwitchStatement(n) => Statement::SwitchStatement(SwitchStatement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                clauses: self.factory.alloc_slice(
                    n.clauses
                        .iter()
                        .map(|clause| CaseClause {
                            data: clause.data.clone(),
                            expression: clause.expression.map(|e| self.expression(e)),
                            statements: self.statements(clause.statements),
                        })
                        .collect(),
                ),
            }),
            Statement::LabeledStatement(n) => Statement::LabeledStatement(LabeledStatement {
                data: n.data.clone(),
                label: n.label.clone(),
                statement: self.boxed_statement(n.statement),
            }),
            Statement::ThrowStatement(n) => Statement::ThrowStatement(ThrowStatement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Statement::TryStatement(n) => Statement::TryStatement(TryStatement {
                data: n.data.clone(),
                try_block: self.block(&n.try_block),
                catch_clause: n.catch_clause.as_ref().map(|catch| CatchClause {
                    data: catch.data.clone(),
                    variable_declaration: catch
                        .variable_declaration
                        .as_ref()
                        .map(|name| self.binding_name(name)),
                    block: self.block(&catch.block),
                }),
                finally_block: n.finally_block.as_ref().map(|b| self.block(b)),
            }),
            Statement::ImportDeclaration(_)
            | Statement::ExportDeclaration(_)
            | Statement::EmptyStatement(_)
            | Statement::ContinueStatement(_)
            | Statement::BreakStatement(_)
            | Statement::DebuggerStatement(_) => stmt.clone(),
        }
    }

    fn block(&self, block: &'a Block<'a>) -> Block<'a> {
        Block {
            data: block.data.clone(),
            statements: self.statements(block.statements),
        }
    }

    fn for_initializer(&self, init: &'a ForInitializer<'a>) -> ForInitializer<'a> {
        match init {
            ForInitializer::VariableDeclarationList(list) => {
                ForInitializer::VariableDeclarationList(self.declaration_list(list))
            }
            ForInitializer::Expression(expr) => ForInitializer::Expression(self.expression(expr)),
        }
    }

    fn declaration_list(&self, list: &'a VariableDeclarationList<'a>) -> VariableDeclarationList<'a> {
        if !self.touches(list.data.range) {
            return list.clone();
        }
        let declarations = self.factory.alloc_slice(
            list.declarations
                .iter()
                .map(|decl| VariableDeclaration {
                    data: decl.data.clone(),
                    name: self.binding_name(&decl.name),
                    initializer: decl.initializer.map(|e| self.expression(e)),
                })
                .collect(),
        );
        if self.plan.is_const_declaration(list.data.range) {
            self.factory.as_const_declaration_list(list, declarations)
        } else {
            VariableDeclarationList {
                data: list.data.clone(),
                declarations,
            }
        }
    }

    // ========================================================================
    // Bindings, functions, classes
    // ========================================================================

    fn binding_name(&self, name: &'a BindingName<'a>) -> BindingName<'a> {
        if !self.touches(name.range()) {
            return name.clone();
        }
        match name {
            BindingName::Identifier(_) => name.clone(),
            BindingName::ObjectBindingPattern(pattern) => {
                BindingName::ObjectBindingPattern(self.factory.alloc(ObjectBindingPattern {
                    data: pattern.data.clone(),
                    elements: self.factory.alloc_slice(
                        pattern.elements.iter().map(|e| self.binding_element(e)).collect(),
                    ),
                }))
            }
            BindingName::ArrayBindingPattern(pattern) => {
                BindingName::ArrayBindingPattern(self.factory.alloc(ArrayBindingPattern {
                    data: pattern.data.clone(),
                    elements: self.factory.alloc_slice(
                        pattern
                            .elements
                            .iter()
                            .map(|element| match element {
                                ArrayBindingElement::BindingElement(e) => {
                                    ArrayBindingElement::BindingElement(self.binding_element(e))
                                }
                                ArrayBindingElement::OmittedExpression(_) => element.clone(),
                            })
                            .collect(),
                    ),
                }))
            }
        }
    }

    fn binding_element(&self, element: &'a BindingElement<'a>) -> BindingElement<'a> {
        BindingElement {
            data: element.data.clone(),
            dot_dot_dot: element.dot_dot_dot,
            property_name: element.property_name.as_ref().map(|p| self.property_name(p)),
            name: self.binding_name(&element.name),
            initializer: element.initializer.map(|e| self.expression(e)),
        }
    }

    fn parameters(&self, params: &'a [ParameterDeclaration<'a>]) -> &'a [ParameterDeclaration<'a>] {
        if !params.iter().any(|p| self.touches(p.data.range)) {
            return params;
        }
        self.factory.alloc_slice(
            params
                .iter()
                .map(|param| ParameterDeclaration {
                    data: param.data.clone(),
                    dot_dot_dot: param.dot_dot_dot,
                    name: self.binding_name(&param.name),
                    initializer: param.initializer.map(|e| self.expression(e)),
                })
                .collect(),
        )
    }

    fn property_name(&self, name: &'a PropertyName<'a>) -> PropertyName<'a> {
        match name {
            PropertyName::Computed(computed) if self.touches(computed.data.range) => {
                PropertyName::Computed(ComputedPropertyName {
                    data: computed.data.clone(),
                    expression: self.expression(computed.expression),
                })
            }
            _ => name.clone(),
        }
    }

    fn function(&self, function: &'a FunctionLikeDeclaration<'a>) -> FunctionLikeDeclaration<'a> {
        FunctionLikeDeclaration {
            data: function.data.clone(),
            name: function.name.clone(),
            parameters: self.parameters(function.parameters),
            body: self.block(&function.body),
        }
    }

    fn method(&self, method: &'a MethodDeclaration<'a>) -> MethodDeclaration<'a> {
        MethodDeclaration {
            data: method.data.clone(),
            name: self.property_name(&method.name),
            parameters: self.parameters(method.parameters),
            body: self.block(&method.body),
        }
    }

    fn class(&self, class: &'a ClassLikeDeclaration<'a>) -> ClassLikeDeclaration<'a> {
        let members = self.factory.alloc_slice(
            class
                .members
                .iter()
                .map(|member| match member {
                    ClassElement::Property(prop) => ClassElement::Property(PropertyDeclaration {
                        data: prop.data.clone(),
                        name: self.property_name(&prop.name),
                        initializer: prop.initializer.map(|e| self.expression(e)),
                    }),
                    ClassElement::Method(method) => ClassElement::Method(self.method(method)),
                    ClassElement::StaticBlock(block) => {
                        ClassElement::StaticBlock(ClassStaticBlockDeclaration {
                            data: block.data.clone(),
                            body: self.block(&block.body),
                        })
                    }
                    ClassElement::Semicolon(_) => member.clone(),
                })
                .collect(),
        );
        ClassLikeDeclaration {
            data: class.data.clone(),
            name: class.name.clone(),
            heritage: class.heritage.map(|e| self.expression(e)),
            members,
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn expressions(&self, list: &'a [Expression<'a>]) -> &'a [Expression<'a>] {
        if !list.iter().any(|e| self.touches(e.range())) {
            return list;
        }
        self.factory
            .alloc_slice(list.iter().map(|e| self.expression(e).clone()).collect())
    }

    fn expression(&self, expr: &'a Expression<'a>) -> &'a Expression<'a> {
        if !self.touches(expr.range()) {
            return expr;
        }
        let rewritten = match expr {
            Expression::Identifier(id) => match self.plan.read(id.data.range) {
                Some(edit) => return self.read(edit, id.data.range),
                None => return expr,
            },
            Expression::TemplateExpression(n) => Expression::TemplateExpression(TemplateExpression {
                data: n.data.clone(),
                head: n.head,
                template_spans: self.factory.alloc_slice(
                    n.template_spans
                        .iter()
                        .map(|span| TemplateSpan {
                            data: span.data.clone(),
                            expression: self.expression(span.expression),
                            literal: span.literal,
                        })
                        .collect(),
                ),
            }),
            Expression::ArrayLiteral(n) => Expression::ArrayLiteral(ArrayLiteralExpression {
                data: n.data.clone(),
                elements: self.expressions(n.elements),
            }),
            Expression::ObjectLiteral(n) => Expression::ObjectLiteral(ObjectLiteralExpression {
                data: n.data.clone(),
                properties: self.factory.alloc_slice(
                    n.properties.iter().map(|p| self.object_element(p)).collect(),
                ),
            }),
            Expression::PropertyAccess(n) => Expression::PropertyAccess(PropertyAccessExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                name: n.name.clone(),
            }),
            Expression::ElementAccess(n) => Expression::ElementAccess(ElementAccessExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                argument_expression: self.expression(n.argument_expression),
            }),
            Expression::Call(n) => return self.call(n),
            Expression::New(n) => Expression::New(NewExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
                arguments: n.arguments.map(|args| self.expressions(args)),
            }),
            Expression::TaggedTemplate(n) => Expression::TaggedTemplate(TaggedTemplateExpression {
                data: n.data.clone(),
                tag: self.expression(n.tag),
                template: self.expression(n.template),
            }),
            Expression::Parenthesized(n) => Expression::Parenthesized(ParenthesizedExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Expression::FunctionExpression(n) => Expression::FunctionExpression(self.function(n)),
            Expression::ArrowFunction(n) => Expression::ArrowFunction(ArrowFunction {
                data: n.data.clone(),
                parameters: self.parameters(n.parameters),
                body: match &n.body {
                    ConciseBody::Block(block) => ConciseBody::Block(self.block(block)),
                    ConciseBody::Expression(e) => ConciseBody::Expression(self.expression(e)),
                },
            }),
            Expression::ClassExpression(n) => Expression::ClassExpression(self.class(n)),
            Expression::Delete(n) => Expression::Delete(DeleteExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Expression::TypeOf(n) => Expression::TypeOf(TypeOfExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Expression::Void(n) => Expression::Void(VoidExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Expression::Await(n) => Expression::Await(AwaitExpression {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            Expression::PrefixUnary(n) => match self.plan.write(n.data.range) {
                Some(edit) => return self.write(edit, None, n.data.range),
                None => Expression::PrefixUnary(PrefixUnaryExpression {
                    data: n.data.clone(),
                    operator: n.operator,
                    operand: self.expression(n.operand),
                }),
            },
            Expression::PostfixUnary(n) => match self.plan.write(n.data.range) {
                Some(edit) => return self.write(edit, None, n.data.range),
                None => Expression::PostfixUnary(PostfixUnaryExpression {
                    data: n.data.clone(),
                    operand: self.expression(n.operand),
                    operator: n.operator,
                }),
            },
            Expression::Binary(n) => match self.plan.write(n.data.range) {
                Some(edit) => return self.write(edit, Some(self.expression(n.right)), n.data.range),
                None => Expression::Binary(BinaryExpression {
                    data: n.data.clone(),
                    left: self.expression(n.left),
                    operator: n.operator,
                    right: self.expression(n.right),
                }),
            },
            Expression::Conditional(n) => Expression::Conditional(ConditionalExpression {
                data: n.data.clone(),
                condition: self.expression(n.condition),
                when_true: self.expression(n.when_true),
                when_false: self.expression(n.when_false),
            }),
            Expression::Yield(n) => Expression::Yield(YieldExpression {
                data: n.data.clone(),
                expression: n.expression.map(|e| self.expression(e)),
            }),
            Expression::Spread(n) => Expression::Spread(SpreadElement {
                data: n.data.clone(),
                expression: self.expression(n.expression),
            }),
            _ => return expr,
        };
        self.factory.alloc(rewritten)
    }

    fn object_element(&self, element: &'a ObjectLiteralElement<'a>) -> ObjectLiteralElement<'a> {
        match element {
            ObjectLiteralElement::PropertyAssignment(p) => {
                ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                    data: p.data.clone(),
                    name: self.property_name(&p.name),
                    initializer: self.expression(p.initializer),
                })
            }
            // `{ count }` keeps its key: `{ count: count[0]() }`.
            ObjectLiteralElement::ShorthandPropertyAssignment(p) => match self.plan.read(p.name.data.range) {
                Some(edit) => ObjectLiteralElement::PropertyAssignment(PropertyAssignment {
                    data: NodeData::synthesized(SyntaxKind::PropertyAssignment, p.data.range),
                    name: PropertyName::Identifier(p.name.clone()),
                    initializer: self.read(edit, p.name.data.range),
                }),
                None => ObjectLiteralElement::ShorthandPropertyAssignment(ShorthandPropertyAssignment {
                    data: p.data.clone(),
                    name: p.name.clone(),
                    object_assignment_initializer: p.object_assignment_initializer.map(|e| self.expression(e)),
                }),
            },
            ObjectLiteralElement::SpreadAssignment(p) => ObjectLiteralElement::SpreadAssignment(SpreadAssignment {
                data: p.data.clone(),
                expression: self.expression(p.expression),
            }),
            ObjectLiteralElement::Method(m) => ObjectLiteralElement::Method(self.method(m)),
        }
    }

    fn call(&self, call: &'a CallExpression<'a>) -> &'a Expression<'a> {
        let range = call.data.range;
        let Some(edit) = self.plan.marker(range) else {
            return self.factory.alloc(Expression::Call(CallExpression {
                data: call.data.clone(),
                expression: self.expression(call.expression),
                arguments: self.expressions(call.arguments),
            }));
        };
        let callee = self.factory.identifier_expression(edit.alias, call.expression.range());
        let arguments = call
            .arguments
            .iter()
            .enumerate()
            .map(|(index, arg)| {
                let rewritten = self.expression(arg);
                if index == 0 && edit.thunk_argument {
                    self.factory.thunk(rewritten, arg.range()).clone()
                } else {
                    rewritten.clone()
                }
            })
            .collect();
        self.factory.call(callee, arguments, range)
    }

    // ========================================================================
    // Synthesized replacements
    // ========================================================================

    fn read(&self, edit: ReadEdit, range: TextRange) -> &'a Expression<'a> {
        let f = self.factory;
        match edit {
            ReadEdit::SignalGetter(name) => {
                let pair = f.identifier_expression(name, range);
                f.call(f.element_access(pair, 0, range), Vec::new(), range)
            }
            ReadEdit::SignalAccessor(name) => {
                f.element_access(f.identifier_expression(name, range), 0, range)
            }
            ReadEdit::MemoGetter(name) => {
                f.call(f.identifier_expression(name, range), Vec::new(), range)
            }
        }
    }

    /// `x[1](...)`. `value` is the already rewritten right-hand side of an
    /// assignment; updates have none.
    fn write(
        &self,
        edit: WriteEdit,
        value: Option<&'a Expression<'a>>,
        range: TextRange,
    ) -> &'a Expression<'a> {
        let f = self.factory;
        let pair = f.identifier_expression(edit.name, range);
        let current = || f.call(f.element_access(pair, 0, range), Vec::new(), range);
        let argument = match edit.value {
            SetterValue::Assign => value.unwrap_or_else(current),
            SetterValue::Combine(operator) => {
                f.binary(current(), operator, value.unwrap_or_else(current), range)
            }
            SetterValue::Step(operator) => {
                f.binary(current(), operator, f.numeric_literal(1, range), range)
            }
        };
        f.call(f.element_access(pair, 1, range), vec![argument.clone()], range)
    }
}

/// `'use strict'` and friends: a bare string literal statement at the top of
/// the module.
fn is_directive(stmt: &Statement<'_>) -> bool {
    matches!(
        stmt,
        Statement::ExpressionStatement(n) if matches!(n.expression, Expression::StringLiteral(_))
    )
}
