//! AST visitor trait for traversing the syntax tree.
//!
//! Visits borrow nodes for the arena lifetime `'a`, so an implementation may
//! keep references to the nodes it sees after the walk is over.

use crate::node::*;

/// A visitor over the AST. Default implementations walk into children in
/// source order; override a method to intercept a node kind and call the
/// matching `walk_*` function to continue into its children.
pub trait AstVisitor<'a> {
    fn visit_source_file(&mut self, node: &SourceFile<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_statement(&mut self, stmt: &'a Statement<'a>) {
        walk_statement(self, stmt);
    }

    fn visit_variable_declaration_list(&mut self, node: &'a VariableDeclarationList<'a>) {
        for decl in node.declarations.iter() {
            self.visit_variable_declaration(decl);
        }
    }

    fn visit_variable_declaration(&mut self, node: &'a VariableDeclaration<'a>) {
        self.visit_binding_name(&node.name);
        if let Some(init) = node.initializer {
            self.visit_expression(init);
        }
    }

    fn visit_binding_name(&mut self, node: &'a BindingName<'a>) {
        walk_binding_name(self, node);
    }

    fn visit_function(&mut self, node: &'a FunctionLikeDeclaration<'a>) {
        self.visit_parameters(node.parameters);
        self.visit_block(&node.body);
    }

    fn visit_parameters(&mut self, params: &'a [ParameterDeclaration<'a>]) {
        for param in params.iter() {
            self.visit_binding_name(&param.name);
            if let Some(init) = param.initializer {
                self.visit_expression(init);
            }
        }
    }

    fn visit_class(&mut self, node: &'a ClassLikeDeclaration<'a>) {
        walk_class(self, node);
    }

    fn visit_block(&mut self, node: &'a Block<'a>) {
        for stmt in node.statements.iter() {
            self.visit_statement(stmt);
        }
    }

    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        walk_expression(self, expr);
    }

    fn visit_call_expression(&mut self, node: &'a CallExpression<'a>) {
        self.visit_expression(node.expression);
        for arg in node.arguments.iter() {
            self.visit_expression(arg);
        }
    }

    fn visit_property_name(&mut self, node: &'a PropertyName<'a>) {
        if let PropertyName::Computed(computed) = node {
            self.visit_expression(computed.expression);
        }
    }

    fn visit_method(&mut self, node: &'a MethodDeclaration<'a>) {
        self.visit_property_name(&node.name);
        self.visit_parameters(node.parameters);
        self.visit_block(&node.body);
    }
}

pub fn walk_statement<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, stmt: &'a Statement<'a>) {
    match stmt {
        Statement::VariableStatement(n) => v.visit_variable_declaration_list(&n.declaration_list),
        Statement::FunctionDeclaration(n) => v.visit_function(n),
        Statement::ClassDeclaration(n) => v.visit_class(n),
        Statement::ImportDeclaration(_) => {}
        Statement::ExportDeclaration(_) => {}
        Statement::ExportAssignment(n) => v.visit_expression(n.expression),
        Statement::Block(n) => v.visit_block(n),
        Statement::EmptyStatement(_) | Statement::DebuggerStatement(_) => {}
        Statement::ExpressionStatement(n) => v.visit_expression(n.expression),
        Statement::IfStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.then_statement);
            if let Some(else_stmt) = n.else_statement {
                v.visit_statement(else_stmt);
            }
        }
        Statement::DoStatement(n) => {
            v.visit_statement(n.statement);
            v.visit_expression(n.expression);
        }
        Statement::WhileStatement(n) => {
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ForStatement(n) => {
            if let Some(init) = &n.initializer {
                walk_for_initializer(v, init);
            }
            if let Some(cond) = n.condition {
                v.visit_expression(cond);
            }
            if let Some(incr) = n.incrementor {
                v.visit_expression(incr);
            }
            v.visit_statement(n.statement);
        }
        Statement::ForInStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ForOfStatement(n) => {
            walk_for_initializer(v, &n.initializer);
            v.visit_expression(n.expression);
            v.visit_statement(n.statement);
        }
        Statement::ContinueStatement(_) | Statement::BreakStatement(_) => {}
        Statement::ReturnStatement(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
        Statement::SwitchStatement(n) => {
            v.visit_expression(n.expression);
            for clause in n.clauses.iter() {
                if let Some(expr) = clause.expression {
                    v.visit_expression(expr);
                }
                for stmt in clause.statements.iter() {
                    v.visit_statement(stmt);
                }
            }
        }
        Statement::LabeledStatement(n) => v.visit_statement(n.statement),
        Statement::ThrowStatement(n) => v.visit_expression(n.expression),
        Statement::TryStatement(n) => {
            v.visit_block(&n.try_block);
            if let Some(catch) = &n.catch_clause {
                if let Some(name) = &catch.variable_declaration {
                    v.visit_binding_name(name);
                }
                v.visit_block(&catch.block);
            }
            if let Some(finally) = &n.finally_block {
                v.visit_block(finally);
            }
        }
    }
}

fn walk_for_initializer<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, init: &'a ForInitializer<'a>) {
    match init {
        ForInitializer::VariableDeclarationList(list) => v.visit_variable_declaration_list(list),
        ForInitializer::Expression(expr) => v.visit_expression(expr),
    }
}

pub fn walk_binding_name<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &'a BindingName<'a>) {
    match node {
        BindingName::Identifier(_) => {}
        BindingName::ObjectBindingPattern(pattern) => {
            for element in pattern.elements.iter() {
                walk_binding_element(v, element);
            }
        }
        BindingName::ArrayBindingPattern(pattern) => {
            for element in pattern.elements.iter() {
                if let ArrayBindingElement::BindingElement(element) = element {
                    walk_binding_element(v, element);
                }
            }
        }
    }
}

fn walk_binding_element<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, element: &'a BindingElement<'a>) {
    if let Some(prop) = &element.property_name {
        v.visit_property_name(prop);
    }
    v.visit_binding_name(&element.name);
    if let Some(init) = element.initializer {
        v.visit_expression(init);
    }
}

pub fn walk_class<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, node: &'a ClassLikeDeclaration<'a>) {
    if let Some(heritage) = node.heritage {
        v.visit_expression(heritage);
    }
    for member in node.members.iter() {
        match member {
            ClassElement::Property(prop) => {
                v.visit_property_name(&prop.name);
                if let Some(init) = prop.initializer {
                    v.visit_expression(init);
                }
            }
            ClassElement::Method(method) => v.visit_method(method),
            ClassElement::StaticBlock(block) => v.visit_block(&block.body),
            ClassElement::Semicolon(_) => {}
        }
    }
}

pub fn walk_expression<'a, V: AstVisitor<'a> + ?Sized>(v: &mut V, expr: &'a Expression<'a>) {
    match expr {
        Expression::Identifier(_)
        | Expression::PrivateIdentifier(_)
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
                v.visit_expression(span.expression);
            }
        }
        Expression::ArrayLiteral(n) => {
            for element in n.elements.iter() {
                v.visit_expression(element);
            }
        }
        Expression::ObjectLiteral(n) => {
            for prop in n.properties.iter() {
                match prop {
                    ObjectLiteralElement::PropertyAssignment(p) => {
                        v.visit_property_name(&p.name);
                        v.visit_expression(p.initializer);
                    }
                    ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                        if let Some(init) = p.object_assignment_initializer {
                            v.visit_expression(init);
                        }
                    }
                    ObjectLiteralElement::SpreadAssignment(p) => v.visit_expression(p.expression),
                    ObjectLiteralElement::Method(m) => v.visit_method(m),
                }
            }
        }
        Expression::PropertyAccess(n) => v.visit_expression(n.expression),
        Expression::ElementAccess(n) => {
            v.visit_expression(n.expression);
            v.visit_expression(n.argument_expression);
        }
        Expression::Call(n) => v.visit_call_expression(n),
        Expression::New(n) => {
            v.visit_expression(n.expression);
            for arg in n.arguments.unwrap_or(&[]).iter() {
                v.visit_expression(arg);
            }
        }
        Expression::TaggedTemplate(n) => {
            v.visit_expression(n.tag);
            v.visit_expression(n.template);
        }
        Expression::Parenthesized(n) => v.visit_expression(n.expression),
        Expression::FunctionExpression(n) => v.visit_function(n),
        Expression::ArrowFunction(n) => {
            v.visit_parameters(n.parameters);
            match &n.body {
                ConciseBody::Block(block) => v.visit_block(block),
                ConciseBody::Expression(expr) => v.visit_expression(expr),
            }
        }
        Expression::ClassExpression(n) => v.visit_class(n),
        Expression::Delete(n) => v.visit_expression(n.expression),
        Expression::TypeOf(n) => v.visit_expression(n.expression),
        Expression::Void(n) => v.visit_expression(n.expression),
        Expression::Await(n) => v.visit_expression(n.expression),
        Expression::PrefixUnary(n) => v.visit_expression(n.operand),
        Expression::PostfixUnary(n) => v.visit_expression(n.operand),
        Expression::Binary(n) => {
            v.visit_expression(n.left);
            v.visit_expression(n.right);
        }
        Expression::Conditional(n) => {
            v.visit_expression(n.condition);
            v.visit_expression(n.when_true);
            v.visit_expression(n.when_false);
        }
        Expression::Yield(n) => {
            if let Some(expr) = n.expression {
                v.visit_expression(expr);
            }
        }
        Expression::Spread(n) => v.visit_expression(n.expression),
    }
}
