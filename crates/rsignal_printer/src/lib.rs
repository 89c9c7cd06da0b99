//! rsignal_printer: AST to text output.
//!
//! Converts a module's AST, including nodes synthesized by the rewriter,
//! back into JavaScript text. Parentheses the source wrote survive as
//! `Parenthesized` nodes; the ones synthesized nodes need are derived from
//! operator precedence.

use rsignal_ast::node::*;
use rsignal_ast::precedence::{get_binary_operator_precedence, get_expression_precedence, OperatorPrecedence};
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::types::{ModifierFlags, NodeFlags};
use rsignal_core::intern::{InternedString, StringInterner};

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
    /// Whether to emit a trailing newline.
    pub trailing_newline: bool,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
            trailing_newline: true,
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer<'i> {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    interner: &'i StringInterner,
}

impl<'i> Printer<'i> {
    pub fn new(interner: &'i StringInterner) -> Self {
        Self::with_options(interner, PrinterOptions::default())
    }

    pub fn with_options(interner: &'i StringInterner, options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options,
            interner,
        }
    }

    fn resolve(&self, s: InternedString) -> &'i str {
        self.interner.resolve(s)
    }

    /// Print a source file to a string.
    pub fn print_source_file(&mut self, source_file: &SourceFile<'_>) -> String {
        self.print_statements(source_file.statements)
    }

    /// Print a statement list as a module body.
    pub fn print_statements(&mut self, statements: &[Statement<'_>]) -> String {
        self.output.clear();
        self.indent_level = 0;
        for (i, stmt) in statements.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.write_indent();
            self.print_statement(stmt);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    /// Print a single expression.
    pub fn print_expression_to_string(&mut self, expr: &Expression<'_>) -> String {
        self.output.clear();
        self.print_expression(expr);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    fn print_statement(&mut self, stmt: &Statement<'_>) {
        match stmt {
            Statement::EmptyStatement(_) => self.write(";"),
            Statement::ExpressionStatement(n) => {
                if starts_with_declaration_token(n.expression) {
                    self.write("(");
                    self.print_expression(n.expression);
                    self.write(")");
                } else {
                    self.print_expression(n.expression);
                }
                self.write(";");
            }
            Statement::VariableStatement(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.print_variable_declaration_list(&n.declaration_list);
                self.write(";");
            }
            Statement::ReturnStatement(n) => {
                self.write("return");
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression(expr);
                }
                self.write(";");
            }
            Statement::IfStatement(n) => {
                self.write("if (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.then_statement);
                if let Some(else_stmt) = n.else_statement {
                    self.write(" else ");
                    self.print_statement(else_stmt);
                }
            }
            Statement::Block(n) => self.print_block(n),
            Statement::FunctionDeclaration(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.print_function(n);
            }
            Statement::ClassDeclaration(n) => {
                self.print_modifier_flags(n.data.modifier_flags);
                self.print_class(n);
            }
            Statement::ForStatement(n) => self.print_for_statement(n),
            Statement::ForInStatement(n) => {
                self.write("for (");
                self.print_for_initializer(&n.initializer);
                self.write(" in ");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.statement);
            }
            Statement::ForOfStatement(n) => {
                self.write("for ");
                if n.data.flags.contains(NodeFlags::AWAIT) {
                    self.write("await ");
                }
                self.write("(");
                self.print_for_initializer(&n.initializer);
                self.write(" of ");
                self.print_expression_at(n.expression, OperatorPrecedence::Assignment);
                self.write(") ");
                self.print_statement(n.statement);
            }
            Statement::WhileStatement(n) => {
                self.write("while (");
                self.print_expression(n.expression);
                self.write(") ");
                self.print_statement(n.statement);
            }
            Statement::DoStatement(n) => {
                self.write("do ");
                self.print_statement(n.statement);
                self.write(" while (");
                self.print_expression(n.expression);
                self.write(");");
            }
            Statement::SwitchStatement(n) => self.print_switch_statement(n),
            Statement::ThrowStatement(n) => {
                self.write("throw ");
                self.print_expression(n.expression);
                self.write(";");
            }
            Statement::TryStatement(n) => self.print_try_statement(n),
            Statement::BreakStatement(n) => self.print_jump("break", n),
            Statement::ContinueStatement(n) => self.print_jump("continue", n),
            Statement::LabeledStatement(n) => {
                self.print_identifier(&n.label);
                self.write(": ");
                self.print_statement(n.statement);
            }
            Statement::DebuggerStatement(_) => self.write("debugger;"),
            Statement::ImportDeclaration(n) => self.print_import_declaration(n),
            Statement::ExportDeclaration(n) => self.print_export_declaration(n),
            Statement::ExportAssignment(n) => {
                self.write("export default ");
                if matches!(
                    leftmost_expression(n.expression),
                    Expression::FunctionExpression(_) | Expression::ClassExpression(_)
                ) {
                    self.write("(");
                    self.print_expression(n.expression);
                    self.write(")");
                } else {
                    self.print_expression_at(n.expression, OperatorPrecedence::Assignment);
                }
                self.write(";");
            }
        }
    }

    fn print_jump(&mut self, keyword: &str, node: &JumpStatement) {
        self.write(keyword);
        if let Some(ref label) = node.label {
            self.write(" ");
            self.print_identifier(label);
        }
        self.write(";");
    }

    fn print_variable_declaration_list(&mut self, list: &VariableDeclarationList<'_>) {
        self.write(list.declaration_kind().as_str());
        self.write(" ");
        for (i, decl) in list.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_binding_name(&decl.name);
            if let Some(init) = decl.initializer {
                self.write(" = ");
                self.print_expression_at(init, OperatorPrecedence::Assignment);
            }
        }
    }

    fn print_binding_name(&mut self, name: &BindingName<'_>) {
        match name {
            BindingName::Identifier(id) => self.print_identifier(id),
            BindingName::ObjectBindingPattern(p) => {
                if p.elements.is_empty() {
                    self.write("{}");
                    return;
                }
                self.write("{ ");
                for (i, elem) in p.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_binding_element(elem);
                }
                self.write(" }");
            }
            BindingName::ArrayBindingPattern(p) => {
                self.write("[");
                for (i, elem) in p.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    match elem {
                        ArrayBindingElement::BindingElement(e) => self.print_binding_element(e),
                        ArrayBindingElement::OmittedExpression(_) => {}
                    }
                }
                if matches!(p.elements.last(), Some(ArrayBindingElement::OmittedExpression(_))) {
                    self.write(",");
                }
                self.write("]");
            }
        }
    }

    fn print_binding_element(&mut self, elem: &BindingElement<'_>) {
        if elem.dot_dot_dot {
            self.write("...");
        }
        if let Some(ref prop_name) = elem.property_name {
            self.print_property_name(prop_name);
            self.write(": ");
        }
        self.print_binding_name(&elem.name);
        if let Some(init) = elem.initializer {
            self.write(" = ");
            self.print_expression_at(init, OperatorPrecedence::Assignment);
        }
    }

    fn print_block(&mut self, node: &Block<'_>) {
        self.write("{");
        if !node.statements.is_empty() {
            self.increase_indent();
            for stmt in node.statements.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(stmt);
            }
            self.decrease_indent();
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>) {
        self.write("for (");
        if let Some(ref init) = node.initializer {
            self.print_for_initializer(init);
        }
        self.write(";");
        if let Some(cond) = node.condition {
            self.write(" ");
            self.print_expression(cond);
        }
        self.write(";");
        if let Some(incr) = node.incrementor {
            self.write(" ");
            self.print_expression(incr);
        }
        self.write(") ");
        self.print_statement(node.statement);
    }

    fn print_for_initializer(&mut self, init: &ForInitializer<'_>) {
        match init {
            ForInitializer::VariableDeclarationList(list) => self.print_variable_declaration_list(list),
            ForInitializer::Expression(expr) => self.print_expression(expr),
        }
    }

    fn print_switch_statement(&mut self, node: &SwitchStatement<'_>) {
        self.write("switch (");
        self.print_expression(node.expression);
        self.write(") {");
        self.increase_indent();
        for clause in node.clauses.iter() {
            self.write_newline();
            self.write_indent();
            match clause.expression {
                Some(expr) => {
                    self.write("case ");
                    self.print_expression(expr);
                    self.write(":");
                }
                None => self.write("default:"),
            }
            self.increase_indent();
            for s in clause.statements.iter() {
                self.write_newline();
                self.write_indent();
                self.print_statement(s);
            }
            self.decrease_indent();
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_try_statement(&mut self, node: &TryStatement<'_>) {
        self.write("try ");
        self.print_block(&node.try_block);
        if let Some(ref catch) = node.catch_clause {
            self.write(" catch");
            if let Some(ref var) = catch.variable_declaration {
                self.write(" (");
                self.print_binding_name(var);
                self.write(")");
            }
            self.write(" ");
            self.print_block(&catch.block);
        }
        if let Some(ref finally) = node.finally_block {
            self.write(" finally ");
            self.print_block(finally);
        }
    }

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) {
        self.write("import ");
        if let Some(ref clause) = node.import_clause {
            if let Some(ref name) = clause.name {
                self.print_identifier(name);
                if clause.named_bindings.is_some() {
                    self.write(", ");
                }
            }
            match clause.named_bindings {
                Some(NamedImportBindings::NamespaceImport(ref ns)) => {
                    self.write("* as ");
                    self.print_identifier(ns);
                }
                Some(NamedImportBindings::NamedImports(named)) => {
                    if named.is_empty() {
                        self.write("{}");
                    } else {
                        self.write("{ ");
                        for (i, spec) in named.iter().enumerate() {
                            if i > 0 {
                                self.write(", ");
                            }
                            if let Some(ref prop) = spec.property_name {
                                self.print_identifier(prop);
                                self.write(" as ");
                            }
                            self.print_identifier(&spec.name);
                        }
                        self.write(" }");
                    }
                }
                None => {}
            }
            self.write(" from ");
        }
        self.print_string_literal(&node.module_specifier);
        self.write(";");
    }

    fn print_export_declaration(&mut self, node: &ExportDeclaration<'_>) {
        self.write("export ");
        match node.export_clause {
            Some(NamedExportBindings::NamespaceExport(ref ns)) => {
                self.write("* as ");
                self.print_identifier(ns);
            }
            Some(NamedExportBindings::NamedExports(named)) => {
                if named.is_empty() {
                    self.write("{}");
                } else {
                    self.write("{ ");
                    for (i, spec) in named.iter().enumerate() {
                        if i > 0 {
                            self.write(", ");
                        }
                        if let Some(ref local) = spec.property_name {
                            self.print_identifier(local);
                            self.write(" as ");
                        }
                        self.print_identifier(&spec.name);
                    }
                    self.write(" }");
                }
            }
            None => self.write("*"),
        }
        if let Some(ref module_spec) = node.module_specifier {
            self.write(" from ");
            self.print_string_literal(module_spec);
        }
        self.write(";");
    }

    // ========================================================================
    // Functions and classes
    // ========================================================================

    fn print_function(&mut self, node: &FunctionLikeDeclaration<'_>) {
        if node.data.modifier_flags.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        self.write("function");
        if node.data.flags.contains(NodeFlags::ASTERISK) {
            self.write("*");
        }
        match node.name {
            Some(ref name) => {
                self.write(" ");
                self.print_identifier(name);
            }
            None => self.write(" "),
        }
        self.write("(");
        self.print_parameters(node.parameters);
        self.write(") ");
        self.print_block(&node.body);
    }

    fn print_class(&mut self, node: &ClassLikeDeclaration<'_>) {
        self.write("class");
        if let Some(ref name) = node.name {
            self.write(" ");
            self.print_identifier(name);
        }
        if let Some(heritage) = node.heritage {
            self.write(" extends ");
            self.print_expression_at(heritage, OperatorPrecedence::LeftHandSide);
        }
        self.write(" {");
        if !node.members.is_empty() {
            self.increase_indent();
            for member in node.members.iter() {
                self.write_newline();
                self.write_indent();
                self.print_class_element(member);
            }
            self.decrease_indent();
            self.write_newline();
            self.write_indent();
        }
        self.write("}");
    }

    fn print_class_element(&mut self, elem: &ClassElement<'_>) {
        match elem {
            ClassElement::Property(p) => {
                if p.data.modifier_flags.contains(ModifierFlags::STATIC) {
                    self.write("static ");
                }
                self.print_property_name(&p.name);
                if let Some(init) = p.initializer {
                    self.write(" = ");
                    self.print_expression_at(init, OperatorPrecedence::Assignment);
                }
                self.write(";");
            }
            ClassElement::Method(m) => self.print_method(m),
            ClassElement::StaticBlock(sb) => {
                self.write("static ");
                self.print_block(&sb.body);
            }
            ClassElement::Semicolon(_) => self.write(";"),
        }
    }

    fn print_method(&mut self, node: &MethodDeclaration<'_>) {
        let mf = node.data.modifier_flags;
        if mf.contains(ModifierFlags::STATIC) {
            self.write("static ");
        }
        if mf.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        match node.data.kind {
            SyntaxKind::GetAccessor => self.write("get "),
            SyntaxKind::SetAccessor => self.write("set "),
            _ => {}
        }
        if node.data.flags.contains(NodeFlags::ASTERISK) {
            self.write("*");
        }
        self.print_property_name(&node.name);
        self.write("(");
        self.print_parameters(node.parameters);
        self.write(") ");
        self.print_block(&node.body);
    }

    fn print_parameters(&mut self, params: &[ParameterDeclaration<'_>]) {
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if param.dot_dot_dot {
                self.write("...");
            }
            self.print_binding_name(&param.name);
            if let Some(init) = param.initializer {
                self.write(" = ");
                self.print_expression_at(init, OperatorPrecedence::Assignment);
            }
        }
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>) {
        self.print_expression_at(expr, OperatorPrecedence::Comma);
    }

    /// Print `expr` where the context requires at least `min` precedence,
    /// parenthesizing it when it binds more loosely.
    fn print_expression_at(&mut self, expr: &Expression<'_>, min: OperatorPrecedence) {
        if get_expression_precedence(expr) < min {
            self.write("(");
            self.print_expression_inner(expr);
            self.write(")");
        } else {
            self.print_expression_inner(expr);
        }
    }

    fn print_expression_inner(&mut self, expr: &Expression<'_>) {
        match expr {
            Expression::Identifier(id) | Expression::PrivateIdentifier(id) => self.print_identifier(id),
            Expression::NumericLiteral(n)
            | Expression::BigIntLiteral(n)
            | Expression::RegularExpressionLiteral(n) => self.write_interned(n.text),
            Expression::StringLiteral(n) => self.print_string_literal(n),
            Expression::NoSubstitutionTemplateLiteral(n) => {
                self.write("`");
                self.write_interned(n.text);
                self.write("`");
            }
            Expression::TemplateExpression(n) => {
                self.write("`");
                self.write_interned(n.head);
                for span in n.template_spans.iter() {
                    self.write("${");
                    self.print_expression(span.expression);
                    self.write("}");
                    self.write_interned(span.literal);
                }
                self.write("`");
            }
            Expression::TrueKeyword(_) => self.write("true"),
            Expression::FalseKeyword(_) => self.write("false"),
            Expression::NullKeyword(_) => self.write("null"),
            Expression::ThisKeyword(_) => self.write("this"),
            Expression::SuperKeyword(_) => self.write("super"),
            Expression::ImportKeyword(_) => self.write("import"),
            Expression::OmittedExpression(_) => {}
            Expression::MetaProperty(n) => {
                self.write(operator_to_string(n.keyword_token));
                self.write(".");
                self.print_identifier(&n.name);
            }
            Expression::Binary(n) => self.print_binary(n),
            Expression::PrefixUnary(n) => {
                self.write(operator_to_string(n.operator));
                if needs_space_between_signs(n.operator, n.operand) {
                    self.write(" ");
                }
                self.print_expression_at(n.operand, OperatorPrecedence::Unary);
            }
            Expression::PostfixUnary(n) => {
                self.print_expression_at(n.operand, OperatorPrecedence::LeftHandSide);
                self.write(operator_to_string(n.operator));
            }
            Expression::Delete(n) => self.print_keyword_unary("delete ", n.expression),
            Expression::TypeOf(n) => self.print_keyword_unary("typeof ", n.expression),
            Expression::Void(n) => self.print_keyword_unary("void ", n.expression),
            Expression::Await(n) => self.print_keyword_unary("await ", n.expression),
            Expression::Conditional(n) => {
                self.print_expression_at(n.condition, OperatorPrecedence::Conditional.next());
                self.write(" ? ");
                self.print_expression_at(n.when_true, OperatorPrecedence::Assignment);
                self.write(" : ");
                self.print_expression_at(n.when_false, OperatorPrecedence::Assignment);
            }
            Expression::Yield(n) => {
                self.write("yield");
                if n.data.flags.contains(NodeFlags::ASTERISK) {
                    self.write("*");
                }
                if let Some(expr) = n.expression {
                    self.write(" ");
                    self.print_expression_at(expr, OperatorPrecedence::Assignment);
                }
            }
            Expression::Spread(n) => {
                self.write("...");
                self.print_expression_at(n.expression, OperatorPrecedence::Assignment);
            }
            Expression::Call(n) => {
                self.print_expression_at(n.expression, OperatorPrecedence::LeftHandSide);
                if n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN) {
                    self.write("?.");
                }
                self.print_arguments(n.arguments);
            }
            Expression::New(n) => {
                self.write("new ");
                self.print_expression_at(n.expression, OperatorPrecedence::Member);
                if let Some(args) = n.arguments {
                    self.print_arguments(args);
                }
            }
            Expression::PropertyAccess(n) => {
                self.print_expression_at(n.expression, OperatorPrecedence::LeftHandSide);
                if n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN) {
                    self.write("?.");
                } else {
                    self.write(".");
                }
                self.print_identifier(&n.name);
            }
            Expression::ElementAccess(n) => {
                self.print_expression_at(n.expression, OperatorPrecedence::LeftHandSide);
                if n.data.flags.contains(NodeFlags::OPTIONAL_CHAIN) {
                    self.write("?.");
                }
                self.write("[");
                self.print_expression(n.argument_expression);
                self.write("]");
            }
            Expression::TaggedTemplate(n) => {
                self.print_expression_at(n.tag, OperatorPrecedence::Member);
                self.print_expression_inner(n.template);
            }
            Expression::Parenthesized(n) => {
                self.write("(");
                self.print_expression(n.expression);
                self.write(")");
            }
            Expression::ArrowFunction(n) => self.print_arrow_function(n),
            Expression::FunctionExpression(n) => self.print_function(n),
            Expression::ClassExpression(n) => self.print_class(n),
            Expression::ArrayLiteral(n) => {
                self.write("[");
                for (i, elem) in n.elements.iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.print_expression_at(elem, OperatorPrecedence::Spread);
                }
                if matches!(n.elements.last(), Some(Expression::OmittedExpression(_))) {
                    self.write(",");
                }
                self.write("]");
            }
            Expression::ObjectLiteral(n) => self.print_object_literal(n),
        }
    }

    fn print_binary(&mut self, node: &BinaryExpression<'_>) {
        let op = node.operator;
        let (left_min, right_min) = if op == SyntaxKind::CommaToken {
            (OperatorPrecedence::Comma, OperatorPrecedence::Spread)
        } else if op.is_assignment_operator() {
            (OperatorPrecedence::LeftHandSide, OperatorPrecedence::Assignment)
        } else if op == SyntaxKind::AsteriskAsteriskToken {
            (OperatorPrecedence::Update, OperatorPrecedence::Exponentiation)
        } else {
            let precedence = get_binary_operator_precedence(op);
            (precedence, precedence.next())
        };

        self.print_binary_operand(op, node.left, left_min);
        if op == SyntaxKind::CommaToken {
            self.write(", ");
        } else {
            self.write(" ");
            self.write(operator_to_string(op));
            self.write(" ");
        }
        self.print_binary_operand(op, node.right, right_min);
    }

    fn print_binary_operand(&mut self, op: SyntaxKind, operand: &Expression<'_>, min: OperatorPrecedence) {
        if mixes_nullish_with_logical(op, operand) {
            self.write("(");
            self.print_expression(operand);
            self.write(")");
        } else {
            self.print_expression_at(operand, min);
        }
    }

    fn print_keyword_unary(&mut self, keyword: &str, operand: &Expression<'_>) {
        self.write(keyword);
        self.print_expression_at(operand, OperatorPrecedence::Unary);
    }

    fn print_arguments(&mut self, args: &[Expression<'_>]) {
        self.write("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expression_at(arg, OperatorPrecedence::Spread);
        }
        self.write(")");
    }

    fn print_arrow_function(&mut self, node: &ArrowFunction<'_>) {
        if node.data.modifier_flags.contains(ModifierFlags::ASYNC) {
            self.write("async ");
        }
        self.write("(");
        self.print_parameters(node.parameters);
        self.write(") => ");
        match node.body {
            ConciseBody::Block(ref block) => self.print_block(block),
            ConciseBody::Expression(expr) => {
                if matches!(leftmost_expression(expr), Expression::ObjectLiteral(_)) {
                    self.write("(");
                    self.print_expression(expr);
                    self.write(")");
                } else {
                    self.print_expression_at(expr, OperatorPrecedence::Assignment);
                }
            }
        }
    }

    fn print_object_literal(&mut self, node: &ObjectLiteralExpression<'_>) {
        if node.properties.is_empty() {
            self.write("{}");
            return;
        }
        if !node.data.flags.contains(NodeFlags::MULTI_LINE) {
            self.write("{ ");
            for (i, prop) in node.properties.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.print_object_literal_element(prop);
            }
            self.write(" }");
            return;
        }
        self.write("{");
        self.increase_indent();
        for (i, prop) in node.properties.iter().enumerate() {
            self.write_newline();
            self.write_indent();
            self.print_object_literal_element(prop);
            if i < node.properties.len() - 1 {
                self.write(",");
            }
        }
        self.decrease_indent();
        self.write_newline();
        self.write_indent();
        self.write("}");
    }

    fn print_object_literal_element(&mut self, prop: &ObjectLiteralElement<'_>) {
        match prop {
            ObjectLiteralElement::PropertyAssignment(p) => {
                self.print_property_name(&p.name);
                self.write(": ");
                self.print_expression_at(p.initializer, OperatorPrecedence::Assignment);
            }
            ObjectLiteralElement::ShorthandPropertyAssignment(p) => {
                self.print_identifier(&p.name);
                if let Some(init) = p.object_assignment_initializer {
                    self.write(" = ");
                    self.print_expression_at(init, OperatorPrecedence::Assignment);
                }
            }
            ObjectLiteralElement::SpreadAssignment(p) => {
                self.write("...");
                self.print_expression_at(p.expression, OperatorPrecedence::Assignment);
            }
            ObjectLiteralElement::Method(m) => self.print_method(m),
        }
    }

    // ========================================================================
    // Helper printing functions
    // ========================================================================

    fn print_identifier(&mut self, id: &Identifier) {
        self.write_interned(id.text);
    }

    fn print_string_literal(&mut self, literal: &StringLiteral) {
        let quote = if literal.data.flags.contains(NodeFlags::SINGLE_QUOTE) { "'" } else { "\"" };
        self.write(quote);
        self.write_interned(literal.text);
        self.write(quote);
    }

    fn print_property_name(&mut self, name: &PropertyName<'_>) {
        match name {
            PropertyName::Identifier(id) | PropertyName::PrivateIdentifier(id) => {
                self.print_identifier(id)
            }
            PropertyName::StringLiteral(s) => self.print_string_literal(s),
            PropertyName::NumericLiteral(n) => self.write_interned(n.text),
            PropertyName::Computed(c) => {
                self.write("[");
                self.print_expression_at(c.expression, OperatorPrecedence::Assignment);
                self.write("]");
            }
        }
    }

    fn print_modifier_flags(&mut self, flags: ModifierFlags) {
        if flags.contains(ModifierFlags::EXPORT) {
            self.write("export ");
        }
        if flags.contains(ModifierFlags::DEFAULT) {
            self.write("default ");
        }
    }

    // ========================================================================
    // Core write helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_interned(&mut self, s: InternedString) {
        let text = self.resolve(s);
        self.output.push_str(text);
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    fn decrease_indent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }
}

/// The expression printed first when `expr` is printed without parentheses.
fn leftmost_expression<'e, 'a>(expr: &'e Expression<'a>) -> &'e Expression<'a> {
    match expr {
        Expression::Binary(n) => leftmost_expression(n.left),
        Expression::Conditional(n) => leftmost_expression(n.condition),
        Expression::PostfixUnary(n) => leftmost_expression(n.operand),
        Expression::Call(n) => leftmost_expression(n.expression),
        Expression::PropertyAccess(n) => leftmost_expression(n.expression),
        Expression::ElementAccess(n) => leftmost_expression(n.expression),
        Expression::TaggedTemplate(n) => leftmost_expression(n.tag),
        other => other,
    }
}

/// An expression statement cannot begin with `{`, `function` or `class`.
fn starts_with_declaration_token(expr: &Expression<'_>) -> bool {
    matches!(
        leftmost_expression(expr),
        Expression::ObjectLiteral(_) | Expression::FunctionExpression(_) | Expression::ClassExpression(_)
    )
}

/// `??` cannot be mixed with `||` or `&&` without parentheses.
fn mixes_nullish_with_logical(parent: SyntaxKind, operand: &Expression<'_>) -> bool {
    let Expression::Binary(child) = operand else {
        return false;
    };
    let is_logical = |kind: SyntaxKind| matches!(kind, SyntaxKind::BarBarToken | SyntaxKind::AmpersandAmpersandToken);
    match parent {
        SyntaxKind::QuestionQuestionToken => is_logical(child.operator),
        kind if is_logical(kind) => child.operator == SyntaxKind::QuestionQuestionToken,
        _ => false,
    }
}

/// `- -x` and `+ +x` must not fuse into `--x` and `++x`.
fn needs_space_between_signs(operator: SyntaxKind, operand: &Expression<'_>) -> bool {
    let Expression::PrefixUnary(inner) = operand else {
        return false;
    };
    match operator {
        SyntaxKind::PlusToken => matches!(inner.operator, SyntaxKind::PlusToken | SyntaxKind::PlusPlusToken),
        SyntaxKind::MinusToken => {
            matches!(inner.operator, SyntaxKind::MinusToken | SyntaxKind::MinusMinusToken)
        }
        _ => false,
    }
}

fn operator_to_string(kind: SyntaxKind) -> &'static str {
    kind.token_text().unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_to_string() {
        assert_eq!(operator_to_string(SyntaxKind::PlusToken), "+");
        assert_eq!(operator_to_string(SyntaxKind::AsteriskAsteriskToken), "**");
        assert_eq!(operator_to_string(SyntaxKind::QuestionQuestionToken), "??");
        assert_eq!(operator_to_string(SyntaxKind::InstanceOfKeyword), "instanceof");
        assert_eq!(operator_to_string(SyntaxKind::TypeOfKeyword), "typeof");
    }

    #[test]
    fn test_printer_options_default() {
        let options = PrinterOptions::default();
        assert_eq!(options.indent_str, "    ");
        assert_eq!(options.new_line, "\n");
        assert!(options.trailing_newline);
    }
}
