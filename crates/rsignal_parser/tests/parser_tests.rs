//! Parser integration tests.
//!
//! Verifies that the parser builds the expected AST structures from module
//! source, and that syntax errors are reported instead of panicking.

use bumpalo::Bump;
use rsignal_ast::node::*;
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::types::{DeclarationKind, ModifierFlags, NodeFlags};
use rsignal_core::intern::StringInterner;
use rsignal_parser::parse_module;

/// Helper: parse source text and return the number of top-level statements
/// and diagnostic codes.
fn parse(source: &str) -> (usize, Vec<u32>) {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", source);
    let codes = diagnostics.diagnostics().iter().map(|d| d.code).collect();
    (sf.statements.len(), codes)
}

/// Helper: assert that parsing succeeds with the expected number of
/// top-level statements.
fn assert_statement_count(source: &str, expected: usize) {
    let (count, codes) = parse(source);
    assert!(codes.is_empty(), "unexpected diagnostics {:?} for: {}", codes, source);
    assert_eq!(count, expected, "source: {}", source);
}

fn assert_has_error(source: &str, code: u32) {
    let (_, codes) = parse(source);
    assert!(codes.contains(&code), "expected {} in {:?} for: {}", code, codes, source);
}

/// Helper: run `check` on the expression of the single expression statement.
fn with_expression(source: &str, check: impl FnOnce(&Expression<'_>, &StringInterner)) {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", source);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
    match &sf.statements[0] {
        Statement::ExpressionStatement(stmt) => check(stmt.expression, &interner),
        other => panic!("expected expression statement, got {:?}", other.data().kind),
    }
}

// ============================================================================
// Variable Declarations
// ============================================================================

#[test]
fn test_parse_declarations() {
    assert_statement_count("const x = 42;", 1);
    assert_statement_count("let y = 'hello';", 1);
    assert_statement_count("var z = true;", 1);
    assert_statement_count("const a = 1; let b = 2; var c = 3;", 3);
}

#[test]
fn test_marker_declaration_shape() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(&arena, &interner, "test.js", "let count = $signal(0);");
    let Statement::VariableStatement(stmt) = &sf.statements[0] else {
        panic!("expected variable statement");
    };
    assert_eq!(stmt.declaration_list.declaration_kind(), DeclarationKind::Let);
    let decl = &stmt.declaration_list.declarations[0];
    assert_eq!(interner.resolve(decl.name.as_identifier().unwrap().text), "count");
    let Some(Expression::Call(call)) = decl.initializer else {
        panic!("expected call initializer");
    };
    assert_eq!(interner.resolve(call.callee_identifier().unwrap().text), "$signal");
    assert_eq!(call.arguments.len(), 1);
    // Ranges stop before the semicolon's trivia and cover the declaration.
    assert_eq!(decl.data.range.pos, 4);
    assert_eq!(decl.data.range.end, 22);
    assert_eq!(stmt.data.range.end, 23);
}

#[test]
fn test_destructuring_declarations() {
    assert_statement_count("const { a, b: [c, , ...d], e = 1, ...rest } = obj;", 1);
    assert_statement_count("let [x, y = 2] = pair;", 1);
}

#[test]
fn test_const_without_initializer() {
    assert_has_error("const x;", 1155);
}

#[test]
fn test_rest_element_must_be_last() {
    assert_has_error("const [...a, b] = c;", 1014);
    assert_has_error("function f(...a, b) {}", 1014);
}

#[test]
fn test_asi_between_statements() {
    assert_statement_count("let a = 1\nlet b = a\nb++\n", 3);
}

#[test]
fn test_missing_semicolon_on_same_line() {
    assert_has_error("let a = 1 let b = 2", 1005);
}

// ============================================================================
// Functions and classes
// ============================================================================

#[test]
fn test_parse_functions() {
    assert_statement_count("function foo() {}", 1);
    assert_statement_count("function add(a, b = 1) { return a + b; }", 1);
    assert_statement_count("async function f() { return await fetch('url'); }", 1);
    assert_statement_count("function* gen() { yield 1; yield* other(); }", 1);
}

#[test]
fn test_parse_classes() {
    let src = r#"
        class Counter extends Base {
            count = 0;
            #secret = 1;
            static instances = 0;
            static { Counter.instances++; }
            constructor(start) {
                super();
                this.count = start;
            }
            get value() { return this.count; }
            set value(v) { this.count = v; }
            async *stream() {}
            [Symbol.iterator]() {}
            ;
        }
    "#;
    assert_statement_count(src, 1);
}

#[test]
fn test_class_member_kinds() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(
        &arena,
        &interner,
        "test.js",
        "class A { constructor() {} get x() {} static get() {} }",
    );
    let Statement::ClassDeclaration(class) = &sf.statements[0] else {
        panic!("expected class");
    };
    let kinds: Vec<SyntaxKind> = class
        .members
        .iter()
        .map(|m| match m {
            ClassElement::Method(m) => m.data.kind,
            ClassElement::Property(p) => p.data.kind,
            _ => SyntaxKind::Unknown,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![SyntaxKind::Constructor, SyntaxKind::GetAccessor, SyntaxKind::MethodDeclaration]
    );
}

#[test]
fn test_arrow_functions() {
    assert_statement_count("const f = x => x * 2;", 1);
    assert_statement_count("const g = (a, { b }, [c] = [], ...d) => { return a; };", 1);
    assert_statement_count("const h = async () => await g();", 1);
    assert_statement_count("const i = async x => x;", 1);
    assert_statement_count("const j = () => ({ a: 1 });", 1);
}

#[test]
fn test_parenthesized_expression_is_not_arrow() {
    with_expression("(a, b);", |expr, _| {
        assert_eq!(expr.kind(), SyntaxKind::ParenthesizedExpression);
    });
}

#[test]
fn test_arrow_with_template_default() {
    with_expression("((a = `x${`y${1}`}`) => a);", |expr, _| {
        let Expression::Parenthesized(paren) = expr else {
            panic!("expected parentheses");
        };
        assert_eq!(paren.expression.kind(), SyntaxKind::ArrowFunction);
    });
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_binary_precedence() {
    with_expression("a + b * c;", |expr, _| {
        let Expression::Binary(add) = expr else { panic!("expected binary") };
        assert_eq!(add.operator, SyntaxKind::PlusToken);
        assert_eq!(add.right.kind(), SyntaxKind::BinaryExpression);
    });
}

#[test]
fn test_exponent_is_right_associative() {
    with_expression("a ** b ** c;", |expr, _| {
        let Expression::Binary(outer) = expr else { panic!("expected binary") };
        assert_eq!(outer.left.kind(), SyntaxKind::Identifier);
        assert_eq!(outer.right.kind(), SyntaxKind::BinaryExpression);
    });
}

#[test]
fn test_assignment_is_right_associative() {
    with_expression("a = b += c;", |expr, _| {
        let Expression::Binary(outer) = expr else { panic!("expected binary") };
        assert_eq!(outer.operator, SyntaxKind::EqualsToken);
        let Expression::Binary(inner) = outer.right else { panic!("expected binary") };
        assert_eq!(inner.operator, SyntaxKind::PlusEqualsToken);
    });
}

#[test]
fn test_update_expressions() {
    with_expression("count++;", |expr, _| {
        assert_eq!(expr.kind(), SyntaxKind::PostfixUnaryExpression);
    });
    with_expression("--count;", |expr, _| {
        assert_eq!(expr.kind(), SyntaxKind::PrefixUnaryExpression);
    });
}

#[test]
fn test_invalid_assignment_target() {
    assert_has_error("a + b = c;", 2364);
    assert_has_error("f()++;", 2364);
    assert_has_error("a?.b = 1;", 2364);
}

#[test]
fn test_destructuring_assignment() {
    assert_statement_count("[a, b] = [b, a];", 1);
    assert_statement_count("({ a, b = 1 } = obj);", 1);
}

#[test]
fn test_call_chain() {
    with_expression("obj.method(a)[0]?.next?.(b);", |expr, _| {
        let Expression::Call(call) = expr else { panic!("expected call") };
        assert!(call.data.flags.contains(NodeFlags::OPTIONAL_CHAIN));
        assert_eq!(call.expression.kind(), SyntaxKind::PropertyAccessExpression);
    });
}

#[test]
fn test_new_expressions() {
    with_expression("new Foo.Bar(1).baz;", |expr, _| {
        let Expression::PropertyAccess(access) = expr else { panic!("expected access") };
        let Expression::New(new) = access.expression else { panic!("expected new") };
        assert_eq!(new.expression.kind(), SyntaxKind::PropertyAccessExpression);
        assert_eq!(new.arguments.map(|a| a.len()), Some(1));
    });
    with_expression("new Foo;", |expr, _| {
        let Expression::New(new) = expr else { panic!("expected new") };
        assert!(new.arguments.is_none());
    });
}

#[test]
fn test_object_literal_elements() {
    with_expression("({ a: 1, b, ...c, d() {}, get e() { return 1; }, [f]: 2, 'g': 3 });", |expr, _| {
        let Expression::Parenthesized(paren) = expr else { panic!("expected parens") };
        let Expression::ObjectLiteral(object) = paren.expression else { panic!("expected object") };
        assert_eq!(object.properties.len(), 7);
        assert!(matches!(object.properties[1], ObjectLiteralElement::ShorthandPropertyAssignment(_)));
        assert!(matches!(object.properties[2], ObjectLiteralElement::SpreadAssignment(_)));
        assert!(matches!(object.properties[3], ObjectLiteralElement::Method(_)));
    });
}

#[test]
fn test_template_and_tagged_template() {
    with_expression("`a${b}c${d}e`;", |expr, interner| {
        let Expression::TemplateExpression(template) = expr else { panic!("expected template") };
        assert_eq!(interner.resolve(template.head), "a");
        assert_eq!(template.template_spans.len(), 2);
        assert_eq!(interner.resolve(template.template_spans[1].literal), "e");
    });
    with_expression("html`<div>${x}</div>`;", |expr, _| {
        assert_eq!(expr.kind(), SyntaxKind::TaggedTemplateExpression);
    });
}

#[test]
fn test_regex_literal() {
    with_expression("/ab+c/gi.test(s);", |expr, _| {
        let Expression::Call(call) = expr else { panic!("expected call") };
        let Expression::PropertyAccess(access) = call.expression else { panic!("expected access") };
        assert_eq!(access.expression.kind(), SyntaxKind::RegularExpressionLiteral);
    });
}

#[test]
fn test_string_quote_style_is_recorded() {
    with_expression("'single';", |expr, _| {
        assert!(expr.data().flags.contains(NodeFlags::SINGLE_QUOTE));
    });
    with_expression("\"double\";", |expr, _| {
        assert!(!expr.data().flags.contains(NodeFlags::SINGLE_QUOTE));
    });
}

#[test]
fn test_meta_properties_and_dynamic_import() {
    assert_statement_count("import.meta.url; import('./x.js');", 2);
    assert_statement_count("function F() { new.target; }", 1);
}

#[test]
fn test_unary_left_of_exponentiation_is_an_error() {
    assert_has_error("-x ** 2;", 1360);
    assert_has_error("typeof x ** 2;", 1360);
    assert_statement_count("(-x) ** 2;", 1);
    assert_statement_count("++x ** 2;", 1);
    assert_statement_count("2 ** -x;", 1);
}

#[test]
fn test_nullish_mixed_with_logical_is_an_error() {
    assert_has_error("a ?? b || c;", 1361);
    assert_has_error("a || b ?? c;", 1361);
    assert_has_error("a ?? b && c;", 1361);
    assert_statement_count("(a ?? b) || c;", 1);
    assert_statement_count("a ?? (b && c);", 1);
    assert_statement_count("a ?? b ?? c;", 1);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_control_flow() {
    let src = r#"
        if (a) b(); else { c(); }
        while (x) { break; }
        do { continue; } while (y)
        for (let i = 0; i < 10; i++) {}
        for (const k in obj) {}
        for (const v of list) {}
        for (;;) { break; }
        outer: for (const a of b) { continue outer; }
        switch (x) { case 1: a(); break; default: b(); }
        try { risky(); } catch (e) { log(e); } finally { done(); }
        try { risky(); } catch { }
        throw new Error("x");
        debugger;
    "#;
    assert_statement_count(src, 13);
}

#[test]
fn test_for_in_head_disallows_in_operator() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", "for (var k in obj) {}");
    assert!(diagnostics.is_empty());
    assert_eq!(sf.statements[0].data().kind, SyntaxKind::ForInStatement);
}

#[test]
fn test_for_await() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(
        &arena,
        &interner,
        "test.js",
        "async function f() { for await (const x of xs) {} }",
    );
    let Statement::FunctionDeclaration(func) = &sf.statements[0] else {
        panic!("expected function");
    };
    assert!(func.body.statements[0].data().flags.contains(NodeFlags::AWAIT));
}

#[test]
fn test_return_without_value_before_line_break() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(&arena, &interner, "test.js", "function f() { return\nx }");
    let Statement::FunctionDeclaration(func) = &sf.statements[0] else {
        panic!("expected function");
    };
    assert_eq!(func.body.statements.len(), 2);
    let Statement::ReturnStatement(ret) = &func.body.statements[0] else {
        panic!("expected return");
    };
    assert!(ret.expression.is_none());
}

// ============================================================================
// Modules
// ============================================================================

#[test]
fn test_imports() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let src = r#"
        import "./side-effect.js";
        import def from "a";
        import * as ns from "b";
        import { $signal, $memo as memo } from "solid-macros";
        import def2, { x } from "c";
    "#;
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", src);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
    assert_eq!(sf.statements.len(), 5);

    let Statement::ImportDeclaration(decl) = &sf.statements[3] else {
        panic!("expected import");
    };
    assert_eq!(interner.resolve(decl.module_specifier.text), "solid-macros");
    let Some(NamedImportBindings::NamedImports(specifiers)) =
        decl.import_clause.as_ref().and_then(|c| c.named_bindings.clone())
    else {
        panic!("expected named imports");
    };
    assert_eq!(interner.resolve(specifiers[1].imported_name().text), "$memo");
    assert_eq!(interner.resolve(specifiers[1].name.text), "memo");
}

#[test]
fn test_exports() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let src = r#"
        export let count = $signal(0);
        export function f() {}
        export class C {}
        export { a, b as c };
        export * from "m";
        export * as ns from "m";
        export { x } from "m";
        export default function () {}
    "#;
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", src);
    assert!(diagnostics.is_empty(), "{:?}", diagnostics.diagnostics());
    assert_eq!(sf.statements.len(), 8);
    assert!(sf.statements[0]
        .data()
        .modifier_flags
        .contains(ModifierFlags::EXPORT));
    assert!(sf.statements[7]
        .data()
        .modifier_flags
        .contains(ModifierFlags::DEFAULT));
}

#[test]
fn test_export_default_expression() {
    assert_statement_count("export default count * 2;", 1);
    assert_statement_count("export default class {}", 1);
}

// ============================================================================
// Error recovery
// ============================================================================

#[test]
fn test_unexpected_tokens_do_not_loop() {
    let (_, codes) = parse(") ) let x = 1;");
    assert!(!codes.is_empty());
    let (_, codes) = parse("class { ");
    assert!(!codes.is_empty());
    let (_, codes) = parse("let x = ;");
    assert!(codes.contains(&1109));
}

#[test]
fn test_scanner_errors_are_reported_with_file() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (_, diagnostics) = parse_module(&arena, &interner, "broken.js", "let s = 'open");
    let first = &diagnostics.diagnostics()[0];
    assert_eq!(first.code, 1002);
    assert_eq!(first.file.as_deref(), Some("broken.js"));
}

#[test]
fn test_deep_nesting_is_reported() {
    // Unoptimized frames are large; give the parser room to reach the limit.
    std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let source = format!("x = {}1{};", "(".repeat(5000), ")".repeat(5000));
            assert_has_error(&source, 1199);
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_shebang_is_skipped() {
    assert_statement_count("#!/usr/bin/env node\nlet a = 1;", 1);
}
