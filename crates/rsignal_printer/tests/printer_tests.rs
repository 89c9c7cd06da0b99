//! Printer integration tests: parse -> print, and printing of synthesized
//! nodes.

use bumpalo::Bump;
use rsignal_ast::node::{Expression, Statement};
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::NodeFactory;
use rsignal_core::intern::StringInterner;
use rsignal_core::text::TextRange;
use rsignal_parser::parse_module;
use rsignal_printer::Printer;

/// Helper: parse source and print it back.
fn reprint(source: &str) -> String {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", source);
    assert!(diagnostics.is_empty(), "unexpected parse errors: {:?}", diagnostics);
    Printer::new(&interner).print_source_file(&sf)
}

/// Helper: the expression of the first expression statement in `source`.
fn first_expression<'a>(arena: &'a Bump, interner: &StringInterner, source: &str) -> &'a Expression<'a> {
    let (sf, _) = parse_module(arena, interner, "test.js", source);
    match sf.statements.first() {
        Some(Statement::ExpressionStatement(stmt)) => stmt.expression,
        _ => panic!("expected an expression statement"),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_print_empty_file() {
    assert_eq!(reprint(""), "");
}

#[test]
fn test_print_variable_statements() {
    assert_eq!(reprint("let a = 1, b;"), "let a = 1, b;\n");
    assert_eq!(reprint("const { x, y: [z] } = o"), "const { x, y: [z] } = o;\n");
    assert_eq!(reprint("export var v = 2;"), "export var v = 2;\n");
}

#[test]
fn test_print_keeps_quote_style() {
    assert_eq!(
        reprint("import x from 'm';\nconst s = \"a\";"),
        "import x from 'm';\nconst s = \"a\";\n"
    );
}

#[test]
fn test_print_function_declaration() {
    assert_eq!(
        reprint("function f(a, b = 1, ...rest) { return a + b; }"),
        "function f(a, b = 1, ...rest) {\n    return a + b;\n}\n"
    );
    assert_eq!(
        reprint("export default async function* g() {}"),
        "export default async function* g() {}\n"
    );
}

#[test]
fn test_print_class() {
    assert_eq!(
        reprint("class A extends B { static x = 1; get y() { return 2; } #z; }"),
        "class A extends B {\n    static x = 1;\n    get y() {\n        return 2;\n    }\n    #z;\n}\n"
    );
}

#[test]
fn test_print_control_flow() {
    assert_eq!(
        reprint("for (let i = 0; i < 3; i++) {}"),
        "for (let i = 0; i < 3; i++) {}\n"
    );
    assert_eq!(reprint("for (;;) break;"), "for (;;) break;\n");
    assert_eq!(reprint("for (const k of ks) f(k);"), "for (const k of ks) f(k);\n");
    assert_eq!(
        reprint("if (a) { b(); } else c();"),
        "if (a) {\n    b();\n} else c();\n"
    );
    assert_eq!(
        reprint("switch (x) { case 1: f(); break; default: g(); }"),
        "switch (x) {\n    case 1:\n        f();\n        break;\n    default:\n        g();\n}\n"
    );
    assert_eq!(
        reprint("try { f(); } catch { g(); } finally {}"),
        "try {\n    f();\n} catch {\n    g();\n} finally {}\n"
    );
}

#[test]
fn test_print_imports_and_exports() {
    assert_eq!(
        reprint("import d, { a as b, c } from \"m\";"),
        "import d, { a as b, c } from \"m\";\n"
    );
    assert_eq!(reprint("import * as ns from \"m\";"), "import * as ns from \"m\";\n");
    assert_eq!(reprint("import \"side\";"), "import \"side\";\n");
    assert_eq!(
        reprint("export { a as b }; export * from \"m\"; export default 1;"),
        "export { a as b };\nexport * from \"m\";\nexport default 1;\n"
    );
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_print_keeps_source_parentheses() {
    assert_eq!(reprint("(a + b) * c;"), "(a + b) * c;\n");
    assert_eq!(reprint("(function () {})();"), "(function () {})();\n");
    assert_eq!(reprint("({ a } = o);"), "({ a } = o);\n");
}

#[test]
fn test_print_object_literals() {
    assert_eq!(reprint("const o = { a: 1, b, ...c };"), "const o = { a: 1, b, ...c };\n");
    assert_eq!(
        reprint("const o = {\n  a: 1,\n  b: 2\n};"),
        "const o = {\n    a: 1,\n    b: 2\n};\n"
    );
    assert_eq!(reprint("const e = {};"), "const e = {};\n");
}

#[test]
fn test_print_arrow_functions() {
    assert_eq!(reprint("const f = x => ({ a: x });"), "const f = (x) => ({ a: x });\n");
    assert_eq!(
        reprint("const g = async (a, b) => { await a; };"),
        "const g = async (a, b) => {\n    await a;\n};\n"
    );
}

#[test]
fn test_print_templates_and_literals() {
    assert_eq!(reprint("const t = `a${b}c${d}`;"), "const t = `a${b}c${d}`;\n");
    assert_eq!(reprint("const r = /ab+c/gi;"), "const r = /ab+c/gi;\n");
    assert_eq!(reprint("const n = 0x1F + 10n;"), "const n = 0x1F + 10n;\n");
}

#[test]
fn test_print_unary_and_members() {
    assert_eq!(reprint("- -x;"), "- -x;\n");
    assert_eq!(reprint("typeof a?.b[c]?.(d);"), "typeof a?.b[c]?.(d);\n");
    assert_eq!(reprint("new Foo(1).bar;"), "new Foo(1).bar;\n");
    assert_eq!(reprint("x = a ? b : c;"), "x = a ? b : c;\n");
}

// ============================================================================
// Synthesized nodes
// ============================================================================

#[test]
fn test_print_setter_call_shape() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let factory = NodeFactory::new(&arena, &interner);
    let range = TextRange::new(0, 5);

    let count = factory.identifier_expression(interner.intern("count"), range);
    let getter = factory.call(factory.element_access(count, 0, range), Vec::new(), range);
    let next = factory.binary(getter, SyntaxKind::PlusToken, factory.numeric_literal(1, range), range);
    let setter = factory.call(factory.element_access(count, 1, range), vec![next.clone()], range);

    let mut printer = Printer::new(&interner);
    assert_eq!(printer.print_expression_to_string(setter), "count[1](count[0]() + 1)");
}

#[test]
fn test_print_adds_parentheses_by_precedence() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let factory = NodeFactory::new(&arena, &interner);
    let range = TextRange::empty(0);
    let id = |name: &str| factory.identifier_expression(interner.intern(name), range);

    let sum = factory.binary(id("a"), SyntaxKind::PlusToken, id("b"), range);
    let product = factory.binary(sum, SyntaxKind::AsteriskToken, id("c"), range);
    let mut printer = Printer::new(&interner);
    assert_eq!(printer.print_expression_to_string(product), "(a + b) * c");

    let difference = factory.binary(id("a"), SyntaxKind::MinusToken, sum, range);
    assert_eq!(printer.print_expression_to_string(difference), "a - (a + b)");

    let either = factory.binary(id("a"), SyntaxKind::BarBarToken, id("b"), range);
    let nullish = factory.binary(either, SyntaxKind::QuestionQuestionToken, id("c"), range);
    assert_eq!(printer.print_expression_to_string(nullish), "(a || b) ?? c");

    let sequence = factory.binary(id("a"), SyntaxKind::CommaToken, id("b"), range);
    let thunk = factory.thunk(sequence, range);
    assert_eq!(printer.print_expression_to_string(thunk), "() => (a, b)");
}

#[test]
fn test_print_thunk_wraps_object_literal_body() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let assignment = first_expression(&arena, &interner, "o = { a: 1 };");
    let Expression::Binary(binary) = assignment else {
        panic!("expected assignment");
    };
    let factory = NodeFactory::new(&arena, &interner);
    let thunk = factory.thunk(binary.right, TextRange::empty(0));
    assert_eq!(Printer::new(&interner).print_expression_to_string(thunk), "() => ({ a: 1 })");
}

#[test]
fn test_print_synthesized_import() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let factory = NodeFactory::new(&arena, &interner);
    let import = factory.named_import(
        "solid-js",
        &[(interner.intern("createSignal"), interner.intern("_ref"))],
    );
    assert_eq!(
        Printer::new(&interner).print_statements(&[import]),
        "import { createSignal as _ref } from \"solid-js\";\n"
    );
}
