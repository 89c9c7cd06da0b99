//! Binder integration tests.
//!
//! Tests the parse -> bind pipeline and verifies symbols and references.

use bumpalo::Bump;
use rsignal_binder::{Binder, ReferenceKind, Symbol, SymbolKind, WriteForm};
use rsignal_core::intern::StringInterner;
use rsignal_parser::parse_module;

/// Helper: parse and bind source, return the binder.
fn bind(source: &str) -> (Binder, StringInterner) {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", source);
    assert!(diagnostics.is_empty(), "unexpected parse errors: {:?}", diagnostics);

    let mut binder = Binder::new(&interner, "test.js");
    binder.bind_source_file(&sf);
    (binder, interner)
}

/// Helper: the symbol declared at the first occurrence of `needle`.
fn declared<'b>(binder: &'b Binder, source: &str, needle: &str) -> &'b Symbol {
    let pos = source.find(needle).expect("needle in source") as u32;
    binder
        .symbol_declared_at(pos)
        .unwrap_or_else(|| panic!("no symbol declared at {:?}", needle))
}

fn kinds(symbol: &Symbol) -> Vec<ReferenceKind> {
    symbol.references.iter().map(|r| r.kind).collect()
}

// ============================================================================
// Symbol Creation
// ============================================================================

#[test]
fn test_bind_empty_file() {
    let (binder, _) = bind("");
    assert!(binder.symbols().is_empty());
}

#[test]
fn test_bind_declarations() {
    let source = "let a = 1; const b = 2; var c; function d() {} class E {}";
    let (binder, _) = bind(source);
    assert_eq!(binder.symbols().len(), 5);
    assert_eq!(declared(&binder, source, "a =").kind, SymbolKind::Let);
    assert_eq!(declared(&binder, source, "b =").kind, SymbolKind::Const);
    assert_eq!(declared(&binder, source, "c;").kind, SymbolKind::Var);
    assert_eq!(declared(&binder, source, "d()").kind, SymbolKind::Function);
    assert_eq!(declared(&binder, source, "E {").kind, SymbolKind::Class);
}

#[test]
fn test_bind_imports() {
    let source = "import d, { a, b as c } from \"m\"; import * as ns from \"n\";";
    let (binder, _) = bind(source);
    assert_eq!(binder.symbols().len(), 4);
    assert!(binder.symbols().iter().all(|s| s.kind == SymbolKind::Import));
    assert!(binder.is_name_in_use("c"));
    assert!(binder.is_name_in_use("ns"));
}

#[test]
fn test_bind_destructuring_declarations() {
    let source = "const { a, b: [c, , d = 1], ...rest } = obj;";
    let (binder, _) = bind(source);
    assert_eq!(binder.symbols().len(), 4);
    assert!(binder.is_name_in_use("obj"));
    assert!(binder.is_name_in_use("rest"));
}

#[test]
fn test_var_hoists_out_of_blocks() {
    let source = "function f() { if (x) { var v = 1; } return v; }";
    let (binder, _) = bind(source);
    let v = declared(&binder, source, "v =");
    assert_eq!(v.kind, SymbolKind::Var);
    assert_eq!(v.reads().count(), 1);
}

#[test]
fn test_function_declaration_is_hoisted() {
    let source = "f(); function f() {}";
    let (binder, _) = bind(source);
    let f = declared(&binder, source, "f() {}");
    // The call's callee resolves to the declaration below it.
    assert_eq!(kinds(f), vec![ReferenceKind::Read]);
    assert_eq!(f.references[0].range.pos, 0);
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_shadowing_in_block() {
    let source = "let x = 1; { let x = 2; x; } x;";
    let (binder, _) = bind(source);
    let outer = declared(&binder, source, "x = 1");
    let inner = declared(&binder, source, "x = 2");
    assert_ne!(outer.id, inner.id);
    assert_eq!(outer.reads().count(), 1);
    assert_eq!(inner.reads().count(), 1);
}

#[test]
fn test_parameter_shadows_outer_binding() {
    let source = "let count = 0; function f(count) { return count; } count;";
    let (binder, _) = bind(source);
    let outer = declared(&binder, source, "count = 0");
    assert_eq!(outer.reads().count(), 1);
    let param = declared(&binder, source, "count)");
    assert_eq!(param.kind, SymbolKind::Parameter);
    assert_eq!(param.reads().count(), 1);
}

#[test]
fn test_arrow_parameter_shadows() {
    let source = "let n = 0; const f = (n) => n + 1; n;";
    let (binder, _) = bind(source);
    assert_eq!(declared(&binder, source, "n = 0").reads().count(), 1);
}

#[test]
fn test_catch_parameter_scope() {
    let source = "let e = 1; try {} catch (e) { e; } e;";
    let (binder, _) = bind(source);
    assert_eq!(declared(&binder, source, "e = 1").reads().count(), 1);
    assert_eq!(declared(&binder, source, "e) {").kind, SymbolKind::CatchVariable);
}

#[test]
fn test_loop_head_binding_is_scoped_to_loop() {
    let source = "let i = 0; for (let i = 0; i < 3; i++) {} i;";
    let (binder, _) = bind(source);
    let outer = declared(&binder, source, "i = 0;");
    assert_eq!(kinds(outer), vec![ReferenceKind::Read]);
}

#[test]
fn test_named_function_expression_name_is_local() {
    let source = "const g = function inner() { return inner; }; inner;";
    let (binder, _) = bind(source);
    let inner = declared(&binder, source, "inner()");
    assert_eq!(inner.reads().count(), 1);
    assert!(binder.is_name_in_use("inner"));
}

#[test]
fn test_unresolved_names_are_in_use() {
    let (binder, _) = bind("console.log(window.foo);");
    assert!(binder.symbols().is_empty());
    assert!(binder.is_name_in_use("console"));
    assert!(binder.is_name_in_use("window"));
    assert!(!binder.is_name_in_use("log"));
}

// ============================================================================
// Reference classification
// ============================================================================

#[test]
fn test_plain_assignment_and_compound() {
    let source = "let x = 0; x = 1; x += 2; x;";
    let (binder, _) = bind(source);
    let x = declared(&binder, source, "x = 0");
    assert_eq!(
        kinds(x),
        vec![
            ReferenceKind::Write(WriteForm::Assignment),
            ReferenceKind::Write(WriteForm::Compound(rsignal_ast::SyntaxKind::PlusToken)),
            ReferenceKind::Read,
        ]
    );
    let assignment = &x.references[0];
    assert_eq!(&source[assignment.expression_range.to_range()], "x = 1");
    assert_eq!(&source[assignment.range.to_range()], "x");
}

#[test]
fn test_update_expressions() {
    let source = "let x = 0; x++; --x; (x)++;";
    let (binder, _) = bind(source);
    let x = declared(&binder, source, "x = 0");
    let forms: Vec<_> = x
        .writes()
        .map(|r| match r.kind {
            ReferenceKind::Write(WriteForm::Update { prefix, .. }) => prefix,
            other => panic!("unexpected {:?}", other),
        })
        .collect();
    assert_eq!(forms, vec![false, true, false]);
    assert_eq!(&source[x.references[2].expression_range.to_range()], "(x)++");
}

#[test]
fn test_destructuring_assignment_targets() {
    let source = "let a = 0, b = 0; [a, { b = d }] = pair;";
    let (binder, _) = bind(source);
    let a = declared(&binder, source, "a = 0");
    let b = declared(&binder, source, "b = 0");
    assert_eq!(kinds(a), vec![ReferenceKind::Write(WriteForm::Destructuring)]);
    assert_eq!(kinds(b), vec![ReferenceKind::Write(WriteForm::Destructuring)]);
    assert!(binder.is_name_in_use("d"));
}

#[test]
fn test_for_in_of_head() {
    let source = "let k; for (k in o) {} for ([k] of xs) {}";
    let (binder, _) = bind(source);
    let k = declared(&binder, source, "k;");
    assert_eq!(
        kinds(k),
        vec![
            ReferenceKind::Write(WriteForm::ForInOf),
            ReferenceKind::Write(WriteForm::Destructuring),
        ]
    );
}

#[test]
fn test_member_assignment_reads_object() {
    let source = "let o = {}; o.x = 1; o[k] += 1;";
    let (binder, _) = bind(source);
    let o = declared(&binder, source, "o = {}");
    assert_eq!(kinds(o), vec![ReferenceKind::Read, ReferenceKind::Read]);
}

#[test]
fn test_call_argument_records_callee() {
    let source = "let c = 0; log(c); log((c)); log(c + 1); obj.log(c);";
    let (binder, interner) = bind(source);
    let c = declared(&binder, source, "c = 0");
    let callees: Vec<_> = c
        .reads()
        .map(|r| r.call_callee.map(|k| interner.resolve(k).to_string()))
        .collect();
    assert_eq!(
        callees,
        vec![Some("log".to_string()), Some("log".to_string()), None, None]
    );
}

#[test]
fn test_shorthand_property_read() {
    let source = "let count = 0; const o = { count, other: count };";
    let (binder, _) = bind(source);
    let count = declared(&binder, source, "count = 0");
    let shorthand: Vec<_> = count.reads().map(|r| r.shorthand).collect();
    assert_eq!(shorthand, vec![true, false]);
}

#[test]
fn test_property_names_are_not_references() {
    let source = "let a = 0; const o = { a: 1 }; o.a; class C { a = 2; a() {} }";
    let (binder, _) = bind(source);
    assert!(declared(&binder, source, "a = 0").references.is_empty());
}

#[test]
fn test_references_in_nested_functions() {
    let source = "let n = 0; const f = () => { n = n + 1; }; function g() { return n; }";
    let (binder, _) = bind(source);
    let n = declared(&binder, source, "n = 0");
    assert_eq!(n.reads().count(), 2);
    assert_eq!(n.writes().count(), 1);
}

#[test]
fn test_exported_locals_are_in_use() {
    let (binder, _) = bind("let a = 1; export { a as b };");
    assert!(binder.is_name_in_use("a"));
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_redeclare_block_scoped_variable() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(&arena, &interner, "test.js", "let a = 1; let a = 2;");
    let mut binder = Binder::new(&interner, "test.js");
    binder.bind_source_file(&sf);
    let diagnostics = binder.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    let diagnostic = &diagnostics.diagnostics()[0];
    assert_eq!(diagnostic.code, 2451);
    assert_eq!(diagnostic.span.map(|s| s.start), Some(15));
    assert!(diagnostic.message_text.contains("'a'"));
}

#[test]
fn test_var_redeclaration_merges() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(&arena, &interner, "test.js", "var a = 1; var a = 2; a;");
    let mut binder = Binder::new(&interner, "test.js");
    binder.bind_source_file(&sf);
    assert!(binder.take_diagnostics().is_empty());
    assert_eq!(binder.symbols().len(), 1);
    assert_eq!(binder.symbol_declared_at(15).map(|s| s.id), binder.symbol_declared_at(4).map(|s| s.id));
}

#[test]
fn test_let_conflicts_with_parameter() {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, _) = parse_module(&arena, &interner, "test.js", "function f(a) { let a; }");
    let mut binder = Binder::new(&interner, "test.js");
    binder.bind_source_file(&sf);
    assert_eq!(binder.take_diagnostics().len(), 1);
}
