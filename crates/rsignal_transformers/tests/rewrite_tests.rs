//! Marker rewrite tests: parse -> bind -> transform -> print.

use bumpalo::Bump;
use rsignal_ast::NodeFactory;
use rsignal_binder::Binder;
use rsignal_core::intern::StringInterner;
use rsignal_parser::parse_module;
use rsignal_printer::Printer;
use rsignal_transformers::{
    MacroError, MacroSettings, MacroTransformer, MemoWritePolicy, RewriteReport, TransformOutput,
    Transformer,
};

const SIGNAL_IMPORT: &str = "import { createSignal as _ref } from \"solid-js\";\n";

/// Helper: the printed module and report, or `None` if nothing changed.
fn transform_with(
    source: &str,
    settings: MacroSettings,
) -> Result<Option<(String, RewriteReport)>, MacroError> {
    let arena = Bump::new();
    let interner = StringInterner::new();
    let (sf, diagnostics) = parse_module(&arena, &interner, "test.js", source);
    assert!(diagnostics.is_empty(), "unexpected parse errors: {:?}", diagnostics);

    let mut binder = Binder::new(&interner, "test.js");
    binder.bind_source_file(&sf);
    let factory = NodeFactory::new(&arena, &interner);
    let transformer = MacroTransformer::new(&interner, settings);
    match transformer.transform(&factory, &binder, &sf)? {
        TransformOutput::Unchanged => Ok(None),
        TransformOutput::Rewritten { statements, report } => {
            Ok(Some((Printer::new(&interner).print_statements(statements), report)))
        }
    }
}

fn rewrite(source: &str) -> String {
    transform_with(source, MacroSettings::default())
        .expect("rewrite failed")
        .map(|(code, _)| code)
        .unwrap_or_else(|| source.to_string())
}

fn rewrite_err(source: &str) -> MacroError {
    transform_with(source, MacroSettings::default()).expect_err("expected a macro error")
}

// ============================================================================
// $signal
// ============================================================================

#[test]
fn test_signal_declaration_and_reads() {
    assert_eq!(
        rewrite("let count = $signal(0);\ncount++;\nconsole.log(count);"),
        format!(
            "{}const count = _ref(0);\ncount[1](count[0]() + 1);\nconsole.log(count[0]());\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_write_forms() {
    let output = rewrite("let x = $signal(1); x = 5; x += 2; x **= 2; --x; x ??= d;");
    assert_eq!(
        output,
        format!(
            "{}const x = _ref(1);\nx[1](5);\nx[1](x[0]() + 2);\nx[1](x[0]() ** 2);\nx[1](x[0]() - 1);\nx[1](x[0]() ?? d);\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_prefix_and_postfix_updates() {
    assert_eq!(
        rewrite("let x = $signal(1); x++; ++x; x--; --x;"),
        format!(
            "{}const x = _ref(1);\nx[1](x[0]() + 1);\nx[1](x[0]() + 1);\nx[1](x[0]() - 1);\nx[1](x[0]() - 1);\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_setter_argument_is_rewritten_and_parenthesized() {
    assert_eq!(
        rewrite("let x = $signal(1); x = x + 1; x *= a + b;"),
        format!(
            "{}const x = _ref(1);\nx[1](x[0]() + 1);\nx[1](x[0]() * (a + b));\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_options_argument_is_kept() {
    assert_eq!(
        rewrite("let x = $signal(1, { equals: false });"),
        format!("{}const x = _ref(1, {{ equals: false }});\n", SIGNAL_IMPORT)
    );
}

#[test]
fn test_signal_in_function_and_closure() {
    assert_eq!(
        rewrite("function Counter() { let count = $signal(0); const inc = () => count++; return count; }"),
        format!(
            "{}function Counter() {{\n    const count = _ref(0);\n    const inc = () => count[1](count[0]() + 1);\n    return count[0]();\n}}\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_renderer_insert_gets_accessor() {
    assert_eq!(
        rewrite("let c = $signal(0); _$insert(el, c); f(c);"),
        format!("{}const c = _ref(0);\n_$insert(el, c[0]);\nf(c[0]());\n", SIGNAL_IMPORT)
    );
}

#[test]
fn test_signal_shorthand_property() {
    assert_eq!(
        rewrite("let count = $signal(0); const o = { count, other: count };"),
        format!(
            "{}const count = _ref(0);\nconst o = {{ count: count[0](), other: count[0]() }};\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_respects_shadowing() {
    assert_eq!(
        rewrite("let c = $signal(0); function f(c) { return c; } c;"),
        format!(
            "{}const c = _ref(0);\nfunction f(c) {{\n    return c;\n}}\nc[0]();\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_signal_in_template_and_loop_head() {
    assert_eq!(
        rewrite("for (let i = $signal(0); i < 3; i++) { log(`${i}`); }"),
        format!(
            "{}for (const i = _ref(0); i[0]() < 3; i[1](i[0]() + 1)) {{\n    log(`${{i[0]()}}`);\n}}\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_exported_signal() {
    assert_eq!(
        rewrite("export let c = $signal(0);"),
        format!("{}export const c = _ref(0);\n", SIGNAL_IMPORT)
    );
}

#[test]
fn test_bare_signal_only_renames_callee() {
    assert_eq!(rewrite("$signal(0);"), format!("{}_ref(0);\n", SIGNAL_IMPORT));
    assert_eq!(
        rewrite("f([$signal(0)]);"),
        format!("{}f([_ref(0)]);\n", SIGNAL_IMPORT)
    );
}

#[test]
fn test_nested_marker_binds_enclosing_declaration() {
    assert_eq!(
        rewrite("let a = foo($signal(0)); a++;"),
        format!("{}const a = foo(_ref(0));\na[1](a[0]() + 1);\n", SIGNAL_IMPORT)
    );
    assert_eq!(
        rewrite("let w = wrap($memo(1)); log(w);"),
        "import { createMemo as _memo } from \"solid-js\";\nconst w = wrap(_memo(() => 1));\nlog(w());\n"
    );
}

#[test]
fn test_nested_marker_is_validated() {
    assert!(matches!(
        rewrite_err("const pair = [$signal(0)];"),
        MacroError::InvalidDeclarationKind { .. }
    ));
    assert!(matches!(
        rewrite_err("const w = wrap($memo(1));"),
        MacroError::InvalidDeclarationKind { .. }
    ));
    assert!(matches!(
        rewrite_err("let a = 1, b = foo($signal(0));"),
        MacroError::MultipleDeclarators { .. }
    ));
    assert!(matches!(
        rewrite_err("let [a] = foo($signal(0));"),
        MacroError::NonIdentifierBinding { .. }
    ));
}

#[test]
fn test_function_boundary_ends_binding_search() {
    assert_eq!(
        rewrite("const make = () => $signal(0);"),
        format!("{}const make = () => _ref(0);\n", SIGNAL_IMPORT)
    );
    assert_eq!(
        rewrite("const make = function () { return $signal(0); };"),
        format!(
            "{}const make = function () {{\n    return _ref(0);\n}};\n",
            SIGNAL_IMPORT
        )
    );
}

#[test]
fn test_directive_prologue_stays_first() {
    assert_eq!(
        rewrite("'use strict';\n'use client';\nlet x = $signal(0);\nx++;"),
        format!(
            "'use strict';\n'use client';\n{}const x = _ref(0);\nx[1](x[0]() + 1);\n",
            SIGNAL_IMPORT
        )
    );
    assert_eq!(
        rewrite("f();\n'not a directive';\nlet x = $signal(0);"),
        format!("{}f();\n'not a directive';\nconst x = _ref(0);\n", SIGNAL_IMPORT)
    );
}

#[test]
fn test_aliases_avoid_names_in_use() {
    assert_eq!(
        rewrite("const _ref = 1; let a = $signal(0); let b = $signal(1);"),
        "import { createSignal as _ref2, createSignal as _ref3 } from \"solid-js\";\nconst _ref = 1;\nconst a = _ref2(0);\nconst b = _ref3(1);\n"
    );
}

// ============================================================================
// $memo
// ============================================================================

#[test]
fn test_memo_wraps_value_and_rewrites_reads() {
    assert_eq!(
        rewrite("let a = $signal(1); let double = $memo(a * 2); log(double); _$insert(el, double);"),
        "import { createSignal as _ref, createMemo as _memo } from \"solid-js\";\nconst a = _ref(1);\nconst double = _memo(() => a[0]() * 2);\nlog(double());\n_$insert(el, double());\n"
    );
}

#[test]
fn test_memo_keeps_function_argument() {
    assert_eq!(
        rewrite("let d = $memo(() => 1); let e = $memo(function () { return 2; });"),
        "import { createMemo as _memo, createMemo as _memo2 } from \"solid-js\";\nconst d = _memo(() => 1);\nconst e = _memo2(function () {\n    return 2;\n});\n"
    );
}

#[test]
fn test_memo_write_is_rejected_by_default() {
    match rewrite_err("let d = $memo(1); d = 2;") {
        MacroError::ReadonlyBindingWrite { marker, name, .. } => {
            assert_eq!(marker, "$memo");
            assert_eq!(name, "d");
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_memo_write_can_be_ignored() {
    let settings = MacroSettings {
        memo_writes: MemoWritePolicy::Ignore,
        ..MacroSettings::default()
    };
    let (code, report) = transform_with("let d = $memo(1); d = 2; d;", settings)
        .expect("rewrite failed")
        .expect("module changed");
    assert_eq!(
        code,
        "import { createMemo as _memo } from \"solid-js\";\nconst d = _memo(() => 1);\nd = 2;\nd();\n"
    );
    assert_eq!(report.writes, 0);
    assert_eq!(report.reads, 1);
}

// ============================================================================
// Validation
// ============================================================================

#[test]
fn test_const_declaration_is_rejected() {
    assert!(matches!(
        rewrite_err("const z = $signal(0);"),
        MacroError::InvalidDeclarationKind { .. }
    ));
    assert!(matches!(
        rewrite_err("var z = $memo(() => 1);"),
        MacroError::InvalidDeclarationKind { .. }
    ));
}

#[test]
fn test_multiple_declarators_are_rejected() {
    let error = rewrite_err("let a = $signal(0), b = $signal(1);");
    assert!(matches!(error, MacroError::MultipleDeclarators { .. }));
    assert_eq!(
        error.to_string(),
        "Please declare one variable in one let statement with $signal() macro."
    );
}

#[test]
fn test_destructuring_binding_is_rejected() {
    let source = "let { a } = $signal({ a: 1 });";
    let error = rewrite_err(source);
    assert!(matches!(error, MacroError::NonIdentifierBinding { .. }));
    assert_eq!(&source[error.range().to_range()], "{ a }");
}

#[test]
fn test_argument_count_is_checked() {
    assert!(matches!(
        rewrite_err("let a = $signal();"),
        MacroError::InvalidArgumentCount { found: 0, .. }
    ));
    assert!(matches!(
        rewrite_err("$signal(1, 2, 3);"),
        MacroError::InvalidArgumentCount { found: 3, .. }
    ));
    assert!(matches!(
        rewrite_err("let m = $memo(a, b);"),
        MacroError::InvalidArgumentCount { found: 2, .. }
    ));
}

#[test]
fn test_unsupported_signal_writes() {
    let source = "let c = $signal(0); [c] = pair;";
    match rewrite_err(source) {
        MacroError::UnsupportedWrite { form, range, .. } => {
            assert_eq!(form, "a destructuring assignment");
            assert_eq!(&source[range.to_range()], "c");
        }
        other => panic!("unexpected error {:?}", other),
    }
    assert!(matches!(
        rewrite_err("let c = $signal(0); for (c of xs) {}"),
        MacroError::UnsupportedWrite { form: "a for-in/of head", .. }
    ));
}

#[test]
fn test_error_lowers_to_diagnostic() {
    let diagnostic = rewrite_err("const z = $signal(0);").to_diagnostic("app.js");
    assert_eq!(diagnostic.code, 9001);
    assert_eq!(diagnostic.message_text, "Should use 'let' with $signal() macro.");
    assert_eq!(diagnostic.file.as_deref(), Some("app.js"));
}

// ============================================================================
// Module level
// ============================================================================

#[test]
fn test_module_without_markers_is_unchanged() {
    let result = transform_with("let a = 1;\na++;\n", MacroSettings::default()).expect("ok");
    assert!(result.is_none());
}

#[test]
fn test_rewrite_is_idempotent() {
    let once = rewrite("let c = $signal(0); c += 1; let d = $memo(c * 2);");
    let again = transform_with(&once, MacroSettings::default()).expect("ok");
    assert!(again.is_none());
}

#[test]
fn test_macro_imports_are_stripped() {
    assert_eq!(
        rewrite("import { $signal, $memo } from 'solid-js/macro';\nlet c = $signal(0);"),
        format!("{}const c = _ref(0);\n", SIGNAL_IMPORT)
    );
    assert_eq!(
        rewrite("import { $signal, other } from 'macros/ref';"),
        "import { other } from 'macros/ref';\n"
    );
    assert_eq!(
        rewrite("import { $signal } from 'elsewhere';"),
        "import { $signal } from 'elsewhere';"
    );
}

#[test]
fn test_runtime_module_is_configurable() {
    let settings = MacroSettings {
        runtime_module: "my-runtime".to_string(),
        ..MacroSettings::default()
    };
    let (code, _) = transform_with("let c = $signal(0);", settings)
        .expect("rewrite failed")
        .expect("module changed");
    assert_eq!(
        code,
        "import { createSignal as _ref } from \"my-runtime\";\nconst c = _ref(0);\n"
    );
}

#[test]
fn test_report_counts() {
    let (_, report) = transform_with(
        "let a = $signal(0); a++; a; let b = $memo(a); b; $signal(1);",
        MacroSettings::default(),
    )
    .expect("rewrite failed")
    .expect("module changed");
    assert_eq!(
        report,
        RewriteReport {
            signals: 2,
            memos: 1,
            bound: 2,
            bare: 1,
            reads: 3,
            writes: 1,
            imports: 3,
        }
    );
    assert_eq!(report.markers(), 3);
}
