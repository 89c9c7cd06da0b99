//! Discovery of marker calls and macro imports.

use rsignal_ast::node::*;
use rsignal_ast::visitor::{walk_class, walk_expression, walk_statement, AstVisitor};
use rsignal_core::intern::{InternedString, StringInterner};
use rsignal_core::text::TextRange;

/// The declaration a marker call initializes.
#[derive(Debug, Clone, Copy)]
pub struct BindingContext<'a> {
    pub list: &'a VariableDeclarationList<'a>,
    pub declaration: &'a VariableDeclaration<'a>,
}

/// A call whose callee is one of the marker names.
#[derive(Debug, Clone, Copy)]
pub struct MarkerCall<'a> {
    pub marker: InternedString,
    pub call: &'a CallExpression<'a>,
    /// The nearest declarator whose initializer contains the call, without
    /// crossing a function or class. `None` for a bare marker.
    pub binding: Option<BindingContext<'a>>,
}

impl<'a> MarkerCall<'a> {
    pub fn range(&self) -> TextRange {
        self.call.data.range
    }
}

#[derive(Debug, Default)]
pub struct CollectedMarkers<'a> {
    /// In source order.
    pub calls: Vec<MarkerCall<'a>>,
    /// Imports of a marker name from a macro module.
    pub macro_imports: Vec<&'a ImportDeclaration<'a>>,
}

impl<'a> CollectedMarkers<'a> {
    /// Nothing to rewrite: no marker calls and no macro imports.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.macro_imports.is_empty()
    }
}

pub struct MarkerCollector<'a, 'c> {
    interner: &'c StringInterner,
    markers: &'c [InternedString],
    macro_modules: &'c [String],
    enclosing: Option<Enclosing<'a>>,
    collected: CollectedMarkers<'a>,
}

/// The declarator being walked. Only the first marker call inside it is
/// bound to it; later ones are bare.
#[derive(Clone, Copy)]
struct Enclosing<'a> {
    binding: BindingContext<'a>,
    claimed: bool,
}

impl<'a, 'c> MarkerCollector<'a, 'c> {
    pub fn new(
        interner: &'c StringInterner,
        markers: &'c [InternedString],
        macro_modules: &'c [String],
    ) -> Self {
        Self {
            interner,
            markers,
            macro_modules,
            enclosing: None,
            collected: CollectedMarkers::default(),
        }
    }

    pub fn collect(mut self, source_file: &SourceFile<'a>) -> CollectedMarkers<'a> {
        self.visit_source_file(source_file);
        self.collected
    }

    fn with_enclosing(&mut self, binding: Option<BindingContext<'a>>, walk: impl FnOnce(&mut Self)) {
        let saved = std::mem::replace(
            &mut self.enclosing,
            binding.map(|binding| Enclosing {
                binding,
                claimed: false,
            }),
        );
        walk(self);
        self.enclosing = saved;
    }

    fn claim_binding(&mut self) -> Option<BindingContext<'a>> {
        let enclosing = self.enclosing.as_mut()?;
        if enclosing.claimed {
            return None;
        }
        enclosing.claimed = true;
        Some(enclosing.binding)
    }

    fn marker_of(&self, call: &CallExpression<'a>) -> Option<InternedString> {
        let callee = call.expression.as_identifier()?;
        self.markers.iter().copied().find(|&m| m == callee.text)
    }

    fn is_macro_import(&self, import: &ImportDeclaration<'a>) -> bool {
        let module = self.interner.resolve(import.module_specifier.text);
        if !self.macro_modules.iter().any(|m| m == module) {
            return false;
        }
        match import.import_clause.as_ref().and_then(|c| c.named_bindings.as_ref()) {
            Some(NamedImportBindings::NamedImports(specifiers)) => specifiers
                .iter()
                .any(|s| self.markers.contains(&s.name.text)),
            _ => false,
        }
    }
}

impl<'a, 'c> AstVisitor<'a> for MarkerCollector<'a, 'c> {
    fn visit_statement(&mut self, stmt: &'a Statement<'a>) {
        if let Statement::ImportDeclaration(import) = stmt {
            if self.is_macro_import(import) {
                self.collected.macro_imports.push(import);
            }
        }
        walk_statement(self, stmt);
    }

    fn visit_variable_declaration_list(&mut self, node: &'a VariableDeclarationList<'a>) {
        for declaration in node.declarations.iter() {
            let binding = BindingContext {
                list: node,
                declaration,
            };
            self.with_enclosing(Some(binding), |v| v.visit_variable_declaration(declaration));
        }
    }

    fn visit_function(&mut self, node: &'a FunctionLikeDeclaration<'a>) {
        self.with_enclosing(None, |v| {
            v.visit_parameters(node.parameters);
            v.visit_block(&node.body);
        });
    }

    fn visit_method(&mut self, node: &'a MethodDeclaration<'a>) {
        self.visit_property_name(&node.name);
        self.with_enclosing(None, |v| {
            v.visit_parameters(node.parameters);
            v.visit_block(&node.body);
        });
    }

    fn visit_class(&mut self, node: &'a ClassLikeDeclaration<'a>) {
        self.with_enclosing(None, |v| walk_class(v, node));
    }

    fn visit_expression(&mut self, expr: &'a Expression<'a>) {
        match expr {
            Expression::ArrowFunction(_) => self.with_enclosing(None, |v| walk_expression(v, expr)),
            _ => walk_expression(self, expr),
        }
    }

    fn visit_call_expression(&mut self, node: &'a CallExpression<'a>) {
        if let Some(marker) = self.marker_of(node) {
            let binding = self.claim_binding();
            self.collected.calls.push(MarkerCall {
                marker,
                call: node,
                binding,
            });
        }
        self.visit_expression(node.expression);
        for arg in node.arguments.iter() {
            self.visit_expression(arg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bumpalo::Bump;
    use rsignal_parser::parse_module;

    fn collect_in(source: &str, f: impl FnOnce(&StringInterner, CollectedMarkers<'_>)) {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let (sf, _) = parse_module(&arena, &interner, "test.js", source);
        let markers = [interner.intern("$signal"), interner.intern("$memo")];
        let modules = vec!["solid-js/macro".to_string()];
        let collected = MarkerCollector::new(&interner, &markers, &modules).collect(&sf);
        f(&interner, collected);
    }

    #[test]
    fn test_finds_markers_in_source_order() {
        collect_in("let a = $signal(0); f($memo(() => a)); g(1);", |interner, collected| {
            let names: Vec<_> = collected.calls.iter().map(|c| interner.resolve(c.marker)).collect();
            assert_eq!(names, vec!["$signal", "$memo"]);
            assert!(collected.calls[0].binding.is_some());
            assert!(collected.calls[1].binding.is_none());
        });
    }

    #[test]
    fn test_binding_sees_through_parentheses() {
        collect_in("let a = ($signal(0));", |_, collected| {
            let binding = collected.calls[0].binding.expect("binding");
            assert_eq!(binding.list.declarations.len(), 1);
        });
    }

    #[test]
    fn test_nested_marker_binds_enclosing_declarator() {
        collect_in("const pair = [wrap($signal(0))];", |_, collected| {
            let binding = collected.calls[0].binding.expect("binding");
            assert_eq!(binding.list.declarations.len(), 1);
        });
    }

    #[test]
    fn test_function_boundary_stops_binding() {
        collect_in(
            "let f = () => $signal(0); let g = function () { return $memo(1); }; let C = class { x = $signal(2); }; let o = { m() { return $signal(3); } };",
            |_, collected| {
                assert_eq!(collected.calls.len(), 4);
                assert!(collected.calls.iter().all(|c| c.binding.is_none()));
            },
        );
    }

    #[test]
    fn test_only_first_marker_binds() {
        collect_in("let a = $memo(g($signal(0)));", |interner, collected| {
            assert_eq!(interner.resolve(collected.calls[0].marker), "$memo");
            assert!(collected.calls[0].binding.is_some());
            assert!(collected.calls[1].binding.is_none());
        });
    }

    #[test]
    fn test_declaration_inside_function_in_initializer() {
        collect_in("const f = () => { let a = $signal(0); };", |_, collected| {
            let binding = collected.calls[0].binding.expect("binding");
            assert_eq!(binding.list.declaration_kind(), rsignal_ast::types::DeclarationKind::Let);
        });
    }

    #[test]
    fn test_macro_imports() {
        collect_in(
            "import { $signal } from 'solid-js/macro'; import { x } from 'solid-js/macro'; import { $memo } from 'other';",
            |_, collected| {
                assert_eq!(collected.macro_imports.len(), 1);
                assert!(collected.calls.is_empty());
                assert!(!collected.is_empty());
            },
        );
    }
}
