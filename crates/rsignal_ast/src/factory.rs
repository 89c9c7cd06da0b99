//! Construction of synthesized nodes.
//!
//! Every node built here is allocated in the module's arena, flagged
//! `SYNTHESIZED`, and given the range of the source node it stands in for.

use crate::node::*;
use crate::syntax_kind::SyntaxKind;
use crate::types::NodeFlags;
use bumpalo::Bump;
use rsignal_core::intern::{InternedString, StringInterner};
use rsignal_core::text::TextRange;

pub struct NodeFactory<'a> {
    arena: &'a Bump,
    interner: StringInterner,
}

impl<'a> NodeFactory<'a> {
    pub fn new(arena: &'a Bump, interner: &StringInterner) -> Self {
        Self {
            arena,
            interner: interner.clone(),
        }
    }

    pub fn arena(&self) -> &'a Bump {
        self.arena
    }

    #[inline]
    pub fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    pub fn alloc_slice<T>(&self, items: Vec<T>) -> &'a [T] {
        self.arena.alloc_slice_fill_iter(items)
    }

    pub fn identifier(&self, text: InternedString, range: TextRange) -> Identifier {
        Identifier {
            data: NodeData::synthesized(SyntaxKind::Identifier, range),
            text,
        }
    }

    pub fn identifier_expression(&self, text: InternedString, range: TextRange) -> &'a Expression<'a> {
        self.alloc(Expression::Identifier(self.identifier(text, range)))
    }

    pub fn numeric_literal(&self, value: u32, range: TextRange) -> &'a Expression<'a> {
        let text = self.interner.intern(&value.to_string());
        self.alloc(Expression::NumericLiteral(LiteralExpression {
            data: NodeData::synthesized(SyntaxKind::NumericLiteral, range),
            text,
        }))
    }

    /// A double-quoted string literal; `value` must not need escaping.
    pub fn string_literal(&self, value: &str, range: TextRange) -> StringLiteral {
        StringLiteral {
            data: NodeData::synthesized(SyntaxKind::StringLiteral, range),
            text: self.interner.intern(value),
        }
    }

    /// `object[index]`
    pub fn element_access(
        &self,
        object: &'a Expression<'a>,
        index: u32,
        range: TextRange,
    ) -> &'a Expression<'a> {
        self.alloc(Expression::ElementAccess(ElementAccessExpression {
            data: NodeData::synthesized(SyntaxKind::ElementAccessExpression, range),
            expression: object,
            argument_expression: self.numeric_literal(index, range),
        }))
    }

    /// `callee(arguments...)`
    pub fn call(
        &self,
        callee: &'a Expression<'a>,
        arguments: Vec<Expression<'a>>,
        range: TextRange,
    ) -> &'a Expression<'a> {
        self.alloc(Expression::Call(CallExpression {
            data: NodeData::synthesized(SyntaxKind::CallExpression, range),
            expression: callee,
            arguments: self.alloc_slice(arguments),
        }))
    }

    pub fn binary(
        &self,
        left: &'a Expression<'a>,
        operator: SyntaxKind,
        right: &'a Expression<'a>,
        range: TextRange,
    ) -> &'a Expression<'a> {
        self.alloc(Expression::Binary(BinaryExpression {
            data: NodeData::synthesized(SyntaxKind::BinaryExpression, range),
            left,
            operator,
            right,
        }))
    }

    /// `() => body`
    pub fn thunk(&self, body: &'a Expression<'a>, range: TextRange) -> &'a Expression<'a> {
        self.alloc(Expression::ArrowFunction(ArrowFunction {
            data: NodeData::synthesized(SyntaxKind::ArrowFunction, range),
            parameters: &[],
            body: ConciseBody::Expression(body),
        }))
    }

    /// `import { export as local, ... } from "module";`
    pub fn named_import(
        &self,
        module: &str,
        bindings: &[(InternedString, InternedString)],
    ) -> Statement<'a> {
        let range = TextRange::empty(0);
        let specifiers: Vec<ImportSpecifier> = bindings
            .iter()
            .map(|&(export, local)| ImportSpecifier {
                data: NodeData::synthesized(SyntaxKind::ImportSpecifier, range),
                property_name: (export != local).then(|| self.identifier(export, range)),
                name: self.identifier(local, range),
            })
            .collect();
        Statement::ImportDeclaration(ImportDeclaration {
            data: NodeData::synthesized(SyntaxKind::ImportDeclaration, range),
            import_clause: Some(ImportClause {
                data: NodeData::synthesized(SyntaxKind::ImportClause, range),
                name: None,
                named_bindings: Some(NamedImportBindings::NamedImports(
                    self.alloc_slice(specifiers),
                )),
            }),
            module_specifier: self.string_literal(module, range),
        })
    }

    /// Copy of `list` declared with `const`.
    pub fn as_const_declaration_list(
        &self,
        list: &VariableDeclarationList<'a>,
        declarations: &'a [VariableDeclaration<'a>],
    ) -> VariableDeclarationList<'a> {
        let mut data = list.data.clone();
        data.flags.remove(NodeFlags::LET);
        data.flags |= NodeFlags::CONST | NodeFlags::SYNTHESIZED;
        VariableDeclarationList { data, declarations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DeclarationKind;

    #[test]
    fn test_synthesized_nodes_carry_flag_and_range() {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let factory = NodeFactory::new(&arena, &interner);
        let range = TextRange::new(10, 15);

        let x = factory.identifier_expression(interner.intern("count"), range);
        let getter = factory.call(factory.element_access(x, 0, range), Vec::new(), range);

        let data = getter.data();
        assert_eq!(data.kind, SyntaxKind::CallExpression);
        assert_eq!(data.range, range);
        assert!(data.flags.contains(NodeFlags::SYNTHESIZED));
        match getter {
            Expression::Call(call) => {
                assert!(call.arguments.is_empty());
                assert_eq!(call.expression.kind(), SyntaxKind::ElementAccessExpression);
            }
            other => panic!("expected call, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_named_import_omits_redundant_alias() {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let factory = NodeFactory::new(&arena, &interner);
        let create = interner.intern("createSignal");
        let alias = interner.intern("_ref");

        let stmt = factory.named_import("solid-js", &[(create, alias), (create, create)]);
        let Statement::ImportDeclaration(decl) = stmt else {
            panic!("expected import declaration");
        };
        let Some(NamedImportBindings::NamedImports(specifiers)) =
            decl.import_clause.as_ref().and_then(|c| c.named_bindings.clone())
        else {
            panic!("expected named imports");
        };
        assert_eq!(specifiers.len(), 2);
        assert_eq!(specifiers[0].imported_name().text, create);
        assert_eq!(specifiers[0].name.text, alias);
        assert!(specifiers[1].property_name.is_none());
        assert_eq!(interner.resolve(decl.module_specifier.text), "solid-js");
    }

    #[test]
    fn test_as_const_declaration_list() {
        let arena = Bump::new();
        let interner = StringInterner::new();
        let factory = NodeFactory::new(&arena, &interner);
        let list = VariableDeclarationList {
            data: NodeData::new(SyntaxKind::VariableDeclarationList, 0, 12)
                .with_flags(NodeFlags::LET),
            declarations: &[],
        };
        let rewritten = factory.as_const_declaration_list(&list, list.declarations);
        assert_eq!(rewritten.declaration_kind(), DeclarationKind::Const);
        assert_eq!(rewritten.data.range, list.data.range);
    }
}
