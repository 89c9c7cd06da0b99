//! The edit plan: what the rewriter replaces, keyed by the source range of
//! the node being replaced.

use rsignal_ast::SyntaxKind;
use rsignal_core::intern::InternedString;
use rsignal_core::text::{TextPos, TextRange};
use rustc_hash::{FxHashMap, FxHashSet};

/// Replacement for a marker call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerEdit {
    /// Local name of the imported constructor.
    pub alias: InternedString,
    /// Wrap the first argument in `() => arg`.
    pub thunk_argument: bool,
}

/// Replacement for an identifier read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadEdit {
    /// `x[0]()`
    SignalGetter(InternedString),
    /// `x[0]`
    SignalAccessor(InternedString),
    /// `y()`
    MemoGetter(InternedString),
}

/// What the setter receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetterValue {
    /// `x[1](v)`
    Assign,
    /// `x[1](x[0]() op v)`
    Combine(SyntaxKind),
    /// `x[1](x[0]() op 1)`, `op` being `+` or `-`.
    Step(SyntaxKind),
}

/// Replacement for an assignment or update expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteEdit {
    pub name: InternedString,
    pub value: SetterValue,
}

#[derive(Debug, Default)]
pub struct RewritePlan {
    markers: FxHashMap<TextRange, MarkerEdit>,
    const_declarations: FxHashSet<TextRange>,
    reads: FxHashMap<TextRange, ReadEdit>,
    writes: FxHashMap<TextRange, WriteEdit>,
    stripped_imports: FxHashSet<TextRange>,
    stripped_names: FxHashSet<InternedString>,
}

impl RewritePlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rename_marker(&mut self, call: TextRange, edit: MarkerEdit) {
        self.markers.insert(call, edit);
    }

    /// Turn the `let` list at `range` into `const`.
    pub fn make_const(&mut self, range: TextRange) {
        self.const_declarations.insert(range);
    }

    pub fn rewrite_read(&mut self, identifier: TextRange, edit: ReadEdit) {
        self.reads.insert(identifier, edit);
    }

    pub fn rewrite_write(&mut self, expression: TextRange, edit: WriteEdit) {
        self.writes.insert(expression, edit);
    }

    /// Remove the specifiers binding any of `names` from the import at `range`.
    pub fn strip_import(&mut self, range: TextRange, names: &[InternedString]) {
        self.stripped_imports.insert(range);
        self.stripped_names.extend(names.iter().copied());
    }

    pub fn marker(&self, call: TextRange) -> Option<MarkerEdit> {
        self.markers.get(&call).copied()
    }

    pub fn is_const_declaration(&self, range: TextRange) -> bool {
        self.const_declarations.contains(&range)
    }

    pub fn read(&self, identifier: TextRange) -> Option<ReadEdit> {
        self.reads.get(&identifier).copied()
    }

    pub fn write(&self, expression: TextRange) -> Option<WriteEdit> {
        self.writes.get(&expression).copied()
    }

    pub fn is_stripped_import(&self, range: TextRange) -> bool {
        self.stripped_imports.contains(&range)
    }

    pub fn is_stripped_name(&self, name: InternedString) -> bool {
        self.stripped_names.contains(&name)
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
            && self.const_declarations.is_empty()
            && self.reads.is_empty()
            && self.writes.is_empty()
            && self.stripped_imports.is_empty()
    }

    /// Start positions of every edited node, sorted.
    pub(crate) fn edit_positions(&self) -> Vec<TextPos> {
        let mut positions: Vec<TextPos> = self
            .markers
            .keys()
            .chain(self.const_declarations.iter())
            .chain(self.reads.keys())
            .chain(self.writes.keys())
            .map(|range| range.pos)
            .collect();
        positions.sort_unstable();
        positions.dedup();
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsignal_core::intern::StringInterner;

    #[test]
    fn test_lookup_by_range() {
        let interner = StringInterner::new();
        let count = interner.intern("count");
        let mut plan = RewritePlan::new();
        assert!(plan.is_empty());

        plan.rewrite_read(TextRange::new(20, 25), ReadEdit::SignalGetter(count));
        plan.rewrite_write(
            TextRange::new(30, 37),
            WriteEdit {
                name: count,
                value: SetterValue::Step(SyntaxKind::PlusToken),
            },
        );
        plan.make_const(TextRange::new(0, 18));

        assert_eq!(plan.read(TextRange::new(20, 25)), Some(ReadEdit::SignalGetter(count)));
        assert_eq!(plan.read(TextRange::new(20, 26)), None);
        assert!(plan.write(TextRange::new(30, 37)).is_some());
        assert!(plan.is_const_declaration(TextRange::new(0, 18)));
        assert_eq!(plan.edit_positions(), vec![0, 20, 30]);
    }
}
