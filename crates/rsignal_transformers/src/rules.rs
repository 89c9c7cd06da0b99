//! The marker rules.
//!
//! A rule validates one marker call and its declaration, then records the
//! edits for the call, the declaration and every occurrence of the bound
//! name in the [`RewritePlan`]. Rules never touch the tree themselves.

use crate::collector::MarkerCall;
use crate::error::MacroError;
use crate::imports::ImportRegistry;
use crate::plan::{MarkerEdit, ReadEdit, RewritePlan, SetterValue, WriteEdit};
use crate::settings::{MacroSettings, MemoWritePolicy, RuleConfig};
use crate::uid::UidGenerator;
use rsignal_ast::types::DeclarationKind;
use rsignal_ast::SyntaxKind;
use rsignal_binder::{Binder, Reference, ReferenceKind, WriteForm};
use rsignal_core::intern::{InternedString, StringInterner};
use std::ops::RangeInclusive;
use tracing::debug;

/// Counts for one rewritten module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub signals: usize,
    pub memos: usize,
    /// Markers initializing a declaration.
    pub bound: usize,
    /// Markers rewritten in place.
    pub bare: usize,
    pub reads: usize,
    pub writes: usize,
    pub imports: usize,
}

impl RewriteReport {
    pub fn markers(&self) -> usize {
        self.bound + self.bare
    }
}

/// Shared state the rules write into while a module is processed.
pub struct RuleContext<'r> {
    interner: &'r StringInterner,
    binder: &'r Binder,
    renderer_insert: InternedString,
    memo_writes: MemoWritePolicy,
    uids: UidGenerator,
    pub plan: RewritePlan,
    pub imports: ImportRegistry,
    pub report: RewriteReport,
}

impl<'r> RuleContext<'r> {
    pub fn new(interner: &'r StringInterner, binder: &'r Binder, settings: &MacroSettings) -> Self {
        let uids = UidGenerator::new(
            binder
                .names_in_use()
                .iter()
                .map(|&name| interner.resolve(name).to_string()),
        );
        Self {
            interner,
            binder,
            renderer_insert: interner.intern(&settings.renderer_insert),
            memo_writes: settings.memo_writes,
            uids,
            plan: RewritePlan::new(),
            imports: ImportRegistry::new(),
            report: RewriteReport::default(),
        }
    }

    /// A fresh local alias for `export` from `module`, registered as an import.
    pub fn import_alias(&mut self, module: &str, export: &str, hint: &str) -> InternedString {
        let alias = self.interner.intern(&self.uids.generate(hint));
        if self.imports.register(module, self.interner.intern(export), alias) {
            self.report.imports += 1;
        }
        alias
    }

    pub fn into_parts(self) -> (RewritePlan, ImportRegistry, RewriteReport) {
        (self.plan, self.imports, self.report)
    }
}

/// A rewrite for one marker name.
pub trait MacroRule: Send + Sync {
    /// The callee name this rule handles.
    fn marker(&self) -> &str;

    fn apply(&self, cx: &mut RuleContext<'_>, call: &MarkerCall<'_>) -> Result<(), MacroError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    /// Getter/setter pair.
    Signal,
    /// Getter only.
    Memo,
}

/// The `$signal` and `$memo` rules: one shape, parameterized by the marker,
/// the runtime module, the constructor it imports and the alias hint.
#[derive(Debug, Clone)]
pub struct ReactiveRule {
    kind: MarkerKind,
    config: RuleConfig,
    module: String,
}

impl ReactiveRule {
    pub fn new(kind: MarkerKind, config: RuleConfig, module: impl Into<String>) -> Self {
        Self {
            kind,
            config,
            module: module.into(),
        }
    }

    pub fn signal(settings: &MacroSettings) -> Self {
        Self::new(MarkerKind::Signal, settings.signal.clone(), &settings.runtime_module)
    }

    pub fn memo(settings: &MacroSettings) -> Self {
        Self::new(MarkerKind::Memo, settings.memo.clone(), &settings.runtime_module)
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    fn arity(&self) -> (RangeInclusive<usize>, &'static str) {
        match self.kind {
            MarkerKind::Signal => (1..=2, "1-2"),
            MarkerKind::Memo => (1..=1, "1"),
        }
    }

    fn read_edit(&self, cx: &RuleContext<'_>, name: InternedString, reference: &Reference) -> ReadEdit {
        match self.kind {
            MarkerKind::Signal if reference.call_callee == Some(cx.renderer_insert) => {
                ReadEdit::SignalAccessor(name)
            }
            MarkerKind::Signal => ReadEdit::SignalGetter(name),
            MarkerKind::Memo => ReadEdit::MemoGetter(name),
        }
    }

    /// `None` leaves the write as written.
    fn write_edit(
        &self,
        cx: &RuleContext<'_>,
        name: InternedString,
        form: WriteForm,
        reference: &Reference,
    ) -> Result<Option<WriteEdit>, MacroError> {
        let unsupported = |form: &'static str| MacroError::UnsupportedWrite {
            marker: self.config.marker.clone(),
            name: cx.interner.resolve(name).to_string(),
            form,
            range: reference.range,
        };
        if self.kind == MarkerKind::Memo {
            return match cx.memo_writes {
                MemoWritePolicy::Ignore => Ok(None),
                MemoWritePolicy::Reject => Err(MacroError::ReadonlyBindingWrite {
                    marker: self.config.marker.clone(),
                    name: cx.interner.resolve(name).to_string(),
                    range: reference.range,
                }),
            };
        }
        let value = match form {
            WriteForm::Assignment => SetterValue::Assign,
            WriteForm::Compound(operator) => SetterValue::Combine(operator),
            WriteForm::Update { operator, .. } => SetterValue::Step(match operator {
                SyntaxKind::MinusMinusToken => SyntaxKind::MinusToken,
                _ => SyntaxKind::PlusToken,
            }),
            WriteForm::Destructuring => return Err(unsupported("a destructuring assignment")),
            WriteForm::ForInOf => return Err(unsupported("a for-in/of head")),
        };
        Ok(Some(WriteEdit { name, value }))
    }
}

impl MacroRule for ReactiveRule {
    fn marker(&self) -> &str {
        &self.config.marker
    }

    fn apply(&self, cx: &mut RuleContext<'_>, marker: &MarkerCall<'_>) -> Result<(), MacroError> {
        let call = marker.call;
        let (arity, expected) = self.arity();
        if !arity.contains(&call.arguments.len()) {
            return Err(MacroError::InvalidArgumentCount {
                marker: self.config.marker.clone(),
                expected,
                found: call.arguments.len(),
                range: call.data.range,
            });
        }

        let Some(binding) = marker.binding else {
            let alias = cx.import_alias(&self.module, &self.config.export, &self.config.alias_hint);
            cx.plan.rename_marker(
                call.data.range,
                MarkerEdit {
                    alias,
                    thunk_argument: false,
                },
            );
            self.count(cx);
            cx.report.bare += 1;
            debug!(marker = %self.config.marker, alias = cx.interner.resolve(alias), "rewrote bare marker");
            return Ok(());
        };

        let list = binding.list;
        if list.declaration_kind() != DeclarationKind::Let {
            return Err(MacroError::InvalidDeclarationKind {
                marker: self.config.marker.clone(),
                range: list.data.range,
            });
        }
        if list.declarations.len() > 1 {
            return Err(MacroError::MultipleDeclarators {
                marker: self.config.marker.clone(),
                range: list.data.range,
            });
        }
        let Some(name) = binding.declaration.name.as_identifier() else {
            return Err(MacroError::NonIdentifierBinding {
                marker: self.config.marker.clone(),
                range: binding.declaration.name.range(),
            });
        };

        let alias = cx.import_alias(&self.module, &self.config.export, &self.config.alias_hint);
        let thunk_argument = self.kind == MarkerKind::Memo
            && call.arguments.first().is_some_and(|arg| !arg.is_function_like());
        cx.plan.rename_marker(call.data.range, MarkerEdit { alias, thunk_argument });
        cx.plan.make_const(list.data.range);
        self.count(cx);
        cx.report.bound += 1;

        let binder = cx.binder;
        let Some(symbol) = binder.symbol_declared_at(name.data.range.pos) else {
            return Ok(());
        };
        let (mut reads, mut writes) = (0, 0);
        for reference in symbol.references.iter() {
            match reference.kind {
                ReferenceKind::Read => {
                    let edit = self.read_edit(cx, symbol.name, reference);
                    cx.plan.rewrite_read(reference.range, edit);
                    reads += 1;
                }
                ReferenceKind::Write(form) => {
                    if let Some(edit) = self.write_edit(cx, symbol.name, form, reference)? {
                        cx.plan.rewrite_write(reference.expression_range, edit);
                        writes += 1;
                    }
                }
            }
        }
        cx.report.reads += reads;
        cx.report.writes += writes;
        debug!(
            marker = %self.config.marker,
            name = cx.interner.resolve(symbol.name),
            alias = cx.interner.resolve(alias),
            reads,
            writes,
            "rewrote declaration"
        );
        Ok(())
    }
}

impl ReactiveRule {
    fn count(&self, cx: &mut RuleContext<'_>) {
        match self.kind {
            MarkerKind::Signal => cx.report.signals += 1,
            MarkerKind::Memo => cx.report.memos += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_from_settings() {
        let settings = MacroSettings::default();
        let signal = ReactiveRule::signal(&settings);
        let memo = ReactiveRule::memo(&settings);
        assert_eq!(signal.marker(), "$signal");
        assert_eq!(memo.marker(), "$memo");
        assert_eq!(signal.kind(), MarkerKind::Signal);
        assert!(signal.arity().0.contains(&2));
        assert!(!memo.arity().0.contains(&2));
    }

    #[test]
    fn test_report_markers() {
        let report = RewriteReport {
            bound: 2,
            bare: 1,
            ..RewriteReport::default()
        };
        assert_eq!(report.markers(), 3);
    }
}
