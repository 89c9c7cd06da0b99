//! rsignal_transformers: The `$signal` / `$memo` marker rewrite.
//!
//! For one module: the [`MarkerCollector`] finds marker calls and the
//! declarations they initialize, each [`MacroRule`] validates its calls and
//! records edits in a [`RewritePlan`], and the [`Rewriter`] folds the tree
//! into a new one with the edits applied and the constructor imports on top.

pub mod collector;
pub mod error;
pub mod imports;
pub mod plan;
pub mod rewriter;
pub mod rules;
pub mod settings;
pub mod uid;

pub use collector::{BindingContext, CollectedMarkers, MarkerCall, MarkerCollector};
pub use error::MacroError;
pub use imports::ImportRegistry;
pub use plan::RewritePlan;
pub use rewriter::Rewriter;
pub use rules::{MacroRule, MarkerKind, ReactiveRule, RewriteReport, RuleContext};
pub use settings::{MacroSettings, MemoWritePolicy, RuleConfig};
pub use uid::UidGenerator;

use rsignal_ast::node::{SourceFile, Statement};
use rsignal_ast::NodeFactory;
use rsignal_binder::Binder;
use rsignal_core::intern::{InternedString, StringInterner};

/// Result of transforming one module.
#[derive(Debug)]
pub enum TransformOutput<'a> {
    /// No marker calls and no macro imports: the source text stands as is.
    Unchanged,
    Rewritten {
        statements: &'a [Statement<'a>],
        report: RewriteReport,
    },
}

/// A transformation of a bound source file.
pub trait Transformer {
    fn transform<'a>(
        &self,
        factory: &NodeFactory<'a>,
        binder: &Binder,
        source_file: &SourceFile<'a>,
    ) -> Result<TransformOutput<'a>, MacroError>;
}

/// Runs the marker rules over a module.
pub struct MacroTransformer {
    interner: StringInterner,
    settings: MacroSettings,
    rules: Vec<Box<dyn MacroRule>>,
}

impl MacroTransformer {
    pub fn new(interner: &StringInterner, settings: MacroSettings) -> Self {
        let rules: Vec<Box<dyn MacroRule>> = vec![
            Box::new(ReactiveRule::signal(&settings)),
            Box::new(ReactiveRule::memo(&settings)),
        ];
        Self {
            interner: interner.clone(),
            settings,
            rules,
        }
    }

    pub fn settings(&self) -> &MacroSettings {
        &self.settings
    }

    fn marker_names(&self) -> Vec<InternedString> {
        self.rules
            .iter()
            .map(|rule| self.interner.intern(rule.marker()))
            .collect()
    }

    fn rule_for(&self, marker: InternedString) -> Option<&dyn MacroRule> {
        let name = self.interner.resolve(marker);
        self.rules
            .iter()
            .find(|rule| rule.marker() == name)
            .map(|rule| rule.as_ref())
    }
}

impl Transformer for MacroTransformer {
    fn transform<'a>(
        &self,
        factory: &NodeFactory<'a>,
        binder: &Binder,
        source_file: &SourceFile<'a>,
    ) -> Result<TransformOutput<'a>, MacroError> {
        let markers = self.marker_names();
        let collected = MarkerCollector::new(&self.interner, &markers, &self.settings.macro_modules)
            .collect(source_file);
        if collected.is_empty() {
            return Ok(TransformOutput::Unchanged);
        }

        let mut cx = RuleContext::new(&self.interner, binder, &self.settings);
        for call in collected.calls.iter() {
            if let Some(rule) = self.rule_for(call.marker) {
                rule.apply(&mut cx, call)?;
            }
        }
        for import in collected.macro_imports.iter() {
            cx.plan.strip_import(import.data.range, &markers);
        }

        let (plan, imports, report) = cx.into_parts();
        let prelude = imports.to_statements(factory);
        let statements = Rewriter::new(&plan, factory).rewrite_module(source_file.statements, prelude);
        Ok(TransformOutput::Rewritten { statements, report })
    }
}
