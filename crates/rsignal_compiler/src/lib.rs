//! rsignal_compiler: The rewrite driver.
//!
//! Runs one module through parse -> bind -> collect -> rules -> rewrite ->
//! imports -> print, and many modules in parallel. A module that fails at
//! any stage produces an error and no output.

use bumpalo::Bump;
use rayon::prelude::*;
use rsignal_ast::NodeFactory;
use rsignal_binder::Binder;
use rsignal_core::intern::StringInterner;
use rsignal_diagnostics::Diagnostic;
use rsignal_options::{MemoWrites, RsignalOptions};
use rsignal_parser::parse_module;
use rsignal_printer::Printer;
use rsignal_transformers::{
    MacroError, MacroSettings, MacroTransformer, MemoWritePolicy, RewriteReport, RuleConfig,
    TransformOutput, Transformer,
};
use tracing::{debug, instrument, warn};

/// A module to rewrite.
#[derive(Debug, Clone)]
pub struct SourceModule {
    pub file_name: String,
    pub text: String,
}

impl SourceModule {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }
}

/// A successfully processed module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleOutput {
    pub file_name: String,
    pub code: String,
    /// `false` when the module had nothing to rewrite and `code` is the input.
    pub changed: bool,
    pub report: RewriteReport,
}

#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    #[error("{file}: {} syntax error(s)", .diagnostics.len())]
    Syntax {
        file: String,
        diagnostics: Vec<Diagnostic>,
    },
    #[error("{file}: {} binding error(s)", .diagnostics.len())]
    Binding {
        file: String,
        diagnostics: Vec<Diagnostic>,
    },
    #[error("{file}: {source}")]
    Macro {
        file: String,
        #[source]
        source: MacroError,
    },
}

impl ModuleError {
    pub fn file(&self) -> &str {
        match self {
            ModuleError::Syntax { file, .. }
            | ModuleError::Binding { file, .. }
            | ModuleError::Macro { file, .. } => file,
        }
    }

    /// The located diagnostics describing the failure.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            ModuleError::Syntax { diagnostics, .. } | ModuleError::Binding { diagnostics, .. } => {
                diagnostics.clone()
            }
            ModuleError::Macro { file, source } => vec![source.to_diagnostic(file)],
        }
    }
}

/// Resolve configuration into the settings the rules run with.
pub fn macro_settings(options: &RsignalOptions) -> MacroSettings {
    let defaults = MacroSettings::default();
    let signal = options.signal();
    let memo = options.memo();
    MacroSettings {
        runtime_module: options.runtime_module().to_string(),
        macro_modules: options.macro_modules(),
        renderer_insert: options.renderer_insert().to_string(),
        memo_writes: match options.memo_writes() {
            MemoWrites::Reject => MemoWritePolicy::Reject,
            MemoWrites::Ignore => MemoWritePolicy::Ignore,
        },
        signal: RuleConfig {
            export: signal.export_or(&defaults.signal.export).to_string(),
            alias_hint: signal.alias_hint_or(&defaults.signal.alias_hint).to_string(),
            ..defaults.signal.clone()
        },
        memo: RuleConfig {
            export: memo.export_or(&defaults.memo.export).to_string(),
            alias_hint: memo.alias_hint_or(&defaults.memo.alias_hint).to_string(),
            ..defaults.memo.clone()
        },
    }
}

pub struct MacroCompiler {
    options: RsignalOptions,
    settings: MacroSettings,
}

impl MacroCompiler {
    pub fn new(options: RsignalOptions) -> Self {
        let settings = macro_settings(&options);
        Self { options, settings }
    }

    pub fn options(&self) -> &RsignalOptions {
        &self.options
    }

    pub fn settings(&self) -> &MacroSettings {
        &self.settings
    }

    /// Rewrite one module.
    #[instrument(level = "debug", skip_all, fields(file = file_name))]
    pub fn transform(&self, file_name: &str, source: &str) -> Result<ModuleOutput, ModuleError> {
        let arena = Bump::new();
        let interner = StringInterner::new();

        let (source_file, mut parse_diagnostics) = parse_module(&arena, &interner, file_name, source);
        if parse_diagnostics.has_errors() {
            warn!(errors = parse_diagnostics.error_count(), "module has syntax errors");
            parse_diagnostics.attach_file(file_name);
            return Err(ModuleError::Syntax {
                file: file_name.to_string(),
                diagnostics: parse_diagnostics.into_diagnostics(),
            });
        }

        let mut binder = Binder::new(&interner, file_name);
        binder.bind_source_file(&source_file);
        let mut binding_diagnostics = binder.take_diagnostics();
        if binding_diagnostics.has_errors() {
            warn!(errors = binding_diagnostics.error_count(), "module has binding errors");
            binding_diagnostics.attach_file(file_name);
            return Err(ModuleError::Binding {
                file: file_name.to_string(),
                diagnostics: binding_diagnostics.into_diagnostics(),
            });
        }

        let factory = NodeFactory::new(&arena, &interner);
        let transformer = MacroTransformer::new(&interner, self.settings.clone());
        match transformer.transform(&factory, &binder, &source_file) {
            Ok(TransformOutput::Unchanged) => {
                debug!("nothing to rewrite");
                Ok(ModuleOutput {
                    file_name: file_name.to_string(),
                    code: source.to_string(),
                    changed: false,
                    report: RewriteReport::default(),
                })
            }
            Ok(TransformOutput::Rewritten { statements, report }) => {
                let code = Printer::new(&interner).print_statements(statements);
                debug!(markers = report.markers(), imports = report.imports, "module rewritten");
                Ok(ModuleOutput {
                    file_name: file_name.to_string(),
                    code,
                    changed: true,
                    report,
                })
            }
            Err(error) => {
                warn!(%error, "module rejected");
                Err(ModuleError::Macro {
                    file: file_name.to_string(),
                    source: error,
                })
            }
        }
    }

    /// Rewrite many modules in parallel. Results are in input order.
    #[instrument(level = "debug", skip_all, fields(modules = modules.len()))]
    pub fn transform_all(&self, modules: &[SourceModule]) -> Vec<Result<ModuleOutput, ModuleError>> {
        modules
            .par_iter()
            .map(|module| self.transform(&module.file_name, &module.text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsignal_options::{parse_config, ConstructorOptions};

    #[test]
    fn test_default_settings() {
        assert_eq!(macro_settings(&RsignalOptions::default()), MacroSettings::default());
    }

    #[test]
    fn test_settings_from_options() {
        let options = parse_config(
            r#"{ "runtimeModule": "rt", "memoWrites": "ignore", "memo": { "export": "derive" } }"#,
        )
        .unwrap();
        let settings = macro_settings(&options);
        assert_eq!(settings.runtime_module, "rt");
        assert_eq!(settings.memo_writes, MemoWritePolicy::Ignore);
        assert_eq!(settings.memo.export, "derive");
        assert_eq!(settings.memo.alias_hint, "memo");
        assert_eq!(settings.memo.marker, "$memo");
        assert_eq!(settings.signal, RuleConfig::signal());
    }

    #[test]
    fn test_alias_hint_option() {
        let options = RsignalOptions {
            signal: Some(ConstructorOptions {
                export: None,
                alias_hint: Some("sig".to_string()),
            }),
            ..RsignalOptions::default()
        };
        let output = MacroCompiler::new(options)
            .transform("a.js", "let a = $signal(0);")
            .unwrap();
        assert_eq!(
            output.code,
            "import { createSignal as _sig } from \"solid-js\";\nconst a = _sig(0);\n"
        );
    }
}
