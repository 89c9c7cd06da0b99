//! Rewrite settings, resolved from configuration by the driver.

/// What to do with a write to a `$memo`-bound name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MemoWritePolicy {
    /// Fail the module with `ReadonlyBindingWrite`.
    #[default]
    Reject,
    /// Leave the write as written.
    Ignore,
}

/// One marker and the constructor it is rewritten to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    pub marker: String,
    pub export: String,
    pub alias_hint: String,
}

impl RuleConfig {
    pub fn signal() -> Self {
        Self {
            marker: "$signal".to_string(),
            export: "createSignal".to_string(),
            alias_hint: "ref".to_string(),
        }
    }

    pub fn memo() -> Self {
        Self {
            marker: "$memo".to_string(),
            export: "createMemo".to_string(),
            alias_hint: "memo".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSettings {
    /// Module the constructors are imported from.
    pub runtime_module: String,
    /// Modules whose marker imports are stripped.
    pub macro_modules: Vec<String>,
    /// Callee whose direct signal arguments become bare accessors.
    pub renderer_insert: String,
    pub memo_writes: MemoWritePolicy,
    pub signal: RuleConfig,
    pub memo: RuleConfig,
}

impl Default for MacroSettings {
    fn default() -> Self {
        Self {
            runtime_module: "solid-js".to_string(),
            macro_modules: vec!["solid-js/macro".to_string(), "macros/ref".to_string()],
            renderer_insert: "_$insert".to_string(),
            memo_writes: MemoWritePolicy::Reject,
            signal: RuleConfig::signal(),
            memo: RuleConfig::memo(),
        }
    }
}
