//! rsignal_options: rsignal.json parsing and rewrite options.
//!
//! Every key is optional; the accessors resolve unset keys to their
//! defaults, and [`RsignalOptions::merge`] lets command-line values win over
//! file values.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_RUNTIME_MODULE: &str = "solid-js";
pub const DEFAULT_MACRO_MODULES: &[&str] = &["solid-js/macro", "macros/ref"];
pub const DEFAULT_RENDERER_INSERT: &str = "_$insert";
pub const DEFAULT_OUT_DIR: &str = "dist";

/// The rsignal.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RsignalOptions {
    pub runtime_module: Option<String>,
    pub macro_modules: Option<Vec<String>>,
    pub renderer_insert: Option<String>,
    pub memo_writes: Option<MemoWrites>,
    pub signal: Option<ConstructorOptions>,
    pub memo: Option<ConstructorOptions>,
    pub out_dir: Option<String>,
}

/// What happens to a write to a `$memo`-bound name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoWrites {
    #[default]
    Reject,
    Ignore,
}

/// The constructor a marker is rewritten to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorOptions {
    pub export: Option<String>,
    pub alias_hint: Option<String>,
}

impl ConstructorOptions {
    pub fn export_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.export.as_deref().unwrap_or(default)
    }

    pub fn alias_hint_or<'s>(&'s self, default: &'s str) -> &'s str {
        self.alias_hint.as_deref().unwrap_or(default)
    }
}

impl RsignalOptions {
    pub fn runtime_module(&self) -> &str {
        self.runtime_module.as_deref().unwrap_or(DEFAULT_RUNTIME_MODULE)
    }

    pub fn macro_modules(&self) -> Vec<String> {
        match &self.macro_modules {
            Some(modules) => modules.clone(),
            None => DEFAULT_MACRO_MODULES.iter().map(|m| m.to_string()).collect(),
        }
    }

    pub fn renderer_insert(&self) -> &str {
        self.renderer_insert.as_deref().unwrap_or(DEFAULT_RENDERER_INSERT)
    }

    pub fn memo_writes(&self) -> MemoWrites {
        self.memo_writes.unwrap_or_default()
    }

    pub fn signal(&self) -> ConstructorOptions {
        self.signal.clone().unwrap_or_default()
    }

    pub fn memo(&self) -> ConstructorOptions {
        self.memo.clone().unwrap_or_default()
    }

    pub fn out_dir(&self) -> &str {
        self.out_dir.as_deref().unwrap_or(DEFAULT_OUT_DIR)
    }

    /// Keys set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: RsignalOptions) -> RsignalOptions {
        RsignalOptions {
            runtime_module: overrides.runtime_module.or(self.runtime_module),
            macro_modules: overrides.macro_modules.or(self.macro_modules),
            renderer_insert: overrides.renderer_insert.or(self.renderer_insert),
            memo_writes: overrides.memo_writes.or(self.memo_writes),
            signal: merge_constructor(self.signal, overrides.signal),
            memo: merge_constructor(self.memo, overrides.memo),
            out_dir: overrides.out_dir.or(self.out_dir),
        }
    }
}

fn merge_constructor(
    base: Option<ConstructorOptions>,
    overrides: Option<ConstructorOptions>,
) -> Option<ConstructorOptions> {
    match (base, overrides) {
        (Some(base), Some(overrides)) => Some(ConstructorOptions {
            export: overrides.export.or(base.export),
            alias_hint: overrides.alias_hint.or(base.alias_hint),
        }),
        (base, overrides) => overrides.or(base),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Parse an rsignal.json document.
pub fn parse_config(content: &str) -> Result<RsignalOptions, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse an rsignal.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<RsignalOptions, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_resolves_to_defaults() {
        let options = parse_config("{}").unwrap();
        assert_eq!(options, RsignalOptions::default());
        assert_eq!(options.runtime_module(), "solid-js");
        assert_eq!(options.macro_modules(), vec!["solid-js/macro", "macros/ref"]);
        assert_eq!(options.renderer_insert(), "_$insert");
        assert_eq!(options.memo_writes(), MemoWrites::Reject);
        assert_eq!(options.signal().export_or("createSignal"), "createSignal");
        assert_eq!(options.out_dir(), "dist");
    }

    #[test]
    fn test_full_config() {
        let options = parse_config(
            r#"{
                "runtimeModule": "my-runtime",
                "macroModules": ["my-runtime/macro"],
                "rendererInsert": "insert",
                "memoWrites": "ignore",
                "signal": { "export": "signal", "aliasHint": "sig" },
                "memo": { "aliasHint": "derived" },
                "outDir": "build"
            }"#,
        )
        .unwrap();
        assert_eq!(options.runtime_module(), "my-runtime");
        assert_eq!(options.macro_modules(), vec!["my-runtime/macro"]);
        assert_eq!(options.renderer_insert(), "insert");
        assert_eq!(options.memo_writes(), MemoWrites::Ignore);
        assert_eq!(options.signal().export_or("createSignal"), "signal");
        assert_eq!(options.signal().alias_hint_or("ref"), "sig");
        assert_eq!(options.memo().export_or("createMemo"), "createMemo");
        assert_eq!(options.memo().alias_hint_or("memo"), "derived");
        assert_eq!(options.out_dir(), "build");
    }

    #[test]
    fn test_invalid_memo_writes() {
        assert!(parse_config(r#"{ "memoWrites": "sometimes" }"#).is_err());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = parse_config(
            r#"{ "runtimeModule": "a", "outDir": "out", "signal": { "export": "s", "aliasHint": "x" } }"#,
        )
        .unwrap();
        let flags = RsignalOptions {
            runtime_module: Some("b".to_string()),
            signal: Some(ConstructorOptions {
                export: None,
                alias_hint: Some("y".to_string()),
            }),
            ..RsignalOptions::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.runtime_module(), "b");
        assert_eq!(merged.out_dir(), "out");
        assert_eq!(merged.signal().export_or("createSignal"), "s");
        assert_eq!(merged.signal().alias_hint_or("ref"), "y");
    }

    #[test]
    fn test_missing_file() {
        let error = parse_config_file(Path::new("/nonexistent/rsignal.json")).unwrap_err();
        assert!(matches!(error, ConfigError::Io { .. }));
        assert!(error.to_string().contains("/nonexistent/rsignal.json"));
    }
}
