//! Imports requested by the rules, emitted at the top of the module.

use indexmap::{IndexMap, IndexSet};
use rsignal_ast::node::Statement;
use rsignal_ast::NodeFactory;
use rsignal_core::intern::InternedString;
use tracing::debug;

/// Named imports grouped per source module. Modules and specifiers keep
/// registration order; a repeated (module, export, alias) is ignored.
#[derive(Debug, Default)]
pub struct ImportRegistry {
    modules: IndexMap<String, IndexSet<(InternedString, InternedString)>>,
}

impl ImportRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the import was already registered.
    pub fn register(&mut self, module: &str, export: InternedString, alias: InternedString) -> bool {
        if let Some(specifiers) = self.modules.get_mut(module) {
            return specifiers.insert((export, alias));
        }
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert((export, alias))
    }

    /// Number of specifiers.
    pub fn len(&self) -> usize {
        self.modules.values().map(IndexSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    pub fn modules(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// One `import { ... } from "module";` per module.
    pub fn to_statements<'a>(&self, factory: &NodeFactory<'a>) -> Vec<Statement<'a>> {
        self.modules
            .iter()
            .map(|(module, specifiers)| {
                debug!(module = %module, specifiers = specifiers.len(), "emitting import");
                let bindings: Vec<_> = specifiers.iter().copied().collect();
                factory.named_import(module, &bindings)
            })
            .collect()
    }
}
