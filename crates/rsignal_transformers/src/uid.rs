//! Collision-free local names for imported constructors.

use rustc_hash::FxHashSet;

/// Generates `_hint`, `_hint2`, `_hint3`, ... skipping every reserved name
/// and every name it has already handed out.
#[derive(Debug, Default)]
pub struct UidGenerator {
    taken: FxHashSet<String>,
}

impl UidGenerator {
    pub fn new<I, S>(reserved: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: reserved.into_iter().map(Into::into).collect(),
        }
    }

    pub fn reserve(&mut self, name: impl Into<String>) {
        self.taken.insert(name.into());
    }

    pub fn is_taken(&self, name: &str) -> bool {
        self.taken.contains(name)
    }

    pub fn generate(&mut self, hint: &str) -> String {
        let base = format!("_{}", normalize_hint(hint));
        let mut candidate = base.clone();
        let mut counter = 1;
        while self.taken.contains(&candidate) {
            counter += 1;
            candidate = format!("{}{}", base, counter);
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}

/// Keep identifier characters, drop leading underscores and trailing digits.
fn normalize_hint(hint: &str) -> String {
    let cleaned: String = hint
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '$' || c == '_' { c } else { '_' })
        .collect();
    let trimmed = cleaned
        .trim_start_matches('_')
        .trim_end_matches(|c: char| c.is_ascii_digit());
    if trimmed.is_empty() || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        "temp".to_string()
    } else {
        trimmed.to_string()
    }
}
