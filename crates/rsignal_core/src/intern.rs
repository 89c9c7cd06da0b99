//! String interning.
//!
//! Identifier names and literal source text are interned once per module so
//! the binder can key scopes by a `u32` and the rewriter can compare names
//! without touching string data.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// Handle to a string stored in a [`StringInterner`].
///
/// Two handles from the same interner are equal iff their strings are equal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct InternedString(Spur);

impl InternedString {
    #[inline]
    pub fn from_spur(spur: Spur) -> Self {
        Self(spur)
    }

    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for InternedString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternedString({:?})", self.0)
    }
}

/// Thread-safe string interner.
///
/// Cloning is cheap and shares the underlying storage, so the parser, the
/// binder and the printer of one module all see the same handles.
#[derive(Clone)]
pub struct StringInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl StringInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a string, returning the existing handle if already present.
    #[inline]
    pub fn intern(&self, s: &str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern(s))
    }

    #[inline]
    pub fn intern_static(&self, s: &'static str) -> InternedString {
        InternedString::from_spur(self.rodeo.get_or_intern_static(s))
    }

    /// Look up a string without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<InternedString> {
        self.rodeo.get(s).map(InternedString::from_spur)
    }

    /// Whether `s` has been interned, i.e. appeared somewhere in the module.
    #[inline]
    pub fn contains(&self, s: &str) -> bool {
        self.rodeo.contains(s)
    }

    #[inline]
    pub fn resolve(&self, key: InternedString) -> &str {
        self.rodeo.resolve(&key.as_spur())
    }

    /// Whether the handle names exactly `s`.
    #[inline]
    pub fn is(&self, key: InternedString, s: &str) -> bool {
        self.get(s) == Some(key)
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_and_resolve() {
        let interner = StringInterner::new();
        let a = interner.intern("count");
        let b = interner.intern("count");
        let c = interner.intern("setCount");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(interner.resolve(a), "count");
        assert_eq!(interner.resolve(c), "setCount");
    }

    #[test]
    fn test_get_does_not_intern() {
        let interner = StringInterner::new();
        assert!(interner.get("_ref").is_none());
        assert!(!interner.contains("_ref"));
        let a = interner.intern("_ref");
        assert_eq!(interner.get("_ref"), Some(a));
        assert!(interner.contains("_ref"));
    }

    #[test]
    fn test_is() {
        let interner = StringInterner::new();
        let key = interner.intern_static("$signal");
        assert!(interner.is(key, "$signal"));
        assert!(!interner.is(key, "$memo"));
    }

    #[test]
    fn test_clones_share_storage() {
        let interner = StringInterner::new();
        let other = interner.clone();
        let key = other.intern("shared");
        assert_eq!(interner.resolve(key), "shared");
    }
}
