//! Macro usage errors.

use rsignal_core::text::TextRange;
use rsignal_diagnostics::{messages, Diagnostic};

/// A misuse of a marker call. Any of these aborts the rewrite of the module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MacroError {
    #[error("Should use 'let' with {marker}() macro.")]
    InvalidDeclarationKind { marker: String, range: TextRange },

    #[error("Please declare one variable in one let statement with {marker}() macro.")]
    MultipleDeclarators { marker: String, range: TextRange },

    #[error("Only identifier is allowed with {marker}() macro.")]
    NonIdentifierBinding { marker: String, range: TextRange },

    #[error("{marker}() macro expects {expected} argument(s), got {found}.")]
    InvalidArgumentCount {
        marker: String,
        expected: &'static str,
        found: usize,
        range: TextRange,
    },

    #[error("Cannot assign to '{name}' because it is bound by {marker}() macro and has no setter.")]
    ReadonlyBindingWrite {
        marker: String,
        name: String,
        range: TextRange,
    },

    #[error("Cannot rewrite {form} of '{name}' bound by {marker}() macro into a setter call.")]
    UnsupportedWrite {
        marker: String,
        name: String,
        form: &'static str,
        range: TextRange,
    },
}

impl MacroError {
    pub fn marker(&self) -> &str {
        match self {
            MacroError::InvalidDeclarationKind { marker, .. }
            | MacroError::MultipleDeclarators { marker, .. }
            | MacroError::NonIdentifierBinding { marker, .. }
            | MacroError::InvalidArgumentCount { marker, .. }
            | MacroError::ReadonlyBindingWrite { marker, .. }
            | MacroError::UnsupportedWrite { marker, .. } => marker,
        }
    }

    /// The offending node.
    pub fn range(&self) -> TextRange {
        match self {
            MacroError::InvalidDeclarationKind { range, .. }
            | MacroError::MultipleDeclarators { range, .. }
            | MacroError::NonIdentifierBinding { range, .. }
            | MacroError::InvalidArgumentCount { range, .. }
            | MacroError::ReadonlyBindingWrite { range, .. }
            | MacroError::UnsupportedWrite { range, .. } => *range,
        }
    }

    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let span = self.range().to_span();
        let file = file.to_string();
        match self {
            MacroError::InvalidDeclarationKind { marker, .. } => Diagnostic::with_location(
                file,
                span,
                &messages::SHOULD_USE_LET_WITH_0_MACRO,
                &[marker.as_str()],
            ),
            MacroError::MultipleDeclarators { marker, .. } => Diagnostic::with_location(
                file,
                span,
                &messages::DECLARE_ONE_VARIABLE_WITH_0_MACRO,
                &[marker.as_str()],
            ),
            MacroError::NonIdentifierBinding { marker, .. } => Diagnostic::with_location(
                file,
                span,
                &messages::ONLY_IDENTIFIER_ALLOWED_WITH_0_MACRO,
                &[marker.as_str()],
            ),
            MacroError::InvalidArgumentCount {
                marker,
                expected,
                found,
                ..
            } => Diagnostic::with_location(
                file,
                span,
                &messages::_0_MACRO_EXPECTS_1_ARGUMENTS_GOT_2,
                &[marker.as_str(), *expected, &found.to_string()],
            ),
            MacroError::ReadonlyBindingWrite { marker, name, .. } => Diagnostic::with_location(
                file,
                span,
                &messages::CANNOT_ASSIGN_TO_0_BOUND_BY_1_MACRO,
                &[name.as_str(), marker.as_str()],
            ),
            MacroError::UnsupportedWrite {
                marker, name, form, ..
            } => Diagnostic::with_location(
                file,
                span,
                &messages::CANNOT_REWRITE_0_WRITE_TO_1,
                &[*form, name.as_str(), marker.as_str()],
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_diagnostic_text() {
        let errors = [
            MacroError::InvalidDeclarationKind {
                marker: "$signal".into(),
                range: TextRange::new(0, 5),
            },
            MacroError::InvalidArgumentCount {
                marker: "$memo".into(),
                expected: "1",
                found: 2,
                range: TextRange::new(3, 9),
            },
            MacroError::UnsupportedWrite {
                marker: "$signal".into(),
                name: "count".into(),
                form: "a destructuring assignment",
                range: TextRange::new(1, 6),
            },
        ];
        for error in &errors {
            let diagnostic = error.to_diagnostic("app.js");
            assert_eq!(diagnostic.message_text, error.to_string());
            assert_eq!(diagnostic.file.as_deref(), Some("app.js"));
            assert_eq!(diagnostic.span.map(|s| s.start), Some(error.range().pos));
        }
    }

    #[test]
    fn test_codes() {
        let error = MacroError::ReadonlyBindingWrite {
            marker: "$memo".into(),
            name: "double".into(),
            range: TextRange::new(0, 1),
        };
        assert_eq!(error.to_diagnostic("a.js").code, 9005);
        assert_eq!(error.marker(), "$memo");
        assert_eq!(
            error.to_string(),
            "Cannot assign to 'double' because it is bound by $memo() macro and has no setter."
        );
    }
}
