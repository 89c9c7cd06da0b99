//! rsignal_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every problem the rewriter can report (syntax errors, binding conflicts,
//! macro misuse) is a coded [`DiagnosticMessage`] realized into a located
//! [`Diagnostic`]. Codes are grouped: 1xxx syntax, 2xxx binding, 9xxx macro
//! usage.

use rsignal_core::text::TextSpan;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    /// May contain `{0}`, `{1}`, ... placeholders.
    pub message: &'static str,
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Option<String>,
    pub span: Option<TextSpan>,
    pub message_text: String,
    pub code: u32,
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// A diagnostic with no file or location.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: format_message(message.message, args),
            code: message.code,
            category: message.category,
        }
    }

    /// A diagnostic attached to a span. The file is filled in by whoever owns
    /// the file name (the parser for scanner errors, the driver otherwise).
    pub fn at(span: TextSpan, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            span: Some(span),
            ..Self::new(message, args)
        }
    }

    pub fn with_location(
        file: String,
        span: TextSpan,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: Some(file),
            ..Self::at(span, message, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} RS{}: {}", self.category, self.code, self.message_text)
    }
}

impl std::error::Error for Diagnostic {}

/// Replace `{0}`, `{1}`, ... in `template` with `args`.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{}}}", i), arg);
    }
    result
}

/// Diagnostics accumulated while processing one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosticCollection {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn extend(&mut self, other: DiagnosticCollection) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Stamp every diagnostic that has no file with `file`.
    pub fn attach_file(&mut self, file: &str) {
        for diagnostic in &mut self.diagnostics {
            if diagnostic.file.is_none() {
                diagnostic.file = Some(file.to_string());
            }
        }
    }

    /// Sort by file, then position.
    pub fn sort(&mut self) {
        self.diagnostics.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.span.map(|s| s.start).cmp(&b.span.map(|s| s.start)))
        });
    }
}

impl IntoIterator for DiagnosticCollection {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
    }

    // ========================================================================
    // Scanner errors
    // ========================================================================
    pub const UNTERMINATED_STRING_LITERAL: DiagnosticMessage = diag!(1002, Error, "Unterminated string literal.");
    pub const ASTERISK_SLASH_EXPECTED: DiagnosticMessage = diag!(1010, Error, "'*/' expected.");
    pub const DIGIT_EXPECTED: DiagnosticMessage = diag!(1124, Error, "Digit expected.");
    pub const HEXADECIMAL_DIGIT_EXPECTED: DiagnosticMessage = diag!(1125, Error, "Hexadecimal digit expected.");
    pub const INVALID_CHARACTER: DiagnosticMessage = diag!(1127, Error, "Invalid character.");
    pub const UNTERMINATED_TEMPLATE_LITERAL: DiagnosticMessage = diag!(1160, Error, "Unterminated template literal.");
    pub const UNTERMINATED_REGULAR_EXPRESSION_LITERAL: DiagnosticMessage = diag!(1161, Error, "Unterminated regular expression literal.");
    pub const IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL: DiagnosticMessage = diag!(1351, Error, "An identifier or keyword cannot immediately follow a numeric literal.");

    // ========================================================================
    // Parser errors
    // ========================================================================
    pub const IDENTIFIER_EXPECTED: DiagnosticMessage = diag!(1003, Error, "Identifier expected.");
    pub const _0_EXPECTED: DiagnosticMessage = diag!(1005, Error, "'{0}' expected.");
    pub const UNEXPECTED_TOKEN: DiagnosticMessage = diag!(1012, Error, "Unexpected token.");
    pub const A_REST_ELEMENT_MUST_BE_LAST: DiagnosticMessage = diag!(1014, Error, "A rest element must be last in a destructuring pattern or parameter list.");
    pub const EXPRESSION_EXPECTED: DiagnosticMessage = diag!(1109, Error, "Expression expected.");
    pub const DECLARATION_OR_STATEMENT_EXPECTED: DiagnosticMessage = diag!(1128, Error, "Declaration or statement expected.");
    pub const PROPERTY_ASSIGNMENT_EXPECTED: DiagnosticMessage = diag!(1136, Error, "Property assignment expected.");
    pub const CONST_DECLARATIONS_MUST_BE_INITIALIZED: DiagnosticMessage = diag!(1155, Error, "'const' declarations must be initialized.");
    pub const VARIABLE_DECLARATION_EXPECTED: DiagnosticMessage = diag!(1134, Error, "Variable declaration expected.");
    pub const MAXIMUM_NESTING_DEPTH_EXCEEDED: DiagnosticMessage = diag!(1199, Error, "Maximum nesting depth exceeded.");
    pub const UNARY_OPERAND_OF_EXPONENTIATION: DiagnosticMessage = diag!(1360, Error, "A unary expression cannot be the left operand of '**'; enclose it in parentheses.");
    pub const CANNOT_MIX_0_AND_1_WITHOUT_PARENTHESES: DiagnosticMessage = diag!(1361, Error, "'{0}' and '{1}' operations cannot be mixed without parentheses.");
    pub const INVALID_LEFT_HAND_SIDE_IN_ASSIGNMENT: DiagnosticMessage = diag!(2364, Error, "The left-hand side of an assignment expression must be a variable or a property access.");

    // ========================================================================
    // Binder errors
    // ========================================================================
    pub const CANNOT_REDECLARE_BLOCK_SCOPED_VARIABLE_0: DiagnosticMessage = diag!(2451, Error, "Cannot redeclare block-scoped variable '{0}'.");

    // ========================================================================
    // Macro usage errors
    // ========================================================================
    pub const SHOULD_USE_LET_WITH_0_MACRO: DiagnosticMessage = diag!(9001, Error, "Should use 'let' with {0}() macro.");
    pub const DECLARE_ONE_VARIABLE_WITH_0_MACRO: DiagnosticMessage = diag!(9002, Error, "Please declare one variable in one let statement with {0}() macro.");
    pub const ONLY_IDENTIFIER_ALLOWED_WITH_0_MACRO: DiagnosticMessage = diag!(9003, Error, "Only identifier is allowed with {0}() macro.");
    pub const _0_MACRO_EXPECTS_1_ARGUMENTS_GOT_2: DiagnosticMessage = diag!(9004, Error, "{0}() macro expects {1} argument(s), got {2}.");
    pub const CANNOT_ASSIGN_TO_0_BOUND_BY_1_MACRO: DiagnosticMessage = diag!(9005, Error, "Cannot assign to '{0}' because it is bound by {1}() macro and has no setter.");
    pub const CANNOT_REWRITE_0_WRITE_TO_1: DiagnosticMessage = diag!(9006, Error, "Cannot rewrite {0} of '{1}' bound by {2}() macro into a setter call.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("{0}() macro expects {1} argument(s), got {2}.", &["$memo", "1", "0"]),
            "$memo() macro expects 1 argument(s), got 0."
        );
    }

    #[test]
    fn test_display_with_location() {
        let d = Diagnostic::with_location(
            "app.js".to_string(),
            TextSpan::new(4, 5),
            &messages::SHOULD_USE_LET_WITH_0_MACRO,
            &["$signal"],
        );
        assert_eq!(
            d.to_string(),
            "app.js(4): error RS9001: Should use 'let' with $signal() macro."
        );
    }

    #[test]
    fn test_collection_attach_and_sort() {
        let mut diagnostics = DiagnosticCollection::new();
        diagnostics.add(Diagnostic::at(TextSpan::new(9, 1), &messages::UNEXPECTED_TOKEN, &[]));
        diagnostics.add(Diagnostic::at(TextSpan::new(2, 1), &messages::_0_EXPECTED, &[";"]));
        diagnostics.attach_file("a.js");
        diagnostics.sort();

        assert!(diagnostics.has_errors());
        assert_eq!(diagnostics.error_count(), 2);
        assert_eq!(diagnostics.diagnostics()[0].message_text, "';' expected.");
        assert!(diagnostics
            .diagnostics()
            .iter()
            .all(|d| d.file.as_deref() == Some("a.js")));
    }
}
