//! The scanner.
//!
//! Converts module source text into tokens that the parser pulls one at a
//! time. Offsets are byte offsets into the UTF-8 source.

use crate::char_codes::*;
use rsignal_ast::syntax_kind::SyntaxKind;
use rsignal_ast::types::TokenFlags;
use rsignal_core::text::TextSpan;
use rsignal_diagnostics::{messages, Diagnostic, DiagnosticCollection, DiagnosticMessage};

/// Saved scanner state for speculative parsing.
#[derive(Debug, Clone)]
pub struct ScannerState {
    pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
}

pub struct Scanner {
    text: String,
    /// Current position; the end of the current token.
    pos: usize,
    /// Start of the current token, after leading trivia.
    token_start: usize,
    token: SyntaxKind,
    /// Identifier name, or the raw source text of a literal (string and
    /// template literals without their delimiters).
    token_value: String,
    token_flags: TokenFlags,
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::NONE,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Skip a `#!` line at the very start of the file. Call before the first
    /// `scan()`.
    pub fn skip_shebang(&mut self) {
        if self.pos == 0 && self.text.starts_with("#!") {
            self.pos = memchr::memchr2(b'\n', b'\r', self.bytes()).unwrap_or(self.text.len());
        }
    }

    /// Run `f`, then restore the scanner to where it was. Diagnostics
    /// reported while looking ahead are discarded.
    pub fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let state = self.save_state();
        let diagnostics = std::mem::take(&mut self.diagnostics);
        let result = f(self);
        self.diagnostics = diagnostics;
        self.restore_state(state);
        result
    }

    pub fn save_state(&self) -> ScannerState {
        ScannerState {
            pos: self.pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
        }
    }

    pub fn restore_state(&mut self, state: ScannerState) {
        self.pos = state.pos;
        self.token_start = state.token_start;
        self.token = state.token;
        self.token_value = state.token_value;
        self.token_flags = state.token_flags;
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn token_flags(&self) -> TokenFlags {
        self.token_flags
    }

    /// Exact source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    #[inline]
    fn bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    #[inline]
    fn byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn char_at_pos(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn error(&mut self, start: usize, end: usize, message: &DiagnosticMessage) {
        self.diagnostics.add(Diagnostic::at(
            TextSpan::from_bounds(start as u32, end as u32),
            message,
            &[],
        ));
    }

    fn skip_trivia(&mut self) {
        while let Some(b) = self.byte_at(0) {
            match b {
                b'\n' | b'\r' => {
                    self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    self.pos += 1;
                }
                b' ' | b'\t' | 0x0B | 0x0C => self.pos += 1,
                b'/' if self.byte_at(1) == Some(b'/') => {
                    let rest = &self.bytes()[self.pos + 2..];
                    self.pos = match memchr::memchr2(b'\n', b'\r', rest) {
                        Some(i) => self.pos + 2 + i,
                        None => self.text.len(),
                    };
                }
                b'/' if self.byte_at(1) == Some(b'*') => {
                    let start = self.pos;
                    let body_start = self.pos + 2;
                    let body = &self.bytes()[body_start..];
                    let body_len = memchr::memmem::find(body, b"*/");
                    let scanned = &body[..body_len.unwrap_or(body.len())];
                    if memchr::memchr2(b'\n', b'\r', scanned).is_some() {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                    }
                    match body_len {
                        Some(len) => self.pos = body_start + len + 2,
                        None => {
                            self.pos = self.text.len();
                            self.error(start, self.pos, &messages::ASTERISK_SLASH_EXPECTED);
                        }
                    }
                }
                b if b >= 0x80 => match self.char_at_pos(self.pos) {
                    Some(ch) if ch == LINE_SEPARATOR || ch == PARAGRAPH_SEPARATOR => {
                        self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                        self.pos += ch.len_utf8();
                    }
                    Some(ch) if is_white_space_single_line(ch) => self.pos += ch.len_utf8(),
                    _ => return,
                },
                _ => return,
            }
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_flags = TokenFlags::NONE;
        self.token_value.clear();
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(b) = self.byte_at(0) else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match b {
            b'(' => self.punct(1, SyntaxKind::OpenParenToken),
            b')' => self.punct(1, SyntaxKind::CloseParenToken),
            b'{' => self.punct(1, SyntaxKind::OpenBraceToken),
            b'}' => self.punct(1, SyntaxKind::CloseBraceToken),
            b'[' => self.punct(1, SyntaxKind::OpenBracketToken),
            b']' => self.punct(1, SyntaxKind::CloseBracketToken),
            b';' => self.punct(1, SyntaxKind::SemicolonToken),
            b',' => self.punct(1, SyntaxKind::CommaToken),
            b'~' => self.punct(1, SyntaxKind::TildeToken),
            b':' => self.punct(1, SyntaxKind::ColonToken),
            b'.' => self.scan_dot(),
            b'?' => self.scan_question(),
            b'<' => self.scan_operator(&[
                ("<<=", SyntaxKind::LessThanLessThanEqualsToken),
                ("<<", SyntaxKind::LessThanLessThanToken),
                ("<=", SyntaxKind::LessThanEqualsToken),
                ("<", SyntaxKind::LessThanToken),
            ]),
            b'>' => self.scan_operator(&[
                (">>>=", SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken),
                (">>>", SyntaxKind::GreaterThanGreaterThanGreaterThanToken),
                (">>=", SyntaxKind::GreaterThanGreaterThanEqualsToken),
                (">>", SyntaxKind::GreaterThanGreaterThanToken),
                (">=", SyntaxKind::GreaterThanEqualsToken),
                (">", SyntaxKind::GreaterThanToken),
            ]),
            b'=' => self.scan_operator(&[
                ("===", SyntaxKind::EqualsEqualsEqualsToken),
                ("==", SyntaxKind::EqualsEqualsToken),
                ("=>", SyntaxKind::EqualsGreaterThanToken),
                ("=", SyntaxKind::EqualsToken),
            ]),
            b'!' => self.scan_operator(&[
                ("!==", SyntaxKind::ExclamationEqualsEqualsToken),
                ("!=", SyntaxKind::ExclamationEqualsToken),
                ("!", SyntaxKind::ExclamationToken),
            ]),
            b'+' => self.scan_operator(&[
                ("++", SyntaxKind::PlusPlusToken),
                ("+=", SyntaxKind::PlusEqualsToken),
                ("+", SyntaxKind::PlusToken),
            ]),
            b'-' => self.scan_operator(&[
                ("--", SyntaxKind::MinusMinusToken),
                ("-=", SyntaxKind::MinusEqualsToken),
                ("-", SyntaxKind::MinusToken),
            ]),
            b'*' => self.scan_operator(&[
                ("**=", SyntaxKind::AsteriskAsteriskEqualsToken),
                ("**", SyntaxKind::AsteriskAsteriskToken),
                ("*=", SyntaxKind::AsteriskEqualsToken),
                ("*", SyntaxKind::AsteriskToken),
            ]),
            b'/' => self.scan_operator(&[
                ("/=", SyntaxKind::SlashEqualsToken),
                ("/", SyntaxKind::SlashToken),
            ]),
            b'%' => self.scan_operator(&[
                ("%=", SyntaxKind::PercentEqualsToken),
                ("%", SyntaxKind::PercentToken),
            ]),
            b'&' => self.scan_operator(&[
                ("&&=", SyntaxKind::AmpersandAmpersandEqualsToken),
                ("&&", SyntaxKind::AmpersandAmpersandToken),
                ("&=", SyntaxKind::AmpersandEqualsToken),
                ("&", SyntaxKind::AmpersandToken),
            ]),
            b'|' => self.scan_operator(&[
                ("||=", SyntaxKind::BarBarEqualsToken),
                ("||", SyntaxKind::BarBarToken),
                ("|=", SyntaxKind::BarEqualsToken),
                ("|", SyntaxKind::BarToken),
            ]),
            b'^' => self.scan_operator(&[
                ("^=", SyntaxKind::CaretEqualsToken),
                ("^", SyntaxKind::CaretToken),
            ]),
            b'\'' | b'"' => self.scan_string_literal(b),
            b'`' => {
                self.pos += 1;
                self.scan_template_part(true)
            }
            b'0'..=b'9' => self.scan_number(),
            b'#' => self.scan_hash(),
            _ => match self.char_at_pos(self.pos) {
                Some(ch) if is_identifier_start(ch) => self.scan_identifier(),
                other => {
                    let start = self.pos;
                    self.pos += other.map_or(1, char::len_utf8);
                    self.error(start, self.pos, &messages::INVALID_CHARACTER);
                    SyntaxKind::Unknown
                }
            },
        };

        self.token
    }

    #[inline]
    fn punct(&mut self, len: usize, kind: SyntaxKind) -> SyntaxKind {
        self.pos += len;
        kind
    }

    /// Longest-match scan over `candidates`, which must be ordered longest
    /// first.
    fn scan_operator(&mut self, candidates: &[(&str, SyntaxKind)]) -> SyntaxKind {
        let rest = &self.bytes()[self.pos..];
        for &(text, kind) in candidates {
            if rest.starts_with(text.as_bytes()) {
                self.pos += text.len();
                return kind;
            }
        }
        self.pos += 1;
        SyntaxKind::Unknown
    }

    fn scan_dot(&mut self) -> SyntaxKind {
        if self.byte_at(1) == Some(b'.') && self.byte_at(2) == Some(b'.') {
            self.punct(3, SyntaxKind::DotDotDotToken)
        } else if self.byte_at(1).is_some_and(is_digit) {
            self.scan_number()
        } else {
            self.punct(1, SyntaxKind::DotToken)
        }
    }

    fn scan_question(&mut self) -> SyntaxKind {
        match (self.byte_at(1), self.byte_at(2)) {
            (Some(b'?'), Some(b'=')) => self.punct(3, SyntaxKind::QuestionQuestionEqualsToken),
            (Some(b'?'), _) => self.punct(2, SyntaxKind::QuestionQuestionToken),
            // `a?.5:b` is a conditional, not optional chaining.
            (Some(b'.'), next) if !next.is_some_and(is_digit) => {
                self.punct(2, SyntaxKind::QuestionDotToken)
            }
            _ => self.punct(1, SyntaxKind::QuestionToken),
        }
    }

    fn scan_hash(&mut self) -> SyntaxKind {
        match self.char_at_pos(self.pos + 1) {
            Some(ch) if is_identifier_start(ch) => {
                self.pos += 1;
                self.scan_identifier_part_chars();
                self.token_value = self.text[self.token_start..self.pos].to_string();
                SyntaxKind::PrivateIdentifier
            }
            _ => self.punct(1, SyntaxKind::HashToken),
        }
    }

    fn scan_identifier_part_chars(&mut self) {
        while let Some(ch) = self.char_at_pos(self.pos) {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        self.scan_identifier_part_chars();
        self.token_value = self.text[self.token_start..self.pos].to_string();
        SyntaxKind::from_keyword(&self.token_value).unwrap_or(SyntaxKind::Identifier)
    }

    // ========================================================================
    // Literals
    // ========================================================================

    fn scan_string_literal(&mut self, quote: u8) -> SyntaxKind {
        if quote == b'\'' {
            self.token_flags |= TokenFlags::SINGLE_QUOTE;
        }
        let start = self.pos + 1;
        let mut cursor = start;
        loop {
            match memchr::memchr3(quote, b'\\', b'\n', &self.bytes()[cursor..]) {
                Some(i) if self.bytes()[cursor + i] == b'\\' => {
                    cursor += i + 2;
                    // Line continuation written as `\` CR LF.
                    if self.bytes().get(cursor - 1) == Some(&b'\r')
                        && self.bytes().get(cursor) == Some(&b'\n')
                    {
                        cursor += 1;
                    }
                    cursor = cursor.min(self.text.len());
                }
                Some(i) if self.bytes()[cursor + i] == quote => {
                    self.token_value = self.text[start..cursor + i].to_string();
                    self.pos = cursor + i + 1;
                    return SyntaxKind::StringLiteral;
                }
                found => {
                    let end = found.map_or(self.text.len(), |i| cursor + i);
                    self.token_value = self.text[start..end].to_string();
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.pos = end;
                    self.error(self.token_start, end, &messages::UNTERMINATED_STRING_LITERAL);
                    return SyntaxKind::StringLiteral;
                }
            }
        }
    }

    /// Scan template text starting at `self.pos` up to and including the next
    /// `${` or closing backtick.
    fn scan_template_part(&mut self, is_head: bool) -> SyntaxKind {
        let start = self.pos;
        let mut cursor = start;
        loop {
            match memchr::memchr3(b'`', b'$', b'\\', &self.bytes()[cursor..]) {
                Some(i) => {
                    let at = cursor + i;
                    match self.bytes()[at] {
                        b'\\' => cursor = (at + 2).min(self.text.len()),
                        b'$' if self.bytes().get(at + 1) == Some(&b'{') => {
                            self.token_value = self.text[start..at].to_string();
                            self.pos = at + 2;
                            return if is_head {
                                SyntaxKind::TemplateHead
                            } else {
                                SyntaxKind::TemplateMiddle
                            };
                        }
                        b'$' => cursor = at + 1,
                        _ => {
                            self.token_value = self.text[start..at].to_string();
                            self.pos = at + 1;
                            return self.template_end_kind(is_head);
                        }
                    }
                }
                None => {
                    self.token_value = self.text[start..].to_string();
                    self.pos = self.text.len();
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(self.token_start, self.pos, &messages::UNTERMINATED_TEMPLATE_LITERAL);
                    return self.template_end_kind(is_head);
                }
            }
        }
    }

    fn template_end_kind(&self, is_head: bool) -> SyntaxKind {
        if is_head {
            SyntaxKind::NoSubstitutionTemplateLiteral
        } else {
            SyntaxKind::TemplateTail
        }
    }

    /// Re-scan a `}` token as the continuation of a template literal. The
    /// parser calls this after the expression of a `${ ... }` substitution.
    pub fn rescan_template_token(&mut self) -> SyntaxKind {
        self.pos = self.token_start + 1;
        self.token_flags.remove(TokenFlags::UNTERMINATED);
        self.token = self.scan_template_part(false);
        self.token
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal. The
    /// parser calls this when a slash appears where an operand is expected.
    pub fn rescan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(self.token, SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken) {
            return self.token;
        }
        let mut cursor = self.token_start + 1;
        let mut in_class = false;
        loop {
            match self.bytes().get(cursor).copied() {
                None | Some(b'\n') | Some(b'\r') => {
                    self.pos = cursor.min(self.text.len());
                    self.token_flags |= TokenFlags::UNTERMINATED;
                    self.error(
                        self.token_start,
                        self.pos,
                        &messages::UNTERMINATED_REGULAR_EXPRESSION_LITERAL,
                    );
                    break;
                }
                Some(b'\\') => cursor += 2,
                Some(b'[') => {
                    in_class = true;
                    cursor += 1;
                }
                Some(b']') => {
                    in_class = false;
                    cursor += 1;
                }
                Some(b'/') if !in_class => {
                    self.pos = cursor + 1;
                    self.scan_identifier_part_chars();
                    break;
                }
                Some(_) => cursor += 1,
            }
        }
        self.pos = self.pos.min(self.text.len());
        self.token_value = self.text[self.token_start..self.pos].to_string();
        self.token = SyntaxKind::RegularExpressionLiteral;
        self.token
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        let radix_prefix = match (self.byte_at(0), self.byte_at(1)) {
            (Some(b'0'), Some(b'x' | b'X')) => Some((TokenFlags::HEX_SPECIFIER, 16)),
            (Some(b'0'), Some(b'b' | b'B')) => Some((TokenFlags::BINARY_SPECIFIER, 2)),
            (Some(b'0'), Some(b'o' | b'O')) => Some((TokenFlags::OCTAL_SPECIFIER, 8)),
            _ => None,
        };

        let mut is_integer = true;
        if let Some((flag, radix)) = radix_prefix {
            self.token_flags |= flag;
            self.pos += 2;
            let digits = self.scan_digits(|b| (b as char).is_digit(radix));
            if digits == 0 {
                let message = if radix == 16 {
                    &messages::HEXADECIMAL_DIGIT_EXPECTED
                } else {
                    &messages::DIGIT_EXPECTED
                };
                self.error(start, self.pos, message);
            }
        } else {
            self.scan_digits(is_digit);
            if self.byte_at(0) == Some(b'.') {
                is_integer = false;
                self.pos += 1;
                self.scan_digits(is_digit);
            }
            if matches!(self.byte_at(0), Some(b'e' | b'E')) {
                is_integer = false;
                self.token_flags |= TokenFlags::SCIENTIFIC;
                self.pos += 1;
                if matches!(self.byte_at(0), Some(b'+' | b'-')) {
                    self.pos += 1;
                }
                if self.scan_digits(is_digit) == 0 {
                    self.error(start, self.pos, &messages::DIGIT_EXPECTED);
                }
            }
        }

        let kind = if is_integer && self.byte_at(0) == Some(b'n') {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };

        if let Some(ch) = self.char_at_pos(self.pos) {
            if is_identifier_start(ch) {
                let ident_start = self.pos;
                self.scan_identifier_part_chars();
                self.error(ident_start, self.pos, &messages::IDENTIFIER_CANNOT_FOLLOW_NUMERIC_LITERAL);
            }
        }

        self.token_value = self.text[start..self.pos].to_string();
        kind
    }

    /// Consume digits accepted by `is_digit_of_radix`, allowing `_`
    /// separators. Returns the number of digits consumed.
    fn scan_digits(&mut self, is_digit_of_radix: impl Fn(u8) -> bool) -> usize {
        let mut count = 0;
        while let Some(b) = self.byte_at(0) {
            if is_digit_of_radix(b) {
                count += 1;
            } else if b == b'_' && count > 0 {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
            } else {
                break;
            }
            self.pos += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_all(text: &str) -> Vec<SyntaxKind> {
        let mut scanner = Scanner::new(text);
        let mut kinds = Vec::new();
        loop {
            let kind = scanner.scan();
            if kind == SyntaxKind::EndOfFileToken {
                break;
            }
            kinds.push(kind);
        }
        kinds
    }

    #[test]
    fn test_scan_simple_tokens() {
        assert_eq!(
            scan_all("let x = $signal(0);"),
            vec![
                SyntaxKind::LetKeyword,
                SyntaxKind::Identifier,
                SyntaxKind::EqualsToken,
                SyntaxKind::Identifier,
                SyntaxKind::OpenParenToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::CloseParenToken,
                SyntaxKind::SemicolonToken,
            ]
        );
    }

    #[test]
    fn test_scan_longest_match_operators() {
        assert_eq!(
            scan_all(">>>= ** **= ??= ?. ?? && ||= =>"),
            vec![
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken,
                SyntaxKind::AsteriskAsteriskToken,
                SyntaxKind::AsteriskAsteriskEqualsToken,
                SyntaxKind::QuestionQuestionEqualsToken,
                SyntaxKind::QuestionDotToken,
                SyntaxKind::QuestionQuestionToken,
                SyntaxKind::AmpersandAmpersandToken,
                SyntaxKind::BarBarEqualsToken,
                SyntaxKind::EqualsGreaterThanToken,
            ]
        );
    }

    #[test]
    fn test_question_dot_before_digit_is_conditional() {
        assert_eq!(
            scan_all("a?.5:b"),
            vec![
                SyntaxKind::Identifier,
                SyntaxKind::QuestionToken,
                SyntaxKind::NumericLiteral,
                SyntaxKind::ColonToken,
                SyntaxKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_string_literal_keeps_raw_text() {
        let mut scanner = Scanner::new(r#"'it\'s' "a\"b""#);
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), r"it\'s");
        assert!(scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE));
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert_eq!(scanner.token_value(), r#"a\"b"#);
        assert!(!scanner.token_flags().contains(TokenFlags::SINGLE_QUOTE));
    }

    #[test]
    fn test_unterminated_string() {
        let mut scanner = Scanner::new("'abc\nx");
        assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
        assert!(scanner.token_flags().contains(TokenFlags::UNTERMINATED));
        assert_eq!(scanner.take_diagnostics().error_count(), 1);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_numbers() {
        let mut scanner = Scanner::new("0xFF 1_000 1.5e-3 10n .5");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "0xFF");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "1_000");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), "1.5e-3");
        assert_eq!(scanner.scan(), SyntaxKind::BigIntLiteral);
        assert_eq!(scanner.token_value(), "10n");
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), ".5");
    }

    #[test]
    fn test_comments_set_line_break_flag() {
        let mut scanner = Scanner::new("a /* x\n y */ b // tail\nc");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "b");
        assert!(scanner.has_preceding_line_break());
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "c");
        assert!(scanner.has_preceding_line_break());
    }

    #[test]
    fn test_template_rescan() {
        let mut scanner = Scanner::new("`a${x}b${y}c`");
        assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
        assert_eq!(scanner.token_value(), "a");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateMiddle);
        assert_eq!(scanner.token_value(), "b");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
        assert_eq!(scanner.rescan_template_token(), SyntaxKind::TemplateTail);
        assert_eq!(scanner.token_value(), "c");
        assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn test_regex_rescan() {
        let mut scanner = Scanner::new("/[/]+\\//gi.test");
        assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
        assert_eq!(scanner.rescan_slash_token(), SyntaxKind::RegularExpressionLiteral);
        assert_eq!(scanner.token_value(), "/[/]+\\//gi");
        assert_eq!(scanner.scan(), SyntaxKind::DotToken);
    }

    #[test]
    fn test_private_identifier_and_unicode() {
        let mut scanner = Scanner::new("#count café");
        assert_eq!(scanner.scan(), SyntaxKind::PrivateIdentifier);
        assert_eq!(scanner.token_value(), "#count");
        assert_eq!(scanner.scan(), SyntaxKind::Identifier);
        assert_eq!(scanner.token_value(), "café");
        assert_eq!(scanner.token_end(), "#count café".len());
    }

    #[test]
    fn test_look_ahead_restores_state() {
        let mut scanner = Scanner::new("a b");
        scanner.scan();
        let next = scanner.look_ahead(|s| {
            s.scan();
            s.token_value().to_string()
        });
        assert_eq!(next, "b");
        assert_eq!(scanner.token_value(), "a");
    }

    #[test]
    fn test_shebang() {
        let mut scanner = Scanner::new("#!/usr/bin/env node\nlet");
        scanner.skip_shebang();
        assert_eq!(scanner.scan(), SyntaxKind::LetKeyword);
    }
}
