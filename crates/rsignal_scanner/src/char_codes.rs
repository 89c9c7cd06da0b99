//! Character classification used by the scanner.

use unicode_xid::UnicodeXID;

pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Whitespace that does not end a line.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphabetic() || ch == '$' || ch == '_'
    } else {
        UnicodeXID::is_xid_start(ch)
    }
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '$' || ch == '_'
    } else {
        UnicodeXID::is_xid_continue(ch) || ch == '\u{200C}' || ch == '\u{200D}'
    }
}

#[inline]
pub fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}
