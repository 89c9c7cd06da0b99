//! Operator precedence for binary and unary operators.
//!
//! Shared by the parser, which climbs binary operators by precedence, and
//! the printer, which decides where synthesized expressions need
//! parentheses.

use crate::node::Expression;
use crate::syntax_kind::SyntaxKind;

/// Operator precedence levels, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Comma = 0,
    Spread = 1,
    Yield = 2,
    Assignment = 3,
    Conditional = 4,
    NullishCoalescing = 5,
    LogicalOr = 6,
    LogicalAnd = 7,
    BitwiseOr = 8,
    BitwiseXor = 9,
    BitwiseAnd = 10,
    Equality = 11,
    Relational = 12,
    Shift = 13,
    Additive = 14,
    Multiplicative = 15,
    Exponentiation = 16,
    Unary = 17,
    Update = 18,
    LeftHandSide = 19,
    Member = 20,
    Primary = 21,
    Highest = 22,
    Invalid = 255,
}

impl OperatorPrecedence {
    /// The next level up, used as the minimum precedence of a
    /// left-associative operator's right operand.
    pub fn next(self) -> OperatorPrecedence {
        match self {
            OperatorPrecedence::Comma => OperatorPrecedence::Spread,
            OperatorPrecedence::Spread => OperatorPrecedence::Yield,
            OperatorPrecedence::Yield => OperatorPrecedence::Assignment,
            OperatorPrecedence::Assignment => OperatorPrecedence::Conditional,
            OperatorPrecedence::Conditional => OperatorPrecedence::NullishCoalescing,
            OperatorPrecedence::NullishCoalescing => OperatorPrecedence::LogicalOr,
            OperatorPrecedence::LogicalOr => OperatorPrecedence::LogicalAnd,
            OperatorPrecedence::LogicalAnd => OperatorPrecedence::BitwiseOr,
            OperatorPrecedence::BitwiseOr => OperatorPrecedence::BitwiseXor,
            OperatorPrecedence::BitwiseXor => OperatorPrecedence::BitwiseAnd,
            OperatorPrecedence::BitwiseAnd => OperatorPrecedence::Equality,
            OperatorPrecedence::Equality => OperatorPrecedence::Relational,
            OperatorPrecedence::Relational => OperatorPrecedence::Shift,
            OperatorPrecedence::Shift => OperatorPrecedence::Additive,
            OperatorPrecedence::Additive => OperatorPrecedence::Multiplicative,
            OperatorPrecedence::Multiplicative => OperatorPrecedence::Exponentiation,
            OperatorPrecedence::Exponentiation => OperatorPrecedence::Unary,
            OperatorPrecedence::Unary => OperatorPrecedence::Update,
            OperatorPrecedence::Update => OperatorPrecedence::LeftHandSide,
            OperatorPrecedence::LeftHandSide => OperatorPrecedence::Member,
            OperatorPrecedence::Member => OperatorPrecedence::Primary,
            OperatorPrecedence::Primary | OperatorPrecedence::Highest => OperatorPrecedence::Highest,
            OperatorPrecedence::Invalid => OperatorPrecedence::Invalid,
        }
    }
}

/// Get the binary operator precedence for a given token kind.
pub fn get_binary_operator_precedence(kind: SyntaxKind) -> OperatorPrecedence {
    match kind {
        SyntaxKind::QuestionQuestionToken => OperatorPrecedence::NullishCoalescing,
        SyntaxKind::BarBarToken => OperatorPrecedence::LogicalOr,
        SyntaxKind::AmpersandAmpersandToken => OperatorPrecedence::LogicalAnd,
        SyntaxKind::BarToken => OperatorPrecedence::BitwiseOr,
        SyntaxKind::CaretToken => OperatorPrecedence::BitwiseXor,
        SyntaxKind::AmpersandToken => OperatorPrecedence::BitwiseAnd,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::EqualsEqualsEqualsToken
        | SyntaxKind::ExclamationEqualsEqualsToken => OperatorPrecedence::Equality,
        SyntaxKind::LessThanToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanEqualsToken
        | SyntaxKind::InstanceOfKeyword
        | SyntaxKind::InKeyword => OperatorPrecedence::Relational,
        SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::GreaterThanGreaterThanGreaterThanToken => OperatorPrecedence::Shift,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken => OperatorPrecedence::Additive,
        SyntaxKind::AsteriskToken | SyntaxKind::SlashToken | SyntaxKind::PercentToken => {
            OperatorPrecedence::Multiplicative
        }
        SyntaxKind::AsteriskAsteriskToken => OperatorPrecedence::Exponentiation,
        _ => OperatorPrecedence::Invalid,
    }
}

/// Precedence of the operator at the root of `expr`.
pub fn get_expression_precedence(expr: &Expression<'_>) -> OperatorPrecedence {
    match expr {
        Expression::Binary(binary) => {
            if binary.operator == SyntaxKind::CommaToken {
                OperatorPrecedence::Comma
            } else if binary.operator.is_assignment_operator() {
                OperatorPrecedence::Assignment
            } else {
                get_binary_operator_precedence(binary.operator)
            }
        }
        Expression::Spread(_) => OperatorPrecedence::Spread,
        Expression::Yield(_) => OperatorPrecedence::Yield,
        Expression::ArrowFunction(_) => OperatorPrecedence::Assignment,
        Expression::Conditional(_) => OperatorPrecedence::Conditional,
        Expression::PrefixUnary(_)
        | Expression::Delete(_)
        | Expression::TypeOf(_)
        | Expression::Void(_)
        | Expression::Await(_) => OperatorPrecedence::Unary,
        Expression::PostfixUnary(_) => OperatorPrecedence::Update,
        Expression::Call(_) => OperatorPrecedence::LeftHandSide,
        Expression::New(new) if new.arguments.is_none() => OperatorPrecedence::LeftHandSide,
        Expression::New(_)
        | Expression::PropertyAccess(_)
        | Expression::ElementAccess(_)
        | Expression::TaggedTemplate(_)
        | Expression::MetaProperty(_) => OperatorPrecedence::Member,
        _ => OperatorPrecedence::Primary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_ordering() {
        assert!(
            get_binary_operator_precedence(SyntaxKind::AsteriskToken)
                > get_binary_operator_precedence(SyntaxKind::PlusToken)
        );
        assert!(
            get_binary_operator_precedence(SyntaxKind::BarBarToken)
                > get_binary_operator_precedence(SyntaxKind::QuestionQuestionToken)
        );
        assert_eq!(
            get_binary_operator_precedence(SyntaxKind::EqualsToken),
            OperatorPrecedence::Invalid
        );
    }

    #[test]
    fn test_next_level() {
        assert_eq!(OperatorPrecedence::Additive.next(), OperatorPrecedence::Multiplicative);
        assert_eq!(OperatorPrecedence::Highest.next(), OperatorPrecedence::Highest);
    }
}
