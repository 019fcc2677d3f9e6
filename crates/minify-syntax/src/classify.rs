//! Classifier predicates over call and write nodes.
//!
//! Pure functions; the writer consults them to pick a rendering rule.

use crate::config::LiteralStyle;
use crate::ir::SyntaxNode;

/// Operators written between their two operands.
const INFIX_OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "**", "%", "^", ">", "<", "<=", ">=", "<=>", "==", "===",
];

/// Infix operators with an `OP=` assignment form.
const COMPOUND_OPERATORS: &[&str] = &["+", "-", "*", "/", "**", "%", "^"];

pub const PREC_MODIFIER: u8 = 0;
/// Unparenthesized argument lists (`yield a`, `include M`): they swallow a
/// following `,` so they cannot stand inside another list.
pub const PREC_COMMAND: u8 = 1;
pub const PREC_ASSIGN: u8 = 2;
pub const PREC_TERNARY: u8 = 3;
pub const PREC_OR: u8 = 4;
pub const PREC_AND: u8 = 5;
pub const PREC_EQUALITY: u8 = 6;
pub const PREC_COMPARISON: u8 = 7;
pub const PREC_BIT_OR: u8 = 8;
pub const PREC_ADDITIVE: u8 = 9;
pub const PREC_MULTIPLICATIVE: u8 = 10;
pub const PREC_NEGATIVE: u8 = 11;
pub const PREC_POWER: u8 = 12;
pub const PREC_UNARY: u8 = 13;
pub const PREC_PRIMARY: u8 = 14;

pub fn is_infix_operator(method_name: &str) -> bool {
    INFIX_OPERATORS.contains(&method_name)
}

pub fn is_compound_operator(method_name: &str) -> bool {
    COMPOUND_OPERATORS.contains(&method_name)
}

pub fn is_unary_not(method_name: &str) -> bool {
    method_name == "!"
}

pub fn is_indexing_read(method_name: &str) -> bool {
    method_name == "[]"
}

pub fn is_indexing_write(method_name: &str) -> bool {
    method_name == "[]="
}

/// Binding strength of an infix operator; higher binds tighter.
pub fn infix_precedence(method_name: &str) -> Option<u8> {
    let prec = match method_name {
        "**" => PREC_POWER,
        "*" | "/" | "%" => PREC_MULTIPLICATIVE,
        "+" | "-" => PREC_ADDITIVE,
        "^" => PREC_BIT_OR,
        ">" | "<" | "<=" | ">=" => PREC_COMPARISON,
        "<=>" | "==" | "===" => PREC_EQUALITY,
        _ => return None,
    };
    Some(prec)
}

/// Whether `a OP b OP c` may be written without grouping the left pair.
pub fn is_left_associative(method_name: &str) -> bool {
    !matches!(method_name, "**" | "<=>" | "==" | "===")
}

/// True iff `call` carries a block body or a forwarded `&block` argument.
pub fn has_trailing_block(call: &SyntaxNode) -> bool {
    match call {
        SyntaxNode::Call {
            block_body,
            block_forward,
            ..
        } => block_body.is_some() || block_forward.is_some(),
        _ => false,
    }
}

/// True iff `write` has the shape `x = x OP y`, `x = x && y` or `x = x || y`.
///
/// The left operand must read the very variable being written, compared by
/// name and by kind: a local write never matches an instance read. Arithmetic
/// compaction only applies to `Verbose` output.
pub fn is_compound_self_assignment(write: &SyntaxNode, style: LiteralStyle) -> bool {
    let (name, rhs, instance) = match write {
        SyntaxNode::LocalVarWrite { name, rhs } => (name, rhs, false),
        SyntaxNode::InstanceVarWrite { name, rhs } => (name, rhs, true),
        _ => return false,
    };

    let reads_target = |node: &SyntaxNode| match node {
        SyntaxNode::LocalVarRead { name: read } => !instance && read == name,
        SyntaxNode::InstanceVarRead { name: read } => instance && read == name,
        _ => false,
    };

    match rhs.as_ref() {
        SyntaxNode::LogicalAnd { lhs, .. } | SyntaxNode::LogicalOr { lhs, .. } => {
            reads_target(lhs.as_ref())
        }
        SyntaxNode::Call {
            receiver: Some(receiver),
            method_name,
            positional_args,
            ..
        } => {
            style == LiteralStyle::Verbose
                && is_compound_operator(method_name)
                && positional_args.len() == 1
                && !has_trailing_block(rhs)
                && reads_target(receiver.as_ref())
        }
        _ => false,
    }
}
