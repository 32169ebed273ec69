//! Infix rendering of expressions.
//!
//! The kernel has no parser or pretty-printer of its own; this renderer
//! exists for diagnostics, logging and test assertions. Output is plain
//! ASCII infix with the minimal parentheses the precedence levels require.

use std::fmt::Write;

use crate::arena::ExprArena;
use crate::expr::{ExprId, ExprNode, Sign};

/// Renders an expression to an infix string.
#[must_use]
pub fn render(arena: &ExprArena, e: ExprId) -> String {
    let mut out = String::new();
    write_expr(arena, e, 0, &mut out);
    out
}

/// Binding strength of a node, from loosest (sums) to tightest (atoms).
fn precedence(node: &ExprNode) -> u8 {
    match node {
        ExprNode::Add(_) => 1,
        ExprNode::Neg(_) => 2,
        ExprNode::Mul(_) | ExprNode::Div { .. } => 3,
        ExprNode::Pow { .. } => 4,
        _ => 5,
    }
}

fn write_expr(arena: &ExprArena, e: ExprId, min_prec: u8, out: &mut String) {
    let node = arena.get(e);
    let paren = precedence(node) < min_prec;
    if paren {
        out.push('(');
    }
    match node {
        ExprNode::Integer(n) => {
            let _ = write!(out, "{n}");
        }
        ExprNode::Rational(n, d) => {
            let _ = write!(out, "{n}/{d}");
        }
        ExprNode::Symbol(s) => {
            out.push_str(arena.symbol_name(*s).unwrap_or("?"));
        }
        ExprNode::Infinity(Sign::Positive) => out.push_str("inf"),
        ExprNode::Infinity(Sign::Negative) => out.push_str("-inf"),
        ExprNode::Undefined => out.push_str("und"),
        ExprNode::Add(args) => {
            for (i, &arg) in args.iter().enumerate() {
                if i == 0 {
                    write_expr(arena, arg, 2, out);
                } else if let Some(flipped) = negated_operand(arena, arg) {
                    out.push_str(" - ");
                    match flipped {
                        Negated::Expr(inner) => write_expr(arena, inner, 2, out),
                        Negated::Integer(n) => {
                            let _ = write!(out, "{n}");
                        }
                        Negated::Rational(n, d) => {
                            let _ = write!(out, "{n}/{d}");
                        }
                        Negated::Product(lead, rest) => {
                            if !lead.is_empty() {
                                out.push_str(&lead);
                                out.push('*');
                            }
                            for (j, &factor) in rest.iter().enumerate() {
                                if j > 0 {
                                    out.push('*');
                                }
                                write_expr(arena, factor, 3, out);
                            }
                        }
                    }
                } else {
                    out.push_str(" + ");
                    write_expr(arena, arg, 2, out);
                }
            }
        }
        ExprNode::Mul(args) => {
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push('*');
                }
                write_expr(arena, arg, 3, out);
            }
        }
        ExprNode::Pow { base, exp } => {
            write_expr(arena, *base, 5, out);
            out.push('^');
            write_expr(arena, *exp, 5, out);
        }
        ExprNode::Neg(arg) => {
            out.push('-');
            write_expr(arena, *arg, 3, out);
        }
        ExprNode::Div { num, den } => {
            write_expr(arena, *num, 3, out);
            out.push('/');
            write_expr(arena, *den, 4, out);
        }
        ExprNode::Function { id, args } => {
            out.push_str(arena.function_name(*id).unwrap_or("?"));
            out.push('(');
            for (i, &arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(arena, arg, 0, out);
            }
            out.push(')');
        }
        ExprNode::Derivative { expr, var, order } => {
            out.push_str("diff(");
            write_expr(arena, *expr, 0, out);
            out.push_str(", ");
            write_expr(arena, *var, 0, out);
            let _ = write!(out, ", {order})");
        }
    }
    if paren {
        out.push(')');
    }
}

enum Negated {
    Expr(ExprId),
    Integer(i64),
    Rational(i64, u64),
    /// A product with its leading numeric coefficient sign-flipped; the
    /// string is the rendered magnitude, empty when the magnitude is one.
    Product(String, Vec<ExprId>),
}

/// Recognizes operands a sum should join with " - " instead of " + ".
fn negated_operand(arena: &ExprArena, e: ExprId) -> Option<Negated> {
    match arena.get(e) {
        ExprNode::Neg(inner) => Some(Negated::Expr(*inner)),
        ExprNode::Integer(n) if *n < 0 => Some(Negated::Integer(-n)),
        ExprNode::Rational(n, d) if *n < 0 => Some(Negated::Rational(-n, *d)),
        ExprNode::Mul(args) if !args.is_empty() => {
            let rest = args[1..].to_vec();
            match arena.get(args[0]) {
                ExprNode::Integer(n) if *n < 0 => {
                    let lead = if *n == -1 { String::new() } else { format!("{}", -n) };
                    Some(Negated::Product(lead, rest))
                }
                ExprNode::Rational(n, d) if *n < 0 => {
                    Some(Negated::Product(format!("{}/{d}", -n), rest))
                }
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_atoms_and_sums() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let three = arena.integer(-3);
        let sum = arena.add(smallvec::smallvec![x, three]);

        assert_eq!(render(&arena, sum), "x - 3");
    }

    #[test]
    fn parenthesizes_by_precedence() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let one = arena.integer(1);
        let sum = arena.add(smallvec::smallvec![x, one]);
        let two = arena.integer(2);
        let sq = arena.pow(sum, two);

        assert_eq!(render(&arena, sq), "(x + 1)^2");

        let half_base = arena.div(one, sum);
        assert_eq!(render(&arena, half_base), "1/(x + 1)");
    }

    #[test]
    fn renders_functions_and_markers() {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let sin_x = arena.func("sin", smallvec::smallvec![x]);
        let marker = arena.derivative_marker(sin_x, x, 2);

        assert_eq!(render(&arena, marker), "diff(sin(x), x, 2)");
    }
}
