//! Symbolic differentiation.
//!
//! Implements the standard rule set: linearity, product and quotient rules,
//! the power rule and its logarithmic generalization, and the chain rule
//! through the built-in function table. Where no closed-form rule exists
//! (absolute value, caller-interned functions) the derivative is left
//! symbolic as an [`ExprNode::Derivative`] marker rather than reported as an
//! error; the expansion engine treats such markers as legitimate residuals.

use smallvec::smallvec;

use seriatim_core::expr::{functions, ExprId, ExprNode};
use seriatim_core::ExprArena;

use crate::norm;
use crate::occurs::contains_var;

/// Computes the derivative of `e` with respect to `v`.
pub fn derivative(arena: &mut ExprArena, e: ExprId, v: ExprId) -> ExprId {
    if !contains_var(arena, e, v) {
        return arena.integer(0);
    }
    let node = arena.get(e).clone();
    match node {
        // contains_var held, so a symbol here is the variable itself
        ExprNode::Symbol(_) => arena.integer(1),

        ExprNode::Integer(_)
        | ExprNode::Rational(_, _)
        | ExprNode::Infinity(_)
        | ExprNode::Undefined => arena.integer(0),

        ExprNode::Add(args) => {
            let terms: Vec<ExprId> = args
                .iter()
                .map(|&a| derivative(arena, a, v))
                .collect();
            norm::add(arena, terms)
        }

        ExprNode::Neg(arg) => {
            let inner = derivative(arena, arg, v);
            norm::neg(arena, inner)
        }

        ExprNode::Mul(args) => {
            // Leibniz rule over the whole factor list
            let mut terms = Vec::with_capacity(args.len());
            for (i, &fi) in args.iter().enumerate() {
                let dfi = derivative(arena, fi, v);
                if arena.get(dfi).is_zero() {
                    continue;
                }
                let mut factors = vec![dfi];
                factors.extend(
                    args.iter()
                        .enumerate()
                        .filter(|&(j, _)| j != i)
                        .map(|(_, &a)| a),
                );
                terms.push(norm::mul(arena, factors));
            }
            norm::add(arena, terms)
        }

        ExprNode::Div { num, den } => {
            let dnum = derivative(arena, num, v);
            let dden = derivative(arena, den, v);
            let lhs = norm::mul(arena, [dnum, den]);
            let rhs = norm::mul(arena, [num, dden]);
            let neg_rhs = norm::neg(arena, rhs);
            let top = norm::add(arena, [lhs, neg_rhs]);
            let two = arena.integer(2);
            let bottom = norm::pow(arena, den, two);
            norm::div(arena, top, bottom)
        }

        ExprNode::Pow { base, exp } => derive_pow(arena, e, base, exp, v),

        ExprNode::Function { id, args } => derive_function(arena, e, id, &args, v),

        ExprNode::Derivative { expr, var, order } => {
            if var == v {
                arena.derivative_marker(expr, v, order + 1)
            } else {
                arena.derivative_marker(e, v, 1)
            }
        }
    }
}

/// Computes the `order`-th derivative of `e` with respect to `v`.
///
/// An order of zero returns `e` unchanged.
pub fn derivative_n(arena: &mut ExprArena, e: ExprId, v: ExprId, order: u32) -> ExprId {
    let mut current = e;
    for _ in 0..order {
        current = derivative(arena, current, v);
    }
    current
}

fn derive_pow(arena: &mut ExprArena, e: ExprId, base: ExprId, exp: ExprId, v: ExprId) -> ExprId {
    if !contains_var(arena, exp, v) {
        // d(u^c) = c * u^(c-1) * u'
        let du = derivative(arena, base, v);
        let minus_one = arena.integer(-1);
        let exp_m1 = norm::add(arena, [exp, minus_one]);
        let pw = norm::pow(arena, base, exp_m1);
        norm::mul(arena, [exp, pw, du])
    } else if !contains_var(arena, base, v) {
        // d(c^u) = c^u * ln(c) * u'
        let du = derivative(arena, exp, v);
        let ln_base = arena.function(functions::LN, smallvec![base]);
        norm::mul(arena, [e, ln_base, du])
    } else {
        // d(f^g) = f^g * (g' * ln(f) + g * f' / f)
        let df = derivative(arena, base, v);
        let dg = derivative(arena, exp, v);
        let ln_f = arena.function(functions::LN, smallvec![base]);
        let log_part = norm::mul(arena, [dg, ln_f]);
        let g_df = norm::mul(arena, [exp, df]);
        let ratio_part = norm::div(arena, g_df, base);
        let sum = norm::add(arena, [log_part, ratio_part]);
        norm::mul(arena, [e, sum])
    }
}

fn derive_function(
    arena: &mut ExprArena,
    e: ExprId,
    id: u32,
    args: &[ExprId],
    v: ExprId,
) -> ExprId {
    if args.len() != 1 {
        return arena.derivative_marker(e, v, 1);
    }
    let u = args[0];
    let du = derivative(arena, u, v);
    match id {
        functions::SIN => {
            let cos_u = arena.function(functions::COS, smallvec![u]);
            norm::mul(arena, [cos_u, du])
        }
        functions::COS => {
            let sin_u = arena.function(functions::SIN, smallvec![u]);
            let neg_sin = norm::neg(arena, sin_u);
            norm::mul(arena, [neg_sin, du])
        }
        functions::TAN => {
            // d(tan u) = (1 + tan(u)^2) * u'
            let tan_u = arena.function(functions::TAN, smallvec![u]);
            let two = arena.integer(2);
            let tan_sq = norm::pow(arena, tan_u, two);
            let one = arena.integer(1);
            let outer = norm::add(arena, [one, tan_sq]);
            norm::mul(arena, [outer, du])
        }
        functions::EXP => norm::mul(arena, [e, du]),
        functions::LN => norm::div(arena, du, u),
        functions::LOG10 => {
            let ten = arena.integer(10);
            let ln_ten = arena.function(functions::LN, smallvec![ten]);
            let scaled = norm::mul(arena, [u, ln_ten]);
            norm::div(arena, du, scaled)
        }
        functions::SQRT => {
            let sqrt_u = arena.function(functions::SQRT, smallvec![u]);
            let two = arena.integer(2);
            let scaled = norm::mul(arena, [two, sqrt_u]);
            norm::div(arena, du, scaled)
        }
        // abs has no derivative rule valid across its kink, and unknown
        // functions have none at all: leave the derivative symbolic
        _ => arena.derivative_marker(e, v, 1),
    }
}
