//! Normalizing constructors.
//!
//! These build sums, products, powers and quotients while keeping a light
//! canonical form: nested sums and products are flattened, commutative
//! operands are sorted by handle so hash-consing sees one spelling, numeric
//! subterms fold with exact integer and rational arithmetic, and the
//! indeterminate numeral is contagious. Division by a zero numeral folds to
//! `Undefined` rather than failing; downstream code decides what an
//! indeterminate value means.
//!
//! This layer is deliberately not a general simplifier. It knows arithmetic
//! identities (units, zeros, sign absorption) and nothing about functions.

use seriatim_core::expr::{ExprId, ExprNode};
use seriatim_core::ExprArena;

/// Exact numeral, the internal currency of constant folding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Num {
    Int(i64),
    Rat(i64, u64),
}

const ZERO: Num = Num::Int(0);
const ONE: Num = Num::Int(1);

fn as_num(node: &ExprNode) -> Option<Num> {
    match node {
        ExprNode::Integer(n) => Some(Num::Int(*n)),
        ExprNode::Rational(n, d) => Some(Num::Rat(*n, *d)),
        _ => None,
    }
}

fn intern_num(arena: &mut ExprArena, n: Num) -> ExprId {
    match n {
        Num::Int(v) => arena.integer(v),
        Num::Rat(num, den) => arena.rational(num, den as i64),
    }
}

fn parts(n: Num) -> (i128, i128) {
    match n {
        Num::Int(v) => (i128::from(v), 1),
        Num::Rat(num, den) => (i128::from(num), i128::from(den)),
    }
}

fn reduce(mut num: i128, mut den: i128) -> Num {
    debug_assert!(den != 0);
    if den < 0 {
        num = -num;
        den = -den;
    }
    let g = gcd(num.unsigned_abs(), den.unsigned_abs());
    if g > 1 {
        num /= g as i128;
        den /= g as i128;
    }
    assert!(
        i64::try_from(num).is_ok() && i64::try_from(den).is_ok(),
        "numeric kernel overflow"
    );
    if den == 1 {
        Num::Int(num as i64)
    } else {
        Num::Rat(num as i64, den as u64)
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn num_add(a: Num, b: Num) -> Num {
    let (an, ad) = parts(a);
    let (bn, bd) = parts(b);
    reduce(an * bd + bn * ad, ad * bd)
}

fn num_mul(a: Num, b: Num) -> Num {
    let (an, ad) = parts(a);
    let (bn, bd) = parts(b);
    reduce(an * bn, ad * bd)
}

fn num_neg(a: Num) -> Num {
    let (n, d) = parts(a);
    reduce(-n, d)
}

/// Returns `None` for division by zero.
fn num_div(a: Num, b: Num) -> Option<Num> {
    let (bn, bd) = parts(b);
    if bn == 0 {
        return None;
    }
    let (an, ad) = parts(a);
    Some(reduce(an * bd, ad * bn))
}

/// Folds a numeral power, or returns `None` when the result would leave
/// the 64-bit numeric kernel; such powers stay symbolic.
fn num_pow(base: Num, exp: i64) -> Option<Num> {
    let (n, d) = parts(base);
    let k = u32::try_from(exp.unsigned_abs()).ok()?;
    let np = n.checked_pow(k)?;
    let dp = d.checked_pow(k)?;
    let (num, den) = if exp > 0 { (np, dp) } else { (dp, np) };
    if i64::try_from(num).is_err() || i64::try_from(den).is_err() {
        return None;
    }
    Some(reduce(num, den))
}

/// Builds a sum: flattens nested sums, folds numerals, drops zeros, sorts.
pub fn add(arena: &mut ExprArena, args: impl IntoIterator<Item = ExprId>) -> ExprId {
    let mut pending: Vec<ExprId> = args.into_iter().collect();
    let mut acc = ZERO;
    let mut terms: Vec<ExprId> = Vec::new();
    let mut i = 0;
    while i < pending.len() {
        let a = pending[i];
        i += 1;
        let node = arena.get(a).clone();
        match node {
            ExprNode::Undefined => return arena.undefined(),
            ExprNode::Add(inner) => pending.extend(inner),
            other => {
                if let Some(n) = as_num(&other) {
                    acc = num_add(acc, n);
                } else {
                    terms.push(a);
                }
            }
        }
    }
    if acc != ZERO || terms.is_empty() {
        terms.push(intern_num(arena, acc));
    }
    terms.sort_unstable();
    arena.add(terms)
}

/// Builds a product: flattens nested products, folds numerals and absorbed
/// signs, annihilates on zero, drops units, sorts the symbolic factors and
/// keeps the numeric coefficient first.
pub fn mul(arena: &mut ExprArena, args: impl IntoIterator<Item = ExprId>) -> ExprId {
    let mut pending: Vec<ExprId> = args.into_iter().collect();
    let mut coeff = ONE;
    let mut factors: Vec<ExprId> = Vec::new();
    let mut undefined = false;
    let mut i = 0;
    while i < pending.len() {
        let a = pending[i];
        i += 1;
        let node = arena.get(a).clone();
        match node {
            ExprNode::Undefined => undefined = true,
            ExprNode::Mul(inner) => pending.extend(inner),
            ExprNode::Neg(inner) => {
                coeff = num_neg(coeff);
                pending.push(inner);
            }
            other => {
                if let Some(n) = as_num(&other) {
                    coeff = num_mul(coeff, n);
                } else {
                    factors.push(a);
                }
            }
        }
    }
    if undefined {
        return arena.undefined();
    }
    if coeff == ZERO || factors.is_empty() {
        return intern_num(arena, coeff);
    }
    factors.sort_unstable();
    if coeff != ONE {
        let c = intern_num(arena, coeff);
        factors.insert(0, c);
    }
    arena.mul(factors)
}

/// Builds a negation, folding numerals and double negation.
pub fn neg(arena: &mut ExprArena, arg: ExprId) -> ExprId {
    let node = arena.get(arg).clone();
    match node {
        ExprNode::Undefined => arena.undefined(),
        ExprNode::Neg(inner) => inner,
        other => {
            if let Some(n) = as_num(&other) {
                intern_num(arena, num_neg(n))
            } else {
                arena.neg(arg)
            }
        }
    }
}

/// Builds a power, folding numeral-to-integer powers and the unit laws.
///
/// A zero numeral raised to a negative numeral folds to `Undefined`; zero to
/// the zero is taken to be one.
pub fn pow(arena: &mut ExprArena, base: ExprId, exp: ExprId) -> ExprId {
    let base_node = arena.get(base).clone();
    let exp_node = arena.get(exp).clone();
    if base_node.is_indeterminate() || exp_node.is_indeterminate() {
        return arena.undefined();
    }
    if let (Some(b), ExprNode::Integer(k)) = (as_num(&base_node), &exp_node) {
        if *k == 0 {
            return arena.integer(1);
        }
        if b == ZERO && *k < 0 {
            return arena.undefined();
        }
        if let Some(n) = num_pow(b, *k) {
            return intern_num(arena, n);
        }
        // result leaves the 64-bit kernel; keep the power symbolic
    }
    if exp_node.is_zero() {
        return arena.integer(1);
    }
    if exp_node.is_one() {
        return base;
    }
    if base_node.is_one() {
        return arena.integer(1);
    }
    arena.pow(base, exp)
}

/// Builds a quotient, folding numerals and the unit laws.
///
/// Any numerator over a zero numeral folds to `Undefined`.
pub fn div(arena: &mut ExprArena, num: ExprId, den: ExprId) -> ExprId {
    let num_node = arena.get(num).clone();
    let den_node = arena.get(den).clone();
    if num_node.is_indeterminate() || den_node.is_indeterminate() {
        return arena.undefined();
    }
    if let Some(d) = as_num(&den_node) {
        if d == ZERO {
            return arena.undefined();
        }
        if let Some(n) = as_num(&num_node) {
            let q = num_div(n, d).unwrap_or(ZERO);
            return intern_num(arena, q);
        }
        // numeral denominator folds into the product as a coefficient
        let inv = intern_num(arena, num_div(ONE, d).unwrap_or(ZERO));
        return mul(arena, [inv, num]);
    }
    if num == den {
        return arena.integer(1);
    }
    if num_node.is_zero() {
        return arena.integer(0);
    }
    arena.div(num, den)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (ExprArena, ExprId, ExprId) {
        let mut arena = ExprArena::new();
        let x = arena.symbol("x");
        let y = arena.symbol("y");
        (arena, x, y)
    }

    #[test]
    fn add_folds_and_flattens() {
        let (mut arena, x, y) = setup();
        let two = arena.integer(2);
        let three = arena.integer(3);
        let inner = add(&mut arena, [x, two]);
        let outer = add(&mut arena, [inner, y, three]);

        // x + 2 + y + 3 == x + y + 5, one spelling regardless of grouping
        let five = arena.integer(5);
        let expected = add(&mut arena, [y, five, x]);
        assert_eq!(outer, expected);
    }

    #[test]
    fn add_of_nothing_is_zero() {
        let (mut arena, _, _) = setup();
        let sum = add(&mut arena, []);
        assert!(arena.get(sum).is_zero());
    }

    #[test]
    fn mul_annihilates_on_zero() {
        let (mut arena, x, _) = setup();
        let zero = arena.integer(0);
        let p = mul(&mut arena, [x, zero]);
        assert!(arena.get(p).is_zero());
    }

    #[test]
    fn mul_absorbs_signs_and_units() {
        let (mut arena, x, y) = setup();
        let one = arena.integer(1);
        let neg_y = neg(&mut arena, y);
        let p = mul(&mut arena, [one, x, neg_y]);

        // 1 * x * (-y) == -1 * x * y
        let neg_one = arena.integer(-1);
        let expected = mul(&mut arena, [neg_one, y, x]);
        assert_eq!(p, expected);
    }

    #[test]
    fn commutative_args_are_order_insensitive() {
        let (mut arena, x, y) = setup();
        let a = mul(&mut arena, [x, y]);
        let b = mul(&mut arena, [y, x]);
        assert_eq!(a, b);

        let c = add(&mut arena, [x, y]);
        let d = add(&mut arena, [y, x]);
        assert_eq!(c, d);
    }

    #[test]
    fn rational_arithmetic_is_exact() {
        let (mut arena, _, _) = setup();
        let half = arena.rational(1, 2);
        let third = arena.rational(1, 3);
        let sum = add(&mut arena, [half, third]);
        let expected = arena.rational(5, 6);
        assert_eq!(sum, expected);

        let six = arena.integer(6);
        let prod = mul(&mut arena, [sum, six]);
        let five = arena.integer(5);
        assert_eq!(prod, five);
    }

    #[test]
    fn division_by_zero_numeral_is_indeterminate() {
        let (mut arena, x, _) = setup();
        let zero = arena.integer(0);
        let q = div(&mut arena, zero, zero);
        assert!(arena.get(q).is_indeterminate());
        let q = div(&mut arena, x, zero);
        assert!(arena.get(q).is_indeterminate());
    }

    #[test]
    fn indeterminate_is_contagious() {
        let (mut arena, x, _) = setup();
        let und = arena.undefined();
        let sum = add(&mut arena, [x, und]);
        assert!(arena.get(sum).is_indeterminate());
        let prod = mul(&mut arena, [x, und]);
        assert!(arena.get(prod).is_indeterminate());
        let power = pow(&mut arena, und, x);
        assert!(arena.get(power).is_indeterminate());
        let zero = arena.integer(0);
        let annihilated = mul(&mut arena, [zero, und]);
        assert!(arena.get(annihilated).is_indeterminate());
    }

    #[test]
    fn pow_folds_numerals() {
        let (mut arena, x, _) = setup();
        let two = arena.integer(2);
        let neg_two = arena.integer(-2);
        let zero = arena.integer(0);
        let one = arena.integer(1);

        let four = arena.integer(4);
        assert_eq!(pow(&mut arena, two, two), four);
        let quarter = arena.rational(1, 4);
        assert_eq!(pow(&mut arena, two, neg_two), quarter);
        let w = pow(&mut arena, zero, neg_two);
        assert!(arena.get(w).is_indeterminate());

        assert_eq!(pow(&mut arena, x, zero), one);
        assert_eq!(pow(&mut arena, x, one), x);
    }

    #[test]
    fn div_unit_laws() {
        let (mut arena, x, y) = setup();
        let one = arena.integer(1);
        assert_eq!(div(&mut arena, x, one), x);
        assert_eq!(div(&mut arena, x, x), one);

        let q = div(&mut arena, x, y);
        assert!(matches!(arena.get(q), ExprNode::Div { .. }));
    }
}
