//! Expression node types and handles.
//!
//! This module defines the node enum stored in the arena together with the
//! lightweight handle used to reference interned nodes.

use std::fmt;

use smallvec::SmallVec;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// Unique identifier for a function.
pub type FunctionId = u32;

/// A handle to an interned expression.
///
/// Handles are 32-bit indices into the arena. Because the arena hash-conses
/// every node, two handles are equal if and only if the expressions they
/// denote are structurally equal, which makes handle comparison the O(1)
/// structural-equality predicate used throughout the kernel.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExprId(u32);

impl ExprId {
    /// Creates a handle from a raw arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

/// Sign of a symbolic infinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Positive infinity.
    Positive,
    /// Negative infinity.
    Negative,
}

/// An expression node stored in the arena.
///
/// Atoms carry their value inline; compound nodes reference their operands
/// through [`ExprId`] handles, with `SmallVec` inline storage for the common
/// small arities.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// A 64-bit integer literal.
    ///
    /// The numeric kernel is 64-bit throughout; quantities that do not fit
    /// (factorials past 20!) are outside its range.
    Integer(i64),

    /// A rational number (numerator, denominator).
    ///
    /// Invariant: denominator > 0, gcd(num, den) == 1, denominator != 1.
    Rational(i64, u64),

    /// A symbolic variable.
    Symbol(SymbolId),

    /// A directed symbolic infinity.
    ///
    /// Only meaningful as an expansion point, where it is rejected, or as
    /// the value of a limit; it never appears inside a computed series.
    Infinity(Sign),

    /// The indeterminate numeral produced by evaluation of 0/0 and friends.
    ///
    /// Contagious: any node built over it folds back to `Undefined`.
    Undefined,

    // === Compound Expressions ===
    /// Sum of expressions: a + b + c + ...
    Add(SmallVec<[ExprId; 4]>),

    /// Product of expressions: a * b * c * ...
    Mul(SmallVec<[ExprId; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprId,
        /// The exponent.
        exp: ExprId,
    },

    /// Negation: -expr.
    Neg(ExprId),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: ExprId,
        /// The denominator.
        den: ExprId,
    },

    /// A function application: f(arg1, arg2, ...).
    Function {
        /// The function identifier.
        id: FunctionId,
        /// The arguments.
        args: SmallVec<[ExprId; 2]>,
    },

    /// An unresolved symbolic derivative, left in place when no closed-form
    /// rule applies: d^order/d(var)^order expr.
    ///
    /// Expressions under this tag are legitimate residuals of an expansion;
    /// containment checks treat them as opaque.
    Derivative {
        /// The expression being derived.
        expr: ExprId,
        /// The derivation variable.
        var: ExprId,
        /// The derivation order (>= 1).
        order: u32,
    },
}

impl ExprNode {
    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_)
                | ExprNode::Rational(_, _)
                | ExprNode::Symbol(_)
                | ExprNode::Infinity(_)
                | ExprNode::Undefined
        )
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Integer(_) | ExprNode::Rational(_, _))
    }

    /// Returns true if this is the integer zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, ExprNode::Integer(0))
    }

    /// Returns true if this is the integer one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, ExprNode::Integer(1))
    }

    /// Returns true if this is the indeterminate numeral.
    #[must_use]
    pub fn is_indeterminate(&self) -> bool {
        matches!(self, ExprNode::Undefined)
    }

    /// Returns true if this is a directed infinity.
    #[must_use]
    pub fn is_infinite(&self) -> bool {
        matches!(self, ExprNode::Infinity(_))
    }

    /// Returns the immediate children of this node, in operand order.
    ///
    /// Atoms have none. The `order` of a [`ExprNode::Derivative`] is not a
    /// child; only its expression and variable are.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprId; 4]> {
        match self {
            ExprNode::Integer(_)
            | ExprNode::Rational(_, _)
            | ExprNode::Symbol(_)
            | ExprNode::Infinity(_)
            | ExprNode::Undefined => SmallVec::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Neg(arg) => smallvec::smallvec![*arg],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
            ExprNode::Derivative { expr, var, .. } => smallvec::smallvec![*expr, *var],
        }
    }
}

/// Identifiers of the built-in functions.
///
/// The arena pre-seeds its function table with these, so the constants stay
/// in sync with the interned names.
pub mod functions {
    use super::FunctionId;

    /// Sine function.
    pub const SIN: FunctionId = 0;
    /// Cosine function.
    pub const COS: FunctionId = 1;
    /// Tangent function.
    pub const TAN: FunctionId = 2;
    /// Natural exponential.
    pub const EXP: FunctionId = 3;
    /// Natural logarithm.
    pub const LN: FunctionId = 4;
    /// Logarithm base 10.
    pub const LOG10: FunctionId = 5;
    /// Square root.
    pub const SQRT: FunctionId = 6;
    /// Absolute value.
    pub const ABS: FunctionId = 7;

    /// Names of the built-ins, indexed by identifier.
    pub const NAMES: [&str; 8] = ["sin", "cos", "tan", "exp", "ln", "log10", "sqrt", "abs"];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atoms_have_no_children() {
        assert!(ExprNode::Integer(42).is_atom());
        assert!(ExprNode::Undefined.is_atom());
        assert!(ExprNode::Infinity(Sign::Negative).is_atom());
        assert!(ExprNode::Integer(42).children().is_empty());
        assert!(!ExprNode::Neg(ExprId::new(0)).is_atom());
    }

    #[test]
    fn derivative_children_exclude_order() {
        let node = ExprNode::Derivative {
            expr: ExprId::new(3),
            var: ExprId::new(1),
            order: 2,
        };
        assert_eq!(node.children().to_vec(), vec![ExprId::new(3), ExprId::new(1)]);
    }

    #[test]
    fn handle_is_word_sized() {
        assert_eq!(std::mem::size_of::<ExprId>(), 4);
    }
}
