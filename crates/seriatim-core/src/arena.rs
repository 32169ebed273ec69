//! Arena allocator for expression storage.
//!
//! All expressions live in one contiguous arena. Interning guarantees each
//! structurally unique node is stored once, so handle equality is structural
//! equality and sub-expressions are shared for free.

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::expr::{functions, ExprId, ExprNode, FunctionId, Sign, SymbolId};

/// The main arena for storing expressions.
#[derive(Debug)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprId>,
    /// Symbol table: maps symbol names to their IDs.
    symbols: HashMap<String, SymbolId>,
    /// Reverse symbol table for display.
    symbol_names: Vec<String>,
    /// Function table: maps function names to their IDs.
    functions: HashMap<String, FunctionId>,
    /// Reverse function table for display.
    function_names: Vec<String>,
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprArena {
    /// Creates a new arena with the built-in function table seeded.
    #[must_use]
    pub fn new() -> Self {
        let mut arena = Self {
            nodes: Vec::new(),
            intern_map: HashMap::new(),
            symbols: HashMap::new(),
            symbol_names: Vec::new(),
            functions: HashMap::new(),
            function_names: Vec::new(),
        };
        for name in functions::NAMES {
            arena.intern_function_name(name);
        }
        arena
    }

    /// Interns an expression node, returning its handle.
    ///
    /// If an identical node already exists, the existing handle is returned.
    pub fn intern(&mut self, node: ExprNode) -> ExprId {
        if let Some(&id) = self.intern_map.get(&node) {
            return id;
        }

        let index = self.nodes.len();
        assert!(index < u32::MAX as usize, "Arena capacity exceeded");

        let id = ExprId::new(index as u32);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, id);
        id
    }

    /// Gets the node behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle did not come from this arena.
    #[must_use]
    pub fn get(&self, id: ExprId) -> &ExprNode {
        &self.nodes[id.index() as usize]
    }

    /// Returns the number of interned nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Name tables ===

    /// Interns a symbol name, returning its unique ID.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        if let Some(&id) = self.symbols.get(name) {
            return id;
        }
        let id = self.symbol_names.len() as SymbolId;
        self.symbols.insert(name.to_string(), id);
        self.symbol_names.push(name.to_string());
        id
    }

    /// Gets the name of a symbol by its ID.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbol_names.get(id as usize).map(String::as_str)
    }

    /// Interns a function name, returning its unique ID.
    ///
    /// The built-ins of [`functions`] are pre-seeded, so interning `"sin"`
    /// always yields [`functions::SIN`].
    pub fn intern_function_name(&mut self, name: &str) -> FunctionId {
        if let Some(&id) = self.functions.get(name) {
            return id;
        }
        let id = self.function_names.len() as FunctionId;
        self.functions.insert(name.to_string(), id);
        self.function_names.push(name.to_string());
        id
    }

    /// Gets the name of a function by its ID.
    #[must_use]
    pub fn function_name(&self, id: FunctionId) -> Option<&str> {
        self.function_names.get(id as usize).map(String::as_str)
    }

    // === Constructors ===
    //
    // These intern the node as given, apart from arity collapses that keep
    // the n-ary invariants (a sum or product of one operand is that
    // operand). Arithmetic normalization lives a layer up.

    /// Creates an integer expression.
    pub fn integer(&mut self, value: i64) -> ExprId {
        self.intern(ExprNode::Integer(value))
    }

    /// Creates a rational expression in lowest terms.
    ///
    /// The sign is carried by the numerator and a denominator of one
    /// collapses to an integer.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero; a rational with zero denominator is
    /// [`ExprNode::Undefined`], which evaluation produces deliberately.
    pub fn rational(&mut self, num: i64, den: i64) -> ExprId {
        assert!(den != 0, "rational with zero denominator");
        let (mut num, mut den) = if den < 0 { (-num, -den) } else { (num, den) };
        let g = gcd(num.unsigned_abs(), den.unsigned_abs());
        if g > 1 {
            num /= g as i64;
            den /= g as i64;
        }
        if den == 1 {
            self.integer(num)
        } else {
            self.intern(ExprNode::Rational(num, den as u64))
        }
    }

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprId {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates a directed infinity.
    pub fn infinity(&mut self, sign: Sign) -> ExprId {
        self.intern(ExprNode::Infinity(sign))
    }

    /// Creates the indeterminate numeral.
    pub fn undefined(&mut self) -> ExprId {
        self.intern(ExprNode::Undefined)
    }

    /// Creates an addition expression.
    pub fn add(&mut self, args: impl Into<SmallVec<[ExprId; 4]>>) -> ExprId {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Add(args))
    }

    /// Creates a multiplication expression.
    pub fn mul(&mut self, args: impl Into<SmallVec<[ExprId; 4]>>) -> ExprId {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Mul(args))
    }

    /// Creates a power expression.
    pub fn pow(&mut self, base: ExprId, exp: ExprId) -> ExprId {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Creates a negation expression.
    pub fn neg(&mut self, arg: ExprId) -> ExprId {
        self.intern(ExprNode::Neg(arg))
    }

    /// Creates a division expression.
    pub fn div(&mut self, num: ExprId, den: ExprId) -> ExprId {
        self.intern(ExprNode::Div { num, den })
    }

    /// Creates a function application from a function ID.
    pub fn function(&mut self, id: FunctionId, args: impl Into<SmallVec<[ExprId; 2]>>) -> ExprId {
        self.intern(ExprNode::Function {
            id,
            args: args.into(),
        })
    }

    /// Creates a function application by name, interning the name as needed.
    pub fn func(&mut self, name: &str, args: impl Into<SmallVec<[ExprId; 2]>>) -> ExprId {
        let id = self.intern_function_name(name);
        self.function(id, args)
    }

    /// Creates an unresolved-derivative marker.
    pub fn derivative_marker(&mut self, expr: ExprId, var: ExprId, order: u32) -> ExprId {
        self.intern(ExprNode::Derivative { expr, var, order })
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
