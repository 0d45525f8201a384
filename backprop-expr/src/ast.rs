// src/ast.rs

use crate::error::ParseError;
use crate::functions::{EXP, SIGMOID};
use num_traits::{One, Zero};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Binary operators of the expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    /// The textual operator (`+ - * / ^`).
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(BinaryOp::Add),
            '-' => Some(BinaryOp::Sub),
            '*' => Some(BinaryOp::Mul),
            '/' => Some(BinaryOp::Div),
            '^' => Some(BinaryOp::Pow),
            _ => None,
        }
    }

    /// Binding strength used by the parser and the printer. Negation sits at 3.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }

    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Pow)
    }
}

/// A parsed (or built) arithmetic expression.
///
/// The shape mirrors what the graph compiler consumes: literals, symbols, groupings,
/// binary operators, unary negation and named function calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal.
    Constant(f64),
    /// A free variable, bound later by an evaluation context.
    Symbol(String),
    /// An explicit grouping `( ... )` kept from the source text.
    Parenthesis(Box<Expr>),
    /// Unary minus.
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// A named function call such as `exp(x)` or `sigma(x)`.
    Function { name: String, args: Vec<Expr> },
}

impl Expr {
    /// Parses `text` into an expression tree.
    pub fn parse(text: &str) -> Result<Expr, ParseError> {
        crate::parser::parse(text)
    }

    pub fn constant(value: f64) -> Expr {
        Expr::Constant(value)
    }

    pub fn symbol(name: impl Into<String>) -> Expr {
        Expr::Symbol(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn function(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Function {
            name: name.into(),
            args,
        }
    }

    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::binary(BinaryOp::Pow, self, exponent)
    }

    pub fn exp(self) -> Expr {
        Expr::function(EXP, vec![self])
    }

    pub fn sigmoid(self) -> Expr {
        Expr::function(SIGMOID, vec![self])
    }

    /// Returns the literal value if this is a constant (looking through parentheses).
    pub fn as_constant(&self) -> Option<f64> {
        match self.strip_parens() {
            Expr::Constant(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the symbol name if this is a symbol (looking through parentheses).
    pub fn as_symbol(&self) -> Option<&str> {
        match self.strip_parens() {
            Expr::Symbol(name) => Some(name.as_str()),
            _ => None,
        }
    }

    /// Removes any number of enclosing parentheses.
    pub fn strip_parens(&self) -> &Expr {
        let mut current = self;
        while let Expr::Parenthesis(inner) = current {
            current = inner;
        }
        current
    }

    /// Number of nodes in the tree, parentheses included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            count += 1;
            match expr {
                Expr::Constant(_) | Expr::Symbol(_) => {}
                Expr::Parenthesis(inner) | Expr::Negate(inner) => stack.push(inner),
                Expr::Binary { lhs, rhs, .. } => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                Expr::Function { args, .. } => stack.extend(args.iter()),
            }
        }
        count
    }

    /// Drops the tree one node at a time.
    ///
    /// Plain `drop` recurses once per nesting level, and a flat sum `x + x + ... + x`
    /// nests one level per term.
    pub fn dismantle(self) {
        let mut pending = vec![self];
        while let Some(expr) = pending.pop() {
            match expr {
                Expr::Constant(_) | Expr::Symbol(_) => {}
                Expr::Parenthesis(inner) | Expr::Negate(inner) => pending.push(*inner),
                Expr::Binary { lhs, rhs, .. } => {
                    pending.push(*lhs);
                    pending.push(*rhs);
                }
                Expr::Function { args, .. } => pending.extend(args),
            }
        }
    }

    /// Collects the distinct symbol names in order of first appearance.
    pub fn symbols(&self) -> Vec<String> {
        let mut names = Vec::new();
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expr::Constant(_) => {}
                Expr::Symbol(name) => {
                    if !names.contains(name) {
                        names.push(name.clone());
                    }
                }
                Expr::Parenthesis(inner) | Expr::Negate(inner) => stack.push(inner),
                Expr::Binary { lhs, rhs, .. } => {
                    stack.push(rhs);
                    stack.push(lhs);
                }
                Expr::Function { args, .. } => stack.extend(args.iter().rev()),
            }
        }
        names
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Constant(value)
    }
}

// Arithmetic on expressions builds new nodes; nothing is evaluated or simplified here.

impl Add for Expr {
    type Output = Expr;
    fn add(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Add, self, rhs)
    }
}

impl Sub for Expr {
    type Output = Expr;
    fn sub(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Sub, self, rhs)
    }
}

impl Mul for Expr {
    type Output = Expr;
    fn mul(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Mul, self, rhs)
    }
}

impl Div for Expr {
    type Output = Expr;
    fn div(self, rhs: Expr) -> Expr {
        Expr::binary(BinaryOp::Div, self, rhs)
    }
}

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::Negate(Box::new(self))
    }
}

impl Zero for Expr {
    fn zero() -> Self {
        Expr::Constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.as_constant() == Some(0.0)
    }
}

impl One for Expr {
    fn one() -> Self {
        Expr::Constant(1.0)
    }

    fn is_one(&self) -> bool {
        self.as_constant() == Some(1.0)
    }
}

#[cfg(test)]
#[path = "ast_test.rs"]
mod tests;
