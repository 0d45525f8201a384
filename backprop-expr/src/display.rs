// src/display.rs
use crate::ast::{BinaryOp, Expr};
use std::fmt;

const NEGATE_POWER: u8 = 3;
const ATOM_POWER: u8 = 5;

fn binding_power(expr: &Expr) -> u8 {
    match expr {
        Expr::Constant(value) if value.is_sign_negative() => NEGATE_POWER,
        Expr::Constant(_) | Expr::Symbol(_) | Expr::Parenthesis(_) | Expr::Function { .. } => {
            ATOM_POWER
        }
        Expr::Negate(_) => NEGATE_POWER,
        Expr::Binary { op, .. } => op.precedence(),
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Expr, wrap: bool) -> fmt::Result {
    if wrap {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

// Prints with the minimal parentheses that make the output parse back to the same tree.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Constant(value) => write!(f, "{}", value),
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Parenthesis(inner) => write!(f, "({})", inner),
            Expr::Negate(inner) => {
                write!(f, "-")?;
                write_operand(f, inner, binding_power(inner) < BinaryOp::Pow.precedence())
            }
            Expr::Binary { op, lhs, rhs } => {
                let precedence = op.precedence();
                let lhs_power = binding_power(lhs);
                let rhs_power = binding_power(rhs);
                let wrap_lhs = lhs_power < precedence
                    || (lhs_power == precedence && op.is_right_associative());
                let wrap_rhs = rhs_power < precedence
                    || (rhs_power == precedence && !op.is_right_associative());
                write_operand(f, lhs, wrap_lhs)?;
                write!(f, " {} ", op.symbol())?;
                write_operand(f, rhs, wrap_rhs)
            }
            Expr::Function { name, args } => {
                write!(f, "{}(", name)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
