// src/autograd/grad_check.rs
use crate::compiler::compile;
use crate::context::EvaluationContext;
use crate::error::BackpropError;
use approx::relative_eq;
use backprop_expr::Expr;
use log::debug;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for symbol '{symbol}': Analytical grad {analytical:?} != Numerical grad {numerical:?}. Difference: {difference:?}")]
    GradientMismatch {
        symbol: String,
        analytical: f64,
        numerical: f64,
        difference: f64,
    },
    #[error("Expression could not be compiled for gradient check: {0}")]
    CompileError(BackpropError),
    #[error("Forward evaluation failed during gradient check: {0}")]
    ForwardPassError(BackpropError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(BackpropError),
    #[error("Symbol '{symbol}' has no final derivative after the backward pass.")]
    MissingAnalyticalGrad { symbol: String },
    #[error("Numerical gradient is NaN or infinite for symbol '{symbol}'. Details: f(x+eps): {value_plus:?}, f(x-eps): {value_minus:?}")]
    NumericalGradNaNOrInfinite {
        symbol: String,
        value_plus: f64,
        value_minus: f64,
    },
    #[error("Analytical gradient is NaN or infinite for symbol '{symbol}'. Value: {value:?}")]
    AnalyticalGradNaNOrInfinite { symbol: String, value: f64 },
}

/// Checks back-propagated derivatives against central finite differences.
///
/// For every symbol of `expr`, the derivative obtained from one backward pass over the
/// compiled graph is compared with `(f(s + epsilon) - f(s - epsilon)) / (2 * epsilon)`,
/// where each evaluation compiles a fresh graph with the perturbed binding. The two agree
/// when their absolute or relative difference is within `tolerance`.
pub fn check_grad(
    expr: &Expr,
    context: &EvaluationContext,
    epsilon: f64,
    tolerance: f64,
) -> Result<(), GradCheckError> {
    // --- 1. Analytical derivatives ---
    let root = compile(expr, context.clone()).map_err(GradCheckError::CompileError)?;
    root.value().map_err(GradCheckError::ForwardPassError)?;
    root.back_propagate()
        .map_err(GradCheckError::BackwardPassError)?;

    // --- 2. Compare symbol by symbol ---
    for symbol in expr.symbols() {
        let analytical = root
            .find_symbol(&symbol)
            .and_then(|node| node.derivative())
            .ok_or_else(|| GradCheckError::MissingAnalyticalGrad {
                symbol: symbol.clone(),
            })?;
        if !analytical.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                symbol,
                value: analytical,
            });
        }

        let original = context.get(&symbol).ok_or_else(|| {
            GradCheckError::ForwardPassError(BackpropError::UnboundSymbol {
                name: symbol.clone(),
            })
        })?;
        let value_plus = evaluate_with(expr, context, &symbol, original + epsilon)?;
        let value_minus = evaluate_with(expr, context, &symbol, original - epsilon)?;
        let numerical = (value_plus - value_minus) / (2.0 * epsilon);
        if !numerical.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                symbol,
                value_plus,
                value_minus,
            });
        }

        let difference = (analytical - numerical).abs();
        debug!(
            "grad check '{}': analytical {}, numerical {}, difference {}",
            symbol, analytical, numerical, difference
        );
        if !relative_eq!(
            analytical,
            numerical,
            epsilon = tolerance,
            max_relative = tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                symbol,
                analytical,
                numerical,
                difference,
            });
        }
    }
    Ok(())
}

/// Forward value of `expr` with `symbol` rebound to `value`.
fn evaluate_with(
    expr: &Expr,
    context: &EvaluationContext,
    symbol: &str,
    value: f64,
) -> Result<f64, GradCheckError> {
    let perturbed = context.clone().with(symbol, value);
    compile(expr, perturbed)
        .map_err(GradCheckError::CompileError)?
        .value()
        .map_err(GradCheckError::ForwardPassError)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> EvaluationContext {
        EvaluationContext::new()
            .with("x", 0.5)
            .with("y", -1.25)
            .with("z", 2.0)
    }

    #[test]
    fn test_check_grad_composite() {
        let expr = Expr::parse("sigma(x * y) / (z + exp(x - y)) + x * x * z").unwrap();
        check_grad(&expr, &context(), 1e-6, 1e-5).unwrap();
    }

    #[test]
    fn test_check_grad_reports_compile_errors() {
        let expr = Expr::parse("x ^ 2").unwrap();
        let err = check_grad(&expr, &context(), 1e-6, 1e-5).unwrap_err();
        assert!(matches!(
            err,
            GradCheckError::CompileError(BackpropError::UnsupportedExpression(_))
        ));
    }

    #[test]
    fn test_check_grad_reports_unbound_symbols() {
        let expr = Expr::parse("x * w").unwrap();
        let err = check_grad(&expr, &context(), 1e-6, 1e-5).unwrap_err();
        assert_eq!(
            err,
            GradCheckError::ForwardPassError(BackpropError::UnboundSymbol {
                name: "w".to_string()
            })
        );
    }

    #[test]
    fn test_check_grad_reports_non_finite_gradients() {
        let expr = Expr::parse("x / (y - y)").unwrap();
        let err = check_grad(&expr, &context(), 1e-6, 1e-5).unwrap_err();
        assert!(matches!(
            err,
            GradCheckError::AnalyticalGradNaNOrInfinite { .. }
        ));
    }
}
