//! # Shared variable example
//!
//! Differentiates `x * y + y * z` twice: numerically at x = 5, y = 7, z = 13, and
//! symbolically. `y` is used by two products, so its node waits for both contributions
//! before its derivative (`x + z`, i.e. 18) is final.
//!
//! Run with `RUST_LOG=trace cargo run --example shared_variable` to watch the
//! accumulation order.

use backprop_core::{compile_str, compile_symbolic_str, BackpropError, EvaluationContext};

fn main() -> Result<(), BackpropError> {
    env_logger::init();

    let text = "x * y + y * z";
    let context = EvaluationContext::new()
        .with("x", 5.0)
        .with("y", 7.0)
        .with("z", 13.0);

    // --- Numeric pass ---
    let root = compile_str(text, context)?;
    root.back_propagate()?;
    println!("f = {} = {}", root, root.value()?);
    for name in ["x", "y", "z"] {
        if let Some(node) = root.find_symbol(name) {
            println!(
                "  df/d{} = {:?} ({} consumer(s))",
                name,
                node.derivative(),
                node.consumer_count()
            );
        }
    }

    // --- Symbolic pass ---
    let symbolic = compile_symbolic_str(text)?;
    symbolic.back_propagate()?;
    for name in ["x", "y", "z"] {
        if let Some(derivative) = symbolic.find_symbol(name).and_then(|n| n.derivative()) {
            println!("  df/d{} = {}", name, derivative);
        }
    }
    Ok(())
}
