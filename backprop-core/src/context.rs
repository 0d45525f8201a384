// src/context.rs
use std::collections::HashMap;

/// Symbol bindings used by `Symbol` nodes during forward evaluation.
///
/// The context is handed to the compiler once and shared (through an `Rc`) by every
/// symbol node of the resulting graph. The graph never mutates it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvaluationContext {
    values: HashMap<String, f64>,
}

impl EvaluationContext {
    /// Creates an empty context. Symbolic graphs are compiled against one.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style binding, e.g. `EvaluationContext::new().with("x", 5.0)`.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Binds (or rebinds) `name`.
    pub fn set(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Bound names, sorted.
    pub fn symbol_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.values.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for EvaluationContext {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        EvaluationContext {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
