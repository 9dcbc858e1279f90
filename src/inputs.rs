use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp value per input variable for one inference call
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: Variable, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn with(mut self, var: Variable, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn get(&self, var: Variable) -> Option<f64> {
        self.get_key(var.0)
    }

    pub(crate) fn get_key(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
