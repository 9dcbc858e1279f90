use crate::dsl::Expr;
use crate::error::Result;
use crate::inputs::Inputs;
use crate::ops::{AndOp, OrOp};
use crate::variable::{Term, Variables};

/// Ordered rule base. Order doesn't change results but is kept for diagnostics.
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: impl Into<Expr>, consequence: Term) {
        self.0.push(Rule {
            premise: premise.into(),
            consequence,
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'r> IntoIterator for &'r Rules {
    type Item = &'r Rule;
    type IntoIter = std::slice::Iter<'r, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// IF `premise` THEN `consequence`
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    premise: Expr,
    consequence: Term,
}

impl Rule {
    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequence(&self) -> Term {
        self.consequence
    }

    /// Degree in `[0, 1]` to which the premise holds for `inputs`
    pub fn firing_strength(&self, vars: &Variables, inputs: &Inputs, and_op: AndOp, or_op: OrOp) -> Result<f64> {
        self.premise.eval(vars, inputs, and_op, or_op)
    }
}
