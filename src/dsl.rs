use std::ops::Not;

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::{AndOp, OrOp};
use crate::variable::{Term, Variables};

/// Antecedent expression tree of a rule premise.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(Term),
    And(Vec<Expr>),
    Or(Vec<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn and(self, rhs: impl Into<Expr>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs.into());
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs.into()]),
        }
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs.into());
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs.into()]),
        }
    }

    /// Every term referenced by the expression, left to right
    pub fn propositions(&self) -> Vec<&Term> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<&'p Term>) {
            match expr {
                Expr::Is(term) => out.push(term),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// True if some `And`/`Or` node has no operands
    pub(crate) fn has_empty_node(&self) -> bool {
        match self {
            Expr::Is(_) => false,
            Expr::And(exprs) | Expr::Or(exprs) => exprs.is_empty() || exprs.iter().any(Expr::has_empty_node),
            Expr::Not(expr) => expr.has_empty_node(),
        }
    }

    /// Degree to which the expression holds for `inputs`. Inputs are clamped to their
    /// variable's universe before fuzzification; NaN and infinite inputs are rejected.
    pub fn eval(&self, vars: &Variables, inputs: &Inputs, and_op: AndOp, or_op: OrOp) -> Result<f64> {
        match self {
            Expr::Is(term) => {
                let var = vars.lookup(term.var)?;
                let value = inputs.get_key(term.var).ok_or_else(|| FuzzyError::MissingInput {
                    variable: var.name().to_owned(),
                })?;

                if !value.is_finite() {
                    return Err(FuzzyError::InvalidInput {
                        variable: var.name().to_owned(),
                        value,
                    });
                }

                let universe = var.universe();

                var.degree_at(term.index, value.clamp(universe.min(), universe.max()))
            },
            // Folding from each operator's identity element
            Expr::And(exprs) => exprs.iter().try_fold(1., |acc, expr| -> Result<f64> {
                Ok(and_op.apply(acc, expr.eval(vars, inputs, and_op, or_op)?))
            }),
            Expr::Or(exprs) => exprs.iter().try_fold(0., |acc, expr| -> Result<f64> {
                Ok(or_op.apply(acc, expr.eval(vars, inputs, and_op, or_op)?))
            }),
            Expr::Not(expr) => Ok(1. - expr.eval(vars, inputs, and_op, or_op)?),
        }
    }
}

impl From<Term> for Expr {
    fn from(term: Term) -> Self {
        Expr::Is(term)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl Term {
    pub fn is(self) -> Expr {
        Expr::Is(self)
    }

    pub fn and(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Is(self).and(rhs)
    }

    pub fn or(self, rhs: impl Into<Expr>) -> Expr {
        Expr::Is(self).or(rhs)
    }
}

impl Not for Term {
    type Output = Expr;

    fn not(self) -> Expr {
        !Expr::Is(self)
    }
}
