use indexmap::IndexMap;

use crate::error::{FuzzyError, Result};
use crate::math::interp;
use crate::variable::{Variable, VariableKey};

/// Aggregated membership of one output variable, sampled over its universe
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedCurve {
    points: Vec<f64>,
    memberships: Vec<f64>,
}

impl AggregatedCurve {
    pub(crate) fn new(points: Vec<f64>, memberships: Vec<f64>) -> Self {
        debug_assert_eq!(points.len(), memberships.len());

        Self { points, memberships }
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn memberships(&self) -> &[f64] {
        &self.memberships
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.points.iter().copied().zip(self.memberships.iter().copied())
    }

    /// Membership at an arbitrary `x`, linearly interpolated between samples
    pub fn degree_at(&self, x: f64) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(lo), Some(hi)) if *lo <= x && x <= *hi => interp(Some(x), self.iter()).first().copied().unwrap_or(0.),
            _ => 0.,
        }
    }

    /// True if no rule contributed anything
    pub fn is_zero(&self) -> bool {
        self.memberships.iter().all(|mu| *mu == 0.)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct OutputValue {
    pub(crate) name: String,
    pub(crate) crisp: Result<f64>,
    pub(crate) aggregated: AggregatedCurve,
}

/// Result of one inference call: a crisp value or an error per output variable,
/// the aggregated curves, and every rule's firing strength in rule order.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    values: IndexMap<VariableKey, OutputValue>,
    firing_strengths: Vec<Option<f64>>,
}

impl Outputs {
    pub(crate) fn new(values: IndexMap<VariableKey, OutputValue>, firing_strengths: Vec<Option<f64>>) -> Self {
        Self {
            values,
            firing_strengths,
        }
    }

    /// Crisp value inferred for `var`, or the reason it couldn't be
    pub fn get(&self, var: Variable) -> Result<f64> {
        match self.values.get(&var.0) {
            Some(value) => value.crisp.clone(),
            None => Err(FuzzyError::UnknownVariable {
                name: format!("{:?}", var.0),
            }),
        }
    }

    pub fn get_by_name(&self, name: &str) -> Result<f64> {
        self.values
            .values()
            .find(|value| value.name == name)
            .map(|value| value.crisp.clone())
            .unwrap_or_else(|| Err(FuzzyError::UnknownVariable { name: name.to_owned() }))
    }

    pub fn aggregated(&self, var: Variable) -> Option<&AggregatedCurve> {
        self.values.get(&var.0).map(|value| &value.aggregated)
    }

    /// Output variables in declaration order, with their result
    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str, &Result<f64>)> {
        self.values
            .iter()
            .map(|(key, value)| (Variable(*key), value.name.as_str(), &value.crisp))
    }

    /// `None` for rules whose premise couldn't be evaluated
    pub fn firing_strengths(&self) -> &[Option<f64>] {
        &self.firing_strengths
    }

    /// True if every output variable resolved to a crisp value
    pub fn is_complete(&self) -> bool {
        self.values.values().all(|value| value.crisp.is_ok())
    }
}

#[test]
fn test_degree_at_interpolates() {
    let curve = AggregatedCurve::new(vec![0., 1., 2., 3.], vec![0., 0.5, 0.5, 0.]);

    assert_eq!(curve.degree_at(0.5), 0.25);
    assert_eq!(curve.degree_at(1.5), 0.5);
    assert_eq!(curve.degree_at(3.), 0.);
    assert_eq!(curve.degree_at(-1.), 0.);
    assert_eq!(curve.degree_at(7.), 0.);
    assert!(!curve.is_zero());
    assert!(AggregatedCurve::new(vec![0., 1.], vec![0., 0.]).is_zero());
}
