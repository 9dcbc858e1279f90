use serde::{Deserialize, Serialize};

use num::Float;

use crate::error::{FuzzyError, Result};
use crate::math::interp;

/// And operator method (t-norm) for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => ProductionLink::Min.apply(u, v),
            Self::Prod => ProductionLink::Prod.apply(u, v),
            Self::BoundedProd => ProductionLink::BoundedProd.apply(u, v),
            Self::DrasticProd => ProductionLink::DrasticProd.apply(u, v),
        }
    }
}

/// Or operator method (t-conorm) for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => ProductionLink::Max.apply(u, v),
            Self::ProbOr => ProductionLink::ProbOr.apply(u, v),
            Self::BoundedSum => ProductionLink::BoundedSum.apply(u, v),
            Self::DrasticSum => ProductionLink::DrasticSum.apply(u, v),
        }
    }
}

/// How a rule's firing strength shapes its consequent term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani correlation-min: truncate the term at the firing strength
    #[default]
    Clip,
    /// Larsen correlation-product: scale the term by the firing strength
    Scale,
}

impl ImplicationOp {
    pub fn apply<F: Float>(self, strength: F, degree: F) -> F {
        match self {
            Self::Clip => F::min(strength, degree),
            Self::Scale => strength * degree,
        }
    }

    pub fn call<F: Float>(self, strength: F, membership: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
        membership.into_iter().map(move |degree| self.apply(strength, degree))
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionLink {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl ProductionLink {
    pub fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn call<F: Float>(
        self,
        u: impl IntoIterator<Item = F>,
        v: impl IntoIterator<Item = F>,
    ) -> impl Iterator<Item = F> {
        u.into_iter().zip(v).map(move |(u, v)| self.apply(u, v))
    }
}

/// Method for defuzzificating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Discrete center of gravity over the universe samples
    #[default]
    Centroid,
    /// Bisector of area
    Boa,
    /// Mean of the values for which the membership function is maximum
    Mom,
    /// Largest value for which the membership function is maximum
    Lom,
    /// Smallest value for which the membership function is maximum
    Som,
}

impl DefuzzificationOp {
    /// Fails with [`FuzzyError::DegenerateAggregate`] when `membership` is zero everywhere,
    /// and with [`FuzzyError::LengthMismatch`] unless both slices have the same length.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Result<F> {
        check_lengths(universe, membership)?;

        match self {
            Self::Centroid => centroid(universe, membership),
            Self::Boa => bisector(universe, membership),
            Self::Mom => {
                let maxima = maxima(universe, membership)?;
                let sum = maxima.iter().fold(F::zero(), |acc, x| acc + *x);
                let len = F::from(maxima.len()).ok_or(FuzzyError::DegenerateAggregate)?;

                Ok(sum / len)
            },
            Self::Lom => maxima(universe, membership)?
                .into_iter()
                .reduce(F::max)
                .ok_or(FuzzyError::DegenerateAggregate),
            Self::Som => maxima(universe, membership)?
                .into_iter()
                .reduce(F::min)
                .ok_or(FuzzyError::DegenerateAggregate),
        }
    }
}

/// `sum(x * mu(x)) / sum(mu(x))` over the sample points. `membership[i]` is the degree at
/// `universe[i]`.
pub fn centroid<F: Float>(universe: &[F], membership: &[F]) -> Result<F> {
    check_lengths(universe, membership)?;

    let (num, den) = universe
        .iter()
        .zip(membership)
        .fold((F::zero(), F::zero()), |(num, den), (x, mu)| (num + *x * *mu, den + *mu));

    if den <= F::zero() {
        return Err(FuzzyError::DegenerateAggregate);
    }

    Ok(num / den)
}

fn check_lengths<F>(universe: &[F], membership: &[F]) -> Result<()> {
    if universe.len() != membership.len() {
        return Err(FuzzyError::LengthMismatch {
            universe: universe.len(),
            membership: membership.len(),
        });
    }

    Ok(())
}

/// Point splitting the trapezoidal area under `membership` into two equal halves.
fn bisector<F: Float>(universe: &[F], membership: &[F]) -> Result<F> {
    let two = F::one() + F::one();
    let areas: Vec<F> = universe
        .windows(2)
        .zip(membership.windows(2))
        .map(|(x, mu)| (mu[0] + mu[1]) * (x[1] - x[0]) / two)
        .collect();
    let total_area = areas.iter().fold(F::zero(), |acc, area| acc + *area);

    if total_area <= F::zero() {
        return Err(FuzzyError::DegenerateAggregate);
    }

    let target = total_area / two;
    let mut cum_area = F::zero();

    for (i, area) in areas.iter().copied().enumerate() {
        if cum_area + area >= target {
            let coords = [(cum_area, universe[i]), (cum_area + area, universe[i + 1])];

            return interp(Some(target), coords)
                .into_iter()
                .next()
                .ok_or(FuzzyError::DegenerateAggregate);
        }

        cum_area = cum_area + area;
    }

    universe.last().copied().ok_or(FuzzyError::DegenerateAggregate)
}

fn maxima<F: Float>(universe: &[F], membership: &[F]) -> Result<Vec<F>> {
    let maximum = membership.iter().copied().fold(F::zero(), F::max);

    if maximum <= F::zero() {
        return Err(FuzzyError::DegenerateAggregate);
    }

    Ok(universe
        .iter()
        .zip(membership)
        .filter_map(|(x, mu)| if *mu == maximum { Some(*x) } else { None })
        .collect())
}
