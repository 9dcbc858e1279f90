use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::FuzzyError;
use crate::inputs::Inputs;
use crate::ops::*;
use crate::outputs::{AggregatedCurve, OutputValue, Outputs};
use crate::rules::Rules;
use crate::variable::{Role, Variables};

/// Mamdani inference: fire rules, shape each consequent term by its rule's strength,
/// aggregate per output variable, then defuzzificate.
///
/// The default is min AND, max OR, clipping, max aggregation and centroid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MamdaniInference {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub imp_op: ImplicationOp,
    pub prod_link: ProductionLink,
    pub defuzz_op: DefuzzificationOp,
}

impl MamdaniInference {
    pub fn new(
        and_op: AndOp,
        or_op: OrOp,
        imp_op: ImplicationOp,
        prod_link: ProductionLink,
        defuzz_op: DefuzzificationOp,
    ) -> Self {
        Self {
            and_op,
            or_op,
            imp_op,
            prod_link,
            defuzz_op,
        }
    }

    /// Never fails as a whole: every consequent variable in `vars` gets either a crisp value
    /// or the error that prevented one.
    pub fn eval(&self, vars: &Variables, rules: &Rules, inputs: &Inputs) -> Outputs {
        if tracing::enabled!(tracing::Level::TRACE) {
            for (var, lv) in vars.iter() {
                if let Some(x) = inputs.get(var) {
                    trace!(variable = lv.name(), value = x, degrees = ?lv.fuzzify(x), "fuzzified input");
                }
            }
        }

        // Rule firing strengths, in rule order
        let strengths: Vec<_> = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                let strength = rule.firing_strength(vars, inputs, self.and_op, self.or_op);

                match &strength {
                    Ok(s) => debug!(rule = i, strength = s, skipped = *s == 0., "rule fired"),
                    Err(err) => debug!(rule = i, %err, "rule could not be evaluated"),
                }

                strength
            })
            .collect();

        let mut values = IndexMap::new();

        for (var, lv) in vars.iter().filter(|(_, lv)| lv.role() == Role::Consequent) {
            let points: Vec<f64> = lv.universe().points().collect();
            let mut aggregated: Option<Vec<f64>> = None;
            let mut failure = None;

            for (rule, strength) in rules.iter().zip(&strengths) {
                let consequence = rule.consequence();

                if consequence.variable() != var {
                    continue;
                }

                let strength = match strength {
                    Ok(strength) => *strength,
                    Err(err) => {
                        failure.get_or_insert_with(|| err.clone());
                        continue;
                    },
                };

                // Zero-strength rules are skipped
                if strength <= 0. {
                    continue;
                }

                let term_curve = points.iter().map(|x| lv.degree_at(consequence.index, *x));
                let term_curve = match term_curve.collect::<Result<Vec<_>, _>>() {
                    Ok(curve) => curve,
                    Err(err) => {
                        failure.get_or_insert(err);
                        continue;
                    },
                };
                let shaped = self.imp_op.call(strength, term_curve);

                aggregated = Some(match aggregated {
                    None => shaped.collect(),
                    Some(agg) => self.prod_link.call(agg, shaped).collect(),
                });
            }

            let memberships = aggregated.unwrap_or_else(|| vec![0.; points.len()]);
            let crisp = match failure {
                Some(err) => Err(err),
                None => self
                    .defuzz_op
                    .call(&points, &memberships)
                    .map_err(|err| match err {
                        FuzzyError::DegenerateAggregate => FuzzyError::NoApplicableRule {
                            variable: lv.name().to_owned(),
                        },
                        err => err,
                    }),
            };

            match &crisp {
                Ok(value) => debug!(variable = lv.name(), value, "defuzzificated output"),
                Err(err) => debug!(variable = lv.name(), %err, "output unresolved"),
            }

            values.insert(
                var.0,
                OutputValue {
                    name: lv.name().to_owned(),
                    crisp,
                    aggregated: AggregatedCurve::new(points, memberships),
                },
            );
        }

        let firing_strengths = strengths.into_iter().map(Result::ok).collect();

        Outputs::new(values, firing_strengths)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::membership::Triangle;
    use crate::universe::Universe;
    use crate::variable::{Term, Variable};

    struct Fixture {
        vars: Variables,
        soil: Variable,
        temp: Variable,
        water: Variable,
        dry: Term,
        wet: Term,
        hot: Term,
        low: Term,
        high: Term,
    }

    fn fixture() -> Fixture {
        let mut vars = Variables::new();
        let soil = vars
            .add("Soil Moisture", Role::Antecedent, Universe::new(0., 100., 1.).unwrap())
            .unwrap();
        let temp = vars
            .add("Temperature", Role::Antecedent, Universe::new(0., 50., 1.).unwrap())
            .unwrap();
        let water = vars
            .add("Water Sprinkling", Role::Consequent, Universe::new(0., 100., 1.).unwrap())
            .unwrap();
        let dry = vars.add_term(soil, "dry", Triangle::new(0., 0., 50.).unwrap()).unwrap();
        let wet = vars.add_term(soil, "wet", Triangle::new(50., 100., 100.).unwrap()).unwrap();
        let hot = vars.add_term(temp, "hot", Triangle::new(30., 50., 50.).unwrap()).unwrap();
        let low = vars.add_term(water, "low", Triangle::new(0., 0., 50.).unwrap()).unwrap();
        let high = vars.add_term(water, "high", Triangle::new(50., 100., 100.).unwrap()).unwrap();

        Fixture {
            vars,
            soil,
            temp,
            water,
            dry,
            wet,
            hot,
            low,
            high,
        }
    }

    #[test]
    fn test_clip_and_aggregate() {
        let f = fixture();
        let mut rules = Rules::new();

        rules.add(f.dry.and(f.hot), f.high);
        rules.add(f.wet, f.low);

        let inputs = Inputs::new().with(f.soil, 10.).with(f.temp, 40.);
        let outputs = MamdaniInference::default().eval(&f.vars, &rules, &inputs);
        let curve = outputs.aggregated(f.water).unwrap();

        assert_eq!(outputs.firing_strengths(), &[Some(0.5), Some(0.)]);
        // high clipped at 0.5, low absent
        assert_eq!(curve.memberships()[0], 0.);
        assert_relative_eq!(curve.memberships()[60], 0.2, epsilon = 1e-12);
        assert_eq!(curve.memberships()[75], 0.5);
        assert_eq!(curve.memberships()[100], 0.5);
        assert!(curve.memberships().iter().all(|mu| *mu <= 0.5));

        let value = outputs.get(f.water).unwrap();

        assert!(value > 65. && value <= 100., "{value}");
    }

    #[test]
    fn test_no_applicable_rule() {
        let f = fixture();
        let mut rules = Rules::new();

        rules.add(f.dry.and(f.hot), f.high);

        let inputs = Inputs::new().with(f.soil, 80.).with(f.temp, 10.);
        let outputs = MamdaniInference::default().eval(&f.vars, &rules, &inputs);

        assert_eq!(
            outputs.get(f.water),
            Err(FuzzyError::NoApplicableRule {
                variable: "Water Sprinkling".into()
            })
        );
        assert!(outputs.aggregated(f.water).unwrap().is_zero());
        assert!(!outputs.is_complete());
    }

    #[test]
    fn test_missing_input_marks_output() {
        let f = fixture();
        let mut rules = Rules::new();

        rules.add(f.dry.and(f.hot), f.high);
        rules.add(f.wet, f.low);

        let inputs = Inputs::new().with(f.soil, 90.);
        let outputs = MamdaniInference::default().eval(&f.vars, &rules, &inputs);

        assert_eq!(outputs.firing_strengths()[0], None);
        assert_eq!(
            outputs.get_by_name("Water Sprinkling"),
            Err(FuzzyError::MissingInput {
                variable: "Temperature".into()
            })
        );
    }

    #[test]
    fn test_scale_and_prob_or() {
        let f = fixture();
        let mut rules = Rules::new();

        rules.add(f.wet, f.low);
        rules.add(f.dry, f.low);

        let model = MamdaniInference::new(
            AndOp::Prod,
            OrOp::ProbOr,
            ImplicationOp::Scale,
            ProductionLink::ProbOr,
            DefuzzificationOp::Centroid,
        );
        // wet 0.2 and dry 0 at soil 60
        let inputs = Inputs::new().with(f.soil, 60.).with(f.temp, 20.);
        let outputs = model.eval(&f.vars, &rules, &inputs);
        let curve = outputs.aggregated(f.water).unwrap();

        assert_relative_eq!(curve.memberships()[0], 0.2, epsilon = 1e-12);
        assert_relative_eq!(curve.memberships()[25], 0.1, epsilon = 1e-12);

        let value = outputs.get(f.water).unwrap();

        // Scaling keeps the shape of "low", so the centroid is the triangle's own
        assert_relative_eq!(value, 1. / 3. * 50., epsilon = 0.5);
    }

    #[test]
    fn test_unknown_output_variable() {
        let f = fixture();
        let outputs = MamdaniInference::default().eval(&f.vars, &Rules::new(), &Inputs::new());

        assert!(matches!(outputs.get(f.soil), Err(FuzzyError::UnknownVariable { .. })));
        assert!(matches!(outputs.get(f.water), Err(FuzzyError::NoApplicableRule { .. })));
    }
}
