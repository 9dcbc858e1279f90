use tracing::info;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::variable::{LinguisticVariable, Role, Term, Variable, Variables};

/// An immutable, validated rule base together with its inference method.
///
/// There is no way to change a system once built, so it can be shared between threads
/// and evaluated concurrently with independent [`Inputs`].
#[derive(Clone, Debug)]
pub struct FuzzySystem {
    variables: Variables,
    rules: Rules,
    model: MamdaniInference,
}

impl FuzzySystem {
    pub fn new(variables: Variables, rules: Rules, model: MamdaniInference) -> Result<Self> {
        for rule in &rules {
            check_term(&variables, rule.consequence(), Role::Consequent)?;
            check_premise(&variables, rule.premise())?;
        }

        info!(
            variables = variables.len(),
            rules = rules.len(),
            "built fuzzy system"
        );

        Ok(Self {
            variables,
            rules,
            model,
        })
    }

    pub fn infer(&self, inputs: &Inputs) -> Outputs {
        self.model.eval(&self.variables, &self.rules, inputs)
    }

    /// Builds [`Inputs`] from variable names, rejecting NaN and infinite values
    pub fn inputs<'a>(&self, values: impl IntoIterator<Item = (&'a str, f64)>) -> Result<Inputs> {
        let mut inputs = Inputs::new();

        for (name, value) in values {
            let var = self.variables.by_name(name)?;

            check_role(self.lookup(var)?, Role::Antecedent)?;

            if !value.is_finite() {
                return Err(FuzzyError::InvalidInput {
                    variable: name.to_owned(),
                    value,
                });
            }

            inputs.add(var, value);
        }

        Ok(inputs)
    }

    pub fn variable(&self, name: &str) -> Result<Variable> {
        self.variables.by_name(name)
    }

    pub fn term(&self, variable: &str, term: &str) -> Result<Term> {
        self.variables.term(self.variable(variable)?, term)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn model(&self) -> &MamdaniInference {
        &self.model
    }

    fn lookup(&self, var: Variable) -> Result<&LinguisticVariable> {
        self.variables.lookup(var.0)
    }
}

fn check_premise(vars: &Variables, premise: &Expr) -> Result<()> {
    if premise.has_empty_node() {
        return Err(FuzzyError::Config("rule premise has an empty and/or".into()));
    }

    for term in premise.propositions() {
        check_term(vars, *term, Role::Antecedent)?;
    }

    Ok(())
}

fn check_term(vars: &Variables, term: Term, role: Role) -> Result<()> {
    let var = vars.lookup(term.var)?;

    check_role(var, role)?;

    if var.term_name(term.index).is_none() {
        return Err(FuzzyError::UnknownTerm {
            variable: var.name().to_owned(),
            term: format!("#{}", term.index),
        });
    }

    Ok(())
}

fn check_role(var: &LinguisticVariable, expected: Role) -> Result<()> {
    if var.role() != expected {
        return Err(FuzzyError::RoleMismatch {
            variable: var.name().to_owned(),
            expected: expected.as_str(),
            actual: var.role().as_str(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangle;
    use crate::universe::Universe;

    fn vars() -> (Variables, Term, Term) {
        let mut vars = Variables::new();
        let soil = vars
            .add("Soil Moisture", Role::Antecedent, Universe::new(0., 100., 1.).unwrap())
            .unwrap();
        let water = vars
            .add("Water Sprinkling", Role::Consequent, Universe::new(0., 100., 1.).unwrap())
            .unwrap();
        let wet = vars.add_term(soil, "wet", Triangle::new(50., 100., 100.).unwrap()).unwrap();
        let low = vars.add_term(water, "low", Triangle::new(0., 0., 50.).unwrap()).unwrap();

        (vars, wet, low)
    }

    #[test]
    fn test_rejects_swapped_roles() {
        let (vars, wet, low) = vars();
        let mut rules = Rules::new();

        rules.add(low, wet);

        assert_eq!(
            FuzzySystem::new(vars, rules, MamdaniInference::default()).unwrap_err(),
            FuzzyError::RoleMismatch {
                variable: "Soil Moisture".into(),
                expected: "consequent",
                actual: "antecedent",
            }
        );
    }

    #[test]
    fn test_rejects_empty_and() {
        let (vars, _, low) = vars();
        let mut rules = Rules::new();

        rules.add(Expr::And(Vec::new()), low);

        assert!(matches!(
            FuzzySystem::new(vars, rules, MamdaniInference::default()),
            Err(FuzzyError::Config(_))
        ));
    }

    #[test]
    fn test_inputs_by_name() {
        let (vars, wet, low) = vars();
        let mut rules = Rules::new();

        rules.add(wet, low);

        let system = FuzzySystem::new(vars, rules, MamdaniInference::default()).unwrap();
        let inputs = system.inputs([("Soil Moisture", 90.)]).unwrap();

        assert_eq!(inputs.get(system.variable("Soil Moisture").unwrap()), Some(90.));
        assert!(matches!(
            system.inputs([("Water Sprinkling", 10.)]),
            Err(FuzzyError::RoleMismatch { .. })
        ));
        assert!(matches!(
            system.inputs([("Humidity", 10.)]),
            Err(FuzzyError::UnknownVariable { .. })
        ));
        assert!(matches!(
            system.inputs([("Soil Moisture", f64::NAN)]),
            Err(FuzzyError::InvalidInput { .. })
        ));
        assert!(system.infer(&inputs).get_by_name("Water Sprinkling").unwrap() < 20.);
        assert_eq!(system.term("Water Sprinkling", "low").unwrap(), low);
    }
}
