//! Declarative description of a whole fuzzy system, loadable from TOML.
//!
//! ```toml
//! [inference]
//! and_op = "min"
//! defuzz_op = "centroid"
//!
//! [[variables]]
//! name = "Temperature"
//! role = "antecedent"
//! min = 0.0
//! max = 50.0
//! step = 1.0
//! terms = { cold = [0.0, 0.0, 20.0], hot = [30.0, 50.0, 50.0] }
//!
//! [[rules]]
//! if = { not = { is = ["Temperature", "cold"] } }
//! then = ["Water Sprinkling", "high"]
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::dsl::Expr;
use crate::error::Result;
use crate::inference::MamdaniInference;
use crate::membership::Triangle;
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::universe::Universe;
use crate::variable::{Role, Variables};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    #[serde(default)]
    pub inference: MamdaniInference,
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VariableConfig {
    pub name: String,
    pub role: Role,
    pub min: f64,
    pub max: f64,
    #[serde(default = "default_step")]
    pub step: f64,
    /// Term name to triangle breakpoints `[a, b, c]`, validated by [`SystemConfig::build`]
    #[serde(default)]
    pub terms: IndexMap<String, [f64; 3]>,
}

fn default_step() -> f64 {
    1.
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(rename = "if")]
    pub premise: ExprConfig,
    /// `[variable, term]`
    pub then: (String, String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprConfig {
    /// `[variable, term]`
    Is(String, String),
    And(Vec<ExprConfig>),
    Or(Vec<ExprConfig>),
    Not(Box<ExprConfig>),
}

impl SystemConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Resolves every variable and term name, so a config that builds can't fail
    /// name lookups during inference.
    pub fn build(&self) -> Result<FuzzySystem> {
        let mut vars = Variables::new();

        for var_config in &self.variables {
            let universe = Universe::new(var_config.min, var_config.max, var_config.step)?;
            let var = vars.add(var_config.name.as_str(), var_config.role, universe)?;

            for (term, breakpoints) in &var_config.terms {
                vars.add_term(var, term.as_str(), Triangle::try_from(*breakpoints)?)?;
            }
        }

        let mut rules = Rules::with_capacity(self.rules.len());

        for rule in &self.rules {
            let premise = rule.premise.resolve(&vars)?;
            let (var, term) = &rule.then;
            let consequence = vars.term(vars.by_name(var)?, term)?;

            rules.add(premise, consequence);
        }

        FuzzySystem::new(vars, rules, self.inference)
    }
}

impl ExprConfig {
    fn resolve(&self, vars: &Variables) -> Result<Expr> {
        Ok(match self {
            ExprConfig::Is(var, term) => Expr::Is(vars.term(vars.by_name(var)?, term)?),
            ExprConfig::And(exprs) => Expr::And(exprs.iter().map(|e| e.resolve(vars)).collect::<Result<_>>()?),
            ExprConfig::Or(exprs) => Expr::Or(exprs.iter().map(|e| e.resolve(vars)).collect::<Result<_>>()?),
            ExprConfig::Not(expr) => !expr.resolve(vars)?,
        })
    }
}

impl FuzzySystem {
    pub fn from_toml(content: &str) -> Result<Self> {
        SystemConfig::from_toml(content)?.build()
    }
}
