//! Mamdani fuzzy inference.
//!
//! Crisp inputs are fuzzified through triangular terms, rule premises are combined with a
//! t-norm/t-conorm, each rule clips its consequent term, consequents are aggregated per
//! output variable and the aggregate is defuzzificated back to a crisp value.
//!
//! ```
//! use fuzzy_sprinkler::sprinkler::Sprinkler;
//!
//! let sprinkler = Sprinkler::new()?;
//! let level = sprinkler.recommend(10., 40.)?;
//!
//! assert!(level > 65.);
//! # Ok::<(), fuzzy_sprinkler::FuzzyError>(())
//! ```

pub mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
pub mod ops;
mod outputs;
mod rules;
pub mod sprinkler;
mod system;
mod universe;
mod variable;

pub use config::SystemConfig;
pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::MamdaniInference;
pub use inputs::Inputs;
pub use linspace::Linspace;
pub use membership::Triangle;
pub use ops::{centroid, AndOp, DefuzzificationOp, ImplicationOp, OrOp, ProductionLink};
pub use outputs::{AggregatedCurve, Outputs};
pub use rules::{Rule, Rules};
pub use system::FuzzySystem;
pub use universe::{Universe, MAX_SAMPLES};
pub use variable::{LinguisticVariable, Role, Term, Variable, VariableKey, Variables};
