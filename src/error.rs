use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },
    #[error("invalid triangle ({a}, {b}, {c}): breakpoints must be finite and non-decreasing")]
    InvalidShape { a: f64, b: f64, c: f64 },
    #[error("term {term} already exists on variable {variable}")]
    DuplicateTerm { variable: String, term: String },
    #[error("variable {name} already exists")]
    DuplicateVariable { name: String },
    #[error("term {term} is not registered on variable {variable}")]
    UnknownTerm { variable: String, term: String },
    #[error("variable {name} is not registered")]
    UnknownVariable { name: String },
    #[error("term {term} support [{a}, {c}] lies outside the universe [{min}, {max}] of {variable}")]
    OutOfUniverse {
        variable: String,
        term: String,
        a: f64,
        c: f64,
        min: f64,
        max: f64,
    },
    #[error("variable {variable} is a {actual} but was used as a {expected}")]
    RoleMismatch {
        variable: String,
        expected: &'static str,
        actual: &'static str,
    },
    #[error("no input value supplied for variable {variable}")]
    MissingInput { variable: String },
    #[error("input value {value} for variable {variable} is not a finite number")]
    InvalidInput { variable: String, value: f64 },
    #[error("no rule fired for output variable {variable}")]
    NoApplicableRule { variable: String },
    #[error("{membership} membership values for {universe} universe points")]
    LengthMismatch { universe: usize, membership: usize },
    #[error("aggregated membership is zero everywhere")]
    DegenerateAggregate,
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl From<toml::de::Error> for FuzzyError {
    fn from(err: toml::de::Error) -> Self {
        FuzzyError::Config(err.to_string())
    }
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;
