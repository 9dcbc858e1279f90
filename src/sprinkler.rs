//! Automatic sprinkler controller: soil moisture (%) and air temperature (°C) in,
//! water sprinkling level (%) out.
//!
//! | soil  | temperature | sprinkling |
//! |-------|-------------|------------|
//! | dry   | hot         | high       |
//! | dry   | warm        | medium     |
//! | moist | warm        | medium     |
//! | moist | cold        | low        |
//! | wet   | any         | low        |

use crate::error::Result;
use crate::inference::MamdaniInference;
use crate::inputs::Inputs;
use crate::membership::Triangle;
use crate::outputs::Outputs;
use crate::rules::Rules;
use crate::system::FuzzySystem;
use crate::universe::Universe;
use crate::variable::{Role, Variable, Variables};

pub const CONFIG: &str = include_str!("../config/sprinkler.toml");

pub const SOIL_MOISTURE: &str = "Soil Moisture";
pub const TEMPERATURE: &str = "Temperature";
pub const WATER_SPRINKLING: &str = "Water Sprinkling";

/// `(soil moisture %, temperature °C)` pairs covering the rule base
pub const TEST_CASES: [(f64, f64); 10] = [
    (30., 35.),
    (70., 20.),
    (10., 40.),
    (50., 10.),
    (80., 30.),
    (20., 45.),
    (90., 15.),
    (40., 25.),
    (15., 35.),
    (60., 5.),
];

/// Builds the sprinkler rule base in code. Equivalent to [`CONFIG`].
pub fn system() -> Result<FuzzySystem> {
    let mut vars = Variables::new();
    let soil = vars.add(SOIL_MOISTURE, Role::Antecedent, Universe::new(0., 100., 1.)?)?;
    let temp = vars.add(TEMPERATURE, Role::Antecedent, Universe::new(0., 50., 1.)?)?;
    let water = vars.add(WATER_SPRINKLING, Role::Consequent, Universe::new(0., 100., 1.)?)?;

    let dry = vars.add_term(soil, "dry", Triangle::new(0., 0., 50.)?)?;
    let moist = vars.add_term(soil, "moist", Triangle::new(20., 50., 80.)?)?;
    let wet = vars.add_term(soil, "wet", Triangle::new(50., 100., 100.)?)?;

    let cold = vars.add_term(temp, "cold", Triangle::new(0., 0., 20.)?)?;
    let warm = vars.add_term(temp, "warm", Triangle::new(10., 25., 40.)?)?;
    let hot = vars.add_term(temp, "hot", Triangle::new(30., 50., 50.)?)?;

    let low = vars.add_term(water, "low", Triangle::new(0., 0., 50.)?)?;
    let medium = vars.add_term(water, "medium", Triangle::new(20., 50., 80.)?)?;
    let high = vars.add_term(water, "high", Triangle::new(50., 100., 100.)?)?;

    let mut rules = Rules::with_capacity(5);

    rules.add(dry.and(hot), high);
    rules.add(dry.and(warm), medium);
    rules.add(moist.and(warm), medium);
    rules.add(moist.and(cold), low);
    rules.add(wet, low);

    FuzzySystem::new(vars, rules, MamdaniInference::default())
}

/// The sprinkler rule base with its variables resolved
#[derive(Clone, Debug)]
pub struct Sprinkler {
    system: FuzzySystem,
    soil: Variable,
    temperature: Variable,
    water: Variable,
}

impl Sprinkler {
    /// Loads [`CONFIG`]
    pub fn new() -> Result<Self> {
        Self::from_system(FuzzySystem::from_toml(CONFIG)?)
    }

    /// Wraps any system that has the three sprinkler variables
    pub fn from_system(system: FuzzySystem) -> Result<Self> {
        Ok(Self {
            soil: system.variable(SOIL_MOISTURE)?,
            temperature: system.variable(TEMPERATURE)?,
            water: system.variable(WATER_SPRINKLING)?,
            system,
        })
    }

    pub fn system(&self) -> &FuzzySystem {
        &self.system
    }

    pub fn soil_moisture(&self) -> Variable {
        self.soil
    }

    pub fn temperature(&self) -> Variable {
        self.temperature
    }

    pub fn water_sprinkling(&self) -> Variable {
        self.water
    }

    pub fn evaluate(&self, soil: f64, temperature: f64) -> Outputs {
        let inputs = Inputs::new().with(self.soil, soil).with(self.temperature, temperature);

        self.system.infer(&inputs)
    }

    /// Sprinkling level in percent
    pub fn recommend(&self, soil: f64, temperature: f64) -> Result<f64> {
        self.evaluate(soil, temperature).get(self.water)
    }
}

#[test]
fn test_code_and_config_agree() {
    let from_config = Sprinkler::new().unwrap();
    let from_code = Sprinkler::from_system(system().unwrap()).unwrap();

    for (soil, temp) in TEST_CASES {
        assert_eq!(
            from_config.recommend(soil, temp),
            from_code.recommend(soil, temp),
            "soil {soil}, temp {temp}"
        );
    }
}
