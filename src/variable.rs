use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::membership::Triangle;
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Handle to a variable registered in a [`Variables`] table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Variable(pub(crate) VariableKey);

/// Handle to one term of one variable, resolved once when rules are built
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Term {
    pub(crate) var: VariableKey,
    pub(crate) index: usize,
}

impl Term {
    pub fn variable(&self) -> Variable {
        Variable(self.var)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Input, read by rule premises
    Antecedent,
    /// Output, written by rule consequences
    Consequent,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Antecedent => "antecedent",
            Role::Consequent => "consequent",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named dimension over a universe, holding uniquely named triangular terms.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: IndexMap<String, Triangle>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Registers a term, returning its index in the term table
    pub fn add_term(&mut self, name: impl Into<String>, membership: Triangle) -> Result<usize> {
        let name = name.into();

        if self.terms.contains_key(&name) {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }

        if !membership.fits(&self.universe) {
            let (a, c) = membership.support();

            return Err(FuzzyError::OutOfUniverse {
                variable: self.name.clone(),
                term: name,
                a,
                c,
                min: self.universe.min(),
                max: self.universe.max(),
            });
        }

        let (index, _) = self.terms.insert_full(name, membership);

        Ok(index)
    }

    pub fn term_index(&self, name: &str) -> Result<usize> {
        self.terms.get_index_of(name).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: name.to_owned(),
        })
    }

    pub fn term_name(&self, index: usize) -> Option<&str> {
        self.terms.get_index(index).map(|(name, _)| name.as_str())
    }

    pub fn membership(&self, name: &str) -> Result<&Triangle> {
        let index = self.term_index(name)?;

        Ok(&self.terms[index])
    }

    pub fn term_degree(&self, name: &str, x: f64) -> Result<f64> {
        Ok(self.membership(name)?.degree(x))
    }

    pub(crate) fn degree_at(&self, index: usize, x: f64) -> Result<f64> {
        let (_, membership) = self.terms.get_index(index).ok_or_else(|| FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: format!("#{index}"),
        })?;

        Ok(membership.degree(x))
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &Triangle)> {
        self.terms.iter().map(|(name, membership)| (name.as_str(), membership))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Degree of `x` in every term, in registration order
    pub fn fuzzify(&self, x: f64) -> Vec<(&str, f64)> {
        self.terms()
            .map(|(name, membership)| (name, membership.degree(x)))
            .collect()
    }

    /// Every term's membership curve sampled over the universe, aligned with
    /// [`Universe::points`]. Meant for plotting.
    pub fn sample(&self) -> IndexMap<&str, Vec<f64>> {
        self.terms()
            .map(|(name, membership)| (name, membership.sample(&self.universe)))
            .collect()
    }
}

/// Arena of every variable in a rule base
#[derive(Clone, Debug, Default)]
pub struct Variables {
    vars: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, role: Role, universe: Universe) -> Result<Variable> {
        let name = name.into();

        if self.names.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable { name });
        }

        let key = self.vars.insert(LinguisticVariable::new(name.clone(), role, universe));

        self.names.insert(name, key);

        Ok(Variable(key))
    }

    pub fn add_term(&mut self, var: Variable, name: impl Into<String>, membership: Triangle) -> Result<Term> {
        let index = self.lookup_mut(var.0)?.add_term(name, membership)?;

        Ok(Term { var: var.0, index })
    }

    pub fn term(&self, var: Variable, name: &str) -> Result<Term> {
        let index = self.lookup(var.0)?.term_index(name)?;

        Ok(Term { var: var.0, index })
    }

    /// Membership function a term handle refers to
    pub fn membership(&self, term: Term) -> Result<&Triangle> {
        let var = self.lookup(term.var)?;

        var.terms.get_index(term.index).map(|(_, membership)| membership).ok_or_else(|| {
            FuzzyError::UnknownTerm {
                variable: var.name.clone(),
                term: format!("#{}", term.index),
            }
        })
    }

    pub fn by_name(&self, name: &str) -> Result<Variable> {
        self.names
            .get(name)
            .map(|key| Variable(*key))
            .ok_or_else(|| FuzzyError::UnknownVariable { name: name.to_owned() })
    }

    pub fn get(&self, var: Variable) -> Option<&LinguisticVariable> {
        self.vars.get(var.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.vars.iter().map(|(key, var)| (Variable(key), var))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub(crate) fn lookup(&self, key: VariableKey) -> Result<&LinguisticVariable> {
        self.vars.get(key).ok_or_else(|| FuzzyError::UnknownVariable {
            name: format!("{key:?}"),
        })
    }

    fn lookup_mut(&mut self, key: VariableKey) -> Result<&mut LinguisticVariable> {
        self.vars.get_mut(key).ok_or_else(|| FuzzyError::UnknownVariable {
            name: format!("{key:?}"),
        })
    }
}

#[test]
fn test_add_terms() {
    let mut vars = Variables::new();
    let soil = vars
        .add("Soil Moisture", Role::Antecedent, Universe::new(0., 100., 1.).unwrap())
        .unwrap();
    let dry = vars.add_term(soil, "dry", Triangle::new(0., 0., 50.).unwrap()).unwrap();
    let wet = vars.add_term(soil, "wet", Triangle::new(50., 100., 100.).unwrap()).unwrap();

    assert_eq!(vars.term(soil, "dry").unwrap(), dry);
    assert_eq!(vars.term(soil, "wet").unwrap(), wet);
    assert_ne!(dry, wet);
    assert_eq!(dry.variable(), soil);
    assert_eq!(vars.by_name("Soil Moisture").unwrap(), soil);
    assert_eq!(vars.membership(wet).unwrap(), &Triangle::new(50., 100., 100.).unwrap());

    let var = vars.get(soil).unwrap();

    assert_eq!(var.len(), 2);
    assert_eq!(var.term_name(1), Some("wet"));
    assert_eq!(var.term_degree("dry", 10.).unwrap(), 0.8);
    assert_eq!(var.fuzzify(75.), vec![("dry", 0.), ("wet", 0.5)]);
}

#[test]
fn test_term_errors() {
    let mut vars = Variables::new();
    let temp = vars
        .add("Temperature", Role::Antecedent, Universe::new(0., 50., 1.).unwrap())
        .unwrap();

    vars.add_term(temp, "cold", Triangle::new(0., 0., 20.).unwrap()).unwrap();

    assert_eq!(
        vars.add_term(temp, "cold", Triangle::new(0., 5., 10.).unwrap()),
        Err(FuzzyError::DuplicateTerm {
            variable: "Temperature".into(),
            term: "cold".into(),
        })
    );
    assert!(matches!(
        vars.add_term(temp, "scorching", Triangle::new(40., 55., 70.).unwrap()),
        Err(FuzzyError::OutOfUniverse { .. })
    ));
    assert_eq!(
        vars.term(temp, "hot"),
        Err(FuzzyError::UnknownTerm {
            variable: "Temperature".into(),
            term: "hot".into(),
        })
    );
    assert!(vars.get(temp).unwrap().term_degree("hot", 45.).is_err());
    assert_eq!(
        vars.add("Temperature", Role::Consequent, Universe::new(0., 1., 0.5).unwrap()),
        Err(FuzzyError::DuplicateVariable {
            name: "Temperature".into()
        })
    );
    assert!(matches!(vars.by_name("Humidity"), Err(FuzzyError::UnknownVariable { .. })));
}

#[test]
fn test_sample_aligns_with_universe() {
    let mut var = LinguisticVariable::new("Water Sprinkling", Role::Consequent, Universe::new(0., 100., 1.).unwrap());

    var.add_term("low", Triangle::new(0., 0., 50.).unwrap()).unwrap();
    var.add_term("medium", Triangle::new(20., 50., 80.).unwrap()).unwrap();

    let sampled = var.sample();

    assert_eq!(sampled.len(), 2);
    assert_eq!(sampled["low"].len(), var.universe().len());
    assert_eq!(sampled["medium"][50], 1.);
    assert_eq!(sampled["low"][0], 1.);
}
