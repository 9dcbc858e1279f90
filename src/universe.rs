use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;

/// Most samples a universe may hold
pub const MAX_SAMPLES: usize = 1_000_000;

/// A bounded, discretized range `[min, max]` sampled every `step`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    step: f64,
    len: usize,
}

impl Universe {
    /// Fails with [`FuzzyError::InvalidUniverse`] unless `min < max`, `0 < step <= max - min`
    /// and the range holds at most [`MAX_SAMPLES`] samples.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self> {
        let invalid = || FuzzyError::InvalidUniverse { min, max, step };

        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min >= max || step <= 0. || step > max - min {
            return Err(invalid());
        }

        // Round rather than floor so that 100 / 0.1 doesn't lose its last sample to
        // representation error
        let steps = ((max - min) / step).round();

        if !steps.is_finite() || steps >= MAX_SAMPLES as f64 {
            return Err(invalid());
        }

        let len = (steps as usize).checked_add(1).ok_or_else(invalid)?;

        Ok(Self { min, max, step, len })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// The requested step. Samples are spread evenly over `[min, max]`, so when the range
    /// isn't a whole multiple of it the actual spacing differs slightly.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample points, both ends included
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn points(&self) -> Linspace<f64> {
        Linspace::new(self.min, self.max, self.len)
    }
}

#[test]
fn test_universe_sampling() {
    let universe = Universe::new(0., 100., 1.).unwrap();

    assert_eq!(universe.len(), 101);

    let points: Vec<f64> = universe.points().collect();

    assert_eq!(points.first(), Some(&0.));
    assert_eq!(points.last(), Some(&100.));
    assert_eq!(points[37], 37.);

    let fine = Universe::new(0., 1., 0.1).unwrap();

    assert_eq!(fine.len(), 11);
    assert!(fine.contains(0.5));
    assert!(!fine.contains(1.5));
}

#[test]
fn test_universe_rejects_bad_bounds() {
    assert!(matches!(Universe::new(5., 5., 1.), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(10., 0., 1.), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0., 10., 0.), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0., 1., 2.), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0., f64::NAN, 1.), Err(FuzzyError::InvalidUniverse { .. })));
}

#[test]
fn test_universe_caps_sample_count() {
    assert!(matches!(Universe::new(0., 1e6, 1e-15), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0., 1., 1e-12), Err(FuzzyError::InvalidUniverse { .. })));
    assert!(matches!(
        Universe::new(-f64::MAX, f64::MAX, 1.),
        Err(FuzzyError::InvalidUniverse { .. })
    ));

    let largest = Universe::new(0., (MAX_SAMPLES - 1) as f64, 1.).unwrap();

    assert_eq!(largest.len(), MAX_SAMPLES);
}
