use crate::error::{FuzzyError, Result};
use crate::universe::Universe;

/// Triangular membership function with breakpoints `a <= b <= c`.
///
/// The degree is 0 outside `[a, c]`, rises linearly on `[a, b]`, peaks at 1 on `b` and
/// falls linearly on `[b, c]`. `a == b` or `b == c` give a left or right shoulder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) || a > b || b > c {
            return Err(FuzzyError::InvalidShape { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    /// Like [`Triangle::new`], but also rejects breakpoints outside `universe`
    pub fn new_in(universe: &Universe, a: f64, b: f64, c: f64) -> Result<Self> {
        let tri = Self::new(a, b, c)?;

        if !tri.fits(universe) {
            return Err(FuzzyError::InvalidShape { a, b, c });
        }

        Ok(tri)
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Closed interval outside of which the degree is 0
    pub fn support(&self) -> (f64, f64) {
        (self.a, self.c)
    }

    pub fn fits(&self, universe: &Universe) -> bool {
        universe.contains(self.a) && universe.contains(self.c)
    }

    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x.is_nan() || x < a || x > c {
            0.
        } else if x == b {
            1.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        }
    }

    /// Degrees at every sample point of `universe`
    pub fn sample(&self, universe: &Universe) -> Vec<f64> {
        universe.points().map(|x| self.degree(x)).collect()
    }
}

impl TryFrom<[f64; 3]> for Triangle {
    type Error = FuzzyError;

    fn try_from([a, b, c]: [f64; 3]) -> Result<Self> {
        Triangle::new(a, b, c)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_triangle_degree() {
        let moist = Triangle::new(20., 50., 80.).unwrap();

        assert_eq!(moist.degree(10.), 0.);
        assert_eq!(moist.degree(20.), 0.);
        assert_eq!(moist.degree(50.), 1.);
        assert_eq!(moist.degree(80.), 0.);
        assert_eq!(moist.degree(95.), 0.);
        assert_relative_eq!(moist.degree(35.), 0.5);
        assert_relative_eq!(moist.degree(65.), 0.5);
        assert_relative_eq!(moist.degree(26.), 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_shoulders() {
        let dry = Triangle::new(0., 0., 50.).unwrap();
        let wet = Triangle::new(50., 100., 100.).unwrap();

        assert_eq!(dry.degree(0.), 1.);
        assert_relative_eq!(dry.degree(10.), 0.8);
        assert_eq!(dry.degree(50.), 0.);
        assert_eq!(dry.degree(-1.), 0.);
        assert_eq!(wet.degree(100.), 1.);
        assert_relative_eq!(wet.degree(90.), 0.8);
        assert_eq!(wet.degree(50.), 0.);
    }

    #[test]
    fn test_singleton() {
        let spike = Triangle::new(3., 3., 3.).unwrap();

        assert_eq!(spike.degree(3.), 1.);
        assert_eq!(spike.degree(2.999), 0.);
        assert_eq!(spike.degree(f64::NAN), 0.);
    }

    #[test]
    fn test_invalid_shape() {
        assert_eq!(
            Triangle::new(10., 5., 20.),
            Err(FuzzyError::InvalidShape { a: 10., b: 5., c: 20. })
        );
        assert!(Triangle::new(0., 5., 4.).is_err());
        assert!(Triangle::new(f64::NEG_INFINITY, 0., 1.).is_err());
        assert!(Triangle::try_from([1., 2., 3.]).is_ok());
    }

    #[test]
    fn test_fits_universe() {
        let universe = Universe::new(0., 50., 1.).unwrap();

        assert!(Triangle::new(30., 50., 50.).unwrap().fits(&universe));
        assert!(!Triangle::new(30., 50., 60.).unwrap().fits(&universe));
        assert!(Triangle::new_in(&universe, 0., 0., 20.).is_ok());
        assert!(matches!(
            Triangle::new_in(&universe, -5., 0., 20.),
            Err(FuzzyError::InvalidShape { .. })
        ));
    }
}
