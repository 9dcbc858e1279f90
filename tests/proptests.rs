//! Property-based tests for membership functions, rule evaluation and defuzzification.

use fuzzy_sprinkler::sprinkler::Sprinkler;
use fuzzy_sprinkler::{centroid, AndOp, Inputs, OrOp, Triangle};
use proptest::prelude::*;

// ===== Strategies for generating test data =====

/// Non-decreasing breakpoints within [0, 100]
fn arb_triangle() -> impl Strategy<Value = Triangle> {
    prop::collection::vec(0.0f64..=100., 3).prop_map(|mut points| {
        points.sort_by(|a, b| a.total_cmp(b));
        Triangle::new(points[0], points[1], points[2]).expect("sorted breakpoints")
    })
}

proptest! {
    #[test]
    fn prop_degree_is_bounded(tri in arb_triangle(), x in -50.0f64..150.) {
        let degree = tri.degree(x);

        prop_assert!((0. ..=1.).contains(&degree));
    }

    #[test]
    fn prop_degree_vanishes_outside_support(tri in arb_triangle(), offset in 0.001f64..100.) {
        let (a, c) = tri.support();

        prop_assert_eq!(tri.degree(a - offset), 0.);
        prop_assert_eq!(tri.degree(c + offset), 0.);
    }

    #[test]
    fn prop_degree_peaks_at_apex(tri in arb_triangle()) {
        let (_, b, _) = tri.breakpoints();

        prop_assert_eq!(tri.degree(b), 1.);
    }

    #[test]
    fn prop_partition_has_at_most_two_active_terms(x in 0.0f64..=100.) {
        let sprinkler = Sprinkler::new().unwrap();
        let soil = sprinkler.system().variables().get(sprinkler.soil_moisture()).unwrap();
        let degrees = soil.fuzzify(x);

        prop_assert!(degrees.iter().filter(|(_, d)| *d > 0.).count() <= 2);
        prop_assert!(degrees.iter().all(|(_, d)| *d <= 1.));
    }

    #[test]
    fn prop_firing_strength_is_min_of_antecedents(soil in 0.0f64..=100., temp in 0.0f64..=50.) {
        let sprinkler = Sprinkler::new().unwrap();
        let system = sprinkler.system();
        let inputs = Inputs::new()
            .with(sprinkler.soil_moisture(), soil)
            .with(sprinkler.temperature(), temp);
        let dry = system.variables().get(sprinkler.soil_moisture()).unwrap().term_degree("dry", soil).unwrap();
        let hot = system.variables().get(sprinkler.temperature()).unwrap().term_degree("hot", temp).unwrap();
        let rule = system.rules().iter().next().unwrap();
        let strength = rule.firing_strength(system.variables(), &inputs, AndOp::Min, OrOp::Max).unwrap();

        prop_assert_eq!(strength, dry.min(hot));
        prop_assert!((0. ..=1.).contains(&strength));
    }

    #[test]
    fn prop_output_within_universe(soil in 0.0f64..=100., temp in 0.0f64..=50.) {
        let sprinkler = Sprinkler::new().unwrap();
        let outputs = sprinkler.evaluate(soil, temp);
        let curve = outputs.aggregated(sprinkler.water_sprinkling()).unwrap();

        prop_assert!(curve.memberships().iter().all(|mu| (0. ..=1.).contains(mu)));

        if let Ok(level) = outputs.get(sprinkler.water_sprinkling()) {
            prop_assert!((0. ..=100.).contains(&level));
        } else {
            prop_assert!(curve.is_zero());
        }
    }

    #[test]
    fn prop_inference_is_idempotent(soil in 0.0f64..=100., temp in 0.0f64..=50.) {
        let sprinkler = Sprinkler::new().unwrap();

        prop_assert_eq!(sprinkler.evaluate(soil, temp), sprinkler.evaluate(soil, temp));
    }

    #[test]
    fn prop_centroid_within_bounds(memberships in prop::collection::vec(0.0f64..=1., 11)) {
        let universe: Vec<f64> = (0..11).map(|i| i as f64 * 10.).collect();

        match centroid(&universe, &memberships) {
            Ok(x) => prop_assert!((0. ..=100. + 1e-9).contains(&x)),
            Err(_) => prop_assert!(memberships.iter().all(|mu| *mu == 0.)),
        }
    }
}

/// Pointwise max of every rule's consequent term clipped at its firing strength,
/// rebuilt independently of the engine
fn expected_aggregate(sprinkler: &Sprinkler, strengths: &[Option<f64>], points: &[f64]) -> Vec<f64> {
    let system = sprinkler.system();
    let mut expected: Vec<f64> = vec![0.; points.len()];

    for (rule, strength) in system.rules().iter().zip(strengths) {
        let strength = strength.expect("every input supplied");
        let term = system.variables().membership(rule.consequence()).unwrap();

        for (agg, x) in expected.iter_mut().zip(points) {
            *agg = agg.max(strength.min(term.degree(*x)));
        }
    }

    expected
}

proptest! {
    #[test]
    fn prop_aggregate_is_max_of_clipped_terms(soil in 0.0f64..=100., temp in 0.0f64..=50.) {
        let sprinkler = Sprinkler::new().unwrap();
        let outputs = sprinkler.evaluate(soil, temp);
        let curve = outputs.aggregated(sprinkler.water_sprinkling()).unwrap();
        let expected = expected_aggregate(&sprinkler, outputs.firing_strengths(), curve.points());

        prop_assert_eq!(curve.memberships(), &expected[..]);
    }
}
