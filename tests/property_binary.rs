//! Property tests for binary classification metrics
//!
//! Ensures the metric formulas satisfy their mathematical invariants:
//! - Rates bounded to [0, 1] whenever defined
//! - Undefined results are NaN, never infinite and never an error
//! - Sensitivity/specificity symmetry under role swap
//! - Cell sums match retained observation counts

use evaluar::{BinaryEval, ConfusionMatrix, Error, EventLevel, NaPolicy};
use proptest::collection::vec;
use proptest::prelude::*;

const LEVELS: [&str; 2] = ["Yes", "No"];

/// Generate a label vector over the two-level alphabet.
fn labels(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<&'static str>> {
    vec(prop_oneof![Just(LEVELS[0]), Just(LEVELS[1])], len)
}

/// Generate truth/estimate pairs of equal length.
fn label_pair(
    len: std::ops::Range<usize>,
) -> impl Strategy<Value = (Vec<&'static str>, Vec<&'static str>)> {
    len.prop_flat_map(|l| {
        (
            vec(prop_oneof![Just(LEVELS[0]), Just(LEVELS[1])], l),
            vec(prop_oneof![Just(LEVELS[0]), Just(LEVELS[1])], l),
        )
    })
}

/// Generate label vectors that may contain missing values.
fn optional_labels(len: usize) -> impl Strategy<Value = Vec<Option<&'static str>>> {
    vec(
        prop_oneof![3 => Just(Some(LEVELS[0])), 3 => Just(Some(LEVELS[1])), 1 => Just(None)],
        len,
    )
}

fn defined_in_unit_interval(value: f64) -> bool {
    value.is_nan() || (0.0..=1.0).contains(&value)
}

proptest! {
    #[test]
    fn prop_rates_bounded_or_nan((truth, estimate) in label_pair(1..200)) {
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

        for value in [
            eval.sensitivity(),
            eval.specificity(),
            eval.prevalence(),
            eval.ppv(None).unwrap(),
            eval.npv(None).unwrap(),
        ] {
            prop_assert!(!value.is_infinite(), "metric {} is infinite", value);
            prop_assert!(
                defined_in_unit_interval(value),
                "metric {} defined but outside [0, 1]",
                value
            );
        }
    }

    #[test]
    fn prop_sensitivity_plus_miss_rate_is_one((truth, estimate) in label_pair(1..200)) {
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

        let positives = cm.truth_total(0);
        prop_assume!(positives > 0);

        let miss_rate = cm.count(1, 0) as f64 / positives as f64;
        prop_assert!(
            (eval.sensitivity() + miss_rate - 1.0).abs() < 1e-12,
            "sensitivity {} + miss rate {} != 1",
            eval.sensitivity(),
            miss_rate
        );
    }

    #[test]
    fn prop_sensitivity_equals_specificity_of_complement((truth, estimate) in label_pair(1..200)) {
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let yes = BinaryEval::with_positive(&cm, &LEVELS[0]).unwrap();
        let no = BinaryEval::with_positive(&cm, &LEVELS[1]).unwrap();

        let (a, b) = (yes.sensitivity(), no.specificity());
        prop_assert!(
            (a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12,
            "sensitivity(Yes) {} != specificity(No) {}",
            a,
            b
        );
    }

    #[test]
    fn prop_zero_positive_column_undefines_sensitivity_and_ppv(
        estimate in labels(1..100)
    ) {
        // Truth is all negative, so no actual positives exist
        let truth = vec![LEVELS[1]; estimate.len()];
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

        prop_assert!(eval.sensitivity().is_nan());
        prop_assert!(eval.ppv(None).unwrap().is_nan());
    }

    #[test]
    fn prop_zero_negative_column_undefines_specificity_and_npv(
        estimate in labels(1..100)
    ) {
        let truth = vec![LEVELS[0]; estimate.len()];
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

        prop_assert!(eval.specificity().is_nan());
        prop_assert!(eval.npv(None).unwrap().is_nan());
    }

    #[test]
    fn prop_cell_sum_equals_retained_pairs(
        truth in optional_labels(150),
        estimate in optional_labels(150)
    ) {
        let retained = truth
            .iter()
            .zip(estimate.iter())
            .filter(|(t, e)| t.is_some() && e.is_some())
            .count();

        let result =
            ConfusionMatrix::from_optional(&truth, &estimate, &LEVELS, NaPolicy::Strip);
        match result {
            Ok(cm) => prop_assert_eq!(cm.total(), retained),
            Err(Error::EmptyData) => prop_assert_eq!(retained, 0),
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn prop_explicit_empirical_prevalence_matches_default(
        (truth, estimate) in label_pair(2..200)
    ) {
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();
        let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

        let p = eval.prevalence();
        // Only an interior prevalence can be passed explicitly
        prop_assume!(p > 0.0 && p < 1.0);

        let (a, b) = (eval.ppv(Some(p)).unwrap(), eval.ppv(None).unwrap());
        prop_assert!((a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12);

        let (a, b) = (eval.npv(Some(p)).unwrap(), eval.npv(None).unwrap());
        prop_assert!((a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12);
    }

    #[test]
    fn prop_event_convention_matches_explicit_level(
        (truth, estimate) in label_pair(1..100)
    ) {
        let cm = ConfusionMatrix::from_labels(&truth, &estimate, &LEVELS).unwrap();

        for (event, level) in [(EventLevel::First, LEVELS[0]), (EventLevel::Second, LEVELS[1])] {
            let by_convention = BinaryEval::new(&cm, event).unwrap();
            let by_level = BinaryEval::with_positive(&cm, &level).unwrap();
            prop_assert_eq!(by_convention.positive_level(), by_level.positive_level());

            let (a, b) = (by_convention.sensitivity(), by_level.sensitivity());
            prop_assert!((a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-12);
        }
    }
}

// =============================================================================
// Edge cases worth pinning outside proptest
// =============================================================================

#[test]
fn test_single_observation() {
    let cm = ConfusionMatrix::from_labels(&["Yes"], &["Yes"], &LEVELS).unwrap();
    let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

    assert_eq!(eval.sensitivity(), 1.0);
    assert!(eval.specificity().is_nan());
}

#[test]
fn test_all_zero_count_table() {
    // A caller-supplied table can be all zeros; every rate is then undefined
    let cm = ConfusionMatrix::from_counts(vec![vec![0, 0], vec![0, 0]], vec!["Yes", "No"]).unwrap();
    let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

    assert!(eval.sensitivity().is_nan());
    assert!(eval.specificity().is_nan());
    assert!(eval.prevalence().is_nan());
    assert!(eval.ppv(None).unwrap().is_nan());
    assert!(eval.npv(None).unwrap().is_nan());
}

#[test]
fn test_perfect_classifier() {
    let truth = ["Yes", "Yes", "No", "No"];
    let cm = ConfusionMatrix::from_labels(&truth, &truth, &LEVELS).unwrap();
    let eval = BinaryEval::new(&cm, EventLevel::First).unwrap();

    assert_eq!(eval.sensitivity(), 1.0);
    assert_eq!(eval.specificity(), 1.0);
    assert_eq!(eval.ppv(None).unwrap(), 1.0);
    assert_eq!(eval.npv(None).unwrap(), 1.0);
}
