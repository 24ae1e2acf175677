use approx::assert_relative_eq;

use assay_conformity::reference::{
    compute_statistics, load_population, QuantitySet, Quantity, ReferenceBatch,
    ReferencePopulation,
};
use assay_conformity::{
    evaluate, get_reference_statistics, Checker, ConfigurationError, InputError, Sample, Variant,
    Verdict,
};

fn sample(curcumin: f64, dmc: f64, bdmc: f64) -> Sample {
    Sample::new()
        .with("Curcumin", curcumin)
        .with("DMC", dmc)
        .with("BDMC", bdmc)
}

#[test]
fn statistics_are_deterministic() {
    for &variant in &Variant::ALL {
        let population = load_population(variant).unwrap();
        let first = compute_statistics(&population).unwrap();
        let second = compute_statistics(&population).unwrap();

        assert_eq!(first, second);
        assert_eq!(&first, get_reference_statistics(variant).unwrap());
    }
}

#[test]
fn mean_sample_scores_zero() {
    for &variant in &Variant::ALL {
        let statistics = get_reference_statistics(variant).unwrap();
        let result = evaluate(&statistics.mean_sample(), statistics).unwrap();

        for quantity in statistics.quantity_set().scored() {
            assert_eq!(result.z_scores().get(quantity.name()), Some(0.0));
        }
        assert_eq!(result.verdict(), Verdict::Conforms);
    }
}

#[test]
fn evaluation_is_idempotent() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let sample = sample(77.1, 15.9, 2.8);

    let first = evaluate(&sample, statistics).unwrap();
    let second = evaluate(&sample, statistics).unwrap();

    assert_eq!(first, second);
}

#[test]
fn typical_sample_conforms() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let result = evaluate(&sample(75.5, 16.4, 2.7), statistics).unwrap();

    assert_eq!(result.verdict(), Verdict::Conforms);
    assert!(result.flagged().is_empty());
    assert_eq!(result.z_scores().len(), 6);
    for (name, z_score) in result.z_scores().iter() {
        assert!(z_score.abs() < 2., "{} has z-score {}", name, z_score);
    }
    assert_relative_eq!(
        result.z_scores().get("Curcumin").unwrap(),
        -0.3048,
        epsilon = 1e-4
    );
}

#[test]
fn high_curcumin_is_an_outlier() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let result = evaluate(&sample(90., 16.4, 2.7), statistics).unwrap();

    assert_eq!(result.verdict(), Verdict::Outlier);
    assert!(result.is_flagged("Curcumin"));
    assert!(!result.is_flagged("DMC"));
    assert!(!result.is_flagged("BDMC"));
    assert_eq!(result.flagged()[0].to_string(), "Curcumin (Z-score: 9.79)");
    assert_relative_eq!(result.flagged()[0].z_score, 9.7854, epsilon = 1e-4);
}

#[test]
fn zero_denominator_is_rejected() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();

    assert_eq!(
        evaluate(&sample(75.5, 0., 2.7), statistics),
        Err(InputError::ZeroDenominator {
            ratio: "Curcumin_to_DMC",
            denominator: "DMC",
        })
    );
}

#[test]
fn subnormal_denominator_is_rejected() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();

    assert_eq!(
        evaluate(&sample(75.5, 1e-310, 2.7), statistics),
        Err(InputError::RatioOverflow {
            ratio: "Curcumin_to_DMC",
            denominator: "DMC",
        })
    );
}

#[test]
fn missing_fields_are_rejected() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let sample = Sample::new().with("Curcumin", 75.5).with("BDMC", 2.7);

    assert_eq!(
        evaluate(&sample, statistics),
        Err(InputError::MissingField { quantity: "DMC" })
    );
}

#[test]
fn total_curcuminoids_is_required_but_never_scored() {
    let statistics = get_reference_statistics(Variant::TotalCurcuminoids).unwrap();

    assert_eq!(
        evaluate(&sample(75.9, 16.3, 2.7), statistics),
        Err(InputError::MissingField {
            quantity: "Total_Curcuminoids"
        })
    );

    let result = evaluate(&statistics.mean_sample(), statistics).unwrap();
    let names = result.z_scores().iter().map(|(name, _)| name).collect::<Vec<_>>();

    assert_eq!(
        names,
        [
            "Curcumin",
            "DMC",
            "BDMC",
            "Curcumin_to_DMC",
            "Curcumin_to_BDMC",
            "DMC_to_BDMC",
            "Curcumin_to_Total"
        ]
    );
}

#[test]
fn zero_total_is_rejected() {
    let statistics = get_reference_statistics(Variant::TotalCurcuminoids).unwrap();
    let sample = sample(75.9, 16.3, 2.7).with("Total_Curcuminoids", 0.);

    assert_eq!(
        evaluate(&sample, statistics),
        Err(InputError::ZeroDenominator {
            ratio: "Curcumin_to_Total",
            denominator: "Total_Curcuminoids",
        })
    );
}

#[test]
fn wider_threshold_accepts_more() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let sample = sample(90., 16.4, 2.7);

    let strict = Checker::default().evaluate(&sample, statistics).unwrap();
    let lenient = Checker::default()
        .threshold(10.)
        .evaluate(&sample, statistics)
        .unwrap();

    assert_eq!(strict.verdict(), Verdict::Outlier);
    assert_eq!(lenient.verdict(), Verdict::Conforms);
    assert_eq!(strict.z_scores(), lenient.z_scores());
    assert_eq!(lenient.threshold(), 10.);
}

const X: Quantity = Quantity::new("X", "X (Assay)");

fn unit_population(values: &[f64]) -> ReferencePopulation {
    const SCHEMA: QuantitySet = QuantitySet::new("unit", &[X], &[], &[]);

    let batches = values
        .iter()
        .enumerate()
        .map(|(i, &v)| ReferenceBatch::new(format!("B{}", i), vec![(X, v)]))
        .collect();

    ReferencePopulation::new(SCHEMA, batches).unwrap()
}

#[test]
fn threshold_boundary_is_inclusive() {
    // mean 10, standard deviation exactly 1
    let statistics = compute_statistics(&unit_population(&[9., 10., 11.])).unwrap();

    let on_boundary = evaluate(&Sample::new().with("X", 12.), &statistics).unwrap();
    assert_eq!(on_boundary.z_scores().get("X"), Some(2.0));
    assert_eq!(on_boundary.verdict(), Verdict::Conforms);

    let beyond = evaluate(&Sample::new().with("X", 12.000_000_1), &statistics).unwrap();
    assert_eq!(beyond.verdict(), Verdict::Outlier);
    assert!(beyond.is_flagged("X"));
}

#[test]
fn single_row_population_is_unusable() {
    assert_eq!(
        compute_statistics(&unit_population(&[10.])),
        Err(ConfigurationError::TooFewRows {
            schema: "unit",
            rows: 1
        })
    );
}

#[test]
fn result_serializes_to_json() {
    let statistics = get_reference_statistics(Variant::Components).unwrap();
    let result = evaluate(&sample(90., 16.4, 2.7), statistics).unwrap();

    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["verdict"], "outlier");
    assert_eq!(json["threshold"], 2.0);
    assert_eq!(json["flagged"][0]["name"], "Curcumin");
    let keys = json["z_scores"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect::<Vec<_>>();
    assert_eq!(keys.len(), 6);
}
