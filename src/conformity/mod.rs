//! Z-score conformity check of a single sample against reference statistics
//!
//! Every scored quantity and every ratio of the reference quantity set gets a z-score:
//!
//! ``` ignore
//! let z = (x - mean) / std_dev;
//! let flagged = z.abs() > threshold;
//! ```
//!
//! A sample conforms when nothing is flagged. The default threshold of 2 standard deviations
//! roughly covers the central 95% of a normally distributed population; a z-score sitting exactly
//! on the threshold is still within bounds.
//!
//! ``` ignore
//!    flagged          within bounds            flagged
//!   x    |   o   o  o    o  |  o   o   o   |      x
//!        -2                 0              +2
//! ```

mod result;
mod sample;

use tracing::{debug, warn};

use crate::error::InputError;
use crate::reference::{Quantity, ReferenceStatistics};

pub use self::result::{ConformityResult, Flag, Verdict, ZScores};
pub use self::sample::Sample;

/// Z-score magnitude above which a quantity is flagged, unless configured otherwise
pub const DEFAULT_THRESHOLD: f64 = 2.0;

/// Configuration of the conformity check
///
/// ```
/// use assay_conformity::conformity::{Checker, Sample};
/// use assay_conformity::reference::{get_reference_statistics, Variant};
///
/// let statistics = get_reference_statistics(Variant::Components).unwrap();
/// let sample = Sample::new()
///     .with("Curcumin", 75.5)
///     .with("DMC", 16.4)
///     .with("BDMC", 2.7);
///
/// let result = Checker::default().threshold(3.0).evaluate(&sample, statistics).unwrap();
/// assert!(result.is_conforming());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Checker {
    threshold: f64,
}

impl Default for Checker {
    fn default() -> Checker {
        Checker {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Checker {
    /// Changes the z-score magnitude above which a quantity or ratio is flagged
    ///
    /// # Panics
    ///
    /// Panics if the threshold is not a positive, finite number
    pub fn threshold(mut self, threshold: f64) -> Checker {
        assert!(threshold.is_finite() && threshold > 0.);

        self.threshold = threshold;
        self
    }

    pub fn current_threshold(&self) -> f64 {
        self.threshold
    }

    /// Evaluates `sample` against `statistics`
    ///
    /// An outlier is a normal `Ok` outcome. `Err` means the sample could not be evaluated at all:
    /// a required value is missing or not finite, or a ratio denominator is zero.
    pub fn evaluate(
        &self,
        sample: &Sample,
        statistics: &ReferenceStatistics,
    ) -> Result<ConformityResult, InputError> {
        match self.z_scores(sample, statistics) {
            Ok(z_scores) => {
                let result = ConformityResult::new(self.threshold, z_scores);

                debug!(
                    schema = statistics.quantity_set().name(),
                    verdict = ?result.verdict(),
                    flagged = result.flagged().len(),
                    "evaluated sample"
                );

                Ok(result)
            }
            Err(e) => {
                warn!(schema = statistics.quantity_set().name(), "rejected sample: {}", e);

                Err(e)
            }
        }
    }

    fn z_scores(
        &self,
        sample: &Sample,
        statistics: &ReferenceStatistics,
    ) -> Result<ZScores, InputError> {
        let quantity_set = statistics.quantity_set();

        // Every required value is checked before any arithmetic
        for quantity in quantity_set.required() {
            value_of(sample, quantity)?;
        }
        for (name, _) in sample.iter() {
            if !quantity_set.required().any(|q| q.name() == name) {
                debug!(quantity = name, "ignoring value outside the quantity set");
            }
        }

        let mut z_scores = ZScores::default();

        for (quantity, summary) in statistics.scored() {
            let x = value_of(sample, quantity)?;

            z_scores.push(quantity.name(), summary.z_score(x));
        }

        for (ratio, summary) in statistics.ratios() {
            let numerator = value_of(sample, ratio.numerator())?;
            let denominator = value_of(sample, ratio.denominator())?;

            if denominator == 0. {
                return Err(InputError::ZeroDenominator {
                    ratio: ratio.name(),
                    denominator: ratio.denominator().name(),
                });
            }

            let value = numerator / denominator;
            if !value.is_finite() {
                return Err(InputError::RatioOverflow {
                    ratio: ratio.name(),
                    denominator: ratio.denominator().name(),
                });
            }

            z_scores.push(ratio.name(), summary.z_score(value));
        }

        Ok(z_scores)
    }
}

fn value_of(sample: &Sample, quantity: Quantity) -> Result<f64, InputError> {
    match sample.get(quantity.name()) {
        Some(value) if value.is_finite() => Ok(value),
        Some(value) => Err(InputError::NonFinite {
            quantity: quantity.name(),
            value,
        }),
        None => Err(InputError::MissingField {
            quantity: quantity.name(),
        }),
    }
}

/// Evaluates `sample` against `statistics` with the default threshold
pub fn evaluate(
    sample: &Sample,
    statistics: &ReferenceStatistics,
) -> Result<ConformityResult, InputError> {
    Checker::default().evaluate(sample, statistics)
}

#[cfg(test)]
mod test {
    use quickcheck::{quickcheck, TestResult};

    use super::*;
    use crate::reference::{
        compute_statistics, QuantitySet, ReferenceBatch, ReferencePopulation,
    };

    const X: Quantity = Quantity::new("X", "X (Assay)");
    const Y: Quantity = Quantity::new("Y", "Y (Assay)");

    // Both columns have mean 10 and a standard deviation of exactly 1
    fn unit_statistics() -> ReferenceStatistics {
        const SCHEMA: QuantitySet = QuantitySet::new("unit", &[X, Y], &[], &[]);

        let batches = [9., 10., 11.]
            .iter()
            .enumerate()
            .map(|(i, &v)| ReferenceBatch::new(format!("B{}", i), vec![(X, v), (Y, v)]))
            .collect();
        let population = ReferencePopulation::new(SCHEMA, batches).unwrap();

        compute_statistics(&population).unwrap()
    }

    #[test]
    fn threshold_is_inclusive() {
        let statistics = unit_statistics();
        let sample = Sample::new().with("X", 12.).with("Y", 8.);

        let result = evaluate(&sample, &statistics).unwrap();

        assert_eq!(result.z_scores().get("X"), Some(2.));
        assert_eq!(result.z_scores().get("Y"), Some(-2.));
        assert_eq!(result.verdict(), Verdict::Conforms);
        assert!(result.flagged().is_empty());
    }

    #[test]
    fn just_beyond_threshold_is_flagged() {
        let statistics = unit_statistics();
        let sample = Sample::new().with("X", 12.000_000_1).with("Y", 10.);

        let result = evaluate(&sample, &statistics).unwrap();

        assert_eq!(result.verdict(), Verdict::Outlier);
        assert_eq!(result.flagged().len(), 1);
        assert_eq!(result.flagged()[0].name, "X");
        assert!(result.flagged()[0].is_high());
    }

    #[test]
    fn extra_values_are_ignored() {
        let statistics = unit_statistics();
        let sample = Sample::new().with("X", 10.).with("Y", 10.).with("Z", 1e9);

        let result = evaluate(&sample, &statistics).unwrap();

        assert_eq!(result.z_scores().len(), 2);
        assert!(result.is_conforming());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let statistics = unit_statistics();
        let sample = Sample::new().with("X", std::f64::INFINITY).with("Y", 10.);

        assert_eq!(
            evaluate(&sample, &statistics),
            Err(InputError::NonFinite {
                quantity: "X",
                value: std::f64::INFINITY
            })
        );
    }

    #[test]
    #[should_panic]
    fn threshold_must_be_positive() {
        Checker::default().threshold(0.);
    }

    quickcheck! {
        fn flagged_iff_beyond_threshold(offset: i8, threshold: u8) -> TestResult {
            if threshold == 0 {
                return TestResult::discard();
            }

            let statistics = unit_statistics();
            let sample = Sample::new().with("X", 10. + f64::from(offset)).with("Y", 10.);
            let checker = Checker::default().threshold(f64::from(threshold));

            let result = checker.evaluate(&sample, &statistics).unwrap();
            let expected = i32::from(offset).abs() > i32::from(threshold);

            TestResult::from_bool(
                result.is_flagged("X") == expected && result.is_conforming() == !expected
            )
        }
    }
}
