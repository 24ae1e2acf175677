use tracing::debug;

use super::{Quantity, QuantitySet, Ratio, ReferencePopulation};
use crate::conformity::Sample;
use crate::error::ConfigurationError;
use crate::stats;

/// Location and spread of one quantity or ratio across the reference population
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (`N - 1` denominator)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    fn of(values: &[f64]) -> Summary {
        let sample = stats::Sample::new(values);
        let mean = sample.mean();

        Summary {
            mean,
            std_dev: sample.std_dev(Some(mean)),
            min: sample.min(),
            max: sample.max(),
        }
    }

    /// Number of standard deviations between `x` and the mean
    pub fn z_score(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    /// Standard deviation as a percentage of the mean (RSD)
    pub fn relative_std_dev(&self) -> f64 {
        self.std_dev / self.mean * 100.
    }
}

/// Mean and standard deviation of every scored quantity and every ratio of a reference population
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceStatistics {
    quantity_set: QuantitySet,
    rows: usize,
    quantities: Vec<Summary>,
    ratios: Vec<Summary>,
    auxiliary_means: Vec<f64>,
}

impl ReferenceStatistics {
    pub fn quantity_set(&self) -> QuantitySet {
        self.quantity_set
    }

    /// Number of reference batches the statistics were computed from
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Looks up a scored quantity or a ratio by name
    ///
    /// Auxiliary quantities have no summary.
    pub fn summary(&self, name: &str) -> Option<&Summary> {
        self.iter()
            .find(|&(n, _)| n == name)
            .map(|(_, summary)| summary)
    }

    /// Iterates over the summaries, scored quantities first, then ratios, in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Summary)> {
        let quantities = self.scored().map(|(q, summary)| (q.name(), summary));
        let ratios = self.ratios().map(|(r, summary)| (r.name(), summary));

        quantities.chain(ratios)
    }

    pub(crate) fn scored(&self) -> impl Iterator<Item = (Quantity, &Summary)> {
        self.quantity_set
            .scored()
            .iter()
            .copied()
            .zip(&self.quantities)
    }

    pub(crate) fn ratios(&self) -> impl Iterator<Item = (Ratio, &Summary)> {
        self.quantity_set.ratios().iter().copied().zip(&self.ratios)
    }

    /// A sample sitting on the population mean of every required quantity
    pub fn mean_sample(&self) -> Sample {
        let scored = self
            .quantity_set
            .scored()
            .iter()
            .zip(&self.quantities)
            .map(|(q, summary)| (q.name(), summary.mean));
        let auxiliary = self
            .quantity_set
            .auxiliary()
            .iter()
            .zip(&self.auxiliary_means)
            .map(|(q, &mean)| (q.name(), mean));

        scored.chain(auxiliary).collect()
    }
}

fn summarize(name: &'static str, column: &[f64]) -> Result<Summary, ConfigurationError> {
    let summary = Summary::of(column);

    if summary.std_dev > 0. {
        Ok(summary)
    } else {
        Err(ConfigurationError::ZeroSpread { name })
    }
}

/// Summarizes every scored quantity and every ratio of `population`
///
/// Fails when the population has fewer than two batches (the standard deviation is undefined) or
/// when a column has no spread at all (every z-score against it would be infinite).
pub fn compute_statistics(
    population: &ReferencePopulation,
) -> Result<ReferenceStatistics, ConfigurationError> {
    let quantity_set = population.quantity_set();
    let rows = population.len();

    if rows < 2 {
        return Err(ConfigurationError::TooFewRows {
            schema: quantity_set.name(),
            rows,
        });
    }

    let scored = quantity_set.scored();
    let columns = population.quantity_columns();

    let quantities = scored
        .iter()
        .zip(columns)
        .map(|(quantity, column)| summarize(quantity.name(), column))
        .collect::<Result<Vec<_>, _>>()?;
    let auxiliary_means = columns[scored.len()..]
        .iter()
        .map(|column| stats::Sample::new(column).mean())
        .collect();
    let ratios = quantity_set
        .ratios()
        .iter()
        .zip(population.ratio_columns())
        .map(|(ratio, column)| summarize(ratio.name(), column))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        schema = quantity_set.name(),
        rows,
        summaries = quantities.len() + ratios.len(),
        "computed reference statistics"
    );

    Ok(ReferenceStatistics {
        quantity_set,
        rows,
        quantities,
        ratios,
        auxiliary_means,
    })
}
