use tracing::debug;

use super::{Quantity, QuantitySet, Variant};
use crate::error::ConfigurationError;

/// One historical batch of the reference population
#[derive(Clone, Debug, PartialEq)]
pub struct ReferenceBatch {
    label: String,
    serial: Option<u32>,
    values: Vec<(Quantity, f64)>,
}

impl ReferenceBatch {
    pub fn new<S>(label: S, values: Vec<(Quantity, f64)>) -> ReferenceBatch
    where
        S: Into<String>,
    {
        ReferenceBatch {
            label: label.into(),
            serial: None,
            values,
        }
    }

    pub fn with_serial(mut self, serial: u32) -> ReferenceBatch {
        self.serial = Some(serial);
        self
    }

    /// Batch number, e.g. `J200392`
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn serial(&self) -> Option<u32> {
        self.serial
    }

    /// Returns the assay value of `quantity`, if this batch reports one
    pub fn value(&self, quantity: Quantity) -> Option<f64> {
        self.values
            .iter()
            .find(|(q, _)| q.name() == quantity.name())
            .map(|&(_, value)| value)
    }
}

/// The reference batches of one variant, with every ratio of the variant derived per batch
///
/// Invariants:
///
/// - Every batch reports a finite value for every required quantity of the quantity set
/// - No batch has a zero ratio denominator
#[derive(Clone, Debug)]
pub struct ReferencePopulation {
    quantity_set: QuantitySet,
    batches: Vec<ReferenceBatch>,
    // One column per required quantity, in `QuantitySet::required` order
    quantities: Vec<Vec<f64>>,
    // One column per ratio, in `QuantitySet::ratios` order
    ratios: Vec<Vec<f64>>,
}

impl ReferencePopulation {
    /// Validates `batches` against `quantity_set` and derives the ratio columns
    pub fn new(
        quantity_set: QuantitySet,
        batches: Vec<ReferenceBatch>,
    ) -> Result<ReferencePopulation, ConfigurationError> {
        let quantities = quantity_set
            .required()
            .map(|quantity| {
                batches
                    .iter()
                    .map(|batch| match batch.value(quantity) {
                        Some(value) if value.is_finite() => Ok(value),
                        Some(_) => Err(ConfigurationError::InvalidValue {
                            batch: batch.label.clone(),
                            quantity: quantity.name(),
                        }),
                        None => Err(ConfigurationError::MissingColumn {
                            batch: batch.label.clone(),
                            quantity: quantity.name(),
                        }),
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let column = |quantity: Quantity| {
            let position = quantity_set
                .required()
                .position(|q| q.name() == quantity.name());

            position.map(|i| &quantities[i])
        };

        let ratios = quantity_set
            .ratios()
            .iter()
            .map(|ratio| {
                let (numerators, denominators) =
                    match (column(ratio.numerator()), column(ratio.denominator())) {
                        (Some(n), Some(d)) => (n, d),
                        // Ratio operand outside the quantity set
                        (n, _) => {
                            let missing = if n.is_none() {
                                ratio.numerator()
                            } else {
                                ratio.denominator()
                            };
                            return Err(ConfigurationError::MissingColumn {
                                batch: batches
                                    .first()
                                    .map(|b| b.label.clone())
                                    .unwrap_or_default(),
                                quantity: missing.name(),
                            });
                        }
                    };

                numerators
                    .iter()
                    .zip(denominators)
                    .zip(&batches)
                    .map(|((&n, &d), batch)| {
                        if d == 0. {
                            Err(ConfigurationError::ZeroDenominator {
                                batch: batch.label.clone(),
                                ratio: ratio.name(),
                            })
                        } else {
                            Ok(n / d)
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ReferencePopulation {
            quantity_set,
            batches,
            quantities,
            ratios,
        })
    }

    pub fn quantity_set(&self) -> QuantitySet {
        self.quantity_set
    }

    pub fn batches(&self) -> &[ReferenceBatch] {
        &self.batches
    }

    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Returns the per-batch values of a required quantity or of a ratio, by name
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        let quantities = self
            .quantity_set
            .required()
            .map(|q| q.name())
            .zip(&self.quantities);
        let ratios = self
            .quantity_set
            .ratios()
            .iter()
            .map(|r| r.name())
            .zip(&self.ratios);

        quantities
            .chain(ratios)
            .find(|&(n, _)| n == name)
            .map(|(_, column)| &column[..])
    }

    pub(crate) fn quantity_columns(&self) -> &[Vec<f64>] {
        &self.quantities
    }

    pub(crate) fn ratio_columns(&self) -> &[Vec<f64>] {
        &self.ratios
    }
}

/// Loads the literal table of `variant` and derives its ratios
pub fn load_population(variant: Variant) -> Result<ReferencePopulation, ConfigurationError> {
    let table = variant.table();

    let batches = table
        .batches
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let values = table
                .columns
                .iter()
                .filter_map(|&(quantity, column)| column.get(i).map(|&value| (quantity, value)))
                .collect();
            let batch = ReferenceBatch::new(label, values);

            match table.serials.and_then(|serials| serials.get(i)) {
                Some(&serial) => batch.with_serial(serial),
                None => batch,
            }
        })
        .collect();

    let population = ReferencePopulation::new(variant.quantity_set(), batches)?;

    debug!(
        variant = variant.name(),
        batches = population.len(),
        ratios = population.ratios.len(),
        "loaded reference population"
    );

    Ok(population)
}
