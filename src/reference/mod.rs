//! The fixed reference population and the statistics derived from it.
//!
//! Each dataset [`Variant`] pairs a literal table of historical batch assays with a
//! [`QuantitySet`]: the quantities that are z-scored on their own, the quantities a sample has to
//! supply only because a ratio divides by them, and the ratios themselves. Consumers never name a
//! column directly; they walk the quantity set, so a new variant only adds a table and a schema.
//!
//! Statistics for the built-in variants are computed once per process and handed out by
//! reference through [`get_reference_statistics`].

mod population;
mod statistics;
mod table;

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::error::ConfigurationError;

pub use self::population::{load_population, ReferenceBatch, ReferencePopulation};
pub use self::statistics::{compute_statistics, ReferenceStatistics, Summary};

/// A measured component of a batch, e.g. the Curcumin assay percentage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Quantity {
    name: &'static str,
    label: &'static str,
}

impl Quantity {
    /// `name` keys samples, statistics and z-scores; `label` is the human-facing column title
    pub const fn new(name: &'static str, label: &'static str) -> Quantity {
        Quantity { name, label }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name)
    }
}

/// A ratio between two quantities, derived per batch and per sample
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Ratio {
    name: &'static str,
    numerator: Quantity,
    denominator: Quantity,
}

impl Ratio {
    pub const fn new(name: &'static str, numerator: Quantity, denominator: Quantity) -> Ratio {
        Ratio {
            name,
            numerator,
            denominator,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn numerator(&self) -> Quantity {
        self.numerator
    }

    pub fn denominator(&self) -> Quantity {
        self.denominator
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name)
    }
}

/// Declarative schema of a dataset variant
///
/// - `scored` quantities get their own z-score.
/// - `auxiliary` quantities are only required as ratio operands and are never z-scored directly.
/// - `ratios` are derived from the quantities above, for both the population and the sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct QuantitySet {
    name: &'static str,
    scored: &'static [Quantity],
    auxiliary: &'static [Quantity],
    ratios: &'static [Ratio],
}

impl QuantitySet {
    pub const fn new(
        name: &'static str,
        scored: &'static [Quantity],
        auxiliary: &'static [Quantity],
        ratios: &'static [Ratio],
    ) -> QuantitySet {
        QuantitySet {
            name,
            scored,
            auxiliary,
            ratios,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn scored(&self) -> &'static [Quantity] {
        self.scored
    }

    pub fn auxiliary(&self) -> &'static [Quantity] {
        self.auxiliary
    }

    pub fn ratios(&self) -> &'static [Ratio] {
        self.ratios
    }

    /// Every quantity a sample must supply: the scored ones, then the auxiliary ones
    pub fn required(&self) -> impl Iterator<Item = Quantity> {
        self.scored.iter().chain(self.auxiliary).copied()
    }
}

pub const CURCUMIN: Quantity = Quantity::new("Curcumin", "Curcumin (Assay)");
pub const DMC: Quantity = Quantity::new("DMC", "DMC (Assay)");
pub const BDMC: Quantity = Quantity::new("BDMC", "BDMC (Assay)");
pub const TOTAL_CURCUMINOIDS: Quantity =
    Quantity::new("Total_Curcuminoids", "Total Curcuminoids (Assay)");

pub const CURCUMIN_TO_DMC: Ratio = Ratio::new("Curcumin_to_DMC", CURCUMIN, DMC);
pub const CURCUMIN_TO_BDMC: Ratio = Ratio::new("Curcumin_to_BDMC", CURCUMIN, BDMC);
pub const DMC_TO_BDMC: Ratio = Ratio::new("DMC_to_BDMC", DMC, BDMC);
pub const CURCUMIN_TO_TOTAL: Ratio = Ratio::new("Curcumin_to_Total", CURCUMIN, TOTAL_CURCUMINOIDS);

const COMPONENT_SCHEMA: QuantitySet = QuantitySet::new(
    "components",
    &[CURCUMIN, DMC, BDMC],
    &[],
    &[CURCUMIN_TO_DMC, CURCUMIN_TO_BDMC, DMC_TO_BDMC],
);

const SERIALIZED_SCHEMA: QuantitySet = QuantitySet::new(
    "serialized",
    &[CURCUMIN, DMC, BDMC],
    &[],
    &[CURCUMIN_TO_DMC, CURCUMIN_TO_BDMC, DMC_TO_BDMC],
);

const TOTAL_CURCUMINOIDS_SCHEMA: QuantitySet = QuantitySet::new(
    "total-curcuminoids",
    &[CURCUMIN, DMC, BDMC],
    &[TOTAL_CURCUMINOIDS],
    &[
        CURCUMIN_TO_DMC,
        CURCUMIN_TO_BDMC,
        DMC_TO_BDMC,
        CURCUMIN_TO_TOTAL,
    ],
);

/// The reference datasets compiled into the crate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Curcumin, DMC and BDMC, batches identified by batch number
    Components,
    /// The same components, batches also carrying a serial number
    Serialized,
    /// The components plus a total curcuminoids assay, used as the denominator of
    /// `Curcumin_to_Total`
    TotalCurcuminoids,
}

impl Variant {
    pub const ALL: [Variant; 3] = [
        Variant::Components,
        Variant::Serialized,
        Variant::TotalCurcuminoids,
    ];

    pub fn quantity_set(self) -> QuantitySet {
        match self {
            Variant::Components => COMPONENT_SCHEMA,
            Variant::Serialized => SERIALIZED_SCHEMA,
            Variant::TotalCurcuminoids => TOTAL_CURCUMINOIDS_SCHEMA,
        }
    }

    pub fn name(self) -> &'static str {
        self.quantity_set().name()
    }

    fn table(self) -> &'static table::ReferenceTable {
        match self {
            Variant::Components => &table::COMPONENTS_TABLE,
            Variant::Serialized => &table::SERIALIZED_TABLE,
            Variant::TotalCurcuminoids => &table::TOTAL_CURCUMINOIDS_TABLE,
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Components
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("Unknown reference variant: {0}")]
pub struct UnknownVariant(pub String);

impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| UnknownVariant(s.to_owned()))
    }
}

fn build(variant: Variant) -> Result<ReferenceStatistics, ConfigurationError> {
    let population = load_population(variant)?;
    compute_statistics(&population)
}

lazy_static! {
    static ref COMPONENTS_STATS: Result<ReferenceStatistics, ConfigurationError> =
        build(Variant::Components);
    static ref SERIALIZED_STATS: Result<ReferenceStatistics, ConfigurationError> =
        build(Variant::Serialized);
    static ref TOTAL_CURCUMINOIDS_STATS: Result<ReferenceStatistics, ConfigurationError> =
        build(Variant::TotalCurcuminoids);
}

/// Returns the statistics of a built-in variant
///
/// The population is loaded and summarized the first time a variant is requested; later calls,
/// from any thread, share the same read-only statistics.
pub fn get_reference_statistics(
    variant: Variant,
) -> Result<&'static ReferenceStatistics, ConfigurationError> {
    let statistics: &'static Result<ReferenceStatistics, ConfigurationError> = match variant {
        Variant::Components => &*COMPONENTS_STATS,
        Variant::Serialized => &*SERIALIZED_STATS,
        Variant::TotalCurcuminoids => &*TOTAL_CURCUMINOIDS_STATS,
    };

    statistics.as_ref().map_err(Clone::clone)
}
