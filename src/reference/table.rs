//! Literal reference tables, one per variant
//!
//! Values are assay percentages (w/w). Tables are column-oriented: every column has one value per
//! entry of `batches`, in the same order.
//!
//! All variants share the same ten historical batches. The serialized variant numbers them 1 to
//! 10 in table order. The total curcuminoids column is not a separate measurement: it is
//! Curcumin + DMC + BDMC of each batch, rounded to the two decimals of the assays.

use super::{Quantity, BDMC, CURCUMIN, DMC, TOTAL_CURCUMINOIDS};

pub(crate) struct ReferenceTable {
    pub batches: &'static [&'static str],
    pub serials: Option<&'static [u32]>,
    pub columns: &'static [(Quantity, &'static [f64])],
}

const BATCHES: &[&str] = &[
    "J200392", "J200526", "J200531", "J200552", "J200601", "J200602", "J200626", "J210013",
    "J210024", "J210117",
];

const SERIALS: &[u32] = &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

const CURCUMIN_ASSAY: &[f64] = &[
    75.74, 75.26, 75.32, 75.96, 75.49, 75.27, 76.26, 75.03, 75.17, 79.88,
];

const DMC_ASSAY: &[f64] = &[
    16.12, 16.4, 16.3, 15.9, 16.37, 16.94, 16.51, 16.88, 16.9, 15.18,
];

const BDMC_ASSAY: &[f64] = &[2.67, 2.74, 2.71, 2.6, 2.84, 2.75, 2.55, 2.5, 2.56, 2.93];

// Curcumin + DMC + BDMC
const TOTAL_ASSAY: &[f64] = &[
    94.53, 94.4, 94.33, 94.46, 94.7, 94.96, 95.32, 94.41, 94.63, 97.99,
];

pub(crate) const COMPONENTS_TABLE: ReferenceTable = ReferenceTable {
    batches: BATCHES,
    serials: None,
    columns: &[
        (CURCUMIN, CURCUMIN_ASSAY),
        (DMC, DMC_ASSAY),
        (BDMC, BDMC_ASSAY),
    ],
};

pub(crate) const SERIALIZED_TABLE: ReferenceTable = ReferenceTable {
    batches: BATCHES,
    serials: Some(SERIALS),
    columns: &[
        (CURCUMIN, CURCUMIN_ASSAY),
        (DMC, DMC_ASSAY),
        (BDMC, BDMC_ASSAY),
    ],
};

pub(crate) const TOTAL_CURCUMINOIDS_TABLE: ReferenceTable = ReferenceTable {
    batches: BATCHES,
    serials: None,
    columns: &[
        (CURCUMIN, CURCUMIN_ASSAY),
        (DMC, DMC_ASSAY),
        (BDMC, BDMC_ASSAY),
        (TOTAL_CURCUMINOIDS, TOTAL_ASSAY),
    ],
};
