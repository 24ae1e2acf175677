//! Natural-variation conformity checks for curcuminoid assays.
//!
//! A test batch conforms when every assay value, and every ratio between assay values, lies within
//! a z-score threshold of a fixed population of historical reference batches.
//!
//! ```
//! use assay_conformity::{evaluate, get_reference_statistics, Sample, Variant, Verdict};
//!
//! let statistics = get_reference_statistics(Variant::Components).unwrap();
//!
//! let sample = Sample::new()
//!     .with("Curcumin", 90.0)
//!     .with("DMC", 16.4)
//!     .with("BDMC", 2.7);
//! let result = evaluate(&sample, statistics).unwrap();
//!
//! assert_eq!(result.verdict(), Verdict::Outlier);
//! assert!(result.is_flagged("Curcumin"));
//! ```

#![warn(missing_debug_implementations)]
#![allow(clippy::float_cmp)]

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate serde_derive;

#[macro_use]
mod macros_private;

pub mod cli;
pub mod conformity;
#[cfg(feature = "csv_output")]
mod csv_report;
mod error;
mod format;
pub mod reference;
pub mod report;
mod stats;

pub use crate::conformity::{
    evaluate, Checker, ConformityResult, Flag, Sample, Verdict, ZScores, DEFAULT_THRESHOLD,
};
#[cfg(feature = "csv_output")]
pub use crate::csv_report::FileCsvReport;
pub use crate::error::{ConfigurationError, Error, InputError, Result};
pub use crate::reference::{get_reference_statistics, ReferenceStatistics, Summary, Variant};
