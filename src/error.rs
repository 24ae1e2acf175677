use std::io;

use thiserror::Error;

/// The reference population cannot produce usable statistics.
///
/// The reference tables are compiled into the crate, so any of these is a build-time defect. No
/// evaluation may run against a population that failed with one of these.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigurationError {
    #[error("Reference population `{schema}` has {rows} row(s); at least 2 are required to estimate a standard deviation")]
    TooFewRows { schema: &'static str, rows: usize },

    #[error("Reference batch {batch} has no `{quantity}` value")]
    MissingColumn { batch: String, quantity: &'static str },

    #[error("Reference batch {batch} has a non-finite `{quantity}` value")]
    InvalidValue { batch: String, quantity: &'static str },

    #[error("Reference batch {batch} has a zero denominator for `{ratio}`")]
    ZeroDenominator { batch: String, ratio: &'static str },

    #[error("`{name}` has no spread across the reference population; its z-score is undefined")]
    ZeroSpread { name: &'static str },
}

/// A sample that cannot be evaluated.
///
/// These are per-call validation failures: the caller reports them and asks for corrected input.
/// They are never turned into a conformity verdict.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("missing required value for `{quantity}`")]
    MissingField { quantity: &'static str },

    #[error("`{denominator}` is zero, so `{ratio}` is undefined")]
    ZeroDenominator {
        ratio: &'static str,
        denominator: &'static str,
    },

    #[error("`{quantity}` must be a finite number, got {value}")]
    NonFinite { quantity: &'static str, value: f64 },

    #[error("`{denominator}` is too small, so `{ratio}` is not a finite number")]
    RatioOverflow {
        ratio: &'static str,
        denominator: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Cannot evaluate sample: {0}")]
    Input(#[from] InputError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "csv_output")]
    #[error("Failed to write CSV report: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = ::std::result::Result<T, Error>;
