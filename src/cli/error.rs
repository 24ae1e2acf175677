use thiserror::Error;

use super::types::TypeParseError;
use crate::reference::UnknownVariant;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    DisplayHelp(String),

    #[error("Signals that the version was displayed")]
    DisplayVersion,

    #[error("{0}")]
    Clap(clap::Error),

    #[error("Invalid value for --{flag}: {value}")]
    InvalidNumber { flag: &'static str, value: String },

    #[error("--{flag} must be a percentage between 0 and 100, got {value}")]
    OutOfRange { flag: &'static str, value: f64 },

    #[error("Threshold must be a positive, finite number, got {0}")]
    InvalidThreshold(String),

    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    #[error(transparent)]
    InvalidType(#[from] TypeParseError),
}
