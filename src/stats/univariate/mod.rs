//! Univariate analysis

mod sample;

pub use self::sample::Sample;
