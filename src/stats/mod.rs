//! Descriptive statistics used to summarize the reference population.
//!
//! Only the univariate pieces survive here: a reference population is a set of independent
//! columns (one per quantity or ratio), each of which is summarized on its own.


pub mod univariate;

pub use self::univariate::Sample;

fn sum(xs: &[f64]) -> f64 {
    xs.iter().sum()
}
