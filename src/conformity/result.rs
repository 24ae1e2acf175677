use std::fmt;

use serde::{Serialize, Serializer};

/// Outcome of a conformity check
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Every quantity and ratio lies within the threshold
    Conforms,
    /// At least one quantity or ratio lies beyond the threshold
    Outlier,
}

impl Verdict {
    pub fn is_conforming(self) -> bool {
        matches!(self, Verdict::Conforms)
    }

    pub fn description(self) -> &'static str {
        match self {
            Verdict::Conforms => "Conforms to natural variation",
            Verdict::Outlier => "Outlier - Does not conform to natural variation",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.description())
    }
}

/// Z-scores keyed by quantity or ratio name, in evaluation order
///
/// Scored quantities come first, then ratios, both in the order the quantity set declares them.
/// Values are kept unrounded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZScores(Vec<(&'static str, f64)>);

impl ZScores {
    pub(crate) fn push(&mut self, name: &'static str, z_score: f64) {
        self.0.push((name, z_score));
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0
            .iter()
            .find(|&&(n, _)| n == name)
            .map(|&(_, z_score)| z_score)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ZScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// A quantity or ratio whose z-score magnitude exceeds the threshold
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Flag {
    pub name: &'static str,
    pub z_score: f64,
}

impl Flag {
    /// Checks if the sample lies above the reference mean
    pub fn is_high(&self) -> bool {
        self.z_score > 0.
    }

    /// Checks if the sample lies below the reference mean
    pub fn is_low(&self) -> bool {
        self.z_score < 0.
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (Z-score: {:.2})", self.name, self.z_score)
    }
}

/// Verdict, z-scores and flags produced for one sample
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConformityResult {
    verdict: Verdict,
    z_scores: ZScores,
    flagged: Vec<Flag>,
    threshold: f64,
}

impl ConformityResult {
    pub(super) fn new(threshold: f64, z_scores: ZScores) -> ConformityResult {
        let flagged = z_scores
            .iter()
            .filter(|&(_, z_score)| z_score.abs() > threshold)
            .map(|(name, z_score)| Flag { name, z_score })
            .collect::<Vec<_>>();
        let verdict = if flagged.is_empty() {
            Verdict::Conforms
        } else {
            Verdict::Outlier
        };

        ConformityResult {
            verdict,
            z_scores,
            flagged,
            threshold,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    pub fn is_conforming(&self) -> bool {
        self.verdict.is_conforming()
    }

    pub fn z_scores(&self) -> &ZScores {
        &self.z_scores
    }

    /// Flagged quantities and ratios, in z-score order
    pub fn flagged(&self) -> &[Flag] {
        &self.flagged
    }

    pub fn is_flagged(&self, name: &str) -> bool {
        self.flagged.iter().any(|flag| flag.name == name)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
