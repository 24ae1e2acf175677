use std::collections::BTreeMap;
use std::iter::FromIterator;

/// Assay values of one test batch, keyed by quantity name
///
/// Values are percentages as reported by the lab; the sample only has to carry the quantities the
/// evaluated variant requires, extra keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Sample {
    values: BTreeMap<String, f64>,
}

impl Sample {
    pub fn new() -> Sample {
        Sample::default()
    }

    /// Builder form of [`Sample::insert`]
    pub fn with<S: Into<String>>(mut self, name: S, value: f64) -> Sample {
        self.insert(name, value);
        self
    }

    /// Sets the value of `name`, returning the previous one
    pub fn insert<S: Into<String>>(&mut self, name: S, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, &value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<S> FromIterator<(S, f64)> for Sample
where
    S: Into<String>,
{
    fn from_iter<I>(iter: I) -> Sample
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        Sample {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
