//! The finished, ordered feature vector handed to the classifier.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use super::signal::{Evaluation, Feature, Signal};

/// Ordered map of all 30 features to their signal.
///
/// Always complete: [`FeatureVector::from_evaluations`] substitutes the
/// declared fallback for any feature the input does not cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureVector {
    entries: BTreeMap<Feature, Evaluation>,
}

impl FeatureVector {
    pub fn from_evaluations(evaluations: impl IntoIterator<Item = (Feature, Evaluation)>) -> Self {
        let mut entries: BTreeMap<Feature, Evaluation> = evaluations.into_iter().collect();
        for feature in Feature::ALL {
            entries.entry(*feature).or_insert_with(|| {
                tracing::warn!(feature = feature.name(), "no evaluation; using fallback");
                feature.fell_back()
            });
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, feature: Feature) -> Signal {
        self.entries
            .get(&feature)
            .map(|e| e.signal())
            .unwrap_or_else(|| feature.fallback())
    }

    pub fn evaluation(&self, feature: Feature) -> Option<Evaluation> {
        self.entries.get(&feature).copied()
    }

    /// (feature, signal) pairs in model order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, Signal)> + '_ {
        self.entries.iter().map(|(f, e)| (*f, e.signal()))
    }

    /// Integer values in model order.
    pub fn values(&self) -> Vec<i8> {
        self.iter().map(|(_, s)| s.value()).collect()
    }

    /// Features whose value is a fallback rather than computed data.
    pub fn fallbacks(&self) -> Vec<Feature> {
        self.entries
            .iter()
            .filter(|(_, e)| e.is_fallback())
            .map(|(f, _)| *f)
            .collect()
    }

    /// Feature names in model order; column headers for [`Self::values`].
    pub fn names() -> Vec<&'static str> {
        Feature::ALL.iter().map(|f| f.name()).collect()
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        let mut map = s.serialize_map(Some(self.entries.len()))?;
        for (feature, signal) in self.iter() {
            map.serialize_entry(feature.name(), &signal)?;
        }
        map.end()
    }
}
