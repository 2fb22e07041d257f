//! Monster record and feature vector definitions.
//!
//! A [`Monster`] is a flat document. Seven numeric attributes double as the
//! coordinates of its [`FeatureVector`]; everything else is carried through
//! untouched so records round-trip through the store unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Number of components in a [`FeatureVector`].
pub const VECTOR_DIMENSION: usize = 7;

/// Stat fields in vector component order. Distances are only comparable across
/// the collection while this order stays fixed.
pub const VECTOR_FIELDS: [&str; VECTOR_DIMENSION] = [
    "hit_points",
    "strength",
    "dexterity",
    "constitution",
    "intelligence",
    "wisdom",
    "charisma",
];

/// Errors raised while deriving data from a record.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("monster {name:?}: field {field} is not a finite number")]
    InvalidStat { name: String, field: &'static str },
}

/// A monster document as stored in the collection.
///
/// Only `name` and the seven vector stats are typed. Every other attribute,
/// `_id` included, lives in [`Monster::extra`] and is written back exactly as
/// it was read, whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Display name; the exact-match lookup key.
    pub name: String,

    pub hit_points: Number,
    pub strength: Number,
    pub dexterity: Number,
    pub constitution: Number,
    pub intelligence: Number,
    pub wisdom: Number,
    pub charisma: Number,

    /// Vector attached for similarity search.
    #[serde(rename = "$vector", default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f64>>,
    /// Similarity score returned by nearest-neighbor queries.
    #[serde(rename = "$similarity", default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,

    /// Everything else (`_id`, size, alignment, skill proficiencies...), passed through as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Monster {
    /// Store-assigned document ID, if the record has one.
    pub fn id(&self) -> Option<&Value> {
        self.extra.get("_id")
    }

    /// A passthrough attribute by name, e.g. `"size"` or `"challenge_rating"`.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// This record without the store-managed `$vector` field.
    pub fn without_vector(mut self) -> Self {
        self.vector = None;
        self
    }

    /// The seven vector stats, in [`VECTOR_FIELDS`] order.
    pub fn stats(&self) -> [(&'static str, &Number); VECTOR_DIMENSION] {
        [
            (VECTOR_FIELDS[0], &self.hit_points),
            (VECTOR_FIELDS[1], &self.strength),
            (VECTOR_FIELDS[2], &self.dexterity),
            (VECTOR_FIELDS[3], &self.constitution),
            (VECTOR_FIELDS[4], &self.intelligence),
            (VECTOR_FIELDS[5], &self.wisdom),
            (VECTOR_FIELDS[6], &self.charisma),
        ]
    }

    /// Derive the feature vector from this record's stats.
    pub fn feature_vector(&self) -> Result<FeatureVector, RecordError> {
        FeatureVector::from_monster(self)
    }

    /// The vector to search with: the stored one when it has the right shape,
    /// otherwise one derived from the stats.
    pub fn search_vector(&self) -> Result<FeatureVector, RecordError> {
        match self.vector.as_deref() {
            Some(stored) if stored.len() == VECTOR_DIMENSION => {
                let mut components = [0.0; VECTOR_DIMENSION];
                components.copy_from_slice(stored);
                Ok(FeatureVector(components))
            }
            _ => self.feature_vector(),
        }
    }

    /// Return a copy with `$vector` set from the stats, ready for insertion.
    pub fn with_vector(mut self) -> Result<Self, RecordError> {
        let vector = self.feature_vector()?;
        self.vector = Some(vector.to_vec());
        Ok(self)
    }
}

/// Fixed-length coordinates of a monster in stat space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; VECTOR_DIMENSION]);

impl FeatureVector {
    pub fn from_monster(monster: &Monster) -> Result<Self, RecordError> {
        let mut components = [0.0; VECTOR_DIMENSION];
        for (slot, (field, value)) in components.iter_mut().zip(monster.stats()) {
            *slot = value
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| RecordError::InvalidStat {
                    name: monster.name.clone(),
                    field,
                })?;
        }
        Ok(Self(components))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// Euclidean distance, the metric the collection is created with.
    pub fn distance(&self, other: &FeatureVector) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
