use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of audio feature axes.
pub const FEATURE_COUNT: usize = 6;

/// Axis names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "valence",
    "tempo",
];

/// Upper bound for a target tempo, in BPM.
pub const MAX_TEMPO: f64 = 244.0;

/// Inclusive domain of each axis for query targets.
pub const FEATURE_DOMAINS: [(f64, f64); FEATURE_COUNT] = [
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, 1.0),
    (0.0, MAX_TEMPO),
];

/// A point in the six-dimensional audio feature space.
///
/// The fixed axis order is the one listed in [`FEATURE_NAMES`]; every
/// conversion to and from arrays uses it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub acousticness: f64,
    pub danceability: f64,
    pub energy: f64,
    pub instrumentalness: f64,
    pub valence: f64,
    /// Beats per minute.
    pub tempo: f64,
}

impl AudioFeatures {
    #[must_use]
    pub const fn new(
        acousticness: f64,
        danceability: f64,
        energy: f64,
        instrumentalness: f64,
        valence: f64,
        tempo: f64,
    ) -> Self {
        Self {
            acousticness,
            danceability,
            energy,
            instrumentalness,
            valence,
            tempo,
        }
    }

    #[must_use]
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [acousticness, danceability, energy, instrumentalness, valence, tempo] = values;
        Self::new(
            acousticness,
            danceability,
            energy,
            instrumentalness,
            valence,
            tempo,
        )
    }

    #[must_use]
    pub const fn as_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.acousticness,
            self.danceability,
            self.energy,
            self.instrumentalness,
            self.valence,
            self.tempo,
        ]
    }

    /// Euclidean distance over all six axes, unscaled.
    #[must_use]
    pub fn euclidean_distance(&self, other: &Self) -> f64 {
        self.as_array()
            .iter()
            .zip(other.as_array().iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite())
    }

    /// Check that every axis is finite and inside its query domain.
    ///
    /// # Errors
    /// Returns [`Error::InvalidRange`] naming the first offending axis.
    pub fn validate_target(&self) -> Result<()> {
        for ((name, value), (low, high)) in FEATURE_NAMES
            .iter()
            .zip(self.as_array())
            .zip(FEATURE_DOMAINS)
        {
            if !value.is_finite() || value < low || value > high {
                return Err(Error::InvalidRange(format!(
                    "{name} must be within [{low}, {high}], got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<&[f64]> for AudioFeatures {
    type Error = Error;

    fn try_from(values: &[f64]) -> Result<Self> {
        let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| {
            Error::InvalidRange(format!(
                "feature vector must have {FEATURE_COUNT} values, got {}",
                values.len()
            ))
        })?;
        Ok(Self::from_array(array))
    }
}
