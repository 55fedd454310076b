use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::features::AudioFeatures;

/// A track with its genre memberships and precomputed audio features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Opaque identifier (e.g. `spotify:track:...`).
    pub uri: String,

    /// Lower-cased genre labels, deduplicated, in source order.
    pub genres: Vec<String>,

    pub release_year: i32,

    /// Higher is more popular.
    pub popularity: f64,

    pub features: AudioFeatures,
}

impl Track {
    #[must_use]
    pub fn new(
        uri: impl Into<String>,
        release_year: i32,
        popularity: f64,
        features: AudioFeatures,
    ) -> Self {
        Self {
            uri: uri.into(),
            genres: Vec::new(),
            release_year,
            popularity,
            features,
        }
    }

    /// Add a genre label, normalizing it to lower case and ignoring
    /// duplicates.
    #[must_use]
    pub fn with_genre(mut self, genre: impl AsRef<str>) -> Self {
        let label = genre.as_ref().trim().to_lowercase();
        if !label.is_empty() && !self.genres.contains(&label) {
            self.genres.push(label);
        }
        self
    }

    /// Check that the track can enter a catalog: a uri, at least one genre,
    /// and finite popularity and features. `line` locates it in its source.
    pub(crate) fn check(&self, line: u64) -> Result<()> {
        if self.uri.trim().is_empty() {
            return Err(Error::data_format(line, "missing uri"));
        }
        if self.genres.is_empty() {
            return Err(Error::data_format(line, format!("{} has no genre", self.uri)));
        }
        if !self.popularity.is_finite() {
            return Err(Error::data_format(
                line,
                format!("{} has non-finite popularity {}", self.uri, self.popularity),
            ));
        }
        if !self.features.is_finite() {
            return Err(Error::data_format(
                line,
                format!("{} has non-finite audio features", self.uri),
            ));
        }
        Ok(())
    }
}
