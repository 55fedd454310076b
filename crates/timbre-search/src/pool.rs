//! Candidate pool selection: genre and era filter, popularity cap, and the
//! fitted neighbor index over what remains.

use serde::{Deserialize, Serialize};
use timbre_core::{AudioFeatures, CatalogEntry, CatalogIndex, Genre, YearRange};

use crate::neighbors::NeighborIndex;

/// Most popular tracks kept per pool.
pub const POOL_LIMIT: usize = 500;

/// A ranked track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub uri: String,
    pub features: AudioFeatures,
    /// Euclidean distance to the query target.
    pub distance: f64,
    pub popularity: f64,
    pub release_year: i32,
}

/// The tracks eligible for one (genre, year range) pair.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    members: Vec<CatalogEntry>,
    neighbors: NeighborIndex,
}

impl CandidatePool {
    /// Filter `index` to `genre` within `years`, keep the [`POOL_LIMIT`]
    /// most popular entries and fit the neighbor index over them.
    ///
    /// Equal popularity keeps catalog order.
    #[must_use]
    pub fn select(index: &CatalogIndex, genre: Genre, years: YearRange) -> Self {
        let label = genre.catalog_label();
        let mut members: Vec<CatalogEntry> = index
            .entries_for_genre(&label)
            .filter(|entry| years.contains(entry.release_year))
            .cloned()
            .collect();
        let matched = members.len();

        members.sort_by(|a, b| b.popularity.total_cmp(&a.popularity));
        members.truncate(POOL_LIMIT);

        log::debug!(
            "Candidate pool for {} {}: {} matched, {} kept",
            genre,
            years,
            matched,
            members.len()
        );

        let neighbors = NeighborIndex::fit(members.iter().map(|entry| entry.features).collect());
        Self { members, neighbors }
    }

    /// Every pool member ordered by distance to `target`, nearest first.
    #[must_use]
    pub fn rank(&self, target: &AudioFeatures) -> Vec<Recommendation> {
        self.neighbors
            .kneighbors(target, self.members.len())
            .into_iter()
            .map(|neighbor| {
                let entry = &self.members[neighbor.index];
                Recommendation {
                    uri: entry.uri.clone(),
                    features: entry.features,
                    distance: neighbor.distance,
                    popularity: entry.popularity,
                    release_year: entry.release_year,
                }
            })
            .collect()
    }

    /// Pool members in popularity order.
    #[must_use]
    pub fn members(&self) -> &[CatalogEntry] {
        &self.members
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
