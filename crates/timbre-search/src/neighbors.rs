//! Exact Euclidean nearest-neighbor search.

use timbre_core::AudioFeatures;

/// One search hit: position in the fitted point set and its distance to
/// the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub distance: f64,
}

/// Brute-force nearest-neighbor index over audio feature vectors, using
/// [`AudioFeatures::euclidean_distance`] as the metric.
///
/// Candidate pools are capped at a few hundred points, so an exhaustive
/// scan is both exact and cheap. Equal distances keep fit order.
#[derive(Debug, Clone, Default)]
pub struct NeighborIndex {
    points: Vec<AudioFeatures>,
}

impl NeighborIndex {
    #[must_use]
    pub fn fit(points: Vec<AudioFeatures>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The `k` points closest to `target`, nearest first.
    #[must_use]
    pub fn kneighbors(&self, target: &AudioFeatures, k: usize) -> Vec<Neighbor> {
        let mut neighbors: Vec<Neighbor> = self
            .points
            .iter()
            .enumerate()
            .map(|(index, point)| Neighbor {
                index,
                distance: point.euclidean_distance(target),
            })
            .collect();
        // stable: ties stay in fit order
        neighbors.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        neighbors.truncate(k);
        neighbors
    }
}
