//! The immutable, genre-exploded track catalog.

pub mod load;
pub mod row;

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{AudioFeatures, Track};

pub use load::REQUIRED_COLUMNS;
pub use row::{parse_genre_list, RawTrackRow};

/// One (track, genre) membership.
///
/// A track with N genres yields N entries, each carrying the same uri,
/// year, popularity and features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Lower-cased genre label.
    pub genre: String,
    pub uri: String,
    pub release_year: i32,
    pub popularity: f64,
    pub features: AudioFeatures,
}

/// Counters collected while building a [`CatalogIndex`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    /// Rows offered to the build, including skipped ones.
    pub rows_read: usize,
    /// Rows dropped because they could not be parsed.
    pub rows_skipped: usize,
    /// Tracks accepted.
    pub tracks: usize,
    /// (track, genre) entries after exploding.
    pub entries: usize,
}

/// The exploded track table that queries run against.
///
/// Built once, never mutated afterwards. Malformed rows are skipped,
/// logged and counted in [`BuildStats::rows_skipped`] rather than failing
/// the whole build.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    entries: Vec<CatalogEntry>,
    by_genre: HashMap<String, Vec<usize>>,
    stats: BuildStats,
}

impl CatalogIndex {
    /// Load and explode a catalog CSV file.
    ///
    /// # Errors
    /// Fails if the file cannot be read or lacks a required column.
    pub fn load(path: &Path) -> Result<Self> {
        log::info!("Loading catalog from {}", path.display());
        let file = File::open(path)?;
        let index = Self::from_reader(io::BufReader::new(file))?;
        log::info!(
            "Catalog loaded: {} tracks, {} entries, {} rows skipped",
            index.stats.tracks,
            index.stats.entries,
            index.stats.rows_skipped
        );
        Ok(index)
    }

    /// Build from CSV text with a header row.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        let mut builder = CatalogBuilder::default();
        for row in load::read_rows(reader)? {
            match row {
                Ok(row) => builder.push_row(row),
                Err(err @ Error::DataFormat { .. }) => builder.skip(&err),
                Err(err) => return Err(err),
            }
        }
        Ok(builder.finish())
    }

    /// Build from rows that are already split into fields.
    #[must_use]
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = RawTrackRow>,
    {
        let mut builder = CatalogBuilder::default();
        for row in rows {
            builder.push_row(row);
        }
        builder.finish()
    }

    /// Build from parsed tracks.
    ///
    /// Tracks go through the same checks as parsed rows: one without a
    /// genre, or with non-finite popularity or features, is skipped and
    /// counted. Its 1-based position stands in for the line number.
    #[must_use]
    pub fn from_tracks<I>(tracks: I) -> Self
    where
        I: IntoIterator<Item = Track>,
    {
        let mut builder = CatalogBuilder::default();
        for track in tracks {
            builder.stats.rows_read += 1;
            let position = builder.stats.rows_read as u64;
            match track.check(position) {
                Ok(()) => builder.push_track(track),
                Err(err) => builder.count_skipped(&err),
            }
        }
        builder.finish()
    }

    /// All entries, in catalog order.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries whose genre equals `label` (already lower-cased), in catalog
    /// order.
    pub fn entries_for_genre<'a>(
        &'a self,
        label: &str,
    ) -> impl Iterator<Item = &'a CatalogEntry> + 'a {
        let entries = &self.entries;
        self.by_genre
            .get(label)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&position| &entries[position])
    }

    /// Number of entries per genre label, sorted by label.
    #[must_use]
    pub fn genre_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = self
            .by_genre
            .iter()
            .map(|(label, positions)| (label.as_str(), positions.len()))
            .collect();
        counts.sort_unstable_by(|a, b| a.0.cmp(b.0));
        counts
    }

    #[must_use]
    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
struct CatalogBuilder {
    entries: Vec<CatalogEntry>,
    by_genre: HashMap<String, Vec<usize>>,
    stats: BuildStats,
}

impl CatalogBuilder {
    fn push_row(&mut self, row: RawTrackRow) {
        self.stats.rows_read += 1;
        match row.into_track() {
            Ok(track) => self.push_track(track),
            Err(err) => self.count_skipped(&err),
        }
    }

    // A row the reader could not even split into fields.
    fn skip(&mut self, err: &Error) {
        self.stats.rows_read += 1;
        self.count_skipped(err);
    }

    fn count_skipped(&mut self, err: &Error) {
        log::warn!("Skipping catalog row: {}", err);
        self.stats.rows_skipped += 1;
    }

    fn push_track(&mut self, track: Track) {
        self.stats.tracks += 1;
        for genre in &track.genres {
            self.by_genre
                .entry(genre.clone())
                .or_default()
                .push(self.entries.len());
            self.entries.push(CatalogEntry {
                genre: genre.clone(),
                uri: track.uri.clone(),
                release_year: track.release_year,
                popularity: track.popularity,
                features: track.features,
            });
        }
    }

    fn finish(mut self) -> CatalogIndex {
        self.stats.entries = self.entries.len();
        log::debug!(
            "Built catalog index: {} entries across {} genres",
            self.stats.entries,
            self.by_genre.len()
        );
        CatalogIndex {
            entries: self.entries,
            by_genre: self.by_genre,
            stats: self.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(uri: &str, genres: &str, year: &str) -> RawTrackRow {
        RawTrackRow {
            line: 0,
            uri: uri.to_string(),
            genres: genres.to_string(),
            release_year: year.to_string(),
            popularity: "10".to_string(),
            acousticness: "0.1".to_string(),
            danceability: "0.2".to_string(),
            energy: "0.3".to_string(),
            instrumentalness: "0.4".to_string(),
            valence: "0.5".to_string(),
            tempo: "110".to_string(),
        }
    }

    #[test]
    fn test_explode_one_entry_per_genre() {
        let index = CatalogIndex::from_rows(vec![raw("t1", "['pop', 'rock']", "2015")]);

        assert_eq!(index.len(), 2);
        let pop: Vec<&CatalogEntry> = index.entries_for_genre("pop").collect();
        let rock: Vec<&CatalogEntry> = index.entries_for_genre("rock").collect();
        assert_eq!(pop.len(), 1);
        assert_eq!(rock.len(), 1);
        assert_eq!(pop[0].uri, rock[0].uri);
        assert_eq!(pop[0].features, rock[0].features);
        assert_eq!(pop[0].release_year, 2015);
        assert_eq!(rock[0].release_year, 2015);
    }

    #[test]
    fn test_malformed_rows_skipped_and_counted() {
        let index = CatalogIndex::from_rows(vec![
            raw("t1", "['pop']", "2015"),
            raw("t2", "[]", "2015"),
            raw("t3", "['jazz']", "soon"),
            raw("t4", "['jazz']", "1999"),
        ]);

        let stats = index.stats();
        assert_eq!(stats.rows_read, 4);
        assert_eq!(stats.rows_skipped, 2);
        assert_eq!(stats.tracks, 2);
        assert_eq!(stats.entries, 2);
    }

    #[test]
    fn test_unknown_genre_label_is_empty() {
        let index = CatalogIndex::from_rows(vec![raw("t1", "['pop']", "2015")]);
        assert_eq!(index.entries_for_genre("polka").count(), 0);
    }

    #[test]
    fn test_genre_counts_sorted() {
        let index = CatalogIndex::from_rows(vec![
            raw("t1", "['rock', 'pop']", "2015"),
            raw("t2", "['pop']", "2016"),
        ]);
        assert_eq!(index.genre_counts(), vec![("pop", 2), ("rock", 1)]);
    }

    #[test]
    fn test_from_tracks() {
        let track = Track::new("t1", 2001, 5.0, AudioFeatures::from_array([0.0; 6]))
            .with_genre("Latin");
        let index = CatalogIndex::from_tracks(vec![track]);
        assert_eq!(index.entries()[0].genre, "latin");
        assert_eq!(index.stats().tracks, 1);
    }

    #[test]
    fn test_from_tracks_skips_genreless_track() {
        let track = Track::new("t1", 2015, 1.0, AudioFeatures::from_array([0.0; 6]));
        let index = CatalogIndex::from_tracks(vec![track]);

        let stats = index.stats();
        assert_eq!(stats.rows_read, 1);
        assert_eq!(stats.rows_skipped, 1);
        assert_eq!(stats.tracks, 0);
        assert!(index.is_empty());
    }

    #[test]
    fn test_from_tracks_skips_non_finite_values() {
        let features = AudioFeatures::from_array([0.5; 6]);
        let mut nan_features = features;
        nan_features.valence = f64::NAN;
        let index = CatalogIndex::from_tracks(vec![
            Track::new("a", 2015, 1.0, features).with_genre("pop"),
            Track::new("nan", 2015, f64::NAN, features).with_genre("pop"),
            Track::new("inf", 2015, f64::INFINITY, features).with_genre("pop"),
            Track::new("nan-valence", 2015, 3.0, nan_features).with_genre("pop"),
            Track::new("b", 2015, 2.0, features).with_genre("pop"),
        ]);

        let stats = index.stats();
        assert_eq!(stats.rows_read, 5);
        assert_eq!(stats.rows_skipped, 3);
        assert_eq!(stats.tracks, 2);
        let uris: Vec<&str> = index
            .entries_for_genre("pop")
            .map(|entry| entry.uri.as_str())
            .collect();
        assert_eq!(uris, vec!["a", "b"]);
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CatalogIndex>();
    }
}
