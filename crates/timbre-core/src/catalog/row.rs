//! Raw catalog rows and their conversion into [`Track`]s.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{AudioFeatures, Track};

/// One catalog row as text, before any parsing.
///
/// `genres` holds a serialized list such as `"['pop', 'dance pop']"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTrackRow {
    /// Source line, used in error messages. Zero when unknown.
    #[serde(default)]
    pub line: u64,
    pub uri: String,
    pub genres: String,
    pub release_year: String,
    pub popularity: String,
    pub acousticness: String,
    pub danceability: String,
    pub energy: String,
    pub instrumentalness: String,
    pub valence: String,
    pub tempo: String,
}

impl RawTrackRow {
    /// Parse the row into a [`Track`].
    ///
    /// # Errors
    /// Returns [`Error::DataFormat`] when the uri is blank, the genre list
    /// holds no genre, or a numeric field is missing, non-numeric or not
    /// finite.
    pub fn into_track(self) -> Result<Track> {
        let line = self.line;
        let uri = self.uri.trim();
        if uri.is_empty() {
            return Err(Error::data_format(line, "missing uri"));
        }

        let genres = parse_genre_list(&self.genres);
        if genres.is_empty() {
            return Err(Error::data_format(
                line,
                format!("no genre found in {:?}", self.genres),
            ));
        }

        let release_year = parse_year(line, &self.release_year)?;
        let popularity = parse_number(line, "popularity", &self.popularity)?;
        let features = AudioFeatures::new(
            parse_number(line, "acousticness", &self.acousticness)?,
            parse_number(line, "danceability", &self.danceability)?,
            parse_number(line, "energy", &self.energy)?,
            parse_number(line, "instrumentalness", &self.instrumentalness)?,
            parse_number(line, "valence", &self.valence)?,
            parse_number(line, "tempo", &self.tempo)?,
        );

        let track = genres
            .iter()
            .fold(Track::new(uri, release_year, popularity, features), |track, genre| {
                track.with_genre(genre)
            });
        track.check(line)?;
        Ok(track)
    }
}

/// Split a serialized genre list into lower-cased labels.
///
/// Accepts bracketed, quoted, comma-separated text (`['pop', "r&b"]`) as well
/// as a bare comma-separated list. Blank items and duplicates are dropped.
#[must_use]
pub fn parse_genre_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed.strip_prefix('[').unwrap_or(trimmed);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut genres: Vec<String> = Vec::new();
    for item in inner.split(',') {
        let label = strip_quotes(item.trim()).trim().to_lowercase();
        if !label.is_empty() && !genres.contains(&label) {
            genres.push(label);
        }
    }
    genres
}

fn strip_quotes(item: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = item
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    item
}

fn parse_number(line: u64, field: &str, value: &str) -> Result<f64> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::data_format(line, format!("missing {field}")));
    }
    let number: f64 = value
        .parse()
        .map_err(|_| Error::data_format(line, format!("{field} is not numeric: {value:?}")))?;
    if !number.is_finite() {
        return Err(Error::data_format(
            line,
            format!("{field} is not finite: {value:?}"),
        ));
    }
    Ok(number)
}

// Exported tables sometimes carry years as floats ("2015.0").
fn parse_year(line: u64, value: &str) -> Result<i32> {
    if let Ok(year) = value.trim().parse::<i32>() {
        return Ok(year);
    }
    let number = parse_number(line, "release_year", value)?;
    if number.fract().abs() > 0.0
        || number < f64::from(i32::MIN)
        || number > f64::from(i32::MAX)
    {
        return Err(Error::data_format(
            line,
            format!("release_year is not a whole year: {value:?}"),
        ));
    }
    Ok(number as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(genres: &str) -> RawTrackRow {
        RawTrackRow {
            line: 2,
            uri: "spotify:track:abc".to_string(),
            genres: genres.to_string(),
            release_year: "2015".to_string(),
            popularity: "64".to_string(),
            acousticness: "0.12".to_string(),
            danceability: "0.8".to_string(),
            energy: "0.7".to_string(),
            instrumentalness: "0.0".to_string(),
            valence: "0.55".to_string(),
            tempo: "121.5".to_string(),
        }
    }

    #[test]
    fn test_parse_python_style_list() {
        assert_eq!(
            parse_genre_list("['pop', 'dance pop']"),
            vec!["pop".to_string(), "dance pop".to_string()]
        );
    }

    #[test]
    fn test_parse_mixed_quotes_and_case() {
        assert_eq!(
            parse_genre_list(r#"["children's music", 'K-Pop']"#),
            vec!["children's music".to_string(), "k-pop".to_string()]
        );
    }

    #[test]
    fn test_parse_bare_list_and_duplicates() {
        assert_eq!(
            parse_genre_list("rock, Rock ,  jazz"),
            vec!["rock".to_string(), "jazz".to_string()]
        );
    }

    #[test]
    fn test_parse_empty_list() {
        assert!(parse_genre_list("[]").is_empty());
        assert!(parse_genre_list("").is_empty());
        assert!(parse_genre_list("['', '']").is_empty());
    }

    #[test]
    fn test_into_track() {
        let track = row("['pop', 'rock']").into_track().unwrap();
        assert_eq!(track.uri, "spotify:track:abc");
        assert_eq!(track.genres, vec!["pop".to_string(), "rock".to_string()]);
        assert_eq!(track.release_year, 2015);
        assert!((track.popularity - 64.0).abs() < f64::EPSILON);
        assert!((track.features.tempo - 121.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_float_year_accepted() {
        let mut raw = row("['pop']");
        raw.release_year = "2015.0".to_string();
        assert_eq!(raw.into_track().unwrap().release_year, 2015);
    }

    #[test]
    fn test_fractional_year_rejected() {
        let mut raw = row("['pop']");
        raw.release_year = "2015.5".to_string();
        assert!(matches!(
            raw.into_track().unwrap_err(),
            Error::DataFormat { line: 2, .. }
        ));
    }

    #[test]
    fn test_missing_genre_rejected() {
        assert!(matches!(
            row("[]").into_track().unwrap_err(),
            Error::DataFormat { .. }
        ));
    }

    #[test]
    fn test_non_numeric_feature_rejected() {
        let mut raw = row("['pop']");
        raw.energy = "loud".to_string();
        let err = raw.into_track().unwrap_err();
        assert!(err.to_string().contains("energy"));
    }

    #[test]
    fn test_missing_and_nan_rejected() {
        let mut raw = row("['pop']");
        raw.popularity = String::new();
        assert!(raw.into_track().is_err());

        let mut raw = row("['pop']");
        raw.valence = "NaN".to_string();
        assert!(raw.into_track().is_err());
    }
}
