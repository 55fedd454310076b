use timbre_core::{AudioFeatures, Genre, Result, YearRange};

/// A validated recommendation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Query {
    genre: Genre,
    years: YearRange,
    target: AudioFeatures,
}

impl Query {
    /// # Errors
    /// Returns `InvalidRange` if any target axis lies outside its domain.
    pub fn new(genre: Genre, years: YearRange, target: AudioFeatures) -> Result<Self> {
        target.validate_target()?;
        Ok(Self {
            genre,
            years,
            target,
        })
    }

    /// Validate raw caller input.
    ///
    /// `features` lists acousticness, danceability, energy,
    /// instrumentalness, valence and tempo, in that order.
    ///
    /// # Errors
    /// `InvalidGenre` for a genre outside the recognized set; `InvalidRange`
    /// for a reversed year range or a malformed feature vector.
    pub fn parse(genre: &str, start_year: i32, end_year: i32, features: &[f64]) -> Result<Self> {
        let genre: Genre = genre.parse()?;
        let years = YearRange::new(start_year, end_year)?;
        let target = AudioFeatures::try_from(features)?;
        Self::new(genre, years, target)
    }

    #[must_use]
    pub const fn genre(&self) -> Genre {
        self.genre
    }

    #[must_use]
    pub const fn years(&self) -> YearRange {
        self.years
    }

    #[must_use]
    pub const fn target(&self) -> &AudioFeatures {
        &self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use timbre_core::Error;

    const TARGET: [f64; 6] = [0.5, 0.5, 0.5, 0.0, 0.45, 118.0];

    #[test]
    fn test_parse_valid() {
        let query = Query::parse("k-pop", 2010, 2019, &TARGET).unwrap();
        assert_eq!(query.genre(), Genre::KPop);
        assert_eq!(query.years().start(), 2010);
        assert!((query.target().tempo - 118.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_unknown_genre() {
        let err = Query::parse("polka", 2010, 2019, &TARGET).unwrap_err();
        assert!(matches!(err, Error::InvalidGenre(_)));
    }

    #[test]
    fn test_parse_reversed_years() {
        let err = Query::parse("Rock", 2019, 2010, &TARGET).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_parse_wrong_dimensionality() {
        let err = Query::parse("Rock", 2010, 2019, &TARGET[..5]).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
    }

    #[test]
    fn test_parse_out_of_domain() {
        let err = Query::parse("Rock", 2010, 2019, &[0.5, 0.5, 0.5, 0.0, 0.45, 300.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidRange(_)));
        assert!(err.is_query_error());
    }
}
