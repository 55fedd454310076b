//! Reading raw rows from a delimited catalog file.

use std::io;

use csv::{ReaderBuilder, StringRecord};

use crate::catalog::row::RawTrackRow;
use crate::error::{Error, Result};

/// Columns a catalog file must provide. Any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "uri",
    "genres",
    "release_year",
    "popularity",
    "acousticness",
    "danceability",
    "energy",
    "instrumentalness",
    "valence",
    "tempo",
];

/// Positions of the required columns within a header row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap([usize; REQUIRED_COLUMNS.len()]);

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0; REQUIRED_COLUMNS.len()];
        for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
                .ok_or(Error::MissingColumn(name))?;
        }
        Ok(Self(positions))
    }

    fn row(&self, record: &StringRecord, line: u64) -> RawTrackRow {
        let field = |column: usize| {
            record
                .get(self.0[column])
                .map(str::to_string)
                .unwrap_or_default()
        };
        RawTrackRow {
            line,
            uri: field(0),
            genres: field(1),
            release_year: field(2),
            popularity: field(3),
            acousticness: field(4),
            danceability: field(5),
            energy: field(6),
            instrumentalness: field(7),
            valence: field(8),
            tempo: field(9),
        }
    }
}

/// Stream raw rows out of CSV text with a header line.
///
/// Header and I/O problems are fatal and end the stream with `Err`. A
/// record the CSV reader cannot decode is reported as
/// [`Error::DataFormat`] so the caller can skip it and continue.
pub(crate) fn read_rows<R: io::Read>(
    reader: R,
) -> Result<impl Iterator<Item = Result<RawTrackRow>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let columns = ColumnMap::resolve(reader.headers()?)?;

    Ok(reader.into_records().map(move |record| match record {
        Ok(record) => {
            let line = record.position().map_or(0, csv::Position::line);
            Ok(columns.row(&record, line))
        }
        Err(err) if err.is_io_error() => Err(Error::Csv(err)),
        Err(err) => {
            let line = err.position().map_or(0, csv::Position::line);
            Err(Error::data_format(line, err.to_string()))
        }
    }))
}
