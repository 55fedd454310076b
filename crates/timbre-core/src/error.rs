use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("catalog is missing required column `{0}`")]
    MissingColumn(&'static str),

    /// A catalog row that cannot be turned into a track.
    #[error("malformed catalog row at line {line}: {message}")]
    DataFormat { line: u64, message: String },

    /// The query genre is not part of the recognized enumeration.
    #[error("unrecognized genre: {0}")]
    InvalidGenre(String),

    /// A year range or target feature vector outside its domain.
    #[error("invalid range: {0}")]
    InvalidRange(String),
}

impl Error {
    pub(crate) fn data_format(line: u64, message: impl Into<String>) -> Self {
        Self::DataFormat {
            line,
            message: message.into(),
        }
    }

    /// Returns `true` for errors caused by caller-supplied query input.
    pub fn is_query_error(&self) -> bool {
        matches!(self, Self::InvalidGenre(_) | Self::InvalidRange(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
