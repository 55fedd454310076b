use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A genre that can be queried for recommendations.
///
/// The recognized set is fixed and independent of the catalog contents.
/// Catalog rows carry free-form lower-case labels; a `Genre` matches the
/// rows whose label equals [`Genre::catalog_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Genre {
    DancePop,
    Electronic,
    Electropop,
    HipHop,
    Jazz,
    KPop,
    Latin,
    Pop,
    PopRap,
    RnB,
    Rock,
}

impl Genre {
    /// Every recognized genre, in display order.
    pub const ALL: [Self; 11] = [
        Self::DancePop,
        Self::Electronic,
        Self::Electropop,
        Self::HipHop,
        Self::Jazz,
        Self::KPop,
        Self::Latin,
        Self::Pop,
        Self::PopRap,
        Self::RnB,
        Self::Rock,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::DancePop => "Dance Pop",
            Self::Electronic => "Electronic",
            Self::Electropop => "Electropop",
            Self::HipHop => "Hip Hop",
            Self::Jazz => "Jazz",
            Self::KPop => "K-pop",
            Self::Latin => "Latin",
            Self::Pop => "Pop",
            Self::PopRap => "Pop Rap",
            Self::RnB => "R&B",
            Self::Rock => "Rock",
        }
    }

    /// The normalized label used by catalog entries.
    #[must_use]
    pub fn catalog_label(self) -> String {
        self.display_name().to_lowercase()
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Genre {
    type Err = Error;

    /// Case-insensitive match against the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|genre| genre.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::InvalidGenre(s.to_string()))
    }
}
