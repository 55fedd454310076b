pub mod features;
pub mod track;
pub mod years;

pub use features::{AudioFeatures, FEATURE_COUNT, FEATURE_DOMAINS, FEATURE_NAMES, MAX_TEMPO};
pub use track::Track;
pub use years::YearRange;
