//! Core domain model for timbre.
//!
//! This crate defines the track and audio feature model, the recognized
//! genre taxonomy, and the immutable [`CatalogIndex`] that every
//! recommendation query runs against.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod taxonomy;

pub use catalog::{BuildStats, CatalogEntry, CatalogIndex, RawTrackRow};
pub use error::{Error, Result};
pub use model::{AudioFeatures, Track, YearRange, FEATURE_COUNT, FEATURE_NAMES};
pub use taxonomy::Genre;
