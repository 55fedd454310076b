//! Nearest-neighbor recommendation for timbre.
//!
//! Filters a [`timbre_core::CatalogIndex`] to a genre and era, keeps the
//! most popular tracks, and ranks them by Euclidean distance to a target
//! audio feature profile.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod neighbors;
pub mod page;
pub mod pool;
pub mod query;

pub use engine::{recommend, recommend_batch, recommend_query, Recommender, DEFAULT_MAX_POOLS};
pub use neighbors::{Neighbor, NeighborIndex};
pub use page::{paginate, Page, DEFAULT_PAGE_SIZE};
pub use pool::{CandidatePool, Recommendation, POOL_LIMIT};
pub use query::Query;
