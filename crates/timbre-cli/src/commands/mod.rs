pub mod catalog;
pub mod config;
pub mod recommend;

pub use catalog::{list_genres, load_catalog, show_stats};
pub use recommend::{run_recommend, RecommendArgs};
