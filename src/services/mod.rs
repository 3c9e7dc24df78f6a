pub mod browse;
pub mod collections;
pub mod providers;
pub mod recommendations;
pub mod search;

pub use collections::{CollectionStore, Lifecycle};
pub use providers::{CatalogProvider, TmdbProvider};
pub use recommendations::RecommendationEngine;
