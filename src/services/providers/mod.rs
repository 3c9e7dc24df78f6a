//! Movie catalog abstraction
//!
//! The recommendation engine and the browse services only see the catalog
//! through [`CatalogProvider`], so the HTTP client can be swapped for a fake in
//! tests. Every list operation returns plain [`MovieSummary`] records.

use crate::{
    error::AppResult,
    models::{
        Credits, DiscoverQuery, Genre, Language, MovieDetails, MovieId, MovieSummary, Person,
        PersonCredits,
    },
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Movies the catalog recommends for viewers of `id`
    async fn recommendations_for(
        &self,
        id: MovieId,
        language: Language,
    ) -> AppResult<Vec<MovieSummary>>;

    /// Movies the catalog considers similar to `id`
    async fn similar_to(&self, id: MovieId, language: Language) -> AppResult<Vec<MovieSummary>>;

    /// Full record for one movie, including its genres
    async fn details(&self, id: MovieId, language: Language) -> AppResult<MovieDetails>;

    /// Free-text title search
    async fn search(&self, query: &str, language: Language) -> AppResult<Vec<MovieSummary>>;

    /// This week's trending movies
    async fn trending(&self, language: Language) -> AppResult<Vec<MovieSummary>>;

    /// All movie genres with localized names
    async fn genres(&self, language: Language) -> AppResult<Vec<Genre>>;

    /// Filtered browse over the whole catalog
    async fn discover(
        &self,
        query: &DiscoverQuery,
        language: Language,
    ) -> AppResult<Vec<MovieSummary>>;

    /// Director and leading cast
    async fn credits(&self, id: MovieId) -> AppResult<Credits>;

    /// Biography record for a cast or crew member
    async fn person(&self, person_id: u64) -> AppResult<Person>;

    /// Every movie a person acted in or worked on
    async fn person_credits(&self, person_id: u64, language: Language)
        -> AppResult<PersonCredits>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
