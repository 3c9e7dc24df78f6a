use std::collections::HashMap;

use tawsyah::{
    error::{AppError, AppResult},
    models::{
        Credits, DiscoverQuery, Genre, Language, MovieDetails, MovieId, MovieSummary, Person,
        PersonCredits,
    },
    services::CatalogProvider,
};

/// Catalog backed by fixed lists; a missing entry behaves like a failed request
#[derive(Default)]
pub struct FakeCatalog {
    pub recommendations: HashMap<MovieId, Vec<MovieSummary>>,
    pub similar: HashMap<MovieId, Vec<MovieSummary>>,
    pub details: HashMap<MovieId, MovieDetails>,
}

fn unavailable(what: &str, id: MovieId) -> AppError {
    AppError::ExternalApi(format!("{} unavailable for {}", what, id))
}

#[async_trait::async_trait]
impl CatalogProvider for FakeCatalog {
    async fn recommendations_for(
        &self,
        id: MovieId,
        _language: Language,
    ) -> AppResult<Vec<MovieSummary>> {
        self.recommendations
            .get(&id)
            .cloned()
            .ok_or_else(|| unavailable("recommendations", id))
    }

    async fn similar_to(&self, id: MovieId, _language: Language) -> AppResult<Vec<MovieSummary>> {
        self.similar
            .get(&id)
            .cloned()
            .ok_or_else(|| unavailable("similar", id))
    }

    async fn details(&self, id: MovieId, _language: Language) -> AppResult<MovieDetails> {
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Movie {}", id)))
    }

    async fn search(&self, _query: &str, _language: Language) -> AppResult<Vec<MovieSummary>> {
        Ok(Vec::new())
    }

    async fn trending(&self, _language: Language) -> AppResult<Vec<MovieSummary>> {
        Ok(Vec::new())
    }

    async fn genres(&self, _language: Language) -> AppResult<Vec<Genre>> {
        Ok(Vec::new())
    }

    async fn discover(
        &self,
        _query: &DiscoverQuery,
        _language: Language,
    ) -> AppResult<Vec<MovieSummary>> {
        Ok(Vec::new())
    }

    async fn credits(&self, id: MovieId) -> AppResult<Credits> {
        Err(unavailable("credits", id))
    }

    async fn person(&self, person_id: u64) -> AppResult<Person> {
        Err(AppError::NotFound(format!("Person {}", person_id)))
    }

    async fn person_credits(
        &self,
        person_id: u64,
        _language: Language,
    ) -> AppResult<PersonCredits> {
        Err(AppError::NotFound(format!("Person {}", person_id)))
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn movie(id: MovieId, popularity: f64) -> MovieSummary {
    MovieSummary {
        id,
        poster_path: Some(format!("/{}.jpg", id)),
        popularity: Some(popularity),
        ..Default::default()
    }
}
