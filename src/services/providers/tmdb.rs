//! TMDB catalog provider
//!
//! Talks to The Movie Database v3 REST API. Every request carries the API key as
//! a query parameter; localized endpoints also carry the locale code of the
//! requested [`Language`].
//!
//! API Flow:
//! 1. Lists: /movie/{id}/recommendations, /movie/{id}/similar, /trending/movie/week,
//!    /search/movie, /discover/movie → `results` array of movie summaries
//! 2. Records: /movie/{id}, /movie/{id}/credits, /person/{id}, /person/{id}/movie_credits

use std::time::Duration;

use crate::{
    error::{AppError, AppResult},
    models::{
        Credits, DiscoverQuery, Genre, Language, MovieDetails, MovieId, MovieSummary, Person,
        PersonCredits, TmdbCredits, TmdbGenreList, TmdbPage,
    },
    services::providers::CatalogProvider,
};
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;

/// Number of cast members kept for a movie's credits
const TOP_BILLED_CAST: usize = 6;

/// Cover shown when a movie has no poster
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Cover";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET `{api_url}{path}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        language: Option<Language>,
        extra: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let mut query: Vec<(&str, String)> = vec![("api_key", self.api_key.clone())];
        if let Some(language) = language {
            query.push(("language", language.locale_code().to_string()));
        }
        query.extend(extra.iter().cloned());

        // reqwest errors carry the request URL, which includes the API key
        let response = self
            .http_client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("TMDB resource {}", path)));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {} for {}: {}",
                status, path, body
            )));
        }

        let response_text = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }

    async fn get_results(
        &self,
        path: &str,
        language: Language,
        extra: &[(&str, String)],
    ) -> AppResult<Vec<MovieSummary>> {
        let page: TmdbPage<MovieSummary> = self.get_json(path, Some(language), extra).await?;

        tracing::debug!(
            path = %path,
            results = page.results.len(),
            provider = "tmdb",
            "Movie list fetched"
        );

        Ok(page.results)
    }
}

/// Builds a poster or backdrop URL, falling back to a placeholder cover
pub fn image_url(image_base_url: &str, path: Option<&str>, size: &str) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => format!("{}/{}{}", image_base_url.trim_end_matches('/'), size, path),
        None => PLACEHOLDER_POSTER_URL.to_string(),
    }
}

/// Picks the director and the top-billed actors out of raw credits
fn summarize_credits(credits: TmdbCredits) -> Credits {
    let director = credits.crew.into_iter().find(|c| c.is_director());
    let actors = credits.cast.into_iter().take(TOP_BILLED_CAST).collect();
    Credits { director, actors }
}

#[async_trait::async_trait]
impl CatalogProvider for TmdbProvider {
    async fn recommendations_for(
        &self,
        id: MovieId,
        language: Language,
    ) -> AppResult<Vec<MovieSummary>> {
        self.get_results(&format!("/movie/{}/recommendations", id), language, &[])
            .await
    }

    async fn similar_to(&self, id: MovieId, language: Language) -> AppResult<Vec<MovieSummary>> {
        self.get_results(&format!("/movie/{}/similar", id), language, &[])
            .await
    }

    async fn details(&self, id: MovieId, language: Language) -> AppResult<MovieDetails> {
        self.get_json(&format!("/movie/{}", id), Some(language), &[])
            .await
    }

    async fn search(&self, query: &str, language: Language) -> AppResult<Vec<MovieSummary>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let results = self
            .get_results("/search/movie", language, &[("query", query.to_string())])
            .await?;

        tracing::info!(
            query = %query,
            results = results.len(),
            provider = "tmdb",
            "Movie search completed"
        );

        Ok(results)
    }

    async fn trending(&self, language: Language) -> AppResult<Vec<MovieSummary>> {
        self.get_results("/trending/movie/week", language, &[]).await
    }

    async fn genres(&self, language: Language) -> AppResult<Vec<Genre>> {
        let list: TmdbGenreList = self
            .get_json("/genre/movie/list", Some(language), &[])
            .await?;
        Ok(list.genres)
    }

    async fn discover(
        &self,
        query: &DiscoverQuery,
        language: Language,
    ) -> AppResult<Vec<MovieSummary>> {
        self.get_results("/discover/movie", language, &query.to_query_params())
            .await
    }

    async fn credits(&self, id: MovieId) -> AppResult<Credits> {
        let credits: TmdbCredits = self
            .get_json(&format!("/movie/{}/credits", id), None, &[])
            .await?;
        Ok(summarize_credits(credits))
    }

    async fn person(&self, person_id: u64) -> AppResult<Person> {
        // Biographies are richer in English, so the locale is fixed here
        self.get_json(
            &format!("/person/{}", person_id),
            Some(Language::English),
            &[],
        )
        .await
    }

    async fn person_credits(
        &self,
        person_id: u64,
        language: Language,
    ) -> AppResult<PersonCredits> {
        self.get_json(
            &format!("/person/{}/movie_credits", person_id),
            Some(language),
            &[],
        )
        .await
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
