use crate::{
    error::AppResult,
    models::{CollectionKind, DiscoverQuery, Language, MovieSummary, WatchStatus},
    services::{collections::CollectionStore, providers::CatalogProvider},
};
use std::sync::Arc;

/// Shortest trimmed query that triggers a search
pub const MIN_QUERY_LEN: usize = 2;

/// Service function for title search
///
/// Short queries return nothing. Results come back most popular first and are
/// narrowed by whether the user has already watched them.
pub async fn search_movies(
    provider: Arc<dyn CatalogProvider>,
    collections: &CollectionStore,
    query: &str,
    language: Language,
    status: WatchStatus,
) -> AppResult<Vec<MovieSummary>> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    let mut results = provider.search(query, language).await?;
    sort_by_popularity(&mut results);

    Ok(filter_by_watch_status(results, collections, status))
}

/// Shortest trimmed query that looks up recommendation seeds
pub const MIN_SEED_QUERY_LEN: usize = 3;

/// Title matches offered as a recommendation seed
pub const SEED_CANDIDATES: usize = 5;

/// The top title matches a user can pick a recommendation seed from
///
/// Keeps the catalog's relevance order rather than sorting by popularity.
pub async fn seed_candidates(
    provider: Arc<dyn CatalogProvider>,
    query: &str,
    language: Language,
) -> AppResult<Vec<MovieSummary>> {
    let query = query.trim();
    if query.chars().count() < MIN_SEED_QUERY_LEN {
        return Ok(Vec::new());
    }

    let mut results = provider.search(query, language).await?;
    results.truncate(SEED_CANDIDATES);
    Ok(results)
}

/// Service function for filtered browsing without a text query
pub async fn discover_movies(
    provider: Arc<dyn CatalogProvider>,
    collections: &CollectionStore,
    query: &DiscoverQuery,
    language: Language,
    status: WatchStatus,
) -> AppResult<Vec<MovieSummary>> {
    let results = provider.discover(query, language).await?;

    tracing::debug!(
        results = results.len(),
        filtered = query.has_filters(),
        "Discover completed"
    );

    Ok(filter_by_watch_status(results, collections, status))
}

/// Stable sort, most popular first
pub fn sort_by_popularity(movies: &mut [MovieSummary]) {
    movies.sort_by(|a, b| b.popularity_or_zero().total_cmp(&a.popularity_or_zero()));
}

pub fn filter_by_watch_status(
    movies: Vec<MovieSummary>,
    collections: &CollectionStore,
    status: WatchStatus,
) -> Vec<MovieSummary> {
    match status {
        WatchStatus::All => movies,
        WatchStatus::Watched => movies
            .into_iter()
            .filter(|m| collections.is_member(CollectionKind::Watched, m.id))
            .collect(),
        WatchStatus::Unwatched => movies
            .into_iter()
            .filter(|m| !collections.is_member(CollectionKind::Watched, m.id))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockCatalogProvider;
    use crate::storage::MemoryStorage;

    fn movie(id: u64, popularity: f64) -> MovieSummary {
        MovieSummary {
            id,
            popularity: Some(popularity),
            ..Default::default()
        }
    }

    fn store_with_watched(ids: &[u64]) -> CollectionStore {
        let mut store = CollectionStore::open(Arc::new(MemoryStorage::new()));
        for id in ids {
            store.toggle(CollectionKind::Watched, movie(*id, 0.0));
        }
        store
    }

    #[tokio::test]
    async fn test_short_query_skips_provider() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().times(0);

        let store = store_with_watched(&[]);
        let results = search_movies(
            Arc::new(provider),
            &store,
            " a ",
            Language::English,
            WatchStatus::All,
        )
        .await
        .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_sorts_by_popularity_and_trims_query() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search()
            .withf(|query, _| query == "dune")
            .returning(|_, _| Ok(vec![movie(1, 3.0), movie(2, 90.0), movie(3, 12.0)]));

        let store = store_with_watched(&[]);
        let results = search_movies(
            Arc::new(provider),
            &store,
            "  dune ",
            Language::English,
            WatchStatus::All,
        )
        .await
        .unwrap();

        let ids: Vec<u64> = results.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_seed_candidates_keep_catalog_order_and_cap() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_search()
            .withf(|query, _| query == "heat")
            .returning(|_, _| Ok((1..=8).map(|id| movie(id, id as f64)).collect()));

        let candidates = seed_candidates(Arc::new(provider), " heat ", Language::English)
            .await
            .unwrap();

        let ids: Vec<u64> = candidates.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_seed_candidates_need_three_characters() {
        let mut provider = MockCatalogProvider::new();
        provider.expect_search().times(0);

        let candidates = seed_candidates(Arc::new(provider), " up ", Language::Arabic)
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_filter_by_watch_status() {
        let store = store_with_watched(&[2]);
        let movies = vec![movie(1, 0.0), movie(2, 0.0), movie(3, 0.0)];

        let watched = filter_by_watch_status(movies.clone(), &store, WatchStatus::Watched);
        assert_eq!(watched.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2]);

        let unwatched = filter_by_watch_status(movies.clone(), &store, WatchStatus::Unwatched);
        assert_eq!(unwatched.iter().map(|m| m.id).collect::<Vec<_>>(), vec![1, 3]);

        assert_eq!(filter_by_watch_status(movies, &store, WatchStatus::All).len(), 3);
    }

    #[tokio::test]
    async fn test_discover_applies_watch_filter() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_discover()
            .withf(|query, _| query.genre == Some(18))
            .returning(|_, _| Ok(vec![movie(1, 0.0), movie(2, 0.0)]));

        let store = store_with_watched(&[1]);
        let query = DiscoverQuery::for_genre(18, Default::default());
        let results = discover_movies(
            Arc::new(provider),
            &store,
            &query,
            Language::Arabic,
            WatchStatus::Unwatched,
        )
        .await
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }
}
