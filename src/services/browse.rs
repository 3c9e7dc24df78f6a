use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        Credits, DiscoverQuery, Language, MovieDetails, MovieId, MovieSummary, Person, SortBy,
    },
    services::{
        providers::CatalogProvider, recommendations::dedupe_by_id, search::sort_by_popularity,
    },
};

/// Movies kept per genre shelf
pub const SHELF_SIZE: usize = 20;

/// A genre featured on the home page, with its label in both languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeGenre {
    pub id: u64,
    english: &'static str,
    arabic: &'static str,
}

impl HomeGenre {
    const fn new(id: u64, english: &'static str, arabic: &'static str) -> Self {
        Self {
            id,
            english,
            arabic,
        }
    }

    pub fn label(&self, language: Language) -> &'static str {
        match language {
            Language::Arabic => self.arabic,
            Language::English => self.english,
        }
    }
}

/// Home page shelves, in display order
pub const HOME_GENRES: [HomeGenre; 6] = [
    HomeGenre::new(28, "Action", "أكشن"),
    HomeGenre::new(35, "Comedy", "كوميديا"),
    HomeGenre::new(18, "Drama", "دراما"),
    HomeGenre::new(27, "Horror", "رعب"),
    HomeGenre::new(878, "Sci-Fi", "خيال علمي"),
    HomeGenre::new(10749, "Romance", "رومانسي"),
];

/// One row of the home page: the best-known movies of a genre
#[derive(Debug, Clone, PartialEq)]
pub struct GenreShelf {
    pub genre_id: u64,
    pub movies: Vec<MovieSummary>,
}

/// Everything shown on a movie's page
#[derive(Debug, Clone)]
pub struct MoviePage {
    pub details: MovieDetails,
    /// `None` when the credits lookup failed
    pub credits: Option<Credits>,
}

/// A person and the movies they are known for
#[derive(Debug, Clone)]
pub struct Filmography {
    pub person: Person,
    pub movies: Vec<MovieSummary>,
}

pub async fn trending(
    provider: Arc<dyn CatalogProvider>,
    language: Language,
) -> AppResult<Vec<MovieSummary>> {
    provider.trending(language).await
}

/// Fetches one shelf per genre in parallel
///
/// Shelves come back in the order the genres were given. A genre whose fetch
/// fails yields an empty shelf rather than failing the page.
pub async fn genre_shelves(
    provider: Arc<dyn CatalogProvider>,
    genre_ids: &[u64],
    language: Language,
) -> Vec<GenreShelf> {
    let mut tasks = Vec::new();

    for &genre_id in genre_ids {
        let provider = provider.clone();
        let task = tokio::spawn(async move {
            let query = DiscoverQuery::for_genre(genre_id, SortBy::VoteCountDesc);
            provider.discover(&query, language).await
        });
        tasks.push((genre_id, task));
    }

    let mut shelves = Vec::with_capacity(tasks.len());
    for (genre_id, task) in tasks {
        let movies = match task.await {
            Ok(Ok(mut movies)) => {
                movies.truncate(SHELF_SIZE);
                movies
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, genre_id, "Genre shelf fetch failed");
                Vec::new()
            }
            Err(e) => {
                tracing::error!(error = %e, genre_id, "Task join error");
                Vec::new()
            }
        };
        shelves.push(GenreShelf { genre_id, movies });
    }

    shelves
}

/// Details plus credits for a single movie
///
/// Missing details fail the call; missing credits only leave them out.
pub async fn movie_page(
    provider: Arc<dyn CatalogProvider>,
    id: MovieId,
    language: Language,
) -> AppResult<MoviePage> {
    let (details, credits) = tokio::join!(provider.details(id, language), provider.credits(id));

    let credits = credits
        .map_err(|e| tracing::warn!(error = %e, movie_id = id, "Credits unavailable"))
        .ok();

    Ok(MoviePage {
        details: details?,
        credits,
    })
}

/// A person's movies, most popular first
///
/// Directors are listed by the films they directed; everyone else by the films
/// they acted in, falling back to directed films when they have no acting
/// roles. Entries without a poster and repeated ids are dropped.
pub async fn filmography(
    provider: Arc<dyn CatalogProvider>,
    person_id: u64,
    language: Language,
) -> AppResult<Filmography> {
    let (person, credits) = tokio::join!(
        provider.person(person_id),
        provider.person_credits(person_id, language)
    );
    let person = person?;
    let credits = credits?;

    let directed: Vec<MovieSummary> = credits
        .crew
        .into_iter()
        .filter(|c| c.is_director())
        .map(|c| c.movie)
        .collect();
    let acted: Vec<MovieSummary> = credits.cast.into_iter().map(|c| c.movie).collect();

    let mut movies = if person.is_director() || acted.is_empty() {
        directed
    } else {
        acted
    };

    sort_by_popularity(&mut movies);
    let movies = dedupe_by_id(movies.into_iter().filter(MovieSummary::has_poster));

    if movies.is_empty() {
        tracing::debug!(person_id, "Person has no movies with posters");
    }

    Ok(Filmography { person, movies })
}

/// Looks up a movie and reduces it to the summary stored in collections
pub async fn summary_for(
    provider: Arc<dyn CatalogProvider>,
    id: MovieId,
    language: Language,
) -> AppResult<MovieSummary> {
    provider
        .details(id, language)
        .await
        .map(MovieSummary::from)
}
