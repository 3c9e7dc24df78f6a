use serde::{Deserialize, Serialize};

pub mod collection;
pub mod discover;
pub mod language;
pub mod person;

pub use collection::CollectionKind;
pub use discover::{DiscoverQuery, SortBy, WatchStatus};
pub use language::Language;
pub use person::{CastCredit, CastMember, CrewCredit, CrewMember, Person, PersonCredits};

/// Catalog identifier of a movie
pub type MovieId = u64;

/// A movie as it appears in catalog listings
///
/// `id` is the only identity: two sightings of the same id may carry different
/// display or scoring payloads and still count as the same movie.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieSummary {
    pub id: MovieId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// TV-style display name, used when `title` is missing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
}

impl MovieSummary {
    /// Title shown to the user: `title`, then `name`, else empty
    pub fn display_title(&self) -> &str {
        [self.title.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .find(|t| !t.is_empty())
            .unwrap_or("")
    }

    pub fn popularity_or_zero(&self) -> f64 {
        self.popularity.unwrap_or(0.0)
    }

    pub fn has_poster(&self) -> bool {
        self.poster_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// First four characters of the release date
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.get(..4))
            .filter(|y| !y.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Full record of a single movie, as returned by the details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetails {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub popularity: Option<f64>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl MovieDetails {
    pub fn genre_ids(&self) -> Vec<u64> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

impl From<MovieDetails> for MovieSummary {
    fn from(details: MovieDetails) -> Self {
        let genre_ids = details.genre_ids();
        MovieSummary {
            id: details.id,
            title: details.title,
            name: None,
            poster_path: details.poster_path,
            backdrop_path: details.backdrop_path,
            overview: details.overview,
            genre_ids,
            popularity: details.popularity,
            vote_average: details.vote_average,
            release_date: details.release_date,
        }
    }
}

/// Director and leading cast of a movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Credits {
    pub director: Option<CrewMember>,
    pub actors: Vec<CastMember>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Paged list envelope used by every TMDB list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Raw response from /genre/movie/list
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

/// Raw response from /movie/{id}/credits
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbCredits {
    #[serde(default)]
    pub cast: Vec<CastMember>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}
