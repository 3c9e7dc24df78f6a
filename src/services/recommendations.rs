//! Seed-based movie recommendations
//!
//! Given one movie the user liked, pulls the catalog's "recommended" and
//! "similar" lists plus the seed's own details, merges the two lists into one
//! poster-bearing pool without repeated ids, scores each candidate against the
//! seed and returns the best [`MAX_RECOMMENDATIONS`].
//!
//! Score terms (summed, each capped on its own):
//! - popularity: `popularity * 0.5`, at most 50
//! - genres: 15 per candidate genre shared with the seed
//! - title: 30 when either lowercased title contains the other
//! - plot keywords: 5 per candidate overview word also in the seed overview, at most 40
//!
//! Without seed details the candidates are ranked by raw popularity.

use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    models::{Language, MovieDetails, MovieId, MovieSummary},
    services::providers::CatalogProvider,
};

pub const MAX_RECOMMENDATIONS: usize = 20;

const POPULARITY_WEIGHT: f64 = 0.5;
const POPULARITY_CAP: f64 = 50.0;
const GENRE_MATCH_POINTS: f64 = 15.0;
const TITLE_MATCH_POINTS: f64 = 30.0;
const KEYWORD_MATCH_POINTS: f64 = 5.0;
const KEYWORD_CAP: f64 = 40.0;
const MIN_KEYWORD_LEN: usize = 4;

/// Per-term breakdown of a candidate's relevance score
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreBreakdown {
    pub popularity: f64,
    pub genres: f64,
    pub title: f64,
    pub keywords: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.popularity + self.genres + self.title + self.keywords
    }
}

/// A pool entry paired with its ranking key
#[derive(Debug, Clone)]
struct ScoredCandidate {
    movie: MovieSummary,
    score: f64,
}

/// The parts of the seed movie that candidates are compared against
#[derive(Debug, Clone)]
pub struct SeedProfile {
    genre_ids: HashSet<u64>,
    title: String,
    keywords: HashSet<String>,
}

impl SeedProfile {
    pub fn from_details(details: &MovieDetails) -> Self {
        let overview = details.overview.as_deref().unwrap_or("");
        Self {
            genre_ids: details.genres.iter().map(|g| g.id).collect(),
            title: details.title.as_deref().unwrap_or("").to_lowercase(),
            keywords: keywords(overview).into_iter().collect(),
        }
    }

    /// Relevance of one candidate to this seed
    pub fn score(&self, candidate: &MovieSummary) -> ScoreBreakdown {
        let popularity =
            (candidate.popularity_or_zero() * POPULARITY_WEIGHT).min(POPULARITY_CAP);

        let genre_matches = candidate
            .genre_ids
            .iter()
            .filter(|id| self.genre_ids.contains(id))
            .count();
        let genres = genre_matches as f64 * GENRE_MATCH_POINTS;

        let candidate_title = candidate.display_title().to_lowercase();
        let title = if titles_overlap(&candidate_title, &self.title) {
            TITLE_MATCH_POINTS
        } else {
            0.0
        };

        let keyword_matches = keywords(candidate.overview.as_deref().unwrap_or(""))
            .iter()
            .filter(|word| self.keywords.contains(*word))
            .count();
        let keywords = (keyword_matches as f64 * KEYWORD_MATCH_POINTS).min(KEYWORD_CAP);

        ScoreBreakdown {
            popularity,
            genres,
            title,
            keywords,
        }
    }
}

fn titles_overlap(a: &str, b: &str) -> bool {
    !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a))
}

/// Word characters for keyword matching: ASCII letters, digits, underscore and
/// the Arabic block U+0600..U+06FF
fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{0600}'..='\u{06FF}').contains(&c)
}

/// Lowercased runs of at least four keyword characters, in order, with repeats
pub fn keywords(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let mut words = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for c in lowered.chars() {
        if is_keyword_char(c) {
            current.push(c);
            current_len += 1;
            continue;
        }
        if current_len >= MIN_KEYWORD_LEN {
            words.push(std::mem::take(&mut current));
        } else {
            current.clear();
        }
        current_len = 0;
    }
    if current_len >= MIN_KEYWORD_LEN {
        words.push(current);
    }

    words
}

/// Keeps the first sighting of each id, scanning the lists in order
pub fn dedupe_by_id(movies: impl IntoIterator<Item = MovieSummary>) -> Vec<MovieSummary> {
    let mut seen = HashSet::new();
    movies.into_iter().filter(|m| seen.insert(m.id)).collect()
}

/// Concatenates both lists, drops poster-less entries and repeated ids
///
/// A poster-less sighting does not claim its id, so a later sighting of the
/// same movie with a poster is still kept.
pub fn merge_candidates(
    recommended: Vec<MovieSummary>,
    similar: Vec<MovieSummary>,
) -> Vec<MovieSummary> {
    dedupe_by_id(
        recommended
            .into_iter()
            .chain(similar)
            .filter(MovieSummary::has_poster),
    )
}

/// Orders the pool by score (stable for ties) and keeps the top entries
pub fn rank(pool: Vec<MovieSummary>, seed: Option<&MovieDetails>) -> Vec<MovieSummary> {
    let profile = seed.map(SeedProfile::from_details);

    let mut scored: Vec<ScoredCandidate> = pool
        .into_iter()
        .map(|movie| {
            let score = match &profile {
                Some(profile) => profile.score(&movie).total(),
                None => movie.popularity_or_zero(),
            };
            ScoredCandidate { movie, score }
        })
        .collect();

    // sort_by is stable, so equal scores keep their pool order
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    scored
        .into_iter()
        .take(MAX_RECOMMENDATIONS)
        .map(|c| c.movie)
        .collect()
}

/// Builds ranked recommendations from the catalog
#[derive(Clone)]
pub struct RecommendationEngine {
    provider: Arc<dyn CatalogProvider>,
}

impl RecommendationEngine {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Ranked recommendations for viewers of `seed_id`
    ///
    /// The three catalog calls run concurrently and fail independently: a
    /// failed list counts as empty, failed details fall back to popularity
    /// ranking. Never errors; the worst case is an empty list.
    pub async fn recommend(&self, seed_id: MovieId, language: Language) -> Vec<MovieSummary> {
        let (recommended, similar, details) = tokio::join!(
            self.provider.recommendations_for(seed_id, language),
            self.provider.similar_to(seed_id, language),
            self.provider.details(seed_id, language),
        );

        let recommended = recommended.unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                movie_id = seed_id,
                source = "recommendations",
                "Candidate fetch failed"
            );
            Vec::new()
        });
        let similar = similar.unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                movie_id = seed_id,
                source = "similar",
                "Candidate fetch failed"
            );
            Vec::new()
        });
        let details = details
            .map_err(|e| {
                tracing::warn!(
                    error = %e,
                    movie_id = seed_id,
                    "Seed details unavailable, ranking by popularity"
                );
            })
            .ok();

        let pool = merge_candidates(recommended, similar);
        let pool_size = pool.len();
        let ranked = rank(pool, details.as_ref());

        tracing::info!(
            movie_id = seed_id,
            language = %language,
            pool_size,
            returned = ranked.len(),
            scored = details.is_some(),
            provider = self.provider.name(),
            "Recommendations ranked"
        );

        ranked
    }
}
