use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::AppError;

/// Ordering accepted by the discover endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortBy {
    #[default]
    #[serde(rename = "popularity.desc")]
    PopularityDesc,
    #[serde(rename = "vote_count.desc")]
    VoteCountDesc,
    #[serde(rename = "vote_average.desc")]
    VoteAverageDesc,
    #[serde(rename = "primary_release_date.desc")]
    ReleaseDateDesc,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::PopularityDesc => "popularity.desc",
            SortBy::VoteCountDesc => "vote_count.desc",
            SortBy::VoteAverageDesc => "vote_average.desc",
            SortBy::ReleaseDateDesc => "primary_release_date.desc",
        }
    }
}

impl FromStr for SortBy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "popularity" | "popularity.desc" => Ok(SortBy::PopularityDesc),
            "votes" | "vote_count.desc" => Ok(SortBy::VoteCountDesc),
            "rating" | "vote_average.desc" => Ok(SortBy::VoteAverageDesc),
            "newest" | "primary_release_date.desc" => Ok(SortBy::ReleaseDateDesc),
            other => Err(AppError::InvalidInput(format!("Unknown sort order: {}", other))),
        }
    }
}

/// Filters for browsing the catalog without a text query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverQuery {
    pub genre: Option<u64>,
    pub year_from: Option<i32>,
    pub year_to: Option<i32>,
    pub min_rating: Option<f64>,
    pub sort_by: SortBy,
    pub page: u32,
}

impl Default for DiscoverQuery {
    fn default() -> Self {
        Self {
            genre: None,
            year_from: None,
            year_to: None,
            min_rating: None,
            sort_by: SortBy::default(),
            page: 1,
        }
    }
}

impl DiscoverQuery {
    pub fn for_genre(genre: u64, sort_by: SortBy) -> Self {
        Self {
            genre: Some(genre),
            sort_by,
            ..Self::default()
        }
    }

    /// True when any narrowing filter is set
    pub fn has_filters(&self) -> bool {
        self.genre.is_some()
            || self.year_from.is_some()
            || self.year_to.is_some()
            || self.min_rating.is_some()
    }

    /// Query parameters understood by /discover/movie
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("sort_by", self.sort_by.as_str().to_string()),
            ("page", self.page.max(1).to_string()),
        ];

        if let Some(genre) = self.genre {
            params.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year_from {
            params.push(("primary_release_date.gte", format!("{}-01-01", year)));
        }
        if let Some(year) = self.year_to {
            params.push(("primary_release_date.lte", format!("{}-12-31", year)));
        }
        if let Some(rating) = self.min_rating {
            params.push(("vote_average.gte", rating.to_string()));
        }

        params
    }
}

/// Narrows a result list by the user's watched collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    #[default]
    All,
    Watched,
    Unwatched,
}

impl FromStr for WatchStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(WatchStatus::All),
            "watched" => Ok(WatchStatus::Watched),
            "unwatched" => Ok(WatchStatus::Unwatched),
            other => Err(AppError::InvalidInput(format!(
                "Unknown watch status: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_params() {
        let params = DiscoverQuery::default().to_query_params();
        assert_eq!(
            params,
            vec![
                ("sort_by", "popularity.desc".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_full_query_params() {
        let query = DiscoverQuery {
            genre: Some(28),
            year_from: Some(1990),
            year_to: Some(1999),
            min_rating: Some(7.5),
            sort_by: SortBy::VoteCountDesc,
            page: 2,
        };

        let params = query.to_query_params();
        assert!(params.contains(&("sort_by", "vote_count.desc".to_string())));
        assert!(params.contains(&("page", "2".to_string())));
        assert!(params.contains(&("with_genres", "28".to_string())));
        assert!(params.contains(&("primary_release_date.gte", "1990-01-01".to_string())));
        assert!(params.contains(&("primary_release_date.lte", "1999-12-31".to_string())));
        assert!(params.contains(&("vote_average.gte", "7.5".to_string())));
        assert!(query.has_filters());
    }

    #[test]
    fn test_page_zero_clamped() {
        let query = DiscoverQuery {
            page: 0,
            ..DiscoverQuery::default()
        };
        assert!(query.to_query_params().contains(&("page", "1".to_string())));
    }

    #[test]
    fn test_parse_watch_status() {
        assert_eq!("Unwatched".parse::<WatchStatus>().unwrap(), WatchStatus::Unwatched);
        assert!("maybe".parse::<WatchStatus>().is_err());
    }
}
