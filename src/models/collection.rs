use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// The three personal lists a user maintains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Watchlist,
    Favorites,
    Watched,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 3] = [
        CollectionKind::Watchlist,
        CollectionKind::Favorites,
        CollectionKind::Watched,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Watchlist => "watchlist",
            CollectionKind::Favorites => "favorites",
            CollectionKind::Watched => "watched",
        }
    }

    /// Position in `ALL`, used to index per-collection state
    pub(crate) fn index(self) -> usize {
        match self {
            CollectionKind::Watchlist => 0,
            CollectionKind::Favorites => 1,
            CollectionKind::Watched => 2,
        }
    }
}

impl Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watchlist" => Ok(CollectionKind::Watchlist),
            "favorites" | "favourites" => Ok(CollectionKind::Favorites),
            "watched" => Ok(CollectionKind::Watched),
            other => Err(AppError::InvalidInput(format!(
                "Unknown collection: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, kind) in CollectionKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_parse_collection_kind() {
        assert_eq!(
            "Watchlist".parse::<CollectionKind>().unwrap(),
            CollectionKind::Watchlist
        );
        assert_eq!(
            "favourites".parse::<CollectionKind>().unwrap(),
            CollectionKind::Favorites
        );
        assert!("seen".parse::<CollectionKind>().is_err());
    }
}
