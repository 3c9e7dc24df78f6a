use serde::{Deserialize, Serialize};

use super::MovieSummary;

/// A cast or crew member as returned by /person/{id}
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Person {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
    #[serde(default)]
    pub known_for_department: Option<String>,
}

impl Person {
    pub fn is_director(&self) -> bool {
        self.known_for_department.as_deref() == Some("Directing")
    }
}

/// A cast member in a movie's credits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// A crew member in a movie's credits
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewMember {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

impl CrewMember {
    pub fn is_director(&self) -> bool {
        self.job.as_deref() == Some("Director")
    }
}

/// An acting role in a person's filmography
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CastCredit {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(default)]
    pub character: Option<String>,
}

/// A crew role in a person's filmography
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CrewCredit {
    #[serde(flatten)]
    pub movie: MovieSummary,
    #[serde(default)]
    pub job: Option<String>,
}

impl CrewCredit {
    pub fn is_director(&self) -> bool {
        self.job.as_deref() == Some("Director")
    }
}

/// Raw response from /person/{id}/movie_credits
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PersonCredits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
    #[serde(default)]
    pub crew: Vec<CrewCredit>,
}
