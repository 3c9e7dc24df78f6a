use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::error::AppError;

/// Interface language, passed explicitly into every catalog call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    /// Primary locale
    #[default]
    #[serde(rename = "ar")]
    Arabic,
    /// Secondary locale
    #[serde(rename = "en")]
    English,
}

/// Short code and catalog locale code for each language
const LOCALES: [(Language, &str, &str); 2] = [
    (Language::Arabic, "ar", "ar-AE"),
    (Language::English, "en", "en-US"),
];

impl Language {
    fn entry(self) -> (Language, &'static str, &'static str) {
        LOCALES
            .into_iter()
            .find(|(lang, _, _)| *lang == self)
            .unwrap_or(LOCALES[0])
    }

    /// Two-letter code (e.g. "ar")
    pub fn short_code(self) -> &'static str {
        self.entry().1
    }

    /// Locale code sent to the catalog (e.g. "ar-AE")
    pub fn locale_code(self) -> &'static str {
        self.entry().2
    }

    /// The other supported language
    pub fn toggled(self) -> Self {
        match self {
            Language::Arabic => Language::English,
            Language::English => Language::Arabic,
        }
    }

    pub fn is_right_to_left(self) -> bool {
        self == Language::Arabic
    }
}

impl Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LOCALES
            .into_iter()
            .find(|(_, short, locale)| *short == wanted || locale.to_lowercase() == wanted)
            .map(|(lang, _, _)| lang)
            .ok_or_else(|| AppError::InvalidInput(format!("Unsupported language: {}", s)))
    }
}
