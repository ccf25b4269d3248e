//! Shared domain models.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a platform or genre label is not part of the catalog vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagParseError {
    /// The label is not a known platform.
    #[error("unknown platform `{0}`")]
    Platform(String),
    /// The label is not a known genre.
    #[error("unknown genre `{0}`")]
    Genre(String),
    /// The label is not a known sort key.
    #[error("unknown sort key `{0}`")]
    Sort(String),
    /// The label is not a known catalog view.
    #[error("unknown view `{0}`")]
    View(String),
}

/// Hardware platform a game ships on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    /// Windows/desktop.
    #[serde(rename = "PC")]
    Pc,
    /// Sony consoles.
    PlayStation,
    /// Microsoft consoles.
    Xbox,
    /// Nintendo consoles and handhelds.
    Nintendo,
}

impl Platform {
    /// Every platform in the order the storefront lists them.
    pub const ALL: [Platform; 4] = [
        Platform::Pc,
        Platform::PlayStation,
        Platform::Xbox,
        Platform::Nintendo,
    ];

    /// Label as it appears on badges and in the catalog data.
    pub fn label(self) -> &'static str {
        match self {
            Platform::Pc => "PC",
            Platform::PlayStation => "PlayStation",
            Platform::Xbox => "Xbox",
            Platform::Nintendo => "Nintendo",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Platform {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|platform| platform.label() == s)
            .ok_or_else(|| TagParseError::Platform(s.to_string()))
    }
}

/// Genre tag. Matching is exact, there is no genre hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Genre {
    #[serde(rename = "RPG")]
    Rpg,
    Action,
    Adventure,
    Racing,
}

impl Genre {
    /// Every genre in the order the storefront lists them.
    pub const ALL: [Genre; 4] = [Genre::Rpg, Genre::Action, Genre::Adventure, Genre::Racing];

    /// Label as it appears on badges and in the catalog data.
    pub fn label(self) -> &'static str {
        match self {
            Genre::Rpg => "RPG",
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Racing => "Racing",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.label() == s)
            .ok_or_else(|| TagParseError::Genre(s.to_string()))
    }
}

/// Non-negative price held in whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Build a price from a cent amount.
    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// Raw cent amount.
    pub const fn cents(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Catalog identity.
    pub id: u32,
    /// Display title.
    pub title: String,
    /// Single genre tag.
    pub genre: Genre,
    /// Platforms in badge order; never empty.
    pub platforms: Vec<Platform>,
    /// Average player rating between 0 and 5.
    pub rating: f32,
    /// Price, stored as `price_cents` in catalog data.
    #[serde(rename = "price_cents")]
    pub price: Price,
    /// Static cover asset path.
    pub image: String,
    /// Short marketing blurb.
    pub description: String,
    /// Launch date used by the "newest" sort.
    pub release_date: NaiveDate,
    /// Number of player reviews behind the rating.
    pub reviews: u32,
    /// Flagged as a new release by the storefront.
    pub is_new: bool,
}

impl Game {
    /// Whether the game ships on the given platform.
    pub fn supports(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }

    /// Case-insensitive substring match against title and description.
    ///
    /// `needle` must already be lowercased; an empty needle matches everything.
    pub fn matches_text(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}
