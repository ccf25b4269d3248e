//! Read-only catalog store backing every view.

use std::collections::HashSet;

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::models::Game;

const BUILTIN_CATALOG: &str = include_str!("../assets/catalog.json");

/// Immutable, ordered collection of games fixed at start-up.
#[derive(Debug, Clone)]
pub struct Catalog {
    games: Vec<Game>,
}

impl Catalog {
    /// Load the storefront catalog embedded in the binary.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG).context("failed to load built-in catalog")
    }

    /// Parse a JSON array of game records.
    pub fn from_json(json: &str) -> Result<Self> {
        let games: Vec<Game> = serde_json::from_str(json).context("failed to parse catalog data")?;
        Self::from_games(games)
    }

    /// Build a catalog from already-constructed records, validating them first.
    pub fn from_games(games: Vec<Game>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(games.len());
        for game in &games {
            if !seen.insert(game.id) {
                return Err(anyhow!("duplicate game id {}", game.id));
            }
            if game.platforms.is_empty() {
                return Err(anyhow!("game {} ({}) lists no platforms", game.id, game.title));
            }
            if !(0.0..=5.0).contains(&game.rating) {
                return Err(anyhow!(
                    "game {} ({}) has rating {} outside 0-5",
                    game.id,
                    game.title,
                    game.rating
                ));
            }
            debug!(id = game.id, title = %game.title, "catalog entry");
        }
        info!(total = games.len(), "Catalog loaded");
        Ok(Self { games })
    }

    /// All games in catalog order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Look a game up by id.
    pub fn get(&self, id: u32) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Whether the catalog holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Genre, Platform, Price};

    #[test]
    fn builtin_catalog_has_six_games_in_order() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let titles: Vec<_> = catalog.games().iter().map(|g| g.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Cyber Night 2077",
                "Mystic Forest",
                "Speed Legends",
                "Galaxy Wars",
                "Medieval Quest",
                "Neon Runner",
            ]
        );
        Ok(())
    }

    #[test]
    fn builtin_records_decode_every_field() -> Result<()> {
        let catalog = Catalog::builtin()?;
        let game = catalog.get(5).expect("Medieval Quest present");
        assert_eq!(game.title, "Medieval Quest");
        assert_eq!(game.genre, Genre::Rpg);
        assert_eq!(game.platforms, vec![Platform::Pc, Platform::Xbox]);
        assert_eq!(game.price, Price::from_cents(3499));
        assert_eq!(game.release_date.to_string(), "2023-09-22");
        assert_eq!(game.reviews, 760);
        assert!(!game.is_new);
        assert!(catalog.get(42).is_none());
        Ok(())
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"id": 1, "title": "A", "genre": "RPG", "platforms": ["PC"], "rating": 4.0,
             "price_cents": 100, "image": "", "description": "", "release_date": "2024-01-01",
             "reviews": 0, "is_new": false},
            {"id": 1, "title": "B", "genre": "RPG", "platforms": ["PC"], "rating": 4.0,
             "price_cents": 100, "image": "", "description": "", "release_date": "2024-01-01",
             "reviews": 0, "is_new": false}
        ]"#;
        let err = Catalog::from_json(json).unwrap_err();
        assert!(err.to_string().contains("duplicate game id 1"));
    }

    #[test]
    fn rejects_empty_platforms_and_bad_ratings() {
        let no_platform = r#"[{"id": 1, "title": "A", "genre": "Action", "platforms": [],
            "rating": 4.0, "price_cents": 100, "image": "", "description": "",
            "release_date": "2024-01-01", "reviews": 0, "is_new": false}]"#;
        assert!(Catalog::from_json(no_platform).is_err());

        let bad_rating = r#"[{"id": 1, "title": "A", "genre": "Action", "platforms": ["PC"],
            "rating": 7.5, "price_cents": 100, "image": "", "description": "",
            "release_date": "2024-01-01", "reviews": 0, "is_new": false}]"#;
        assert!(Catalog::from_json(bad_rating).is_err());
    }

    #[test]
    fn rejects_negative_price_and_unknown_tags() {
        let negative = r#"[{"id": 1, "title": "A", "genre": "Action", "platforms": ["PC"],
            "rating": 4.0, "price_cents": -1, "image": "", "description": "",
            "release_date": "2024-01-01", "reviews": 0, "is_new": false}]"#;
        assert!(Catalog::from_json(negative).is_err());

        let unknown = r#"[{"id": 1, "title": "A", "genre": "Puzzle", "platforms": ["PC"],
            "rating": 4.0, "price_cents": 100, "image": "", "description": "",
            "release_date": "2024-01-01", "reviews": 0, "is_new": false}]"#;
        assert!(Catalog::from_json(unknown).is_err());
    }
}
