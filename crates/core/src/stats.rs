//! Summary figures shown beneath the catalog.

use std::collections::HashSet;

use crate::models::Game;

/// Aggregate numbers for the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    /// Games in the catalog.
    pub games: usize,
    /// Distinct platforms across all games.
    pub platforms: usize,
    /// Mean rating in tenths of a star, rounded half up.
    pub average_rating_tenths: u32,
    /// Sum of review counts.
    pub total_reviews: u64,
}

impl CatalogStats {
    /// Compute figures for the given games.
    pub fn from_games(games: &[Game]) -> Self {
        let platforms: HashSet<_> = games
            .iter()
            .flat_map(|game| game.platforms.iter().copied())
            .collect();
        let rating_tenths: u64 = games
            .iter()
            .map(|game| (f64::from(game.rating) * 10.0).round() as u64)
            .sum();
        let count = games.len() as u64;
        let average_rating_tenths = if count == 0 {
            0
        } else {
            ((rating_tenths * 2 + count) / (count * 2)) as u32
        };
        Self {
            games: games.len(),
            platforms: platforms.len(),
            average_rating_tenths,
            total_reviews: games.iter().map(|game| u64::from(game.reviews)).sum(),
        }
    }

    /// Average rating with one decimal, e.g. `4.6`.
    pub fn average_rating_label(&self) -> String {
        format!(
            "{}.{}",
            self.average_rating_tenths / 10,
            self.average_rating_tenths % 10
        )
    }

    /// Review total in compact form, e.g. `7.5K`.
    pub fn reviews_label(&self) -> String {
        compact_count(self.total_reviews)
    }
}

/// Format a count with a `K`/`M` suffix, truncating to one decimal.
pub fn compact_count(value: u64) -> String {
    let (tenths, suffix) = match value {
        0..=999 => return value.to_string(),
        1_000..=999_999 => (value / 100, "K"),
        _ => (value / 100_000, "M"),
    };
    if tenths % 10 == 0 {
        format!("{}{suffix}", tenths / 10)
    } else {
        format!("{}.{}{suffix}", tenths / 10, tenths % 10)
    }
}
