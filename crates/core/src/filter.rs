//! Filter/sort pipeline and the fixed featured views.
//!
//! Every function here is pure: it borrows the catalog slice and returns a
//! freshly ordered list of references, leaving catalog order untouched.

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::models::{Game, Genre, Platform, TagParseError};

/// Number of entries shown in the "new" and "top rated" views.
pub const FEATURED_LIMIT: usize = 3;

/// Ordering applied to the filtered catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Highest rating first.
    #[default]
    Rating,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Most recent release first.
    Newest,
    /// Catalog order, untouched.
    Catalog,
}

impl SortKey {
    /// Keys in the order the sort selector cycles through them.
    pub const ALL: [SortKey; 5] = [
        SortKey::Rating,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
        SortKey::Catalog,
    ];

    /// Machine name, as used in configuration.
    pub fn key(self) -> &'static str {
        match self {
            SortKey::Rating => "rating",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
            SortKey::Catalog => "catalog",
        }
    }

    /// Human-readable label for the sort selector.
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rating => "By rating",
            SortKey::PriceLow => "Price: low to high",
            SortKey::PriceHigh => "Price: high to low",
            SortKey::Newest => "Newest",
            SortKey::Catalog => "Catalog order",
        }
    }

    /// Step through [`SortKey::ALL`], wrapping at either end.
    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let index = Self::ALL.iter().position(|key| *key == self).unwrap_or(0) as isize;
        Self::ALL[(index + delta).rem_euclid(len) as usize]
    }

    fn compare(self, a: &Game, b: &Game) -> Ordering {
        match self {
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Newest => b.release_date.cmp(&a.release_date),
            SortKey::Catalog => Ordering::Equal,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SortKey {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.key() == s)
            .ok_or_else(|| TagParseError::Sort(s.to_string()))
    }
}

/// Top-level tabs of the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    /// Filtered and sorted catalog.
    #[default]
    Catalog,
    /// First few new releases.
    New,
    /// Highest rated games.
    TopRated,
    /// Reviews placeholder.
    Reviews,
}

impl View {
    /// Tabs in display order.
    pub const ALL: [View; 4] = [View::Catalog, View::New, View::TopRated, View::Reviews];

    /// Machine name, as used in configuration.
    pub fn key(self) -> &'static str {
        match self {
            View::Catalog => "catalog",
            View::New => "new",
            View::TopRated => "top-rated",
            View::Reviews => "reviews",
        }
    }

    /// Tab title.
    pub fn label(self) -> &'static str {
        match self {
            View::Catalog => "Catalog",
            View::New => "New",
            View::TopRated => "Top Rated",
            View::Reviews => "Reviews",
        }
    }

    /// Position of the tab in [`View::ALL`].
    pub fn index(self) -> usize {
        View::ALL.iter().position(|view| *view == self).unwrap_or(0)
    }

    /// Step through the tabs, wrapping at either end.
    pub fn cycle(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + delta).rem_euclid(len) as usize]
    }
}

impl FromStr for View {
    type Err = TagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.key() == s)
            .ok_or_else(|| TagParseError::View(s.to_string()))
    }
}

/// Current search, filter and sort choices.
///
/// `None` for platform or genre means "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    /// Free-text query matched against title and description.
    pub search: String,
    /// Platform filter.
    pub platform: Option<Platform>,
    /// Genre filter.
    pub genre: Option<Genre>,
    /// Ordering of the filtered games.
    pub sort: SortKey,
}

impl Selection {
    /// Default selection with a specific initial sort.
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    /// Whether a game passes all three predicates.
    pub fn matches(&self, game: &Game) -> bool {
        self.matches_with_needle(game, &self.search.to_lowercase())
    }

    fn matches_with_needle(&self, game: &Game, needle: &str) -> bool {
        game.matches_text(needle)
            && self.platform.is_none_or(|platform| game.supports(platform))
            && self.genre.is_none_or(|genre| game.genre == genre)
    }

    /// Step the platform selector through "all" and every platform.
    pub fn cycle_platform(&mut self, delta: isize) {
        self.platform = cycle_option(self.platform, &Platform::ALL, delta);
    }

    /// Step the genre selector through "all" and every genre.
    pub fn cycle_genre(&mut self, delta: isize) {
        self.genre = cycle_option(self.genre, &Genre::ALL, delta);
    }

    /// Step the sort selector.
    pub fn cycle_sort(&mut self, delta: isize) {
        self.sort = self.sort.cycle(delta);
    }

    /// Clear search and filters, keeping the current sort.
    pub fn reset_filters(&mut self) {
        *self = Self::sorted_by(self.sort);
    }

    /// Label for the platform selector.
    pub fn platform_label(&self) -> &'static str {
        self.platform.map_or("All platforms", Platform::label)
    }

    /// Label for the genre selector.
    pub fn genre_label(&self) -> &'static str {
        self.genre.map_or("All genres", Genre::label)
    }
}

/// Filter and order the catalog for the given selection.
pub fn derive<'a>(games: &'a [Game], selection: &Selection) -> Vec<&'a Game> {
    let needle = selection.search.to_lowercase();
    let mut filtered: Vec<&Game> = games
        .iter()
        .filter(|game| selection.matches_with_needle(game, &needle))
        .collect();
    if selection.sort != SortKey::Catalog {
        filtered.sort_by(|a, b| selection.sort.compare(a, b));
    }
    filtered
}

/// First [`FEATURED_LIMIT`] games flagged as new, in catalog order.
pub fn new_releases(games: &[Game]) -> Vec<&Game> {
    games
        .iter()
        .filter(|game| game.is_new)
        .take(FEATURED_LIMIT)
        .collect()
}

/// The [`FEATURED_LIMIT`] highest rated games, ranked from a copy of the catalog.
pub fn top_rated(games: &[Game]) -> Vec<&Game> {
    let mut ranked: Vec<&Game> = games.iter().collect();
    ranked.sort_by(|a, b| SortKey::Rating.compare(a, b));
    ranked.truncate(FEATURED_LIMIT);
    ranked
}

fn cycle_option<T: Copy + PartialEq>(current: Option<T>, all: &[T], delta: isize) -> Option<T> {
    // slot 0 is "all", slot i + 1 is all[i]
    let slots = all.len() as isize + 1;
    let index = current
        .and_then(|value| all.iter().position(|item| *item == value))
        .map_or(0, |pos| pos as isize + 1);
    match (index + delta).rem_euclid(slots) {
        0 => None,
        slot => Some(all[slot as usize - 1]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn games() -> Vec<Game> {
        Catalog::builtin().expect("built-in catalog").games().to_vec()
    }

    fn titles(games: &[&Game]) -> Vec<String> {
        games.iter().map(|game| game.title.clone()).collect()
    }

    #[test]
    fn rpg_by_price_low() {
        let games = games();
        let selection = Selection {
            genre: Some(Genre::Rpg),
            sort: SortKey::PriceLow,
            ..Selection::default()
        };
        let result = derive(&games, &selection);
        assert_eq!(titles(&result), ["Medieval Quest", "Cyber Night 2077"]);
        assert_eq!(result[0].price.to_string(), "$34.99");
        assert_eq!(result[1].price.to_string(), "$59.99");
    }

    #[test]
    fn search_is_case_insensitive() {
        let games = games();
        for query in ["galaxy", "GALAXY", "gAlAxY"] {
            let selection = Selection {
                search: query.to_string(),
                ..Selection::default()
            };
            assert_eq!(titles(&derive(&games, &selection)), ["Galaxy Wars"]);
        }
    }

    #[test]
    fn search_matches_description_in_any_script() {
        let games = games();
        let selection = Selection {
            search: "КИБЕРПАНК".to_string(),
            ..Selection::default()
        };
        assert_eq!(titles(&derive(&games, &selection)), ["Cyber Night 2077"]);
    }

    #[test]
    fn no_match_yields_empty() {
        let games = games();
        let selection = Selection {
            search: "zzz".to_string(),
            genre: Some(Genre::Racing),
            ..Selection::default()
        };
        assert!(derive(&games, &selection).is_empty());
    }

    #[test]
    fn empty_search_only_applies_tag_filters() {
        let games = games();
        let selection = Selection {
            platform: Some(Platform::Nintendo),
            sort: SortKey::Catalog,
            ..Selection::default()
        };
        assert_eq!(
            titles(&derive(&games, &selection)),
            ["Mystic Forest", "Neon Runner"]
        );
    }

    #[test]
    fn default_selection_sorts_by_rating() {
        let games = games();
        let result = derive(&games, &Selection::default());
        assert_eq!(
            titles(&result),
            [
                "Cyber Night 2077",
                "Galaxy Wars",
                "Mystic Forest",
                "Neon Runner",
                "Speed Legends",
                "Medieval Quest",
            ]
        );
    }

    #[test]
    fn newest_and_price_high_orders() {
        let games = games();
        let newest = derive(&games, &Selection::sorted_by(SortKey::Newest));
        assert_eq!(newest[0].title, "Neon Runner");
        assert_eq!(newest[5].title, "Medieval Quest");

        let expensive = derive(&games, &Selection::sorted_by(SortKey::PriceHigh));
        assert_eq!(expensive[0].title, "Cyber Night 2077");
        assert_eq!(expensive[5].title, "Neon Runner");
    }

    #[test]
    fn catalog_sort_keeps_order() {
        let games = games();
        let result = derive(&games, &Selection::sorted_by(SortKey::Catalog));
        let ids: Vec<u32> = result.iter().map(|game| game.id).collect();
        assert_eq!(ids, [1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn featured_views() {
        let games = games();
        assert_eq!(
            titles(&new_releases(&games)),
            ["Cyber Night 2077", "Galaxy Wars", "Neon Runner"]
        );
        assert_eq!(
            titles(&top_rated(&games)),
            ["Cyber Night 2077", "Galaxy Wars", "Mystic Forest"]
        );
    }

    #[test]
    fn top_rated_leaves_catalog_order_intact() {
        let games = games();
        let before: Vec<u32> = games.iter().map(|game| game.id).collect();
        let _ = top_rated(&games);
        let after: Vec<u32> = games.iter().map(|game| game.id).collect();
        assert_eq!(before, after);
        let catalog = derive(&games, &Selection::sorted_by(SortKey::Catalog));
        assert_eq!(catalog[0].title, "Cyber Night 2077");
        assert_eq!(catalog[1].title, "Mystic Forest");
    }

    #[test]
    fn selectors_cycle_through_all() {
        let mut selection = Selection::default();
        selection.cycle_platform(1);
        assert_eq!(selection.platform, Some(Platform::Pc));
        selection.cycle_platform(-2);
        assert_eq!(selection.platform, Some(Platform::Nintendo));
        selection.cycle_platform(1);
        assert_eq!(selection.platform, None);
        assert_eq!(selection.platform_label(), "All platforms");

        selection.cycle_genre(-1);
        assert_eq!(selection.genre, Some(Genre::Racing));
        assert_eq!(selection.genre_label(), "Racing");

        assert_eq!(SortKey::Rating.cycle(-1), SortKey::Catalog);
        assert_eq!(View::Reviews.cycle(1), View::Catalog);
    }

    #[test]
    fn reset_keeps_sort() {
        let mut selection = Selection {
            search: "neon".to_string(),
            platform: Some(Platform::Pc),
            genre: Some(Genre::Action),
            sort: SortKey::Newest,
        };
        selection.reset_filters();
        assert_eq!(selection, Selection::sorted_by(SortKey::Newest));
    }

    #[test]
    fn keys_parse() {
        assert_eq!("price-low".parse::<SortKey>(), Ok(SortKey::PriceLow));
        assert!("cheapest".parse::<SortKey>().is_err());
        assert_eq!("top-rated".parse::<View>(), Ok(View::TopRated));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn selection_strategy() -> impl Strategy<Value = Selection> {
            let search = prop_oneof![
                Just(String::new()),
                Just("a".to_string()),
                Just("ne".to_string()),
                Just("Quest".to_string()),
                "[a-zA-Z ]{0,4}",
            ];
            let platform = prop_oneof![
                Just(None),
                (0..Platform::ALL.len()).prop_map(|i| Some(Platform::ALL[i])),
            ];
            let genre = prop_oneof![
                Just(None),
                (0..Genre::ALL.len()).prop_map(|i| Some(Genre::ALL[i])),
            ];
            let sort = (0..SortKey::ALL.len()).prop_map(|i| SortKey::ALL[i]);
            (search, platform, genre, sort).prop_map(|(search, platform, genre, sort)| Selection {
                search,
                platform,
                genre,
                sort,
            })
        }

        proptest! {
            #[test]
            fn result_is_matching_subset(selection in selection_strategy()) {
                let games = games();
                let result = derive(&games, &selection);
                for game in &result {
                    prop_assert!(selection.matches(game));
                }
                let expected = games.iter().filter(|game| selection.matches(game)).count();
                prop_assert_eq!(result.len(), expected);
            }

            #[test]
            fn result_respects_sort_key(selection in selection_strategy()) {
                let games = games();
                let result = derive(&games, &selection);
                for pair in result.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    match selection.sort {
                        SortKey::Rating => prop_assert!(a.rating >= b.rating),
                        SortKey::PriceLow => prop_assert!(a.price <= b.price),
                        SortKey::PriceHigh => prop_assert!(a.price >= b.price),
                        SortKey::Newest => prop_assert!(a.release_date >= b.release_date),
                        SortKey::Catalog => prop_assert!(a.id < b.id),
                    }
                }
            }

            #[test]
            fn derive_is_idempotent(selection in selection_strategy()) {
                let games = games();
                let first: Vec<u32> = derive(&games, &selection).iter().map(|g| g.id).collect();
                let second: Vec<u32> = derive(&games, &selection).iter().map(|g| g.id).collect();
                prop_assert_eq!(first, second);
            }
        }
    }
}
