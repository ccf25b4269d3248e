#![warn(clippy::all, missing_docs)]

//! Core domain logic for the GameHub catalog browser.
//!
//! This crate hosts the game records, the built-in catalog, the
//! filter/sort pipeline with its featured views, catalog statistics,
//! and configuration handling used by the terminal UI.

pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;
pub mod stats;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use filter::{derive, new_releases, top_rated, Selection, SortKey, View};
pub use models::{Game, Genre, Platform, Price, TagParseError};
pub use stats::CatalogStats;
