//! idm_rs
//!
//! A lightweight Rust library for retrieving, caching, and exporting
//! IMF DataMapper indicator data. Pairs with the `idm` CLI.
//!
//! ### Features
//! - Locally cached reference lists (indicators, countries, groups,
//!   regions) with a 5-day freshness window
//! - Exact name-to-id resolution against the cached lists
//! - Series fetching by display name, flattened to tidy rows
//! - Save as CSV or JSON; quick summary statistics
//!
//! ### Example
//! ```no_run
//! use idm_rs::{Client, FileStore, ReferenceCache, SeriesFetcher, SeriesQuery, SeriesResult};
//!
//! let client = Client::default();
//! let cache = ReferenceCache::new(client.clone(), FileStore::new("data"));
//! let fetcher = SeriesFetcher::new(&client, &cache);
//! let query = SeriesQuery {
//!     indicators: vec!["Real GDP growth".into()],
//!     countries: vec!["India".into()],
//!     ..Default::default()
//! };
//! match fetcher.fetch(&query)? {
//!     SeriesResult::Table(rows) => idm_rs::storage::save_csv(&rows, "gdp.csv")?,
//!     SeriesResult::NoData => eprintln!("nothing to show"),
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cache;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod resolver;
pub mod stats;
pub mod storage;

pub use api::{Client, RemoteSource};
pub use cache::{FileStore, MemoryStore, ReferenceCache};
pub use error::{Error, Result};
pub use fetcher::SeriesFetcher;
pub use models::{Category, ReferenceEntry, SeriesPoint, SeriesQuery, SeriesResult};
pub use resolver::Resolver;
