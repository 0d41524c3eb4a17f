//! movie-url-parser - Movie catalog URL to CSV exporter
//!
//! This library crate exposes the core functionality for integration testing.

pub mod batch;
pub mod config;
pub mod extract;
pub mod metadata;
pub mod output;

pub use movie_url_common::{CatalogReference, Error, FetchResult, MovieRecord, ProviderChoice};
