//! Provider adapters that turn a catalog identifier into a [`MovieRecord`].
//!
//! # Module layout
//!
//! - [`provider`] -- Trait definition and shared JSON field accessors.
//! - [`providers`] -- Concrete adapters (kinopoisk.dev, kinopoiskapiunofficial.tech)
//!   and the [`create_provider`] factory.
//!
//! [`MovieRecord`]: movie_url_common::MovieRecord

pub mod provider;
pub mod providers;

pub use provider::ProviderAdapter;
pub use providers::{create_provider, KinopoiskDevProvider, KinopoiskUnofficialProvider};
