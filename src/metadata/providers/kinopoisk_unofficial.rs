//! kinopoiskapiunofficial.tech metadata provider (the "legacy" API).
//!
//! Implements [`ProviderAdapter`] against the v2.2 `films/{id}` endpoint.
//!
//! Unlike the primary adapter this one does not look at the HTTP status: the
//! body is decoded whatever the status, and only the movie-object sanity check
//! decides success. Every field is optional.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use movie_url_common::{Error, FetchResult, JsonObject, MovieRecord, ProviderChoice, Result};

use super::HttpFetcher;
use crate::metadata::provider::{
    lenient, lenient_entries, lenient_year, parse_movie_object, ProviderAdapter,
};

// ---------------------------------------------------------------------------
// API response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UnofficialFilm {
    #[serde(deserialize_with = "lenient")]
    rating_imdb: Option<f64>,
    #[serde(deserialize_with = "lenient")]
    rating_kinopoisk: Option<f64>,
    #[serde(deserialize_with = "lenient_year")]
    year: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    name_ru: Option<String>,
    #[serde(deserialize_with = "lenient")]
    name_original: Option<String>,
    #[serde(deserialize_with = "lenient")]
    short_description: Option<String>,
    #[serde(deserialize_with = "lenient_entries")]
    genres: Vec<UnofficialGenre>,
    #[serde(deserialize_with = "lenient_entries")]
    countries: Vec<UnofficialCountry>,
}

#[derive(Debug, Deserialize)]
struct UnofficialGenre {
    genre: String,
}

#[derive(Debug, Deserialize)]
struct UnofficialCountry {
    country: String,
}

/// Adapter for the kinopoiskapiunofficial.tech API.
pub struct KinopoiskUnofficialProvider {
    http: HttpFetcher,
}

impl KinopoiskUnofficialProvider {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProviderAdapter for KinopoiskUnofficialProvider {
    fn name(&self) -> &'static str {
        "kinopoiskapiunofficial.tech"
    }

    fn choice(&self) -> ProviderChoice {
        ProviderChoice::Legacy
    }

    fn is_available(&self) -> bool {
        self.http.has_token()
    }

    async fn fetch(&self, identifier: &str) -> Result<FetchResult> {
        let Some((status, body)) = self.http.get(identifier).await? else {
            return Ok(FetchResult::Empty);
        };

        parse_movie_object(&body)
            .map(FetchResult::Success)
            .inspect_err(|e| debug!(identifier, status, error = %e, "unusable response"))
    }

    fn normalize(&self, url: &str, movie: &JsonObject) -> Result<MovieRecord> {
        let film: UnofficialFilm = serde_json::from_value(Value::Object(movie.clone()))
            .map_err(|e| Error::malformed(format!("unexpected film object: {e}")))?;

        Ok(MovieRecord {
            url: url.to_string(),
            imdb_rating: film.rating_imdb,
            kp_rating: film.rating_kinopoisk,
            year: film.year,
            name: film.name_ru,
            alternative_name: film.name_original,
            short_description: film.short_description,
            genres: film.genres.into_iter().map(|g| g.genre).collect(),
            countries: film.countries.into_iter().map(|c| c.country).collect(),
        })
    }
}
