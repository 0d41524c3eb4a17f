//! kinopoisk.dev metadata provider (the "primary" API).
//!
//! Implements [`ProviderAdapter`] against the v1.4 `movie/{id}` endpoint.
//!
//! Behaviour:
//! - Any status other than 200 is a failed fetch; the body is not read as JSON.
//! - A 200 body must decode to an object with more than
//!   [`MIN_MOVIE_KEYS`](crate::metadata::provider::MIN_MOVIE_KEYS) keys.
//! - `rating.imdb` and `rating.kp` must be present (they may be `null`);
//!   every other field is optional.

use async_trait::async_trait;
use tracing::debug;

use movie_url_common::{FetchResult, JsonObject, MovieRecord, ProviderChoice, Result};

use super::HttpFetcher;
use crate::metadata::provider::{
    entry_names, optional_string, optional_year, parse_movie_object, required_f64,
    ProviderAdapter,
};

const HTTP_OK: u16 = 200;

/// Adapter for the kinopoisk.dev API.
pub struct KinopoiskDevProvider {
    http: HttpFetcher,
}

impl KinopoiskDevProvider {
    pub fn new(http: HttpFetcher) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ProviderAdapter for KinopoiskDevProvider {
    fn name(&self) -> &'static str {
        "kinopoisk.dev"
    }

    fn choice(&self) -> ProviderChoice {
        ProviderChoice::Primary
    }

    fn is_available(&self) -> bool {
        self.http.has_token()
    }

    async fn fetch(&self, identifier: &str) -> Result<FetchResult> {
        let Some((status, body)) = self.http.get(identifier).await? else {
            return Ok(FetchResult::Empty);
        };

        if status != HTTP_OK {
            debug!(identifier, status, "kinopoisk.dev rejected request");
            return Ok(FetchResult::HttpError { status });
        }

        parse_movie_object(&body).map(FetchResult::Success)
    }

    fn normalize(&self, url: &str, movie: &JsonObject) -> Result<MovieRecord> {
        Ok(MovieRecord {
            url: url.to_string(),
            imdb_rating: required_f64(movie, &["rating", "imdb"])?,
            kp_rating: required_f64(movie, &["rating", "kp"])?,
            year: optional_year(movie, "year"),
            name: optional_string(movie, "name"),
            alternative_name: optional_string(movie, "alternativeName"),
            short_description: optional_string(movie, "shortDescription"),
            genres: entry_names(movie, "genres", "name"),
            countries: entry_names(movie, "countries", "name"),
        })
    }
}
