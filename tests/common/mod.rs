//! Shared fixtures for integration tests.
//!
//! Movie payloads mirror real responses of both APIs (trimmed), and
//! [`provider_for`] points an adapter at a [`MockServer`].

#![allow(dead_code)]

use movie_url_parser::config::{Config, EndpointConfig};
use movie_url_parser::metadata::{create_provider, ProviderAdapter};
use movie_url_parser::ProviderChoice;
use serde_json::{json, Value};
use wiremock::MockServer;

/// URL template path used for each provider on the mock server.
pub fn template_path(choice: ProviderChoice) -> &'static str {
    match choice {
        ProviderChoice::Primary => "/v1.4/movie/{id}",
        ProviderChoice::Legacy => "/api/v2.2/films/{id}",
    }
}

/// Endpoint for `choice` served by `server`.
pub fn endpoint_for(choice: ProviderChoice, server: &MockServer) -> EndpointConfig {
    EndpointConfig::new(format!("{}{}", server.uri(), template_path(choice)))
}

/// Default config with both providers pointed at `server`.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.providers.primary = endpoint_for(ProviderChoice::Primary, server);
    config.providers.legacy = endpoint_for(ProviderChoice::Legacy, server);
    config
}

pub fn provider_for(
    choice: ProviderChoice,
    server: &MockServer,
    token: &str,
) -> Box<dyn ProviderAdapter> {
    create_provider(choice, &endpoint_for(choice, server), token, None)
}

/// kinopoisk.dev v1.4 movie.
pub fn primary_movie() -> Value {
    json!({
        "id": 301,
        "type": "movie",
        "name": "Матрица",
        "alternativeName": "The Matrix",
        "enName": "The Matrix",
        "year": 1999,
        "shortDescription": "Хакер Нео узнаёт правду о мире",
        "rating": {"kp": 8.5, "imdb": 8.7, "filmCritics": 7.8, "await": null},
        "votes": {"kp": 900000, "imdb": 2000000},
        "genres": [{"name": "фантастика"}, {"name": "боевик"}],
        "countries": [{"name": "США"}, {"name": "Австралия"}]
    })
}

/// kinopoiskapiunofficial.tech v2.2 film.
pub fn legacy_movie() -> Value {
    json!({
        "kinopoiskId": 301,
        "imdbId": "tt0133093",
        "nameRu": "Матрица",
        "nameEn": null,
        "nameOriginal": "The Matrix",
        "ratingKinopoisk": 8.5,
        "ratingImdb": 8.7,
        "year": 1999,
        "shortDescription": "Хакер Нео узнаёт правду о мире",
        "type": "FILM",
        "countries": [{"country": "США"}],
        "genres": [{"genre": "фантастика"}, {"genre": "боевик"}]
    })
}
