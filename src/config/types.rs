use movie_url_common::ProviderChoice;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placeholder substituted with the catalog identifier in `url_template`.
pub const ID_PLACEHOLDER: &str = "{id}";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Provider used when `--api` is not given.
    #[serde(default)]
    pub api: ProviderChoice,

    /// Environment variable holding the access token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// The run aborts once consecutive failures exceed this count.
    #[serde(default = "default_failure_threshold")]
    pub failure_threshold: u32,

    /// Per-request timeout in seconds; 0 disables the timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_token_env() -> String {
    "TOKEN".to_string()
}
fn default_failure_threshold() -> u32 {
    5
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ProviderChoice::default(),
            token_env: default_token_env(),
            failure_threshold: default_failure_threshold(),
            request_timeout_secs: default_request_timeout(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    pub fn endpoint(&self, choice: ProviderChoice) -> &EndpointConfig {
        match choice {
            ProviderChoice::Primary => &self.providers.primary,
            ProviderChoice::Legacy => &self.providers.legacy,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProvidersConfig {
    #[serde(default = "default_primary_endpoint")]
    pub primary: EndpointConfig,

    #[serde(default = "default_legacy_endpoint")]
    pub legacy: EndpointConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            primary: default_primary_endpoint(),
            legacy: default_legacy_endpoint(),
        }
    }
}

fn default_primary_endpoint() -> EndpointConfig {
    EndpointConfig {
        url_template: "https://api.kinopoisk.dev/v1.4/movie/{id}".to_string(),
        auth_header: default_auth_header(),
    }
}

fn default_legacy_endpoint() -> EndpointConfig {
    EndpointConfig {
        url_template: "https://kinopoiskapiunofficial.tech/api/v2.2/films/{id}".to_string(),
        auth_header: default_auth_header(),
    }
}

/// Where and how one provider is queried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EndpointConfig {
    /// Request URL with an `{id}` placeholder.
    pub url_template: String,

    /// Header carrying the access token
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
}

fn default_auth_header() -> String {
    "X-API-KEY".to_string()
}

impl EndpointConfig {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
            auth_header: default_auth_header(),
        }
    }

    /// Request URL for `identifier`.
    pub fn url_for(&self, identifier: &str) -> String {
        self.url_template.replace(ID_PLACEHOLDER, identifier)
    }
}
