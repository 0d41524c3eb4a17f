mod types;

pub use types::*;

use anyhow::{Context, Result};
use movie_url_common::ProviderChoice;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./movie-url-parser.toml",
        "~/.config/movie-url-parser/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.token_env.trim().is_empty() {
        anyhow::bail!("token_env cannot be empty");
    }

    for choice in ProviderChoice::ALL {
        let endpoint = config.endpoint(choice);
        if !endpoint.url_template.contains(ID_PLACEHOLDER) {
            anyhow::bail!(
                "Provider '{}' url_template must contain {}",
                choice,
                ID_PLACEHOLDER
            );
        }
        if endpoint.auth_header.trim().is_empty() {
            anyhow::bail!("Provider '{}' has an empty auth_header", choice);
        }
        if reqwest::header::HeaderName::from_bytes(endpoint.auth_header.as_bytes()).is_err() {
            anyhow::bail!(
                "Provider '{}' auth_header is not a valid header name: {}",
                choice,
                endpoint.auth_header
            );
        }
    }

    Ok(())
}
