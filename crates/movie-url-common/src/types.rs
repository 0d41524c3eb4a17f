//! Core type definitions for catalog references, fetch results and movie
//! records.
//!
//! [`MovieRecord`] serializes with the column names of the CSV output
//! (`imdb`, `kp`, `alternativeName`, ...), so the serde view and the CSV
//! header always agree.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Error, Result};

/// A decoded JSON object as returned by a provider.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// One scanned input line.
///
/// `identifier` and `canonical_url` are either both present (the line
/// matched a catalog URL) or both absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogReference {
    /// The line exactly as read.
    pub raw_input: String,
    /// Catalog identifier (the digit run after `/film/` or `/series/`).
    pub identifier: Option<String>,
    /// The line with every space, CR and LF removed.
    pub canonical_url: Option<String>,
}

impl CatalogReference {
    /// Reference for a line that matched a catalog URL.
    pub fn matched(
        raw_input: impl Into<String>,
        identifier: impl Into<String>,
        canonical_url: impl Into<String>,
    ) -> Self {
        Self {
            raw_input: raw_input.into(),
            identifier: Some(identifier.into()),
            canonical_url: Some(canonical_url.into()),
        }
    }

    /// Reference for a line with no recognizable catalog URL.
    pub fn unparsed(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            identifier: None,
            canonical_url: None,
        }
    }

    /// Returns `true` when the line matched a catalog URL.
    pub fn is_parsed(&self) -> bool {
        self.identifier.is_some()
    }

    /// Identifier and canonical URL, or [`Error::UnparsedLine`].
    pub fn target(&self) -> Result<(&str, &str)> {
        match (&self.identifier, &self.canonical_url) {
            (Some(id), Some(url)) => Ok((id.as_str(), url.as_str())),
            _ => Err(Error::UnparsedLine(self.raw_input.clone())),
        }
    }
}

/// Upstream API whose endpoint and response schema are used for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderChoice {
    /// kinopoisk.dev v1.4 (`rating.imdb`, `name`, `genres[].name`, ...).
    #[default]
    Primary,
    /// kinopoiskapiunofficial.tech v2.2 (`ratingImdb`, `nameRu`, `genres[].genre`, ...).
    Legacy,
}

impl ProviderChoice {
    /// All variants, in help-text order.
    pub const ALL: [ProviderChoice; 2] = [Self::Primary, Self::Legacy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Legacy => "legacy",
        }
    }
}

impl fmt::Display for ProviderChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "primary" => Ok(Self::Primary),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!(
                "Invalid provider: {} (expected primary or legacy)",
                s
            )),
        }
    }
}

/// Raw outcome of one provider request, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult {
    /// A decoded JSON object that passed the provider's sanity check.
    Success(JsonObject),
    /// The provider answered with a status the adapter treats as failure.
    HttpError { status: u16 },
    /// Nothing was fetched because the token is empty.
    Empty,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The JSON object of a successful fetch, or the matching error.
    pub fn into_payload(self) -> Result<JsonObject> {
        match self {
            Self::Success(obj) => Ok(obj),
            Self::HttpError { status } => Err(Error::Http { status }),
            Self::Empty => Err(Error::EmptyToken),
        }
    }
}

/// Provider-independent movie record; one CSV row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub url: String,
    #[serde(rename = "imdb")]
    pub imdb_rating: Option<f64>,
    #[serde(rename = "kp")]
    pub kp_rating: Option<f64>,
    pub year: Option<i32>,
    pub name: Option<String>,
    #[serde(rename = "alternativeName")]
    pub alternative_name: Option<String>,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
}

impl MovieRecord {
    /// Column names in output order.
    pub const FIELDS: [&'static str; 9] = [
        "url",
        "imdb",
        "kp",
        "year",
        "name",
        "alternativeName",
        "shortDescription",
        "genres",
        "countries",
    ];

    /// A record for `url` with every optional field absent.
    pub fn empty(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            imdb_rating: None,
            kp_rating: None,
            year: None,
            name: None,
            alternative_name: None,
            short_description: None,
            genres: Vec::new(),
            countries: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_provider_choice_parse() {
        assert_eq!("primary".parse::<ProviderChoice>(), Ok(ProviderChoice::Primary));
        assert_eq!("legacy".parse::<ProviderChoice>(), Ok(ProviderChoice::Legacy));
        assert!("Primary".parse::<ProviderChoice>().is_err());
        assert!("tmdb".parse::<ProviderChoice>().is_err());
        assert_eq!(ProviderChoice::default(), ProviderChoice::Primary);
    }

    #[test]
    fn test_provider_choice_display_matches_serde() {
        for choice in ProviderChoice::ALL {
            let json = serde_json::to_string(&choice).unwrap();
            assert_eq!(json, format!("\"{}\"", choice));
        }
    }

    #[test]
    fn test_unparsed_reference_has_no_target() {
        let reference = CatalogReference::unparsed("not a movie link");
        assert!(!reference.is_parsed());
        assert!(matches!(reference.target(), Err(Error::UnparsedLine(_))));
    }

    #[test]
    fn test_matched_reference_target() {
        let reference = CatalogReference::matched(
            "https://www.kinopoisk.ru/film/42/\n",
            "42",
            "https://www.kinopoisk.ru/film/42/",
        );
        assert!(reference.is_parsed());
        assert_eq!(
            reference.target().unwrap(),
            ("42", "https://www.kinopoisk.ru/film/42/")
        );
    }

    #[test]
    fn test_fetch_result_into_payload() {
        let obj = json!({"a": 1}).as_object().cloned().unwrap();
        assert_eq!(FetchResult::Success(obj.clone()).into_payload().unwrap(), obj);
        assert!(matches!(
            FetchResult::HttpError { status: 404 }.into_payload(),
            Err(Error::Http { status: 404 })
        ));
        assert!(matches!(
            FetchResult::Empty.into_payload(),
            Err(Error::EmptyToken)
        ));
    }

    #[test]
    fn test_record_serializes_with_column_names() {
        let record = MovieRecord::empty("https://www.kinopoisk.ru/film/1/");
        let value = serde_json::to_value(&record).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        for field in MovieRecord::FIELDS {
            assert!(keys.contains(&field), "missing {field}");
        }
        assert_eq!(keys.len(), MovieRecord::FIELDS.len());
        assert!(value["alternativeName"].is_null());
    }
}
