//! Trait definition and shared helpers for provider adapters.
//!
//! This module defines the [`ProviderAdapter`] trait that every upstream
//! movie API must implement, plus the lenient field accessors and serde
//! `deserialize_with` helpers the adapters use to map a provider-specific
//! JSON object onto a [`MovieRecord`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use movie_url_common::{Error, FetchResult, JsonObject, MovieRecord, ProviderChoice, Result};

/// A real movie object has more top-level keys than this; error payloads
/// such as `{"statusCode": 401, "message": "..."}` have fewer.
pub const MIN_MOVIE_KEYS: usize = 5;

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Async trait that all provider adapters must implement.
///
/// An adapter wraps one upstream API: it knows the endpoint, the auth header
/// and the response schema. It holds the access token itself, so callers only
/// pass the catalog identifier.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Short, lowercase identifier for this adapter (e.g. `"kinopoisk.dev"`).
    fn name(&self) -> &'static str;

    /// Which [`ProviderChoice`] this adapter serves.
    fn choice(&self) -> ProviderChoice;

    /// Returns `true` when the adapter has a non-empty token and will actually
    /// send requests.
    fn is_available(&self) -> bool;

    /// Issue a single GET for `identifier`.
    ///
    /// With an empty token no request is sent and [`FetchResult::Empty`] is
    /// returned. Transport failures and bodies that are not a movie object
    /// come back as `Err`.
    async fn fetch(&self, identifier: &str) -> Result<FetchResult>;

    /// Map a fetched movie object onto the common record schema.
    fn normalize(&self, url: &str, movie: &JsonObject) -> Result<MovieRecord>;

    /// Fetch `identifier` and normalize the result into a record for `url`.
    async fn fetch_and_normalize(&self, identifier: &str, url: &str) -> Result<MovieRecord> {
        let movie = self.fetch(identifier).await?.into_payload()?;
        self.normalize(url, &movie)
    }
}

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

/// Decode a response body and apply the movie-object sanity check.
pub fn parse_movie_object(body: &str) -> Result<JsonObject> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| Error::malformed(format!("invalid JSON body: {e}")))?;

    match value {
        Value::Object(obj) if obj.len() > MIN_MOVIE_KEYS => Ok(obj),
        Value::Object(obj) => Err(Error::malformed(format!(
            "expected more than {MIN_MOVIE_KEYS} top-level keys, got {}",
            obj.len()
        ))),
        other => Err(Error::malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Numeric value at a nested `path` whose keys must all exist.
///
/// A missing key is [`Error::MissingField`]; an explicit `null` is `None`.
pub fn required_f64(obj: &JsonObject, path: &[&str]) -> Result<Option<f64>> {
    let (last, parents) = path
        .split_last()
        .ok_or_else(|| Error::missing_field("<empty path>"))?;

    let mut current = obj;
    for (depth, key) in parents.iter().enumerate() {
        current = current
            .get(*key)
            .and_then(Value::as_object)
            .ok_or_else(|| Error::missing_field(path[..=depth].join(".")))?;
    }

    current
        .get(*last)
        .map(Value::as_f64)
        .ok_or_else(|| Error::missing_field(path.join(".")))
}

/// String value at `key`.
pub fn optional_string(obj: &JsonObject, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Year at `key`, accepting integers, integral floats and numeric strings.
pub fn optional_year(obj: &JsonObject, key: &str) -> Option<i32> {
    obj.get(key).and_then(year_value)
}

fn year_value(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .and_then(|y| i32::try_from(y).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Collect `entry_key` from each object in the array at `list_key`, keeping
/// array order. Entries without a string `entry_key` are dropped; a missing
/// array yields an empty list.
pub fn entry_names(obj: &JsonObject, list_key: &str, entry_key: &str) -> Vec<String> {
    obj.get(list_key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry.get(entry_key).and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Lenient deserializers
// ---------------------------------------------------------------------------

/// `deserialize_with` for optional fields: a value of the wrong type is `None`
/// instead of a deserialization error.
pub fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `deserialize_with` for a year, with the same rules as [`optional_year`].
pub fn lenient_year<'de, D>(deserializer: D) -> std::result::Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(year_value(&value))
}

/// `deserialize_with` for a list of entry objects: entries that do not
/// deserialize as `T` are dropped, a non-array yields an empty list.
pub fn lenient_entries<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Array(entries) => entries,
        _ => return Ok(Vec::new()),
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn movie_object_needs_more_than_five_keys() {
        let five = r#"{"a":1,"b":2,"c":3,"d":4,"e":5}"#;
        assert!(matches!(
            parse_movie_object(five),
            Err(Error::MalformedResponse(_))
        ));

        let six = r#"{"a":1,"b":2,"c":3,"d":4,"e":5,"f":6}"#;
        assert_eq!(parse_movie_object(six).unwrap().len(), 6);
    }

    #[test]
    fn movie_object_rejects_non_objects() {
        assert!(parse_movie_object("[1,2,3,4,5,6,7]").is_err());
        assert!(parse_movie_object("null").is_err());
        assert!(parse_movie_object("<html>502</html>").is_err());
        assert!(parse_movie_object("").is_err());
    }

    #[test]
    fn required_path_distinguishes_missing_and_null() {
        let movie = obj(json!({"rating": {"imdb": 7.5, "kp": null}}));
        assert_eq!(required_f64(&movie, &["rating", "imdb"]).unwrap(), Some(7.5));
        assert_eq!(required_f64(&movie, &["rating", "kp"]).unwrap(), None);

        let err = required_f64(&movie, &["rating", "tmdb"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: rating.tmdb");

        let err = required_f64(&obj(json!({})), &["rating", "kp"]).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: rating");
    }

    #[test]
    fn optional_accessors_never_fail() {
        let movie = obj(json!({
            "year": "1999",
            "votes": "many",
            "name": 12,
        }));
        assert_eq!(optional_year(&movie, "year"), Some(1999));
        assert_eq!(optional_string(&movie, "name"), None);
        assert_eq!(optional_string(&movie, "missing"), None);
        assert_eq!(optional_year(&obj(json!({"year": 2010.0})), "year"), Some(2010));
        assert_eq!(optional_year(&obj(json!({"year": null})), "year"), None);
    }

    #[test]
    fn entry_names_filters_and_keeps_order() {
        let movie = obj(json!({
            "genres": [{"name": "drama"}, {"id": 3}, {"name": "crime"}, "loose"],
        }));
        assert_eq!(entry_names(&movie, "genres", "name"), vec!["drama", "crime"]);
        assert!(entry_names(&movie, "countries", "name").is_empty());
    }

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Sample {
        #[serde(deserialize_with = "lenient")]
        rating: Option<f64>,
        #[serde(deserialize_with = "lenient")]
        title: Option<String>,
        #[serde(deserialize_with = "lenient_year")]
        year: Option<i32>,
        #[serde(deserialize_with = "lenient_entries")]
        tags: Vec<Tag>,
    }

    #[derive(Debug, Deserialize)]
    struct Tag {
        tag: String,
    }

    #[test]
    fn lenient_deserializers_absorb_bad_values() {
        let sample: Sample = serde_json::from_value(json!({
            "rating": "many",
            "title": 12,
            "year": "1999",
            "tags": [{"tag": "a"}, {"name": "b"}, {"tag": 3}, "loose", {"tag": "c"}]
        }))
        .unwrap();
        assert_eq!(sample.rating, None);
        assert_eq!(sample.title, None);
        assert_eq!(sample.year, Some(1999));
        let tags: Vec<&str> = sample.tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, vec!["a", "c"]);

        let empty: Sample = serde_json::from_value(json!({"rating": 7, "tags": null})).unwrap();
        assert_eq!(empty.rating, Some(7.0));
        assert!(empty.tags.is_empty());
    }
}
