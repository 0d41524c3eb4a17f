//! Catalog URL identification.
//!
//! Scans a raw input line for a kinopoisk film or series URL and pulls out
//! the numeric identifier used to query the providers.

use std::sync::LazyLock;

use movie_url_common::CatalogReference;
use regex::Regex;
use tracing::debug;

/// Hostname fragment every catalog URL must contain.
pub const CATALOG_HOST: &str = "kinopoisk";

// Greedy prefixes: the last `/film/<N>` on the line wins.
static FILM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*kinopoisk.*/film/([0-9]+)").expect("film pattern"));
static SERIES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r".*kinopoisk.*/series/([0-9]+)").expect("series pattern"));

/// Scan `line` for a catalog URL.
///
/// Film URLs are tried before series URLs. Matching is case-sensitive and
/// runs against the whole line, so surrounding text is allowed. A line that
/// does not match yields a reference with no identifier; that is a normal
/// outcome, not an error.
pub fn extract(line: &str) -> CatalogReference {
    let captured = FILM_RE
        .captures(line)
        .or_else(|| SERIES_RE.captures(line))
        .and_then(|caps| caps.get(1));

    match captured {
        Some(id) => CatalogReference::matched(line, id.as_str(), canonicalize(line)),
        None => {
            debug!(line = %line.trim_end(), "not parsed");
            CatalogReference::unparsed(line)
        }
    }
}

/// Remove every space, carriage return and newline, wherever it occurs.
pub fn canonicalize(line: &str) -> String {
    line.chars()
        .filter(|c| !matches!(c, ' ' | '\r' | '\n'))
        .collect()
}
