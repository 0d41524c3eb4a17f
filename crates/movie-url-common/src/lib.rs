//! Movie-URL-Common: Shared types and errors.
//!
//! This crate holds the provider-independent pieces of movie-url-parser:
//!
//! - **Catalog references**: the result of scanning one input line for a
//!   catalog URL
//! - **Provider choice**: which upstream API and response schema is in use
//! - **Fetch results**: the raw outcome of one upstream request
//! - **Movie records**: the flat schema every provider normalizes into
//! - **Error handling**: a single error type covering every per-line and
//!   run-level failure
//!
//! # Examples
//!
//! ```
//! use movie_url_common::{MovieRecord, ProviderChoice};
//!
//! let choice: ProviderChoice = "legacy".parse().unwrap();
//! assert_eq!(choice, ProviderChoice::Legacy);
//! assert_eq!(MovieRecord::FIELDS[0], "url");
//! ```

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::*;
