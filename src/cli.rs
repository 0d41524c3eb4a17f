use clap::{ArgAction, Parser};
use movie_url_common::ProviderChoice;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "movie-url-parser")]
#[command(author, version, about = "Fetch movie metadata for catalog URLs and export it as CSV")]
#[command(
    long_about = "Reads kinopoisk film/series URLs (one per line) from the given files, \
fetches each movie from the selected API and writes one CSV row per movie.\n\n\
The API token is read from the TOKEN environment variable (see `token_env` in the config file)."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Output CSV file; without it records are only logged
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// API to query: primary or legacy [default: primary, or `api` from the config file]
    #[arg(long)]
    pub api: Option<ProviderChoice>,

    /// Files with one URL per line
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,
}
