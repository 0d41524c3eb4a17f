mod cli;

use movie_url_parser::{
    batch::{BatchDriver, BatchSummary},
    config,
    metadata::create_provider,
    output::{CsvSink, LogSink, RecordSink},
    Error,
};

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

/// Exit code when the run stops at the failure threshold.
const EXIT_ABORTED: u8 = 1;
/// Exit code for any other fatal error.
const EXIT_ERROR: u8 = 2;

async fn run(cli: Cli) -> Result<BatchSummary> {
    let config = config::load_config_or_default(cli.config.as_deref())?;
    let choice = cli.api.unwrap_or(config.api);

    let token = std::env::var(&config.token_env)
        .map_err(|_| Error::MissingToken(config.token_env.clone()))?;

    let provider = create_provider(
        choice,
        config.endpoint(choice),
        &token,
        config.request_timeout(),
    );
    tracing::debug!(provider = provider.name(), api = %choice, "Provider selected");
    if !provider.is_available() {
        tracing::warn!("{} is empty; every fetch will fail", config.token_env);
    }

    let mut sink: Box<dyn RecordSink> = match &cli.output {
        Some(path) => Box::new(
            CsvSink::create(path).with_context(|| format!("Failed to create {:?}", path))?,
        ),
        None => {
            tracing::info!("No output file given, records are only logged");
            Box::new(LogSink::default())
        }
    };

    let mut driver = BatchDriver::new(provider.as_ref(), sink.as_mut())
        .with_failure_threshold(config.failure_threshold);

    let summary = driver.run_files(&cli.files).await?;
    tracing::info!(
        lines = summary.lines,
        unparsed = summary.unparsed,
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Done"
    );
    Ok(summary)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        match cli.verbose {
            0 => "movie_url_parser=info,movie_url_common=info",
            1 => "movie_url_parser=debug,movie_url_common=debug",
            _ => "movie_url_parser=trace,movie_url_common=trace,reqwest=debug",
        }
        .to_string()
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    if cli.verbose > 0 {
        tracing::info!("Verbose mode on");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => return report(&e.into()),
    };

    let outcome = runtime.block_on(async {
        tokio::select! {
            result = run(cli) => Some(result),
            Ok(()) = tokio::signal::ctrl_c() => None,
        }
    });

    match outcome {
        Some(Ok(_)) => ExitCode::SUCCESS,
        None => {
            tracing::info!("Interrupted");
            ExitCode::SUCCESS
        }
        Some(Err(e)) => report(&e),
    }
}

/// Print a fatal error and pick the exit code.
fn report(err: &anyhow::Error) -> ExitCode {
    if let Some(e @ Error::FailureThresholdExceeded { .. }) = err.downcast_ref::<Error>() {
        tracing::error!("{}", e);
        return ExitCode::from(EXIT_ABORTED);
    }

    let program = std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| std::path::Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "movie-url-parser".to_string());
    let indent = " ".repeat(program.len());

    eprintln!("{}: {:#}", program, err);
    eprintln!("{}  for help use --help", indent);
    ExitCode::from(EXIT_ERROR)
}
