//! Batch driver: line-by-line extract, fetch, normalize and write.
//!
//! Lines are processed strictly one after another. A success resets the
//! consecutive-failure counter; once the counter exceeds the threshold the
//! whole run stops with [`Error::FailureThresholdExceeded`]. The counter is
//! shared by every input source of a run.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use movie_url_common::{Error, MovieRecord, Result};
use tracing::{debug, info, info_span, warn, Instrument};

use crate::extract::extract;
use crate::metadata::ProviderAdapter;
use crate::output::RecordSink;

/// Consecutive failures tolerated before a run aborts.
pub const DEFAULT_FAILURE_THRESHOLD: u32 = 5;

/// Mutable state of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    pub consecutive_failures: u32,
    pub header_written: bool,
}

/// What happened to one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineState {
    /// No catalog URL on the line; skipped without touching the counter.
    Unparsed,
    /// Record fetched, normalized and written.
    Succeeded,
    /// Fetch or normalization failed; counted toward the threshold.
    Failed,
}

/// Totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub sources: usize,
    pub lines: usize,
    pub unparsed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn count(&mut self, state: LineState) {
        self.lines += 1;
        match state {
            LineState::Unparsed => self.unparsed += 1,
            LineState::Succeeded => self.succeeded += 1,
            LineState::Failed => self.failed += 1,
        }
    }
}

/// Drives one run over any number of input sources.
pub struct BatchDriver<'a> {
    provider: &'a dyn ProviderAdapter,
    sink: &'a mut dyn RecordSink,
    failure_threshold: u32,
    state: RunState,
    summary: BatchSummary,
}

impl<'a> BatchDriver<'a> {
    pub fn new(provider: &'a dyn ProviderAdapter, sink: &'a mut dyn RecordSink) -> Self {
        Self {
            provider,
            sink,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            state: RunState::default(),
            summary: BatchSummary::default(),
        }
    }

    pub fn with_failure_threshold(mut self, threshold: u32) -> Self {
        self.failure_threshold = threshold;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn summary(&self) -> &BatchSummary {
        &self.summary
    }

    /// Process every file in order, then flush the sink.
    pub async fn run_files(&mut self, paths: &[PathBuf]) -> Result<BatchSummary> {
        for path in paths {
            self.run_file(path).await?;
        }
        self.finish()
    }

    /// Process one input file.
    pub async fn run_file(&mut self, path: &Path) -> Result<()> {
        info!("parsing {}", path.display());
        let file = File::open(path)?;
        self.run_reader(BufReader::new(file))
            .instrument(info_span!("source", path = %path.display()))
            .await
    }

    /// Process every line of `reader`.
    ///
    /// Lines are decoded lossily: invalid UTF-8 becomes U+FFFD and the line
    /// goes through extraction like any other.
    pub async fn run_reader<R: BufRead>(&mut self, mut reader: R) -> Result<()> {
        self.summary.sources += 1;
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            if buf.ends_with(b"\n") {
                buf.pop();
                if buf.ends_with(b"\r") {
                    buf.pop();
                }
            }

            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                debug!(line = %line, "line is not valid UTF-8");
            }
            self.process_line(&line).await?;
        }
        Ok(())
    }

    /// Flush the sink and return the totals.
    pub fn finish(&mut self) -> Result<BatchSummary> {
        self.sink.finish()?;
        Ok(self.summary.clone())
    }

    /// Process a single line and apply the threshold check.
    ///
    /// Returns `Err` for fatal conditions only: the threshold being exceeded
    /// or the sink failing.
    pub async fn process_line(&mut self, line: &str) -> Result<LineState> {
        let outcome = self.fetch_line(line).await;
        let state = self.settle(line, outcome)?;
        self.summary.count(state);

        if self.state.consecutive_failures > self.failure_threshold {
            warn!(
                failures = self.state.consecutive_failures,
                limit = self.failure_threshold,
                "too many consecutive failures, aborting"
            );
            return Err(Error::FailureThresholdExceeded {
                failures: self.state.consecutive_failures,
                limit: self.failure_threshold,
            });
        }

        Ok(state)
    }

    async fn fetch_line(&self, line: &str) -> Result<MovieRecord> {
        let reference = extract(line);
        let (identifier, url) = reference.target()?;

        self.provider
            .fetch_and_normalize(identifier, url)
            .instrument(info_span!("fetching", id = identifier))
            .await
    }

    /// Decide what an outcome means for the run.
    fn settle(&mut self, line: &str, outcome: Result<MovieRecord>) -> Result<LineState> {
        match outcome {
            Ok(record) => {
                debug!(?record, "fetched");
                self.emit(&record)?;
                self.state.consecutive_failures = 0;
                Ok(LineState::Succeeded)
            }
            Err(Error::UnparsedLine(_)) => Ok(LineState::Unparsed),
            Err(e) if e.is_record_failure() => {
                self.state.consecutive_failures += 1;
                warn!(
                    line = %line.trim_end(),
                    failures = self.state.consecutive_failures,
                    "{}",
                    e
                );
                Ok(LineState::Failed)
            }
            Err(e) => Err(e),
        }
    }

    fn emit(&mut self, record: &MovieRecord) -> Result<()> {
        if !self.state.header_written {
            self.sink.write_header(&MovieRecord::FIELDS)?;
            self.state.header_written = true;
        }
        self.sink.write_record(record)
    }
}
