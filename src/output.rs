//! Record sinks.
//!
//! [`CsvSink`] persists records as CSV; [`LogSink`] is the print-only mode
//! used when no output file is given. List columns are written as a JSON
//! array of strings in a single cell.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use movie_url_common::{Error, MovieRecord, Result};
use tracing::info;

/// Destination for normalized records.
///
/// The batch driver calls [`write_header`](RecordSink::write_header) once,
/// before the first record.
pub trait RecordSink {
    fn write_header(&mut self, fields: &[&str]) -> Result<()>;

    fn write_record(&mut self, record: &MovieRecord) -> Result<()>;

    /// Flush buffered output at the end of a run.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// CSV output.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl CsvSink<File> {
    /// Create (or truncate) the file at `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::from_writer(file))
    }
}

impl<W: Write> CsvSink<W> {
    pub fn from_writer(writer: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);
        Self { writer }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| Error::output(e.to_string()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write_header(&mut self, fields: &[&str]) -> Result<()> {
        self.writer
            .write_record(fields)
            .map_err(|e| Error::output(e.to_string()))
    }

    fn write_record(&mut self, record: &MovieRecord) -> Result<()> {
        self.writer
            .write_record(record_row(record)?)
            .map_err(|e| Error::output(e.to_string()))
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Print-only sink: records go to the log, nothing is persisted.
#[derive(Debug, Default)]
pub struct LogSink {
    pub written: usize,
}

impl RecordSink for LogSink {
    fn write_header(&mut self, _fields: &[&str]) -> Result<()> {
        Ok(())
    }

    fn write_record(&mut self, record: &MovieRecord) -> Result<()> {
        self.written += 1;
        info!(
            url = %record.url,
            imdb = ?record.imdb_rating,
            kp = ?record.kp_rating,
            year = ?record.year,
            name = ?record.name,
            alternative_name = ?record.alternative_name,
            short_description = ?record.short_description,
            genres = ?record.genres,
            countries = ?record.countries,
            "record"
        );
        Ok(())
    }
}

/// Cells of one CSV row, in [`MovieRecord::FIELDS`] order.
pub fn record_row(record: &MovieRecord) -> Result<[String; 9]> {
    Ok([
        record.url.clone(),
        record.imdb_rating.map(number_cell).unwrap_or_default(),
        record.kp_rating.map(number_cell).unwrap_or_default(),
        record.year.map(|y| y.to_string()).unwrap_or_default(),
        record.name.clone().unwrap_or_default(),
        record.alternative_name.clone().unwrap_or_default(),
        record.short_description.clone().unwrap_or_default(),
        list_cell(&record.genres)?,
        list_cell(&record.countries)?,
    ])
}

/// Integral ratings keep one decimal (`8.0`, not `8`).
fn number_cell(value: f64) -> String {
    if value.fract() == 0.0 && value.is_finite() {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn list_cell(values: &[String]) -> Result<String> {
    serde_json::to_string(values).map_err(|e| Error::output(e.to_string()))
}
