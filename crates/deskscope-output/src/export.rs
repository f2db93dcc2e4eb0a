//! CSV and JSON export of chart tables.

use crate::chart::{Chart, ChartData};
use deskscope_pnl::ReshapeError;
use polars::prelude::PolarsError;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized output was not UTF-8.
    #[error("Output is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// DataFrame construction error.
    #[error("DataFrame error: {0}")]
    Polars(#[from] PolarsError),

    /// Chart table could not be reshaped.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    /// Format not supported for this value.
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Serialize records to CSV with a header row.
pub(crate) fn to_csv_string<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for Chart {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => match &self.data {
                ChartData::RiskLimit { bars } => to_csv_string(bars),
                ChartData::Points(series) => to_csv_string(&series.points),
                ChartData::Stacked { bars, .. } => to_csv_string(bars),
            },
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Write `<name>.csv` and `<name>.vl.json` for a chart into `dir`.
///
/// The directory is created if needed. Returns the written paths.
pub fn write_chart_files(chart: &Chart, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir)?;

    let csv_path = dir.join(format!("{}.{}", chart.name, ExportFormat::Csv.extension()));
    chart.export_to_file(&csv_path, ExportFormat::Csv)?;

    let vl_path = dir.join(format!("{}.vl.json", chart.name));
    let spec = serde_json::to_string_pretty(&chart.to_vega_lite()?)?;
    fs::write(&vl_path, spec)?;

    info!(chart = %chart.name, dir = %dir.display(), "wrote chart files");
    Ok(vec![csv_path, vl_path])
}
