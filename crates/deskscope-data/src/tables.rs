//! In-memory tables and the one-time load of the data directory.

use crate::error::{DataError, Result};
use crate::range::DateRange;
use crate::records::{Desk, DeskNo, PnlObservation, RiskObservation};
use polars::prelude::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Where the three source files live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataConfig {
    /// Directory holding the CSV files.
    pub data_dir: PathBuf,
    /// Desk table file name.
    pub desks_file: String,
    /// PnL table file name.
    pub pnl_file: String,
    /// Risk table file name.
    pub risk_file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            desks_file: "desks.csv".to_string(),
            pnl_file: "pnl.csv".to_string(),
            risk_file: "risk.csv".to_string(),
        }
    }
}

impl DataConfig {
    /// Default file names under a different directory.
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Full path of the desk table.
    pub fn desks_path(&self) -> PathBuf {
        self.data_dir.join(&self.desks_file)
    }

    /// Full path of the PnL table.
    pub fn pnl_path(&self) -> PathBuf {
        self.data_dir.join(&self.pnl_file)
    }

    /// Full path of the risk table.
    pub fn risk_path(&self) -> PathBuf {
        self.data_dir.join(&self.risk_file)
    }
}

fn read_records<T, R>(reader: R, table: &'static str) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    rdr.deserialize()
        .collect::<std::result::Result<Vec<T>, _>>()
        .map_err(|source| DataError::Csv { table, source })
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// The desk reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeskTable {
    rows: Vec<Desk>,
}

impl DeskTable {
    /// Wrap already-parsed rows.
    pub const fn new(rows: Vec<Desk>) -> Self {
        Self { rows }
    }

    /// Read `desks.csv` content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(read_records(reader, "desks")?))
    }

    /// Read `desks.csv` from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(open(path)?)?;
        info!(rows = table.len(), path = %path.display(), "loaded desk table");
        Ok(table)
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[Desk] {
        &self.rows
    }

    /// Number of desks.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First desk with the given name.
    pub fn find_by_name(&self, desk_name: &str) -> Option<&Desk> {
        self.rows.iter().find(|d| d.desk_name == desk_name)
    }

    /// The table as a DataFrame, in source column order.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let df = polars::df!(
            "desk_no" => self.rows.iter().map(|d| d.desk_no.get()).collect::<Vec<_>>(),
            "desk_name" => self.rows.iter().map(|d| d.desk_name.as_str()).collect::<Vec<_>>(),
            "desk_head" => self.rows.iter().map(|d| d.desk_head.as_str()).collect::<Vec<_>>(),
            "office" => self.rows.iter().map(|d| d.office.as_str()).collect::<Vec<_>>(),
            "asset_class" => self.rows.iter().map(|d| d.asset_class.as_str()).collect::<Vec<_>>(),
            "instruments" => self.rows.iter().map(|d| d.instruments.as_str()).collect::<Vec<_>>(),
        )?;
        Ok(df)
    }
}

/// Daily risk exposures for all desks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiskTable {
    rows: Vec<RiskObservation>,
}

impl RiskTable {
    /// Wrap already-parsed rows.
    pub const fn new(rows: Vec<RiskObservation>) -> Self {
        Self { rows }
    }

    /// Read `risk.csv` content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(read_records(reader, "risk")?))
    }

    /// Read `risk.csv` from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(open(path)?)?;
        info!(rows = table.len(), path = %path.display(), "loaded risk table");
        Ok(table)
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[RiskObservation] {
        &self.rows
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one desk inside an inclusive date range, in file order.
    pub fn for_desk(&self, desk_no: DeskNo, range: &DateRange) -> Vec<&RiskObservation> {
        let rows: Vec<_> = self
            .rows
            .iter()
            .filter(|r| r.desk_no == desk_no && range.contains(r.date))
            .collect();
        debug!(%desk_no, %range, rows = rows.len(), "filtered risk table");
        rows
    }
}

/// Daily PnL breakdowns for all desks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlTable {
    rows: Vec<PnlObservation>,
}

impl PnlTable {
    /// Wrap already-parsed rows.
    pub const fn new(rows: Vec<PnlObservation>) -> Self {
        Self { rows }
    }

    /// Read `pnl.csv` content from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::new(read_records(reader, "pnl")?))
    }

    /// Read `pnl.csv` from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(open(path)?)?;
        info!(rows = table.len(), path = %path.display(), "loaded pnl table");
        Ok(table)
    }

    /// All rows in file order.
    pub fn rows(&self) -> &[PnlObservation] {
        &self.rows
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for one desk inside an inclusive date range, in file order.
    pub fn for_desk(&self, desk_no: DeskNo, range: &DateRange) -> Vec<&PnlObservation> {
        let rows: Vec<_> = self
            .rows
            .iter()
            .filter(|r| r.desk_no == desk_no && range.contains(r.date))
            .collect();
        debug!(%desk_no, %range, rows = rows.len(), "filtered pnl table");
        rows
    }
}

/// The three source tables, loaded once and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct DataSet {
    /// Desk reference table.
    pub desks: DeskTable,
    /// Daily PnL.
    pub pnl: PnlTable,
    /// Daily risk exposures.
    pub risk: RiskTable,
}

impl DataSet {
    /// Bundle already-loaded tables.
    pub const fn new(desks: DeskTable, pnl: PnlTable, risk: RiskTable) -> Self {
        Self { desks, pnl, risk }
    }

    /// Load all three tables from the configured directory.
    pub fn load(config: &DataConfig) -> Result<Self> {
        Ok(Self::new(
            DeskTable::from_path(config.desks_path())?,
            PnlTable::from_path(config.pnl_path())?,
            RiskTable::from_path(config.risk_path())?,
        ))
    }
}
