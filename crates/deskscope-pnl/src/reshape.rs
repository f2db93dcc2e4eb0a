//! Wide-to-long reshaping.
//!
//! A [`WideTable`] has one row per date and one value column per category.
//! Its long form has one [`LongRow`] per `(date, category)` cell, with the
//! schema `(date, category, value)`. Long rows are emitted column-major:
//! every date of the first column, then every date of the next.

use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// Errors raised while building or pivoting tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReshapeError {
    /// A wide row does not have one value per column
    #[error("Row for {date} has {found} values, expected {expected}")]
    RaggedRow {
        /// Date of the offending row
        date: NaiveDate,
        /// Number of columns
        expected: usize,
        /// Number of values in the row
        found: usize,
    },

    /// Two long rows share the same date and category
    #[error("Duplicate cell for {category} on {date}")]
    DuplicateCell {
        /// Date of the cell
        date: NaiveDate,
        /// Category of the cell
        category: String,
    },

    /// A date is missing a value for one of the categories
    #[error("Missing cell for {category} on {date}")]
    MissingCell {
        /// Date of the cell
        date: NaiveDate,
        /// Category of the cell
        category: String,
    },
}

/// One date of a wide table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideRow {
    /// Row key.
    pub date: NaiveDate,
    /// One value per table column, in column order.
    pub values: Vec<f64>,
}

/// One `(date, category, value)` cell of a long table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    /// Row key of the originating wide row.
    pub date: NaiveDate,
    /// Name of the originating wide column.
    pub category: String,
    /// Cell value.
    pub value: f64,
}

/// A table keyed by date with named numeric columns.
///
/// Deserializing goes through [`WideTable::new`], so a ragged table is
/// rejected there as well.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WideTableParts")]
pub struct WideTable {
    columns: Vec<String>,
    rows: Vec<WideRow>,
}

#[derive(Deserialize)]
struct WideTableParts {
    columns: Vec<String>,
    rows: Vec<WideRow>,
}

impl TryFrom<WideTableParts> for WideTable {
    type Error = ReshapeError;

    fn try_from(parts: WideTableParts) -> Result<Self, Self::Error> {
        Self::new(parts.columns, parts.rows)
    }
}

impl WideTable {
    /// Create a table, checking every row has one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<WideRow>) -> Result<Self, ReshapeError> {
        if let Some(row) = rows.iter().find(|r| r.values.len() != columns.len()) {
            return Err(ReshapeError::RaggedRow {
                date: row.date,
                expected: columns.len(),
                found: row.values.len(),
            });
        }
        Ok(Self { columns, rows })
    }

    /// Column names, excluding the date key.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in table order.
    pub fn rows(&self) -> &[WideRow] {
        &self.rows
    }

    /// Number of value cells (`rows × columns`).
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.columns.len()
    }

    /// The long form of this table.
    pub fn melt(&self) -> Vec<LongRow> {
        melt(self)
    }

    /// The table as a DataFrame with a leading `date` column.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.columns.len() + 1);
        columns.push(Column::new(
            "date".into(),
            self.rows.iter().map(|r| r.date).collect::<Vec<_>>(),
        ));
        for (idx, name) in self.columns.iter().enumerate() {
            columns.push(Column::new(
                name.as_str().into(),
                self.rows.iter().map(|r| r.values[idx]).collect::<Vec<_>>(),
            ));
        }
        DataFrame::new(columns)
    }
}

/// Reshape a wide table to long form, column-major.
///
/// The output has exactly `table.cell_count()` rows.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use deskscope_pnl::{WideRow, WideTable, melt, pivot};
///
/// let day = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap();
/// let wide = WideTable::new(
///     vec!["pnl_new_pos".to_string(), "pnl_resid".to_string()],
///     vec![WideRow {
///         date: day,
///         values: vec![5.0, -1.0],
///     }],
/// )
/// .unwrap();
///
/// let long = melt(&wide);
/// assert_eq!(long.len(), 2);
/// assert_eq!(long[1].category, "pnl_resid");
/// assert_eq!(pivot(&long).unwrap(), wide);
/// ```
pub fn melt(table: &WideTable) -> Vec<LongRow> {
    let mut long = Vec::with_capacity(table.cell_count());
    for (idx, category) in table.columns.iter().enumerate() {
        for row in &table.rows {
            long.push(LongRow {
                date: row.date,
                category: category.clone(),
                value: row.values[idx],
            });
        }
    }
    long
}

/// Rebuild the wide table from long rows.
///
/// Columns come out in first-seen category order and rows in ascending
/// date order, so `pivot(&melt(t)) == t` for any table whose dates are
/// unique and ascending.
pub fn pivot(long: &[LongRow]) -> Result<WideTable, ReshapeError> {
    let mut columns: Vec<String> = Vec::new();
    let mut cells: BTreeMap<NaiveDate, HashMap<&str, f64>> = BTreeMap::new();

    for row in long {
        if !columns.contains(&row.category) {
            columns.push(row.category.clone());
        }
        let by_category = cells.entry(row.date).or_default();
        if by_category.insert(row.category.as_str(), row.value).is_some() {
            return Err(ReshapeError::DuplicateCell {
                date: row.date,
                category: row.category.clone(),
            });
        }
    }

    let mut rows = Vec::with_capacity(cells.len());
    for (date, by_category) in cells {
        let values = columns
            .iter()
            .map(|c| {
                by_category
                    .get(c.as_str())
                    .copied()
                    .ok_or_else(|| ReshapeError::MissingCell {
                        date,
                        category: c.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(WideRow { date, values });
    }

    WideTable::new(columns, rows)
}
