//! Chart tables and the field names bound to their axes, colour and tooltips.
//!
//! A [`Chart`] is the unit handed to a renderer: a title, a precisely shaped
//! table and an [`Encoding`] naming which table fields drive which channel.

use crate::export::ExportError;
use chrono::NaiveDate;
use deskscope_pnl::{Breakdown, LongRow, Projection, ScalarSeries, WideRow, WideTable, pivot};
use deskscope_risk::RiskSlice;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Date axis field.
pub const DATE_FIELD: &str = "date";
/// Risk bar field.
pub const EXPOSURE_FIELD: &str = "exposure";
/// Risk limit line field.
pub const LIMIT_FIELD: &str = "limit";
/// PnL value field of the PnL charts.
pub const PNL_FIELD: &str = "PnL";
/// Category field of the stacked PnL charts.
pub const PNL_TYPE_FIELD: &str = "PnL type";

const DATE_FORMAT: &str = "%Y-%m-%d";
const PNL_AXIS_TITLE: &str = "PnL (USD)";

/// One day of the risk chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskBar {
    /// Observation date.
    pub date: NaiveDate,
    /// Bar height.
    pub exposure: f64,
    /// Limit line value.
    pub limit: f64,
}

/// One point of a scalar PnL series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    /// Business date.
    pub date: NaiveDate,
    /// PnL value.
    #[serde(rename = "PnL")]
    pub pnl: f64,
}

/// One stacked bar segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlBar {
    /// Business date.
    pub date: NaiveDate,
    /// Component column the segment comes from.
    #[serde(rename = "PnL type")]
    pub pnl_type: String,
    /// PnL value.
    #[serde(rename = "PnL")]
    pub pnl: f64,
}

/// A named scalar series drawn as points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointSeries {
    /// Source column name.
    pub column: String,
    /// Points ascending by date.
    pub points: Vec<PnlPoint>,
}

impl From<&ScalarSeries> for PointSeries {
    fn from(series: &ScalarSeries) -> Self {
        Self {
            column: series.column.column().to_string(),
            points: series
                .points
                .iter()
                .map(|&(date, pnl)| PnlPoint { date, pnl })
                .collect(),
        }
    }
}

/// The table behind a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartData {
    /// Exposure bars with a limit line.
    RiskLimit {
        /// Bars in source order.
        bars: Vec<RiskBar>,
    },
    /// A scalar series drawn as points.
    Points(PointSeries),
    /// Long-form bars stacked by category, with an optional point overlay.
    Stacked {
        /// `(date, PnL type, PnL)` triples.
        bars: Vec<PnlBar>,
        /// Series drawn as points over the bars.
        overlay: Option<PointSeries>,
    },
}

/// Vega-Lite measurement type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Dates.
    Temporal,
    /// Numbers.
    Quantitative,
    /// Categories.
    Nominal,
}

/// A field shown in the chart tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipField {
    /// Table field.
    pub field: String,
    /// Measurement type.
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Display title, the field name when absent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    /// d3 number or time format.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub format: Option<String>,
}

impl TooltipField {
    fn new(field: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            kind,
            title: None,
            format: None,
        }
    }

    fn date() -> Self {
        Self::new(DATE_FIELD, FieldKind::Temporal).with_format(DATE_FORMAT)
    }

    fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }
}

/// Field names bound to the chart channels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    /// x-axis field, always the date.
    pub x: String,
    /// x-axis title.
    pub x_title: Option<String>,
    /// y-axis field.
    pub y: String,
    /// y-axis title.
    pub y_title: String,
    /// Colour field for stacked bars.
    pub color: Option<String>,
    /// Tooltip fields in display order.
    pub tooltip: Vec<TooltipField>,
}

/// A titled chart table with its encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Identifier, used for file names.
    pub name: String,
    /// Chart title.
    pub title: String,
    /// Channel bindings.
    pub encoding: Encoding,
    /// Table behind the chart.
    pub data: ChartData,
}

impl Chart {
    /// The risk chart: exposure bars with the limit line, titled by factor.
    pub fn risk(slice: &RiskSlice) -> Self {
        let bars = slice
            .points
            .iter()
            .map(|p| RiskBar {
                date: p.date,
                exposure: p.exposure,
                limit: p.limit,
            })
            .collect();

        Self {
            name: "risk".to_string(),
            title: slice.risk_name.clone(),
            encoding: Encoding {
                x: DATE_FIELD.to_string(),
                x_title: Some("Date".to_string()),
                y: EXPOSURE_FIELD.to_string(),
                y_title: "Exposure (USD)".to_string(),
                color: None,
                tooltip: vec![
                    TooltipField::date(),
                    TooltipField::new(EXPOSURE_FIELD, FieldKind::Quantitative)
                        .with_title(format!("{} utilisation (USD)", slice.risk_name))
                        .with_format(","),
                ],
            },
            data: ChartData::RiskLimit { bars },
        }
    }

    /// The total PnL chart, drawn as points.
    pub fn total(series: &ScalarSeries) -> Self {
        Self {
            name: Projection::Total.slug().to_string(),
            title: projection_title(Projection::Total).to_string(),
            encoding: Encoding {
                x: DATE_FIELD.to_string(),
                x_title: None,
                y: PNL_FIELD.to_string(),
                y_title: PNL_AXIS_TITLE.to_string(),
                color: None,
                tooltip: vec![TooltipField::date(), pnl_tooltip()],
            },
            data: ChartData::Points(series.into()),
        }
    }

    /// A stacked breakdown chart with its optional point overlay.
    pub fn breakdown(breakdown: &Breakdown) -> Self {
        let bars = breakdown
            .long
            .iter()
            .map(|r| PnlBar {
                date: r.date,
                pnl_type: r.category.clone(),
                pnl: r.value,
            })
            .collect();

        Self {
            name: breakdown.projection.slug().to_string(),
            title: projection_title(breakdown.projection).to_string(),
            encoding: Encoding {
                x: DATE_FIELD.to_string(),
                x_title: None,
                y: PNL_FIELD.to_string(),
                y_title: PNL_AXIS_TITLE.to_string(),
                color: Some(PNL_TYPE_FIELD.to_string()),
                tooltip: vec![
                    TooltipField::date(),
                    pnl_tooltip(),
                    TooltipField::new(PNL_TYPE_FIELD, FieldKind::Nominal),
                ],
            },
            data: ChartData::Stacked {
                bars,
                overlay: breakdown.overlay.as_ref().map(PointSeries::from),
            },
        }
    }

    /// Number of rows in the primary table.
    pub fn row_count(&self) -> usize {
        match &self.data {
            ChartData::RiskLimit { bars } => bars.len(),
            ChartData::Points(series) => series.points.len(),
            ChartData::Stacked { bars, .. } => bars.len(),
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// The chart table pivoted to one row per date.
    ///
    /// Stacked bars become one column per `PnL type`; the overlay, if any,
    /// is appended as a last column named after its source.
    pub fn to_wide(&self) -> Result<WideTable, ExportError> {
        let table = match &self.data {
            ChartData::RiskLimit { bars } => WideTable::new(
                vec![EXPOSURE_FIELD.to_string(), LIMIT_FIELD.to_string()],
                bars.iter()
                    .map(|b| WideRow {
                        date: b.date,
                        values: vec![b.exposure, b.limit],
                    })
                    .collect(),
            )?,
            ChartData::Points(series) => series_table(series)?,
            ChartData::Stacked { bars, overlay } => {
                let long: Vec<LongRow> = bars
                    .iter()
                    .map(|b| LongRow {
                        date: b.date,
                        category: b.pnl_type.clone(),
                        value: b.pnl,
                    })
                    .collect();
                let wide = pivot(&long)?;
                match overlay {
                    Some(series) => append_series(wide, series)?,
                    None => wide,
                }
            }
        };
        Ok(table)
    }

    /// The wide chart table as a DataFrame.
    pub fn to_dataframe(&self) -> Result<DataFrame, ExportError> {
        Ok(self.to_wide()?.to_dataframe()?)
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> Result<String, ExportError> {
        let mut output = String::new();
        output.push_str(&format!("\n{}\n", self.title));
        output.push_str(&"=".repeat(80));
        output.push('\n');
        if self.is_empty() {
            output.push_str("(no rows)\n");
        } else {
            output.push_str(&format!("{}\n", self.to_dataframe()?));
        }
        Ok(output)
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> Result<String, ExportError> {
        let wide = self.to_wide()?;
        let mut output = String::new();

        output.push_str(&format!("## {}\n\n", self.title));
        if wide.rows().is_empty() {
            output.push_str("_No rows._\n");
            return Ok(output);
        }

        output.push_str(&format!("| {DATE_FIELD} |"));
        for column in wide.columns() {
            output.push_str(&format!(" {column} |"));
        }
        output.push_str("\n|------|");
        output.push_str(&"---:|".repeat(wide.columns().len()));
        output.push('\n');

        for row in wide.rows() {
            output.push_str(&format!("| {} |", row.date));
            for value in &row.values {
                output.push_str(&format!(" {value} |"));
            }
            output.push('\n');
        }

        Ok(output)
    }
}

/// Display title of a PnL projection chart.
pub const fn projection_title(projection: Projection) -> &'static str {
    match projection {
        Projection::Total => "Total PnL",
        Projection::ComponentBreakdown => "Total PnL (daily)",
        Projection::ExistingPositionBreakdown => "Existing vs new positions PnL",
        Projection::ExistingPositionAttribution => "Existing positions PnL",
        Projection::RiskFactorBreakdown => "Risk factor PnL",
    }
}

fn pnl_tooltip() -> TooltipField {
    TooltipField::new(PNL_FIELD, FieldKind::Quantitative)
        .with_title(PNL_AXIS_TITLE)
        .with_format(",d")
}

fn series_table(series: &PointSeries) -> Result<WideTable, ExportError> {
    Ok(WideTable::new(
        vec![series.column.clone()],
        series
            .points
            .iter()
            .map(|p| WideRow {
                date: p.date,
                values: vec![p.pnl],
            })
            .collect(),
    )?)
}

fn append_series(wide: WideTable, series: &PointSeries) -> Result<WideTable, ExportError> {
    let by_date: HashMap<NaiveDate, f64> = series.points.iter().map(|p| (p.date, p.pnl)).collect();

    let mut columns = wide.columns().to_vec();
    columns.push(series.column.clone());

    let rows = wide
        .rows()
        .iter()
        .map(|row| -> Result<WideRow, ExportError> {
            let value = by_date.get(&row.date).copied().ok_or_else(|| {
                deskscope_pnl::ReshapeError::MissingCell {
                    date: row.date,
                    category: series.column.clone(),
                }
            })?;
            let mut values = row.values.clone();
            values.push(value);
            Ok(WideRow {
                date: row.date,
                values,
            })
        })
        .collect::<Result<Vec<_>, ExportError>>()?;

    Ok(WideTable::new(columns, rows)?)
}
