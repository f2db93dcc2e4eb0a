//! The full interaction: selectors, date range, risk chart and PnL charts.

use deskscope_data::{DataError, DataSet, DateRange, DateWindow};
use deskscope_output::{Chart, DeskHeader, ExportError, ExportFormat, Exporter, write_chart_files};
use deskscope_pnl::{PnlSlice, ReshapeError};
use deskscope_risk::{RiskError, RiskPoint, RiskView};
use deskscope_select::{SelectError, SelectorState, Selections, resolve};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Notice shown instead of the charts when nothing matches.
pub const NO_DATA_NOTICE: &str = "No data for this desk and date range";

/// Errors raised while building a dashboard.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Loading or date handling failed.
    #[error(transparent)]
    Data(#[from] DataError),

    /// A selector value is not among the options.
    #[error(transparent)]
    Select(#[from] SelectError),

    /// The risk factor is not among the options.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// A PnL table could not be reshaped.
    #[error(transparent)]
    Reshape(#[from] ReshapeError),

    /// Writing chart output failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Result type for dashboard operations.
pub type Result<T> = std::result::Result<T, DashboardError>;

/// What the user asked for in one interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    /// Desk selectors.
    pub selections: Selections,
    /// Inclusive date range.
    pub range: DateRange,
    /// Risk factor to chart; `None` takes the first option.
    pub risk_factor: Option<String>,
}

impl DashboardRequest {
    /// A request for the given selectors and range, default risk factor.
    pub const fn new(selections: Selections, range: DateRange) -> Self {
        Self {
            selections,
            range,
            risk_factor: None,
        }
    }

    /// Pick a risk factor instead of the first option.
    pub fn with_risk_factor(mut self, risk_factor: impl Into<String>) -> Self {
        self.risk_factor = Some(risk_factor.into());
        self
    }
}

impl Default for DashboardRequest {
    fn default() -> Self {
        Self::new(Selections::default(), DateWindow::default().full_range())
    }
}

/// Why nothing was charted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoDataReason {
    /// The cascade offered no desk.
    NoDesk,
    /// The desk has no risk rows in the range.
    NoRiskData,
}

/// Everything drawn for one desk and range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    /// Selector option lists and the resolved desk.
    pub selectors: SelectorState,
    /// Range the charts cover.
    pub range: DateRange,
    /// Desk header lines.
    pub header: DeskHeader,
    /// Risk-factor selector options.
    pub risk_factors: Vec<String>,
    /// The charted risk factor.
    pub risk_factor: String,
    /// Days the charted exposure exceeded its limit, in source order.
    pub limit_breaches: Vec<RiskPoint>,
    /// Highest exposure-to-limit ratio of the charted factor.
    pub peak_utilisation: Option<f64>,
    /// Exposure bars with the limit line.
    pub risk: Chart,
    /// PnL charts in display order.
    pub pnl: Vec<Chart>,
}

/// Result of one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardOutcome {
    /// Nothing to chart; the notice replaces the charts.
    NoData {
        /// User-visible notice.
        notice: &'static str,
        /// What came up empty.
        reason: NoDataReason,
        /// Selector state reached before stopping.
        selectors: SelectorState,
        /// Header of the resolved desk, when there is one.
        header: Option<DeskHeader>,
        /// Requested range.
        range: DateRange,
    },
    /// Charts are ready.
    Ready(Box<Dashboard>),
}

/// Run the selectors, filters and reshapes for one request.
///
/// An empty desk list or empty risk data is not an error: it yields
/// [`DashboardOutcome::NoData`] and no chart is built.
pub fn build_dashboard(data: &DataSet, request: &DashboardRequest) -> Result<DashboardOutcome> {
    let selectors = resolve(&data.desks, &request.selections)?;
    let range = request.range;

    let Some(desk) = selectors.desk.clone() else {
        warn!(%range, "no desk offered for the current selection");
        return Ok(no_data(NoDataReason::NoDesk, selectors, None, range));
    };
    let header = DeskHeader::from(&desk);

    let Some(view) = RiskView::build(&data.risk, desk.desk_no, &range) else {
        return Ok(no_data(NoDataReason::NoRiskData, selectors, Some(header), range));
    };
    let slice = view.select(request.risk_factor.as_deref())?;

    let pnl = PnlSlice::build(&data.pnl, desk.desk_no, &range).charts()?;
    let mut pnl_charts = vec![Chart::total(&pnl.total)];
    pnl_charts.extend(pnl.breakdowns().into_iter().map(Chart::breakdown));

    debug!(
        desk = %desk.desk_name,
        risk_factor = %slice.risk_name,
        charts = pnl_charts.len() + 1,
        "built dashboard"
    );

    Ok(DashboardOutcome::Ready(Box::new(Dashboard {
        selectors,
        range,
        header,
        risk_factors: view.factors().to_vec(),
        risk_factor: slice.risk_name.clone(),
        limit_breaches: slice.breaches().into_iter().copied().collect(),
        peak_utilisation: slice.peak_utilisation(),
        risk: Chart::risk(&slice),
        pnl: pnl_charts,
    })))
}

fn no_data(
    reason: NoDataReason,
    selectors: SelectorState,
    header: Option<DeskHeader>,
    range: DateRange,
) -> DashboardOutcome {
    DashboardOutcome::NoData {
        notice: NO_DATA_NOTICE,
        reason,
        selectors,
        header,
        range,
    }
}

impl Dashboard {
    /// Risk chart first, then the PnL charts.
    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        std::iter::once(&self.risk).chain(&self.pnl)
    }

    /// Header, selector state and every chart as terminal text.
    pub fn to_text(&self) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("{}\n", self.header));
        output.push_str(&format!("Date range: {}\n", self.range));
        output.push_str(&format!(
            "Risk factor: {} (options: {})\n",
            self.risk_factor,
            self.risk_factors.join(", ")
        ));

        output.push_str(&self.limit_summary());

        output.push_str("\nRisk\n");
        output.push_str(&self.risk.to_ascii_table()?);

        output.push_str("\nPnL charts\n");
        for chart in &self.pnl {
            output.push_str(&chart.to_ascii_table()?);
        }
        Ok(output)
    }

    /// Header, limit summary and every chart table as Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        let [desk_line, office_line] = self.header.lines();
        let mut output = String::new();
        output.push_str(&format!("# {}\n\n", self.header.desk_name));
        output.push_str(&format!("{desk_line}  \n{office_line}\n\n"));
        output.push_str(&format!("Date range: {}  \n", self.range));
        output.push_str(&format!("Risk factor: {}  \n", self.risk_factor));
        output.push_str(&self.limit_summary().replace('\n', "  \n"));

        for chart in self.charts() {
            output.push('\n');
            output.push_str(&chart.to_markdown()?);
        }
        Ok(output)
    }

    /// Breach count with dates, then peak utilisation.
    fn limit_summary(&self) -> String {
        let breaches = if self.limit_breaches.is_empty() {
            "none".to_string()
        } else {
            self.limit_breaches
                .iter()
                .map(|p| format!("{} ({} over {})", p.date, p.exposure, p.limit))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let peak = self
            .peak_utilisation
            .map_or_else(|| "n/a".to_string(), |u| format!("{:.1}%", u * 100.0));
        format!("Limit breaches: {breaches}\nPeak utilisation: {peak}\n")
    }

    /// Write `<name>.csv` and `<name>.vl.json` for every chart into `dir`.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for chart in self.charts() {
            written.extend(write_chart_files(chart, dir)?);
        }
        Ok(written)
    }
}

impl Exporter for DashboardOutcome {
    fn export_to_string(&self, format: ExportFormat) -> std::result::Result<String, ExportError> {
        match format {
            ExportFormat::Csv => Err(ExportError::InvalidFormat(
                "a dashboard holds several tables; export its charts individually".to_string(),
            )),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
