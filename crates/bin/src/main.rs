//! deskscope CLI binary.
//!
//! Provides a command-line interface to the desk risk and PnL views.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use deskscope::{DashboardOutcome, DashboardRequest, NO_DATA_NOTICE, build_dashboard};
use deskscope_data::date::parse_day_first;
use deskscope_data::{DataConfig, DataError, DataSet, DateRange, DateWindow};
use deskscope_output::{ExportFormat, Exporter};
use deskscope_risk::risk_factor_options;
use deskscope_select::{ALL_ASSET_CLASSES, ALL_OFFICES, Selections, resolve};
use std::io;
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "deskscope")]
#[command(about = "deskscope: desk risk-limit and PnL breakdown explorer", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding desks.csv, pnl.csv and risk.csv
    #[arg(long, global = true, env = "DESKSCOPE_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the raw desk table
    Desks,

    /// Print the options each selector offers
    Options {
        #[command(flatten)]
        selectors: SelectorArgs,
    },

    /// Build the risk and PnL charts for one desk
    View {
        #[command(flatten)]
        selectors: SelectorArgs,

        /// Risk factor to chart (first option when omitted)
        #[arg(long)]
        risk_factor: Option<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write each chart as <name>.csv and <name>.vl.json into this directory
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SelectorArgs {
    /// Asset class
    #[arg(long, default_value = ALL_ASSET_CLASSES)]
    asset_class: String,

    /// Office
    #[arg(long, default_value = ALL_OFFICES)]
    office: String,

    /// Desk name (first desk offered when omitted)
    #[arg(long)]
    desk: Option<String>,

    /// First day of the range, DD/MM/YYYY or YYYY-MM-DD; alone it picks a single day
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,

    /// Last day of the range
    #[arg(long, value_parser = parse_date, requires = "from")]
    to: Option<NaiveDate>,
}

impl SelectorArgs {
    fn selections(&self) -> Selections {
        Selections::from_labels(&self.asset_class, &self.office, self.desk.as_deref())
    }

    /// The picked range, the whole window when no date is given.
    fn range(&self) -> Result<DateRange, DataError> {
        let window = DateWindow::default();
        let picked: Vec<NaiveDate> = self.from.into_iter().chain(self.to).collect();
        if picked.is_empty() {
            Ok(window.full_range())
        } else {
            window.pick(&picked)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    parse_day_first(raw).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data = DataSet::load(&DataConfig::with_data_dir(cli.data_dir))?;

    match cli.command {
        Commands::Desks => {
            println!("Desk data");
            println!("{}", data.desks.to_dataframe()?);
        }
        Commands::Options { selectors } => {
            print_options(&data, &selectors)?;
        }
        Commands::View {
            selectors,
            risk_factor,
            format,
            out_dir,
        } => {
            let request = DashboardRequest {
                selections: selectors.selections(),
                range: selectors.range()?,
                risk_factor,
            };
            view(&data, &request, format, out_dir.as_deref())?;
        }
    }

    Ok(())
}

fn print_options(
    data: &DataSet,
    selectors: &SelectorArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = resolve(&data.desks, &selectors.selections())?;
    let range = selectors.range()?;

    println!("Asset class: {}", state.asset_classes.join(", "));
    println!("Office:      {}", state.offices.join(", "));
    println!("Desk:        {}", state.desks.join(", "));

    let Some(desk) = &state.desk else {
        println!("\n{NO_DATA_NOTICE}");
        return Ok(());
    };

    let factors = risk_factor_options(&data.risk, desk.desk_no, &range);
    println!("\nRisk factors for {} ({}):", desk.desk_name, range);
    if factors.is_empty() {
        println!("  {NO_DATA_NOTICE}");
    }
    for factor in factors {
        println!("  {}", factor);
    }

    Ok(())
}

fn view(
    data: &DataSet,
    request: &DashboardRequest,
    format: OutputFormat,
    out_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let outcome = build_dashboard(data, request)?;

    match (&outcome, format) {
        (_, OutputFormat::Json) => {
            println!("{}", outcome.export_to_string(ExportFormat::PrettyJson)?);
        }
        (DashboardOutcome::Ready(dashboard), OutputFormat::Text) => {
            print!("{}", dashboard.to_text()?);
            println!("\nDesk data");
            println!("{}", data.desks.to_dataframe()?);
        }
        (DashboardOutcome::Ready(dashboard), OutputFormat::Markdown) => {
            print!("{}", dashboard.to_markdown()?);
        }
        (DashboardOutcome::NoData { notice, header, .. }, _) => {
            if let Some(header) = header {
                println!("{header}");
            }
            println!("{notice}");
        }
    }

    if let (Some(dir), DashboardOutcome::Ready(dashboard)) = (out_dir, &outcome) {
        let written = dashboard.write_to(dir)?;
        info!(files = written.len(), dir = %dir.display(), "exported charts");
        eprintln!("Wrote {} files to {}", written.len(), dir.display());
    }

    Ok(())
}
