//! Chart tables built from the sample data and written to disk.

use chrono::NaiveDate;
use deskscope_data::{DataConfig, DataSet, DateRange, DeskNo};
use deskscope_output::{Chart, ChartData, ExportFormat, Exporter, write_chart_files};
use deskscope_pnl::PnlSlice;
use deskscope_risk::RiskView;
use std::path::PathBuf;

fn sample_data() -> DataSet {
    let config =
        DataConfig::with_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"));
    DataSet::load(&config).unwrap()
}

fn first_week() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 1, 7).unwrap(),
    )
    .unwrap()
}

fn sample_charts() -> Vec<Chart> {
    let data = sample_data();
    let desk = DeskNo::new(1);

    let risk = RiskView::build(&data.risk, desk, &first_week()).unwrap();
    let pnl = PnlSlice::build(&data.pnl, desk, &first_week())
        .charts()
        .unwrap();

    let mut charts = vec![Chart::risk(&risk.select(None).unwrap()), Chart::total(&pnl.total)];
    charts.extend(pnl.breakdowns().into_iter().map(Chart::breakdown));
    charts
}

#[test]
fn test_chart_names_are_distinct() {
    let charts = sample_charts();
    assert_eq!(charts.len(), 6);
    for (i, a) in charts.iter().enumerate() {
        assert!(charts[i + 1..].iter().all(|b| a.name != b.name));
    }
}

#[test]
fn test_stacked_charts_cover_every_cell() {
    for chart in sample_charts() {
        if let ChartData::Stacked { bars, overlay } = &chart.data {
            let wide = chart.to_wide().unwrap();
            let bar_columns = wide.columns().len() - usize::from(overlay.is_some());
            assert_eq!(bars.len(), wide.rows().len() * bar_columns);
        }
    }
}

#[test]
fn test_csv_row_counts() {
    for chart in sample_charts() {
        let csv = chart.export_to_string(ExportFormat::Csv).unwrap();
        // header plus one line per row
        assert_eq!(csv.lines().count(), chart.row_count() + 1, "{}", chart.name);
    }
}

#[test]
fn test_write_all_charts() {
    let dir = std::env::temp_dir().join("deskscope_output_sample_test");
    for chart in sample_charts() {
        let paths = write_chart_files(&chart, &dir).unwrap();
        assert!(paths.iter().all(|p| p.exists()));
    }
    std::fs::remove_dir_all(dir).ok();
}
