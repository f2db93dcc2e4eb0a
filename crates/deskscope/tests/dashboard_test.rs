//! End-to-end dashboard scenarios.

use chrono::NaiveDate;
use deskscope::data::{DataConfig, DataSet, DateRange, DateWindow, DeskTable, PnlTable, RiskTable};
use deskscope::output::{ChartData, ExportFormat, Exporter};
use deskscope::select::Selections;
use deskscope::{DashboardOutcome, DashboardRequest, NoDataReason, build_dashboard};
use rstest::rstest;
use std::path::PathBuf;

const DESKS: &str = "\
desk_no,desk_name,desk_head,office,asset_class,instruments
1,FX Desk,Alice,London,FX,Spot and forwards
";

const RISK: &str = "\
desk_no,date,risk_name,exposure,limit
1,02/01/2020,VaR,100,150
1,10/01/2020,VaR,200,150
";

const PNL: &str = "\
desk_no,date,pnl_total,pnl_existing_pos,pnl_new_pos,pnl_resid,pnl_risk_factor_changes,pnl_cf,pnl_carry,pnl_val_adj,pnl_cna,pnl_rf_basis,pnl_rf_commodity,pnl_rf_correlation,pnl_rf_credit,pnl_rf_equity,pnl_rf_fx,pnl_rf_ir,pnl_rf_model,pnl_rf_other
1,02/01/2020,10,8,1,1,6,1,0,1,0,1,0,0,0,0,3,2,0,0
1,10/01/2020,-5,-4,-2,1,-6,1,1,0,0,0,0,0,0,0,-4,-2,0,0
";

fn fx_desk_data() -> DataSet {
    DataSet::new(
        DeskTable::from_reader(DESKS.as_bytes()).unwrap(),
        PnlTable::from_reader(PNL.as_bytes()).unwrap(),
        RiskTable::from_reader(RISK.as_bytes()).unwrap(),
    )
}

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
}

#[test]
fn test_fx_desk_first_week() {
    let request = DashboardRequest::new(
        Selections::from_labels("FX", "London", Some("FX Desk")),
        DateRange::new(jan(1), jan(5)).unwrap(),
    );
    let DashboardOutcome::Ready(dashboard) = build_dashboard(&fx_desk_data(), &request).unwrap()
    else {
        panic!("expected charts");
    };

    assert_eq!(dashboard.risk_factors, ["VaR"]);
    let ChartData::RiskLimit { bars } = &dashboard.risk.data else {
        panic!("expected risk bars");
    };
    assert_eq!(bars.len(), 1);
    assert_eq!(bars[0].date, jan(2));
    assert_eq!(bars[0].exposure, 100.0);
    assert_eq!(
        dashboard.header.to_string(),
        "Desk: FX Desk | Desk head: Alice\nOffice: London | Instruments: Spot and forwards"
    );
}

#[test]
fn test_range_without_risk_rows_draws_nothing() {
    let request = DashboardRequest::new(
        Selections::default(),
        DateRange::new(jan(3), jan(9)).unwrap(),
    );
    let outcome = build_dashboard(&fx_desk_data(), &request).unwrap();
    assert!(matches!(
        outcome,
        DashboardOutcome::NoData {
            reason: NoDataReason::NoRiskData,
            ..
        }
    ));
}

#[rstest]
#[case(&[10], 1)]
#[case(&[2, 10], 2)]
#[case(&[1, 9], 1)]
fn test_picked_dates(#[case] days: &[u32], #[case] risk_rows: usize) {
    let picked: Vec<_> = days.iter().map(|&d| jan(d)).collect();
    let range = DateWindow::default().pick(&picked).unwrap();
    let request = DashboardRequest::new(Selections::default(), range);

    let DashboardOutcome::Ready(dashboard) = build_dashboard(&fx_desk_data(), &request).unwrap()
    else {
        panic!("expected charts");
    };
    assert_eq!(dashboard.risk.row_count(), risk_rows);
}

#[test]
fn test_sample_data_every_desk() {
    let config =
        DataConfig::with_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"));
    let data = DataSet::load(&config).unwrap();

    for desk in data.desks.rows() {
        let request = DashboardRequest::new(
            Selections::from_labels(&desk.asset_class, &desk.office, Some(&desk.desk_name)),
            DateWindow::default().full_range(),
        );
        let outcome = build_dashboard(&data, &request).unwrap();

        // desk 7 books PnL but reports no risk
        match (&outcome, desk.desk_no.get()) {
            (DashboardOutcome::NoData { reason, .. }, 7) => {
                assert_eq!(*reason, NoDataReason::NoRiskData)
            }
            (DashboardOutcome::Ready(dashboard), _) => {
                assert_eq!(dashboard.header.desk_name, desk.desk_name);
                assert!(dashboard.pnl.iter().all(|c| !c.is_empty()));
            }
            (other, n) => panic!("unexpected outcome for desk {n}: {other:?}"),
        }

        let json = outcome.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.starts_with("{\"status\":"));
    }
}

#[test]
fn test_write_dashboard_files() {
    let outcome = build_dashboard(&fx_desk_data(), &DashboardRequest::default()).unwrap();
    let DashboardOutcome::Ready(dashboard) = outcome else {
        panic!("expected charts");
    };

    let dir = std::env::temp_dir().join("deskscope_dashboard_files_test");
    let written = dashboard.write_to(&dir).unwrap();
    assert_eq!(written.len(), 12);
    assert!(dir.join("risk.vl.json").exists());
    assert!(dir.join("pnl_risk_factor_breakdown.csv").exists());
    std::fs::remove_dir_all(dir).ok();
}
