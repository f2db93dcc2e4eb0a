//! Integration tests loading the sample data directory.

use chrono::NaiveDate;
use deskscope_data::{DataConfig, DataSet, DateRange, DeskNo, PnlComponent};
use std::collections::HashSet;
use std::path::PathBuf;

fn sample_config() -> DataConfig {
    DataConfig::with_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data"))
}

#[test]
fn test_load_sample_data() {
    let data = DataSet::load(&sample_config()).unwrap();

    assert_eq!(data.desks.len(), 7);
    assert!(!data.risk.is_empty());
    assert!(!data.pnl.is_empty());

    // desk numbers are unique
    let numbers: HashSet<_> = data.desks.rows().iter().map(|d| d.desk_no).collect();
    assert_eq!(numbers.len(), data.desks.len());
}

#[test]
fn test_sample_dates_inside_default_window() {
    let data = DataSet::load(&sample_config()).unwrap();
    let window = DateRange::new(
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2020, 2, 1).unwrap(),
    )
    .unwrap();

    assert!(data.risk.rows().iter().all(|r| window.contains(r.date)));
    assert!(data.pnl.rows().iter().all(|r| window.contains(r.date)));
}

#[test]
fn test_sample_pnl_one_row_per_desk_per_day() {
    let data = DataSet::load(&sample_config()).unwrap();
    let mut seen = HashSet::new();
    for row in data.pnl.rows() {
        assert!(seen.insert((row.desk_no, row.date)), "duplicate pnl row");
    }
}

#[test]
fn test_sample_component_accessor() {
    let data = DataSet::load(&sample_config()).unwrap();
    let first = &data.pnl.rows()[0];
    assert_eq!(first.desk_no, DeskNo::new(1));
    assert_eq!(first.component(PnlComponent::Total), first.pnl_total);
    assert_eq!(first.component(PnlComponent::RfOther), first.pnl_rf_other);
}

#[test]
fn test_load_from_temp_dir() {
    let dir = std::env::temp_dir().join(format!("deskscope-load-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    std::fs::write(
        dir.join("desks.csv"),
        "desk_no,desk_name,desk_head,office,asset_class,instruments\n1,FX Desk,Alice,London,FX,Spot\n",
    )
    .unwrap();
    std::fs::write(
        dir.join("risk.csv"),
        "desk_no,date,risk_name,exposure,limit\n1,02/01/2020,VaR,100,150\n",
    )
    .unwrap();
    let header = std::iter::once("desk_no,date".to_string())
        .chain(PnlComponent::all().iter().map(|c| c.column().to_string()))
        .collect::<Vec<_>>()
        .join(",");
    let values = std::iter::repeat_n("1", 18).collect::<Vec<_>>().join(",");
    std::fs::write(dir.join("pnl.csv"), format!("{header}\n1,02/01/2020,{values}\n")).unwrap();

    let data = DataSet::load(&DataConfig::with_data_dir(&dir)).unwrap();
    assert_eq!(data.desks.len(), 1);
    assert_eq!(data.risk.len(), 1);
    assert_eq!(data.pnl.len(), 1);
    assert_eq!(data.pnl.rows()[0].pnl_rf_ir, 1.0);

    std::fs::remove_dir_all(dir).ok();
}
