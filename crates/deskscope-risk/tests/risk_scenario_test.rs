//! End-to-end risk scenarios read from CSV text.

use chrono::NaiveDate;
use deskscope_data::{DateRange, DeskNo, RiskTable};
use deskscope_risk::{RiskView, risk_factor_options};

const RISK: &str = "\
desk_no,date,risk_name,exposure,limit
1,02/01/2020,VaR,100,150
1,10/01/2020,VaR,200,150
";

fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
}

#[test]
fn test_range_keeps_only_matching_day() {
    let risk = RiskTable::from_reader(RISK.as_bytes()).unwrap();
    let range = DateRange::new(jan(1), jan(5)).unwrap();

    assert_eq!(risk_factor_options(&risk, DeskNo::new(1), &range), ["VaR"]);

    let view = RiskView::build(&risk, DeskNo::new(1), &range).unwrap();
    assert_eq!(view.factors(), ["VaR"]);

    let slice = view.select(None).unwrap();
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.points[0].date, jan(2));
    assert_eq!(slice.points[0].exposure, 100.0);
    assert_eq!(slice.points[0].limit, 150.0);
}

#[test]
fn test_range_without_rows_is_no_data() {
    let risk = RiskTable::from_reader(RISK.as_bytes()).unwrap();
    let range = DateRange::new(jan(3), jan(9)).unwrap();

    assert!(risk_factor_options(&risk, DeskNo::new(1), &range).is_empty());
    assert!(RiskView::build(&risk, DeskNo::new(1), &range).is_none());
}

#[test]
fn test_endpoints_are_inclusive() {
    let risk = RiskTable::from_reader(RISK.as_bytes()).unwrap();
    let range = DateRange::new(jan(2), jan(10)).unwrap();

    let slice = RiskView::build(&risk, DeskNo::new(1), &range)
        .unwrap()
        .select(Some("VaR"))
        .unwrap();
    assert_eq!(slice.len(), 2);
    assert_eq!(slice.breaches().len(), 1);
}

#[test]
fn test_single_day_range() {
    let risk = RiskTable::from_reader(RISK.as_bytes()).unwrap();
    let range = DateRange::from_picked(&[jan(10)]).unwrap();

    let slice = RiskView::build(&risk, DeskNo::new(1), &range)
        .unwrap()
        .select(None)
        .unwrap();
    assert_eq!(slice.points.len(), 1);
    assert_eq!(slice.points[0].exposure, 200.0);
}
