//! PnL slice for one desk and date range, and the chart tables cut from it.

use crate::projection::Projection;
use crate::reshape::{LongRow, ReshapeError, WideRow, WideTable};
use chrono::NaiveDate;
use deskscope_data::{DateRange, DeskNo, PnlComponent, PnlObservation, PnlTable};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A single PnL column over time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalarSeries {
    /// Column the values come from.
    pub column: PnlComponent,
    /// `(date, value)` pairs, ascending by date.
    pub points: Vec<(NaiveDate, f64)>,
}

/// A projection in wide and long form, with its optional scalar overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Breakdown {
    /// Which projection this is.
    pub projection: Projection,
    /// One row per date, one column per component.
    pub wide: WideTable,
    /// `(date, category, value)` cells for stacked bars.
    pub long: Vec<LongRow>,
    /// Scalar series drawn as points over the bars.
    pub overlay: Option<ScalarSeries>,
}

/// Every PnL chart of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PnlCharts {
    /// Daily total PnL.
    pub total: ScalarSeries,
    /// Existing vs new positions and residual.
    pub existing_position: Breakdown,
    /// All first-level components of the total.
    pub components: Breakdown,
    /// Drivers of existing-position PnL.
    pub existing_attribution: Breakdown,
    /// Risk-factor-attributed components.
    pub risk_factors: Breakdown,
}

impl PnlCharts {
    /// The breakdowns in display order.
    pub fn breakdowns(&self) -> [&Breakdown; 4] {
        [
            &self.components,
            &self.existing_position,
            &self.existing_attribution,
            &self.risk_factors,
        ]
    }
}

/// PnL rows for one desk, filtered to an inclusive range and sorted by date.
#[derive(Debug, Clone, PartialEq)]
pub struct PnlSlice {
    desk_no: DeskNo,
    range: DateRange,
    rows: Vec<PnlObservation>,
}

impl PnlSlice {
    /// Filter the PnL table to a desk and range.
    pub fn build(pnl: &PnlTable, desk_no: DeskNo, range: &DateRange) -> Self {
        let mut rows: Vec<PnlObservation> =
            pnl.for_desk(desk_no, range).into_iter().cloned().collect();
        rows.sort_by_key(|r| r.date);
        debug!(%desk_no, %range, rows = rows.len(), "built pnl slice");

        Self {
            desk_no,
            range: *range,
            rows,
        }
    }

    /// Desk the slice was built for.
    pub const fn desk_no(&self) -> DeskNo {
        self.desk_no
    }

    /// Range the slice was built for.
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Rows ascending by date.
    pub fn rows(&self) -> &[PnlObservation] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row matched.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// One column as a date-ordered series.
    pub fn scalar(&self, column: PnlComponent) -> ScalarSeries {
        ScalarSeries {
            column,
            points: self
                .rows
                .iter()
                .map(|r| (r.date, r.component(column)))
                .collect(),
        }
    }

    /// The given columns as a wide table.
    pub fn wide(&self, columns: &[PnlComponent]) -> Result<WideTable, ReshapeError> {
        let names = columns.iter().map(|c| c.column().to_string()).collect();
        let rows = self
            .rows
            .iter()
            .map(|r| WideRow {
                date: r.date,
                values: columns.iter().map(|&c| r.component(c)).collect(),
            })
            .collect();
        WideTable::new(names, rows)
    }

    /// Cut one projection, reshaping it to long form.
    pub fn breakdown(&self, projection: Projection) -> Result<Breakdown, ReshapeError> {
        let wide = self.wide(projection.components())?;
        let long = wide.melt();
        let overlay = projection.overlay().map(|c| self.scalar(c));
        Ok(Breakdown {
            projection,
            wide,
            long,
            overlay,
        })
    }

    /// Every PnL chart table.
    pub fn charts(&self) -> Result<PnlCharts, ReshapeError> {
        Ok(PnlCharts {
            total: self.scalar(PnlComponent::Total),
            existing_position: self.breakdown(Projection::ExistingPositionBreakdown)?,
            components: self.breakdown(Projection::ComponentBreakdown)?,
            existing_attribution: self.breakdown(Projection::ExistingPositionAttribution)?,
            risk_factors: self.breakdown(Projection::RiskFactorBreakdown)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reshape::pivot;
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    const PNL: &str = "\
desk_no,date,pnl_total,pnl_existing_pos,pnl_new_pos,pnl_resid,pnl_risk_factor_changes,pnl_cf,pnl_carry,pnl_val_adj,pnl_cna,pnl_rf_basis,pnl_rf_commodity,pnl_rf_correlation,pnl_rf_credit,pnl_rf_equity,pnl_rf_fx,pnl_rf_ir,pnl_rf_model,pnl_rf_other
1,03/01/2020,30,20,7,3,15,1,2,1,1,1,1,1,1,1,5,3,1,1
1,01/01/2020,10,8,1,1,6,1,0,1,0,1,0,0,0,0,3,2,0,0
1,02/01/2020,-5,-4,-2,1,-6,1,1,0,0,0,0,0,0,0,-4,-2,0,0
2,02/01/2020,99,99,0,0,99,0,0,0,0,0,0,0,0,0,99,0,0,0
";

    fn jan(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, day).unwrap()
    }

    #[fixture]
    fn slice() -> PnlSlice {
        let pnl = PnlTable::from_reader(PNL.as_bytes()).unwrap();
        PnlSlice::build(&pnl, DeskNo::new(1), &DateRange::new(jan(1), jan(31)).unwrap())
    }

    #[rstest]
    fn test_rows_sorted_by_date(slice: PnlSlice) {
        let dates: Vec<_> = slice.rows().iter().map(|r| r.date).collect();
        assert_eq!(dates, [jan(1), jan(2), jan(3)]);
    }

    #[rstest]
    fn test_total_series(slice: PnlSlice) {
        let total = slice.scalar(PnlComponent::Total);
        assert_eq!(total.points, [(jan(1), 10.0), (jan(2), -5.0), (jan(3), 30.0)]);
    }

    #[rstest]
    #[case(Projection::ExistingPositionBreakdown, 3, Some(PnlComponent::ExistingPos))]
    #[case(Projection::ComponentBreakdown, 7, Some(PnlComponent::Total))]
    #[case(Projection::ExistingPositionAttribution, 5, Some(PnlComponent::ExistingPos))]
    #[case(Projection::RiskFactorBreakdown, 9, None)]
    fn test_breakdown_shapes(
        slice: PnlSlice,
        #[case] projection: Projection,
        #[case] width: usize,
        #[case] overlay: Option<PnlComponent>,
    ) {
        let breakdown = slice.breakdown(projection).unwrap();
        assert_eq!(breakdown.wide.columns().len(), width);
        assert_eq!(breakdown.long.len(), width * slice.len());
        assert_eq!(breakdown.overlay.map(|o| o.column), overlay);
        assert_eq!(pivot(&breakdown.long).unwrap(), breakdown.wide);
    }

    #[rstest]
    fn test_breakdown_long_form_values(slice: PnlSlice) {
        let breakdown = slice.breakdown(Projection::ExistingPositionBreakdown).unwrap();
        let first = &breakdown.long[0];
        assert_eq!(first.category, "pnl_existing_pos");
        assert_eq!(first.date, jan(1));
        assert_relative_eq!(first.value, 8.0);

        let resid: Vec<_> = breakdown
            .long
            .iter()
            .filter(|r| r.category == "pnl_resid")
            .map(|r| r.value)
            .collect();
        assert_eq!(resid, [1.0, 1.0, 3.0]);
    }

    #[rstest]
    fn test_narrow_range(slice: PnlSlice) {
        let pnl = PnlTable::from_reader(PNL.as_bytes()).unwrap();
        let narrow = PnlSlice::build(&pnl, DeskNo::new(1), &DateRange::single(jan(2)));
        assert_eq!(narrow.len(), 1);
        assert!(narrow.len() < slice.len());

        let charts = narrow.charts().unwrap();
        assert_eq!(charts.total.points, [(jan(2), -5.0)]);
        assert_eq!(charts.risk_factors.long.len(), 9);
    }

    #[test]
    fn test_unknown_desk_is_empty() {
        let pnl = PnlTable::from_reader(PNL.as_bytes()).unwrap();
        let slice = PnlSlice::build(&pnl, DeskNo::new(42), &DateRange::single(jan(2)));
        assert!(slice.is_empty());

        let charts = slice.charts().unwrap();
        assert!(charts.total.points.is_empty());
        assert!(charts.breakdowns().iter().all(|b| b.long.is_empty()));
    }
}
