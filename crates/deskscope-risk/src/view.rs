//! Risk-factor options and the series bound to the risk chart.

use crate::error::RiskError;
use chrono::NaiveDate;
use deskscope_data::{DateRange, DeskNo, RiskObservation, RiskTable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Distinct risk factors observed for a desk in a range, first-seen order.
pub fn risk_factor_options(risk: &RiskTable, desk_no: DeskNo, range: &DateRange) -> Vec<String> {
    distinct_factors(risk.for_desk(desk_no, range).into_iter())
}

fn distinct_factors<'a>(rows: impl Iterator<Item = &'a RiskObservation>) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.filter(|r| seen.insert(r.risk_name.as_str()))
        .map(|r| r.risk_name.clone())
        .collect()
}

/// One bar of the risk chart with its limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Exposure in USD.
    pub exposure: f64,
    /// Limit in USD.
    pub limit: f64,
}

impl RiskPoint {
    /// Exposure as a fraction of the limit, `None` for a zero limit.
    pub fn utilisation(&self) -> Option<f64> {
        (self.limit.abs() > f64::EPSILON).then(|| self.exposure / self.limit)
    }

    /// Whether the exposure exceeds the limit.
    pub fn is_breach(&self) -> bool {
        self.exposure > self.limit
    }
}

/// Exposure and limit series for a single risk factor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSlice {
    /// Risk factor the series belongs to.
    pub risk_name: String,
    /// Observations in source order.
    pub points: Vec<RiskPoint>,
}

impl RiskSlice {
    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations where exposure exceeded the limit.
    pub fn breaches(&self) -> Vec<&RiskPoint> {
        self.points.iter().filter(|p| p.is_breach()).collect()
    }

    /// Highest exposure-to-limit ratio in the slice.
    pub fn peak_utilisation(&self) -> Option<f64> {
        self.points
            .iter()
            .filter_map(RiskPoint::utilisation)
            .fold(None, |peak, u| Some(peak.map_or(u, |p: f64| p.max(u))))
    }
}

/// Risk observations for one desk and range, with the factor options they offer.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskView {
    desk_no: DeskNo,
    range: DateRange,
    factors: Vec<String>,
    rows: Vec<RiskObservation>,
}

impl RiskView {
    /// Filter the risk table to a desk and range.
    ///
    /// Returns `None` when no observation matches: there is nothing to chart
    /// for this desk and date combination.
    pub fn build(risk: &RiskTable, desk_no: DeskNo, range: &DateRange) -> Option<Self> {
        let rows: Vec<RiskObservation> =
            risk.for_desk(desk_no, range).into_iter().cloned().collect();
        if rows.is_empty() {
            warn!(%desk_no, %range, "no risk data for this desk and date range");
            return None;
        }

        let factors = distinct_factors(rows.iter());
        debug!(%desk_no, rows = rows.len(), factors = factors.len(), "built risk view");

        Some(Self {
            desk_no,
            range: *range,
            factors,
            rows,
        })
    }

    /// Desk the view was built for.
    pub const fn desk_no(&self) -> DeskNo {
        self.desk_no
    }

    /// Range the view was built for.
    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    /// Risk-factor selector options, first-seen order. Never empty.
    pub fn factors(&self) -> &[String] {
        &self.factors
    }

    /// The default factor, which is the first option.
    pub fn default_factor(&self) -> &str {
        // build() guarantees at least one row, hence one factor
        self.factors.first().map_or("", String::as_str)
    }

    /// All desk rows in the range, every factor included.
    pub fn rows(&self) -> &[RiskObservation] {
        &self.rows
    }

    /// Narrow to one factor, the first option when `factor` is `None`.
    pub fn select(&self, factor: Option<&str>) -> Result<RiskSlice, RiskError> {
        let factor = factor.unwrap_or_else(|| self.default_factor());
        if !self.factors.iter().any(|f| f == factor) {
            return Err(RiskError::UnknownRiskFactor {
                factor: factor.to_string(),
                options: self.factors.clone(),
            });
        }

        let points = self
            .rows
            .iter()
            .filter(|r| r.risk_name == factor)
            .map(|r| RiskPoint {
                date: r.date,
                exposure: r.exposure,
                limit: r.limit,
            })
            .collect();

        Ok(RiskSlice {
            risk_name: factor.to_string(),
            points,
        })
    }
}
