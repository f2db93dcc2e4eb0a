//! Row types for the desk, risk and PnL tables.

use crate::date::deserialize_day_first;
use chrono::NaiveDate;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Desk number, the key joining risk and PnL rows to a desk.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    From,
    Into,
)]
#[serde(transparent)]
pub struct DeskNo(i64);

impl DeskNo {
    /// Wrap a raw desk number.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw desk number.
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// A trading desk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Desk {
    /// Unique desk number.
    pub desk_no: DeskNo,

    /// Display name, assumed unique.
    pub desk_name: String,

    /// Person heading the desk.
    pub desk_head: String,

    /// Office the desk sits in.
    pub office: String,

    /// Asset class the desk trades.
    pub asset_class: String,

    /// Free-text description of the instruments traded.
    pub instruments: String,
}

/// Exposure of one desk to one risk factor on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskObservation {
    /// Desk the exposure belongs to.
    pub desk_no: DeskNo,

    /// Observation date.
    #[serde(deserialize_with = "deserialize_day_first")]
    pub date: NaiveDate,

    /// Risk factor label, e.g. `VaR`.
    pub risk_name: String,

    /// Exposure in USD.
    pub exposure: f64,

    /// Limit the exposure is measured against.
    pub limit: f64,
}

/// Daily PnL breakdown of one desk.
///
/// `pnl_total` is reported alongside the components and is not reconciled
/// against them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlObservation {
    /// Desk the PnL belongs to.
    pub desk_no: DeskNo,

    /// Business date.
    #[serde(deserialize_with = "deserialize_day_first")]
    pub date: NaiveDate,

    /// Total PnL.
    pub pnl_total: f64,
    /// PnL on positions held at the previous close.
    pub pnl_existing_pos: f64,
    /// PnL on positions opened during the day.
    pub pnl_new_pos: f64,
    /// Unexplained residual.
    pub pnl_resid: f64,
    /// Existing-position PnL from risk factor moves.
    pub pnl_risk_factor_changes: f64,
    /// Cash flows.
    pub pnl_cf: f64,
    /// Carry.
    pub pnl_carry: f64,
    /// Valuation adjustments.
    pub pnl_val_adj: f64,
    /// Commissions and fees.
    pub pnl_cna: f64,
    /// Basis risk factor PnL.
    pub pnl_rf_basis: f64,
    /// Commodity risk factor PnL.
    pub pnl_rf_commodity: f64,
    /// Correlation risk factor PnL.
    pub pnl_rf_correlation: f64,
    /// Credit risk factor PnL.
    pub pnl_rf_credit: f64,
    /// Equity risk factor PnL.
    pub pnl_rf_equity: f64,
    /// FX risk factor PnL.
    pub pnl_rf_fx: f64,
    /// Interest rate risk factor PnL.
    pub pnl_rf_ir: f64,
    /// Model risk factor PnL.
    pub pnl_rf_model: f64,
    /// Other risk factor PnL.
    pub pnl_rf_other: f64,
}

impl PnlObservation {
    /// Value of a single component column.
    pub const fn component(&self, component: PnlComponent) -> f64 {
        match component {
            PnlComponent::Total => self.pnl_total,
            PnlComponent::ExistingPos => self.pnl_existing_pos,
            PnlComponent::NewPos => self.pnl_new_pos,
            PnlComponent::Resid => self.pnl_resid,
            PnlComponent::RiskFactorChanges => self.pnl_risk_factor_changes,
            PnlComponent::CashFlow => self.pnl_cf,
            PnlComponent::Carry => self.pnl_carry,
            PnlComponent::ValuationAdj => self.pnl_val_adj,
            PnlComponent::Cna => self.pnl_cna,
            PnlComponent::RfBasis => self.pnl_rf_basis,
            PnlComponent::RfCommodity => self.pnl_rf_commodity,
            PnlComponent::RfCorrelation => self.pnl_rf_correlation,
            PnlComponent::RfCredit => self.pnl_rf_credit,
            PnlComponent::RfEquity => self.pnl_rf_equity,
            PnlComponent::RfFx => self.pnl_rf_fx,
            PnlComponent::RfIr => self.pnl_rf_ir,
            PnlComponent::RfModel => self.pnl_rf_model,
            PnlComponent::RfOther => self.pnl_rf_other,
        }
    }
}

/// The numeric PnL columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnlComponent {
    /// `pnl_total`
    Total,
    /// `pnl_existing_pos`
    ExistingPos,
    /// `pnl_new_pos`
    NewPos,
    /// `pnl_resid`
    Resid,
    /// `pnl_risk_factor_changes`
    RiskFactorChanges,
    /// `pnl_cf`
    CashFlow,
    /// `pnl_carry`
    Carry,
    /// `pnl_val_adj`
    ValuationAdj,
    /// `pnl_cna`
    Cna,
    /// `pnl_rf_basis`
    RfBasis,
    /// `pnl_rf_commodity`
    RfCommodity,
    /// `pnl_rf_correlation`
    RfCorrelation,
    /// `pnl_rf_credit`
    RfCredit,
    /// `pnl_rf_equity`
    RfEquity,
    /// `pnl_rf_fx`
    RfFx,
    /// `pnl_rf_ir`
    RfIr,
    /// `pnl_rf_model`
    RfModel,
    /// `pnl_rf_other`
    RfOther,
}

impl PnlComponent {
    /// The nine risk-factor-attributed components.
    pub const RISK_FACTORS: [Self; 9] = [
        Self::RfBasis,
        Self::RfCommodity,
        Self::RfCorrelation,
        Self::RfCredit,
        Self::RfEquity,
        Self::RfFx,
        Self::RfIr,
        Self::RfModel,
        Self::RfOther,
    ];

    /// Returns all components in source column order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Total,
            Self::ExistingPos,
            Self::NewPos,
            Self::Resid,
            Self::RiskFactorChanges,
            Self::CashFlow,
            Self::Carry,
            Self::ValuationAdj,
            Self::Cna,
            Self::RfBasis,
            Self::RfCommodity,
            Self::RfCorrelation,
            Self::RfCredit,
            Self::RfEquity,
            Self::RfFx,
            Self::RfIr,
            Self::RfModel,
            Self::RfOther,
        ]
    }

    /// Column name in `pnl.csv`.
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Total => "pnl_total",
            Self::ExistingPos => "pnl_existing_pos",
            Self::NewPos => "pnl_new_pos",
            Self::Resid => "pnl_resid",
            Self::RiskFactorChanges => "pnl_risk_factor_changes",
            Self::CashFlow => "pnl_cf",
            Self::Carry => "pnl_carry",
            Self::ValuationAdj => "pnl_val_adj",
            Self::Cna => "pnl_cna",
            Self::RfBasis => "pnl_rf_basis",
            Self::RfCommodity => "pnl_rf_commodity",
            Self::RfCorrelation => "pnl_rf_correlation",
            Self::RfCredit => "pnl_rf_credit",
            Self::RfEquity => "pnl_rf_equity",
            Self::RfFx => "pnl_rf_fx",
            Self::RfIr => "pnl_rf_ir",
            Self::RfModel => "pnl_rf_model",
            Self::RfOther => "pnl_rf_other",
        }
    }

}

impl fmt::Display for PnlComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
