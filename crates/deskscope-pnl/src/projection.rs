//! The PnL column projections drawn as charts.

use deskscope_data::PnlComponent;
use serde::{Deserialize, Serialize};

/// A named selection of PnL columns, optionally paired with a scalar overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    /// `pnl_total` alone.
    Total,
    /// Existing vs new positions and residual, over existing-position PnL.
    ExistingPositionBreakdown,
    /// All first-level components, over total PnL.
    ComponentBreakdown,
    /// What drove existing-position PnL, over existing-position PnL.
    ExistingPositionAttribution,
    /// The nine risk-factor-attributed components.
    RiskFactorBreakdown,
}

impl Projection {
    /// Returns every projection in display order.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Total,
            Self::ComponentBreakdown,
            Self::ExistingPositionBreakdown,
            Self::ExistingPositionAttribution,
            Self::RiskFactorBreakdown,
        ]
    }

    /// Columns carried by the projection, in output order.
    pub fn components(&self) -> &'static [PnlComponent] {
        use PnlComponent::*;
        match self {
            Self::Total => &[Total],
            Self::ExistingPositionBreakdown => &[ExistingPos, NewPos, Resid],
            Self::ComponentBreakdown => &[
                ExistingPos,
                NewPos,
                Resid,
                CashFlow,
                Carry,
                ValuationAdj,
                Cna,
            ],
            Self::ExistingPositionAttribution => &[
                RiskFactorChanges,
                CashFlow,
                Carry,
                ValuationAdj,
                Cna,
            ],
            Self::RiskFactorBreakdown => &PnlComponent::RISK_FACTORS,
        }
    }

    /// Scalar series drawn as points over the stacked bars.
    pub const fn overlay(&self) -> Option<PnlComponent> {
        match self {
            Self::ExistingPositionBreakdown | Self::ExistingPositionAttribution => {
                Some(PnlComponent::ExistingPos)
            }
            Self::ComponentBreakdown => Some(PnlComponent::Total),
            Self::Total | Self::RiskFactorBreakdown => None,
        }
    }

    /// Whether the projection is reshaped to long form for stacking.
    pub const fn is_stacked(&self) -> bool {
        !matches!(self, Self::Total)
    }

    /// Short identifier, used for file names.
    pub const fn slug(&self) -> &'static str {
        match self {
            Self::Total => "pnl_total",
            Self::ExistingPositionBreakdown => "pnl_existing_position_breakdown",
            Self::ComponentBreakdown => "pnl_component_breakdown",
            Self::ExistingPositionAttribution => "pnl_existing_position_attribution",
            Self::RiskFactorBreakdown => "pnl_risk_factor_breakdown",
        }
    }
}
