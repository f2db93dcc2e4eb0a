//! Error types for risk slicing.

use thiserror::Error;

/// Errors raised while selecting a risk factor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// Requested factor has no observations for the desk and range
    #[error("Risk factor {factor:?} has no data for this desk and range (options: {options:?})")]
    UnknownRiskFactor {
        /// Requested factor
        factor: String,
        /// Factors currently offered
        options: Vec<String>,
    },
}
