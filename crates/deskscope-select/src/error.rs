//! Error types for selector resolution.

use thiserror::Error;

/// A selection that is not among the options currently offered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Asset class not present in the desk table
    #[error("Unknown asset class {0:?}")]
    UnknownAssetClass(String),

    /// Office not offered under the current asset class
    #[error("Office {office:?} is not offered for the current asset class (options: {options:?})")]
    UnknownOffice {
        /// Requested office
        office: String,
        /// Offices currently offered
        options: Vec<String>,
    },

    /// Desk not offered under the current asset class and office
    #[error("Desk {desk:?} is not offered for the current selection (options: {options:?})")]
    UnknownDesk {
        /// Requested desk name
        desk: String,
        /// Desk names currently offered
        options: Vec<String>,
    },
}
