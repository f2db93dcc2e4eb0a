#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/deskscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod date;
pub mod error;
pub mod range;
pub mod records;
pub mod tables;

pub use error::{DataError, Result};
pub use range::{DateRange, DateWindow};
pub use records::{Desk, DeskNo, PnlComponent, PnlObservation, RiskObservation};
pub use tables::{DataConfig, DataSet, DeskTable, PnlTable, RiskTable};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
