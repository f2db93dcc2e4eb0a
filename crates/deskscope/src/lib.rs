#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/deskscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod dashboard;

// Re-export main types from sub-crates
pub use deskscope_data as data;
pub use deskscope_output as output;
pub use deskscope_pnl as pnl;
pub use deskscope_risk as risk;
pub use deskscope_select as select;

pub use dashboard::{
    Dashboard, DashboardError, DashboardOutcome, DashboardRequest, NO_DATA_NOTICE, NoDataReason,
    Result, build_dashboard,
};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
