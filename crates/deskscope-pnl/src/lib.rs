#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/deskscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod projection;
pub mod reshape;
pub mod slice;

pub use projection::Projection;
pub use reshape::{LongRow, ReshapeError, WideRow, WideTable, melt, pivot};
pub use slice::{Breakdown, PnlCharts, PnlSlice, ScalarSeries};
