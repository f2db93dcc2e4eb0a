#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/deskscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod chart;
pub mod export;
pub mod header;
pub mod vega;

pub use chart::{
    Chart, ChartData, Encoding, FieldKind, PnlBar, PnlPoint, PointSeries, RiskBar, TooltipField,
};
pub use export::{ExportError, ExportFormat, Exporter, write_chart_files};
pub use header::DeskHeader;
pub use vega::VEGA_LITE_SCHEMA;
