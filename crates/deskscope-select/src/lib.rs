#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/deskscope/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cascade;
pub mod choice;
pub mod error;

pub use cascade::{
    SelectorState, Selections, asset_class_options, desk_options, office_options, resolve,
};
pub use choice::{ALL_ASSET_CLASSES, ALL_OFFICES, Choice};
pub use error::SelectError;
