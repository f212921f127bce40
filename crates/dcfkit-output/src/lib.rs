#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dcfkit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod export;
pub mod report;
pub mod table;

pub use export::{ExportError, ExportFormat, Exporter};
pub use report::{DEFAULT_PREVIEW_ROWS, Report};
pub use table::{LabeledRow, LabeledTable, TableRecord};
