#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dcfkit/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod market;
pub mod provider;
pub mod statement;
pub mod yahoo;

pub use boundary::{FetchConfig, collect_from_yahoo, collect_inputs};
pub use error::{DataError, Result};
pub use market::{PriceHistory, ProviderInputs, TickerInfo};
pub use provider::MarketDataProvider;
pub use statement::{RawStatementSet, Statement, StatementKind};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
