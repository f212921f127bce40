//! Error types for the DCF pipeline.

use dcfkit_data::DataError;
use dcfkit_output::ExportError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, DcfError>;

/// Errors raised inside the pipeline.
///
/// Provider failures never reach this type; they are absorbed by
/// [`dcfkit_data::collect_inputs`]. Anything here is a defect in the mapping,
/// the collected data or the output step, and aborts the run.
#[derive(Debug, Error)]
pub enum DcfError {
    /// The metric mapping is malformed.
    #[error("Invalid metric mapping: {0}")]
    InvalidMapping(String),

    /// Reading collected statement data failed.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Writing the output table failed.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Reading a mapping file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Mapping (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
