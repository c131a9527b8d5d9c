use std::sync::PoisonError;
use thiserror::Error;

/// A specialized `Result` type for export operations.
pub type ExportResult = Result<(), TraceError>;

/// Errors returned by the trace export surface.
///
/// The facade itself never fails: configuration lookups fall back to their
/// defaults and lifecycle operations are infallible. Exporters are the one
/// place where something can go wrong.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    /// Export failed with the error returned by the exporter.
    #[error("Exporter {name} encountered the following error(s): {message}")]
    ExportFailed {
        /// Name of the failing exporter.
        name: &'static str,
        /// Error detail reported by the exporter.
        message: String,
    },

    /// Other errors propagated from the trace subsystem that weren't covered above.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl From<String> for TraceError {
    fn from(err_msg: String) -> Self {
        TraceError::Other(err_msg.into())
    }
}

impl From<&'static str> for TraceError {
    fn from(err_msg: &'static str) -> Self {
        TraceError::Other(err_msg.into())
    }
}

impl<T> From<PoisonError<T>> for TraceError {
    fn from(err: PoisonError<T>) -> Self {
        TraceError::Other(err.to_string().into())
    }
}
