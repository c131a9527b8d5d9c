//! In-memory span exporter.

use std::sync::{Arc, Mutex};

use crate::error::{ExportResult, TraceError};

use super::{SpanData, SpanExporter};

/// An exporter that stores finished spans in memory.
///
/// Useful for testing and debugging. Clones share the same storage, so a
/// handle kept by the test observes everything the registered copy receives.
#[derive(Clone, Debug, Default)]
pub struct InMemorySpanExporter {
    spans: Arc<Mutex<Vec<SpanData>>>,
}

impl InMemorySpanExporter {
    /// Create a new, empty in-memory exporter.
    pub fn new() -> Self {
        InMemorySpanExporter::default()
    }

    /// The finished spans received so far.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceError`] if the internal lock cannot be acquired.
    pub fn get_finished_spans(&self) -> Result<Vec<SpanData>, TraceError> {
        self.spans
            .lock()
            .map(|spans| spans.clone())
            .map_err(TraceError::from)
    }

    /// Clear the internal storage of finished spans.
    pub fn reset(&self) {
        let _ = self.spans.lock().map(|mut spans| spans.clear());
    }
}

impl SpanExporter for InMemorySpanExporter {
    fn export(&self, batch: &[SpanData]) -> ExportResult {
        self.spans
            .lock()
            .map(|mut spans| spans.extend_from_slice(batch))
            .map_err(TraceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_storage() {
        let exporter = InMemorySpanExporter::new();
        let handle = exporter.clone();
        exporter
            .export(&[SpanData::new("shared")])
            .expect("export should succeed");
        let spans = handle.get_finished_spans().expect("lock should not be poisoned");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "shared");

        handle.reset();
        assert!(exporter
            .get_finished_spans()
            .expect("lock should not be poisoned")
            .is_empty());
    }
}
