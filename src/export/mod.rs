//! Span export.
//!
//! Exporters are sinks for finished spans. The facade manages at most one
//! exporter at a time, registered as an event listener on the tracer core;
//! which backend it talks to is entirely the exporter's business. Two
//! variants are always available: [`NoopExporter`], the safe fallback that
//! discards everything, and [`ConsoleExporter`], which writes span summaries
//! to stdout. [`InMemorySpanExporter`] collects spans for inspection in
//! tests.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

mod in_memory;
mod noop;
mod stdout;

pub use in_memory::InMemorySpanExporter;
pub use noop::NoopExporter;
pub use stdout::ConsoleExporter;

use crate::error::ExportResult;

/// A finished span, as delivered to exporters.
///
/// Opaque to the facade: it is produced by the tracer core and consumed by
/// whatever exporter is currently registered.
#[derive(Clone, Debug, PartialEq)]
pub struct SpanData {
    /// Operation name.
    pub name: Cow<'static, str>,
    /// When the operation started.
    pub start_time: SystemTime,
    /// When the operation ended.
    pub end_time: SystemTime,
    /// Attributes recorded on the span.
    pub attributes: HashMap<String, String>,
}

impl SpanData {
    /// Create a span record with both timestamps set to now.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        let now = SystemTime::now();
        SpanData {
            name: name.into(),
            start_time: now,
            end_time: now,
            attributes: HashMap::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Wall-clock duration of the span; zero if the clock went backwards.
    pub fn duration(&self) -> Duration {
        self.end_time
            .duration_since(self.start_time)
            .unwrap_or_default()
    }
}

/// A sink that receives completed spans for delivery.
pub trait SpanExporter: fmt::Debug + Send + Sync {
    /// Receive a batch of finished spans.
    fn export(&self, batch: &[SpanData]) -> ExportResult;

    /// Deliver anything still buffered.
    fn flush(&self) -> ExportResult {
        Ok(())
    }
}

/// Reference identity of exporter handles.
///
/// Compares the data pointers only; the vtable pointer of a wide `dyn`
/// pointer is not stable across codegen units.
pub(crate) fn exporter_ptr_eq(a: &Arc<dyn SpanExporter>, b: &Arc<dyn SpanExporter>) -> bool {
    Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_duration_never_negative() {
        let mut span = SpanData::new("backwards");
        span.end_time = span.start_time - Duration::from_secs(1);
        assert_eq!(span.duration(), Duration::ZERO);
    }

    #[test]
    fn exporter_identity_is_per_handle() {
        let a: Arc<dyn SpanExporter> = Arc::new(NoopExporter::new());
        let b: Arc<dyn SpanExporter> = Arc::new(NoopExporter::new());
        assert!(exporter_ptr_eq(&a, &a.clone()));
        assert!(!exporter_ptr_eq(&a, &b));
    }
}
