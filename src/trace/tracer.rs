//! Tracer core.

use std::sync::Arc;

use crate::config::{TraceConfig, TraceParams};
use crate::export::{exporter_ptr_eq, SpanData, SpanExporter};
use crate::logs::{Logger, NoopLogger};
use crate::traceline_error;

use super::Sampler;

/// The tracer core driven by the [`Tracing`](crate::trace::Tracing) facade.
///
/// Owns the active flag, the applied logger/sampler/span ceilings, and the
/// ordered event-listener list that is notified on span completion.
/// Exporters are registered as listeners; the facade keeps the list down to
/// at most one entry of its own.
#[derive(Debug)]
pub struct CoreTracer {
    active: bool,
    logger: Arc<dyn Logger>,
    sampler: Sampler,
    trace_params: TraceParams,
    event_listeners: Vec<Arc<dyn SpanExporter>>,
}

impl CoreTracer {
    /// Create an inactive tracer with no listeners.
    pub fn new() -> Self {
        CoreTracer {
            active: false,
            logger: Arc::new(NoopLogger::new()),
            sampler: Sampler::default(),
            trace_params: TraceParams::default(),
            event_listeners: Vec::new(),
        }
    }

    /// Whether the tracer is currently recording.
    pub fn active(&self) -> bool {
        self.active
    }

    /// The logger applied at the last start.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// The sampler applied at the last start.
    pub fn sampler(&self) -> Sampler {
        self.sampler
    }

    /// The span ceilings applied at the last start.
    pub fn trace_params(&self) -> TraceParams {
        self.trace_params
    }

    /// Apply a configuration and activate the tracer.
    ///
    /// Applies the sampler derived from the sampling rate, the resolved
    /// logger, and the span ceilings. Idempotent: restarting simply
    /// re-applies the given configuration.
    pub fn start(&mut self, config: &TraceConfig) {
        self.sampler = Sampler::from_rate(config.sampling_rate);
        self.logger = config.logger.clone();
        self.trace_params = config.trace_params;
        self.active = true;
    }

    /// Deactivate the tracer.
    ///
    /// The configuration applied at the last start is retained until the
    /// next one; the listener list is managed by the facade.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Append a listener to the notification list.
    pub fn add_event_listener(&mut self, listener: Arc<dyn SpanExporter>) {
        self.event_listeners.push(listener);
    }

    /// Remove every entry holding the same exporter instance.
    ///
    /// Removing a listener that was never registered is a no-op.
    pub fn remove_event_listener(&mut self, listener: &Arc<dyn SpanExporter>) {
        self.event_listeners
            .retain(|entry| !exporter_ptr_eq(entry, listener));
    }

    /// The currently attached listeners, in registration order.
    pub fn event_listeners(&self) -> &[Arc<dyn SpanExporter>] {
        &self.event_listeners
    }

    /// Notify every listener of a finished span, in registration order.
    ///
    /// Dropped while the tracer is inactive. Listener failures are reported
    /// through the diagnostics channels and never propagate.
    pub fn end_span(&self, span: SpanData) {
        if !self.active {
            self.logger.debug(format_args!(
                "tracer is inactive, dropping span {:?}",
                span.name
            ));
            return;
        }
        for listener in &self.event_listeners {
            if let Err(error) = listener.export(std::slice::from_ref(&span)) {
                traceline_error!(
                    name: "CoreTracer.EndSpan.ExportFailed",
                    error = format!("{error}")
                );
            }
        }
    }
}

impl Default for CoreTracer {
    fn default() -> Self {
        CoreTracer::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PartialConfig;
    use crate::export::{InMemorySpanExporter, NoopExporter};
    use crate::logs::LogLevel;

    fn started_tracer(config: &TraceConfig) -> CoreTracer {
        let mut tracer = CoreTracer::new();
        tracer.start(config);
        tracer
    }

    #[test]
    fn new_tracer_is_inactive() {
        let tracer = CoreTracer::new();
        assert!(!tracer.active());
        assert!(tracer.event_listeners().is_empty());
        assert_eq!(tracer.logger().level(), LogLevel::Silent);
    }

    #[test]
    fn start_applies_configuration() {
        let defaults = TraceConfig::default();
        let config = crate::config::merge(
            &defaults,
            &PartialConfig::default()
                .with_sampling_rate(0.5)
                .with_log_level(LogLevel::Info),
        );
        let tracer = started_tracer(&config);
        assert!(tracer.active());
        assert_eq!(tracer.sampler(), Sampler::Probability(0.5));
        assert_eq!(tracer.logger().level(), LogLevel::Info);
        assert_eq!(tracer.trace_params(), config.trace_params);
    }

    #[test]
    fn stop_deactivates() {
        let mut tracer = started_tracer(&TraceConfig::default());
        tracer.stop();
        assert!(!tracer.active());
        // idempotent
        tracer.stop();
        assert!(!tracer.active());
    }

    #[test]
    fn listeners_are_removed_by_instance() {
        let mut tracer = CoreTracer::new();
        let first: Arc<dyn SpanExporter> = Arc::new(NoopExporter::new());
        let second: Arc<dyn SpanExporter> = Arc::new(NoopExporter::new());
        tracer.add_event_listener(first.clone());
        tracer.add_event_listener(second.clone());
        assert_eq!(tracer.event_listeners().len(), 2);

        tracer.remove_event_listener(&first);
        assert_eq!(tracer.event_listeners().len(), 1);
        assert!(exporter_ptr_eq(&tracer.event_listeners()[0], &second));

        // removing an unknown listener changes nothing
        tracer.remove_event_listener(&first);
        assert_eq!(tracer.event_listeners().len(), 1);
    }

    #[test]
    fn end_span_notifies_listeners_while_active() {
        let exporter = InMemorySpanExporter::new();
        let mut tracer = started_tracer(&TraceConfig::default());
        tracer.add_event_listener(Arc::new(exporter.clone()));

        tracer.end_span(SpanData::new("finished"));
        let spans = exporter.get_finished_spans().expect("lock should not be poisoned");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "finished");
    }

    #[test]
    fn end_span_drops_spans_while_inactive() {
        let exporter = InMemorySpanExporter::new();
        let mut tracer = CoreTracer::new();
        tracer.add_event_listener(Arc::new(exporter.clone()));

        tracer.end_span(SpanData::new("dropped"));
        assert!(exporter
            .get_finished_spans()
            .expect("lock should not be poisoned")
            .is_empty());
    }
}
