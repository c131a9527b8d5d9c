//! Tracing client configuration.
//!
//! Configuration is split into the complete [`TraceConfig`] the client runs
//! with and the [`PartialConfig`] callers hand to
//! [`start_with_config`](crate::trace::Tracing::start_with_config). [`merge`]
//! turns one into the other: any field left unset falls back to the built-in
//! default, and the nested [`TraceParams`] merge field by field so a partial
//! override never erases the remaining defaults.
//!
//! Overrides for the default span limits and sampling rate can also be set
//! through the `TRACELINE_*` environment variables consulted by
//! [`TraceConfig::default`].

use std::collections::HashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::export::SpanExporter;
use crate::logs::{logger, LogLevel, Logger};

/// Default number of spans buffered before an exporter flush.
pub const DEFAULT_BUFFER_SIZE: usize = 100;
/// Default deadline after which buffered spans are force-flushed.
pub const DEFAULT_BUFFER_TIMEOUT: Duration = Duration::from_millis(20_000);
/// Default truncation limit for attribute values, in bytes.
pub const DEFAULT_MAXIMUM_LABEL_VALUE_SIZE: usize = 150;
/// Default sampling rate.
pub const DEFAULT_SAMPLING_RATE: f64 = 1.0;

const ENV_SPAN_ATTRIBUTE_COUNT_LIMIT: &str = "TRACELINE_SPAN_ATTRIBUTE_COUNT_LIMIT";
const ENV_SPAN_ANNOTATION_COUNT_LIMIT: &str = "TRACELINE_SPAN_ANNOTATION_COUNT_LIMIT";
const ENV_SPAN_LINK_COUNT_LIMIT: &str = "TRACELINE_SPAN_LINK_COUNT_LIMIT";
const ENV_SPAN_MESSAGE_EVENT_COUNT_LIMIT: &str = "TRACELINE_SPAN_MESSAGE_EVENT_COUNT_LIMIT";
const ENV_SAMPLING_RATE: &str = "TRACELINE_SAMPLING_RATE";

/// Per-span ceilings on retained data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceParams {
    /// The max attributes that can be added to a span.
    pub max_attributes_per_span: u32,
    /// The max annotation events that can be added to a span.
    pub max_annotation_events_per_span: u32,
    /// The max links that can be added to a span.
    pub max_links_per_span: u32,
    /// The max message events that can be added to a span.
    pub max_message_events_per_span: u32,
}

impl Default for TraceParams {
    fn default() -> Self {
        TraceParams {
            max_attributes_per_span: 32,
            max_annotation_events_per_span: 32,
            max_links_per_span: 32,
            max_message_events_per_span: 128,
        }
    }
}

/// Caller-supplied overrides for [`TraceParams`].
///
/// Unset fields keep their defaults when merged; supplying one ceiling never
/// erases the other three.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PartialTraceParams {
    /// Override for [`TraceParams::max_attributes_per_span`].
    pub max_attributes_per_span: Option<u32>,
    /// Override for [`TraceParams::max_annotation_events_per_span`].
    pub max_annotation_events_per_span: Option<u32>,
    /// Override for [`TraceParams::max_links_per_span`].
    pub max_links_per_span: Option<u32>,
    /// Override for [`TraceParams::max_message_events_per_span`].
    pub max_message_events_per_span: Option<u32>,
}

impl PartialTraceParams {
    /// Specify the number of attributes to be recorded per span.
    pub fn with_max_attributes_per_span(mut self, max_attributes: u32) -> Self {
        self.max_attributes_per_span = Some(max_attributes);
        self
    }

    /// Specify the number of annotation events to be recorded per span.
    pub fn with_max_annotation_events_per_span(mut self, max_annotations: u32) -> Self {
        self.max_annotation_events_per_span = Some(max_annotations);
        self
    }

    /// Specify the number of links to be recorded per span.
    pub fn with_max_links_per_span(mut self, max_links: u32) -> Self {
        self.max_links_per_span = Some(max_links);
        self
    }

    /// Specify the number of message events to be recorded per span.
    pub fn with_max_message_events_per_span(mut self, max_message_events: u32) -> Self {
        self.max_message_events_per_span = Some(max_message_events);
        self
    }

    /// Resolve against `defaults`, field by field.
    pub fn merge_with(&self, defaults: &TraceParams) -> TraceParams {
        TraceParams {
            max_attributes_per_span: self
                .max_attributes_per_span
                .unwrap_or(defaults.max_attributes_per_span),
            max_annotation_events_per_span: self
                .max_annotation_events_per_span
                .unwrap_or(defaults.max_annotation_events_per_span),
            max_links_per_span: self.max_links_per_span.unwrap_or(defaults.max_links_per_span),
            max_message_events_per_span: self
                .max_message_events_per_span
                .unwrap_or(defaults.max_message_events_per_span),
        }
    }
}

/// Complete configuration of the tracing client.
///
/// Every field is always populated: instances are produced either by
/// [`TraceConfig::default`] or by [`merge`], which fills anything the caller
/// left unspecified. Values are passed through unvalidated; range checking
/// is the tracer core's concern, not the facade's.
#[derive(Clone, Debug)]
pub struct TraceConfig {
    /// Number of spans buffered before an exporter flush.
    pub buffer_size: usize,
    /// Max time before buffered spans are force-flushed. Forwarded to the
    /// tracer core; the facade never schedules anything itself.
    pub buffer_timeout: Duration,
    /// Verbosity used when constructing the default logger.
    pub log_level: LogLevel,
    /// The diagnostic logger, either injected or built from `log_level`.
    pub logger: Arc<dyn Logger>,
    /// Truncation limit for attribute values, in bytes.
    pub maximum_label_value_size: usize,
    /// Probability in `[0, 1]` that a new trace is sampled.
    pub sampling_rate: f64,
    /// Instrumentation-target name to plugin module identifier.
    pub plugins: HashMap<String, String>,
    /// The exporter to register on start, if any.
    pub exporter: Option<Arc<dyn SpanExporter>>,
    /// Per-span ceilings.
    pub trace_params: TraceParams,
}

impl Default for TraceConfig {
    /// The built-in default configuration, with any `TRACELINE_*`
    /// environment overrides applied on top. Unparsable values are ignored.
    fn default() -> Self {
        let mut config = TraceConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            buffer_timeout: DEFAULT_BUFFER_TIMEOUT,
            log_level: LogLevel::default(),
            logger: logger(LogLevel::default()),
            maximum_label_value_size: DEFAULT_MAXIMUM_LABEL_VALUE_SIZE,
            sampling_rate: DEFAULT_SAMPLING_RATE,
            plugins: HashMap::new(),
            exporter: None,
            trace_params: TraceParams::default(),
        };

        if let Some(max_attributes_per_span) = env_var(ENV_SPAN_ATTRIBUTE_COUNT_LIMIT) {
            config.trace_params.max_attributes_per_span = max_attributes_per_span;
        }

        if let Some(max_annotation_events_per_span) = env_var(ENV_SPAN_ANNOTATION_COUNT_LIMIT) {
            config.trace_params.max_annotation_events_per_span = max_annotation_events_per_span;
        }

        if let Some(max_links_per_span) = env_var(ENV_SPAN_LINK_COUNT_LIMIT) {
            config.trace_params.max_links_per_span = max_links_per_span;
        }

        if let Some(max_message_events_per_span) = env_var(ENV_SPAN_MESSAGE_EVENT_COUNT_LIMIT) {
            config.trace_params.max_message_events_per_span = max_message_events_per_span;
        }

        if let Some(sampling_rate) = env_var(ENV_SAMPLING_RATE) {
            config.sampling_rate = sampling_rate;
        }

        config
    }
}

fn env_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| T::from_str(&value).ok())
}

/// Caller-supplied configuration overrides.
///
/// Every field is optional; [`merge`] resolves the unset ones against the
/// defaults. An explicitly supplied value always wins, including values such
/// as `sampling_rate: 0.0`.
#[derive(Clone, Debug, Default)]
pub struct PartialConfig {
    /// Override for [`TraceConfig::buffer_size`].
    pub buffer_size: Option<usize>,
    /// Override for [`TraceConfig::buffer_timeout`].
    pub buffer_timeout: Option<Duration>,
    /// Override for [`TraceConfig::log_level`].
    pub log_level: Option<LogLevel>,
    /// Logger instance to use as-is, taking precedence over `log_level`.
    pub logger: Option<Arc<dyn Logger>>,
    /// Override for [`TraceConfig::maximum_label_value_size`].
    pub maximum_label_value_size: Option<usize>,
    /// Override for [`TraceConfig::sampling_rate`].
    pub sampling_rate: Option<f64>,
    /// Plugin entries merged over the default map.
    pub plugins: Option<HashMap<String, String>>,
    /// Exporter to register on start.
    pub exporter: Option<Arc<dyn SpanExporter>>,
    /// Field-by-field overrides for [`TraceConfig::trace_params`].
    pub trace_params: Option<PartialTraceParams>,
}

impl PartialConfig {
    /// Specify the number of spans buffered before a flush.
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Specify the forced-flush deadline.
    pub fn with_buffer_timeout(mut self, buffer_timeout: Duration) -> Self {
        self.buffer_timeout = Some(buffer_timeout);
        self
    }

    /// Specify the verbosity of the constructed default logger.
    pub fn with_log_level(mut self, log_level: LogLevel) -> Self {
        self.log_level = Some(log_level);
        self
    }

    /// Specify the logger instance to be used.
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Specify the attribute-value truncation limit.
    pub fn with_maximum_label_value_size(mut self, maximum_label_value_size: usize) -> Self {
        self.maximum_label_value_size = Some(maximum_label_value_size);
        self
    }

    /// Specify the sampling rate.
    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = Some(sampling_rate);
        self
    }

    /// Add a single plugin mapping.
    pub fn with_plugin(mut self, target: impl Into<String>, module: impl Into<String>) -> Self {
        self.plugins
            .get_or_insert_with(HashMap::new)
            .insert(target.into(), module.into());
        self
    }

    /// Specify the full set of plugin overrides.
    pub fn with_plugins(mut self, plugins: HashMap<String, String>) -> Self {
        self.plugins = Some(plugins);
        self
    }

    /// Specify the exporter to register on start.
    pub fn with_exporter(mut self, exporter: Arc<dyn SpanExporter>) -> Self {
        self.exporter = Some(exporter);
        self
    }

    /// Specify per-span ceiling overrides.
    pub fn with_trace_params(mut self, trace_params: PartialTraceParams) -> Self {
        self.trace_params = Some(trace_params);
        self
    }
}

/// Resolve `partial` against `defaults` into a complete configuration.
///
/// Pure: neither input is modified and each call produces a fresh
/// [`TraceConfig`]. Scalar fields take the partial value when present;
/// `plugins` is a shallow map merge (default entries not mentioned by the
/// partial are preserved); `trace_params` merges field by field. The logger
/// resolves by precedence: an injected `logger` as-is, else the default
/// logger constructed at the partial `log_level`, else the defaults' logger.
pub fn merge(defaults: &TraceConfig, partial: &PartialConfig) -> TraceConfig {
    let resolved_logger = match (&partial.logger, partial.log_level) {
        (Some(injected), _) => injected.clone(),
        (None, Some(level)) => logger(level),
        (None, None) => defaults.logger.clone(),
    };

    let mut plugins = defaults.plugins.clone();
    if let Some(overrides) = &partial.plugins {
        plugins.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    TraceConfig {
        buffer_size: partial.buffer_size.unwrap_or(defaults.buffer_size),
        buffer_timeout: partial.buffer_timeout.unwrap_or(defaults.buffer_timeout),
        log_level: partial.log_level.unwrap_or(defaults.log_level),
        logger: resolved_logger,
        maximum_label_value_size: partial
            .maximum_label_value_size
            .unwrap_or(defaults.maximum_label_value_size),
        sampling_rate: partial.sampling_rate.unwrap_or(defaults.sampling_rate),
        plugins,
        exporter: partial.exporter.clone().or_else(|| defaults.exporter.clone()),
        trace_params: partial
            .trace_params
            .unwrap_or_default()
            .merge_with(&defaults.trace_params),
    }
}
