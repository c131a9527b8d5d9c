//! Tracing facade.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::config::{merge, PartialConfig, TraceConfig};
use crate::export::{exporter_ptr_eq, NoopExporter, SpanExporter};
use crate::{traceline_debug, traceline_info, traceline_warn};

use super::CoreTracer;

// Shared fallback handed out whenever no exporter is registered, so resets
// do not allocate and identity checks against "the" no-op exporter hold.
static FALLBACK_EXPORTER: Lazy<Arc<dyn SpanExporter>> =
    Lazy::new(|| Arc::new(NoopExporter::new()));

pub(crate) fn noop_exporter() -> Arc<dyn SpanExporter> {
    FALLBACK_EXPORTER.clone()
}

/// Lifecycle and configuration facade of the tracing client.
///
/// A `Tracing` instance owns one [`CoreTracer`] for its whole lifetime and
/// moves between two states, stopped (initial) and started. [`start`] merges
/// the caller's partial configuration over the defaults, applies it to the
/// tracer core, and wires the configured exporter; [`stop`] reverses all of
/// it. Both are idempotent.
///
/// At most one facade-managed exporter is attached to the tracer core's
/// listener list at any time: registering a different exporter replaces the
/// previous entry, registering the same instance again is a no-op, and
/// unregistering falls back to a shared no-op exporter.
///
/// A process-wide instance lives in the [`global`](crate::global) module;
/// constructing dedicated instances (as the tests do) is equally supported.
///
/// # Examples
///
/// ```
/// use traceline::{LogLevel, PartialConfig, Tracing};
///
/// let mut tracing = Tracing::new();
/// tracing.start_with_config(PartialConfig::default().with_log_level(LogLevel::Info));
/// assert!(tracing.active());
/// tracing.stop();
/// assert!(!tracing.active());
/// ```
///
/// [`start`]: Tracing::start
/// [`stop`]: Tracing::stop
#[derive(Debug)]
pub struct Tracing {
    active: bool,
    config: Option<TraceConfig>,
    exporter: Option<Arc<dyn SpanExporter>>,
    tracer: CoreTracer,
}

impl Tracing {
    /// Create a stopped facade with a fresh tracer core.
    pub fn new() -> Self {
        Tracing {
            active: false,
            config: None,
            exporter: None,
            tracer: CoreTracer::new(),
        }
    }

    /// Whether tracing is currently started.
    pub fn active(&self) -> bool {
        self.active
    }

    /// The configuration applied by the last [`start`](Tracing::start);
    /// `None` while stopped.
    pub fn config(&self) -> Option<&TraceConfig> {
        self.config.as_ref()
    }

    /// The owned tracer core. Available in every lifecycle state; the same
    /// instance survives start/stop cycles.
    pub fn tracer(&self) -> &CoreTracer {
        &self.tracer
    }

    /// The currently registered exporter, or the shared no-op exporter when
    /// none is registered (including whenever tracing is stopped).
    pub fn exporter(&self) -> Arc<dyn SpanExporter> {
        self.exporter.clone().unwrap_or_else(noop_exporter)
    }

    /// Start tracing with the default configuration.
    ///
    /// See [`start_with_config`](Tracing::start_with_config).
    pub fn start(&mut self) -> &mut Tracing {
        self.start_with_config(PartialConfig::default())
    }

    /// Start tracing, merging `user_config` over the default configuration.
    ///
    /// Applies the merged logger and sampling rate to the tracer core,
    /// activates it, and registers the configured exporter if one was
    /// supplied; otherwise the current exporter registration is left as it
    /// is. Idempotent: calling this while already started re-applies the
    /// newly supplied configuration without an intervening [`stop`].
    ///
    /// Returns the facade itself for chained access to the tracer.
    ///
    /// [`stop`]: Tracing::stop
    pub fn start_with_config(&mut self, user_config: PartialConfig) -> &mut Tracing {
        if self.active {
            traceline_warn!(name: "Tracing.Start.AlreadyActive");
        }

        let mut config = merge(&TraceConfig::default(), &user_config);
        config
            .logger
            .debug(format_args!("tracing configuration applied: {config:?}"));

        self.tracer.start(&config);

        match config.exporter.clone() {
            Some(exporter) => {
                self.config = Some(config);
                self.register_exporter(exporter);
            }
            None => {
                // a re-start that omits the exporter keeps the current
                // registration and mirrors it into the new configuration
                config.exporter = self.exporter.clone();
                self.config = Some(config);
            }
        }

        self.active = true;
        traceline_info!(name: "Tracing.Started");
        self
    }

    /// Stop tracing.
    ///
    /// Deactivates the tracer core, removes the managed exporter's listener
    /// entry so nothing stale keeps receiving data, and discards the applied
    /// configuration. Idempotent.
    pub fn stop(&mut self) {
        self.tracer.stop();
        if let Some(exporter) = self.exporter.take() {
            self.tracer.remove_event_listener(&exporter);
        }
        self.config = None;
        self.active = false;
        traceline_info!(name: "Tracing.Stopped");
    }

    /// Register `exporter` as the single managed listener on the tracer
    /// core.
    ///
    /// A previously registered exporter is replaced, never joined: exactly
    /// one facade-managed listener entry exists afterwards. Registering the
    /// instance that is already wired leaves the listener list untouched.
    pub fn register_exporter(&mut self, exporter: Arc<dyn SpanExporter>) -> &mut Tracing {
        if let Some(current) = self.exporter.clone() {
            if exporter_ptr_eq(&current, &exporter) {
                return self;
            }
            self.tracer.remove_event_listener(&current);
            traceline_debug!(name: "Tracing.RegisterExporter.Replaced");
        }

        self.tracer.add_event_listener(exporter.clone());
        if let Some(config) = self.config.as_mut() {
            config.exporter = Some(exporter.clone());
        }
        self.exporter = Some(exporter);
        traceline_debug!(name: "Tracing.RegisterExporter.Registered");
        self
    }

    /// Remove `exporter` if it is the currently registered one, falling back
    /// to the shared no-op exporter.
    ///
    /// Unregistering an exporter that is not currently registered is a safe
    /// no-op.
    pub fn unregister_exporter(&mut self, exporter: &Arc<dyn SpanExporter>) -> &mut Tracing {
        let is_current = self
            .exporter
            .as_ref()
            .is_some_and(|current| exporter_ptr_eq(current, exporter));
        if !is_current {
            return self;
        }

        self.tracer.remove_event_listener(exporter);
        self.exporter = None;
        if let Some(config) = self.config.as_mut() {
            config.exporter = Some(noop_exporter());
        }
        traceline_debug!(name: "Tracing.UnregisterExporter.Removed");
        self
    }
}

impl Default for Tracing {
    fn default() -> Self {
        Tracing::new()
    }
}
