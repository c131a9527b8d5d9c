//! # Traceline
//!
//! Traceline is the lifecycle and configuration facade of a distributed
//! tracing client: one entry point to turn tracing on and off, merge partial
//! configuration over the built-in defaults, and manage which exporter
//! currently receives finished trace data.
//!
//! The facade is deliberately thin. It does not create spans, propagate
//! context, or speak to backends; it wires configuration into the tracer
//! core and controls activation. Its guarantees are the ones that matter for
//! correct wiring:
//!
//! * a merged configuration is always complete: any field or nested span
//!   ceiling the caller leaves unset falls back to its default instead of
//!   disappearing;
//! * at most one facade-managed exporter is attached to the tracer core at
//!   any time: registering replaces, re-registering the same instance is a
//!   no-op, unregistering falls back to a no-op exporter;
//! * `start` and `stop` are idempotent and may be called in any order.
//!
//! ## Getting started
//!
//! ```
//! use traceline::{LogLevel, PartialConfig, Tracing};
//!
//! let mut tracing = Tracing::new();
//! tracing.start_with_config(
//!     PartialConfig::default()
//!         .with_log_level(LogLevel::Info)
//!         .with_sampling_rate(0.5),
//! );
//!
//! assert!(tracing.tracer().active());
//! tracing.stop();
//! ```
//!
//! Applications that want a single shared instance use the free functions in
//! [`global`] instead of threading a [`Tracing`] handle around.
//!
//! ## Feature flags
//!
//! * `internal-logs`: internal diagnostics via `tracing` (enabled by
//!   default).
#![warn(
    future_incompatible,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    unreachable_pub,
    unused
)]
#![cfg_attr(docsrs, feature(doc_cfg), deny(rustdoc::broken_intra_doc_links))]

mod macros;

pub mod config;
pub mod error;
pub mod export;
pub mod global;
pub mod logs;
pub mod trace;

pub use config::{merge, PartialConfig, PartialTraceParams, TraceConfig, TraceParams};
pub use error::{ExportResult, TraceError};
pub use export::{ConsoleExporter, InMemorySpanExporter, NoopExporter, SpanData, SpanExporter};
pub use logs::{logger, ConsoleLogger, LogLevel, Logger, NoopLogger};
pub use trace::{CoreTracer, Sampler, Tracing};

#[doc(hidden)]
#[cfg(feature = "internal-logs")]
pub mod _private {
    pub use tracing::{debug, error, info, warn};
}
