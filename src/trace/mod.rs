//! Tracing lifecycle.
//!
//! This module consists of a few main types:
//!
//! * The [`Tracing`] facade, the single entry point that starts and stops
//!   tracing, applies merged configuration, and manages the active exporter.
//! * The [`CoreTracer`] it owns, which holds the active flag and the
//!   event-listener list notified on span completion.
//! * The [`Sampler`] derived from the configured sampling rate.

mod sampler;
mod tracer;
mod tracing;

pub use sampler::Sampler;
pub use tracer::CoreTracer;
pub use self::tracing::Tracing;
