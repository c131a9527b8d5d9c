//! The process-wide tracing facade.
//!
//! Most applications configure tracing exactly once, at startup, and have no
//! natural place to thread a [`Tracing`] handle through. This module holds a
//! lazily created process-wide instance behind a lock and exposes the
//! facade's lifecycle operations as free functions. Code that wants an
//! isolated instance (tests, embedders running several clients) constructs
//! its own [`Tracing`] instead.
//!
//! ```
//! use traceline::global;
//!
//! global::start();
//! assert!(global::is_active());
//! global::stop();
//! ```

use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;

use crate::config::PartialConfig;
use crate::trace::Tracing;

static GLOBAL_TRACING: Lazy<Mutex<Tracing>> = Lazy::new(|| Mutex::new(Tracing::new()));

fn global_tracing() -> MutexGuard<'static, Tracing> {
    GLOBAL_TRACING
        .lock()
        .expect("GLOBAL_TRACING Mutex poisoned")
}

/// Run `f` against the process-wide facade.
///
/// The lock is held for the duration of `f`; keep the closure short.
pub fn with_tracing<F, R>(f: F) -> R
where
    F: FnOnce(&mut Tracing) -> R,
{
    f(&mut global_tracing())
}

/// Start the process-wide facade with the default configuration.
pub fn start() {
    global_tracing().start();
}

/// Start the process-wide facade, merging `config` over the defaults.
pub fn start_with_config(config: PartialConfig) {
    global_tracing().start_with_config(config);
}

/// Stop the process-wide facade.
pub fn stop() {
    global_tracing().stop();
}

/// Whether the process-wide facade is currently started.
pub fn is_active() -> bool {
    global_tracing().active()
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test drives the whole global lifecycle: the instance is shared
    // process state, so splitting these assertions across parallel tests
    // would race.
    #[test]
    fn global_instance_lifecycle() {
        let first = with_tracing(|tracing| tracing as *const Tracing as usize);
        let second = with_tracing(|tracing| tracing as *const Tracing as usize);
        assert_eq!(first, second, "the global facade is created once");

        start();
        assert!(is_active());
        assert!(with_tracing(|tracing| tracing.tracer().active()));

        start_with_config(PartialConfig::default().with_buffer_size(7));
        assert!(is_active());
        assert_eq!(
            with_tracing(|tracing| tracing
                .config()
                .expect("started facade has a config")
                .buffer_size),
            7
        );

        stop();
        assert!(!is_active());
        assert!(with_tracing(|tracing| tracing.config().is_none()));
    }
}
