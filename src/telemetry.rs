//! Opt-in tracing setup for binaries and hosts embedding `gapminder-chart`.
//!
//! The library only emits `tracing` events. Hosts that already install a
//! subscriber can ignore this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

/// Filter used by [`init_tracing`] when verbose output is requested.
pub const VERBOSE_FILTER: &str = "gapminder_chart=debug,info";

/// Installs a compact stderr subscriber with [`DEFAULT_FILTER`].
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already set.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing(false)
}

/// Installs a compact stderr subscriber. `RUST_LOG` wins over both built-in
/// filters.
#[must_use]
pub fn init_tracing(verbose: bool) -> bool {
    let fallback = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(verbose)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback;
        false
    }
}
