//! `tracing` subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default directive used when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "info";

/// Install a formatting subscriber honouring `RUST_LOG`.
///
/// Falls back to [`DEFAULT_FILTER`] when the variable is missing or invalid.
/// Calling this twice is harmless; the second install is ignored.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Install a formatting subscriber with an explicit filter directive,
/// e.g. `"breathscope_chart=trace,info"`.
pub fn init_with_filter(directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_with_filter("breathscope_core=trace,info");
        init();
        tracing::debug!("subscriber installed");
    }
}
