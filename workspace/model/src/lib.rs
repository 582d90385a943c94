//! Persisted records for Take-a-Hike accounts and the data-access layer that
//! loads, mutates and deletes them.

pub mod entities;
pub mod error;
pub mod store;

// Re-export tracing for use in this crate
pub use tracing;

pub use error::StoreError;

/// Default filter used when `RUST_LOG` is not set.
#[cfg(not(test))]
const DEFAULT_LOG_FILTER: &str = "takeahike=debug,model=debug,tower_http=debug,axum::rejection=trace";

// Initialize tracing if not already initialized
#[cfg(not(test))]
pub fn init_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::EnvFilter;

    // The log level can be controlled via the RUST_LOG environment variable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();
}
