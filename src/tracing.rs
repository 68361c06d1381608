/// Initializes the tracing/logging infrastructure for the application.
///
/// This sets up structured logging using the `tracing` crate with:
/// - **Environment-based filtering**: Controlled via `RUST_LOG` environment variable
/// - **Pretty formatting**: Human-readable output with timestamps and log levels
///
/// # Environment Variables
///
/// Set `RUST_LOG` to control log verbosity:
/// - `RUST_LOG=info` - Lifecycle events (runs starting/finishing, stalls)
/// - `RUST_LOG=debug` - Per-philosopher state transitions
/// - `RUST_LOG=trace` - Individual fork acquisitions and releases
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Simulation started");
/// ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
