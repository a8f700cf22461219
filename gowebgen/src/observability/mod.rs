//! Logging setup
//!
//! Diagnostics go to stderr through `tracing`; stdout is left to the
//! generator's own user-facing output. The level comes from the `-v` count
//! only, no environment variable is read.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
};

/// Log level for a `-v` count
///
/// # Examples
///
/// ```
/// use gowebgen::observability::level_for;
///
/// assert_eq!(level_for(0), "warn");
/// assert_eq!(level_for(1), "info");
/// assert_eq!(level_for(5), "trace");
/// ```
#[must_use]
pub const fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter used for a `-v` count
#[must_use]
pub fn filter_for(verbosity: u8) -> EnvFilter {
    EnvFilter::new(level_for(verbosity))
}

/// Install the global subscriber
///
/// # Example
///
/// ```rust,no_run
/// gowebgen::observability::init(1).unwrap();
/// tracing::info!("generator started");
/// ```
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(filter_for(verbosity))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbosity > 2),
        )
        .try_init()
}
