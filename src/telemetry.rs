use tracing_subscriber::{prelude::*, util::TryInitError, EnvFilter, Registry};

/// Initialize tracing
///
/// Logs go to stderr, stdout is reserved for the generated schema.
pub fn init() -> Result<(), TryInitError> {
    let logger = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    Registry::default().with(logger).with(env_filter).try_init()
}
