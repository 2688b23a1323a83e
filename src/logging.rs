use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize console logging.
///
/// - **Log Level**: `LOG_LEVEL` (default: "info"); `RUST_LOG` takes precedence
/// - **Filtering**: HTTP client internals held at warn
/// - **Target**: stderr, so command output on stdout stays clean
pub fn init_console_logging() {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "classwatch={level},classwatch_auth={level},reqwest=warn,hyper=warn,hyper_util=warn,rustls=warn",
            level = log_level
        ))
    });

    let console_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    // Ignore the error when a subscriber is already installed (tests).
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
