use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence; otherwise `tcash=info` is used. Later calls are no-ops.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tcash=info"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    });
}
