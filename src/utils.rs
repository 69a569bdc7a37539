use std::sync::Once;

static TRACING_INIT: Once = Once::new();

const DEFAULT_FILTER: &str = "dragon_nest=info,nest_core=info";

/// Initializes the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays clean. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
