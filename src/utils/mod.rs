pub mod build_info;
pub mod paths;

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "invoice_core=info";

/// Initializes the global tracing subscriber with sensible defaults.
///
/// `RUST_LOG` still wins for anything it names. Logs go to stderr so JSON
/// printed by the CLI stays clean.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = match DEFAULT_DIRECTIVE.parse() {
            Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
            Err(_) => EnvFilter::from_default_env(),
        };

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
