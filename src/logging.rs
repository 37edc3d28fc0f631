// logging.rs
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "dnglab_gui=info";

/// Installs the stderr subscriber. `RUST_LOG` overrides the default filter.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
    if let Err(e) = result {
        eprintln!("logging already initialised: {}", e);
    }
}
