// ============================================================================
// Logging Setup
// ============================================================================

use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "life_calc=info";

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `life_calc=info`.
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    install(filter)
}

/// Install a global fmt subscriber with explicit directives, e.g.
/// `"life_calc=trace"` to see every residual correction.
pub fn init_logging_with(directives: &str) -> bool {
    install(EnvFilter::new(directives))
}

fn install(filter: EnvFilter) -> bool {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
