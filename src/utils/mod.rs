// ============================================================================
// Utilities Module
// Process-level helpers that sit outside the calculators
// ============================================================================

#[cfg(feature = "logging")]
mod logging;

#[cfg(feature = "logging")]
pub use logging::{init_logging, init_logging_with};
