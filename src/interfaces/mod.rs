// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod event_handler;
mod from_form;
mod repayment_strategy;

pub use event_handler::{
    CalculationEvent, EventHandler, LoggingEventHandler, NoOpEventHandler, RecordingEventHandler,
};
pub use from_form::FromForm;
pub use repayment_strategy::RepaymentStrategy;
