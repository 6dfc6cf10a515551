// ============================================================================
// Event Handler Interface
// Defines the contract for observing calculations
// ============================================================================

use crate::domain::{InterestMethod, RepaymentMethod};
use crate::numeric::Money;
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Events emitted by the calculator facade
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub enum CalculationEvent {
    /// Loan schedule produced
    LoanScheduled {
        method: RepaymentMethod,
        principal: Money,
        periods: u32,
        periodic_payment: Money,
        total_interest: Money,
    },

    /// Rounding residual folded into the last period of a loan schedule
    ResidualAdjusted {
        method: RepaymentMethod,
        period: u32,
        adjustment: Money,
    },

    /// Savings schedule produced
    SavingsAccumulated {
        method: InterestMethod,
        periods: u32,
        final_balance: Money,
    },

    /// Severance pay and taxes computed
    SeveranceComputed {
        service_days: u32,
        gross_severance: Money,
        net_amount: Money,
    },

    /// Input failed validation; nothing was computed
    InputRejected {
        calculator: &'static str,
        reason: String,
    },
}

/// Event handler trait for observing calculator activity
/// Implementations can handle logging, analytics, test assertions, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a calculation event
    fn on_event(&self, event: CalculationEvent);

    /// Batch event handler
    fn on_events(&self, events: Vec<CalculationEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// Handler that drops every event
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: CalculationEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: CalculationEvent) {
        match &event {
            CalculationEvent::InputRejected { calculator, reason } => {
                tracing::warn!(calculator, %reason, "calculation input rejected");
            }
            _ => tracing::debug!("calculator event: {:?}", event),
        }
    }
}

/// Handler that keeps every event in memory, in arrival order
#[derive(Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<CalculationEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events seen so far
    pub fn events(&self) -> Vec<CalculationEvent> {
        self.events.lock().clone()
    }

    /// Remove and return the events seen so far
    pub fn drain(&self) -> Vec<CalculationEvent> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: CalculationEvent) {
        self.events.lock().push(event);
    }
}
