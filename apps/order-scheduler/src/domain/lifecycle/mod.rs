//! Run-phase state machine for a scheduled order lifecycle.
//!
//! One run moves forward through these phases and never back; an issued
//! cancel cannot be undone by this process.

use std::fmt;

use thiserror::Error;

/// Phase of a single scheduled-order run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Nothing placed yet; waiting on the startup gate and schedule.
    New,
    /// Initial order accepted by the exchange.
    Placed,
    /// Initial order completely filled.
    Filled,
    /// Expiration deadline passed with the order unfilled.
    Expiring,
    /// Cancel issued for the initial order (regardless of cancel outcome).
    Cancelled,
    /// Polling until no orders remain open on the symbol.
    Draining,
    /// Run complete.
    Done,
}

impl RunPhase {
    /// Returns true if this phase ends the run.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::Placed => write!(f, "PLACED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Expiring => write!(f, "EXPIRING"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Draining => write!(f, "DRAINING"),
            Self::Done => write!(f, "DONE"),
        }
    }
}

/// Error raised on an invalid phase transition.
#[derive(Debug, Clone, Error)]
pub enum PhaseError {
    /// The requested transition is not part of the machine.
    #[error("Invalid lifecycle transition from {from} to {to}")]
    InvalidTransition {
        /// Phase the run was in.
        from: RunPhase,
        /// Phase that was requested.
        to: RunPhase,
    },
}

/// State machine validating run-phase transitions.
pub struct PhaseMachine;

impl PhaseMachine {
    /// Check if a phase transition is valid.
    #[must_use]
    pub fn is_valid_transition(from: RunPhase, to: RunPhase) -> bool {
        matches!(
            (from, to),
            (RunPhase::New, RunPhase::Placed)
                | (RunPhase::Placed, RunPhase::Filled)
                | (RunPhase::Placed, RunPhase::Expiring)
                | (RunPhase::Expiring, RunPhase::Cancelled)
                | (RunPhase::Filled, RunPhase::Draining)
                | (RunPhase::Cancelled, RunPhase::Draining)
                | (RunPhase::Draining, RunPhase::Done)
        )
    }

    /// Validate a phase transition.
    ///
    /// # Errors
    ///
    /// Returns error if the transition is invalid.
    pub fn validate_transition(from: RunPhase, to: RunPhase) -> Result<(), PhaseError> {
        if Self::is_valid_transition(from, to) {
            Ok(())
        } else {
            Err(PhaseError::InvalidTransition { from, to })
        }
    }

    /// Get all valid next phases from a given phase.
    #[must_use]
    pub fn valid_next_phases(from: RunPhase) -> Vec<RunPhase> {
        match from {
            RunPhase::New => vec![RunPhase::Placed],
            RunPhase::Placed => vec![RunPhase::Filled, RunPhase::Expiring],
            RunPhase::Expiring => vec![RunPhase::Cancelled],
            RunPhase::Filled | RunPhase::Cancelled => vec![RunPhase::Draining],
            RunPhase::Draining => vec![RunPhase::Done],
            RunPhase::Done => vec![],
        }
    }
}
