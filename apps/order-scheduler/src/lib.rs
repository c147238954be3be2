// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::match_same_arms,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Order Scheduler - Core Library
//!
//! Places a single scheduled order on Binance spot and drives it through
//! its lifecycle: wait for the start time, place, poll until fill or
//! expiration, cancel and place replacements on expiry, then poll until
//! every open order on the symbol is closed.
//!
//! # Architecture
//!
//! - **Domain**: order value objects, the local order snapshot, and the
//!   run-phase state machine
//! - **Application**: the lifecycle use case and its driven ports
//!   (`ExchangePort`, `ClockPort`)
//! - **Infrastructure**: the Binance REST adapter
//!
//! The controller is fully sequential; every wait goes through the
//! clock port so tests run without wall-clock time.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - Core types with no external integrations.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

/// Configuration loading and validation.
pub mod config;

// Domain re-exports
pub use domain::lifecycle::{PhaseError, PhaseMachine, RunPhase};
pub use domain::order::{OrderSide, OrderSnapshot, OrderStatus, OrderType, TimeInForce};
pub use domain::shared::{Symbol, Timestamp};

// Application re-exports
pub use application::ports::{
    ClockPort, ExchangeError, ExchangePort, PlaceOrderRequest, SystemClock,
};
pub use application::use_cases::{
    LifecycleError, LifecycleTiming, OrderDraft, OrderLifecycleController, ReplacementOutcome,
    RunReport, SchedulePlan,
};

// Infrastructure re-exports
pub use infrastructure::exchange::binance::{
    BinanceConfig, BinanceEnvironment, BinanceError, BinanceExchangeAdapter,
};
