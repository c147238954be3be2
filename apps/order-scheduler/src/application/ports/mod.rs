//! Driven ports for external collaborators.

mod clock_port;
mod exchange_port;

pub use clock_port::{ClockPort, SystemClock};
pub use exchange_port::{ExchangeError, ExchangePort, PlaceOrderRequest};
