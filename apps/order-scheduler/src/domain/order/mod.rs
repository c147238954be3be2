//! Order value objects and the local order snapshot.

mod order_type;
mod side;
mod snapshot;
mod status;
mod time_in_force;

pub use order_type::OrderType;
pub use side::OrderSide;
pub use snapshot::OrderSnapshot;
pub use status::OrderStatus;
pub use time_in_force::TimeInForce;
