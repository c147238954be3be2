//! Local cached view of an exchange-owned order.

use rust_decimal::Decimal;

use crate::domain::order::{OrderSide, OrderStatus, OrderType};
use crate::domain::shared::{Symbol, Timestamp};

/// A point-in-time snapshot of an order held by the exchange.
///
/// The exchange owns the order; this is only a local cache, refreshed
/// by explicit query. Never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSnapshot {
    /// Exchange-assigned order id.
    pub order_id: u64,
    /// Client order id sent on placement, if the exchange echoed one.
    pub client_order_id: Option<String>,
    /// Traded symbol.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Current status.
    pub status: OrderStatus,
    /// Order price. Zero for market orders.
    pub price: Decimal,
    /// Original quantity.
    pub orig_qty: Decimal,
    /// Quantity executed so far.
    pub executed_qty: Decimal,
    /// Exchange-reported creation time.
    pub created_at: Timestamp,
}

impl OrderSnapshot {
    /// Returns true if the order is completely filled.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.status.is_filled()
    }
}
