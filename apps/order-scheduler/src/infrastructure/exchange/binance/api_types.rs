//! Binance API response types.
//!
//! These types map directly to Binance's REST wire format: quantities
//! and prices arrive as strings, timestamps as Unix milliseconds.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::order::{OrderSide, OrderSnapshot, OrderStatus, OrderType};
use crate::domain::shared::{Symbol, Timestamp};

/// Order response from the Binance API.
///
/// `POST /api/v3/order` reports the creation time as `transactTime`;
/// `GET /api/v3/order` and `GET /api/v3/openOrders` report it as `time`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrderResponse {
    /// Symbol.
    pub symbol: String,
    /// Exchange-assigned order id.
    pub order_id: u64,
    /// Client order id echoed back.
    #[serde(default)]
    pub client_order_id: Option<String>,
    /// Order price (as string).
    #[serde(default)]
    pub price: Option<String>,
    /// Original quantity (as string).
    #[serde(default)]
    pub orig_qty: Option<String>,
    /// Executed quantity (as string).
    #[serde(default)]
    pub executed_qty: Option<String>,
    /// Order status.
    pub status: String,
    /// Time in force.
    #[serde(default)]
    pub time_in_force: Option<String>,
    /// Order type.
    #[serde(rename = "type", default)]
    pub order_type: Option<String>,
    /// Order side.
    #[serde(default)]
    pub side: Option<String>,
    /// Creation timestamp in ms (placement responses).
    #[serde(default)]
    pub transact_time: Option<i64>,
    /// Creation timestamp in ms (query responses).
    #[serde(default)]
    pub time: Option<i64>,
}

impl BinanceOrderResponse {
    /// Convert to a domain `OrderSnapshot`.
    #[must_use]
    pub fn to_snapshot(&self) -> OrderSnapshot {
        OrderSnapshot {
            order_id: self.order_id,
            client_order_id: self.client_order_id.clone(),
            symbol: Symbol::new(&self.symbol),
            side: parse_side(self.side.as_deref()),
            order_type: parse_order_type(self.order_type.as_deref()),
            status: OrderStatus::parse(&self.status),
            price: parse_decimal(self.price.as_deref()),
            orig_qty: parse_decimal(self.orig_qty.as_deref()),
            executed_qty: parse_decimal(self.executed_qty.as_deref()),
            created_at: self
                .transact_time
                .or(self.time)
                .and_then(Timestamp::from_unix_millis)
                .unwrap_or_else(Timestamp::now),
        }
    }
}

/// Account response from `GET /api/v3/account`.
///
/// Only the fields the startup gate inspects; the rest of the payload
/// is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceAccountResponse {
    /// Whether the account may trade.
    #[serde(default)]
    pub can_trade: bool,
    /// Account type (e.g. "SPOT").
    #[serde(default)]
    pub account_type: Option<String>,
}

/// Error payload from the Binance API.
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorResponse {
    /// Numeric error code (e.g. -2013).
    pub code: i64,
    /// Error message.
    pub msg: String,
}

fn parse_decimal(value: Option<&str>) -> Decimal {
    value.and_then(|v| v.parse().ok()).unwrap_or(Decimal::ZERO)
}

fn parse_side(value: Option<&str>) -> OrderSide {
    match value {
        Some("SELL") => OrderSide::Sell,
        _ => OrderSide::Buy,
    }
}

fn parse_order_type(value: Option<&str>) -> OrderType {
    match value {
        Some("MARKET") => OrderType::Market,
        Some("LIMIT_MAKER") => OrderType::LimitMaker,
        _ => OrderType::Limit,
    }
}
