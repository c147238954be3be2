//! Exchange Port (Driven Port)
//!
//! Interface for the exchange collaborator: order placement,
//! cancellation, and status queries.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::order::{OrderSide, OrderSnapshot, OrderType, TimeInForce};
use crate::domain::shared::Symbol;

/// Request to place an order on the exchange.
#[derive(Debug, Clone)]
pub struct PlaceOrderRequest {
    /// Client order id sent with the request.
    pub client_order_id: String,
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Quantity in base asset.
    pub quantity: Decimal,
    /// Limit price (for priced orders).
    pub price: Option<Decimal>,
    /// Time in force (priced orders only).
    pub time_in_force: TimeInForce,
}

impl PlaceOrderRequest {
    /// Create a limit order request with a fresh client order id.
    #[must_use]
    pub fn limit(symbol: Symbol, side: OrderSide, quantity: Decimal, price: Decimal) -> Self {
        Self {
            client_order_id: uuid::Uuid::new_v4().to_string(),
            symbol,
            side,
            order_type: OrderType::Limit,
            quantity,
            price: Some(price),
            time_in_force: TimeInForce::Gtc,
        }
    }

    /// Create a market order request with a fresh client order id.
    #[must_use]
    pub fn market(symbol: Symbol, side: OrderSide, quantity: Decimal) -> Self {
        Self {
            client_order_id: uuid::Uuid::new_v4().to_string(),
            symbol,
            side,
            order_type: OrderType::Market,
            quantity,
            price: None,
            time_in_force: TimeInForce::Gtc,
        }
    }

    /// Set time in force.
    #[must_use]
    pub const fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = tif;
        self
    }
}

/// Exchange port error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ExchangeError {
    /// Transport-level failure reaching the exchange.
    #[error("Exchange connection error: {message}")]
    Connection {
        /// Error details.
        message: String,
    },

    /// Request rejected by the exchange.
    #[error("Request rejected: {reason}")]
    Rejected {
        /// Rejection reason.
        reason: String,
    },

    /// Order not found.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// The missing order id.
        order_id: String,
    },

    /// Credentials refused.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited.
    #[error("Rate limited by exchange")]
    RateLimited,

    /// Anything else.
    #[error("Exchange error: {message}")]
    Unknown {
        /// Error details.
        message: String,
    },
}

/// Port for exchange interactions.
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Verify connectivity and credentials against the account endpoint.
    async fn check_connectivity(&self) -> Result<(), ExchangeError>;

    /// Place an order.
    async fn place_order(&self, request: PlaceOrderRequest)
    -> Result<OrderSnapshot, ExchangeError>;

    /// Query the current state of an order.
    async fn get_order(&self, symbol: &Symbol, order_id: u64)
    -> Result<OrderSnapshot, ExchangeError>;

    /// Cancel an order.
    async fn cancel_order(&self, symbol: &Symbol, order_id: u64) -> Result<(), ExchangeError>;

    /// List all open orders for a symbol.
    async fn open_orders(&self, symbol: &Symbol) -> Result<Vec<OrderSnapshot>, ExchangeError>;
}
