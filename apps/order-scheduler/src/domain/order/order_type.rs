//! Order type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported spot order types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Rest on the book at a fixed price.
    Limit,
    /// Execute immediately at the best available price.
    Market,
    /// Limit order that is rejected instead of crossing the book.
    LimitMaker,
}

impl OrderType {
    /// Whether this order type carries a price and time-in-force.
    #[must_use]
    pub const fn is_priced(&self) -> bool {
        matches!(self, Self::Limit | Self::LimitMaker)
    }

    /// Exchange wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Limit => "LIMIT",
            Self::Market => "MARKET",
            Self::LimitMaker => "LIMIT_MAKER",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
