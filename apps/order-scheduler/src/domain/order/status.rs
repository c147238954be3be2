//! Order status as reported by the exchange.

use std::fmt;

/// Exchange-side order status.
///
/// Only `Filled` changes control flow in the lifecycle; statuses this
/// controller does not interpret are carried through opaquely in
/// `Other` so logs show exactly what the exchange said.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Order accepted by the engine, no fills yet.
    New,
    /// Order partially filled.
    PartiallyFilled,
    /// Order completely filled.
    Filled,
    /// Order canceled.
    Canceled,
    /// Cancel request submitted, awaiting confirmation.
    PendingCancel,
    /// Order rejected by the engine.
    Rejected,
    /// Order expired (e.g. IOC remainder, exchange-side purge).
    Expired,
    /// Any status string this controller does not interpret.
    Other(String),
}

impl OrderStatus {
    /// Parse an exchange status string.
    ///
    /// Unrecognized values are preserved verbatim in `Other`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "NEW" => Self::New,
            "PARTIALLY_FILLED" => Self::PartiallyFilled,
            "FILLED" => Self::Filled,
            "CANCELED" => Self::Canceled,
            "PENDING_CANCEL" => Self::PendingCancel,
            "REJECTED" => Self::Rejected,
            "EXPIRED" => Self::Expired,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true if the order is completely filled.
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled)
    }

    /// Returns true if the order is in a terminal state.
    ///
    /// Unrecognized statuses count as non-terminal so the lifecycle
    /// keeps watching rather than silently giving up on them.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Filled | Self::Canceled | Self::Rejected | Self::Expired
        )
    }

    /// Returns true if the order is still working on the book.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !self.is_terminal()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "NEW"),
            Self::PartiallyFilled => write!(f, "PARTIALLY_FILLED"),
            Self::Filled => write!(f, "FILLED"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::PendingCancel => write!(f, "PENDING_CANCEL"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Expired => write!(f, "EXPIRED"),
            Self::Other(raw) => write!(f, "{raw}"),
        }
    }
}
