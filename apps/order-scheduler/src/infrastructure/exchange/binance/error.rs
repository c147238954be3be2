//! Binance-specific error types.

use thiserror::Error;

use crate::application::ports::ExchangeError;

/// Errors from the Binance adapter.
#[derive(Debug, Error, Clone)]
pub enum BinanceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// API returned an error payload.
    #[error("API error: {code} - {message}")]
    Api {
        /// Numeric error code from the API (e.g. -2010).
        code: i64,
        /// Error message from the API.
        message: String,
    },

    /// Order was rejected.
    #[error("Order rejected: {0}")]
    OrderRejected(String),

    /// Authentication failed.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// Rate limited or IP-banned.
    #[error("Rate limited")]
    RateLimited,

    /// Network error.
    #[error("Network error: {0}")]
    Network(String),

    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    JsonParse(String),

    /// Order not found.
    #[error("Order not found: {order_id}")]
    OrderNotFound {
        /// The order id that was not found.
        order_id: String,
    },
}

impl From<BinanceError> for ExchangeError {
    fn from(err: BinanceError) -> Self {
        match err {
            BinanceError::Http(msg) | BinanceError::Network(msg) | BinanceError::JsonParse(msg) => {
                Self::Connection { message: msg }
            }
            BinanceError::Api { code, message } => Self::Unknown {
                message: format!("{}: {}", code, message),
            },
            BinanceError::OrderRejected(msg) => Self::Rejected { reason: msg },
            BinanceError::AuthenticationFailed => Self::AuthenticationFailed,
            BinanceError::RateLimited => Self::RateLimited,
            BinanceError::OrderNotFound { order_id } => Self::OrderNotFound { order_id },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binance_error_to_exchange_error_http() {
        let err = BinanceError::Http("connection refused".to_string());
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::Connection { .. }));
    }

    #[test]
    fn binance_error_to_exchange_error_auth() {
        let err = BinanceError::AuthenticationFailed;
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::AuthenticationFailed));
    }

    #[test]
    fn binance_error_to_exchange_error_rate_limited() {
        let err = BinanceError::RateLimited;
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::RateLimited));
    }

    #[test]
    fn binance_error_to_exchange_error_rejected() {
        let err = BinanceError::OrderRejected("insufficient balance".to_string());
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::Rejected { .. }));
    }

    #[test]
    fn binance_error_to_exchange_error_not_found() {
        let err = BinanceError::OrderNotFound {
            order_id: "42".to_string(),
        };
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::OrderNotFound { .. }));
    }

    #[test]
    fn binance_error_to_exchange_error_api_passthrough() {
        let err = BinanceError::Api {
            code: -1102,
            message: "Mandatory parameter missing".to_string(),
        };
        let exchange_err: ExchangeError = err.into();
        assert!(matches!(exchange_err, ExchangeError::Unknown { .. }));
    }
}
