//! Binance spot exchange adapter.
//!
//! Implements `ExchangePort` over Binance's signed REST API.

mod adapter;
mod api_types;
mod config;
mod error;
mod http_client;
mod signing;

pub use adapter::BinanceExchangeAdapter;
pub use config::{BinanceConfig, BinanceEnvironment};
pub use error::BinanceError;
