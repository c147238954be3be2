//! Binance adapter configuration.

use std::time::Duration;

/// Environment for the Binance API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinanceEnvironment {
    /// Spot testnet (simulated funds).
    Testnet,
    /// Live trading (real money).
    Live,
}

impl BinanceEnvironment {
    /// Get the base URL for the REST API.
    #[must_use]
    pub const fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Testnet => "https://testnet.binance.vision",
            Self::Live => "https://api.binance.com",
        }
    }

    /// Check if this is live trading.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for BinanceEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Testnet => write!(f, "TESTNET"),
            Self::Live => write!(f, "LIVE"),
        }
    }
}

/// Configuration for the Binance exchange adapter.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// API key.
    pub api_key: String,
    /// API secret.
    pub api_secret: String,
    /// Trading environment.
    pub environment: BinanceEnvironment,
    /// HTTP request timeout.
    pub timeout: Duration,
    /// Signed-request validity window in milliseconds.
    pub recv_window: u64,
    /// Base URL override, used by tests against a local server.
    base_url_override: Option<String>,
}

impl BinanceConfig {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(
        api_key: String,
        api_secret: String,
        environment: BinanceEnvironment,
    ) -> Self {
        Self {
            api_key,
            api_secret,
            environment,
            timeout: Duration::from_secs(30),
            recv_window: 5_000,
            base_url_override: None,
        }
    }

    /// Set the HTTP timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the signed-request validity window.
    #[must_use]
    pub const fn with_recv_window(mut self, recv_window: u64) -> Self {
        self.recv_window = recv_window;
        self
    }

    /// Override the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Get the REST API base URL.
    #[must_use]
    pub fn rest_base_url(&self) -> &str {
        self.base_url_override
            .as_deref()
            .unwrap_or_else(|| self.environment.rest_base_url())
    }
}
