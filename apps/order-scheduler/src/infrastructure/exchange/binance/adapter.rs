//! Binance exchange adapter implementing ExchangePort.

use async_trait::async_trait;

use crate::application::ports::{ExchangeError, ExchangePort, PlaceOrderRequest};
use crate::domain::order::OrderSnapshot;
use crate::domain::shared::Symbol;

use super::api_types::{BinanceAccountResponse, BinanceOrderResponse};
use super::config::{BinanceConfig, BinanceEnvironment};
use super::error::BinanceError;
use super::http_client::BinanceHttpClient;

/// Binance spot exchange adapter.
///
/// Implements `ExchangePort` over the Binance REST API.
#[derive(Debug, Clone)]
pub struct BinanceExchangeAdapter {
    client: BinanceHttpClient,
    environment: BinanceEnvironment,
}

impl BinanceExchangeAdapter {
    /// Create a new Binance exchange adapter.
    pub fn new(config: BinanceConfig) -> Result<Self, BinanceError> {
        let client = BinanceHttpClient::new(&config)?;
        Ok(Self {
            client,
            environment: config.environment,
        })
    }

    /// Check if we're in live trading mode.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        self.environment.is_live()
    }

    /// Convert a `PlaceOrderRequest` to Binance query parameters.
    fn to_order_params(request: &PlaceOrderRequest) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", request.symbol.as_str().to_string()),
            ("side", request.side.as_str().to_string()),
            ("type", request.order_type.as_str().to_string()),
        ];

        if request.order_type.is_priced() {
            params.push(("timeInForce", request.time_in_force.as_str().to_string()));
        }

        params.push(("quantity", request.quantity.to_string()));

        if let Some(price) = request.price {
            params.push(("price", price.to_string()));
        }

        params.push(("newClientOrderId", request.client_order_id.clone()));
        params
    }
}

#[async_trait]
impl ExchangePort for BinanceExchangeAdapter {
    async fn check_connectivity(&self) -> Result<(), ExchangeError> {
        let account: BinanceAccountResponse = self
            .client
            .signed_get("/api/v3/account", &[])
            .await
            .map_err(ExchangeError::from)?;

        tracing::info!(
            environment = %self.environment,
            account_type = account.account_type.as_deref().unwrap_or("unknown"),
            can_trade = account.can_trade,
            "Connected to Binance API"
        );
        Ok(())
    }

    async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<OrderSnapshot, ExchangeError> {
        if self.is_live() {
            tracing::warn!(
                client_order_id = %request.client_order_id,
                symbol = %request.symbol,
                "Placing LIVE order - this will execute real trades"
            );
        }

        let params = Self::to_order_params(&request);

        tracing::info!(
            client_order_id = %request.client_order_id,
            symbol = %request.symbol,
            side = %request.side,
            order_type = %request.order_type,
            quantity = %request.quantity,
            price = ?request.price,
            "Placing order on Binance"
        );

        let response: BinanceOrderResponse = self
            .client
            .signed_post("/api/v3/order", &params)
            .await
            .map_err(ExchangeError::from)?;

        tracing::info!(
            client_order_id = %request.client_order_id,
            order_id = response.order_id,
            status = %response.status,
            "Order placed successfully"
        );

        Ok(response.to_snapshot())
    }

    async fn get_order(
        &self,
        symbol: &Symbol,
        order_id: u64,
    ) -> Result<OrderSnapshot, ExchangeError> {
        let response: BinanceOrderResponse = self
            .client
            .signed_get(
                "/api/v3/order",
                &[
                    ("symbol", symbol.as_str().to_string()),
                    ("orderId", order_id.to_string()),
                ],
            )
            .await
            .map_err(ExchangeError::from)?;

        Ok(response.to_snapshot())
    }

    async fn cancel_order(&self, symbol: &Symbol, order_id: u64) -> Result<(), ExchangeError> {
        tracing::info!(order_id, symbol = %symbol, "Cancelling order");
        self.client
            .signed_delete(
                "/api/v3/order",
                &[
                    ("symbol", symbol.as_str().to_string()),
                    ("orderId", order_id.to_string()),
                ],
            )
            .await
            .map_err(ExchangeError::from)
    }

    async fn open_orders(&self, symbol: &Symbol) -> Result<Vec<OrderSnapshot>, ExchangeError> {
        let responses: Vec<BinanceOrderResponse> = self
            .client
            .signed_get(
                "/api/v3/openOrders",
                &[("symbol", symbol.as_str().to_string())],
            )
            .await
            .map_err(ExchangeError::from)?;

        Ok(responses
            .iter()
            .map(BinanceOrderResponse::to_snapshot)
            .collect())
    }
}
