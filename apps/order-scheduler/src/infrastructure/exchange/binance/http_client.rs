//! HTTP client for Binance signed endpoints.
//!
//! One attempt per call: the lifecycle's fixed-delay retry policy lives
//! in the controller, so the transport never retries on its own.

use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use super::api_types::BinanceErrorResponse;
use super::config::BinanceConfig;
use super::error::BinanceError;
use super::signing::sign_query;

/// HTTP client for the Binance REST API.
#[derive(Debug, Clone)]
pub struct BinanceHttpClient {
    client: Client,
    api_key: String,
    api_secret: String,
    base_url: String,
    recv_window: u64,
}

impl BinanceHttpClient {
    /// Create a new HTTP client from config.
    pub fn new(config: &BinanceConfig) -> Result<Self, BinanceError> {
        if config.api_key.is_empty() || config.api_secret.is_empty() {
            return Err(BinanceError::AuthenticationFailed);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            base_url: config.rest_base_url().to_string(),
            recv_window: config.recv_window,
        })
    }

    /// Make a signed GET request.
    pub async fn signed_get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, BinanceError> {
        self.signed_request("GET", path, params).await
    }

    /// Make a signed POST request.
    pub async fn signed_post<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, BinanceError> {
        self.signed_request("POST", path, params).await
    }

    /// Make a signed DELETE request, discarding the response body.
    pub async fn signed_delete(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(), BinanceError> {
        let _: serde_json::Value = self.signed_request("DELETE", path, params).await?;
        Ok(())
    }

    /// Internal single-attempt request implementation.
    async fn signed_request<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, BinanceError> {
        let query = self.build_signed_query(params);
        let url = format!("{}{}?{}", self.base_url, path, query);

        let request = match method {
            "GET" => self.client.get(&url),
            "POST" => self.client.post(&url),
            "DELETE" => self.client.delete(&url),
            _ => {
                return Err(BinanceError::Http(format!("Unsupported method: {method}")));
            }
        }
        .header("X-MBX-APIKEY", &self.api_key);

        let response = request
            .send()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BinanceError::Network(e.to_string()))?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| BinanceError::JsonParse(e.to_string()));
        }

        Err(map_api_error(status, &body, path))
    }

    /// Assemble the query string: caller params, then `recvWindow` and
    /// `timestamp`, with the signature appended last as Binance requires.
    fn build_signed_query(&self, params: &[(&str, String)]) -> String {
        let mut query: String = params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&format!(
            "recvWindow={}&timestamp={}",
            self.recv_window,
            Utc::now().timestamp_millis()
        ));

        let signature = sign_query(&self.api_secret, &query);
        format!("{query}&signature={signature}")
    }
}

/// Map a non-2xx response to a typed error.
fn map_api_error(status: StatusCode, body: &str, path: &str) -> BinanceError {
    let Ok(error) = serde_json::from_str::<BinanceErrorResponse>(body) else {
        return BinanceError::Http(format!("{}: {}", status.as_u16(), body));
    };

    match (status, error.code) {
        (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, _) => {
            BinanceError::AuthenticationFailed
        }
        (StatusCode::TOO_MANY_REQUESTS | StatusCode::IM_A_TEAPOT, _) => BinanceError::RateLimited,
        // -1022: invalid signature
        (_, -1022) => BinanceError::AuthenticationFailed,
        // -2013: order does not exist
        (_, -2013) => BinanceError::OrderNotFound {
            order_id: path.to_string(),
        },
        // -2010/-2011: new order / cancel rejected by the matching engine
        (_, -2010 | -2011) => BinanceError::OrderRejected(error.msg),
        _ => BinanceError::Api {
            code: error.code,
            message: error.msg,
        },
    }
}
