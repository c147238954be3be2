//! Request signing for Binance signed endpoints.
//!
//! Binance authenticates SIGNED endpoints with an HMAC-SHA256 digest of
//! the request query string, hex-encoded and appended as the final
//! `signature` parameter.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the hex-encoded HMAC-SHA256 signature of a query string.
#[allow(clippy::expect_used)] // HMAC accepts keys of any length
#[must_use]
pub fn sign_query(api_secret: &str, query: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(api_secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(query.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
