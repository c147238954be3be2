//! Configuration module for the order scheduler.
//!
//! Loads the run settings once at startup from a YAML file with
//! environment variable interpolation, applies documented defaults, and
//! validates the result. Settings are never mutated after load.
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_scheduler::config::load_settings;
//!
//! // Load from default path (config.yaml)
//! let settings = load_settings(None)?;
//!
//! // Load from custom path
//! let settings = load_settings(Some("custom/config.yaml"))?;
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::order::{OrderSide, OrderType};
use crate::domain::shared::{Symbol, Timestamp};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root settings structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Exchange credentials and environment.
    pub exchange: ExchangeSettings,
    /// The initial order.
    pub order: OrderSettings,
    /// Scheduled start.
    pub schedule: ScheduleSettings,
    /// Timing parameters for the lifecycle loops.
    #[serde(default)]
    pub timing: TimingSettings,
    /// Orders to place if the initial order expires unfilled.
    #[serde(default)]
    pub replacements: Vec<OrderSettings>,
}

/// Exchange credentials and environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeSettings {
    /// API key.
    #[serde(default)]
    pub api_key: String,
    /// API secret.
    #[serde(default)]
    pub api_secret: String,
    /// Trading environment: "testnet" or "live".
    #[serde(default = "default_environment")]
    pub environment: String,
}

/// One order description: the initial order or a replacement entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSettings {
    /// Symbol to trade.
    pub symbol: String,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price (required for priced order types).
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Quantity in base asset.
    pub quantity: Decimal,
}

/// Scheduled start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// When to place the initial order (RFC 3339).
    pub start_time: Timestamp,
}

/// Timing parameters, all in seconds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimingSettings {
    /// Delay between initial placement attempts.
    #[serde(default = "default_placement_retry_secs")]
    pub placement_retry_secs: u64,
    /// How long an unfilled initial order may rest before cancellation.
    #[serde(default = "default_expiration_window_secs")]
    pub expiration_window_secs: u64,
    /// Cadence of fill-status polls.
    #[serde(default = "default_fill_poll_secs")]
    pub fill_poll_secs: u64,
    /// Cadence of open-order polls in the drain phase.
    #[serde(default = "default_drain_poll_secs")]
    pub drain_poll_secs: u64,
}

impl Default for TimingSettings {
    fn default() -> Self {
        Self {
            placement_retry_secs: default_placement_retry_secs(),
            expiration_window_secs: default_expiration_window_secs(),
            fill_poll_secs: default_fill_poll_secs(),
            drain_poll_secs: default_drain_poll_secs(),
        }
    }
}

fn default_environment() -> String {
    "testnet".to_string()
}

const fn default_placement_retry_secs() -> u64 {
    60
}

const fn default_expiration_window_secs() -> u64 {
    300
}

const fn default_fill_poll_secs() -> u64 {
    1
}

const fn default_drain_poll_secs() -> u64 {
    30
}

// ============================================
// Configuration Loading
// ============================================

/// Load settings from a YAML file with environment variable interpolation.
///
/// # Arguments
///
/// * `path` - Optional path to the config file. Defaults to "config.yaml".
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let path = path.unwrap_or("config.yaml");

    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_string(),
        source: e,
    })?;

    load_settings_from_string(&contents)
}

/// Load settings from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_settings_from_string(yaml: &str) -> Result<Settings, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let settings: Settings = serde_yaml_bw::from_str(&interpolated)?;
    validate_settings(&settings)?;
    Ok(settings)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax.
#[allow(clippy::expect_used)] // Regex is compile-time constant; expect() is safe here
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let mut result = input.to_string();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    for cap in re.captures_iter(input) {
        let Some(full_match) = cap.get(0) else {
            continue;
        };
        let Some(var_match) = cap.get(1) else {
            continue;
        };
        let full_match = full_match.as_str();
        let var_name = var_match.as_str();
        let default_value = cap.get(2).map(|m| m.as_str());

        let value = match std::env::var(var_name) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.map_or_else(String::new, str::to_string),
        };

        result = result.replace(full_match, &value);
    }

    result
}

/// Validate settings values.
fn validate_settings(settings: &Settings) -> Result<(), ConfigError> {
    if settings.exchange.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "exchange.api_key must be set".to_string(),
        ));
    }

    if settings.exchange.api_secret.is_empty() {
        return Err(ConfigError::ValidationError(
            "exchange.api_secret must be set".to_string(),
        ));
    }

    let valid_environments = ["testnet", "live"];
    if !valid_environments.contains(&settings.exchange.environment.as_str()) {
        return Err(ConfigError::ValidationError(format!(
            "exchange.environment must be one of: {valid_environments:?}"
        )));
    }

    validate_order(&settings.order, "order")?;
    for (index, order) in settings.replacements.iter().enumerate() {
        validate_order(order, &format!("replacements[{index}]"))?;
    }

    let timing = &settings.timing;
    for (name, value) in [
        ("placement_retry_secs", timing.placement_retry_secs),
        ("expiration_window_secs", timing.expiration_window_secs),
        ("fill_poll_secs", timing.fill_poll_secs),
        ("drain_poll_secs", timing.drain_poll_secs),
    ] {
        if value == 0 {
            return Err(ConfigError::ValidationError(format!(
                "timing.{name} must be positive"
            )));
        }
    }

    Ok(())
}

/// Validate one order description.
fn validate_order(order: &OrderSettings, context: &str) -> Result<(), ConfigError> {
    Symbol::new(&order.symbol)
        .validate()
        .map_err(|e| ConfigError::ValidationError(format!("{context}.symbol: {e}")))?;

    if order.quantity <= Decimal::ZERO {
        return Err(ConfigError::ValidationError(format!(
            "{context}.quantity must be positive"
        )));
    }

    if order.order_type.is_priced() {
        match order.price {
            Some(price) if price > Decimal::ZERO => {}
            Some(_) => {
                return Err(ConfigError::ValidationError(format!(
                    "{context}.price must be positive"
                )));
            }
            None => {
                return Err(ConfigError::ValidationError(format!(
                    "{context}.price is required for {} orders",
                    order.order_type
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FULL_YAML: &str = r#"
exchange:
  api_key: test-key
  api_secret: test-secret
  environment: live
order:
  symbol: BTCUSDT
  side: BUY
  order_type: LIMIT
  price: "64250.10"
  quantity: "0.015"
schedule:
  start_time: "2026-08-06T14:30:00Z"
timing:
  placement_retry_secs: 10
  expiration_window_secs: 120
replacements:
  - symbol: BTCUSDT
    side: BUY
    order_type: LIMIT
    price: "63000"
    quantity: "0.02"
"#;

    const MINIMAL_YAML: &str = r#"
exchange:
  api_key: test-key
  api_secret: test-secret
order:
  symbol: BTCUSDT
  side: SELL
  order_type: MARKET
  quantity: "0.5"
schedule:
  start_time: "2026-08-06T14:30:00Z"
"#;

    #[test]
    fn load_full_settings() {
        let settings = load_settings_from_string(FULL_YAML).unwrap();

        assert_eq!(settings.exchange.environment, "live");
        assert_eq!(settings.order.symbol, "BTCUSDT");
        assert_eq!(settings.order.side, OrderSide::Buy);
        assert_eq!(settings.order.price, Some(dec!(64250.10)));
        assert_eq!(settings.timing.placement_retry_secs, 10);
        assert_eq!(settings.timing.expiration_window_secs, 120);
        // Unset timing fields keep their defaults.
        assert_eq!(settings.timing.fill_poll_secs, 1);
        assert_eq!(settings.timing.drain_poll_secs, 30);
        assert_eq!(settings.replacements.len(), 1);
    }

    #[test]
    fn load_minimal_settings_applies_defaults() {
        let settings = load_settings_from_string(MINIMAL_YAML).unwrap();

        assert_eq!(settings.exchange.environment, "testnet");
        assert_eq!(settings.timing.placement_retry_secs, 60);
        assert_eq!(settings.timing.expiration_window_secs, 300);
        assert!(settings.replacements.is_empty());
        assert!(settings.order.price.is_none());
    }

    #[test]
    fn start_time_parses_rfc3339() {
        let settings = load_settings_from_string(MINIMAL_YAML).unwrap();
        assert_eq!(
            settings.schedule.start_time,
            Timestamp::parse("2026-08-06T14:30:00Z").unwrap()
        );
    }

    #[test]
    fn env_var_interpolation_with_default() {
        let input = "environment: ${ORDER_SCHEDULER_TEST_NONEXISTENT_VAR:-testnet}";
        assert_eq!(interpolate_env_vars(input), "environment: testnet");
    }

    #[test]
    #[expect(clippy::literal_string_with_formatting_args)] // ${...} is env var syntax, not format args
    fn env_var_interpolation_uses_existing() {
        // PATH should always exist
        let input = "path: ${PATH:-default}";
        let result = interpolate_env_vars(input);

        assert_ne!(result, "path: default");
        assert!(result.starts_with("path: "));
    }

    #[test]
    fn env_var_without_default_becomes_empty() {
        let input = "api_key: ${ORDER_SCHEDULER_TEST_UNLIKELY_TO_EXIST}";
        assert_eq!(interpolate_env_vars(input), "api_key: ");
    }

    #[test]
    fn missing_api_key_fails_validation() {
        let yaml = MINIMAL_YAML.replace("api_key: test-key", "api_key: \"\"");
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn invalid_environment_fails_validation() {
        let yaml = MINIMAL_YAML.replace(
            "api_secret: test-secret",
            "api_secret: test-secret\n  environment: sandbox",
        );
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn limit_order_without_price_fails_validation() {
        let yaml = MINIMAL_YAML.replace("order_type: MARKET", "order_type: LIMIT");
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn zero_quantity_fails_validation() {
        let yaml = MINIMAL_YAML.replace("quantity: \"0.5\"", "quantity: \"0\"");
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn invalid_symbol_fails_validation() {
        let yaml = MINIMAL_YAML.replace("symbol: BTCUSDT", "symbol: BTC-USDT");
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn zero_timing_fails_validation() {
        let yaml = format!("{MINIMAL_YAML}timing:\n  fill_poll_secs: 0\n");
        let result = load_settings_from_string(&yaml);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn load_settings_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL_YAML.as_bytes()).unwrap();

        let settings = load_settings(file.path().to_str()).unwrap();
        assert_eq!(settings.order.symbol, "BTCUSDT");
    }

    #[test]
    fn load_settings_missing_file() {
        let result = load_settings(Some("definitely/not/here.yaml"));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
