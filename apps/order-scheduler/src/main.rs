//! Order Scheduler Binary
//!
//! Loads settings, waits for the scheduled start time, and drives one
//! order through its lifecycle to completion.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin order-scheduler -- [path/to/config.yaml]
//! ```
//!
//! The config path defaults to `config.yaml` in the working directory.
//!
//! # Environment Variables
//!
//! - `BINANCE_API_KEY` / `BINANCE_API_SECRET`: referenced from the
//!   config file via `${...}` interpolation
//! - `RUST_LOG`: Log level (default: info)

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use order_scheduler::application::ports::SystemClock;
use order_scheduler::application::use_cases::{
    LifecycleTiming, OrderDraft, OrderLifecycleController, SchedulePlan,
};
use order_scheduler::config::{self, OrderSettings, Settings};
use order_scheduler::domain::shared::Symbol;
use order_scheduler::infrastructure::exchange::binance::{
    BinanceConfig, BinanceEnvironment, BinanceExchangeAdapter,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    tracing::info!("Starting order scheduler");

    let config_path = std::env::args().nth(1);
    let settings =
        config::load_settings(config_path.as_deref()).context("Failed to load configuration")?;
    log_settings(&settings);

    let exchange = create_exchange(&settings).context("Failed to build exchange adapter")?;
    let plan = build_plan(&settings);

    let controller = OrderLifecycleController::new(Arc::new(exchange), SystemClock, plan);
    let report = controller.run().await.context("Lifecycle run failed")?;

    tracing::info!(
        final_phase = %report.final_phase,
        initial_filled = report.initial_filled,
        cancel_issued = report.cancel_issued,
        "All orders executed, run complete"
    );
    Ok(())
}

/// Initialize the tracing subscriber with environment filter.
///
/// Uses a static directive string that is a compile-time constant
/// guaranteed to parse.
#[allow(clippy::expect_used)]
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "order_scheduler=info"
                    .parse()
                    .expect("static directive 'order_scheduler=info' is valid"),
            ),
        )
        .init();
}

/// Log the loaded settings (never the credentials).
fn log_settings(settings: &Settings) {
    tracing::info!(
        environment = %settings.exchange.environment,
        symbol = %settings.order.symbol,
        side = %settings.order.side,
        order_type = %settings.order.order_type,
        quantity = %settings.order.quantity,
        start_time = %settings.schedule.start_time,
        replacements = settings.replacements.len(),
        "Configuration loaded"
    );
}

/// Build the Binance adapter from settings.
fn create_exchange(settings: &Settings) -> anyhow::Result<BinanceExchangeAdapter> {
    let environment = match settings.exchange.environment.as_str() {
        "live" => BinanceEnvironment::Live,
        _ => BinanceEnvironment::Testnet,
    };

    let config = BinanceConfig::new(
        settings.exchange.api_key.clone(),
        settings.exchange.api_secret.clone(),
        environment,
    );

    Ok(BinanceExchangeAdapter::new(config)?)
}

/// Assemble the run plan from settings.
fn build_plan(settings: &Settings) -> SchedulePlan {
    SchedulePlan {
        start_time: settings.schedule.start_time,
        initial_order: draft_from(&settings.order),
        replacements: settings.replacements.iter().map(draft_from).collect(),
        timing: LifecycleTiming {
            placement_retry: Duration::from_secs(settings.timing.placement_retry_secs),
            expiration_window: Duration::from_secs(settings.timing.expiration_window_secs),
            fill_poll: Duration::from_secs(settings.timing.fill_poll_secs),
            drain_poll: Duration::from_secs(settings.timing.drain_poll_secs),
        },
    }
}

/// Convert one configured order description to a draft.
fn draft_from(order: &OrderSettings) -> OrderDraft {
    OrderDraft {
        symbol: Symbol::new(&order.symbol),
        side: order.side,
        order_type: order.order_type,
        price: order.price,
        quantity: order.quantity,
    }
}
