//! Run Scheduled Order Lifecycle Use Case
//!
//! Drives one order through schedule, placement, fill-or-expire,
//! cancel-and-replace, and the final drain wait. Fully sequential; every
//! wait goes through the clock port.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::application::ports::{ClockPort, ExchangeError, ExchangePort, PlaceOrderRequest};
use crate::domain::lifecycle::{PhaseError, PhaseMachine, RunPhase};
use crate::domain::order::{OrderSide, OrderSnapshot, OrderType, TimeInForce};
use crate::domain::shared::{Symbol, Timestamp};

/// Description of one order to place, taken from configuration.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    /// Symbol to trade.
    pub symbol: Symbol,
    /// Order side.
    pub side: OrderSide,
    /// Order type.
    pub order_type: OrderType,
    /// Limit price (priced orders).
    pub price: Option<Decimal>,
    /// Quantity in base asset.
    pub quantity: Decimal,
}

impl OrderDraft {
    /// Build a placement request with a fresh client order id.
    ///
    /// Orders rest with GTC; each attempt gets its own id so a retry
    /// never collides with an attempt the exchange may have accepted.
    #[must_use]
    pub fn to_request(&self) -> PlaceOrderRequest {
        PlaceOrderRequest {
            client_order_id: uuid::Uuid::new_v4().to_string(),
            symbol: self.symbol.clone(),
            side: self.side,
            order_type: self.order_type,
            quantity: self.quantity,
            price: self.price,
            time_in_force: TimeInForce::Gtc,
        }
    }
}

/// Timing parameters for the lifecycle loops.
#[derive(Debug, Clone, Copy)]
pub struct LifecycleTiming {
    /// Delay between initial placement attempts.
    pub placement_retry: Duration,
    /// How long an unfilled initial order may rest before cancellation.
    pub expiration_window: Duration,
    /// Cadence of fill-status polls.
    pub fill_poll: Duration,
    /// Cadence of open-order polls in the drain phase.
    pub drain_poll: Duration,
}

impl Default for LifecycleTiming {
    fn default() -> Self {
        Self {
            placement_retry: Duration::from_secs(60),
            expiration_window: Duration::from_secs(300),
            fill_poll: Duration::from_secs(1),
            drain_poll: Duration::from_secs(30),
        }
    }
}

/// Everything one run needs, assembled from settings at startup.
#[derive(Debug, Clone)]
pub struct SchedulePlan {
    /// When to place the initial order.
    pub start_time: Timestamp,
    /// The initial order.
    pub initial_order: OrderDraft,
    /// Orders to place if the initial order expires unfilled.
    pub replacements: Vec<OrderDraft>,
    /// Loop timing.
    pub timing: LifecycleTiming,
}

/// Outcome of one replacement placement attempt.
#[derive(Debug)]
pub struct ReplacementOutcome {
    /// Symbol of the replacement order.
    pub symbol: Symbol,
    /// Placement result.
    pub result: Result<OrderSnapshot, ExchangeError>,
}

impl ReplacementOutcome {
    /// Whether the placement succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.result.is_ok()
    }
}

/// Summary of a completed run.
#[derive(Debug)]
pub struct RunReport {
    /// Phase the run finished in.
    pub final_phase: RunPhase,
    /// Last known snapshot of the initial order.
    pub initial_order: OrderSnapshot,
    /// Whether the initial order filled.
    pub initial_filled: bool,
    /// Whether a cancel was issued for the initial order.
    pub cancel_issued: bool,
    /// Per-item replacement outcomes (empty unless the order expired).
    pub replacements: Vec<ReplacementOutcome>,
}

/// Errors that end a run early.
///
/// Only the startup gate is fatal; every later failure is logged and
/// retried or skipped per the lifecycle rules.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Connectivity/credential check failed at startup.
    #[error("Startup connectivity check failed: {0}")]
    Startup(ExchangeError),

    /// Internal phase bookkeeping error.
    #[error(transparent)]
    Phase(#[from] PhaseError),
}

/// Result of the fill watch on the initial order.
enum FillWatch {
    Filled(OrderSnapshot),
    Expired(OrderSnapshot),
}

/// Drives one scheduled order to completion.
pub struct OrderLifecycleController<E, C>
where
    E: ExchangePort,
    C: ClockPort,
{
    exchange: Arc<E>,
    clock: C,
    plan: SchedulePlan,
}

impl<E, C> OrderLifecycleController<E, C>
where
    E: ExchangePort,
    C: ClockPort,
{
    /// Create a new controller.
    pub const fn new(exchange: Arc<E>, clock: C, plan: SchedulePlan) -> Self {
        Self {
            exchange,
            clock,
            plan,
        }
    }

    /// Run the lifecycle to completion.
    ///
    /// # Errors
    ///
    /// Returns `LifecycleError::Startup` if the connectivity check
    /// fails; nothing has been placed at that point.
    pub async fn run(&self) -> Result<RunReport, LifecycleError> {
        let mut phase = RunPhase::New;

        self.exchange
            .check_connectivity()
            .await
            .map_err(LifecycleError::Startup)?;
        tracing::info!("Exchange connectivity verified");

        self.await_start_time().await;

        let placed = self.place_initial_order().await;
        self.advance(&mut phase, RunPhase::Placed)?;

        let mut cancel_issued = false;
        let mut replacements = Vec::new();

        let latest = match self.watch_fill(&placed).await {
            FillWatch::Filled(snapshot) => {
                self.advance(&mut phase, RunPhase::Filled)?;
                snapshot
            }
            FillWatch::Expired(snapshot) => {
                self.advance(&mut phase, RunPhase::Expiring)?;
                self.cancel_initial_order(&snapshot).await;
                cancel_issued = true;
                self.advance(&mut phase, RunPhase::Cancelled)?;
                replacements = self.place_replacement_orders().await;
                snapshot
            }
        };

        self.advance(&mut phase, RunPhase::Draining)?;
        self.drain_open_orders().await;
        self.advance(&mut phase, RunPhase::Done)?;

        Ok(RunReport {
            final_phase: phase,
            initial_filled: latest.is_filled(),
            initial_order: latest,
            cancel_issued,
            replacements,
        })
    }

    /// Suspend until the scheduled start time, if it is still ahead.
    async fn await_start_time(&self) {
        let now = self.clock.now();
        let delay = self.plan.start_time.duration_since(now);
        match delay.to_std() {
            Ok(delay) if !delay.is_zero() => {
                tracing::info!(
                    start_time = %self.plan.start_time,
                    wait_secs = delay.as_secs(),
                    "Waiting for scheduled start time"
                );
                self.clock.sleep(delay).await;
            }
            _ => {
                tracing::info!(
                    start_time = %self.plan.start_time,
                    "Start time already passed, placing order immediately"
                );
            }
        }
    }

    /// Place the initial order, retrying any failure at a fixed interval.
    ///
    /// No attempt cap: the run cannot proceed without this order.
    async fn place_initial_order(&self) -> OrderSnapshot {
        loop {
            let request = self.plan.initial_order.to_request();
            match self.exchange.place_order(request).await {
                Ok(snapshot) => {
                    tracing::info!(
                        order_id = snapshot.order_id,
                        status = %snapshot.status,
                        price = %snapshot.price,
                        quantity = %snapshot.orig_qty,
                        "Initial order placed"
                    );
                    return snapshot;
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        retry_secs = self.plan.timing.placement_retry.as_secs(),
                        "Initial order placement failed, retrying"
                    );
                    self.clock.sleep(self.plan.timing.placement_retry).await;
                }
            }
        }
    }

    /// Poll the initial order until it fills or its deadline passes.
    ///
    /// The deadline derives from the exchange-reported creation time,
    /// not from local placement time. A failed poll is logged and the
    /// loop keeps going; the deadline still bounds it.
    async fn watch_fill(&self, placed: &OrderSnapshot) -> FillWatch {
        if placed.is_filled() {
            tracing::info!(order_id = placed.order_id, "Initial order filled on placement");
            return FillWatch::Filled(placed.clone());
        }

        let deadline = placed.created_at.as_datetime() + self.plan.timing.expiration_window;
        let mut latest = placed.clone();

        while self.clock.now().as_datetime() < deadline {
            self.clock.sleep(self.plan.timing.fill_poll).await;
            match self
                .exchange
                .get_order(&latest.symbol, latest.order_id)
                .await
            {
                Ok(snapshot) => {
                    if snapshot.is_filled() {
                        tracing::info!(order_id = snapshot.order_id, "Initial order filled");
                        return FillWatch::Filled(snapshot);
                    }
                    latest = snapshot;
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        order_id = latest.order_id,
                        "Order status poll failed"
                    );
                }
            }
        }

        tracing::info!(
            order_id = latest.order_id,
            status = %latest.status,
            "Initial order not filled within expiration window"
        );
        FillWatch::Expired(latest)
    }

    /// Issue the one cancel for the expired initial order.
    ///
    /// Cancellation failure is reported, not retried; the lifecycle
    /// proceeds regardless of the outcome.
    async fn cancel_initial_order(&self, order: &OrderSnapshot) {
        match self
            .exchange
            .cancel_order(&order.symbol, order.order_id)
            .await
        {
            Ok(()) => {
                tracing::info!(order_id = order.order_id, "Initial order cancelled");
            }
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    order_id = order.order_id,
                    "Cancel failed, continuing"
                );
            }
        }
    }

    /// Place every configured replacement order, best-effort.
    ///
    /// Placement failures are reported per item and do not block the
    /// remaining entries. No atomicity across the batch.
    async fn place_replacement_orders(&self) -> Vec<ReplacementOutcome> {
        if self.plan.replacements.is_empty() {
            tracing::info!("No replacement orders configured");
            return Vec::new();
        }

        let mut outcomes = Vec::with_capacity(self.plan.replacements.len());
        for draft in &self.plan.replacements {
            let request = draft.to_request();
            let result = self.exchange.place_order(request).await;
            match &result {
                Ok(snapshot) => {
                    tracing::info!(
                        order_id = snapshot.order_id,
                        symbol = %snapshot.symbol,
                        "Replacement order placed"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        error = %error,
                        symbol = %draft.symbol,
                        "Replacement order placement failed, continuing with remaining"
                    );
                }
            }
            outcomes.push(ReplacementOutcome {
                symbol: draft.symbol.clone(),
                result,
            });
        }
        outcomes
    }

    /// Poll until no orders remain open on the symbol.
    ///
    /// Sleep first, then query; terminates on the first empty listing.
    /// No upper bound on the loop. A failed query is logged and polled
    /// again on the next interval.
    async fn drain_open_orders(&self) {
        let symbol = &self.plan.initial_order.symbol;
        loop {
            self.clock.sleep(self.plan.timing.drain_poll).await;
            match self.exchange.open_orders(symbol).await {
                Ok(open) if open.is_empty() => {
                    tracing::info!(symbol = %symbol, "All orders closed");
                    return;
                }
                Ok(open) => {
                    tracing::info!(symbol = %symbol, open = open.len(), "Orders still open");
                }
                Err(error) => {
                    tracing::warn!(error = %error, symbol = %symbol, "Open orders query failed");
                }
            }
        }
    }

    /// Record a phase transition, validating it against the machine.
    fn advance(&self, phase: &mut RunPhase, to: RunPhase) -> Result<(), PhaseError> {
        PhaseMachine::validate_transition(*phase, to)?;
        tracing::debug!(from = %phase, to = %to, "Lifecycle phase transition");
        *phase = to;
        Ok(())
    }
}
