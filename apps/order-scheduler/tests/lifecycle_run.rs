//! Integration tests for the full order lifecycle.
//!
//! These tests drive complete runs through the public API with a fake
//! exchange and a manual clock, so no wall-clock time or network is
//! involved.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use order_scheduler::{
    ClockPort, ExchangeError, ExchangePort, LifecycleTiming, OrderDraft,
    OrderLifecycleController, OrderSide, OrderSnapshot, OrderStatus, OrderType, PlaceOrderRequest,
    RunPhase, SchedulePlan, Symbol, Timestamp,
};

const T0: &str = "2026-08-06T12:00:00Z";

/// Fake exchange backed by queued responses.
#[derive(Default)]
struct FakeExchange {
    place_results: Mutex<VecDeque<Result<OrderSnapshot, ExchangeError>>>,
    status_results: Mutex<VecDeque<OrderSnapshot>>,
    open_orders_results: Mutex<VecDeque<Vec<OrderSnapshot>>>,
    cancelled: Mutex<Vec<u64>>,
    placed_requests: Mutex<Vec<PlaceOrderRequest>>,
}

#[async_trait]
impl ExchangePort for FakeExchange {
    async fn check_connectivity(&self) -> Result<(), ExchangeError> {
        Ok(())
    }

    async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<OrderSnapshot, ExchangeError> {
        self.placed_requests.lock().unwrap().push(request);
        self.place_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(snapshot(1, OrderStatus::New)))
    }

    async fn get_order(
        &self,
        _symbol: &Symbol,
        order_id: u64,
    ) -> Result<OrderSnapshot, ExchangeError> {
        let mut queue = self.status_results.lock().unwrap();
        if queue.len() > 1 {
            Ok(queue.pop_front().unwrap())
        } else {
            queue.front().cloned().ok_or(ExchangeError::OrderNotFound {
                order_id: order_id.to_string(),
            })
        }
    }

    async fn cancel_order(&self, _symbol: &Symbol, order_id: u64) -> Result<(), ExchangeError> {
        self.cancelled.lock().unwrap().push(order_id);
        Ok(())
    }

    async fn open_orders(&self, _symbol: &Symbol) -> Result<Vec<OrderSnapshot>, ExchangeError> {
        Ok(self
            .open_orders_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Clock that advances its own time on every sleep.
#[derive(Clone)]
struct ManualClock {
    inner: Arc<ManualClockInner>,
}

struct ManualClockInner {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    fn at(now: &str) -> Self {
        Self {
            inner: Arc::new(ManualClockInner {
                now: Mutex::new(Timestamp::parse(now).unwrap().as_datetime()),
                sleeps: Mutex::new(Vec::new()),
            }),
        }
    }

    fn sleeps(&self) -> Vec<Duration> {
        self.inner.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClockPort for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(*self.inner.now.lock().unwrap())
    }

    async fn sleep(&self, duration: Duration) {
        let mut now = self.inner.now.lock().unwrap();
        *now = *now + duration;
        self.inner.sleeps.lock().unwrap().push(duration);
    }
}

fn snapshot(order_id: u64, status: OrderStatus) -> OrderSnapshot {
    OrderSnapshot {
        order_id,
        client_order_id: None,
        symbol: Symbol::new("BTCUSDT"),
        side: OrderSide::Buy,
        order_type: OrderType::Limit,
        status,
        price: Decimal::new(64_000, 0),
        orig_qty: Decimal::new(15, 3),
        executed_qty: Decimal::ZERO,
        created_at: Timestamp::parse(T0).unwrap(),
    }
}

fn draft(symbol: &str) -> OrderDraft {
    OrderDraft {
        symbol: Symbol::new(symbol),
        side: OrderSide::Buy,
        order_type: OrderType::Limit,
        price: Some(Decimal::new(64_000, 0)),
        quantity: Decimal::new(15, 3),
    }
}

fn plan(start_time: &str, replacements: Vec<OrderDraft>) -> SchedulePlan {
    SchedulePlan {
        start_time: Timestamp::parse(start_time).unwrap(),
        initial_order: draft("BTCUSDT"),
        replacements,
        timing: LifecycleTiming {
            placement_retry: Duration::from_secs(60),
            expiration_window: Duration::from_secs(300),
            fill_poll: Duration::from_secs(1),
            drain_poll: Duration::from_secs(30),
        },
    }
}

#[tokio::test]
async fn scheduled_order_fills_and_run_completes() {
    let exchange = Arc::new(FakeExchange::default());
    exchange
        .place_results
        .lock()
        .unwrap()
        .push_back(Ok(snapshot(7, OrderStatus::Filled)));
    exchange.open_orders_results.lock().unwrap().push_back(vec![]);

    let clock = ManualClock::at(T0);
    let controller = OrderLifecycleController::new(
        Arc::clone(&exchange),
        clock.clone(),
        // Start 90 seconds ahead of the clock.
        plan("2026-08-06T12:01:30Z", vec![]),
    );

    let report = controller.run().await.unwrap();

    assert_eq!(report.final_phase, RunPhase::Done);
    assert!(report.initial_filled);
    assert!(!report.cancel_issued);
    assert_eq!(report.initial_order.order_id, 7);
    assert!(exchange.cancelled.lock().unwrap().is_empty());

    // Schedule wait, then one drain-poll sleep.
    assert_eq!(
        clock.sleeps(),
        vec![Duration::from_secs(90), Duration::from_secs(30)]
    );
}

#[tokio::test]
async fn expired_order_is_replaced_and_drained() {
    let exchange = Arc::new(FakeExchange::default());
    {
        let mut places = exchange.place_results.lock().unwrap();
        places.push_back(Ok(snapshot(7, OrderStatus::New)));
        // Replacements: first fails, second succeeds.
        places.push_back(Err(ExchangeError::Rejected {
            reason: "insufficient balance".to_string(),
        }));
        places.push_back(Ok(snapshot(8, OrderStatus::New)));
    }
    exchange
        .status_results
        .lock()
        .unwrap()
        .push_back(snapshot(7, OrderStatus::New));
    {
        let mut opens = exchange.open_orders_results.lock().unwrap();
        opens.push_back(vec![snapshot(8, OrderStatus::New)]);
        opens.push_back(vec![]);
    }

    let clock = ManualClock::at(T0);
    let controller = OrderLifecycleController::new(
        Arc::clone(&exchange),
        clock.clone(),
        plan(T0, vec![draft("BTCUSDT"), draft("ETHUSDT")]),
    );

    let report = controller.run().await.unwrap();

    assert_eq!(report.final_phase, RunPhase::Done);
    assert!(!report.initial_filled);
    assert!(report.cancel_issued);
    assert_eq!(*exchange.cancelled.lock().unwrap(), vec![7]);

    // Both replacements attempted, in order, past the failure.
    assert_eq!(report.replacements.len(), 2);
    assert!(!report.replacements[0].succeeded());
    assert!(report.replacements[1].succeeded());
    assert_eq!(report.replacements[1].symbol, Symbol::new("ETHUSDT"));

    // 1 initial + 2 replacement placements.
    assert_eq!(exchange.placed_requests.lock().unwrap().len(), 3);

    // The fill watch polled once per second for the 300s window.
    let sleeps = clock.sleeps();
    let poll_sleeps = sleeps
        .iter()
        .filter(|d| **d == Duration::from_secs(1))
        .count();
    assert_eq!(poll_sleeps, 300);

    // Two drain polls, spaced by the drain interval.
    let drain_sleeps = sleeps
        .iter()
        .filter(|d| **d == Duration::from_secs(30))
        .count();
    assert_eq!(drain_sleeps, 2);
}

#[tokio::test]
async fn placement_requests_carry_configured_order() {
    let exchange = Arc::new(FakeExchange::default());
    exchange
        .place_results
        .lock()
        .unwrap()
        .push_back(Ok(snapshot(7, OrderStatus::Filled)));
    exchange.open_orders_results.lock().unwrap().push_back(vec![]);

    let clock = ManualClock::at(T0);
    let controller =
        OrderLifecycleController::new(Arc::clone(&exchange), clock, plan(T0, vec![]));

    controller.run().await.unwrap();

    let requests = exchange.placed_requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].symbol, Symbol::new("BTCUSDT"));
    assert_eq!(requests[0].side, OrderSide::Buy);
    assert_eq!(requests[0].order_type, OrderType::Limit);
    assert_eq!(requests[0].price, Some(Decimal::new(64_000, 0)));
    assert!(!requests[0].client_order_id.is_empty());
}
