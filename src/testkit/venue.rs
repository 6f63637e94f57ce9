//! Scripted [`VenueClient`] fake.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    Amount, Balance, ComplianceStatus, OrderBook, OrderResult, OrderSide, OrderStatus, Price,
    Rate, Trade, TradingLimits, VenueId,
};
use crate::error::VenueError;
use crate::venue::VenueClient;

/// A venue fake with fixed quotes and a scripted order-result queue.
///
/// Each order placement pops the next result from the queue (defaulting to a
/// full fill at the scripted price when exhausted) and bumps a shared
/// counter, so tests can assert exactly how many dispatches a venue received.
pub struct ScriptedVenue {
    id: VenueId,
    available: bool,
    price: Price,
    fail_price: bool,
    fee_rate: Rate,
    trading_allowed: bool,
    response_delay: Duration,
    book: Option<OrderBook>,
    limits: Option<TradingLimits>,
    order_results: Mutex<VecDeque<OrderResult>>,
    market_orders: Arc<AtomicU32>,
    limit_orders: Arc<AtomicU32>,
}

impl ScriptedVenue {
    pub fn new(id: VenueId) -> Self {
        Self {
            id,
            available: true,
            price: dec!(148.50),
            fail_price: false,
            fee_rate: dec!(0.001),
            trading_allowed: true,
            response_delay: Duration::ZERO,
            book: None,
            limits: None,
            order_results: Mutex::new(VecDeque::new()),
            market_orders: Arc::new(AtomicU32::new(0)),
            limit_orders: Arc::new(AtomicU32::new(0)),
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = price;
        self
    }

    pub fn with_fee_rate(mut self, fee_rate: Rate) -> Self {
        self.fee_rate = fee_rate;
        self
    }

    pub fn with_available(mut self, available: bool) -> Self {
        self.available = available;
        self
    }

    /// Make every price query return a transport error.
    pub fn with_failing_price(mut self) -> Self {
        self.fail_price = true;
        self
    }

    pub fn with_trading_allowed(mut self, allowed: bool) -> Self {
        self.trading_allowed = allowed;
        self
    }

    /// Delay applied to every call; drive it past the collector timeout to
    /// simulate a slow venue.
    pub fn with_response_delay(mut self, delay: Duration) -> Self {
        self.response_delay = delay;
        self
    }

    pub fn with_book(mut self, book: OrderBook) -> Self {
        self.book = Some(book);
        self
    }

    pub fn with_limits(mut self, limits: TradingLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_order_results(self, results: Vec<OrderResult>) -> Self {
        *self.order_results.lock() = results.into();
        self
    }

    /// Total order placements across both order types.
    pub fn dispatch_count(&self) -> u32 {
        self.market_orders.load(Ordering::SeqCst) + self.limit_orders.load(Ordering::SeqCst)
    }

    pub fn market_order_count(&self) -> u32 {
        self.market_orders.load(Ordering::SeqCst)
    }

    pub fn limit_order_count(&self) -> u32 {
        self.limit_orders.load(Ordering::SeqCst)
    }

    /// Shared counters for asserting dispatch counts after the venue has
    /// been moved into a registry.
    pub fn counters(&self) -> (Arc<AtomicU32>, Arc<AtomicU32>) {
        (self.market_orders.clone(), self.limit_orders.clone())
    }

    async fn delay(&self) {
        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
    }

    fn next_order_result(&self, amount: Amount) -> OrderResult {
        self.order_results
            .lock()
            .pop_front()
            .unwrap_or_else(|| OrderResult::filled(self.id, "scripted-1", amount, self.price))
    }
}

#[async_trait]
impl VenueClient for ScriptedVenue {
    fn id(&self) -> VenueId {
        self.id
    }

    async fn is_available(&self) -> bool {
        self.delay().await;
        self.available
    }

    async fn current_price(&self, _symbol: &str, _quote: &str) -> Result<Price, VenueError> {
        self.delay().await;
        if self.fail_price {
            return Err(VenueError::Transport("scripted price failure".into()));
        }
        Ok(self.price)
    }

    async fn fee_rate(&self) -> Result<Rate, VenueError> {
        Ok(self.fee_rate)
    }

    async fn place_market_order(
        &self,
        _symbol: &str,
        amount: Amount,
        _side: OrderSide,
    ) -> Result<OrderResult, VenueError> {
        self.delay().await;
        self.market_orders.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_order_result(amount))
    }

    async fn place_limit_order(
        &self,
        _symbol: &str,
        amount: Amount,
        _price: Price,
        _side: OrderSide,
    ) -> Result<OrderResult, VenueError> {
        self.delay().await;
        self.limit_orders.fetch_add(1, Ordering::SeqCst);
        Ok(self.next_order_result(amount))
    }

    async fn balance(&self, asset: &str) -> Result<Balance, VenueError> {
        Ok(Balance::new(asset, dec!(1000000), Decimal::ZERO))
    }

    async fn trade_history(
        &self,
        _symbol: &str,
        _since: DateTime<Utc>,
    ) -> Result<Vec<Trade>, VenueError> {
        Ok(Vec::new())
    }

    async fn order_book(&self, symbol: &str, _depth: usize) -> Result<OrderBook, VenueError> {
        self.delay().await;
        match &self.book {
            Some(book) => Ok(book.clone()),
            None => Err(VenueError::UnknownSymbol(symbol.to_string())),
        }
    }

    async fn trading_limits(&self) -> Result<TradingLimits, VenueError> {
        match &self.limits {
            Some(l) => Ok(l.clone()),
            None => Err(VenueError::Transport("limits not scripted".into())),
        }
    }

    async fn compliance_status(&self) -> Result<ComplianceStatus, VenueError> {
        self.delay().await;
        if self.trading_allowed {
            Ok(ComplianceStatus::clear("scripted"))
        } else {
            Ok(ComplianceStatus::halted("scripted halt"))
        }
    }

    async fn cancel_order(&self, _order_id: &str) -> Result<bool, VenueError> {
        Ok(false)
    }

    async fn order_status(&self, order_id: &str) -> Result<OrderStatus, VenueError> {
        Err(VenueError::UnknownOrder(order_id.to_string()))
    }
}
